//! Canonical vector path geometry.
//!
//! A [`PathGeometry`] is an ordered list of [`PathFigure`]s sharing one
//! [`FillRule`]. Each figure owns its start point and an ordered list of
//! [`Segment`]s. Figure order is z-order for fill and stroke composition.
//!
//! Geometries are created empty and populated through a
//! [`GeometryContext`].

mod context;

pub use context::GeometryContext;

use serde::{Deserialize, Serialize};

use crate::types::{Point, Rect, Size};

/// Winding convention deciding which regions of overlapping figures are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    Nonzero,
    EvenOdd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepDirection {
    #[default]
    Clockwise,
    Counterclockwise,
}

/// Discriminant of a [`Segment`], handy for structural comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Line,
    QuadraticBezier,
    CubicBezier,
    Arc,
}

/// One drawing step inside a figure.
///
/// `is_stroked` is a per-segment override: a segment with `is_stroked == false`
/// contributes to the fill but draws no stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Line {
        point: Point,
        is_stroked: bool,
    },
    QuadraticBezier {
        point1: Point,
        point2: Point,
        is_stroked: bool,
    },
    CubicBezier {
        point1: Point,
        point2: Point,
        point3: Point,
        is_stroked: bool,
    },
    Arc {
        point: Point,
        size: Size,
        rotation_angle: f64,
        is_large_arc: bool,
        sweep_direction: SweepDirection,
        is_stroked: bool,
    },
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Line { .. } => SegmentKind::Line,
            Segment::QuadraticBezier { .. } => SegmentKind::QuadraticBezier,
            Segment::CubicBezier { .. } => SegmentKind::CubicBezier,
            Segment::Arc { .. } => SegmentKind::Arc,
        }
    }

    pub fn end_point(&self) -> Point {
        match self {
            Segment::Line { point, .. } => *point,
            Segment::QuadraticBezier { point2, .. } => *point2,
            Segment::CubicBezier { point3, .. } => *point3,
            Segment::Arc { point, .. } => *point,
        }
    }

    pub fn is_stroked(&self) -> bool {
        match self {
            Segment::Line { is_stroked, .. }
            | Segment::QuadraticBezier { is_stroked, .. }
            | Segment::CubicBezier { is_stroked, .. }
            | Segment::Arc { is_stroked, .. } => *is_stroked,
        }
    }

    pub fn set_stroked(&mut self, value: bool) {
        match self {
            Segment::Line { is_stroked, .. }
            | Segment::QuadraticBezier { is_stroked, .. }
            | Segment::CubicBezier { is_stroked, .. }
            | Segment::Arc { is_stroked, .. } => *is_stroked = value,
        }
    }

    /// Points defining the segment (end point plus control points).
    ///
    /// Arcs only report their end point; their bulge is not included.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Segment::Line { point, .. } => vec![*point],
            Segment::QuadraticBezier { point1, point2, .. } => vec![*point1, *point2],
            Segment::CubicBezier {
                point1,
                point2,
                point3,
                ..
            } => vec![*point1, *point2, *point3],
            Segment::Arc { point, .. } => vec![*point],
        }
    }
}

/// One contiguous sub-path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathFigure {
    pub start_point: Point,
    pub segments: Vec<Segment>,
    pub is_closed: bool,
}

impl PathFigure {
    pub fn new(start_point: Point, is_closed: bool) -> Self {
        Self {
            start_point,
            segments: Vec::new(),
            is_closed,
        }
    }

    /// A figure without segments must never reach a renderer.
    pub fn is_degenerate(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last_point(&self) -> Point {
        self.segments
            .last()
            .map(Segment::end_point)
            .unwrap_or(self.start_point)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathGeometry {
    pub figures: Vec<PathFigure>,
    pub fill_rule: FillRule,
}

impl PathGeometry {
    pub fn new(fill_rule: FillRule) -> Self {
        Self {
            figures: Vec::new(),
            fill_rule,
        }
    }

    /// Opens a builder cursor over this geometry.
    pub fn context(&mut self) -> GeometryContext<'_> {
        GeometryContext::new(self)
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.figures.iter().map(|f| f.segments.len()).sum()
    }

    /// Control-point bounds of all figures.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.figures.iter().flat_map(|f| {
            std::iter::once(f.start_point).chain(f.segments.iter().flat_map(Segment::points))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_end_points() {
        let seg = Segment::CubicBezier {
            point1: Point::new(1.0, 1.0),
            point2: Point::new(2.0, 2.0),
            point3: Point::new(3.0, 0.0),
            is_stroked: true,
        };
        assert_eq!(seg.end_point(), Point::new(3.0, 0.0));
        assert_eq!(seg.kind(), SegmentKind::CubicBezier);
    }

    #[test]
    fn test_figure_last_point_falls_back_to_start() {
        let figure = PathFigure::new(Point::new(4.0, 5.0), false);
        assert!(figure.is_degenerate());
        assert_eq!(figure.last_point(), Point::new(4.0, 5.0));
    }

    #[test]
    fn test_geometry_bounds_include_control_points() {
        let mut geometry = PathGeometry::new(FillRule::EvenOdd);
        geometry.figures.push(PathFigure {
            start_point: Point::new(0.0, 0.0),
            segments: vec![Segment::QuadraticBezier {
                point1: Point::new(5.0, -10.0),
                point2: Point::new(10.0, 0.0),
                is_stroked: true,
            }],
            is_closed: false,
        });
        assert_eq!(geometry.bounds(), Some(Rect::new(0.0, -10.0, 10.0, 0.0)));
        assert_eq!(geometry.segment_count(), 1);
    }

    #[test]
    fn test_set_stroked_override() {
        let mut seg = Segment::Line {
            point: Point::new(1.0, 1.0),
            is_stroked: true,
        };
        seg.set_stroked(false);
        assert!(!seg.is_stroked());
    }
}
