use crate::error::GeometryError;
use crate::types::{Point, Size};

use super::{PathFigure, PathGeometry, Segment, SweepDirection};

/// Incremental cursor that populates a [`PathGeometry`].
///
/// `begin_figure` opens a new figure and makes it current; every segment
/// method appends to the current figure. Appending with no open figure is a
/// protocol violation reported as [`GeometryError::NoOpenFigure`].
#[derive(Debug)]
pub struct GeometryContext<'a> {
    geometry: &'a mut PathGeometry,
    current: Option<usize>,
}

impl<'a> GeometryContext<'a> {
    pub fn new(geometry: &'a mut PathGeometry) -> Self {
        Self {
            geometry,
            current: None,
        }
    }

    pub fn begin_figure(&mut self, start_point: Point, is_closed: bool) {
        self.geometry
            .figures
            .push(PathFigure::new(start_point, is_closed));
        self.current = Some(self.geometry.figures.len() - 1);
    }

    pub fn line_to(&mut self, point: Point) -> Result<(), GeometryError> {
        self.push(Segment::Line {
            point,
            is_stroked: true,
        })
    }

    pub fn arc_to(
        &mut self,
        point: Point,
        size: Size,
        rotation_angle: f64,
        is_large_arc: bool,
        sweep_direction: SweepDirection,
    ) -> Result<(), GeometryError> {
        self.push(Segment::Arc {
            point,
            size,
            rotation_angle,
            is_large_arc,
            sweep_direction,
            is_stroked: true,
        })
    }

    pub fn quadratic_bezier_to(&mut self, control: Point, end: Point) -> Result<(), GeometryError> {
        self.push(Segment::QuadraticBezier {
            point1: control,
            point2: end,
            is_stroked: true,
        })
    }

    pub fn cubic_bezier_to(
        &mut self,
        control1: Point,
        control2: Point,
        end: Point,
    ) -> Result<(), GeometryError> {
        self.push(Segment::CubicBezier {
            point1: control1,
            point2: control2,
            point3: end,
            is_stroked: true,
        })
    }

    /// Changes the closed flag of the current figure after the fact.
    ///
    /// Closedness is often only known once a close command shows up later in
    /// the stream.
    pub fn set_closed_state(&mut self, is_closed: bool) -> Result<(), GeometryError> {
        let figure = self.current_figure_mut()?;
        figure.is_closed = is_closed;
        Ok(())
    }

    /// Drops the cursor; the figure itself is left as is.
    pub fn end_figure(&mut self) {
        self.current = None;
    }

    pub fn has_open_figure(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_figure(&self) -> Option<&PathFigure> {
        self.current.and_then(|i| self.geometry.figures.get(i))
    }

    fn current_figure_mut(&mut self) -> Result<&mut PathFigure, GeometryError> {
        let index = self.current.ok_or(GeometryError::NoOpenFigure)?;
        let count = self.geometry.figures.len();
        self.geometry
            .figures
            .get_mut(index)
            .ok_or(GeometryError::FigureOutOfRange { index, count })
    }

    fn push(&mut self, segment: Segment) -> Result<(), GeometryError> {
        self.current_figure_mut()?.segments.push(segment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{FillRule, SegmentKind};

    #[test]
    fn test_segment_without_figure_fails() {
        let mut geometry = PathGeometry::new(FillRule::Nonzero);
        let mut ctx = geometry.context();
        assert_eq!(
            ctx.line_to(Point::new(1.0, 1.0)),
            Err(GeometryError::NoOpenFigure)
        );
        assert_eq!(ctx.set_closed_state(true), Err(GeometryError::NoOpenFigure));
        assert!(geometry.is_empty());
    }

    #[test]
    fn test_builds_figures_in_order() {
        let mut geometry = PathGeometry::new(FillRule::EvenOdd);
        {
            let mut ctx = geometry.context();
            ctx.begin_figure(Point::new(0.0, 0.0), false);
            ctx.line_to(Point::new(10.0, 0.0)).unwrap();
            ctx.quadratic_bezier_to(Point::new(15.0, 5.0), Point::new(10.0, 10.0))
                .unwrap();
            ctx.set_closed_state(true).unwrap();

            ctx.begin_figure(Point::new(20.0, 20.0), false);
            ctx.cubic_bezier_to(
                Point::new(21.0, 25.0),
                Point::new(25.0, 25.0),
                Point::new(30.0, 20.0),
            )
            .unwrap();
            ctx.arc_to(
                Point::new(40.0, 20.0),
                Size::new(5.0, 5.0),
                0.0,
                false,
                SweepDirection::Clockwise,
            )
            .unwrap();
        }

        assert_eq!(geometry.figures.len(), 2);
        assert!(geometry.figures[0].is_closed);
        assert!(!geometry.figures[1].is_closed);
        let kinds: Vec<SegmentKind> = geometry.figures[1]
            .segments
            .iter()
            .map(Segment::kind)
            .collect();
        assert_eq!(kinds, vec![SegmentKind::CubicBezier, SegmentKind::Arc]);
    }

    #[test]
    fn test_end_figure_clears_cursor() {
        let mut geometry = PathGeometry::new(FillRule::Nonzero);
        let mut ctx = geometry.context();
        ctx.begin_figure(Point::new(0.0, 0.0), true);
        assert!(ctx.has_open_figure());
        ctx.end_figure();
        assert!(!ctx.has_open_figure());
        assert!(ctx.current_figure().is_none());
        assert_eq!(
            ctx.line_to(Point::new(1.0, 0.0)),
            Err(GeometryError::NoOpenFigure)
        );
    }
}
