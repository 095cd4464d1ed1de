use std::f64::consts::{PI, TAU};

use drawkit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::ShapeStyle;

/// Elliptical arc described by four points.
///
/// `point1` and `point2` span the bounding rectangle of the full ellipse.
/// `point3` gives the direction of the start ray from the centre and
/// `point4` the direction of the end ray. The arc runs clockwise (in y-down
/// screen space) from the start ray to the end ray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcShape {
    pub point1: Point,
    pub point2: Point,
    pub point3: Point,
    pub point4: Point,
    pub style: ShapeStyle,
    pub is_stroked: bool,
    pub is_filled: bool,
}

/// Resolved arc parameters in ellipse space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParameters {
    pub rect: Rect,
    /// Parametric start angle in radians.
    pub start_angle: f64,
    /// Clockwise sweep in radians, in `(0, 2π]`.
    pub sweep_angle: f64,
}

impl ArcParameters {
    pub fn radius_x(&self) -> f64 {
        self.rect.width() / 2.0
    }

    pub fn radius_y(&self) -> f64 {
        self.rect.height() / 2.0
    }

    pub fn point_at(&self, angle: f64) -> Point {
        let c = self.rect.center();
        Point::new(
            c.x + self.radius_x() * angle.cos(),
            c.y + self.radius_y() * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep_angle)
    }

    pub fn is_large_arc(&self) -> bool {
        self.sweep_angle > PI
    }
}

impl ArcShape {
    pub fn new(
        point1: Point,
        point2: Point,
        point3: Point,
        point4: Point,
        style: ShapeStyle,
    ) -> Self {
        Self {
            point1,
            point2,
            point3,
            point4,
            style,
            is_stroked: true,
            is_filled: false,
        }
    }

    /// Resolves the four defining points after mapping them through `scale`.
    ///
    /// Returns `None` when the bounding rectangle has no area.
    pub fn parameters(&self, scale: impl Fn(f64) -> f64) -> Option<ArcParameters> {
        let rect = Rect::from_points(self.point1.map(&scale), self.point2.map(&scale));
        if rect.is_empty() {
            return None;
        }
        let c = rect.center();
        let rx = rect.width() / 2.0;
        let ry = rect.height() / 2.0;
        let angle_of = |p: Point| ((p.y - c.y) / ry).atan2((p.x - c.x) / rx);

        let start_angle = angle_of(self.point3.map(&scale));
        let end_angle = angle_of(self.point4.map(&scale));
        let mut sweep_angle = (end_angle - start_angle).rem_euclid(TAU);
        if sweep_angle == 0.0 {
            sweep_angle = TAU;
        }

        Some(ArcParameters {
            rect,
            start_angle,
            sweep_angle,
        })
    }
}
