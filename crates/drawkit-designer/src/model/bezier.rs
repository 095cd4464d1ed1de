use drawkit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::ShapeStyle;

/// Cubic bezier from `point1` to `point4` with controls `point2`, `point3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicBezierShape {
    pub point1: Point,
    pub point2: Point,
    pub point3: Point,
    pub point4: Point,
    pub style: ShapeStyle,
    pub is_stroked: bool,
    pub is_filled: bool,
}

impl CubicBezierShape {
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

    /// Control polygon bounds.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding([self.point1, self.point2, self.point3, self.point4])
    }
}

/// Quadratic bezier from `point1` to `point3` with control `point2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezierShape {
    pub point1: Point,
    pub point2: Point,
    pub point3: Point,
    pub style: ShapeStyle,
    pub is_stroked: bool,
    pub is_filled: bool,
}

impl QuadraticBezierShape {
    pub fn new(point1: Point, point2: Point, point3: Point, style: ShapeStyle) -> Self {
        Self {
            point1,
            point2,
            point3,
            style,
            is_stroked: true,
            is_filled: false,
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding([self.point1, self.point2, self.point3])
    }
}
