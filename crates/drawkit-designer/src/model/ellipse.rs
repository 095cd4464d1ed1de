use drawkit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::ShapeStyle;

/// Ellipse inscribed in the rectangle spanned by two corner points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseShape {
    pub top_left: Point,
    pub bottom_right: Point,
    pub style: ShapeStyle,
    pub is_stroked: bool,
    pub is_filled: bool,
}

impl EllipseShape {
    pub fn new(top_left: Point, bottom_right: Point, style: ShapeStyle) -> Self {
        Self {
            top_left,
            bottom_right,
            style,
            is_stroked: true,
            is_filled: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_points(self.top_left, self.bottom_right)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    pub fn radius_x(&self) -> f64 {
        self.rect().width() / 2.0
    }

    pub fn radius_y(&self) -> f64 {
        self.rect().height() / 2.0
    }
}
