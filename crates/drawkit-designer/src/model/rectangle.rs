use drawkit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::ShapeStyle;

/// Axis-aligned rectangle spanned by two corner points.
///
/// The corners are kept as given; [`RectangleShape::rect`] normalises them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleShape {
    pub top_left: Point,
    pub bottom_right: Point,
    pub style: ShapeStyle,
    pub is_stroked: bool,
    pub is_filled: bool,
}

impl RectangleShape {
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
}
