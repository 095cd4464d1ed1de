use drawkit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::ShapeStyle;

/// Text laid out inside the rectangle spanned by two corner points.
///
/// Text has no path representation; the converter skips it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub top_left: Point,
    pub bottom_right: Point,
    pub text: String,
    pub style: ShapeStyle,
    pub is_stroked: bool,
    pub is_filled: bool,
}

impl TextShape {
    pub fn new(
        top_left: Point,
        bottom_right: Point,
        text: impl Into<String>,
        style: ShapeStyle,
    ) -> Self {
        Self {
            top_left,
            bottom_right,
            text: text.into(),
            style,
            is_stroked: true,
            is_filled: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_points(self.top_left, self.bottom_right)
    }
}
