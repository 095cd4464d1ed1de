use drawkit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::ShapeStyle;

/// Raster image placeholder referencing an image by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageShape {
    pub top_left: Point,
    pub bottom_right: Point,
    pub key: String,
    pub style: ShapeStyle,
    pub is_stroked: bool,
    pub is_filled: bool,
}

impl ImageShape {
    pub fn new(
        top_left: Point,
        bottom_right: Point,
        key: impl Into<String>,
        style: ShapeStyle,
    ) -> Self {
        Self {
            top_left,
            bottom_right,
            key: key.into(),
            style,
            is_stroked: false,
            is_filled: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_points(self.top_left, self.bottom_right)
    }
}
