use drawkit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::ShapeStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub start: Point,
    pub end: Point,
    pub style: ShapeStyle,
    pub is_stroked: bool,
    pub is_filled: bool,
}

impl LineShape {
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self {
            start,
            end,
            style,
            is_stroked: true,
            is_filled: false,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}
