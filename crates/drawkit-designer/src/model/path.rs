use drawkit_core::{PathGeometry, Rect};
use serde::{Deserialize, Serialize};

use super::ShapeStyle;

/// Free-form shape owning a [`PathGeometry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub geometry: PathGeometry,
    pub style: ShapeStyle,
    pub is_stroked: bool,
    pub is_filled: bool,
}

impl PathShape {
    pub fn new(geometry: PathGeometry, style: ShapeStyle) -> Self {
        Self {
            geometry,
            style,
            is_stroked: true,
            is_filled: false,
        }
    }

    pub fn with_flags(mut self, is_stroked: bool, is_filled: bool) -> Self {
        self.is_stroked = is_stroked;
        self.is_filled = is_filled;
        self
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.geometry.bounds()
    }
}
