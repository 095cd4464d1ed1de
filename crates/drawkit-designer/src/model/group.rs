use drawkit_core::Rect;
use serde::{Deserialize, Serialize};

use super::{Shape, ShapeStyle};

/// Ordered collection of shapes; order is z-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupShape {
    pub name: String,
    pub shapes: Vec<Shape>,
    pub style: ShapeStyle,
    pub is_stroked: bool,
    pub is_filled: bool,
}

impl GroupShape {
    pub fn new(name: impl Into<String>, style: ShapeStyle) -> Self {
        Self {
            name: name.into(),
            shapes: Vec::new(),
            style,
            is_stroked: false,
            is_filled: false,
        }
    }

    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Total number of shapes including nested group members.
    pub fn deep_len(&self) -> usize {
        self.shapes
            .iter()
            .map(|s| match s {
                Shape::Group(g) => 1 + g.deep_len(),
                _ => 1,
            })
            .sum()
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .filter_map(Shape::bounds)
            .reduce(|a, b| a.union(&b))
    }
}
