//! Application shape model.
//!
//! [`Shape`] is the closed set of shapes the converter consumes and the
//! importer produces. Every variant owns its own [`ShapeStyle`].

use drawkit_core::Rect;
use serde::{Deserialize, Serialize};

mod arc;
mod bezier;
mod ellipse;
mod factory;
mod group;
mod image;
mod line;
mod path;
mod rectangle;
mod style;
mod text;

pub use arc::{ArcParameters, ArcShape};
pub use bezier::{CubicBezierShape, QuadraticBezierShape};
pub use ellipse::EllipseShape;
pub use factory::{DefaultShapeFactory, ShapeFactory};
pub use group::GroupShape;
pub use image::ImageShape;
pub use line::LineShape;
pub use path::PathShape;
pub use rectangle::RectangleShape;
pub use style::{
    ArgbColor, FillStyle, LineCap, ShapeStyle, StrokeStyle, TextHAlignment, TextStyle,
};
pub use text::TextShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeType {
    Line,
    Rectangle,
    Ellipse,
    Arc,
    CubicBezier,
    QuadraticBezier,
    Path,
    Group,
    Text,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(LineShape),
    Rectangle(RectangleShape),
    Ellipse(EllipseShape),
    Arc(ArcShape),
    CubicBezier(CubicBezierShape),
    QuadraticBezier(QuadraticBezierShape),
    Path(PathShape),
    Group(GroupShape),
    Text(TextShape),
    Image(ImageShape),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Line(_) => ShapeType::Line,
            Shape::Rectangle(_) => ShapeType::Rectangle,
            Shape::Ellipse(_) => ShapeType::Ellipse,
            Shape::Arc(_) => ShapeType::Arc,
            Shape::CubicBezier(_) => ShapeType::CubicBezier,
            Shape::QuadraticBezier(_) => ShapeType::QuadraticBezier,
            Shape::Path(_) => ShapeType::Path,
            Shape::Group(_) => ShapeType::Group,
            Shape::Text(_) => ShapeType::Text,
            Shape::Image(_) => ShapeType::Image,
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Line(s) => &s.style,
            Shape::Rectangle(s) => &s.style,
            Shape::Ellipse(s) => &s.style,
            Shape::Arc(s) => &s.style,
            Shape::CubicBezier(s) => &s.style,
            Shape::QuadraticBezier(s) => &s.style,
            Shape::Path(s) => &s.style,
            Shape::Group(s) => &s.style,
            Shape::Text(s) => &s.style,
            Shape::Image(s) => &s.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Line(s) => &mut s.style,
            Shape::Rectangle(s) => &mut s.style,
            Shape::Ellipse(s) => &mut s.style,
            Shape::Arc(s) => &mut s.style,
            Shape::CubicBezier(s) => &mut s.style,
            Shape::QuadraticBezier(s) => &mut s.style,
            Shape::Path(s) => &mut s.style,
            Shape::Group(s) => &mut s.style,
            Shape::Text(s) => &mut s.style,
            Shape::Image(s) => &mut s.style,
        }
    }

    pub fn is_stroked(&self) -> bool {
        match self {
            Shape::Line(s) => s.is_stroked,
            Shape::Rectangle(s) => s.is_stroked,
            Shape::Ellipse(s) => s.is_stroked,
            Shape::Arc(s) => s.is_stroked,
            Shape::CubicBezier(s) => s.is_stroked,
            Shape::QuadraticBezier(s) => s.is_stroked,
            Shape::Path(s) => s.is_stroked,
            Shape::Group(s) => s.is_stroked,
            Shape::Text(s) => s.is_stroked,
            Shape::Image(s) => s.is_stroked,
        }
    }

    pub fn is_filled(&self) -> bool {
        match self {
            Shape::Line(s) => s.is_filled,
            Shape::Rectangle(s) => s.is_filled,
            Shape::Ellipse(s) => s.is_filled,
            Shape::Arc(s) => s.is_filled,
            Shape::CubicBezier(s) => s.is_filled,
            Shape::QuadraticBezier(s) => s.is_filled,
            Shape::Path(s) => s.is_filled,
            Shape::Group(s) => s.is_filled,
            Shape::Text(s) => s.is_filled,
            Shape::Image(s) => s.is_filled,
        }
    }

    /// Bounds of the defining points; `None` for an empty group or path.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Shape::Line(s) => Some(s.bounds()),
            Shape::Rectangle(s) => Some(s.rect()),
            Shape::Ellipse(s) => Some(s.rect()),
            Shape::Arc(s) => Some(Rect::from_points(s.point1, s.point2)),
            Shape::CubicBezier(s) => s.bounds(),
            Shape::QuadraticBezier(s) => s.bounds(),
            Shape::Path(s) => s.bounds(),
            Shape::Group(s) => s.bounds(),
            Shape::Text(s) => Some(s.rect()),
            Shape::Image(s) => Some(s.rect()),
        }
    }
}

impl From<PathShape> for Shape {
    fn from(shape: PathShape) -> Self {
        Shape::Path(shape)
    }
}

impl From<GroupShape> for Shape {
    fn from(shape: GroupShape) -> Self {
        Shape::Group(shape)
    }
}
