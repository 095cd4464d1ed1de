use drawkit_core::{FillRule, PathGeometry, Point};

use super::{EllipseShape, GroupShape, LineShape, PathShape, RectangleShape, ShapeStyle, TextShape};

/// Creates shapes, styles and path geometries for the conversion engine.
///
/// Every method has a default body building the plain model value, so an
/// implementation only overrides what it needs to observe or decorate.
pub trait ShapeFactory: Send + Sync {
    fn create_shape_style(&self, name: &str) -> ShapeStyle {
        ShapeStyle::new(name)
    }

    fn create_path_geometry(&self, fill_rule: FillRule) -> PathGeometry {
        PathGeometry::new(fill_rule)
    }

    fn create_line(
        &self,
        start: Point,
        end: Point,
        style: ShapeStyle,
        is_stroked: bool,
    ) -> LineShape {
        let mut line = LineShape::new(start, end, style);
        line.is_stroked = is_stroked;
        line
    }

    fn create_rectangle(
        &self,
        top_left: Point,
        bottom_right: Point,
        style: ShapeStyle,
        is_stroked: bool,
        is_filled: bool,
    ) -> RectangleShape {
        let mut rect = RectangleShape::new(top_left, bottom_right, style);
        rect.is_stroked = is_stroked;
        rect.is_filled = is_filled;
        rect
    }

    fn create_ellipse(
        &self,
        top_left: Point,
        bottom_right: Point,
        style: ShapeStyle,
        is_stroked: bool,
        is_filled: bool,
    ) -> EllipseShape {
        let mut ellipse = EllipseShape::new(top_left, bottom_right, style);
        ellipse.is_stroked = is_stroked;
        ellipse.is_filled = is_filled;
        ellipse
    }

    fn create_path(
        &self,
        geometry: PathGeometry,
        style: ShapeStyle,
        is_stroked: bool,
        is_filled: bool,
    ) -> PathShape {
        PathShape::new(geometry, style).with_flags(is_stroked, is_filled)
    }

    fn create_text(
        &self,
        top_left: Point,
        bottom_right: Point,
        text: &str,
        style: ShapeStyle,
        is_stroked: bool,
    ) -> TextShape {
        let mut shape = TextShape::new(top_left, bottom_right, text, style);
        shape.is_stroked = is_stroked;
        shape
    }

    fn create_group(&self, name: &str) -> GroupShape {
        GroupShape::new(name, self.create_shape_style(name))
    }
}

/// Factory producing plain model values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultShapeFactory;

impl ShapeFactory for DefaultShapeFactory {}
