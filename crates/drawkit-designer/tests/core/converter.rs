use drawkit_core::{FillRule, PathGeometry, Point};
use drawkit_designer::model::{
    ArcShape, ArgbColor, CubicBezierShape, EllipseShape, GroupShape, LineShape, PathShape,
    RectangleShape, Shape, ShapeStyle,
};
use drawkit_designer::{PathConverter, PathOp};
use drawkit_settings::ConversionSettings;

fn styled(name: &str) -> ShapeStyle {
    let mut style = ShapeStyle::new(name);
    style.stroke.color = ArgbColor::new(0xFF, 0x10, 0x20, 0x30);
    style.stroke.thickness = 4.0;
    style
}

fn square(x: f64, y: f64, size: f64, name: &str) -> Shape {
    Shape::Rectangle(RectangleShape::new(
        Point::new(x, y),
        Point::new(x + size, y + size),
        styled(name),
    ))
}

#[test]
fn test_style_is_deep_copied() {
    let converter = PathConverter::default();
    let source = square(0.0, 0.0, 10.0, "Source");
    let mut path = converter
        .to_path_shape(std::slice::from_ref(&source))
        .unwrap();

    assert!(!std::ptr::eq(&path.style, source.style()));
    assert_eq!(&path.style, source.style());

    path.style.stroke.color = ArgbColor::WHITE;
    path.style.stroke.thickness = 1.0;
    path.style.name.push_str(" copy");
    assert_eq!(source.style().stroke.color, ArgbColor::new(0xFF, 0x10, 0x20, 0x30));
    assert_eq!(source.style().stroke.thickness, 4.0);
    assert_eq!(source.style().name, "Source");
}

#[test]
fn test_null_propagation() {
    let converter = PathConverter::default();
    assert!(converter.to_path_shape(&[]).is_none());
    assert!(converter.op(&[], PathOp::Union).is_none());
    let disjoint = [square(0.0, 0.0, 10.0, "A"), square(50.0, 50.0, 10.0, "B")];
    assert!(converter.op(&disjoint, PathOp::Intersect).is_none());
}

#[test]
fn test_op_style_from_first_input() {
    let converter = PathConverter::default();
    let shapes = [square(0.0, 0.0, 10.0, "A"), square(5.0, 5.0, 10.0, "B")];
    let union = converter.op(&shapes, PathOp::Union).unwrap();
    assert_eq!(union.style.name, "A");

    let bounds = union.bounds().unwrap();
    assert!((bounds.left - 0.0).abs() < 1e-6);
    assert!((bounds.right - 15.0).abs() < 1e-6);
    assert!((bounds.bottom - 15.0).abs() < 1e-6);
}

#[test]
fn test_xor_keeps_both_outer_parts() {
    let converter = PathConverter::default();
    let shapes = [square(0.0, 0.0, 10.0, "A"), square(5.0, 0.0, 10.0, "B")];
    let xor = converter.op(&shapes, PathOp::Xor).unwrap();
    assert!(xor.geometry.figures.len() >= 2);
    let bounds = xor.bounds().unwrap();
    assert!((bounds.right - 15.0).abs() < 1e-6);
}

#[test]
fn test_group_merges_children() {
    let converter = PathConverter::default();
    let mut group = GroupShape::new("Layer", styled("Layer"));
    group.add(square(0.0, 0.0, 1.0, "A"));
    group.add(Shape::Line(LineShape::new(
        Point::new(5.0, 5.0),
        Point::new(6.0, 6.0),
        styled("L"),
    )));
    let path = converter.to_path_shape(&[Shape::Group(group)]).unwrap();
    assert_eq!(path.geometry.figures.len(), 2);
    assert!(path.geometry.figures[0].is_closed);
    assert!(!path.geometry.figures[1].is_closed);
}

#[test]
fn test_curves_and_arcs_become_paths() {
    let converter = PathConverter::default();
    let cubic = Shape::CubicBezier(CubicBezierShape::new(
        Point::new(0.0, 0.0),
        Point::new(1.0, 2.0),
        Point::new(3.0, 2.0),
        Point::new(4.0, 0.0),
        styled("C"),
    ));
    let arc = Shape::Arc(ArcShape::new(
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(10.0, 5.0),
        Point::new(5.0, 0.0),
        styled("A"),
    ));
    let ellipse = Shape::Ellipse(EllipseShape::new(
        Point::new(0.0, 0.0),
        Point::new(8.0, 4.0),
        styled("E"),
    ));

    for shape in [cubic, arc, ellipse] {
        let path = converter.to_path_shape(std::slice::from_ref(&shape)).unwrap();
        assert_eq!(path.geometry.figures.len(), 1, "{:?}", shape.shape_type());
        assert_eq!(path.is_stroked, shape.is_stroked());
    }
}

#[test]
fn test_stroke_width_scale_from_settings() {
    let converter = PathConverter::with_settings(ConversionSettings {
        stroke_width_scale: 2.0,
        ..ConversionSettings::default()
    });
    let line = Shape::Line(LineShape::new(
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        styled("L"),
    ));
    // Thickness 4 scaled to 8: four units either side.
    let outline = converter.to_stroke_path_shape(&line).unwrap();
    let bounds = outline.bounds().unwrap();
    assert!((bounds.top + 4.0).abs() < 1e-3);
    assert!((bounds.bottom - 4.0).abs() < 1e-3);
}

#[test]
fn test_degenerate_path_shape_is_none() {
    let converter = PathConverter::default();
    let mut geometry = PathGeometry::new(FillRule::Nonzero);
    geometry.context().begin_figure(Point::new(1.0, 1.0), true);
    let shape = Shape::Path(PathShape::new(geometry, ShapeStyle::default()));
    assert!(converter.to_path_shape(&[shape]).is_none());
}

#[test]
fn test_svg_path_data_round_trip() {
    let converter = PathConverter::default();
    let shape = converter
        .from_svg_path_data("M0,0 L10,10", true, false)
        .unwrap();
    assert_eq!(
        converter.to_svg_path_data(&Shape::Path(shape)).as_deref(),
        Some("M0,0 L10,10")
    );

    for bad in ["", "M", "M0,0 L10", "X10,10", "M0,0 A5,5 0 2 1 10,10"] {
        assert!(
            converter.from_svg_path_data(bad, true, false).is_none(),
            "{:?} should not parse",
            bad
        );
    }
}
