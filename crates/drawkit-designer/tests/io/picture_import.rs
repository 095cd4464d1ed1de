use drawkit_core::{Point, Rect};
use drawkit_designer::model::{Shape, ShapeType};
use drawkit_designer::native::{NativePath, PathCommand, PathFillType};
use drawkit_designer::picture::{CanvasCommand, ClipOperation, Color, Paint, PaintStyle, Picture};
use drawkit_designer::PictureImporter;

fn draw_path(commands: Vec<PathCommand>, paint: Paint) -> CanvasCommand {
    CanvasCommand::DrawPath {
        path: NativePath::from_commands(PathFillType::Winding, commands),
        paint,
    }
}

#[test]
fn test_single_rect_command_with_fill() {
    let importer = PictureImporter::default();
    let picture = Picture {
        cull_rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        commands: vec![draw_path(
            vec![PathCommand::AddRect(Rect::new(0.0, 0.0, 10.0, 10.0))],
            Paint::fill(Color::BLACK),
        )],
    };

    let group = importer.import_picture(&picture);
    assert_eq!(group.len(), 1);
    let Shape::Rectangle(rect) = &group.shapes[0] else {
        panic!("expected a rectangle, got {:?}", group.shapes[0]);
    };
    assert!(rect.is_filled);
    assert!(!rect.is_stroked);
    assert_eq!(rect.top_left, Point::new(0.0, 0.0));
    assert_eq!(rect.bottom_right, Point::new(10.0, 10.0));
}

#[test]
fn test_clip_and_matrix_do_not_move_shapes() {
    let importer = PictureImporter::default();
    let picture = Picture {
        cull_rect: Rect::new(0.0, 0.0, 100.0, 100.0),
        commands: vec![
            CanvasCommand::Save,
            CanvasCommand::SetMatrix(drawkit_designer::Matrix::scale(3.0, 3.0)),
            CanvasCommand::ClipRect {
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                operation: ClipOperation::Intersect,
                antialias: false,
            },
            draw_path(
                vec![PathCommand::AddOval(Rect::new(10.0, 10.0, 20.0, 30.0))],
                Paint {
                    style: PaintStyle::Stroke,
                    ..Paint::default()
                },
            ),
            CanvasCommand::Restore,
        ],
    };

    let group = importer.import_picture(&picture);
    assert_eq!(group.len(), 1);
    assert_eq!(group.shapes[0].shape_type(), ShapeType::Ellipse);
    assert_eq!(
        group.shapes[0].bounds(),
        Some(Rect::new(10.0, 10.0, 20.0, 30.0))
    );
}

#[test]
fn test_generic_path_fallback_and_invalid_stream() {
    let importer = PictureImporter::default();
    let picture = Picture {
        cull_rect: Rect::default(),
        commands: vec![
            draw_path(
                vec![
                    PathCommand::MoveTo(Point::new(0.0, 0.0)),
                    PathCommand::CubicTo {
                        control1: Point::new(1.0, 1.0),
                        control2: Point::new(2.0, 1.0),
                        end: Point::new(3.0, 0.0),
                    },
                    PathCommand::Close,
                ],
                Paint::fill(Color::BLACK),
            ),
            draw_path(
                vec![PathCommand::LineTo(Point::new(1.0, 1.0))],
                Paint::fill(Color::BLACK),
            ),
        ],
    };

    let group = importer.import_picture(&picture);
    assert_eq!(group.len(), 1);
    let Shape::Path(path) = &group.shapes[0] else {
        panic!("expected a path");
    };
    assert!(path.geometry.figures[0].is_closed);
    assert!(path.is_filled);
}

#[test]
fn test_imported_group_serializes() {
    let importer = PictureImporter::default();
    let conversion = importer.convert_text(
        r#"<svg width="20" height="20"><circle cx="10" cy="10" r="5" fill="red"/></svg>"#,
    );
    let group = conversion.group.unwrap();
    let json = serde_json::to_string(&group).unwrap();
    assert!(json.contains("Ellipse"));
    let restored: drawkit_designer::GroupShape = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, group);
}
