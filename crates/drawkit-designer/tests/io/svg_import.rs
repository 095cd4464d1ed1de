use std::io::Write;

use drawkit_designer::model::{ArgbColor, Shape, ShapeType};
use drawkit_designer::picture::CanvasCommand;
use drawkit_designer::{PictureImporter, SvgPictureReader};

const DRAWING: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100">
  <defs>
    <linearGradient id="fade">
      <stop offset="0" stop-color="#000"/>
      <stop offset="1" stop-color="#fff"/>
    </linearGradient>
  </defs>
  <g stroke="#00ff00" stroke-width="2" fill="none">
    <rect x="10" y="10" width="30" height="20"/>
    <line x1="0" y1="0" x2="50" y2="50"/>
    <polyline points="0,0 10,10 20,0"/>
  </g>
  <ellipse cx="100" cy="50" rx="20" ry="10" fill="url(#fade)"/>
  <path d="M150 10 q 10 10 20 0 t 20 0" fill="none" stroke="black"/>
  <rect x="0" y="0" width="10" height="10" rx="2" fill="blue"/>
  <text x="5" y="95" font-size="14">Label</text>
</svg>
"##;

#[test]
fn test_reader_keeps_document_order() {
    let picture = SvgPictureReader::default().read(DRAWING).unwrap();
    assert_eq!(picture.width(), 200.0);
    assert_eq!(picture.height(), 100.0);

    let names: Vec<&str> = picture.commands.iter().map(CanvasCommand::name).collect();
    assert_eq!(
        names,
        vec![
            "Save", "DrawPath", "DrawPath", "DrawPath", "Restore", "DrawPath", "DrawPath",
            "DrawPath", "DrawText",
        ]
    );
}

#[test]
fn test_convert_text_recovers_shapes() {
    let importer = PictureImporter::default();
    let conversion = importer.convert_text(DRAWING);
    assert_eq!((conversion.width, conversion.height), (200.0, 100.0));

    let group = conversion.group.unwrap();
    let types: Vec<ShapeType> = group.shapes.iter().map(Shape::shape_type).collect();
    // The rounded rectangle is dropped.
    assert_eq!(
        types,
        vec![
            ShapeType::Rectangle,
            ShapeType::Line,
            ShapeType::Path,
            ShapeType::Ellipse,
            ShapeType::Path,
            ShapeType::Text,
        ]
    );

    let rect = &group.shapes[0];
    assert!(rect.is_stroked());
    assert!(!rect.is_filled());
    assert_eq!(rect.style().stroke.color, ArgbColor::new(255, 0, 255, 0));
    assert_eq!(rect.style().stroke.thickness, 2.0);

    // Gradient fill is not reconstructed.
    let ellipse = &group.shapes[3];
    assert!(ellipse.is_filled());
    assert_eq!(ellipse.style().fill.color, ArgbColor::WHITE);

    let Shape::Text(text) = &group.shapes[5] else {
        panic!("expected text");
    };
    assert_eq!(text.text, "Label");
    assert_eq!(text.style.text.font_size, 14.0);
}

#[test]
fn test_convert_file_names_group_after_file() {
    let mut file = tempfile::Builder::new()
        .prefix("logo")
        .suffix(".svg")
        .tempfile()
        .unwrap();
    file.write_all(DRAWING.as_bytes()).unwrap();

    let conversion = PictureImporter::default().convert_file(file.path());
    let group = conversion.group.unwrap();
    assert!(group.name.starts_with("logo"));
    assert_eq!(group.len(), 6);
}

#[test]
fn test_convert_missing_file_is_nan() {
    let dir = tempfile::tempdir().unwrap();
    let conversion = PictureImporter::default().convert_file(&dir.path().join("missing.svg"));
    assert!(conversion.group.is_none());
    assert!(conversion.width.is_nan());
    assert!(conversion.height.is_nan());
}

#[test]
fn test_empty_document_is_empty_group() {
    let conversion = PictureImporter::default().convert_text(r#"<svg viewBox="0 0 64 32"/>"#);
    let group = conversion.group.unwrap();
    assert!(group.is_empty());
    assert_eq!((conversion.width, conversion.height), (64.0, 32.0));
}
