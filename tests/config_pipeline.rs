use std::io::Write;
use std::sync::Arc;

use drawkit::designer::DefaultShapeFactory;
use drawkit::{Config, PathConverter, PathOp, PictureImporter, Shape};

#[test]
fn test_toml_config_drives_conversion_and_import() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[conversion]
default_style_name = "FromConfig"

[import]
default_font_size = 30.0
"#
    )
    .unwrap();

    let config = Config::load_from_file(file.path()).unwrap();
    config.validate().unwrap();
    // Unset keys keep their defaults.
    assert_eq!(config.conversion.flatten_tolerance, 0.1);

    let converter = PathConverter::with_settings(config.conversion.clone());
    let a = converter
        .from_svg_path_data("M0,0 L10,0 L10,10 L0,10 Z", true, true)
        .unwrap();
    assert_eq!(a.style.name, "FromConfig");
    let b = converter
        .from_svg_path_data("M5,5 L15,5 L15,15 L5,15 Z", true, true)
        .unwrap();
    let diff = converter
        .op(&[Shape::Path(a), Shape::Path(b)], PathOp::Difference)
        .unwrap();
    let bounds = diff.bounds().unwrap();
    assert!((bounds.right - 10.0).abs() < 1e-6);

    let importer =
        PictureImporter::with_settings(Arc::new(DefaultShapeFactory), config.import.clone());
    let conversion = importer.convert_text(r#"<svg><text x="1" y="2">t</text></svg>"#);
    let group = conversion.group.unwrap();
    assert_eq!(group.shapes[0].style().text.font_size, 30.0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"conversion": {{"flatten_tolerance": -1.0}}}}"#).unwrap();

    assert!(Config::load_from_file(file.path()).is_err());
}
