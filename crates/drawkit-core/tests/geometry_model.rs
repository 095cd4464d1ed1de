use drawkit_core::{FillRule, GeometryError, PathGeometry, Point, Rect, SegmentKind, Size, SweepDirection};

fn sample_geometry() -> PathGeometry {
    let mut geometry = PathGeometry::new(FillRule::EvenOdd);
    let mut ctx = geometry.context();
    ctx.begin_figure(Point::new(0.0, 0.0), false);
    ctx.line_to(Point::new(10.0, 0.0)).unwrap();
    ctx.arc_to(
        Point::new(10.0, 10.0),
        Size::new(5.0, 5.0),
        0.0,
        false,
        SweepDirection::Clockwise,
    )
    .unwrap();
    ctx.set_closed_state(true).unwrap();
    geometry
}

#[test]
fn test_geometry_serializes_fill_rule_and_figures() {
    let geometry = sample_geometry();
    let json = serde_json::to_string(&geometry).unwrap();
    assert!(json.contains("EvenOdd"));

    let restored: PathGeometry = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, geometry);
}

#[test]
fn test_closed_state_set_after_segments() {
    let geometry = sample_geometry();
    assert_eq!(geometry.figures.len(), 1);
    assert!(geometry.figures[0].is_closed);
    assert_eq!(geometry.figures[0].segments[1].kind(), SegmentKind::Arc);
    assert_eq!(geometry.bounds(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn test_error_converts_into_umbrella_error() {
    let err: drawkit_core::Error = GeometryError::NoOpenFigure.into();
    assert!(err.is_geometry_error());
    assert!(!err.is_import_error());
    assert!(err.to_string().contains("No open figure"));
}
