use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use drawkit_core::{FillRule, PathGeometry, Point, Size, SweepDirection};
use drawkit_designer::model::{DefaultShapeFactory, PathShape, Shape, ShapeFactory, ShapeStyle};
use drawkit_designer::native::{to_geometry, to_native_path_unscaled, NativePath, PathCommand};
use drawkit_designer::picture::{CanvasCommand, Paint, Picture};
use drawkit_designer::PictureImporter;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Line(Point),
    Quad(Point, Point),
    Cubic(Point, Point, Point),
    Arc(Point, Size, bool, bool),
}

#[derive(Debug, Clone)]
struct FigureSpec {
    start: Point,
    steps: Vec<Step>,
    closed: bool,
}

fn point() -> impl Strategy<Value = Point> {
    (-1000.0..1000.0f64, -1000.0..1000.0f64).prop_map(|(x, y)| Point::new(x, y))
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        point().prop_map(Step::Line),
        (point(), point()).prop_map(|(a, b)| Step::Quad(a, b)),
        (point(), point(), point()).prop_map(|(a, b, c)| Step::Cubic(a, b, c)),
        (point(), 0.5..200.0f64, 0.5..200.0f64, any::<bool>(), any::<bool>())
            .prop_map(|(p, w, h, large, cw)| Step::Arc(p, Size::new(w, h), large, cw)),
    ]
}

fn figure() -> impl Strategy<Value = FigureSpec> {
    (point(), prop::collection::vec(step(), 1..6), any::<bool>())
        .prop_map(|(start, steps, closed)| FigureSpec { start, steps, closed })
}

fn build(figures: &[FigureSpec], even_odd: bool) -> PathGeometry {
    let fill_rule = if even_odd {
        FillRule::EvenOdd
    } else {
        FillRule::Nonzero
    };
    let mut geometry = PathGeometry::new(fill_rule);
    let mut ctx = geometry.context();
    for figure in figures {
        ctx.begin_figure(figure.start, false);
        for step in &figure.steps {
            match step {
                Step::Line(p) => ctx.line_to(*p),
                Step::Quad(c, e) => ctx.quadratic_bezier_to(*c, *e),
                Step::Cubic(c1, c2, e) => ctx.cubic_bezier_to(*c1, *c2, *e),
                Step::Arc(p, size, large, cw) => ctx.arc_to(
                    *p,
                    *size,
                    0.0,
                    *large,
                    if *cw {
                        SweepDirection::Clockwise
                    } else {
                        SweepDirection::Counterclockwise
                    },
                ),
            }
            .unwrap();
        }
        ctx.set_closed_state(figure.closed).unwrap();
    }
    geometry
}

proptest! {
    #[test]
    fn geometry_survives_native_round_trip(
        figures in prop::collection::vec(figure(), 1..5),
        even_odd in any::<bool>(),
    ) {
        let original = build(&figures, even_odd);
        let shape = Shape::Path(PathShape::new(original.clone(), ShapeStyle::default()));
        let native = to_native_path_unscaled(&[shape]).unwrap();
        let restored = to_geometry(&native, &DefaultShapeFactory).unwrap();

        prop_assert_eq!(restored.fill_rule, original.fill_rule);
        prop_assert_eq!(restored.figures.len(), original.figures.len());
        for (a, b) in original.figures.iter().zip(&restored.figures) {
            prop_assert_eq!(a.is_closed, b.is_closed);
            prop_assert!(a.start_point.approx_eq(&b.start_point, 1e-9));
            prop_assert_eq!(a.segments.len(), b.segments.len());
            for (sa, sb) in a.segments.iter().zip(&b.segments) {
                prop_assert_eq!(sa.kind(), sb.kind());
                for (pa, pb) in sa.points().iter().zip(sb.points()) {
                    prop_assert!(pa.approx_eq(&pb, 1e-9));
                }
            }
        }
    }
}

/// Factory counting the path geometries it hands out.
#[derive(Default)]
struct CountingFactory {
    geometries: AtomicUsize,
}

impl ShapeFactory for CountingFactory {
    fn create_path_geometry(&self, fill_rule: FillRule) -> PathGeometry {
        self.geometries.fetch_add(1, Ordering::SeqCst);
        PathGeometry::new(fill_rule)
    }
}

fn draw(commands: Vec<PathCommand>) -> Picture {
    Picture {
        cull_rect: Default::default(),
        commands: vec![CanvasCommand::DrawPath {
            path: NativePath::from_commands(Default::default(), commands),
            paint: Paint::stroke(Default::default(), 1.0),
        }],
    }
}

#[test]
fn test_move_line_skips_geometry_creation() {
    let factory = Arc::new(CountingFactory::default());
    let importer = PictureImporter::new(factory.clone());

    let group = importer.import_picture(&draw(vec![
        PathCommand::MoveTo(Point::new(0.0, 0.0)),
        PathCommand::LineTo(Point::new(5.0, 5.0)),
    ]));

    assert_eq!(group.len(), 1);
    match &group.shapes[0] {
        Shape::Line(line) => {
            assert_eq!(line.start, Point::new(0.0, 0.0));
            assert_eq!(line.end, Point::new(5.0, 5.0));
        }
        other => panic!("expected line, got {:?}", other),
    }
    assert_eq!(factory.geometries.load(Ordering::SeqCst), 0);
}

#[test]
fn test_longer_path_uses_geometry() {
    let factory = Arc::new(CountingFactory::default());
    let importer = PictureImporter::new(factory.clone());

    let group = importer.import_picture(&draw(vec![
        PathCommand::MoveTo(Point::new(0.0, 0.0)),
        PathCommand::LineTo(Point::new(5.0, 5.0)),
        PathCommand::LineTo(Point::new(5.0, 0.0)),
    ]));

    assert!(matches!(group.shapes[0], Shape::Path(_)));
    assert_eq!(factory.geometries.load(Ordering::SeqCst), 1);
}

#[test]
fn test_degenerate_moves_yield_no_shape() {
    let importer = PictureImporter::default();
    let group = importer.import_picture(&draw(vec![
        PathCommand::MoveTo(Point::new(0.0, 0.0)),
        PathCommand::MoveTo(Point::new(1.0, 1.0)),
        PathCommand::Close,
    ]));
    assert!(group.is_empty());
}
