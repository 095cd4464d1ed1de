//! Conversion between the shape model and native paths.

use drawkit_core::{GeometryContext, PathGeometry, Point, Segment, Size, SweepDirection};
use tracing::debug;

use super::{NativePath, PathCommand, PathFillType};
use crate::model::{Shape, ShapeFactory};

/// Serialises the outlines of `shapes` into one native path.
///
/// `scale` is applied to every coordinate and radius. The fill type comes
/// from the first path shape encountered (winding otherwise). Returns `None`
/// when no shape contributed geometry, e.g. only text and images.
///
/// Native commands carry no per-segment stroke flag, so a segment's
/// `is_stroked = false` does not survive; [`to_geometry`] rebuilds every
/// segment as stroked.
pub fn to_native_path(shapes: &[Shape], scale: impl Fn(f64) -> f64) -> Option<NativePath> {
    let mut path = NativePath::new(PathFillType::Winding);
    let mut fill_type = None;
    for shape in shapes {
        append_shape(&mut path, &mut fill_type, shape, &scale);
    }

    if path.is_empty() {
        return None;
    }
    path.fill_type = fill_type.unwrap_or_default();
    Some(path)
}

/// [`to_native_path`] with coordinates taken as they are.
pub fn to_native_path_unscaled(shapes: &[Shape]) -> Option<NativePath> {
    to_native_path(shapes, |v| v)
}

fn append_shape(
    path: &mut NativePath,
    fill_type: &mut Option<PathFillType>,
    shape: &Shape,
    scale: &dyn Fn(f64) -> f64,
) {
    let sp = |p: Point| p.map(scale);
    match shape {
        Shape::Line(line) => {
            path.move_to(sp(line.start)).line_to(sp(line.end));
        }
        Shape::Rectangle(rect) => {
            let r = rect.rect();
            path.push(PathCommand::AddRect(drawkit_core::Rect::from_points(
                sp(r.top_left()),
                sp(r.bottom_right()),
            )));
        }
        Shape::Ellipse(ellipse) => {
            let r = ellipse.rect();
            path.push(PathCommand::AddOval(drawkit_core::Rect::from_points(
                sp(r.top_left()),
                sp(r.bottom_right()),
            )));
        }
        Shape::Arc(arc) => match arc.parameters(scale) {
            Some(params) => {
                path.move_to(params.start_point());
                path.push(PathCommand::ArcTo {
                    point: params.end_point(),
                    radius_x: params.radius_x(),
                    radius_y: params.radius_y(),
                    x_axis_rotation: 0.0,
                    is_large_arc: params.is_large_arc(),
                    sweep: SweepDirection::Clockwise,
                });
            }
            None => debug!("Skipping arc with an empty bounding rectangle"),
        },
        Shape::CubicBezier(cubic) => {
            path.move_to(sp(cubic.point1)).cubic_to(
                sp(cubic.point2),
                sp(cubic.point3),
                sp(cubic.point4),
            );
        }
        Shape::QuadraticBezier(quad) => {
            path.move_to(sp(quad.point1))
                .quad_to(sp(quad.point2), sp(quad.point3));
        }
        Shape::Path(shape) => {
            fill_type.get_or_insert(shape.geometry.fill_rule.into());
            append_geometry(path, &shape.geometry, scale);
        }
        Shape::Group(group) => {
            for child in &group.shapes {
                append_shape(path, fill_type, child, scale);
            }
        }
        Shape::Text(_) | Shape::Image(_) => {}
    }
}

fn append_geometry(path: &mut NativePath, geometry: &PathGeometry, scale: &dyn Fn(f64) -> f64) {
    let sp = |p: Point| p.map(scale);
    for figure in geometry.figures.iter().filter(|f| !f.is_degenerate()) {
        path.move_to(sp(figure.start_point));
        for segment in &figure.segments {
            match segment {
                Segment::Line { point, .. } => {
                    path.line_to(sp(*point));
                }
                Segment::QuadraticBezier { point1, point2, .. } => {
                    path.quad_to(sp(*point1), sp(*point2));
                }
                Segment::CubicBezier {
                    point1,
                    point2,
                    point3,
                    ..
                } => {
                    path.cubic_to(sp(*point1), sp(*point2), sp(*point3));
                }
                Segment::Arc {
                    point,
                    size,
                    rotation_angle,
                    is_large_arc,
                    sweep_direction,
                    ..
                } => {
                    path.push(PathCommand::ArcTo {
                        point: sp(*point),
                        radius_x: scale(size.width),
                        radius_y: scale(size.height),
                        x_axis_rotation: *rotation_angle,
                        is_large_arc: *is_large_arc,
                        sweep: *sweep_direction,
                    });
                }
            }
        }
        if figure.is_closed {
            path.close();
        }
    }
}

/// Rebuilds a [`PathGeometry`] from a native path.
///
/// The geometry is created through `factory` and populated with a
/// [`GeometryContext`]. Returns `None` for command streams that cannot form a
/// valid geometry:
///
/// - a figure re-opened before it received a segment,
/// - a segment with no open figure,
/// - a close on a figure without segments,
/// - a trailing figure without segments,
/// - a stream that produced no figure at all.
///
/// A `MoveTo` that is the last command, or is followed by another `MoveTo`
/// or a `Close`, ends the conversion with the figures built so far.
///
/// Every rebuilt segment is stroked.
pub fn to_geometry(path: &NativePath, factory: &dyn ShapeFactory) -> Option<PathGeometry> {
    let expanded = path.expanded();
    let mut geometry = factory.create_path_geometry(path.fill_type.into());

    let mut ctx = geometry.context();
    if let Err(reason) = populate(&expanded.commands, &mut ctx) {
        debug!("Native path is not a valid geometry: {}", reason);
        return None;
    }

    if geometry.is_empty() {
        debug!("Native path produced no figures");
        return None;
    }
    Some(geometry)
}

fn populate(commands: &[PathCommand], ctx: &mut GeometryContext<'_>) -> Result<(), String> {
    let mut figure_open = false;
    let mut figure_has_segments = false;

    for (i, command) in commands.iter().enumerate() {
        match command {
            PathCommand::MoveTo(point) => {
                if figure_open && !figure_has_segments {
                    return Err(format!("figure re-opened without segments at command {}", i));
                }
                let next = commands.get(i + 1);
                if matches!(next, None | Some(PathCommand::MoveTo(_) | PathCommand::Close)) {
                    return Ok(());
                }
                if figure_open {
                    ctx.set_closed_state(false).map_err(|e| e.to_string())?;
                }
                ctx.begin_figure(*point, false);
                figure_open = true;
                figure_has_segments = false;
            }
            PathCommand::Close => {
                if !(figure_open && figure_has_segments) {
                    return Err(format!("close without segments at command {}", i));
                }
                ctx.set_closed_state(true).map_err(|e| e.to_string())?;
                ctx.end_figure();
                figure_open = false;
                figure_has_segments = false;
            }
            segment => {
                if !figure_open {
                    return Err(format!("segment without open figure at command {}", i));
                }
                append_segment(ctx, segment).map_err(|e| e.to_string())?;
                figure_has_segments = true;
            }
        }
    }

    if figure_open {
        if !figure_has_segments {
            return Err("trailing figure without segments".to_string());
        }
        ctx.set_closed_state(false).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn append_segment(
    ctx: &mut GeometryContext<'_>,
    command: &PathCommand,
) -> Result<(), drawkit_core::GeometryError> {
    match command {
        PathCommand::LineTo(point) => ctx.line_to(*point),
        PathCommand::QuadTo { control, end } => ctx.quadratic_bezier_to(*control, *end),
        PathCommand::CubicTo {
            control1,
            control2,
            end,
        } => ctx.cubic_bezier_to(*control1, *control2, *end),
        PathCommand::ArcTo {
            point,
            radius_x,
            radius_y,
            x_axis_rotation,
            is_large_arc,
            sweep,
        } => ctx.arc_to(
            *point,
            Size::new(*radius_x, *radius_y),
            *x_axis_rotation,
            *is_large_arc,
            *sweep,
        ),
        // Moves, closes and shorthand never reach here.
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DefaultShapeFactory, LineShape, RectangleShape, ShapeStyle, TextShape,
    };
    use drawkit_core::{FillRule, Rect, SegmentKind};

    fn native(commands: Vec<PathCommand>) -> NativePath {
        NativePath::from_commands(PathFillType::Winding, commands)
    }

    #[test]
    fn test_line_shape_to_native() {
        let line = Shape::Line(LineShape::new(
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            ShapeStyle::default(),
        ));
        let path = to_native_path(&[line], |v| v * 2.0).unwrap();
        assert_eq!(
            path.commands,
            vec![
                PathCommand::MoveTo(Point::new(2.0, 4.0)),
                PathCommand::LineTo(Point::new(6.0, 8.0)),
            ]
        );
    }

    #[test]
    fn test_unstroked_segment_comes_back_stroked() {
        let mut geometry = PathGeometry::new(FillRule::Nonzero);
        {
            let mut context = geometry.context();
            context.begin_figure(Point::new(0.0, 0.0), false);
            context.line_to(Point::new(5.0, 0.0)).unwrap();
            context.line_to(Point::new(5.0, 5.0)).unwrap();
            context.end_figure();
        }
        geometry.figures[0].segments[0].set_stroked(false);
        let shape = Shape::Path(crate::model::PathShape::new(geometry, ShapeStyle::default()));

        let path = to_native_path_unscaled(&[shape]).unwrap();
        let rebuilt = to_geometry(&path, &DefaultShapeFactory).unwrap();
        let segments = &rebuilt.figures[0].segments;
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(Segment::is_stroked));
    }

    #[test]
    fn test_rectangle_is_add_rect() {
        let rect = Shape::Rectangle(RectangleShape::new(
            Point::new(10.0, 10.0),
            Point::new(0.0, 5.0),
            ShapeStyle::default(),
        ));
        let path = to_native_path_unscaled(&[rect]).unwrap();
        assert_eq!(
            path.commands,
            vec![PathCommand::AddRect(Rect::new(0.0, 5.0, 10.0, 10.0))]
        );
    }

    #[test]
    fn test_text_only_has_no_path() {
        let text = Shape::Text(TextShape::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            "hello",
            ShapeStyle::default(),
        ));
        assert!(to_native_path_unscaled(&[text]).is_none());
        assert!(to_native_path_unscaled(&[]).is_none());
    }

    #[test]
    fn test_to_geometry_closed_rect() {
        let path = native(vec![PathCommand::AddRect(Rect::new(0.0, 0.0, 4.0, 4.0))]);
        let geometry = to_geometry(&path, &DefaultShapeFactory).unwrap();
        assert_eq!(geometry.figures.len(), 1);
        assert!(geometry.figures[0].is_closed);
        assert_eq!(geometry.figures[0].segments.len(), 3);
        assert_eq!(geometry.fill_rule, FillRule::Nonzero);
    }

    #[test]
    fn test_move_then_close_is_none() {
        let path = native(vec![
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::Close,
        ]);
        assert!(to_geometry(&path, &DefaultShapeFactory).is_none());
    }

    #[test]
    fn test_trailing_move_keeps_built_figures() {
        let path = native(vec![
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::LineTo(Point::new(5.0, 0.0)),
            PathCommand::MoveTo(Point::new(9.0, 9.0)),
        ]);
        let geometry = to_geometry(&path, &DefaultShapeFactory).unwrap();
        assert_eq!(geometry.figures.len(), 1);
        assert!(!geometry.figures[0].is_closed);
    }

    #[test]
    fn test_double_move_is_none_without_figures() {
        let path = native(vec![
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::MoveTo(Point::new(1.0, 1.0)),
            PathCommand::LineTo(Point::new(2.0, 2.0)),
        ]);
        assert!(to_geometry(&path, &DefaultShapeFactory).is_none());
    }

    #[test]
    fn test_segment_without_move_is_none() {
        let path = native(vec![PathCommand::LineTo(Point::new(1.0, 1.0))]);
        assert!(to_geometry(&path, &DefaultShapeFactory).is_none());
    }

    #[test]
    fn test_close_after_close_is_none() {
        let path = native(vec![
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::LineTo(Point::new(1.0, 0.0)),
            PathCommand::Close,
            PathCommand::Close,
        ]);
        assert!(to_geometry(&path, &DefaultShapeFactory).is_none());
    }

    #[test]
    fn test_second_figure_finishes_first_open() {
        let path = native(vec![
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::LineTo(Point::new(1.0, 0.0)),
            PathCommand::MoveTo(Point::new(5.0, 5.0)),
            PathCommand::QuadTo {
                control: Point::new(6.0, 6.0),
                end: Point::new(7.0, 5.0),
            },
            PathCommand::Close,
        ]);
        let geometry = to_geometry(&path, &DefaultShapeFactory).unwrap();
        assert_eq!(geometry.figures.len(), 2);
        assert!(!geometry.figures[0].is_closed);
        assert!(geometry.figures[1].is_closed);
        assert_eq!(
            geometry.figures[1].segments[0].kind(),
            SegmentKind::QuadraticBezier
        );
    }
}
