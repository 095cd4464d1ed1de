//! Native path representation and the bridge to the geometry kernel.
//!
//! A [`NativePath`] is the flat command list exchanged with the geometry
//! kernel and recorded in pictures. The [`bridge`] module converts between
//! it and the shape model; [`kernel`] defines the operations a kernel
//! provides and [`csg_kernel`] is the default implementation.

pub mod bridge;
pub mod csg_kernel;
pub mod kernel;
pub mod svg_path;

pub use bridge::{to_geometry, to_native_path, to_native_path_unscaled};
pub use csg_kernel::CsgKernel;
pub use kernel::{GeometryKernel, PathOp, StrokeJoin, StrokeParams};

use drawkit_core::{FillRule, Point, Rect, SweepDirection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathFillType {
    #[default]
    Winding,
    EvenOdd,
}

impl From<FillRule> for PathFillType {
    fn from(rule: FillRule) -> Self {
        match rule {
            FillRule::Nonzero => PathFillType::Winding,
            FillRule::EvenOdd => PathFillType::EvenOdd,
        }
    }
}

impl From<PathFillType> for FillRule {
    fn from(fill_type: PathFillType) -> Self {
        match fill_type {
            PathFillType::Winding => FillRule::Nonzero,
            PathFillType::EvenOdd => FillRule::EvenOdd,
        }
    }
}

/// One native path command.
///
/// The `Add*` variants are shorthand for a whole closed (or, for polylines,
/// optionally open) figure. [`NativePath::expanded`] lowers them to the basic
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    ArcTo {
        point: Point,
        radius_x: f64,
        radius_y: f64,
        /// Rotation of the ellipse x axis in degrees.
        x_axis_rotation: f64,
        is_large_arc: bool,
        sweep: SweepDirection,
    },
    QuadTo {
        control: Point,
        end: Point,
    },
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    Close,
    AddRect(Rect),
    AddRoundRect {
        rect: Rect,
        radius_x: f64,
        radius_y: f64,
    },
    AddOval(Rect),
    AddCircle {
        center: Point,
        radius: f64,
    },
    AddPoly {
        points: Vec<Point>,
        close: bool,
    },
}

impl PathCommand {
    pub fn is_shorthand(&self) -> bool {
        matches!(
            self,
            PathCommand::AddRect(_)
                | PathCommand::AddRoundRect { .. }
                | PathCommand::AddOval(_)
                | PathCommand::AddCircle { .. }
                | PathCommand::AddPoly { .. }
        )
    }

    /// Appends the basic-command form of this command to `out`.
    fn expand_into(&self, out: &mut Vec<PathCommand>) {
        match self {
            PathCommand::AddRect(rect) => push_rect(out, rect),
            PathCommand::AddRoundRect {
                rect,
                radius_x,
                radius_y,
            } => {
                let rx = radius_x.abs().min(rect.width().abs() / 2.0);
                let ry = radius_y.abs().min(rect.height().abs() / 2.0);
                if rx > 0.0 && ry > 0.0 {
                    push_round_rect(out, rect, rx, ry);
                } else {
                    push_rect(out, rect);
                }
            }
            PathCommand::AddOval(rect) => push_oval(
                out,
                rect.center(),
                rect.width() / 2.0,
                rect.height() / 2.0,
            ),
            PathCommand::AddCircle { center, radius } => push_oval(out, *center, *radius, *radius),
            PathCommand::AddPoly { points, close } => {
                let mut iter = points.iter();
                if let Some(first) = iter.next() {
                    out.push(PathCommand::MoveTo(*first));
                    out.extend(iter.map(|p| PathCommand::LineTo(*p)));
                    if *close {
                        out.push(PathCommand::Close);
                    }
                }
            }
            other => out.push(other.clone()),
        }
    }

    fn points(&self) -> Vec<Point> {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![*p],
            PathCommand::ArcTo { point, .. } => vec![*point],
            PathCommand::QuadTo { control, end } => vec![*control, *end],
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => vec![*control1, *control2, *end],
            PathCommand::Close => Vec::new(),
            PathCommand::AddRect(rect)
            | PathCommand::AddOval(rect)
            | PathCommand::AddRoundRect { rect, .. } => {
                vec![rect.top_left(), rect.bottom_right()]
            }
            PathCommand::AddCircle { center, radius } => vec![
                Point::new(center.x - radius, center.y - radius),
                Point::new(center.x + radius, center.y + radius),
            ],
            PathCommand::AddPoly { points, .. } => points.clone(),
        }
    }
}

fn push_rect(out: &mut Vec<PathCommand>, rect: &Rect) {
    out.push(PathCommand::MoveTo(Point::new(rect.left, rect.top)));
    out.push(PathCommand::LineTo(Point::new(rect.right, rect.top)));
    out.push(PathCommand::LineTo(Point::new(rect.right, rect.bottom)));
    out.push(PathCommand::LineTo(Point::new(rect.left, rect.bottom)));
    out.push(PathCommand::Close);
}

fn quarter_arc(point: Point, rx: f64, ry: f64) -> PathCommand {
    PathCommand::ArcTo {
        point,
        radius_x: rx,
        radius_y: ry,
        x_axis_rotation: 0.0,
        is_large_arc: false,
        sweep: SweepDirection::Clockwise,
    }
}

fn push_oval(out: &mut Vec<PathCommand>, c: Point, rx: f64, ry: f64) {
    out.push(PathCommand::MoveTo(Point::new(c.x + rx, c.y)));
    out.push(quarter_arc(Point::new(c.x, c.y + ry), rx, ry));
    out.push(quarter_arc(Point::new(c.x - rx, c.y), rx, ry));
    out.push(quarter_arc(Point::new(c.x, c.y - ry), rx, ry));
    out.push(quarter_arc(Point::new(c.x + rx, c.y), rx, ry));
    out.push(PathCommand::Close);
}

fn push_round_rect(out: &mut Vec<PathCommand>, r: &Rect, rx: f64, ry: f64) {
    out.push(PathCommand::MoveTo(Point::new(r.left + rx, r.top)));
    out.push(PathCommand::LineTo(Point::new(r.right - rx, r.top)));
    out.push(quarter_arc(Point::new(r.right, r.top + ry), rx, ry));
    out.push(PathCommand::LineTo(Point::new(r.right, r.bottom - ry)));
    out.push(quarter_arc(Point::new(r.right - rx, r.bottom), rx, ry));
    out.push(PathCommand::LineTo(Point::new(r.left + rx, r.bottom)));
    out.push(quarter_arc(Point::new(r.left, r.bottom - ry), rx, ry));
    out.push(PathCommand::LineTo(Point::new(r.left, r.top + ry)));
    out.push(quarter_arc(Point::new(r.left + rx, r.top), rx, ry));
    out.push(PathCommand::Close);
}

/// Flat list of path commands plus a fill type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NativePath {
    pub fill_type: PathFillType,
    pub commands: Vec<PathCommand>,
}

impl NativePath {
    pub fn new(fill_type: PathFillType) -> Self {
        Self {
            fill_type,
            commands: Vec::new(),
        }
    }

    pub fn from_commands(fill_type: PathFillType, commands: Vec<PathCommand>) -> Self {
        Self {
            fill_type,
            commands,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn push(&mut self, command: PathCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.push(PathCommand::MoveTo(p))
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.push(PathCommand::LineTo(p))
    }

    pub fn quad_to(&mut self, control: Point, end: Point) -> &mut Self {
        self.push(PathCommand::QuadTo { control, end })
    }

    pub fn cubic_to(&mut self, control1: Point, control2: Point, end: Point) -> &mut Self {
        self.push(PathCommand::CubicTo {
            control1,
            control2,
            end,
        })
    }

    pub fn close(&mut self) -> &mut Self {
        self.push(PathCommand::Close)
    }

    /// Appends all commands of `other`, keeping this path's fill type.
    pub fn extend_from(&mut self, other: &NativePath) {
        self.commands.extend(other.commands.iter().cloned());
    }

    /// Same path with every shorthand command lowered to basic commands.
    pub fn expanded(&self) -> NativePath {
        let mut commands = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            command.expand_into(&mut commands);
        }
        NativePath {
            fill_type: self.fill_type,
            commands,
        }
    }

    /// Bounds of all command points, including control points.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.commands.iter().flat_map(PathCommand::points))
    }

    /// Maps the path through `matrix`.
    ///
    /// Shorthand commands are expanded first. Arc radii are scaled by the
    /// matrix's axis scale factors and the rotation is added to the arc's
    /// x axis rotation, which is exact for similarity transforms.
    pub fn transform(&self, matrix: &Matrix) -> NativePath {
        if matrix.is_identity() {
            return self.clone();
        }
        let (sx, sy) = matrix.axis_scales();
        let rotation = matrix.rotation_degrees();
        let flips = matrix.determinant() < 0.0;
        let commands = self
            .expanded()
            .commands
            .into_iter()
            .map(|command| match command {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(matrix.map_point(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(matrix.map_point(p)),
                PathCommand::ArcTo {
                    point,
                    radius_x,
                    radius_y,
                    x_axis_rotation,
                    is_large_arc,
                    sweep,
                } => PathCommand::ArcTo {
                    point: matrix.map_point(point),
                    radius_x: radius_x * sx,
                    radius_y: radius_y * sy,
                    x_axis_rotation: x_axis_rotation + rotation,
                    is_large_arc,
                    sweep: match (flips, sweep) {
                        (false, s) => s,
                        (true, SweepDirection::Clockwise) => SweepDirection::Counterclockwise,
                        (true, SweepDirection::Counterclockwise) => SweepDirection::Clockwise,
                    },
                },
                PathCommand::QuadTo { control, end } => PathCommand::QuadTo {
                    control: matrix.map_point(control),
                    end: matrix.map_point(end),
                },
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => PathCommand::CubicTo {
                    control1: matrix.map_point(control1),
                    control2: matrix.map_point(control2),
                    end: matrix.map_point(end),
                },
                other => other,
            })
            .collect();
        NativePath {
            fill_type: self.fill_type,
            commands,
        }
    }
}

/// 2D affine matrix `[scale_x skew_x trans_x; skew_y scale_y trans_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub scale_x: f64,
    pub skew_x: f64,
    pub trans_x: f64,
    pub skew_y: f64,
    pub scale_y: f64,
    pub trans_y: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        scale_x: 1.0,
        skew_x: 0.0,
        trans_x: 0.0,
        skew_y: 0.0,
        scale_y: 1.0,
        trans_y: 0.0,
    };

    /// Builds from SVG `matrix(a b c d e f)` order.
    pub fn from_svg(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            scale_x: a,
            skew_y: b,
            skew_x: c,
            scale_y: d,
            trans_x: e,
            trans_y: f,
        }
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self::from_svg(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::from_svg(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn rotate_degrees(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::from_svg(cos, sin, -sin, cos, 0.0, 0.0)
    }

    pub fn skew_x_degrees(degrees: f64) -> Self {
        Self::from_svg(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y_degrees(degrees: f64) -> Self {
        Self::from_svg(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `self * other`: `other` is applied first.
    pub fn concat(&self, other: &Matrix) -> Matrix {
        Matrix {
            scale_x: self.scale_x * other.scale_x + self.skew_x * other.skew_y,
            skew_x: self.scale_x * other.skew_x + self.skew_x * other.scale_y,
            trans_x: self.scale_x * other.trans_x + self.skew_x * other.trans_y + self.trans_x,
            skew_y: self.skew_y * other.scale_x + self.scale_y * other.skew_y,
            scale_y: self.skew_y * other.skew_x + self.scale_y * other.scale_y,
            trans_y: self.skew_y * other.trans_x + self.scale_y * other.trans_y + self.trans_y,
        }
    }

    pub fn map_point(&self, p: Point) -> Point {
        Point::new(
            self.scale_x * p.x + self.skew_x * p.y + self.trans_x,
            self.skew_y * p.x + self.scale_y * p.y + self.trans_y,
        )
    }

    /// Bounding box of the mapped corners of `rect`.
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            Point::new(rect.left, rect.top),
            Point::new(rect.right, rect.top),
            Point::new(rect.right, rect.bottom),
            Point::new(rect.left, rect.bottom),
        ];
        Rect::bounding(corners.iter().map(|p| self.map_point(*p))).unwrap_or(*rect)
    }

    pub fn determinant(&self) -> f64 {
        self.scale_x * self.scale_y - self.skew_x * self.skew_y
    }

    fn axis_scales(&self) -> (f64, f64) {
        (
            self.scale_x.hypot(self.skew_y),
            self.skew_x.hypot(self.scale_y),
        )
    }

    fn rotation_degrees(&self) -> f64 {
        self.skew_y.atan2(self.scale_x).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_expands_to_closed_quad() {
        let path = NativePath::from_commands(
            PathFillType::Winding,
            vec![PathCommand::AddRect(Rect::new(0.0, 0.0, 10.0, 5.0))],
        );
        let expanded = path.expanded();
        assert_eq!(
            expanded.commands,
            vec![
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(10.0, 0.0)),
                PathCommand::LineTo(Point::new(10.0, 5.0)),
                PathCommand::LineTo(Point::new(0.0, 5.0)),
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn test_circle_expands_to_four_arcs() {
        let path = NativePath::from_commands(
            PathFillType::Winding,
            vec![PathCommand::AddCircle {
                center: Point::new(5.0, 5.0),
                radius: 2.0,
            }],
        );
        let expanded = path.expanded();
        assert_eq!(expanded.len(), 6);
        assert_eq!(
            expanded.commands[0],
            PathCommand::MoveTo(Point::new(7.0, 5.0))
        );
        let arcs = expanded
            .commands
            .iter()
            .filter(|c| matches!(c, PathCommand::ArcTo { .. }))
            .count();
        assert_eq!(arcs, 4);
        assert_eq!(expanded.commands[5], PathCommand::Close);
    }

    #[test]
    fn test_round_rect_without_radius_is_plain_rect() {
        let rect = Rect::new(0.0, 0.0, 4.0, 4.0);
        let round = NativePath::from_commands(
            PathFillType::Winding,
            vec![PathCommand::AddRoundRect {
                rect,
                radius_x: 0.0,
                radius_y: 1.0,
            }],
        );
        let plain =
            NativePath::from_commands(PathFillType::Winding, vec![PathCommand::AddRect(rect)]);
        assert_eq!(round.expanded(), plain.expanded());
    }

    #[test]
    fn test_open_poly_has_no_close() {
        let path = NativePath::from_commands(
            PathFillType::EvenOdd,
            vec![PathCommand::AddPoly {
                points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)],
                close: false,
            }],
        );
        let expanded = path.expanded();
        assert_eq!(expanded.len(), 3);
        assert!(!expanded.commands.contains(&PathCommand::Close));
        assert_eq!(expanded.fill_type, PathFillType::EvenOdd);
    }

    #[test]
    fn test_matrix_concat_applies_right_first() {
        let m = Matrix::translate(10.0, 0.0).concat(&Matrix::scale(2.0, 2.0));
        assert_eq!(m.map_point(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
    }

    #[test]
    fn test_transform_scales_arcs() {
        let mut path = NativePath::new(PathFillType::Winding);
        path.push(PathCommand::AddCircle {
            center: Point::new(0.0, 0.0),
            radius: 1.0,
        });
        let scaled = path.transform(&Matrix::scale(3.0, 3.0));
        assert_eq!(scaled.bounds(), Some(Rect::new(-3.0, -3.0, 3.0, 3.0)));
        match &scaled.commands[1] {
            PathCommand::ArcTo {
                radius_x, radius_y, ..
            } => {
                assert!((radius_x - 3.0).abs() < 1e-12);
                assert!((radius_y - 3.0).abs() < 1e-12);
            }
            other => panic!("expected arc, got {:?}", other),
        }
    }
}
