//! Default geometry kernel.
//!
//! Curves are flattened with lyon, filled regions become csgrs sketches for
//! the boolean operations, and stroke outlines come from tiny-skia's stroker.
//! Boolean and simplify results are polygonal and use the even-odd rule so
//! holes survive the round trip.

use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use lyon::geom::{ArcFlags, SvgArc};
use lyon::math::point;
use lyon::path::iterator::*;
use lyon::path::Path;
use tracing::debug;

use drawkit_core::{Point, SweepDirection};
use drawkit_settings::ConversionSettings;

use super::kernel::{GeometryKernel, KernelError, PathOp, StrokeJoin, StrokeParams};
use super::{NativePath, PathCommand, PathFillType};
use crate::model::LineCap;

/// Coordinates closer than this are merged when reading polygons back.
const MERGE_EPSILON: f64 = 1e-5;

/// Basic drawing step with arcs already converted to cubics.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Move(Point),
    Line(Point),
    Quad(Point, Point),
    Cubic(Point, Point, Point),
    Close,
}

#[derive(Debug, Clone)]
pub struct CsgKernel {
    flatten_tolerance: f32,
    resolution_scale: f32,
}

impl Default for CsgKernel {
    fn default() -> Self {
        Self::new(&ConversionSettings::default())
    }
}

impl CsgKernel {
    pub fn new(settings: &ConversionSettings) -> Self {
        Self {
            flatten_tolerance: settings.flatten_tolerance.max(1e-4) as f32,
            resolution_scale: settings.stroke_resolution_scale.max(0.01),
        }
    }

    fn polygons(&self, path: &NativePath) -> Vec<Vec<[f64; 2]>> {
        let lyon_path = to_lyon_path(&lower(path));
        let mut polygons: Vec<Vec<[f64; 2]>> = Vec::new();
        let mut current_poly: Vec<[f64; 2]> = Vec::new();

        for event in lyon_path.iter().flattened(self.flatten_tolerance) {
            match event {
                lyon::path::Event::Begin { at } => {
                    current_poly.clear();
                    current_poly.push([at.x as f64, at.y as f64]);
                }
                lyon::path::Event::Line { to, .. } => {
                    current_poly.push([to.x as f64, to.y as f64]);
                }
                lyon::path::Event::End { .. } => {
                    if current_poly.len() >= 3 {
                        polygons.push(std::mem::take(&mut current_poly));
                    }
                    current_poly.clear();
                }
                _ => {}
            }
        }

        polygons
    }

    /// Filled region of `path` as a sketch.
    ///
    /// Even-odd paths fold their figures with xor. Nonzero paths go through
    /// [`nonzero_sketch`].
    fn to_sketch(&self, path: &NativePath) -> Result<Sketch<()>, KernelError> {
        let polygons = self.polygons(path);
        if polygons.is_empty() {
            return Err(KernelError::NoArea);
        }

        match path.fill_type {
            PathFillType::EvenOdd => Ok(polygons
                .iter()
                .fold(Sketch::<()>::new(), |acc, poly| {
                    xor(&acc, &Sketch::polygon(poly, None))
                })),
            PathFillType::Winding => Ok(nonzero_sketch(&polygons)),
        }
    }

    fn try_op(&self, paths: &[NativePath], op: PathOp) -> Result<NativePath, KernelError> {
        let (first, rest) = paths.split_first().ok_or(KernelError::NoInput)?;
        // A path without area still takes part: it is the empty set.
        let sketch_of = |p: &NativePath| self.to_sketch(p).unwrap_or_else(|_| Sketch::new());

        let mut acc = sketch_of(first);
        for path in rest {
            let s = sketch_of(path);
            acc = match op {
                PathOp::Union => acc.union(&s),
                PathOp::Intersect => acc.intersection(&s),
                PathOp::Difference => acc.difference(&s),
                PathOp::Xor => xor(&acc, &s),
                PathOp::ReverseDifference => s.difference(&acc),
            };
        }
        from_sketch(&acc)
    }

    fn try_stroke(
        &self,
        path: &NativePath,
        stroke: &StrokeParams,
    ) -> Result<NativePath, KernelError> {
        if !(stroke.width > 0.0) || !stroke.width.is_finite() {
            return Err(KernelError::InvalidStrokeWidth(stroke.width));
        }

        let source = to_skia_path(&lower(path)).ok_or(KernelError::EmptyPath)?;
        let source = match &stroke.dashes {
            Some(intervals) if !intervals.is_empty() => {
                let mut array: Vec<f32> = intervals.iter().map(|v| *v as f32).collect();
                // An odd pattern repeats to become even.
                if array.len() % 2 == 1 {
                    array.extend_from_within(..);
                }
                let dash = tiny_skia::StrokeDash::new(array, stroke.dash_offset as f32)
                    .ok_or_else(|| KernelError::InvalidDash(intervals.clone()))?;
                source
                    .dash(&dash, self.resolution_scale)
                    .ok_or(KernelError::EmptyPath)?
            }
            _ => source,
        };

        let skia_stroke = tiny_skia::Stroke {
            width: stroke.width as f32,
            miter_limit: stroke.miter_limit as f32,
            line_cap: match stroke.cap {
                LineCap::Flat => tiny_skia::LineCap::Butt,
                LineCap::Square => tiny_skia::LineCap::Square,
                LineCap::Round => tiny_skia::LineCap::Round,
            },
            line_join: match stroke.join {
                StrokeJoin::Miter => tiny_skia::LineJoin::Miter,
                StrokeJoin::Round => tiny_skia::LineJoin::Round,
                StrokeJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            dash: None,
        };

        let outline = source
            .stroke(&skia_stroke, self.resolution_scale)
            .ok_or(KernelError::EmptyPath)?;
        from_skia_path(&outline).ok_or(KernelError::EmptyPath)
    }
}

impl GeometryKernel for CsgKernel {
    fn op(&self, paths: &[NativePath], op: PathOp) -> Option<NativePath> {
        self.try_op(paths, op)
            .map_err(|e| debug!("Path op {:?} produced nothing: {}", op, e))
            .ok()
    }

    fn stroke_to_fill(&self, path: &NativePath, stroke: &StrokeParams) -> Option<NativePath> {
        self.try_stroke(path, stroke)
            .map_err(|e| debug!("Stroke outline failed: {}", e))
            .ok()
    }

    fn fill_outline(&self, path: &NativePath) -> Option<NativePath> {
        let expanded = path.expanded();
        let mut out = NativePath::new(path.fill_type);
        let mut open_with_segments = false;

        for command in expanded.commands {
            match command {
                PathCommand::MoveTo(_) => {
                    if open_with_segments {
                        out.close();
                    }
                    open_with_segments = false;
                    out.push(command);
                }
                PathCommand::Close => {
                    if open_with_segments {
                        out.close();
                    }
                    open_with_segments = false;
                }
                segment => {
                    if out.is_empty() {
                        out.move_to(Point::default());
                    }
                    open_with_segments = true;
                    out.push(segment);
                }
            }
        }
        if open_with_segments {
            out.close();
        }

        let has_segments = out
            .commands
            .iter()
            .any(|c| !matches!(c, PathCommand::MoveTo(_) | PathCommand::Close));
        if has_segments {
            Some(out)
        } else {
            debug!("Fill outline of a path without segments");
            None
        }
    }

    fn simplify(&self, path: &NativePath) -> Option<NativePath> {
        self.to_sketch(path)
            .and_then(|s| from_sketch(&s))
            .map_err(|e| debug!("Simplify produced nothing: {}", e))
            .ok()
    }
}

fn xor(a: &Sketch<()>, b: &Sketch<()>) -> Sketch<()> {
    a.union(b).difference(&a.intersection(b))
}

/// Nonzero fill of a set of rings.
///
/// Rings are nested by containment. The area between a ring and the rings
/// directly inside it carries the winding summed from the outermost ring
/// down, and is filled when that sum is not zero. Rings that cross each
/// other are unioned.
fn nonzero_sketch(polygons: &[Vec<[f64; 2]>]) -> Sketch<()> {
    let count = polygons.len();
    let areas: Vec<f64> = polygons.iter().map(|p| signed_area(p)).collect();

    // Innermost larger ring holding each ring's first vertex.
    let parents: Vec<Option<usize>> = (0..count)
        .map(|i| {
            (0..count)
                .filter(|&j| {
                    j != i
                        && areas[j].abs() > areas[i].abs()
                        && ring_contains(&polygons[j], polygons[i][0])
                })
                .min_by(|&a, &b| areas[a].abs().total_cmp(&areas[b].abs()))
        })
        .collect();

    // Parents are larger, so they resolve first in this order.
    let mut order: Vec<usize> = (0..count).collect();
    order.sort_by(|&a, &b| areas[b].abs().total_cmp(&areas[a].abs()));
    let mut winding = vec![0i32; count];
    for &i in &order {
        let own = if areas[i] > 0.0 {
            1
        } else if areas[i] < 0.0 {
            -1
        } else {
            0
        };
        winding[i] = parents[i].map_or(0, |p| winding[p]) + own;
    }

    let mut sketch = Sketch::<()>::new();
    for i in 0..count {
        if winding[i] == 0 {
            continue;
        }
        let mut region = Sketch::polygon(&polygons[i], None);
        for child in (0..count).filter(|&c| parents[c] == Some(i)) {
            region = region.difference(&Sketch::polygon(&polygons[child], None));
        }
        sketch = sketch.union(&region);
    }
    sketch
}

fn signed_area(ring: &[[f64; 2]]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let [ax, ay] = ring[i];
            let [bx, by] = ring[(i + 1) % n];
            ax * by - bx * ay
        })
        .sum::<f64>()
        / 2.0
}

/// Crossing-number test against a single ring.
fn ring_contains(ring: &[[f64; 2]], [x, y]: [f64; 2]) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[(i + n - 1) % n];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
    }
    inside
}

/// Lowers a path to basic steps, converting arcs to cubics.
///
/// Segments that arrive with no open figure start one at the current point.
fn lower(path: &NativePath) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut current = Point::default();
    let mut start = Point::default();
    let mut open = false;

    for command in path.expanded().commands {
        if !matches!(command, PathCommand::MoveTo(_) | PathCommand::Close) && !open {
            steps.push(Step::Move(current));
            start = current;
            open = true;
        }
        match command {
            PathCommand::MoveTo(p) => {
                steps.push(Step::Move(p));
                current = p;
                start = p;
                open = true;
            }
            PathCommand::LineTo(p) => {
                steps.push(Step::Line(p));
                current = p;
            }
            PathCommand::QuadTo { control, end } => {
                steps.push(Step::Quad(control, end));
                current = end;
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                steps.push(Step::Cubic(control1, control2, end));
                current = end;
            }
            PathCommand::ArcTo {
                point: end,
                radius_x,
                radius_y,
                x_axis_rotation,
                is_large_arc,
                sweep,
            } => {
                let arc = SvgArc {
                    from: lyon::geom::point(current.x, current.y),
                    to: lyon::geom::point(end.x, end.y),
                    radii: lyon::geom::vector(radius_x, radius_y),
                    x_rotation: lyon::geom::Angle::degrees(x_axis_rotation),
                    flags: ArcFlags {
                        large_arc: is_large_arc,
                        sweep: sweep == SweepDirection::Clockwise,
                    },
                };
                if arc.is_straight_line() {
                    steps.push(Step::Line(end));
                } else {
                    arc.to_arc().for_each_cubic_bezier(&mut |c| {
                        steps.push(Step::Cubic(
                            Point::new(c.ctrl1.x, c.ctrl1.y),
                            Point::new(c.ctrl2.x, c.ctrl2.y),
                            Point::new(c.to.x, c.to.y),
                        ));
                    });
                }
                current = end;
            }
            PathCommand::Close => {
                if open {
                    steps.push(Step::Close);
                }
                open = false;
                current = start;
            }
            // Removed by `expanded`.
            _ => {}
        }
    }

    steps
}

fn to_lyon_path(steps: &[Step]) -> Path {
    let p = |v: Point| point(v.x as f32, v.y as f32);
    let mut builder = Path::builder();
    let mut active = false;

    for step in steps {
        match *step {
            Step::Move(at) => {
                if active {
                    builder.end(false);
                }
                builder.begin(p(at));
                active = true;
            }
            Step::Line(to) => {
                builder.line_to(p(to));
            }
            Step::Quad(ctrl, to) => {
                builder.quadratic_bezier_to(p(ctrl), p(to));
            }
            Step::Cubic(c1, c2, to) => {
                builder.cubic_bezier_to(p(c1), p(c2), p(to));
            }
            Step::Close => {
                if active {
                    builder.close();
                    active = false;
                }
            }
        }
    }
    if active {
        builder.end(false);
    }

    builder.build()
}

fn to_skia_path(steps: &[Step]) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for step in steps {
        match *step {
            Step::Move(at) => pb.move_to(at.x as f32, at.y as f32),
            Step::Line(to) => pb.line_to(to.x as f32, to.y as f32),
            Step::Quad(c, to) => pb.quad_to(c.x as f32, c.y as f32, to.x as f32, to.y as f32),
            Step::Cubic(c1, c2, to) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                to.x as f32,
                to.y as f32,
            ),
            Step::Close => pb.close(),
        }
    }
    pb.finish()
}

fn from_skia_path(path: &tiny_skia::Path) -> Option<NativePath> {
    let p = |v: tiny_skia::Point| Point::new(v.x as f64, v.y as f64);
    let mut out = NativePath::new(PathFillType::Winding);

    for segment in path.segments() {
        match segment {
            tiny_skia::PathSegment::MoveTo(at) => out.move_to(p(at)),
            tiny_skia::PathSegment::LineTo(to) => out.line_to(p(to)),
            tiny_skia::PathSegment::QuadTo(c, to) => out.quad_to(p(c), p(to)),
            tiny_skia::PathSegment::CubicTo(c1, c2, to) => out.cubic_to(p(c1), p(c2), p(to)),
            tiny_skia::PathSegment::Close => out.close(),
        };
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Reads a sketch back as closed polygon figures (exteriors, then holes).
fn from_sketch(sketch: &Sketch<()>) -> Result<NativePath, KernelError> {
    let mut out = NativePath::new(PathFillType::EvenOdd);
    let mp = sketch.to_multipolygon();

    for poly in mp.0 {
        push_ring(&mut out, poly.exterior().0.iter().map(|c| Point::new(c.x, c.y)));
        for interior in poly.interiors() {
            push_ring(&mut out, interior.0.iter().map(|c| Point::new(c.x, c.y)));
        }
    }

    if out.is_empty() {
        Err(KernelError::NoArea)
    } else {
        Ok(out)
    }
}

fn push_ring(out: &mut NativePath, coords: impl Iterator<Item = Point>) {
    let mut ring: Vec<Point> = Vec::new();
    for p in coords {
        if ring.last().is_some_and(|last| last.distance_to(&p) < MERGE_EPSILON) {
            continue;
        }
        ring.push(p);
    }
    // Rings repeat their first coordinate at the end.
    if ring.len() > 1 && ring[0].distance_to(&ring[ring.len() - 1]) < MERGE_EPSILON {
        ring.pop();
    }
    if ring.len() < 3 {
        return;
    }

    out.move_to(ring[0]);
    for p in &ring[1..] {
        out.line_to(*p);
    }
    out.close();
}
