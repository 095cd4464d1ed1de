//! SVG path data (`d` attribute) reader and writer.
//!
//! Supports `m/l/h/v/c/s/q/t/a/z` and their absolute forms. Horizontal and
//! vertical lines become `LineTo`, smooth curves get their reflected control
//! point resolved, and arcs are kept as `ArcTo`. Anything the grammar does not
//! allow (unknown letters, dangling numbers, incomplete argument groups)
//! makes the whole input unparseable.

use std::fmt::Write;

use drawkit_core::{Point, SweepDirection};

use super::{NativePath, PathCommand, PathFillType};

/// Parses SVG path data. Returns `None` for empty or malformed input.
pub fn parse(data: &str) -> Option<NativePath> {
    let tokens = tokenize(data);
    if tokens.is_empty() {
        return None;
    }

    let mut path = NativePath::new(PathFillType::Winding);
    let mut current = Point::default();
    let mut start = Point::default();
    let mut subpath_active = false;

    // Previous control points for smooth commands.
    let mut prev_cubic_ctrl: Option<Point> = None;
    let mut prev_quad_ctrl: Option<Point> = None;

    let mut i = 0usize;
    while i < tokens.len() {
        let cmd = match &tokens[i] {
            Token::Command(c) => *c,
            Token::Number(_) => return None,
        };
        i += 1;

        let is_relative = cmd.is_ascii_lowercase();
        let arity = match cmd.to_ascii_uppercase() {
            'M' | 'L' | 'T' => 2,
            'H' | 'V' => 1,
            'C' => 6,
            'S' | 'Q' => 4,
            'A' => 7,
            'Z' => 0,
            _ => return None,
        };

        if arity == 0 {
            if subpath_active {
                path.close();
                subpath_active = false;
            }
            current = start;
            prev_cubic_ctrl = None;
            prev_quad_ctrl = None;
            continue;
        }

        let mut groups = 0usize;
        while i < tokens.len() && matches!(tokens[i], Token::Number(_)) {
            let args = numbers(&tokens, i, arity)?;
            i += arity;
            groups += 1;

            let abs = |x: f64, y: f64| {
                if is_relative {
                    Point::new(current.x + x, current.y + y)
                } else {
                    Point::new(x, y)
                }
            };

            // The first pair of a moveto starts a subpath; later pairs are
            // implicit linetos.
            if cmd.to_ascii_uppercase() == 'M' && groups == 1 {
                let p = abs(args[0], args[1]);
                path.move_to(p);
                subpath_active = true;
                start = p;
                current = p;
                prev_cubic_ctrl = None;
                prev_quad_ctrl = None;
                continue;
            }

            if !subpath_active {
                path.move_to(current);
                subpath_active = true;
                start = current;
            }

            match cmd.to_ascii_uppercase() {
                'M' | 'L' => {
                    current = abs(args[0], args[1]);
                    path.line_to(current);
                    prev_cubic_ctrl = None;
                    prev_quad_ctrl = None;
                }
                'H' => {
                    let x = if is_relative { current.x + args[0] } else { args[0] };
                    current = Point::new(x, current.y);
                    path.line_to(current);
                    prev_cubic_ctrl = None;
                    prev_quad_ctrl = None;
                }
                'V' => {
                    let y = if is_relative { current.y + args[0] } else { args[0] };
                    current = Point::new(current.x, y);
                    path.line_to(current);
                    prev_cubic_ctrl = None;
                    prev_quad_ctrl = None;
                }
                'C' => {
                    let c1 = abs(args[0], args[1]);
                    let c2 = abs(args[2], args[3]);
                    let end = abs(args[4], args[5]);
                    path.cubic_to(c1, c2, end);
                    current = end;
                    prev_cubic_ctrl = Some(c2);
                    prev_quad_ctrl = None;
                }
                'S' => {
                    let c1 = prev_cubic_ctrl
                        .map(|prev| reflect(prev, current))
                        .unwrap_or(current);
                    let c2 = abs(args[0], args[1]);
                    let end = abs(args[2], args[3]);
                    path.cubic_to(c1, c2, end);
                    current = end;
                    prev_cubic_ctrl = Some(c2);
                    prev_quad_ctrl = None;
                }
                'Q' => {
                    let control = abs(args[0], args[1]);
                    let end = abs(args[2], args[3]);
                    path.quad_to(control, end);
                    current = end;
                    prev_quad_ctrl = Some(control);
                    prev_cubic_ctrl = None;
                }
                'T' => {
                    let control = prev_quad_ctrl
                        .map(|prev| reflect(prev, current))
                        .unwrap_or(current);
                    let end = abs(args[0], args[1]);
                    path.quad_to(control, end);
                    current = end;
                    prev_quad_ctrl = Some(control);
                    prev_cubic_ctrl = None;
                }
                'A' => {
                    let large_arc = flag(args[3])?;
                    let sweep = flag(args[4])?;
                    let end = abs(args[5], args[6]);
                    path.push(PathCommand::ArcTo {
                        point: end,
                        radius_x: args[0].abs(),
                        radius_y: args[1].abs(),
                        x_axis_rotation: args[2],
                        is_large_arc: large_arc,
                        sweep: if sweep {
                            SweepDirection::Clockwise
                        } else {
                            SweepDirection::Counterclockwise
                        },
                    });
                    current = end;
                    prev_cubic_ctrl = None;
                    prev_quad_ctrl = None;
                }
                _ => return None,
            }
        }

        if groups == 0 {
            return None;
        }
    }

    Some(path)
}

/// Writes SVG path data for `path`. Shorthand commands are expanded first.
///
/// Returns `None` for a path without commands.
pub fn to_svg_path_data(path: &NativePath) -> Option<String> {
    let expanded = path.expanded();
    if expanded.is_empty() {
        return None;
    }

    let mut out = String::new();
    for command in &expanded.commands {
        if !out.is_empty() {
            out.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = match command {
            PathCommand::MoveTo(p) => write!(out, "M{}", pair(*p)),
            PathCommand::LineTo(p) => write!(out, "L{}", pair(*p)),
            PathCommand::QuadTo { control, end } => {
                write!(out, "Q{} {}", pair(*control), pair(*end))
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => write!(
                out,
                "C{} {} {}",
                pair(*control1),
                pair(*control2),
                pair(*end)
            ),
            PathCommand::ArcTo {
                point,
                radius_x,
                radius_y,
                x_axis_rotation,
                is_large_arc,
                sweep,
            } => write!(
                out,
                "A{},{} {} {},{} {}",
                num(*radius_x),
                num(*radius_y),
                num(*x_axis_rotation),
                u8::from(*is_large_arc),
                u8::from(*sweep == SweepDirection::Clockwise),
                pair(*point)
            ),
            PathCommand::Close => write!(out, "Z"),
            // Removed by `expanded`.
            _ => Ok(()),
        };
    }

    Some(out)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn numbers(tokens: &[Token], at: usize, count: usize) -> Option<Vec<f64>> {
    let slice = tokens.get(at..at + count)?;
    slice
        .iter()
        .map(|t| match t {
            Token::Number(n) => Some(*n),
            Token::Command(_) => None,
        })
        .collect()
}

fn flag(value: f64) -> Option<bool> {
    if value == 0.0 {
        Some(false)
    } else if value == 1.0 {
        Some(true)
    } else {
        None
    }
}

fn reflect(p: Point, around: Point) -> Point {
    Point::new(2.0 * around.x - p.x, 2.0 * around.y - p.y)
}

fn num(v: f64) -> f64 {
    // Avoid printing "-0".
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

fn pair(p: Point) -> String {
    format!("{},{}", num(p.x), num(p.y))
}

/// Splits path data into commands and numbers.
///
/// Handles commas/whitespace, splits on `+`/`-` when they begin a new number
/// (`10-5` -> `10`, `-5`) and on a second decimal point (`.5.5` -> `.5`,
/// `.5`), while preserving scientific notation. Any other character makes
/// the input invalid and yields no tokens.
fn tokenize(data: &str) -> Vec<Token> {
    let mut raw: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in data.chars() {
        match ch {
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q'
            | 'T' | 't' | 'A' | 'a' | 'Z' | 'z' => {
                if !current.is_empty() {
                    raw.push(std::mem::take(&mut current));
                }
                raw.push(ch.to_string());
            }
            ' ' | ',' | '\n' | '\r' | '\t' => {
                if !current.is_empty() {
                    raw.push(std::mem::take(&mut current));
                }
            }
            '-' | '+' => {
                if !current.is_empty() && !matches!(current.chars().last(), Some('e' | 'E')) {
                    raw.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
            '.' => {
                if current.contains('.') && !current.contains(['e', 'E']) {
                    raw.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
            'e' | 'E' | '0'..='9' => current.push(ch),
            _ => return Vec::new(),
        }
    }

    if !current.is_empty() {
        raw.push(current);
    }

    let mut tokens = Vec::with_capacity(raw.len());
    for t in raw {
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => tokens.push(Token::Command(c)),
            _ => match t.parse::<f64>() {
                Ok(n) if n.is_finite() => tokens.push(Token::Number(n)),
                _ => return Vec::new(),
            },
        }
    }
    tokens
}
