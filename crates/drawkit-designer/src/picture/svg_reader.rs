//! Records SVG documents as [`Picture`]s.
//!
//! The document is parsed with `roxmltree` and walked element by element,
//! emitting canvas commands in document order. Basic shapes map onto the
//! shorthand path commands (`rect` to `AddRect`, `circle` to `AddCircle`,
//! ...) so that the importer can recognise them again. Groups become
//! `Save`/`SetMatrix`/`ClipPath`/`Restore` sequences; matrices are absolute
//! (parent matrix times the local transform).
//!
//! Supported:
//! - `svg`, `g`, `a`, `rect`, `circle`, `ellipse`, `line`, `polyline`,
//!   `polygon`, `path`, `text` (with `tspan` and `textPath`), `image`
//! - `clipPath` and gradient definitions, referenced through `url(#id)`
//! - presentation attributes and the `style` attribute, inherited through
//!   groups
//!
//! Everything else (`use`, markers, filters, masks, patterns) is skipped.

use std::collections::HashMap;

use drawkit_core::{ImportError, Point, Rect};
use drawkit_settings::ImportSettings;
use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use super::{
    CanvasCommand, ClipOperation, Color, GradientStop, Paint, PaintStyle, PathEffect, Picture,
    Shader, StrokeCap, StrokeJoin, TextAlign, Typeface,
};
use crate::native::{svg_path, Matrix, NativePath, PathCommand, PathFillType};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Elements whose content never draws directly.
const SKIPPED_ELEMENTS: &[&str] = &[
    "defs",
    "clipPath",
    "mask",
    "pattern",
    "symbol",
    "marker",
    "filter",
    "linearGradient",
    "radialGradient",
    "title",
    "desc",
    "metadata",
    "style",
    "script",
];

/// Gradient `href` chains longer than this are not followed.
const MAX_GRADIENT_HOPS: usize = 8;

#[derive(Debug, Clone)]
pub struct SvgPictureReader {
    default_width: f64,
    default_height: f64,
    default_font_size: f64,
}

impl Default for SvgPictureReader {
    fn default() -> Self {
        Self::new(&ImportSettings::default())
    }
}

impl SvgPictureReader {
    pub fn new(settings: &ImportSettings) -> Self {
        Self {
            default_width: settings.default_width,
            default_height: settings.default_height,
            default_font_size: settings.default_font_size,
        }
    }

    /// Reads an SVG document.
    ///
    /// Fails only when the text is not well-formed XML or has no `<svg>`
    /// element; unsupported content is skipped.
    pub fn read(&self, text: &str) -> Result<Picture, ImportError> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc =
            Document::parse_with_options(text, options).map_err(|e| invalid(&e.to_string()))?;

        let Some(root) = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "svg")
        else {
            return Err(invalid("missing <svg> element"));
        };

        let definitions = Definitions::build(&doc);
        let mut recorder = Recorder::new(&definitions);
        let style = Presentation::root(self.default_font_size).derive(root);
        recorder.children(root, &style);

        let cull_rect = root_size(root)
            .or(recorder.content_bounds)
            .unwrap_or_else(|| Rect::from_xywh(0.0, 0.0, self.default_width, self.default_height));

        debug!(
            "Read SVG picture: {} commands, {}x{}",
            recorder.commands.len(),
            cull_rect.width(),
            cull_rect.height()
        );

        Ok(Picture {
            cull_rect,
            commands: recorder.commands,
        })
    }
}

fn invalid(reason: &str) -> ImportError {
    ImportError::InvalidDocument {
        reason: reason.to_string(),
    }
}

fn length(node: Node<'_, '_>, name: &str) -> Option<f64> {
    node.attribute(name).and_then(parse_length)
}

/// Target id of `href` or `xlink:href`.
fn href_id(node: Node<'_, '_>) -> Option<String> {
    let raw = node
        .attribute("href")
        .or_else(|| node.attribute((XLINK_NS, "href")))?;
    raw.trim()
        .strip_prefix('#')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Presentation properties: attributes first, then `style` declarations
/// which take precedence.
fn properties(node: Node<'_, '_>) -> Vec<(String, String)> {
    let mut props: Vec<(String, String)> = node
        .attributes()
        .filter(|a| a.namespace().is_none() && a.name() != "style")
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();
    if let Some(style) = node.attribute("style") {
        for declaration in style.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                props.push((name.trim().to_string(), value.trim().to_string()));
            }
        }
    }
    props
}

/// Fill type declared on the element itself through any of `names`.
fn declared_fill_type(node: Node<'_, '_>, names: &[&str]) -> PathFillType {
    let rule = properties(node)
        .into_iter()
        .filter(|(name, _)| names.contains(&name.as_str()))
        .last();
    match rule {
        Some((_, value)) if value.trim() == "evenodd" => PathFillType::EvenOdd,
        _ => PathFillType::Winding,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PaintValue {
    Color(Color),
    Url(String),
}

/// Inherited presentation state.
#[derive(Debug, Clone)]
struct Presentation {
    fill: Option<PaintValue>,
    stroke: Option<PaintValue>,
    stroke_width: f64,
    stroke_cap: StrokeCap,
    stroke_join: StrokeJoin,
    stroke_miter: f64,
    stroke_dasharray: Option<Vec<f64>>,
    stroke_dashoffset: f64,
    fill_rule: PathFillType,
    fill_opacity: f64,
    stroke_opacity: f64,
    opacity: f64,
    font_family: String,
    font_size: f64,
    font_weight: u16,
    font_italic: bool,
    text_anchor: TextAlign,
}

impl Presentation {
    fn root(font_size: f64) -> Self {
        Self {
            fill: Some(PaintValue::Color(Color::BLACK)),
            stroke: None,
            stroke_width: 1.0,
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            stroke_miter: 4.0,
            stroke_dasharray: None,
            stroke_dashoffset: 0.0,
            fill_rule: PathFillType::Winding,
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
            opacity: 1.0,
            font_family: "sans-serif".to_string(),
            font_size,
            font_weight: 400,
            font_italic: false,
            text_anchor: TextAlign::Left,
        }
    }

    /// Child state for `node`.
    fn derive(&self, node: Node<'_, '_>) -> Self {
        let mut next = self.clone();
        // Opacity does not inherit; it multiplies down the tree.
        let mut own_opacity = 1.0;
        for (name, value) in properties(node) {
            if value == "inherit" {
                continue;
            }
            if name == "opacity" {
                if let Some(v) = parse_opacity(&value) {
                    own_opacity = v;
                }
                continue;
            }
            next.apply(&name, &value);
        }
        next.opacity = self.opacity * own_opacity;
        next
    }

    fn apply(&mut self, name: &str, value: &str) {
        match name {
            "fill" => {
                if let Some(paint) = parse_paint(value) {
                    self.fill = paint;
                }
            }
            "stroke" => {
                if let Some(paint) = parse_paint(value) {
                    self.stroke = paint;
                }
            }
            "stroke-width" => {
                if let Some(v) = parse_length(value) {
                    self.stroke_width = v;
                }
            }
            "stroke-linecap" => {
                self.stroke_cap = match value {
                    "round" => StrokeCap::Round,
                    "square" => StrokeCap::Square,
                    _ => StrokeCap::Butt,
                }
            }
            "stroke-linejoin" => {
                self.stroke_join = match value {
                    "round" => StrokeJoin::Round,
                    "bevel" => StrokeJoin::Bevel,
                    _ => StrokeJoin::Miter,
                }
            }
            "stroke-miterlimit" => {
                if let Ok(v) = value.parse::<f64>() {
                    self.stroke_miter = v;
                }
            }
            "stroke-dasharray" => {
                self.stroke_dasharray = if value == "none" {
                    None
                } else {
                    parse_number_list(value)
                        .filter(|d| !d.is_empty() && d.iter().any(|v| *v > 0.0))
                }
            }
            "stroke-dashoffset" => {
                if let Some(v) = parse_length(value) {
                    self.stroke_dashoffset = v;
                }
            }
            "fill-rule" => {
                self.fill_rule = if value == "evenodd" {
                    PathFillType::EvenOdd
                } else {
                    PathFillType::Winding
                }
            }
            "fill-opacity" => {
                if let Some(v) = parse_opacity(value) {
                    self.fill_opacity = v;
                }
            }
            "stroke-opacity" => {
                if let Some(v) = parse_opacity(value) {
                    self.stroke_opacity = v;
                }
            }
            "font-family" => {
                if let Some(first) = value.split(',').next() {
                    let family = first.trim().trim_matches(|c| c == '\'' || c == '"');
                    if !family.is_empty() {
                        self.font_family = family.to_string();
                    }
                }
            }
            "font-size" => {
                if let Some(v) = parse_length(value) {
                    self.font_size = v;
                }
            }
            "font-weight" => {
                self.font_weight = match value {
                    "bold" | "bolder" => 700,
                    "normal" | "lighter" => 400,
                    other => other.parse().unwrap_or(self.font_weight),
                }
            }
            "font-style" => self.font_italic = matches!(value, "italic" | "oblique"),
            "text-anchor" => {
                self.text_anchor = match value {
                    "middle" => TextAlign::Center,
                    "end" => TextAlign::Right,
                    _ => TextAlign::Left,
                }
            }
            _ => {}
        }
    }

    fn shader(
        &self,
        paint: &PaintValue,
        definitions: &Definitions<'_>,
    ) -> (Color, Option<Shader>) {
        match paint {
            PaintValue::Color(c) => (*c, Some(Shader::Color(*c))),
            PaintValue::Url(id) => match definitions.gradient(id) {
                Some(shader) => (Color::BLACK, Some(shader)),
                None => {
                    debug!("Unknown paint server '{}'", id);
                    (Color::BLACK, None)
                }
            },
        }
    }

    fn fill_paint(&self, definitions: &Definitions<'_>) -> Option<Paint> {
        let fill = self.fill.as_ref()?;
        let (color, shader) = self.shader(fill, definitions);
        let alpha = scale_alpha(color.alpha, self.opacity * self.fill_opacity);
        Some(Paint {
            style: PaintStyle::Fill,
            color: color.with_alpha(alpha),
            shader: shader.map(|s| match s {
                Shader::Color(c) => Shader::Color(c.with_alpha(alpha)),
                other => other,
            }),
            ..self.text_paint_base()
        })
    }

    fn stroke_paint(&self, definitions: &Definitions<'_>) -> Option<Paint> {
        let stroke = self.stroke.as_ref()?;
        if !(self.stroke_width > 0.0) {
            return None;
        }
        let (color, shader) = self.shader(stroke, definitions);
        let alpha = scale_alpha(color.alpha, self.opacity * self.stroke_opacity);
        Some(Paint {
            style: PaintStyle::Stroke,
            color: color.with_alpha(alpha),
            shader: shader.map(|s| match s {
                Shader::Color(c) => Shader::Color(c.with_alpha(alpha)),
                other => other,
            }),
            stroke_width: self.stroke_width,
            stroke_cap: self.stroke_cap,
            stroke_join: self.stroke_join,
            stroke_miter: self.stroke_miter,
            path_effect: self.stroke_dasharray.as_ref().map(|d| {
                let mut intervals = d.clone();
                if intervals.len() % 2 == 1 {
                    intervals.extend_from_within(..);
                }
                PathEffect::Dash {
                    intervals,
                    phase: self.stroke_dashoffset,
                }
            }),
            ..self.text_paint_base()
        })
    }

    /// Paint carrying only the text attributes.
    fn text_paint_base(&self) -> Paint {
        Paint {
            typeface: Some(Typeface {
                family_name: self.font_family.clone(),
                weight: self.font_weight,
                is_italic: self.font_italic,
            }),
            text_size: self.font_size,
            text_align: self.text_anchor,
            ..Paint::default()
        }
    }

    /// Single paint for text: fill, stroke or both.
    fn text_paint(&self, definitions: &Definitions<'_>) -> Option<Paint> {
        match (self.fill_paint(definitions), self.stroke_paint(definitions)) {
            (Some(fill), Some(stroke)) => Some(Paint {
                style: PaintStyle::StrokeAndFill,
                stroke_width: stroke.stroke_width,
                ..fill
            }),
            (Some(fill), None) => Some(fill),
            (None, Some(stroke)) => Some(stroke),
            (None, None) => None,
        }
    }
}

fn scale_alpha(alpha: u8, factor: f64) -> u8 {
    (alpha as f64 * factor.clamp(0.0, 1.0)).round() as u8
}

/// Geometry of a basic shape or path element, in its own user space.
fn element_geometry(node: Node<'_, '_>, fill_type: PathFillType) -> Option<NativePath> {
    let name = node.tag_name().name();
    let num = |n: &str| length(node, n).unwrap_or(0.0);
    let command = match name {
        "rect" => {
            let (w, h) = (num("width"), num("height"));
            if !(w > 0.0 && h > 0.0) {
                return None;
            }
            let rect = Rect::from_xywh(num("x"), num("y"), w, h);
            let rx = length(node, "rx");
            let ry = length(node, "ry");
            match (rx.or(ry), ry.or(rx)) {
                (Some(rx), Some(ry)) if rx > 0.0 && ry > 0.0 => PathCommand::AddRoundRect {
                    rect,
                    radius_x: rx,
                    radius_y: ry,
                },
                _ => PathCommand::AddRect(rect),
            }
        }
        "circle" => {
            let r = num("r");
            if !(r > 0.0) {
                return None;
            }
            PathCommand::AddCircle {
                center: Point::new(num("cx"), num("cy")),
                radius: r,
            }
        }
        "ellipse" => {
            let (rx, ry) = (num("rx"), num("ry"));
            if !(rx > 0.0 && ry > 0.0) {
                return None;
            }
            let (cx, cy) = (num("cx"), num("cy"));
            PathCommand::AddOval(Rect::new(cx - rx, cy - ry, cx + rx, cy + ry))
        }
        "line" => {
            let mut path = NativePath::new(fill_type);
            path.move_to(Point::new(num("x1"), num("y1")))
                .line_to(Point::new(num("x2"), num("y2")));
            return Some(path);
        }
        "polyline" | "polygon" => {
            let values = parse_number_list(node.attribute("points")?)?;
            let points: Vec<Point> = values
                .chunks_exact(2)
                .map(|c| Point::new(c[0], c[1]))
                .collect();
            if points.len() < 2 {
                return None;
            }
            PathCommand::AddPoly {
                points,
                close: name == "polygon",
            }
        }
        "path" => {
            let mut path = svg_path::parse(node.attribute("d")?)?;
            path.fill_type = fill_type;
            return Some(path);
        }
        _ => return None,
    };
    Some(NativePath::from_commands(fill_type, vec![command]))
}

/// Elements addressable by id. The first element with a given id wins.
struct Definitions<'a> {
    ids: HashMap<String, Node<'a, 'a>>,
}

impl<'a> Definitions<'a> {
    fn build(doc: &'a Document<'a>) -> Self {
        let mut ids = HashMap::new();
        for node in doc.descendants().filter(|n| n.is_element()) {
            if let Some(id) = node.attribute("id") {
                ids.entry(id.to_string()).or_insert(node);
            }
        }
        Self { ids }
    }

    fn tagged(&self, id: &str, tags: &[&str]) -> Option<Node<'a, 'a>> {
        self.ids
            .get(id)
            .copied()
            .filter(|n| tags.contains(&n.tag_name().name()))
    }

    fn gradient(&self, id: &str) -> Option<Shader> {
        let node = self.tagged(id, &["linearGradient", "radialGradient"])?;
        let stops = self.gradient_stops(node);
        if node.tag_name().name() == "radialGradient" {
            Some(Shader::RadialGradient {
                id: id.to_string(),
                stops,
            })
        } else {
            Some(Shader::LinearGradient {
                id: id.to_string(),
                stops,
            })
        }
    }

    /// Stops of `node`, or of the gradient it references when it has none.
    fn gradient_stops(&self, node: Node<'a, 'a>) -> Vec<GradientStop> {
        let mut current = node;
        for _ in 0..MAX_GRADIENT_HOPS {
            let stops: Vec<GradientStop> = current
                .children()
                .filter(|n| n.is_element() && n.tag_name().name() == "stop")
                .map(parse_stop)
                .collect();
            if !stops.is_empty() {
                return stops;
            }
            match href_id(current)
                .and_then(|id| self.tagged(&id, &["linearGradient", "radialGradient"]))
            {
                Some(next) => current = next,
                None => break,
            }
        }
        Vec::new()
    }

    /// Union of the shapes inside a `clipPath`, each in clip space.
    fn clip_path(&self, id: &str) -> Option<NativePath> {
        let node = self.tagged(id, &["clipPath"])?;
        let mut clip: Option<NativePath> = None;
        for child in node.descendants().filter(|n| n.is_element()) {
            let fill_type = declared_fill_type(child, &["fill-rule", "clip-rule"]);
            let Some(path) = element_geometry(child, fill_type) else {
                continue;
            };
            let path = match child.attribute("transform").and_then(parse_transform) {
                Some(m) => path.transform(&m),
                None => path,
            };
            match clip.as_mut() {
                Some(clip) => clip.extend_from(&path),
                None => clip = Some(path),
            }
        }
        clip
    }

    /// Geometry of any shape element, for `textPath` references.
    fn path(&self, id: &str) -> Option<NativePath> {
        let node = *self.ids.get(id)?;
        element_geometry(node, declared_fill_type(node, &["fill-rule"]))
    }
}

fn parse_stop(node: Node<'_, '_>) -> GradientStop {
    let mut color = Color::BLACK;
    let mut opacity = 1.0;
    let mut offset = 0.0;
    for (name, value) in properties(node) {
        match name.as_str() {
            "stop-color" => {
                if let Some(Some(PaintValue::Color(c))) = parse_paint(&value) {
                    color = c;
                }
            }
            "stop-opacity" => opacity = parse_opacity(&value).unwrap_or(1.0),
            "offset" => offset = parse_opacity(&value).unwrap_or(0.0),
            _ => {}
        }
    }
    GradientStop {
        offset,
        color: color.with_alpha(scale_alpha(color.alpha, opacity)),
    }
}

/// Character data of a `text` element and the `textPath` it runs along.
fn collect_text(node: Node<'_, '_>, content: &mut String, path_ref: &mut Option<String>) {
    for child in node.children() {
        if child.is_text() {
            content.push_str(child.text().unwrap_or_default());
        } else if child.is_element() {
            let name = child.tag_name().name();
            if SKIPPED_ELEMENTS.contains(&name) {
                continue;
            }
            if name == "textPath" {
                *path_ref = href_id(child);
            }
            collect_text(child, content, path_ref);
        }
    }
}

/// Turns the element tree into canvas commands.
struct Recorder<'d, 'a> {
    definitions: &'d Definitions<'a>,
    commands: Vec<CanvasCommand>,
    matrices: Vec<Matrix>,
    content_bounds: Option<Rect>,
}

impl<'d, 'a> Recorder<'d, 'a> {
    fn new(definitions: &'d Definitions<'a>) -> Self {
        Self {
            definitions,
            commands: Vec::new(),
            matrices: vec![Matrix::IDENTITY],
            content_bounds: None,
        }
    }

    fn matrix(&self) -> Matrix {
        self.matrices.last().copied().unwrap_or(Matrix::IDENTITY)
    }

    fn include(&mut self, rect: Rect) {
        self.content_bounds = Some(match self.content_bounds {
            Some(bounds) => bounds.union(&rect),
            None => rect,
        });
    }

    fn children(&mut self, node: Node<'_, '_>, style: &Presentation) {
        for child in node.children().filter(|n| n.is_element()) {
            self.element(child, style);
        }
    }

    fn element(&mut self, node: Node<'_, '_>, parent: &Presentation) {
        let name = node.tag_name().name();
        if SKIPPED_ELEMENTS.contains(&name) {
            return;
        }
        let style = parent.derive(node);

        match name {
            "svg" | "g" | "a" | "switch" => {
                let offset = (name == "svg").then(|| {
                    Matrix::translate(
                        length(node, "x").unwrap_or(0.0),
                        length(node, "y").unwrap_or(0.0),
                    )
                });
                self.begin_group(node, offset);
                self.children(node, &style);
                self.end_group();
            }
            "text" => self.with_element_transform(node, |rec| rec.draw_text(node, &style)),
            "image" => {
                let dest = Rect::from_xywh(
                    length(node, "x").unwrap_or(0.0),
                    length(node, "y").unwrap_or(0.0),
                    length(node, "width").unwrap_or(0.0),
                    length(node, "height").unwrap_or(0.0),
                );
                self.with_element_transform(node, |rec| {
                    let m = rec.matrix();
                    rec.include(m.map_rect(&dest));
                    rec.commands.push(CanvasCommand::DrawImage { dest });
                });
            }
            _ => match element_geometry(node, style.fill_rule) {
                Some(path) => {
                    self.with_element_transform(node, |rec| rec.draw_path(name, path, &style))
                }
                None => debug!("Skipping unsupported SVG element <{}>", name),
            },
        }
    }

    fn begin_group(&mut self, node: Node<'_, '_>, offset: Option<Matrix>) {
        self.commands.push(CanvasCommand::Save);

        let local = node.attribute("transform").and_then(parse_transform);
        let local = match (offset, local) {
            (Some(o), Some(l)) => Some(o.concat(&l)),
            (o, l) => o.or(l),
        };
        let matrix = match local {
            Some(local) => {
                let m = self.matrix().concat(&local);
                self.commands.push(CanvasCommand::SetMatrix(m));
                m
            }
            None => self.matrix(),
        };
        self.matrices.push(matrix);
        self.push_clip(node);
    }

    fn end_group(&mut self) {
        if self.matrices.len() > 1 {
            self.matrices.pop();
        }
        self.commands.push(CanvasCommand::Restore);
    }

    fn push_clip(&mut self, node: Node<'_, '_>) {
        let Some(id) = node.attribute("clip-path").and_then(url_id) else {
            return;
        };
        match self.definitions.clip_path(id) {
            Some(path) => self.commands.push(CanvasCommand::ClipPath {
                path,
                operation: ClipOperation::Intersect,
                antialias: true,
            }),
            None => debug!("Unknown clip path '{}'", id),
        }
    }

    /// Runs `draw` with the element's own transform and clip applied.
    fn with_element_transform(&mut self, node: Node<'_, '_>, draw: impl FnOnce(&mut Self)) {
        let local = node.attribute("transform").and_then(parse_transform);
        let clipped = node.attribute("clip-path").is_some();
        if local.is_none() && !clipped {
            draw(self);
            return;
        }

        self.commands.push(CanvasCommand::Save);
        let matrix = match local {
            Some(local) => {
                let m = self.matrix().concat(&local);
                self.commands.push(CanvasCommand::SetMatrix(m));
                m
            }
            None => self.matrix(),
        };
        self.matrices.push(matrix);
        self.push_clip(node);
        draw(self);
        self.matrices.pop();
        self.commands.push(CanvasCommand::Restore);
    }

    fn draw_path(&mut self, element: &str, path: NativePath, style: &Presentation) {
        if let Some(bounds) = path.transform(&self.matrix()).bounds() {
            self.include(bounds);
        }

        // Lines have no interior.
        if element != "line" {
            if let Some(paint) = style.fill_paint(self.definitions) {
                self.commands.push(CanvasCommand::DrawPath {
                    path: path.clone(),
                    paint,
                });
            }
        }
        if let Some(paint) = style.stroke_paint(self.definitions) {
            self.commands.push(CanvasCommand::DrawPath { path, paint });
        }
    }

    fn draw_text(&mut self, node: Node<'_, '_>, style: &Presentation) {
        let mut content = String::new();
        let mut path_ref = None;
        collect_text(node, &mut content, &mut path_ref);
        let content = content.split_whitespace().collect::<Vec<_>>().join(" ");
        if content.is_empty() {
            return;
        }
        let Some(paint) = style.text_paint(self.definitions) else {
            return;
        };

        match path_ref {
            Some(id) => match self.definitions.path(&id) {
                Some(path) => self.commands.push(CanvasCommand::DrawTextOnPath {
                    text: content,
                    path,
                    paint,
                }),
                None => debug!("Text path '{}' not found", id),
            },
            None => {
                let x = length(node, "x").unwrap_or(0.0);
                let y = length(node, "y").unwrap_or(0.0);
                let origin = self.matrix().map_point(Point::new(x, y));
                self.include(Rect::new(origin.x, origin.y, origin.x, origin.y));
                self.commands.push(CanvasCommand::DrawText {
                    x,
                    y,
                    text: content,
                    paint,
                });
            }
        }
    }
}

fn root_size(node: Node<'_, '_>) -> Option<Rect> {
    if let Some(values) = node.attribute("viewBox").and_then(parse_number_list) {
        if let [x, y, w, h] = values[..] {
            if w > 0.0 && h > 0.0 {
                return Some(Rect::from_xywh(x, y, w, h));
            }
        }
    }
    match (length(node, "width"), length(node, "height")) {
        (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some(Rect::from_xywh(0.0, 0.0, w, h)),
        _ => None,
    }
}

fn url_id(value: &str) -> Option<&str> {
    value
        .trim()
        .strip_prefix("url(")?
        .strip_suffix(')')?
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .strip_prefix('#')
}

/// `None` for an unparseable value, `Some(None)` for `none`.
fn parse_paint(value: &str) -> Option<Option<PaintValue>> {
    let value = value.trim();
    if value == "none" {
        return Some(None);
    }
    if let Some(id) = url_id(value) {
        return Some(Some(PaintValue::Url(id.to_string())));
    }
    parse_color(value).map(|c| Some(PaintValue::Color(c)))
}

fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;
        return match digits[..] {
            [r, g, b] => Some(Color::new(r * 17, g * 17, b * 17, 255)),
            [r1, r2, g1, g2, b1, b2] => Some(Color::new(
                r1 * 16 + r2,
                g1 * 16 + g2,
                b1 * 16 + b2,
                255,
            )),
            _ => None,
        };
    }
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|v| v.strip_suffix(')'))
    {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |s: &str| -> Option<u8> {
            let v = match s.strip_suffix('%') {
                Some(p) => p.trim().parse::<f64>().ok()? * 2.55,
                None => s.parse::<f64>().ok()?,
            };
            Some(v.clamp(0.0, 255.0).round() as u8)
        };
        let alpha = match parts.get(3) {
            Some(a) => scale_alpha(255, parse_opacity(a)?),
            None => 255,
        };
        if parts.len() < 3 {
            return None;
        }
        return Some(Color::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ));
    }

    let named = match value.to_ascii_lowercase().as_str() {
        "black" | "currentcolor" => Color::new(0, 0, 0, 255),
        "white" => Color::new(255, 255, 255, 255),
        "red" => Color::new(255, 0, 0, 255),
        "green" => Color::new(0, 128, 0, 255),
        "lime" => Color::new(0, 255, 0, 255),
        "blue" => Color::new(0, 0, 255, 255),
        "yellow" => Color::new(255, 255, 0, 255),
        "cyan" | "aqua" => Color::new(0, 255, 255, 255),
        "magenta" | "fuchsia" => Color::new(255, 0, 255, 255),
        "gray" | "grey" => Color::new(128, 128, 128, 255),
        "silver" => Color::new(192, 192, 192, 255),
        "maroon" => Color::new(128, 0, 0, 255),
        "olive" => Color::new(128, 128, 0, 255),
        "teal" => Color::new(0, 128, 128, 255),
        "navy" => Color::new(0, 0, 128, 255),
        "purple" => Color::new(128, 0, 128, 255),
        "orange" => Color::new(255, 165, 0, 255),
        "transparent" => Color::TRANSPARENT,
        _ => return None,
    };
    Some(named)
}

fn parse_opacity(value: &str) -> Option<f64> {
    let value = value.trim();
    let v = match value.strip_suffix('%') {
        Some(p) => p.trim().parse::<f64>().ok()? / 100.0,
        None => value.parse::<f64>().ok()?,
    };
    Some(v.clamp(0.0, 1.0))
}

/// Length in user units. Percentages and font-relative units are not
/// resolved.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let split = value
        .find(|c: char| c.is_ascii_alphabetic() || c == '%')
        .filter(|&i| {
            // Keep exponents such as 1e3 inside the number.
            !(value[i..].starts_with(['e', 'E'])
                && value[i + 1..].starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+'))
        })
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f64 = number.trim().parse().ok()?;
    let factor = match unit.trim() {
        "" | "px" => 1.0,
        "pt" => 4.0 / 3.0,
        "pc" => 16.0,
        "mm" => 96.0 / 25.4,
        "cm" => 96.0 / 2.54,
        "in" => 96.0,
        _ => return None,
    };
    Some(number * factor)
}

/// Numbers separated by whitespace and/or commas; `None` if any item is
/// not a number.
fn parse_number_list(value: &str) -> Option<Vec<f64>> {
    let mut out = Vec::new();
    let mut current = String::new();
    let flush = |current: &mut String, out: &mut Vec<f64>| -> Option<()> {
        if !current.is_empty() {
            out.push(current.parse().ok()?);
            current.clear();
        }
        Some(())
    };

    for ch in value.chars() {
        match ch {
            ',' | ' ' | '\n' | '\r' | '\t' => flush(&mut current, &mut out)?,
            '-' | '+' if !current.is_empty() && !current.ends_with(['e', 'E']) => {
                flush(&mut current, &mut out)?;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, &mut out)?;
    Some(out)
}

/// Parses an SVG `transform` list into one matrix.
fn parse_transform(value: &str) -> Option<Matrix> {
    let mut matrix = Matrix::IDENTITY;
    let mut rest = value.trim();

    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = rest.find(')')?;
        if close < open {
            return None;
        }
        let name = rest[..open].trim().trim_start_matches(',').trim();
        let args = parse_number_list(&rest[open + 1..close])?;

        let m = match (name, args.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => Matrix::from_svg(*a, *b, *c, *d, *e, *f),
            ("translate", [tx]) => Matrix::translate(*tx, 0.0),
            ("translate", [tx, ty]) => Matrix::translate(*tx, *ty),
            ("scale", [s]) => Matrix::scale(*s, *s),
            ("scale", [sx, sy]) => Matrix::scale(*sx, *sy),
            ("rotate", [a]) => Matrix::rotate_degrees(*a),
            ("rotate", [a, cx, cy]) => Matrix::translate(*cx, *cy)
                .concat(&Matrix::rotate_degrees(*a))
                .concat(&Matrix::translate(-cx, -cy)),
            ("skewX", [a]) => Matrix::skew_x_degrees(*a),
            ("skewY", [a]) => Matrix::skew_y_degrees(*a),
            _ => return None,
        };
        matrix = matrix.concat(&m);
        rest = rest[close + 1..].trim_start();
    }

    Some(matrix)
}
