//! Picture import.
//!
//! [`PictureImporter`] walks a recorded [`Picture`] and reconstructs editor
//! shapes from its draw commands. Single shorthand path commands come back as
//! rectangles and ellipses, a move plus a line comes back as a line, and
//! anything else becomes a generic path shape.
//!
//! Save/restore, matrix and clip commands are walked but not applied: shapes
//! keep the coordinates they were drawn with. See
//! [`PictureImporter::limitations`].

use std::path::Path;
use std::sync::Arc;

use drawkit_core::{FillRule, ImportError, Point};
use drawkit_settings::ImportSettings;
use tracing::{debug, info};

use crate::model::{
    ArgbColor, DefaultShapeFactory, GroupShape, LineCap, Shape, ShapeFactory, ShapeStyle,
    TextHAlignment,
};
use crate::native::{to_geometry, NativePath, PathCommand};
use crate::picture::{
    CanvasCommand, Color, Paint, PathEffect, Picture, Shader, StrokeCap, SvgPictureReader,
    TextAlign,
};

/// Style name given to every reconstructed style.
pub const IMPORTED_STYLE_NAME: &str = "Imported";

const LIMITATIONS: &[&str] = &[
    "Transforms (SetMatrix) are not applied to imported shapes",
    "Clip paths and clip rectangles are ignored",
    "Rounded rectangles are not imported",
    "Gradient and picture shaders are imported as the default colour",
    "Text on a path and text blobs are not imported",
    "Images are not imported",
];

/// Result of importing a picture source.
///
/// `group` is `None` and both dimensions are NaN when the source could not be
/// read at all; a readable but empty source gives an empty group.
#[derive(Debug, Clone)]
pub struct PictureConversion {
    pub group: Option<GroupShape>,
    pub width: f64,
    pub height: f64,
}

impl PictureConversion {
    fn failed() -> Self {
        Self {
            group: None,
            width: f64::NAN,
            height: f64::NAN,
        }
    }

    pub fn is_success(&self) -> bool {
        self.group.is_some()
    }
}

pub struct PictureImporter {
    factory: Arc<dyn ShapeFactory>,
    settings: ImportSettings,
}

impl std::fmt::Debug for PictureImporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PictureImporter")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Default for PictureImporter {
    fn default() -> Self {
        Self::new(Arc::new(DefaultShapeFactory))
    }
}

impl PictureImporter {
    pub fn new(factory: Arc<dyn ShapeFactory>) -> Self {
        Self::with_settings(factory, ImportSettings::default())
    }

    pub fn with_settings(factory: Arc<dyn ShapeFactory>, settings: ImportSettings) -> Self {
        Self { factory, settings }
    }

    /// Known gaps of the reconstruction, for display to users.
    pub fn limitations() -> &'static [&'static str] {
        LIMITATIONS
    }

    /// Reconstructs the shapes drawn by `picture`, in drawing order.
    pub fn import_picture(&self, picture: &Picture) -> GroupShape {
        self.import_into(picture, "Picture")
    }

    /// Reads SVG text and imports it.
    pub fn convert_text(&self, text: &str) -> PictureConversion {
        match SvgPictureReader::new(&self.settings).read(text) {
            Ok(picture) => self.conversion(&picture, "Picture"),
            Err(e) => {
                debug!("Picture source not readable: {}", e);
                PictureConversion::failed()
            }
        }
    }

    /// Reads an SVG file and imports it. The group is named after the file.
    pub fn convert_file(&self, path: &Path) -> PictureConversion {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Picture".to_string());

        match self.read_file(path) {
            Ok(picture) => self.conversion(&picture, &name),
            Err(e) => {
                debug!("Picture file not readable: {}", e);
                PictureConversion::failed()
            }
        }
    }

    fn read_file(&self, path: &Path) -> Result<Picture, ImportError> {
        let text = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        SvgPictureReader::new(&self.settings).read(&text)
    }

    fn conversion(&self, picture: &Picture, name: &str) -> PictureConversion {
        PictureConversion {
            group: Some(self.import_into(picture, name)),
            width: picture.width(),
            height: picture.height(),
        }
    }

    fn import_into(&self, picture: &Picture, name: &str) -> GroupShape {
        let mut group = self.factory.create_group(name);
        let mut skipped = 0usize;

        for command in &picture.commands {
            match self.convert_command(command) {
                Some(shape) => group.add(shape),
                None => {
                    if !matches!(
                        command,
                        CanvasCommand::Save | CanvasCommand::Restore
                    ) {
                        skipped += 1;
                    }
                }
            }
        }

        info!(
            "Imported {} shapes from {} picture commands ({} without a shape)",
            group.len(),
            picture.commands.len(),
            skipped
        );
        group
    }

    fn convert_command(&self, command: &CanvasCommand) -> Option<Shape> {
        match command {
            CanvasCommand::DrawPath { path, paint } => self.convert_path(path, paint),
            CanvasCommand::DrawText { x, y, text, paint } => {
                let style = self.style_from_paint(paint);
                let origin = Point::new(*x, *y);
                let mut shape = self.factory.create_text(
                    origin,
                    origin,
                    text,
                    style,
                    paint.style.is_stroked(),
                );
                shape.is_filled = paint.style.is_filled();
                Some(Shape::Text(shape))
            }
            CanvasCommand::Save | CanvasCommand::Restore => None,
            other => {
                debug!("Picture command {} produces no shape", other.name());
                None
            }
        }
    }

    fn convert_path(&self, path: &NativePath, paint: &Paint) -> Option<Shape> {
        let is_stroked = paint.style.is_stroked();
        let is_filled = paint.style.is_filled();

        if let [command] = path.commands.as_slice() {
            if command.is_shorthand() {
                return self.convert_shorthand(command, path, paint);
            }
        }

        if let [PathCommand::MoveTo(start), PathCommand::LineTo(end)] = path.commands.as_slice() {
            let style = self.style_from_paint(paint);
            return Some(Shape::Line(
                self.factory.create_line(*start, *end, style, is_stroked),
            ));
        }

        let geometry = to_geometry(path, self.factory.as_ref())?;
        let style = self.style_from_paint(paint);
        Some(Shape::Path(
            self.factory
                .create_path(geometry, style, is_stroked, is_filled),
        ))
    }

    /// Recognises a path made of one shorthand command.
    fn convert_shorthand(
        &self,
        command: &PathCommand,
        path: &NativePath,
        paint: &Paint,
    ) -> Option<Shape> {
        let is_stroked = paint.style.is_stroked();
        let is_filled = paint.style.is_filled();

        match command {
            PathCommand::AddRect(rect) => Some(Shape::Rectangle(self.factory.create_rectangle(
                rect.top_left(),
                rect.bottom_right(),
                self.style_from_paint(paint),
                is_stroked,
                is_filled,
            ))),
            PathCommand::AddRoundRect { .. } => {
                debug!("Rounded rectangle import is not supported");
                None
            }
            PathCommand::AddOval(rect) => Some(Shape::Ellipse(self.factory.create_ellipse(
                rect.top_left(),
                rect.bottom_right(),
                self.style_from_paint(paint),
                is_stroked,
                is_filled,
            ))),
            PathCommand::AddCircle { center, radius } => {
                Some(Shape::Ellipse(self.factory.create_ellipse(
                    Point::new(center.x - radius, center.y - radius),
                    Point::new(center.x + radius, center.y + radius),
                    self.style_from_paint(paint),
                    is_stroked,
                    is_filled,
                )))
            }
            PathCommand::AddPoly { points, close } if points.len() >= 2 => {
                let fill_rule = FillRule::from(path.fill_type);
                let mut geometry = self.factory.create_path_geometry(fill_rule);
                {
                    let mut context = geometry.context();
                    context.begin_figure(points[0], *close);
                    for point in &points[1..] {
                        if let Err(e) = context.line_to(*point) {
                            debug!("Polygon import failed: {}", e);
                            return None;
                        }
                    }
                    context.end_figure();
                }
                Some(Shape::Path(self.factory.create_path(
                    geometry,
                    self.style_from_paint(paint),
                    is_stroked,
                    is_filled,
                )))
            }
            _ => None,
        }
    }

    /// Fresh style carrying what the paint says about colour, stroke and
    /// font.
    fn style_from_paint(&self, paint: &Paint) -> ShapeStyle {
        let mut style = self.factory.create_shape_style(IMPORTED_STYLE_NAME);

        let color = match &paint.shader {
            None => Some(paint.color),
            Some(Shader::Color(c)) => Some(*c),
            Some(Shader::LinearGradient { id, .. }) | Some(Shader::RadialGradient { id, .. }) => {
                debug!("Gradient shader '{}' is not imported", id);
                None
            }
            Some(Shader::Picture(_)) => {
                debug!("Picture shader is not imported");
                None
            }
        };

        if let Some(color) = color.map(to_argb) {
            if paint.style.is_stroked() {
                style.stroke.color = color;
            }
            if paint.style.is_filled() {
                style.fill.color = color;
            }
        }

        if paint.style.is_stroked() {
            style.stroke.thickness = paint.stroke_width;
            style.stroke.line_cap = match paint.stroke_cap {
                StrokeCap::Butt => LineCap::Flat,
                StrokeCap::Round => LineCap::Round,
                StrokeCap::Square => LineCap::Square,
            };
            if let Some(PathEffect::Dash { intervals, phase }) = &paint.path_effect {
                // Style dashes are in units of stroke thickness.
                let unit = if paint.stroke_width > 0.0 {
                    paint.stroke_width
                } else {
                    1.0
                };
                style.stroke.dashes = Some(intervals.iter().map(|d| d / unit).collect());
                style.stroke.dash_offset = phase / unit;
            }
        }

        if let Some(typeface) = &paint.typeface {
            style.text.font_family = typeface.family_name.clone();
            style.text.is_bold = typeface.is_bold();
            style.text.is_italic = typeface.is_italic;
        }
        style.text.font_size = paint.text_size;
        style.text.alignment = match paint.text_align {
            TextAlign::Left => TextHAlignment::Left,
            TextAlign::Center => TextHAlignment::Center,
            TextAlign::Right => TextHAlignment::Right,
        };

        style
    }
}

fn to_argb(color: Color) -> ArgbColor {
    ArgbColor::new(color.alpha, color.red, color.green, color.blue)
}
