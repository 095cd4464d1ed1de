//! Recorded picture: a flat list of canvas drawing commands.
//!
//! Pictures are what external documents are read into before shapes are
//! reconstructed from them. The command vocabulary mirrors a 2D canvas:
//! state save/restore, matrix and clip changes, and draw calls carrying a
//! [`Paint`].

mod svg_reader;

pub use svg_reader::SvgPictureReader;

use drawkit_core::Rect;
use serde::{Deserialize, Serialize};

use crate::native::{Matrix, NativePath};

/// Non-premultiplied RGBA colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
    StrokeAndFill,
}

impl PaintStyle {
    pub fn is_stroked(self) -> bool {
        matches!(self, PaintStyle::Stroke | PaintStyle::StrokeAndFill)
    }

    pub fn is_filled(self) -> bool {
        matches!(self, PaintStyle::Fill | PaintStyle::StrokeAndFill)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipOperation {
    Intersect,
    Difference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shader {
    Color(Color),
    LinearGradient {
        id: String,
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        id: String,
        stops: Vec<GradientStop>,
    },
    Picture(Box<Picture>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathEffect {
    Dash { intervals: Vec<f64>, phase: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typeface {
    pub family_name: String,
    /// CSS weight, 400 is normal and 700 bold.
    pub weight: u16,
    pub is_italic: bool,
}

impl Typeface {
    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub style: PaintStyle,
    pub color: Color,
    pub shader: Option<Shader>,
    pub stroke_width: f64,
    pub stroke_cap: StrokeCap,
    pub stroke_join: StrokeJoin,
    pub stroke_miter: f64,
    pub path_effect: Option<PathEffect>,
    pub typeface: Option<Typeface>,
    pub text_size: f64,
    pub text_align: TextAlign,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            style: PaintStyle::Fill,
            color: Color::BLACK,
            shader: None,
            stroke_width: 1.0,
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            stroke_miter: 4.0,
            path_effect: None,
            typeface: None,
            text_size: 12.0,
            text_align: TextAlign::Left,
        }
    }
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            style: PaintStyle::Fill,
            color,
            ..Self::default()
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            style: PaintStyle::Stroke,
            color,
            stroke_width: width,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanvasCommand {
    Save,
    Restore,
    SetMatrix(Matrix),
    ClipPath {
        path: NativePath,
        operation: ClipOperation,
        antialias: bool,
    },
    ClipRect {
        rect: Rect,
        operation: ClipOperation,
        antialias: bool,
    },
    DrawPath {
        path: NativePath,
        paint: Paint,
    },
    DrawText {
        x: f64,
        y: f64,
        text: String,
        paint: Paint,
    },
    DrawTextOnPath {
        text: String,
        path: NativePath,
        paint: Paint,
    },
    DrawTextBlob {
        x: f64,
        y: f64,
        paint: Paint,
    },
    DrawImage {
        dest: Rect,
    },
}

impl CanvasCommand {
    pub fn name(&self) -> &'static str {
        match self {
            CanvasCommand::Save => "Save",
            CanvasCommand::Restore => "Restore",
            CanvasCommand::SetMatrix(_) => "SetMatrix",
            CanvasCommand::ClipPath { .. } => "ClipPath",
            CanvasCommand::ClipRect { .. } => "ClipRect",
            CanvasCommand::DrawPath { .. } => "DrawPath",
            CanvasCommand::DrawText { .. } => "DrawText",
            CanvasCommand::DrawTextOnPath { .. } => "DrawTextOnPath",
            CanvasCommand::DrawTextBlob { .. } => "DrawTextBlob",
            CanvasCommand::DrawImage { .. } => "DrawImage",
        }
    }
}

/// A recorded drawing with its cull rectangle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Picture {
    pub cull_rect: Rect,
    pub commands: Vec<CanvasCommand>,
}

impl Picture {
    pub fn new(cull_rect: Rect) -> Self {
        Self {
            cull_rect,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: CanvasCommand) {
        self.commands.push(command);
    }

    pub fn width(&self) -> f64 {
        self.cull_rect.width()
    }

    pub fn height(&self) -> f64 {
        self.cull_rect.height()
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    CanvasCommand::DrawPath { .. }
                        | CanvasCommand::DrawText { .. }
                        | CanvasCommand::DrawTextOnPath { .. }
                        | CanvasCommand::DrawTextBlob { .. }
                        | CanvasCommand::DrawImage { .. }
                )
            })
            .count()
    }
}
