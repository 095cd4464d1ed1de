//! # drawkit designer
//!
//! Shape model, path conversion and picture import for drawkit.
//!
//! ## Core Components
//!
//! - **Model**: editor shapes (lines, rectangles, ellipses, arcs, Bézier
//!   curves, paths, groups, text, images), their styles, and the
//!   [`ShapeFactory`] that creates them
//! - **Native paths**: the flat path command list exchanged with the
//!   geometry kernel, and the bridge between it and [`PathGeometry`]
//! - **Kernel**: boolean operations, stroke-to-fill and simplification
//!   behind the [`GeometryKernel`] trait, implemented by [`CsgKernel`]
//! - **Converter**: shape-level operations built on the above
//! - **Import**: SVG documents recorded as pictures, and shapes recovered
//!   from picture commands
//!
//! ## Architecture
//!
//! ```text
//! Shapes ──bridge──> NativePath ──kernel──> NativePath ──bridge──> PathShape
//!
//! SVG text ──reader──> Picture ──importer──> GroupShape
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drawkit_designer::{PathConverter, PathOp};
//!
//! let converter = PathConverter::default();
//! let merged = converter.op(&shapes, PathOp::Union);
//! ```
//!
//! [`PathGeometry`]: drawkit_core::PathGeometry

pub mod converter;
pub mod import;
pub mod model;
pub mod native;
pub mod picture;

pub use converter::PathConverter;
pub use import::{PictureConversion, PictureImporter, IMPORTED_STYLE_NAME};
pub use model::{
    ArcShape, ArgbColor, CubicBezierShape, DefaultShapeFactory, EllipseShape, FillStyle,
    GroupShape, ImageShape, LineCap, LineShape, PathShape, QuadraticBezierShape, RectangleShape,
    Shape, ShapeFactory, ShapeStyle, ShapeType, StrokeStyle, TextHAlignment, TextShape, TextStyle,
};
pub use native::{
    to_geometry, to_native_path, to_native_path_unscaled, CsgKernel, GeometryKernel, Matrix,
    NativePath, PathCommand, PathFillType, PathOp, StrokeJoin, StrokeParams,
};
pub use picture::{CanvasCommand, Paint, PaintStyle, Picture, SvgPictureReader};
