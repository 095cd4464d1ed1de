//! # drawkit
//!
//! Shape-to-path conversion and picture-to-shape reconstruction for vector
//! diagrams.
//!
//! ## Architecture
//!
//! drawkit is organized as a workspace with multiple crates:
//!
//! 1. **drawkit-core** - Points, rectangles, the path geometry model and its
//!    builder cursor, error types
//! 2. **drawkit-settings** - Conversion and import configuration
//! 3. **drawkit-designer** - Shape model, native paths, geometry kernel,
//!    path converter, SVG picture reader and picture importer
//! 4. **drawkit** - This crate: logging setup, re-exports and the `drawkit`
//!    command-line tool
//!
//! ## Features
//!
//! - **Path conversion**: merge shapes into one path, boolean operations,
//!   stroke-to-fill, fill outlines, simplification
//! - **SVG path data**: parse and emit the SVG path mini-language
//! - **Picture import**: read SVG documents and recover rectangles,
//!   ellipses, lines, paths and text

pub use drawkit_core as core;
pub use drawkit_designer as designer;
pub use drawkit_settings as settings;

pub use drawkit_core::{
    Error, FillRule, GeometryContext, GeometryError, ImportError, PathFigure, PathGeometry, Point,
    Rect, Result, Segment, Size, SweepDirection,
};

pub use drawkit_designer::{
    CsgKernel, GeometryKernel, GroupShape, PathConverter, PathOp, PathShape, Picture,
    PictureConversion, PictureImporter, Shape, ShapeFactory, ShapeStyle, SvgPictureReader,
};

pub use drawkit_settings::{Config, ConversionSettings, ImportSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr (stdout carries command output)
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with_level(tracing::Level::INFO)
}

/// Initialize logging with `level` added to the `RUST_LOG` filter.
pub fn init_logging_with_level(level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
