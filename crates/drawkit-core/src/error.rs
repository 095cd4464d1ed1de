//! Error handling for drawkit
//!
//! Provides error types for the layers of the conversion engine:
//! - Geometry errors (builder protocol violations)
//! - Import errors (picture documents that cannot be read)
//!
//! Empty or degenerate conversion results are not errors; conversion
//! functions return `None` for those. All error types use `thiserror`.

use thiserror::Error;

/// Geometry error type
///
/// Raised when the geometry context builder is driven out of protocol,
/// e.g. a segment is appended before any figure was begun.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A segment or closed-state change was requested with no open figure
    #[error("No open figure: call begin_figure before appending segments")]
    NoOpenFigure,

    /// A figure index does not exist in the geometry
    #[error("Figure {index} out of range (geometry has {count} figures)")]
    FigureOutOfRange {
        /// The requested figure index.
        index: usize,
        /// The number of figures in the geometry.
        count: usize,
    },
}

/// Import error type
///
/// Represents failures to read a picture source at all. A source that parses
/// but contains nothing drawable is not an error.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The document is not a picture the reader understands
    #[error("Invalid document: {reason}")]
    InvalidDocument {
        /// The reason the document was rejected.
        reason: String,
    },

    /// The source file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Main error type for drawkit
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry builder error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is an import error
    pub fn is_import_error(&self) -> bool {
        matches!(self, Error::Import(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
