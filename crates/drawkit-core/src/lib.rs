//! # drawkit Core
//!
//! Core types and the canonical path geometry model for drawkit.
//!
//! - [`types`]: points, sizes and rectangles
//! - [`geometry`]: [`PathGeometry`], [`PathFigure`], [`Segment`] and the
//!   [`GeometryContext`] builder cursor
//! - [`error`]: error types shared by every crate in the workspace

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, GeometryError, ImportError, Result};
pub use geometry::{
    FillRule, GeometryContext, PathFigure, PathGeometry, Segment, SegmentKind, SweepDirection,
};
pub use types::{Point, Rect, Size};
