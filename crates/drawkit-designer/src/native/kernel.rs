//! Operations the conversion engine needs from a 2D geometry kernel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{svg_path, NativePath};
use crate::model::{LineCap, StrokeStyle};

/// Boolean set operation applied across a list of paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathOp {
    Union,
    Intersect,
    /// First path minus the following ones.
    Difference,
    Xor,
    /// Later paths minus the accumulated result.
    ReverseDifference,
}

impl std::str::FromStr for PathOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "union" => Ok(PathOp::Union),
            "intersect" | "intersection" => Ok(PathOp::Intersect),
            "difference" => Ok(PathOp::Difference),
            "xor" => Ok(PathOp::Xor),
            "reverse-difference" | "reversedifference" => Ok(PathOp::ReverseDifference),
            other => Err(format!("unknown path op '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke geometry handed to [`GeometryKernel::stroke_to_fill`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeParams {
    pub width: f64,
    pub cap: LineCap,
    pub join: StrokeJoin,
    pub miter_limit: f64,
    /// Absolute dash intervals (on, off, on, ...).
    pub dashes: Option<Vec<f64>>,
    pub dash_offset: f64,
}

impl Default for StrokeParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Flat,
            join: StrokeJoin::Miter,
            miter_limit: 4.0,
            dashes: None,
            dash_offset: 0.0,
        }
    }
}

impl StrokeParams {
    /// Stroke parameters for a shape style.
    ///
    /// Style dashes are expressed in multiples of the stroke thickness and are
    /// converted to absolute lengths here.
    pub fn from_style(style: &StrokeStyle, width_scale: f64) -> Self {
        let width = style.thickness * width_scale;
        Self {
            width,
            cap: style.line_cap,
            dashes: style
                .dashes
                .as_ref()
                .map(|d| d.iter().map(|v| v * width).collect()),
            dash_offset: style.dash_offset * width,
            ..Self::default()
        }
    }
}

/// Failures inside a kernel operation.
///
/// Kernel operations report these as an absent result; the variants exist so
/// implementations can log why nothing was produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("Operation needs at least one path")]
    NoInput,

    #[error("Path has no fillable area")]
    NoArea,

    #[error("Invalid stroke width {0}")]
    InvalidStrokeWidth(f64),

    #[error("Invalid dash pattern {0:?}")]
    InvalidDash(Vec<f64>),

    #[error("Path has no drawable segments")]
    EmptyPath,
}

/// The external geometry kernel.
///
/// Every operation is pure: inputs are borrowed and a fresh path is returned.
/// `None` means the result is empty or the input could not be processed.
pub trait GeometryKernel: Send + Sync {
    fn op(&self, paths: &[NativePath], op: PathOp) -> Option<NativePath>;

    fn stroke_to_fill(&self, path: &NativePath, stroke: &StrokeParams) -> Option<NativePath>;

    fn fill_outline(&self, path: &NativePath) -> Option<NativePath>;

    fn simplify(&self, path: &NativePath) -> Option<NativePath>;

    fn parse_svg_path_data(&self, text: &str) -> Option<NativePath> {
        svg_path::parse(text)
    }

    fn to_svg_path_data(&self, path: &NativePath) -> Option<String> {
        svg_path::to_svg_path_data(path)
    }
}
