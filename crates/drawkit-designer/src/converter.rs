//! Shape-to-path conversion.
//!
//! [`PathConverter`] turns application shapes into [`PathShape`]s by going
//! through the geometry kernel: shapes are serialised to a native path, the
//! kernel transforms it, and the result is rebuilt as a path geometry.
//! Every operation returns `None` when there is nothing to produce.

use std::slice;
use std::sync::Arc;

use drawkit_settings::ConversionSettings;
use tracing::debug;

use crate::model::{DefaultShapeFactory, PathShape, Shape, ShapeFactory, ShapeStyle};
use crate::native::{
    to_geometry, to_native_path_unscaled, CsgKernel, GeometryKernel, NativePath, PathOp,
    StrokeParams,
};

pub struct PathConverter {
    kernel: Arc<dyn GeometryKernel>,
    factory: Arc<dyn ShapeFactory>,
    settings: ConversionSettings,
}

impl std::fmt::Debug for PathConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathConverter")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl PathConverter {
    pub fn new(
        kernel: Arc<dyn GeometryKernel>,
        factory: Arc<dyn ShapeFactory>,
        settings: ConversionSettings,
    ) -> Self {
        Self {
            kernel,
            factory,
            settings,
        }
    }

    /// Converter using [`CsgKernel`] and [`DefaultShapeFactory`].
    pub fn with_settings(settings: ConversionSettings) -> Self {
        Self::new(
            Arc::new(CsgKernel::new(&settings)),
            Arc::new(DefaultShapeFactory),
            settings,
        )
    }

    pub fn kernel(&self) -> &dyn GeometryKernel {
        self.kernel.as_ref()
    }

    pub fn factory(&self) -> &dyn ShapeFactory {
        self.factory.as_ref()
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Merges the outlines of `shapes` into one path shape.
    ///
    /// Style and flags are copied from the first shape.
    pub fn to_path_shape(&self, shapes: &[Shape]) -> Option<PathShape> {
        let path = to_native_path_unscaled(shapes)?;
        let first = shapes.first()?;
        self.build_shape(&path, first.style().clone(), first.is_stroked(), first.is_filled())
    }

    /// Filled outline of the shape's stroke, as a native path.
    pub fn stroke_to_fill(&self, shape: &Shape, stroke_width_scale: f64) -> Option<NativePath> {
        let path = to_native_path_unscaled(slice::from_ref(shape))?;
        let stroke = StrokeParams::from_style(&shape.style().stroke, stroke_width_scale);
        self.kernel.stroke_to_fill(&path, &stroke)
    }

    /// Filled region of the shape ignoring its stroke, as a native path.
    pub fn fill_only(&self, shape: &Shape) -> Option<NativePath> {
        let path = to_native_path_unscaled(slice::from_ref(shape))?;
        self.kernel.fill_outline(&path)
    }

    /// Stroke outline of `shape` as a filled, unstroked path shape.
    ///
    /// The outline is painted with the original stroke colour.
    pub fn to_stroke_path_shape(&self, shape: &Shape) -> Option<PathShape> {
        let outline = self.stroke_to_fill(shape, self.settings.stroke_width_scale)?;
        let mut style = shape.style().clone();
        std::mem::swap(&mut style.fill.color, &mut style.stroke.color);
        self.build_shape(&outline, style, false, true)
    }

    /// Fill region of `shape` as a filled, unstroked path shape.
    pub fn to_fill_path_shape(&self, shape: &Shape) -> Option<PathShape> {
        let outline = self.fill_only(shape)?;
        self.build_shape(&outline, shape.style().clone(), false, true)
    }

    /// Simplified copy of `shape` as a path shape with the same flags.
    pub fn simplify(&self, shape: &Shape) -> Option<PathShape> {
        let path = to_native_path_unscaled(slice::from_ref(shape))?;
        let simplified = self.kernel.simplify(&path)?;
        self.build_shape(
            &simplified,
            shape.style().clone(),
            shape.is_stroked(),
            shape.is_filled(),
        )
    }

    /// Applies `op` across the shapes in order.
    ///
    /// Shapes without a path (text, images) are skipped. Style and flags
    /// come from the first input shape.
    pub fn op(&self, shapes: &[Shape], op: PathOp) -> Option<PathShape> {
        let first = shapes.first()?;
        let paths: Vec<NativePath> = shapes
            .iter()
            .filter_map(|s| to_native_path_unscaled(slice::from_ref(s)))
            .collect();
        if paths.is_empty() {
            debug!("Path op {:?} has no shapes with geometry", op);
            return None;
        }

        let result = self.kernel.op(&paths, op)?;
        self.build_shape(&result, first.style().clone(), first.is_stroked(), first.is_filled())
    }

    /// Path shape from SVG path data, with a fresh default style.
    pub fn from_svg_path_data(
        &self,
        text: &str,
        is_stroked: bool,
        is_filled: bool,
    ) -> Option<PathShape> {
        let path = self.kernel.parse_svg_path_data(text)?;
        let style = self.default_style();
        self.build_shape(&path, style, is_stroked, is_filled)
    }

    /// SVG path data of the shape's outline.
    pub fn to_svg_path_data(&self, shape: &Shape) -> Option<String> {
        let path = to_native_path_unscaled(slice::from_ref(shape))?;
        self.kernel.to_svg_path_data(&path)
    }

    fn default_style(&self) -> ShapeStyle {
        self.factory
            .create_shape_style(&self.settings.default_style_name)
    }

    fn build_shape(
        &self,
        path: &NativePath,
        style: ShapeStyle,
        is_stroked: bool,
        is_filled: bool,
    ) -> Option<PathShape> {
        let geometry = to_geometry(path, self.factory.as_ref())?;
        Some(
            self.factory
                .create_path(geometry, style, is_stroked, is_filled),
        )
    }
}

impl Default for PathConverter {
    fn default() -> Self {
        Self::with_settings(ConversionSettings::default())
    }
}
