use serde::{Deserialize, Serialize};

/// 8-bit ARGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArgbColor {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ArgbColor {
    pub const BLACK: ArgbColor = ArgbColor::new(0xFF, 0x00, 0x00, 0x00);
    pub const WHITE: ArgbColor = ArgbColor::new(0xFF, 0xFF, 0xFF, 0xFF);
    pub const TRANSPARENT: ArgbColor = ArgbColor::new(0x00, 0x00, 0x00, 0x00);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Packs as `0xAARRGGBB`.
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    pub fn from_u32(value: u32) -> Self {
        let [a, r, g, b] = value.to_be_bytes();
        Self { a, r, g, b }
    }
}

impl Default for ArgbColor {
    fn default() -> Self {
        Self::BLACK
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Flat,
    Square,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextHAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: ArgbColor,
    pub thickness: f64,
    pub line_cap: LineCap,
    /// Dash pattern in units of stroke thickness; `None` draws a solid line.
    pub dashes: Option<Vec<f64>>,
    pub dash_offset: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: ArgbColor::BLACK,
            thickness: 2.0,
            line_cap: LineCap::Flat,
            dashes: None,
            dash_offset: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub color: ArgbColor,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            color: ArgbColor::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub alignment: TextHAlignment,
    pub is_bold: bool,
    pub is_italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Calibri".to_string(),
            font_size: 12.0,
            alignment: TextHAlignment::Left,
            is_bold: false,
            is_italic: false,
        }
    }
}

/// Visual style of a shape.
///
/// Styles are plain values: `clone()` is a deep copy and no two shapes ever
/// share one by reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub name: String,
    pub stroke: StrokeStyle,
    pub fill: FillStyle,
    pub text: TextStyle,
}

impl ShapeStyle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_packing() {
        let c = ArgbColor::new(0x80, 0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x8012_3456);
        assert_eq!(ArgbColor::from_u32(0x8012_3456), c);
    }

    #[test]
    fn test_style_clone_is_independent() {
        let mut original = ShapeStyle::new("Default");
        original.stroke.dashes = Some(vec![2.0, 2.0]);
        let mut copy = original.clone();
        copy.stroke.dashes.as_mut().unwrap().push(4.0);
        copy.fill.color = ArgbColor::BLACK;
        assert_eq!(original.stroke.dashes, Some(vec![2.0, 2.0]));
        assert_eq!(original.fill.color, ArgbColor::WHITE);
    }
}
