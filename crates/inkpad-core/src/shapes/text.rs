//! Text shape.

use super::{SerializableColor, ShapeId, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Weight written for regular text.
const WEIGHT_NORMAL: u32 = 50;
/// Weight written for bold text.
const WEIGHT_BOLD: u32 = 75;

/// Font family, size and decoration of a text shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDescriptor {
    /// Family name.
    pub family: String,
    /// Size in points.
    pub point_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: Self::DEFAULT_FAMILY.to_string(),
            point_size: Self::DEFAULT_POINT_SIZE,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

impl FontDescriptor {
    pub const DEFAULT_FAMILY: &'static str = "Sans Serif";
    pub const DEFAULT_POINT_SIZE: f64 = 12.0;

    /// Create a plain font.
    pub fn new(family: impl Into<String>, point_size: f64) -> Self {
        Self {
            family: family.into(),
            point_size,
            ..Self::default()
        }
    }

    /// Encode as the comma-separated descriptor stored in files:
    /// `family,pointSize,pixelSize,styleHint,weight,style,underline,strikeOut,fixedPitch,rawMode`.
    pub fn to_descriptor_string(&self) -> String {
        format!(
            "{},{},-1,5,{},{},{},0,0,0",
            self.family,
            self.point_size,
            if self.bold { WEIGHT_BOLD } else { WEIGHT_NORMAL },
            u8::from(self.italic),
            u8::from(self.underline),
        )
    }

    /// Decode a descriptor string.
    ///
    /// Only the family and point size are required. Weights above 100 are
    /// read on the 100..=900 scale.
    pub fn parse(descriptor: &str) -> Result<Self, String> {
        let fields: Vec<&str> = descriptor.split(',').collect();
        let family = fields
            .first()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .ok_or_else(|| format!("font descriptor {descriptor:?} has no family"))?;
        let point_size = fields
            .get(1)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|size| size.is_finite() && *size > 0.0)
            .ok_or_else(|| format!("font descriptor {descriptor:?} has no valid point size"))?;

        let flag = |index: usize| -> Result<bool, String> {
            match fields.get(index).map(|s| s.trim()) {
                None | Some("") => Ok(false),
                Some(value) => value
                    .parse::<i64>()
                    .map(|v| v != 0)
                    .map_err(|_| format!("font descriptor field {index} is not a number: {value:?}")),
            }
        };

        let bold = match fields.get(4).map(|s| s.trim()) {
            None | Some("") => false,
            Some(value) => {
                let weight = value
                    .parse::<u32>()
                    .map_err(|_| format!("font weight is not a number: {value:?}"))?;
                if weight > 100 { weight >= 600 } else { weight > 57 }
            }
        };

        Ok(Self {
            family: family.to_string(),
            point_size,
            bold,
            italic: flag(5)?,
            underline: flag(6)?,
        })
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_descriptor_string())
    }
}

/// A text shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Anchor (top-left corner of the text box).
    pub position: Point,
    /// The text content, lines separated by `\n`.
    pub content: String,
    /// Font.
    pub font: FontDescriptor,
    /// Text color.
    pub color: SerializableColor,
}

impl Text {
    /// Create a new text shape with the default font in black.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font: FontDescriptor::default(),
            color: SerializableColor::black(),
        }
    }

    /// Set the font.
    pub fn with_font(mut self, font: FontDescriptor) -> Self {
        self.font = font;
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.color = color;
        self
    }

    /// Whether the content has nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Approximate size from character counts. The renderer owns real layout.
    fn approximate_size(&self) -> (f64, f64) {
        let size = self.font.point_size;
        let lines: Vec<&str> = self.content.split('\n').collect();
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = (longest as f64 * size * 0.55).max(20.0);
        let height = lines.len() as f64 * size * 1.2;
        (width, height)
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let (width, height) = self.approximate_size();
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + height,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        // Text is rendered by the renderer; this is the box it occupies.
        self.bounds().to_path(0.1)
    }

    fn position(&self) -> Point {
        self.position
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
