//! Current drawing style and text toolbar state.

use crate::shapes::{FillPattern, FontDescriptor, SerializableColor, ShapeStyle};
use serde::{Deserialize, Serialize};

/// Stroke widths offered by the pen size menu.
pub const PEN_SIZES: [u32; 4] = [1, 3, 5, 8];

/// Point sizes offered by the font size box.
pub const FONT_SIZES: [u32; 16] = [8, 9, 10, 11, 12, 14, 16, 18, 20, 22, 24, 26, 28, 36, 48, 72];

/// Style applied to newly created shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Pen color for lines, rectangles, paths and polygons.
    pub stroke_color: SerializableColor,
    /// Pen width in pixels.
    pub stroke_width: u32,
    /// Rectangle fill color.
    pub fill_color: SerializableColor,
    /// Rectangle fill pattern.
    pub fill_pattern: FillPattern,
    /// Font for new text.
    pub font: FontDescriptor,
    /// Color for new text.
    pub text_color: SerializableColor,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::red(),
            stroke_width: PEN_SIZES[0],
            fill_color: SerializableColor::blue(),
            fill_pattern: FillPattern::Cross,
            font: FontDescriptor::default(),
            text_color: SerializableColor::black(),
        }
    }
}

impl StyleConfig {
    /// The stroke new outlined shapes get.
    pub fn stroke(&self) -> ShapeStyle {
        ShapeStyle::new(self.stroke_color, self.stroke_width)
    }
}

/// One edit made in the text toolbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FontChange {
    Family(String),
    Size(f64),
    Bold(bool),
    Italic(bool),
    Underline(bool),
}

impl FontChange {
    /// Whether the edit yields a font that can be written to a file.
    ///
    /// Sizes must be finite and positive.
    pub fn is_valid(&self) -> bool {
        match self {
            FontChange::Size(size) => size.is_finite() && *size > 0.0,
            _ => true,
        }
    }

    /// Apply the edit to `font`. Invalid edits leave it untouched.
    pub fn apply(&self, font: &mut FontDescriptor) {
        if !self.is_valid() {
            return;
        }
        match self {
            FontChange::Family(family) => font.family.clone_from(family),
            FontChange::Size(size) => font.point_size = *size,
            FontChange::Bold(on) => font.bold = *on,
            FontChange::Italic(on) => font.italic = *on,
            FontChange::Underline(on) => font.underline = *on,
        }
    }
}

/// Parse the text typed into the editable font size box.
///
/// Returns `None` for anything that is not a positive whole number.
pub fn parse_font_size(text: &str) -> Option<f64> {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|size| *size > 0)
        .map(f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = StyleConfig::default();
        assert_eq!(style.stroke(), ShapeStyle::new(SerializableColor::red(), 1));
        assert_eq!(style.fill_color, SerializableColor::blue());
        assert_eq!(style.fill_pattern, FillPattern::Cross);
        assert_eq!(style.text_color, SerializableColor::black());
    }

    #[test]
    fn test_font_change_apply() {
        let mut font = FontDescriptor::default();
        FontChange::Family("Mono".to_string()).apply(&mut font);
        FontChange::Size(24.0).apply(&mut font);
        FontChange::Bold(true).apply(&mut font);
        FontChange::Underline(true).apply(&mut font);
        assert_eq!(font.family, "Mono");
        assert!((font.point_size - 24.0).abs() < f64::EPSILON);
        assert!(font.bold);
        assert!(!font.italic);
        assert!(font.underline);
    }

    #[test]
    fn test_invalid_font_size_ignored() {
        let mut font = FontDescriptor::default();
        for size in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            assert!(!FontChange::Size(size).is_valid());
            FontChange::Size(size).apply(&mut font);
        }
        assert!((font.point_size - 12.0).abs() < f64::EPSILON);
        assert!(FontChange::Size(9.5).is_valid());
    }

    #[test]
    fn test_parse_font_size() {
        assert_eq!(parse_font_size(" 14 "), Some(14.0));
        assert_eq!(parse_font_size("0"), None);
        assert_eq!(parse_font_size("12.5"), None);
        assert_eq!(parse_font_size("large"), None);
        assert!(FONT_SIZES.iter().all(|s| parse_font_size(&s.to_string()).is_some()));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let style: StyleConfig = serde_json::from_str(r#"{"stroke_width": 5}"#).unwrap();
        assert_eq!(style.stroke_width, 5);
        assert_eq!(style.stroke_color, SerializableColor::red());
    }
}
