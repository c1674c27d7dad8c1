//! Shape definitions for the canvas.

mod line;
mod path;
mod polygon;
mod rectangle;
mod text;

pub use line::Line;
pub use path::Path;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use text::{FontDescriptor, Text};

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn red() -> Self {
        Self::rgb(255, 0, 0)
    }

    pub fn blue() -> Self {
        Self::rgb(0, 0, 255)
    }

    /// Format as `#rrggbb`. Alpha is not part of the file format.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Some(Self::rgb(r, g, b))
            }
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }
}

/// Colors picked in a peniko-based renderer or color widget.
impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

/// Colors handed to a peniko-based renderer.
impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Fill pattern for rectangles.
///
/// Discriminants follow the brush style numbering used by the file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillPattern {
    /// No fill at all.
    None = 0,
    /// Solid fill color.
    Solid = 1,
    Dense1 = 2,
    Dense2 = 3,
    Dense3 = 4,
    Dense4 = 5,
    Dense5 = 6,
    Dense6 = 7,
    Dense7 = 8,
    /// Horizontal lines.
    Horizontal = 9,
    /// Vertical lines.
    Vertical = 10,
    /// Horizontal and vertical lines.
    #[default]
    Cross = 11,
    /// Backward diagonal lines.
    BackwardDiagonal = 12,
    /// Forward diagonal lines.
    ForwardDiagonal = 13,
    /// Crossing diagonal lines.
    DiagonalCross = 14,
}

impl FillPattern {
    /// Numeric code written to files.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Look up a pattern from its numeric code.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => FillPattern::None,
            1 => FillPattern::Solid,
            2 => FillPattern::Dense1,
            3 => FillPattern::Dense2,
            4 => FillPattern::Dense3,
            5 => FillPattern::Dense4,
            6 => FillPattern::Dense5,
            7 => FillPattern::Dense6,
            8 => FillPattern::Dense7,
            9 => FillPattern::Horizontal,
            10 => FillPattern::Vertical,
            11 => FillPattern::Cross,
            12 => FillPattern::BackwardDiagonal,
            13 => FillPattern::ForwardDiagonal,
            14 => FillPattern::DiagonalCross,
            _ => return None,
        })
    }

    /// Whether the pattern paints anything inside the shape.
    pub fn is_filled(self) -> bool {
        self != FillPattern::None
    }
}

/// Dash style used when displaying a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Stroke properties shared by every outlined shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in pixels.
    pub stroke_width: u32,
}

impl ShapeStyle {
    pub fn new(stroke_color: SerializableColor, stroke_width: u32) -> Self {
        Self {
            stroke_color,
            stroke_width,
        }
    }

    /// Get the stroke color as a peniko Color.
    ///
    /// This is what a renderer paints outlines with; the engine itself only
    /// keeps `SerializableColor`.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Half the stroke width, the extra reach of the painted outline.
    pub(crate) fn half_width(&self) -> f64 {
        f64::from(self.stroke_width) / 2.0
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::red(),
            stroke_width: 1,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Distance from a point to a line segment (a->b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => (point - *single).hypot(),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Bounding box of a set of points, `Rect::ZERO` when empty.
pub(crate) fn points_bounds<'a>(points: impl IntoIterator<Item = &'a Point>) -> Rect {
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return Rect::ZERO;
    };
    iter.fold(Rect::from_points(*first, *first), |rect, p| {
        rect.union_pt(*p)
    })
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in scene coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in scene coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the outline for rendering.
    fn to_path(&self) -> BezPath;

    /// The anchor point that moves report and set.
    fn position(&self) -> Point;

    /// Move the whole shape rigidly by `delta`.
    fn translate(&mut self, delta: Vec2);
}

/// Discriminant of [`Shape`], handy for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Path,
    Polygon,
    Text,
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Path(Path),
    Polygon(Polygon),
    Text(Text),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Path(s) => s.id(),
            Shape::Polygon(s) => s.id(),
            Shape::Text(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Path(_) => ShapeKind::Path,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Path(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Line(s) => s.hit_test(point, tolerance),
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Path(s) => s.hit_test(point, tolerance),
            Shape::Polygon(s) => s.hit_test(point, tolerance),
            Shape::Text(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Line(s) => s.to_path(),
            Shape::Rectangle(s) => s.to_path(),
            Shape::Path(s) => s.to_path(),
            Shape::Polygon(s) => s.to_path(),
            Shape::Text(s) => s.to_path(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Line(s) => s.position(),
            Shape::Rectangle(s) => s.position(),
            Shape::Path(s) => s.position(),
            Shape::Polygon(s) => s.position(),
            Shape::Text(s) => s.position(),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Line(s) => s.translate(delta),
            Shape::Rectangle(s) => s.translate(delta),
            Shape::Path(s) => s.translate(delta),
            Shape::Polygon(s) => s.translate(delta),
            Shape::Text(s) => s.translate(delta),
        }
    }

    /// Move the shape so that its anchor lands on `position`.
    pub fn set_position(&mut self, position: Point) {
        let delta = position - self.position();
        self.translate(delta);
    }

    /// Stroke of outlined shapes. Text has none.
    pub fn stroke(&self) -> Option<&ShapeStyle> {
        match self {
            Shape::Line(s) => Some(&s.style),
            Shape::Rectangle(s) => Some(&s.style),
            Shape::Path(s) => Some(&s.style),
            Shape::Polygon(s) => Some(&s.style),
            Shape::Text(_) => None,
        }
    }

    /// Check if this shape is a text.
    pub fn is_text(&self) -> bool {
        matches!(self, Shape::Text(_))
    }

    /// Get the text if this shape is a text.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get the mutable text if this shape is a text.
    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_id(&mut self, id: ShapeId) {
        match self {
            Shape::Line(s) => s.id = id,
            Shape::Rectangle(s) => s.id = id,
            Shape::Path(s) => s.id = id,
            Shape::Polygon(s) => s.id = id,
            Shape::Text(s) => s.id = id,
        }
    }

    /// Test if the bounding box of this shape touches `rect`.
    ///
    /// Edges count as touching so that horizontal or vertical lines, whose
    /// bounds have no area, can still be picked by a rubber band.
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        let bounds = self.bounds();
        bounds.x0 <= rect.x1 && rect.x0 <= bounds.x1 && bounds.y0 <= rect.y1 && rect.y0 <= bounds.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = SerializableColor::rgb(0x12, 0xab, 0xff);
        assert_eq!(color.to_hex(), "#12abff");
        assert_eq!(SerializableColor::from_hex("#12abff"), Some(color));
        assert_eq!(SerializableColor::from_hex("#12ABFF"), Some(color));
    }

    #[test]
    fn test_peniko_conversion() {
        let style = ShapeStyle::new(SerializableColor::rgb(10, 20, 30), 3);
        let color: Color = style.stroke();
        assert_eq!(SerializableColor::from(color), style.stroke_color);
    }

    #[test]
    fn test_hex_short_and_alpha_forms() {
        assert_eq!(
            SerializableColor::from_hex("#f00"),
            Some(SerializableColor::red())
        );
        assert_eq!(
            SerializableColor::from_hex("#00000080"),
            Some(SerializableColor::new(0, 0, 0, 0x80))
        );
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert_eq!(SerializableColor::from_hex("red"), None);
        assert_eq!(SerializableColor::from_hex("#12345"), None);
        assert_eq!(SerializableColor::from_hex("#gg0000"), None);
        assert_eq!(SerializableColor::from_hex("#+1+1+1"), None);
    }

    #[test]
    fn test_fill_pattern_codes() {
        for code in 0..=14 {
            let pattern = FillPattern::from_code(code).unwrap();
            assert_eq!(pattern.code(), code);
        }
        assert_eq!(FillPattern::from_code(15), None);
        assert_eq!(FillPattern::from_code(-1), None);
        assert_eq!(FillPattern::default(), FillPattern::Cross);
    }

    #[test]
    fn test_set_position_moves_anchor() {
        let mut shape = Shape::Line(Line::new(Point::new(10.0, 10.0), Point::new(20.0, 30.0)));
        shape.set_position(Point::new(0.0, 0.0));
        let Shape::Line(line) = &shape else {
            panic!("kind changed");
        };
        assert_eq!(line.start, Point::new(0.0, 0.0));
        assert_eq!(line.end, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_intersects_rect_includes_flat_bounds() {
        let shape = Shape::Line(Line::new(Point::new(0.0, 50.0), Point::new(100.0, 50.0)));
        assert!(shape.intersects_rect(Rect::new(40.0, 40.0, 60.0, 60.0)));
        assert!(!shape.intersects_rect(Rect::new(40.0, 60.0, 60.0, 80.0)));
    }

    #[test]
    fn test_distinct_ids_for_identical_geometry() {
        let a = Line::new(Point::ZERO, Point::new(1.0, 1.0));
        let b = Line::new(Point::ZERO, Point::new(1.0, 1.0));
        assert_ne!(a.id(), b.id());
    }
}
