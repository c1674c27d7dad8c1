//! Rectangle shape.

use super::{FillPattern, SerializableColor, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use uuid::Uuid;

/// An axis-aligned rectangle with a patterned fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle, never negative.
    pub width: f64,
    /// Height of the rectangle, never negative.
    pub height: f64,
    /// Fill color.
    pub fill_color: SerializableColor,
    /// Fill pattern.
    pub fill_pattern: FillPattern,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle. Negative extents are folded into the origin.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        let mut rect = Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            fill_color: SerializableColor::blue(),
            fill_pattern: FillPattern::default(),
            style: ShapeStyle::default(),
        };
        rect.normalize();
        rect
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let width = (p2.x - p1.x).abs();
        let height = (p2.y - p1.y).abs();

        Self::new(Point::new(min_x, min_y), width, height)
    }

    /// Set the style.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the fill.
    pub fn with_fill(mut self, color: SerializableColor, pattern: FillPattern) -> Self {
        self.fill_color = color;
        self.fill_pattern = pattern;
        self
    }

    fn normalize(&mut self) {
        if self.width < 0.0 {
            self.position.x += self.width;
            self.width = -self.width;
        }
        if self.height < 0.0 {
            self.position.y += self.height;
            self.height = -self.height;
        }
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect();
        let reach = tolerance + self.style.half_width();
        if self.fill_pattern.is_filled() {
            // Filled: hit anywhere inside
            rect.inflate(reach, reach).contains(point)
        } else {
            // Outline only: hit on the border
            let outer = rect.inflate(reach, reach);
            let inner = rect.inflate(-reach, -reach);
            outer.contains(point) && !inner.contains(point)
        }
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn position(&self) -> Point {
        self.position
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0);
        assert!((rect.position.x - 10.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 20.0).abs() < f64::EPSILON);
        assert!((rect.width - 100.0).abs() < f64::EPSILON);
        assert!((rect.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rectangle_from_corners() {
        let rect = Rectangle::from_corners(Point::new(50.0, 50.0), Point::new(10.0, 10.0));
        assert_eq!(rect.position, Point::new(10.0, 10.0));
        assert!((rect.width - 40.0).abs() < f64::EPSILON);
        assert!((rect.height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_extent_is_normalized() {
        let rect = Rectangle::new(Point::new(100.0, 100.0), -30.0, -20.0);
        assert_eq!(rect.position, Point::new(70.0, 80.0));
        assert!((rect.width - 30.0).abs() < f64::EPSILON);
        assert!((rect.height - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_filled() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        assert!(rect.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(!rect.hit_test(Point::new(150.0, 50.0), 0.0));
        assert!(rect.hit_test(Point::new(105.0, 50.0), 10.0)); // Within tolerance
    }

    #[test]
    fn test_hit_test_outline_only() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0)
            .with_fill(SerializableColor::blue(), FillPattern::None);
        assert!(!rect.hit_test(Point::new(50.0, 50.0), 2.0));
        assert!(rect.hit_test(Point::new(0.0, 50.0), 2.0));
    }

    #[test]
    fn test_bounds() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0);
        let bounds = rect.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }
}
