//! Polygon shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, point_to_polyline_dist, points_bounds};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use uuid::Uuid;

/// A closed polygon. The outline always runs from the last vertex back to
/// the first, whether or not the closing vertex is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Vertices in drawing order.
    pub vertices: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polygon {
    /// Minimum number of vertices for a polygon.
    pub const MIN_VERTICES: usize = 3;

    /// Create a polygon from its vertices.
    pub fn new(vertices: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vertices,
            style: ShapeStyle::default(),
        }
    }

    /// Set the style.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// The vertices followed by the first vertex again, unless already closed.
    pub fn closed_ring(&self) -> Vec<Point> {
        let mut ring = self.vertices.clone();
        if let (Some(first), Some(last)) = (self.vertices.first(), self.vertices.last()) {
            if first != last {
                ring.push(*first);
            }
        }
        ring
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        points_bounds(&self.vertices)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.style.half_width();
        point_to_polyline_dist(point, &self.closed_ring()) <= reach || self.to_path().contains(point)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some((first, rest)) = self.vertices.split_first() else {
            return path;
        };
        path.move_to(*first);
        for vertex in rest {
            path.line_to(*vertex);
        }
        path.close_path();
        path
    }

    fn position(&self) -> Point {
        self.vertices.first().copied().unwrap_or(Point::ZERO)
    }

    fn translate(&mut self, delta: Vec2) {
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
    }
}
