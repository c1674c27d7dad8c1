//! Click-by-click polygon construction.

use crate::shapes::Polygon;
use kurbo::Point;

/// What a click did to the polygon under construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonClick {
    /// The click seeded a new polygon.
    Started,
    /// The click added a vertex.
    Added,
    /// The click landed on the first vertex and closed the polygon. The
    /// vertices end with a copy of the first one.
    Closed(Vec<Point>),
}

/// Accumulates polygon vertices between clicks.
#[derive(Debug, Clone, Default)]
pub struct PolygonBuilder {
    vertices: Vec<Point>,
    cursor: Option<Point>,
}

impl PolygonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a polygon is being drawn.
    pub fn is_drawing(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// Vertices placed so far.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Last hover position while drawing.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Handle a click.
    ///
    /// A click within `tolerance` of the first vertex on both axes closes the
    /// polygon once it has at least three vertices; with fewer it is just
    /// another vertex.
    pub fn click(&mut self, point: Point, tolerance: f64) -> PolygonClick {
        let Some(&first) = self.vertices.first() else {
            self.vertices.push(point);
            self.cursor = Some(point);
            return PolygonClick::Started;
        };

        let near_start =
            (point.x - first.x).abs() <= tolerance && (point.y - first.y).abs() <= tolerance;
        if near_start && self.vertices.len() >= Polygon::MIN_VERTICES {
            let mut vertices = std::mem::take(&mut self.vertices);
            vertices.push(first);
            self.cursor = None;
            return PolygonClick::Closed(vertices);
        }

        self.vertices.push(point);
        self.cursor = Some(point);
        PolygonClick::Added
    }

    /// Track the pointer for the rubber segment.
    pub fn hover(&mut self, point: Point) {
        if self.is_drawing() {
            self.cursor = Some(point);
        }
    }

    /// Drop the polygon under construction.
    pub fn cancel(&mut self) {
        if self.is_drawing() {
            log::debug!("discarding polygon with {} vertices", self.vertices.len());
        }
        self.vertices.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_near_start() {
        let mut builder = PolygonBuilder::new();
        assert_eq!(builder.click(Point::new(0.0, 0.0), 5.0), PolygonClick::Started);
        assert_eq!(builder.click(Point::new(100.0, 0.0), 5.0), PolygonClick::Added);
        assert_eq!(builder.click(Point::new(100.0, 100.0), 5.0), PolygonClick::Added);

        let closed = builder.click(Point::new(3.0, -2.0), 5.0);
        assert_eq!(
            closed,
            PolygonClick::Closed(vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 0.0),
            ])
        );
        assert!(!builder.is_drawing());
        assert!(builder.vertices().is_empty());
    }

    #[test]
    fn test_two_vertices_never_close() {
        let mut builder = PolygonBuilder::new();
        builder.click(Point::new(0.0, 0.0), 5.0);
        assert_eq!(builder.click(Point::new(3.0, -2.0), 5.0), PolygonClick::Added);
        assert_eq!(builder.vertices().len(), 2);
        assert!(builder.is_drawing());
    }

    #[test]
    fn test_tolerance_is_inclusive_per_axis() {
        let mut builder = PolygonBuilder::new();
        for p in [(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)] {
            builder.click(Point::new(p.0, p.1), 5.0);
        }
        // Outside on one axis only.
        assert_eq!(builder.click(Point::new(5.0, 6.0), 5.0), PolygonClick::Added);
        assert!(matches!(
            builder.click(Point::new(-5.0, 5.0), 5.0),
            PolygonClick::Closed(v) if v.len() == 5
        ));
    }

    #[test]
    fn test_hover_and_cancel() {
        let mut builder = PolygonBuilder::new();
        builder.hover(Point::new(1.0, 1.0));
        assert_eq!(builder.cursor(), None);

        builder.click(Point::ZERO, 5.0);
        builder.hover(Point::new(7.0, 8.0));
        assert_eq!(builder.cursor(), Some(Point::new(7.0, 8.0)));

        builder.cancel();
        assert!(!builder.is_drawing());
        assert_eq!(builder.cursor(), None);
    }
}
