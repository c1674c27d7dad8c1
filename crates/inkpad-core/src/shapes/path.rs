//! Freehand path shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, point_to_polyline_dist, points_bounds};
use kurbo::{BezPath, Point, Rect, Vec2};
use uuid::Uuid;

/// A freehand drawing made of one or more disjoint polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub(crate) id: ShapeId,
    /// Subpaths, each an ordered run of points.
    pub subpaths: Vec<Vec<Point>>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Path {
    /// Create from subpaths.
    pub fn new(subpaths: Vec<Vec<Point>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subpaths,
            style: ShapeStyle::default(),
        }
    }

    /// Create a single-stroke path from points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self::new(vec![points])
    }

    /// Set the style.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Total number of points across all subpaths.
    pub fn len(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    /// Check if the path has no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn points(&self) -> impl Iterator<Item = &Point> {
        self.subpaths.iter().flatten()
    }
}

impl ShapeTrait for Path {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        points_bounds(self.points())
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.style.half_width();
        self.subpaths
            .iter()
            .any(|sub| point_to_polyline_dist(point, sub) <= reach)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for sub in &self.subpaths {
            let Some((first, rest)) = sub.split_first() else {
                continue;
            };
            path.move_to(*first);
            for point in rest {
                path.line_to(*point);
            }
        }
        path
    }

    fn position(&self) -> Point {
        self.points().next().copied().unwrap_or(Point::ZERO)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in self.subpaths.iter_mut().flatten() {
            *point += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_len() {
        let path = Path::new(vec![
            vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            vec![Point::new(20.0, 0.0)],
        ]);
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
        assert!(Path::new(Vec::new()).is_empty());
    }

    #[test]
    fn test_bounds_span_subpaths() {
        let path = Path::new(vec![
            vec![Point::new(0.0, 0.0), Point::new(100.0, 50.0)],
            vec![Point::new(50.0, 100.0)],
        ]);

        let bounds = path.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let path = Path::from_points(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);

        assert!(path.hit_test(Point::new(50.0, 0.0), 5.0));
        assert!(!path.hit_test(Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_to_path_starts_each_subpath() {
        let path = Path::new(vec![
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            vec![Point::new(0.0, 10.0), Point::new(10.0, 10.0)],
        ]);
        let moves = path
            .to_path()
            .elements()
            .iter()
            .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn test_translate_moves_every_point() {
        let mut path = Path::from_points(vec![Point::new(1.0, 1.0), Point::new(2.0, 3.0)]);
        path.translate(Vec2::new(10.0, 10.0));
        assert_eq!(path.subpaths[0], vec![Point::new(11.0, 11.0), Point::new(12.0, 13.0)]);
        assert_eq!(path.position(), Point::new(11.0, 11.0));
    }
}
