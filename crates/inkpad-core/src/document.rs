//! The document: every committed shape in paint order.

use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// An ordered collection of committed shapes.
///
/// Shapes are keyed by id, so two shapes with identical geometry are still
/// distinct members. `z_order` runs back to front: the last entry paints on
/// top and wins hit tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    shapes: HashMap<ShapeId, Shape>,
    z_order: Vec<ShapeId>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of every other shape.
    ///
    /// Returns false, leaving the document untouched, if a shape with the
    /// same id is already a member.
    pub fn add_shape(&mut self, shape: Shape) -> bool {
        let index = self.z_order.len();
        self.insert_shape(index, shape)
    }

    /// Insert a shape at `index` in paint order (clamped to the top).
    pub fn insert_shape(&mut self, index: usize, shape: Shape) -> bool {
        let id = shape.id();
        if self.shapes.contains_key(&id) {
            return false;
        }
        let index = index.min(self.z_order.len());
        self.z_order.insert(index, id);
        self.shapes.insert(id, shape);
        true
    }

    /// Remove a shape, returning its paint-order index and the shape.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<(usize, Shape)> {
        let index = self.index_of(id)?;
        self.z_order.remove(index);
        self.shapes.remove(&id).map(|shape| (index, shape))
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Check membership.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Paint-order index of a shape.
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.z_order.iter().position(|&shape_id| shape_id == id)
    }

    /// Shape ids back to front.
    pub fn ids(&self) -> &[ShapeId] {
        &self.z_order
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// The topmost shape hit at `point`.
    pub fn shape_at_point(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| {
                self.shapes
                    .get(id)
                    .is_some_and(|s| s.hit_test(point, tolerance))
            })
    }

    /// Shapes whose bounding box touches `rect`, back to front.
    pub fn shapes_in_rect(&self, rect: Rect) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .copied()
            .filter(|id| {
                self.shapes
                    .get(id)
                    .is_some_and(|s| s.intersects_rect(rect))
            })
            .collect()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.z_order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Rectangle, Text};

    fn rect_at(x: f64, y: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(Point::new(x, y), 100.0, 100.0))
    }

    #[test]
    fn test_add_and_remove() {
        let mut doc = Document::new();
        let shape = rect_at(0.0, 0.0);
        let id = shape.id();

        assert!(doc.add_shape(shape));
        assert_eq!(doc.len(), 1);
        assert!(doc.contains(id));

        let (index, removed) = doc.remove_shape(id).unwrap();
        assert_eq!(index, 0);
        assert_eq!(removed.id(), id);
        assert!(doc.is_empty());
        assert!(doc.remove_shape(id).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut doc = Document::new();
        let shape = rect_at(0.0, 0.0);
        assert!(doc.add_shape(shape.clone()));
        assert!(!doc.add_shape(shape));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_identical_shapes_are_distinct_members() {
        let mut doc = Document::new();
        let a = rect_at(0.0, 0.0);
        let b = rect_at(0.0, 0.0);
        let b_id = b.id();
        doc.add_shape(a);
        doc.add_shape(b);
        assert_eq!(doc.len(), 2);

        doc.remove_shape(b_id);
        assert_eq!(doc.len(), 1);
        assert!(!doc.contains(b_id));
    }

    #[test]
    fn test_insert_restores_paint_order() {
        let mut doc = Document::new();
        let shapes: Vec<Shape> = (0..3).map(|i| rect_at(f64::from(i) * 10.0, 0.0)).collect();
        let ids: Vec<ShapeId> = shapes.iter().map(Shape::id).collect();
        for shape in shapes {
            doc.add_shape(shape);
        }

        let (index, middle) = doc.remove_shape(ids[1]).unwrap();
        assert_eq!(doc.ids(), &[ids[0], ids[2]]);
        doc.insert_shape(index, middle);
        assert_eq!(doc.ids(), ids.as_slice());
    }

    #[test]
    fn test_shape_at_point_prefers_topmost() {
        let mut doc = Document::new();
        let bottom = rect_at(0.0, 0.0);
        let top = rect_at(50.0, 50.0);
        let top_id = top.id();
        doc.add_shape(bottom);
        doc.add_shape(top);

        assert_eq!(doc.shape_at_point(Point::new(75.0, 75.0), 0.0), Some(top_id));
        assert_eq!(doc.shape_at_point(Point::new(500.0, 500.0), 0.0), None);
    }

    #[test]
    fn test_shapes_in_rect() {
        let mut doc = Document::new();
        let line = Shape::Line(Line::new(Point::new(0.0, 10.0), Point::new(50.0, 10.0)));
        let line_id = line.id();
        let text = Shape::Text(Text::new(Point::new(300.0, 300.0), "far".to_string()));
        doc.add_shape(line);
        doc.add_shape(text);

        assert_eq!(doc.shapes_in_rect(Rect::new(20.0, 0.0, 30.0, 20.0)), vec![line_id]);
        assert!(doc.shapes_in_rect(Rect::new(100.0, 100.0, 200.0, 200.0)).is_empty());
    }

    #[test]
    fn test_shapes_ordered() {
        let mut doc = Document::new();
        let a = rect_at(0.0, 0.0);
        let b = rect_at(10.0, 0.0);
        let (a_id, b_id) = (a.id(), b.id());
        doc.add_shape(a);
        doc.add_shape(b);
        let order: Vec<ShapeId> = doc.shapes_ordered().map(Shape::id).collect();
        assert_eq!(order, vec![a_id, b_id]);

        doc.clear();
        assert!(doc.is_empty());
    }
}
