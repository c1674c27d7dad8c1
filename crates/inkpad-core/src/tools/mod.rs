//! Tool system for the editor.

mod polygon;
mod text;

pub use polygon::{PolygonBuilder, PolygonClick};
pub use text::{TextEdit, TextKeyOutcome};

use crate::shapes::{Line, Path, Rectangle, Shape};
use crate::style::StyleConfig;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pen,
    Line,
    Rectangle,
    Polygon,
    Text,
}

/// State of a press-drag-release interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A gesture is in progress.
    Active {
        /// Press position.
        start: Point,
        /// Latest pointer position.
        current: Point,
    },
}

/// Tracks the current tool and the pen, line and rectangle gestures.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the gesture.
    pub state: ToolState,
    /// Accumulated points of the pen stroke.
    pen_points: Vec<Point>,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, dropping any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.cancel();
    }

    /// Begin a gesture.
    pub fn begin(&mut self, point: Point) {
        self.pen_points.clear();
        if self.current_tool == ToolKind::Pen {
            self.pen_points.push(point);
        }
        self.state = ToolState::Active {
            start: point,
            current: point,
        };
    }

    /// Update the current gesture.
    pub fn update(&mut self, point: Point) {
        if let ToolState::Active { current, .. } = &mut self.state {
            *current = point;
            if self.current_tool == ToolKind::Pen && self.pen_points.last() != Some(&point) {
                self.pen_points.push(point);
            }
        }
    }

    /// End the gesture at `point` and return the shape it built, if any.
    pub fn end(&mut self, point: Point, style: &StyleConfig) -> Option<Shape> {
        if !self.is_active() {
            return None;
        }
        self.update(point);
        // A stroke without movement has nothing to draw.
        let shape = self
            .preview_shape(style)
            .filter(|shape| !matches!(shape, Shape::Path(path) if path.len() < 2));
        if shape.is_none() {
            log::debug!("discarding empty {:?} gesture", self.current_tool);
        }
        self.cancel();
        shape
    }

    /// Cancel the current gesture.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
        self.pen_points.clear();
    }

    /// Check if a gesture is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// Get the accumulated pen points.
    pub fn pen_points(&self) -> &[Point] {
        &self.pen_points
    }

    /// The shape the current gesture would commit, styled with `style`.
    pub fn preview_shape(&self, style: &StyleConfig) -> Option<Shape> {
        let ToolState::Active { start, current } = self.state else {
            return None;
        };
        match self.current_tool {
            ToolKind::Line => Some(Shape::Line(Line::new(start, current).with_style(style.stroke()))),
            ToolKind::Rectangle => Some(Shape::Rectangle(
                Rectangle::from_corners(start, current)
                    .with_style(style.stroke())
                    .with_fill(style.fill_color, style.fill_pattern),
            )),
            ToolKind::Pen => Some(Shape::Path(
                Path::from_points(self.pen_points.clone()).with_style(style.stroke()),
            )),
            ToolKind::Select | ToolKind::Polygon | ToolKind::Text => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{FillPattern, SerializableColor};

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Select);

        tm.set_tool(ToolKind::Rectangle);
        assert_eq!(tm.current_tool, ToolKind::Rectangle);
    }

    #[test]
    fn test_tool_interaction() {
        let style = StyleConfig::default();
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);

        assert!(!tm.is_active());

        tm.begin(Point::new(0.0, 0.0));
        assert!(tm.is_active());

        tm.update(Point::new(50.0, 50.0));
        assert!(tm.preview_shape(&style).is_some());

        let shape = tm.end(Point::new(100.0, 100.0), &style);
        assert!(shape.is_some());
        assert!(!tm.is_active());
    }

    #[test]
    fn test_rectangle_normalized_and_filled() {
        let style = StyleConfig {
            fill_color: SerializableColor::rgb(1, 2, 3),
            fill_pattern: FillPattern::Solid,
            ..StyleConfig::default()
        };
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);
        tm.begin(Point::new(50.0, 50.0));
        tm.update(Point::new(30.0, 30.0));

        let Some(Shape::Rectangle(rect)) = tm.end(Point::new(10.0, 10.0), &style) else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.position, Point::new(10.0, 10.0));
        assert!((rect.width - 40.0).abs() < f64::EPSILON);
        assert!((rect.height - 40.0).abs() < f64::EPSILON);
        assert_eq!(rect.fill_color, SerializableColor::rgb(1, 2, 3));
        assert_eq!(rect.fill_pattern, FillPattern::Solid);
    }

    #[test]
    fn test_line_uses_release_point() {
        let style = StyleConfig::default();
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);
        tm.begin(Point::new(1.0, 1.0));
        let Some(Shape::Line(line)) = tm.end(Point::new(9.0, 4.0), &style) else {
            panic!("expected a line");
        };
        assert_eq!(line.start, Point::new(1.0, 1.0));
        assert_eq!(line.end, Point::new(9.0, 4.0));
    }

    #[test]
    fn test_pen_collects_points() {
        let style = StyleConfig::default();
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Pen);
        tm.begin(Point::new(0.0, 0.0));
        tm.update(Point::new(1.0, 1.0));
        tm.update(Point::new(1.0, 1.0));
        tm.update(Point::new(2.0, 3.0));
        assert_eq!(tm.pen_points().len(), 3);

        let Some(Shape::Path(path)) = tm.end(Point::new(2.0, 3.0), &style) else {
            panic!("expected a path");
        };
        assert_eq!(path.subpaths.len(), 1);
        assert_eq!(path.subpaths[0].len(), 3);
    }

    #[test]
    fn test_pen_click_without_movement_is_discarded() {
        let style = StyleConfig::default();
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Pen);
        tm.begin(Point::new(5.0, 5.0));
        assert!(tm.preview_shape(&style).is_some());
        assert!(tm.end(Point::new(5.0, 5.0), &style).is_none());
        assert!(!tm.is_active());
    }

    #[test]
    fn test_cancel_interaction() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);

        tm.begin(Point::new(0.0, 0.0));
        assert!(tm.is_active());

        tm.cancel();
        assert!(!tm.is_active());
    }

    #[test]
    fn test_select_tool_no_shape() {
        let style = StyleConfig::default();
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Select);

        tm.begin(Point::new(0.0, 0.0));
        assert!(tm.end(Point::new(100.0, 100.0), &style).is_none());
    }
}
