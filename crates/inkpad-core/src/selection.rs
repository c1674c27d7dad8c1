//! Selection interactions: rubber band, multi-shape drag and highlight.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::shapes::{SerializableColor, Shape, ShapeId, StrokeStyle};
use kurbo::{Point, Rect, Vec2};

/// Rubber band rectangle for marquee selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    /// Press position.
    pub start: Point,
    /// Current pointer position.
    pub current: Point,
}

impl SelectionRect {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    /// Get the selection rectangle as a normalized Rect.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.current.x),
            self.start.y.min(self.current.y),
            self.start.x.max(self.current.x),
            self.start.y.max(self.current.y),
        )
    }

    /// Shapes picked by the band. A band without area picks nothing.
    pub fn pick(&self, document: &Document) -> Vec<ShapeId> {
        let rect = self.to_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Vec::new();
        }
        document.shapes_in_rect(rect)
    }
}

/// State for moving the selected shapes at once.
///
/// The document is not touched while dragging; live positions are a preview
/// until the drag is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiMoveState {
    /// Press position.
    pub start_point: Point,
    /// Current pointer position.
    pub current_point: Point,
    /// Anchor position of each dragged shape when the drag began.
    pub origins: Vec<(ShapeId, Point)>,
}

impl MultiMoveState {
    /// Record the current anchor of every shape in `ids` that exists.
    pub fn new(start_point: Point, ids: &[ShapeId], document: &Document) -> Self {
        let origins = ids
            .iter()
            .filter_map(|&id| document.get_shape(id).map(|s| (id, s.position())))
            .collect();
        Self {
            start_point,
            current_point: start_point,
            origins,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Live position of each dragged shape: origin plus delta.
    pub fn live_positions(&self) -> Vec<(ShapeId, Point)> {
        let delta = self.delta();
        self.origins
            .iter()
            .map(|&(id, origin)| (id, origin + delta))
            .collect()
    }

    /// Copies of the dragged shapes at their live positions.
    pub fn preview_shapes(&self, document: &Document) -> Vec<Shape> {
        self.live_positions()
            .into_iter()
            .filter_map(|(id, position)| {
                let mut shape = document.get_shape(id)?.clone();
                shape.set_position(position);
                Some(shape)
            })
            .collect()
    }

    /// Moves to commit: `(id, old, new)` for every shape whose position changed.
    pub fn moves(&self) -> Vec<(ShapeId, Point, Point)> {
        self.origins
            .iter()
            .zip(self.live_positions())
            .filter(|((_, old), (_, new))| old != new)
            .map(|(&(id, old), (_, new))| (id, old, new))
            .collect()
    }
}

/// How the renderer should stroke a shape's outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayStroke {
    pub color: SerializableColor,
    pub width: u32,
    pub dash: StrokeStyle,
}

/// The outline to draw for `shape`: its own stroke, or the highlight stroke
/// from `config` when selected. Text has no outline.
pub fn display_stroke(shape: &Shape, selected: bool, config: &EditorConfig) -> Option<DisplayStroke> {
    let own = shape.stroke()?;
    Some(if selected {
        DisplayStroke {
            color: config.highlight_color,
            width: config.highlight_width,
            dash: config.highlight_dash,
        }
    } else {
        DisplayStroke {
            color: own.stroke_color,
            width: own.stroke_width,
            dash: StrokeStyle::Solid,
        }
    })
}
