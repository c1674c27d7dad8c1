//! Reversible document mutations and the undo/redo stack.

use crate::document::Document;
use crate::shapes::{SerializableColor, Shape, ShapeId};
use kurbo::Point;

/// A reversible unit of document mutation.
///
/// Commands own the shape payload whenever it is not a member of the
/// document: an undone `AddShape` or an applied `RemoveShape` holds the shape
/// until it moves back.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a shape on top of the document.
    AddShape {
        id: ShapeId,
        detached: Option<Shape>,
    },
    /// Remove a shape, remembering where it was painted.
    RemoveShape {
        id: ShapeId,
        index: usize,
        detached: Option<Shape>,
    },
    /// Move a shape's anchor from `old` to `new`.
    MoveShape { id: ShapeId, old: Point, new: Point },
    /// Change the color of a text shape.
    RecolorText {
        id: ShapeId,
        old: SerializableColor,
        new: SerializableColor,
    },
}

impl Command {
    /// Add `shape` when executed.
    pub fn add(shape: Shape) -> Self {
        Command::AddShape {
            id: shape.id(),
            detached: Some(shape),
        }
    }

    /// Remove the shape with `id` when executed.
    pub fn remove(id: ShapeId) -> Self {
        Command::RemoveShape {
            id,
            index: 0,
            detached: None,
        }
    }

    /// Move the shape with `id` from `old` to `new`.
    pub fn move_shape(id: ShapeId, old: Point, new: Point) -> Self {
        Command::MoveShape { id, old, new }
    }

    /// Recolor the text with `id` from `old` to `new`.
    pub fn recolor_text(id: ShapeId, old: SerializableColor, new: SerializableColor) -> Self {
        Command::RecolorText { id, old, new }
    }

    /// The shape this command targets.
    pub fn target(&self) -> ShapeId {
        match self {
            Command::AddShape { id, .. }
            | Command::RemoveShape { id, .. }
            | Command::MoveShape { id, .. }
            | Command::RecolorText { id, .. } => *id,
        }
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Command::AddShape { .. } => "add shape",
            Command::RemoveShape { .. } => "remove shape",
            Command::MoveShape { .. } => "move shape",
            Command::RecolorText { .. } => "recolor text",
        }
    }

    /// Perform the forward action.
    pub fn apply(&mut self, document: &mut Document) {
        match self {
            Command::AddShape { id, detached } => match detached.take() {
                Some(shape) => {
                    if !document.add_shape(shape) {
                        log::warn!("add shape: {id} is already in the document");
                    }
                }
                None => log::warn!("add shape: no payload for {id}"),
            },
            Command::RemoveShape {
                id,
                index,
                detached,
            } => match document.remove_shape(*id) {
                Some((at, shape)) => {
                    *index = at;
                    *detached = Some(shape);
                }
                None => log::warn!("remove shape: {id} is not in the document"),
            },
            Command::MoveShape { id, new, .. } => set_position(document, *id, *new),
            Command::RecolorText { id, new, .. } => set_text_color(document, *id, *new),
        }
    }

    /// Perform the inverse action.
    pub fn revert(&mut self, document: &mut Document) {
        match self {
            Command::AddShape { id, detached } => match document.remove_shape(*id) {
                Some((_, shape)) => *detached = Some(shape),
                None => log::warn!("undo add shape: {id} is not in the document"),
            },
            Command::RemoveShape {
                id,
                index,
                detached,
            } => match detached.take() {
                Some(shape) => {
                    document.insert_shape(*index, shape);
                }
                None => log::warn!("undo remove shape: no payload for {id}"),
            },
            Command::MoveShape { id, old, .. } => set_position(document, *id, *old),
            Command::RecolorText { id, old, .. } => set_text_color(document, *id, *old),
        }
    }
}

fn set_position(document: &mut Document, id: ShapeId, position: Point) {
    match document.get_shape_mut(id) {
        Some(shape) => shape.set_position(position),
        None => log::warn!("move shape: {id} is not in the document"),
    }
}

fn set_text_color(document: &mut Document, id: ShapeId, color: SerializableColor) {
    match document.get_shape_mut(id).and_then(Shape::as_text_mut) {
        Some(text) => text.color = color,
        None => log::warn!("recolor text: {id} is not a text in the document"),
    }
}

#[derive(Debug, Clone)]
struct Entry {
    serial: u64,
    command: Command,
}

/// Undo and redo histories.
///
/// Executing a new command discards the redo history. Both histories are
/// unbounded.
#[derive(Debug, Clone, Default)]
pub struct CommandStack {
    undo_stack: Vec<Entry>,
    redo_stack: Vec<Entry>,
    next_serial: u64,
    /// Serial of the top undo entry when the document was last saved.
    clean: Option<u64>,
}

impl CommandStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `command` and record it.
    pub fn execute(&mut self, mut command: Command, document: &mut Document) {
        command.apply(document);
        log::debug!("execute {} ({})", command.label(), command.target());
        let serial = self.next_serial;
        self.next_serial += 1;
        self.undo_stack.push(Entry { serial, command });
        self.redo_stack.clear();
    }

    /// Undo the last command. Returns false if there was nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        let Some(mut entry) = self.undo_stack.pop() else {
            return false;
        };
        entry.command.revert(document);
        log::debug!("undo {} ({})", entry.command.label(), entry.command.target());
        self.redo_stack.push(entry);
        true
    }

    /// Redo the last undone command. Returns false if there was nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        let Some(mut entry) = self.redo_stack.pop() else {
            return false;
        };
        entry.command.apply(document);
        log::debug!("redo {} ({})", entry.command.label(), entry.command.target());
        self.undo_stack.push(entry);
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable commands.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable commands.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// The most recent undoable command.
    pub fn last(&self) -> Option<&Command> {
        self.undo_stack.last().map(|entry| &entry.command)
    }

    /// Drop both histories. The current state counts as clean.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.clean = None;
    }

    /// Record the current state as saved.
    pub fn mark_clean(&mut self) {
        self.clean = self.top_serial();
    }

    /// Whether the document differs from the last saved state.
    pub fn is_dirty(&self) -> bool {
        self.top_serial() != self.clean
    }

    fn top_serial(&self) -> Option<u64> {
        self.undo_stack.last().map(|entry| entry.serial)
    }
}
