//! In-place text editing.

use crate::document::Document;
use crate::input::{Key, Modifiers};
use crate::shapes::{Shape, ShapeId, ShapeTrait, Text};

/// The text currently being edited. At most one exists at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum TextEdit {
    /// A new text, held here until it is committed.
    New(Text),
    /// A committed text edited in place.
    Existing {
        id: ShapeId,
        /// Content when editing began.
        original: String,
    },
}

/// How a key press affected the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKeyOutcome {
    /// The content changed.
    Edited,
    /// The edit should be finalized.
    Finalize,
    /// The key belongs to the text but changed nothing.
    Unchanged,
    /// The key is not for the text.
    Ignored,
}

impl TextEdit {
    /// Start editing the committed text `id`.
    pub fn existing(document: &Document, id: ShapeId) -> Option<Self> {
        let text = document.get_shape(id).and_then(Shape::as_text)?;
        Some(TextEdit::Existing {
            id,
            original: text.content.clone(),
        })
    }

    /// Id of the text under edit.
    pub fn id(&self) -> ShapeId {
        match self {
            TextEdit::New(text) => text.id(),
            TextEdit::Existing { id, .. } => *id,
        }
    }

    /// Whether the text is not in the document yet.
    pub fn is_new(&self) -> bool {
        matches!(self, TextEdit::New(_))
    }

    /// The text under edit.
    pub fn text<'a>(&'a self, document: &'a Document) -> Option<&'a Text> {
        match self {
            TextEdit::New(text) => Some(text),
            TextEdit::Existing { id, .. } => document.get_shape(*id).and_then(Shape::as_text),
        }
    }

    /// The text under edit, mutably.
    pub fn text_mut<'a>(&'a mut self, document: &'a mut Document) -> Option<&'a mut Text> {
        match self {
            TextEdit::New(text) => Some(text),
            TextEdit::Existing { id, .. } => {
                document.get_shape_mut(*id).and_then(Shape::as_text_mut)
            }
        }
    }

    /// Apply a key press to `text`.
    ///
    /// Enter finalizes unless Shift is held, in which case it breaks the
    /// line. Escape finalizes. Characters typed with Ctrl or Meta are left
    /// for shortcuts; every other key is taken by the text.
    pub fn apply_key(text: &mut Text, key: Key, modifiers: Modifiers) -> TextKeyOutcome {
        match key {
            Key::Enter if modifiers.shift => {
                text.content.push('\n');
                TextKeyOutcome::Edited
            }
            Key::Enter | Key::Escape => TextKeyOutcome::Finalize,
            Key::Backspace => {
                text.content.pop();
                TextKeyOutcome::Edited
            }
            Key::Char(c) if !modifiers.command() && !c.is_control() => {
                text.content.push(c);
                TextKeyOutcome::Edited
            }
            Key::Char(_) if modifiers.command() => TextKeyOutcome::Ignored,
            Key::Char(_) | Key::Delete => TextKeyOutcome::Unchanged,
        }
    }
}
