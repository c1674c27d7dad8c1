//! Editing session: the document plus everything the user is doing to it.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::history::{Command, CommandStack};
use crate::selection::{self, DisplayStroke, MultiMoveState, SelectionRect};
use crate::shapes::{FillPattern, SerializableColor, Shape, ShapeId, ShapeStyle, Text};
use crate::storage::{self, Storage, StorageResult};
use crate::style::{FontChange, StyleConfig};
use crate::tools::{PolygonBuilder, TextEdit, ToolKind, ToolManager};
use kurbo::{Point, Rect, Vec2};
use std::path::Path;

/// Transient geometry the renderer draws on top of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// A pen, line or rectangle gesture in progress.
    Shape(Shape),
    /// A polygon under construction, with the rubber segment to the pointer.
    Polygon {
        vertices: Vec<Point>,
        cursor: Option<Point>,
        style: ShapeStyle,
    },
    /// Marquee selection band.
    RubberBand(Rect),
    /// Selected shapes following the pointer.
    Drag { delta: Vec2, shapes: Vec<Shape> },
}

/// The editor state behind one drawing window.
#[derive(Debug, Clone)]
pub struct Canvas {
    document: Document,
    history: CommandStack,
    pub(crate) tool_manager: ToolManager,
    pub(crate) polygon: PolygonBuilder,
    pub(crate) text_edit: Option<TextEdit>,
    /// Selected shape ids, in selection order.
    pub(crate) selection: Vec<ShapeId>,
    pub(crate) multi_move: Option<MultiMoveState>,
    pub(crate) selection_rect: Option<SelectionRect>,
    pub(crate) style: StyleConfig,
    pub(crate) config: EditorConfig,
    /// Viewport size.
    pub viewport_size: kurbo::Size,
    /// Set when committed text is edited in place, which bypasses history.
    pub(crate) untracked_changes: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create a new canvas with the given tunables.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: Document::new(),
            history: CommandStack::new(),
            tool_manager: ToolManager::new(),
            polygon: PolygonBuilder::new(),
            text_edit: None,
            selection: Vec::new(),
            multi_move: None,
            selection_rect: None,
            style: StyleConfig::default(),
            config,
            viewport_size: kurbo::Size::new(800.0, 600.0),
            untracked_changes: false,
        }
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            ..Self::new()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The text edit and the document it may point into, borrowed together.
    pub(crate) fn text_parts(&mut self) -> (Option<&mut TextEdit>, &mut Document) {
        (self.text_edit.as_mut(), &mut self.document)
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = kurbo::Size::new(width, height);
    }

    // --- tools ---

    /// The active tool.
    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    /// Switch tools. Open constructions are dropped and any text under edit
    /// is finalized. The selection survives.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.finalize_text_edit();
        self.polygon.cancel();
        self.multi_move = None;
        self.selection_rect = None;
        self.tool_manager.set_tool(tool);
        log::debug!("tool set to {tool:?}");
    }

    /// Whether the font controls apply, i.e. the text tool is active.
    pub fn text_toolbar_visible(&self) -> bool {
        self.tool() == ToolKind::Text
    }

    /// Abandon whatever gesture or construction is in progress.
    pub fn cancel_interaction(&mut self) {
        self.tool_manager.cancel();
        self.polygon.cancel();
        self.multi_move = None;
        self.selection_rect = None;
    }

    /// What to draw over the document for the interaction in progress.
    pub fn preview(&self) -> Option<Preview> {
        if let Some(drag) = &self.multi_move {
            let delta = drag.delta();
            if delta != Vec2::ZERO {
                return Some(Preview::Drag {
                    delta,
                    shapes: drag.preview_shapes(&self.document),
                });
            }
            return None;
        }
        if let Some(band) = &self.selection_rect {
            return Some(Preview::RubberBand(band.to_rect()));
        }
        if self.polygon.is_drawing() {
            return Some(Preview::Polygon {
                vertices: self.polygon.vertices().to_vec(),
                cursor: self.polygon.cursor(),
                style: self.style.stroke(),
            });
        }
        self.tool_manager.preview_shape(&self.style).map(Preview::Shape)
    }

    // --- selection ---

    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    /// Select a shape (clears previous selection).
    pub fn select(&mut self, id: ShapeId) {
        self.clear_selection();
        self.add_to_selection(id);
    }

    /// Add to selection. Ids not in the document are ignored.
    pub fn add_to_selection(&mut self, id: ShapeId) {
        if self.document.contains(id) && !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    /// Add `id` if unselected, drop it otherwise.
    pub fn toggle_selection(&mut self, id: ShapeId) {
        if let Some(index) = self.selection.iter().position(|s| *s == id) {
            self.selection.remove(index);
        } else {
            self.add_to_selection(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select all shapes.
    pub fn select_all(&mut self) {
        self.selection = self.document.ids().to_vec();
    }

    /// Delete selected shapes, one undoable command each.
    pub fn delete_selected(&mut self) {
        self.finalize_text_edit();
        self.multi_move = None;
        for id in std::mem::take(&mut self.selection) {
            self.execute(Command::remove(id));
        }
    }

    /// Outline to draw for a document shape, if it has one.
    pub fn display_stroke(&self, id: ShapeId) -> Option<DisplayStroke> {
        let shape = self.document.get_shape(id)?;
        selection::display_stroke(shape, self.is_selected(id), &self.config)
    }

    // --- history ---

    /// Apply a command and record it for undo.
    pub fn execute(&mut self, command: Command) {
        self.history.execute(command, &mut self.document);
    }

    /// Undo the last command. Text under edit is finalized first.
    pub fn undo(&mut self) -> bool {
        self.finalize_text_edit();
        self.multi_move = None;
        self.selection_rect = None;
        let undone = self.history.undo(&mut self.document);
        self.prune();
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.finalize_text_edit();
        self.multi_move = None;
        self.selection_rect = None;
        let redone = self.history.redo(&mut self.document);
        self.prune();
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &CommandStack {
        &self.history
    }

    /// Forget selection and edit state for shapes that left the document.
    fn prune(&mut self) {
        let document = &self.document;
        self.selection.retain(|id| document.contains(*id));
        if let Some(TextEdit::Existing { id, .. }) = &self.text_edit {
            if !document.contains(*id) {
                self.text_edit = None;
            }
        }
    }

    // --- text editing ---

    /// The text under edit, committed or not.
    pub fn editing_text(&self) -> Option<&Text> {
        self.text_edit.as_ref()?.text(&self.document)
    }

    /// Finish the text under edit.
    ///
    /// New text is committed unless blank. Committed text that was emptied
    /// gets its content back and is then removed, so undo restores it.
    pub fn finalize_text_edit(&mut self) {
        let Some(edit) = self.text_edit.take() else {
            return;
        };
        match edit {
            TextEdit::New(text) => {
                if text.is_blank() {
                    log::debug!("discarding empty text");
                } else {
                    self.execute(Command::add(Shape::Text(text)));
                }
            }
            TextEdit::Existing { id, original } => {
                let Some(text) = self.document.get_shape_mut(id).and_then(Shape::as_text_mut)
                else {
                    return;
                };
                if text.is_blank() {
                    text.content = original;
                    self.execute(Command::remove(id));
                    self.selection.retain(|s| *s != id);
                }
            }
        }
    }

    // --- style ---

    pub fn set_pen_color(&mut self, color: SerializableColor) {
        self.style.stroke_color = color;
    }

    pub fn set_pen_width(&mut self, width: u32) {
        self.style.stroke_width = width;
    }

    pub fn set_brush_color(&mut self, color: SerializableColor) {
        self.style.fill_color = color;
    }

    pub fn set_brush_pattern(&mut self, pattern: FillPattern) {
        self.style.fill_pattern = pattern;
    }

    /// Set the text color for new text and the text under edit, and recolor
    /// every other selected text through history.
    pub fn set_text_color(&mut self, color: SerializableColor) {
        self.style.text_color = color;

        let editing = self.text_edit.as_ref().map(TextEdit::id);
        if let Some(edit) = self.text_edit.as_mut() {
            let is_new = edit.is_new();
            if let Some(text) = edit.text_mut(&mut self.document) {
                if text.color != color {
                    text.color = color;
                    self.untracked_changes |= !is_new;
                }
            }
        }

        let recolors: Vec<Command> = self
            .selection
            .iter()
            .filter(|id| Some(**id) != editing)
            .filter_map(|&id| {
                let text = self.document.get_shape(id)?.as_text()?;
                (text.color != color).then(|| Command::recolor_text(id, text.color, color))
            })
            .collect();
        for command in recolors {
            self.execute(command);
        }
    }

    /// Apply a font control change to the style and the text under edit.
    /// Sizes that are not finite and positive are ignored.
    pub fn apply_font_change(&mut self, change: FontChange) {
        if !change.is_valid() {
            log::debug!("ignoring font change {change:?}");
            return;
        }
        change.apply(&mut self.style.font);
        if let Some(edit) = self.text_edit.as_mut() {
            let is_new = edit.is_new();
            if let Some(text) = edit.text_mut(&mut self.document) {
                change.apply(&mut text.font);
                self.untracked_changes |= !is_new;
            }
        }
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.apply_font_change(FontChange::Family(family.into()));
    }

    pub fn set_font_size(&mut self, point_size: f64) {
        self.apply_font_change(FontChange::Size(point_size));
    }

    pub fn set_bold(&mut self, on: bool) {
        self.apply_font_change(FontChange::Bold(on));
    }

    pub fn set_italic(&mut self, on: bool) {
        self.apply_font_change(FontChange::Italic(on));
    }

    pub fn set_underline(&mut self, on: bool) {
        self.apply_font_change(FontChange::Underline(on));
    }

    // --- files ---

    /// Start over with an empty document and no history.
    pub fn new_document(&mut self) {
        self.replace_document(Document::new());
    }

    /// Whether there are changes since the last save or load.
    pub fn is_dirty(&self) -> bool {
        self.history.is_dirty() || self.untracked_changes
    }

    /// Save under `name`. Text under edit is finalized first.
    pub fn save_to(&mut self, storage: &dyn Storage, name: &str) -> StorageResult<()> {
        self.finalize_text_edit();
        storage.save(name, &self.document)?;
        self.mark_saved();
        log::info!("saved {} shapes as {name:?}", self.document.len());
        Ok(())
    }

    /// Load `name`, replacing the document. On error nothing changes.
    pub fn load_from(&mut self, storage: &dyn Storage, name: &str) -> StorageResult<()> {
        let document = storage.load(name)?;
        self.replace_document(document);
        Ok(())
    }

    /// Save to a file path.
    pub fn save_file(&mut self, path: &Path) -> StorageResult<()> {
        self.finalize_text_edit();
        storage::save_path(path, &self.document)?;
        self.mark_saved();
        Ok(())
    }

    /// Load from a file path. On error nothing changes.
    pub fn load_file(&mut self, path: &Path) -> StorageResult<()> {
        let document = storage::load_path(path)?;
        self.replace_document(document);
        Ok(())
    }

    fn mark_saved(&mut self) {
        self.history.mark_clean();
        self.untracked_changes = false;
    }

    fn replace_document(&mut self, document: Document) {
        self.text_edit = None;
        self.cancel_interaction();
        self.selection.clear();
        self.document = document;
        self.history.clear();
        self.untracked_changes = false;
    }
}
