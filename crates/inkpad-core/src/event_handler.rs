//! Event handling for tool interactions.

use crate::canvas::Canvas;
use crate::history::Command;
use crate::input::{InputEvent, Key, Modifiers};
use crate::selection::{MultiMoveState, SelectionRect};
use crate::shapes::{Polygon, Shape, ShapeTrait, Text};
use crate::tools::{PolygonClick, TextEdit, TextKeyOutcome, ToolKind};
use kurbo::Point;

impl Canvas {
    /// Dispatch one input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown {
                position,
                modifiers,
            } => self.handle_press(position, modifiers),
            InputEvent::PointerMove { position } => self.handle_drag(position),
            InputEvent::PointerUp { position } => self.handle_release(position),
            InputEvent::KeyPress { key, modifiers } => self.handle_key(key, modifiers),
            InputEvent::Resize { width, height } => self.set_viewport_size(width, height),
        }
    }

    /// Handle a pointer press.
    pub fn handle_press(&mut self, point: Point, modifiers: Modifiers) {
        match self.tool() {
            ToolKind::Select => self.press_select(point, modifiers),
            ToolKind::Pen | ToolKind::Line | ToolKind::Rectangle => self.tool_manager.begin(point),
            ToolKind::Polygon => self.press_polygon(point),
            ToolKind::Text => self.press_text(point),
        }
    }

    /// Handle pointer motion, pressed or not.
    pub fn handle_drag(&mut self, point: Point) {
        if let Some(drag) = &mut self.multi_move {
            drag.current_point = point;
        } else if let Some(band) = &mut self.selection_rect {
            band.current = point;
        } else if self.tool_manager.is_active() {
            self.tool_manager.update(point);
        } else {
            self.polygon.hover(point);
        }
    }

    /// Handle a pointer release, committing the gesture in progress.
    pub fn handle_release(&mut self, point: Point) {
        if let Some(mut drag) = self.multi_move.take() {
            drag.current_point = point;
            for (id, old, new) in drag.moves() {
                self.execute(Command::move_shape(id, old, new));
            }
        }

        if let Some(mut band) = self.selection_rect.take() {
            band.current = point;
            self.selection = band.pick(self.document());
        }

        if self.tool_manager.is_active() {
            if let Some(shape) = self.tool_manager.end(point, &self.style) {
                self.execute(Command::add(shape));
            }
        }
    }

    /// Handle a key press. Text under edit gets first pick.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        if self.key_to_text(key, modifiers) {
            return;
        }

        if modifiers.command() {
            if let Key::Char(c) = key {
                match c.to_ascii_lowercase() {
                    'z' if modifiers.shift => {
                        self.redo();
                    }
                    'z' => {
                        self.undo();
                    }
                    'y' => {
                        self.redo();
                    }
                    'a' => self.select_all(),
                    _ => {}
                }
            }
            return;
        }

        match key {
            Key::Escape => self.cancel_interaction(),
            Key::Delete | Key::Backspace => self.delete_selected(),
            Key::Enter | Key::Char(_) => {}
        }
    }

    fn press_select(&mut self, point: Point, modifiers: Modifiers) {
        let hit = self
            .document()
            .shape_at_point(point, self.config.hit_tolerance);

        let Some(id) = hit else {
            self.clear_selection();
            self.selection_rect = Some(SelectionRect::new(point));
            return;
        };

        if modifiers.command() {
            self.toggle_selection(id);
        } else {
            self.select(id);
        }
        if !self.selection.is_empty() {
            self.multi_move = Some(MultiMoveState::new(point, &self.selection, self.document()));
        }
    }

    fn press_polygon(&mut self, point: Point) {
        let tolerance = self.config.polygon_close_tolerance;
        if let PolygonClick::Closed(vertices) = self.polygon.click(point, tolerance) {
            let polygon = Polygon::new(vertices).with_style(self.style.stroke());
            self.execute(Command::add(Shape::Polygon(polygon)));
        }
    }

    fn press_text(&mut self, point: Point) {
        let tolerance = self.config.hit_tolerance;
        if self
            .editing_text()
            .is_some_and(|text| text.hit_test(point, tolerance))
        {
            return;
        }
        self.finalize_text_edit();

        let hit = self
            .document()
            .shape_at_point(point, tolerance)
            .filter(|id| self.document().get_shape(*id).is_some_and(Shape::is_text));

        self.text_edit = match hit {
            Some(id) => TextEdit::existing(self.document(), id),
            None => {
                let text = Text::new(point, String::new())
                    .with_font(self.style.font.clone())
                    .with_color(self.style.text_color);
                Some(TextEdit::New(text))
            }
        };
    }

    /// Route a key to the text under edit. Returns false if the key is not
    /// for the text.
    fn key_to_text(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let outcome = {
            let (text_edit, document) = self.text_parts();
            let Some(edit) = text_edit else {
                return false;
            };
            let is_new = edit.is_new();
            match edit.text_mut(document) {
                Some(text) => (TextEdit::apply_key(text, key, modifiers), is_new),
                None => return false,
            }
        };

        match outcome {
            (TextKeyOutcome::Edited, is_new) => {
                self.untracked_changes |= !is_new;
                true
            }
            (TextKeyOutcome::Finalize, _) => {
                self.finalize_text_edit();
                true
            }
            (TextKeyOutcome::Unchanged, _) => true,
            (TextKeyOutcome::Ignored, _) => false,
        }
    }
}
