//! Inkpad Core Library
//!
//! Editing engine for the inkpad vector drawing editor: the document model,
//! drawing tools, undo/redo and the JSON file format. Rendering and windowing
//! live outside this crate.

pub mod canvas;
pub mod config;
pub mod document;
pub mod event_handler;
pub mod history;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod style;
pub mod tools;

pub use canvas::{Canvas, Preview};
pub use config::EditorConfig;
pub use document::Document;
pub use history::{Command, CommandStack};
pub use input::{InputEvent, Key, Modifiers};
pub use selection::{DisplayStroke, MultiMoveState, SelectionRect, display_stroke};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use style::{FontChange, StyleConfig};
pub use tools::{ToolKind, ToolManager};
