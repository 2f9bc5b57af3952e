//! Input events consumed by the editor.
//!
//! The windowing or DOM layer translates its raw events into these and feeds
//! them to [`EditorState::handle_event`](crate::editor::EditorState::handle_event)
//! one at a time.

use crate::shapes::{LineId, Side};
use crate::vector::Vector;
use serde::{Deserialize, Serialize};

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorKey {
    /// Delete the selection.
    Delete,
    /// Cancel the line being drawn, or deselect.
    Escape,
    /// Move the selection one step towards the front.
    Forward,
    /// Move the selection one step towards the back.
    Backward,
}

impl EditorKey {
    /// Map a key name as reported by winit/the DOM (`KeyboardEvent.key`).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Delete" | "Backspace" => Some(EditorKey::Delete),
            "Escape" => Some(EditorKey::Escape),
            "PageUp" | "]" => Some(EditorKey::Forward),
            "PageDown" | "[" => Some(EditorKey::Backward),
            _ => None,
        }
    }
}

/// A single input event in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// Pointer clicked (pressed and released without dragging).
    PointerClick(Vector),
    /// Pointer moved.
    PointerMove(Vector),
    /// An endpoint handle of `line` is being dragged to `to`.
    DragEndpoint { line: LineId, side: Side, to: Vector },
    Key(EditorKey),
}
