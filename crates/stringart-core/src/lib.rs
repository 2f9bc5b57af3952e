//! String Art Core Library
//!
//! Platform-agnostic scene model, string interpolation and snapping for the
//! string art editor. Rendering, dialogs and form widgets live outside this
//! crate and talk to it through [`EditorState`].

pub mod document;
pub mod editor;
pub mod export;
pub mod input;
pub mod properties;
pub mod scene;
pub mod selection;
pub mod settings;
pub mod shapes;
pub mod snap;
pub mod storage;
pub mod vector;

pub use document::{DocumentError, SceneDocument};
pub use editor::{DrawState, EditorState, Mode};
pub use export::{ExportError, to_svg};
pub use input::{EditorEvent, EditorKey};
pub use properties::{LineField, FanField, Properties, PropertyEdit};
pub use scene::{Direction, Scene};
pub use selection::Selection;
pub use settings::{EditorSettings, SettingsError};
pub use shapes::{EntityRef, Fan, FanId, Line, LineId, Side, StringColor};
pub use snap::{SnapContext, SnapKind, SnapResult, snap_point};
pub use storage::{MemoryStorage, Storage, StorageError};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use vector::Vector;
