//! Scene entities: nail lines and the fans strung between them.

mod fan;
mod line;

pub use fan::{Fan, StringColor, interpolate_strings};
pub use line::{Line, Side};

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a [`Line`] in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(Uuid);

/// Stable identifier of a [`Fan`] in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FanId(Uuid);

impl LineId {
    /// A fresh random id, unique across scenes.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

impl FanId {
    /// A fresh random id, unique across scenes.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line:{}", self.0)
    }
}

impl fmt::Display for FanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fan:{}", self.0)
    }
}

/// A reference to any entity living in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Line(LineId),
    Fan(FanId),
}

impl From<LineId> for EntityRef {
    fn from(id: LineId) -> Self {
        EntityRef::Line(id)
    }
}

impl From<FanId> for EntityRef {
    fn from(id: FanId) -> Self {
        EntityRef::Fan(id)
    }
}
