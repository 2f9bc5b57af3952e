//! Single-slot selection.

use crate::scene::Scene;
use crate::shapes::{EntityRef, FanId, LineId};

/// The current selection: nothing, one line or one fan.
///
/// Holds ids only; it never owns scene data and must be cleared when its
/// target leaves the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Line(LineId),
    Fan(FanId),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn entity(&self) -> Option<EntityRef> {
        match *self {
            Selection::None => None,
            Selection::Line(id) => Some(EntityRef::Line(id)),
            Selection::Fan(id) => Some(EntityRef::Fan(id)),
        }
    }

    pub fn line(&self) -> Option<LineId> {
        match *self {
            Selection::Line(id) => Some(id),
            _ => None,
        }
    }

    pub fn fan(&self) -> Option<FanId> {
        match *self {
            Selection::Fan(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_selected(&self, entity: EntityRef) -> bool {
        self.entity() == Some(entity)
    }

    /// Whether the selection points at nothing or at an entity of `scene`.
    pub fn is_valid_in(&self, scene: &Scene) -> bool {
        self.entity().is_none_or(|entity| scene.contains(entity))
    }
}

impl From<EntityRef> for Selection {
    fn from(entity: EntityRef) -> Self {
        match entity {
            EntityRef::Line(id) => Selection::Line(id),
            EntityRef::Fan(id) => Selection::Fan(id),
        }
    }
}

impl From<Option<EntityRef>> for Selection {
    fn from(entity: Option<EntityRef>) -> Self {
        entity.map_or(Selection::None, Selection::from)
    }
}
