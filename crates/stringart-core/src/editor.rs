//! Editor state and input handling.

use crate::document::{DocumentError, SceneDocument};
use crate::input::{EditorEvent, EditorKey};
use crate::scene::{Direction, Scene};
use crate::selection::Selection;
use crate::settings::EditorSettings;
use crate::shapes::{EntityRef, Fan, FanId, Line, LineId, Side, StringColor};
use crate::snap::{SnapContext, snap_point};
use crate::vector::Vector;

/// Interaction mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Clicks place lines.
    #[default]
    Draw,
    /// Clicks select, handles drag endpoints.
    Select,
}

/// Progress of the line being drawn in [`Mode::Draw`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawState {
    #[default]
    Idle,
    /// `p2` of `line` follows the pointer until the next click. `fan` is the
    /// fan created along with it, if a line was selected at the time.
    DrawingLine { line: LineId, fan: Option<FanId> },
}

/// Everything the editor knows: the scene plus interaction state.
///
/// Input is processed strictly one event at a time; every method leaves the
/// selection pointing at an entity of the scene or at nothing.
#[derive(Debug, Clone)]
pub struct EditorState {
    scene: Scene,
    selection: Selection,
    mode: Mode,
    draw_state: DrawState,
    /// Snapping and defaults.
    pub settings: EditorSettings,
    /// Color given to newly created fans.
    last_color: StringColor,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl EditorState {
    /// Create an editor with an empty scene, in Draw mode.
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            scene: Scene::new(),
            selection: Selection::None,
            mode: Mode::default(),
            draw_state: DrawState::default(),
            last_color: settings.default_color,
            settings,
        }
    }

    /// Create an editor around an existing scene.
    pub fn with_scene(scene: Scene, settings: EditorSettings) -> Self {
        Self {
            scene,
            ..Self::new(settings)
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn draw_state(&self) -> DrawState {
        self.draw_state
    }

    pub fn last_color(&self) -> StringColor {
        self.last_color
    }

    pub(crate) fn set_last_color(&mut self, color: StringColor) {
        self.last_color = color;
    }

    pub(crate) fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn assert_selection_valid(&self) {
        assert!(
            self.selection.is_valid_in(&self.scene),
            "selection {:?} is not part of the scene",
            self.selection
        );
    }

    /// Switch modes. Any line being drawn is kept as it is and the selection
    /// is cleared.
    pub fn set_mode(&mut self, mode: Mode) {
        if let DrawState::DrawingLine { line, .. } = self.draw_state {
            log::debug!("Mode change finishes {line}");
        }
        self.draw_state = DrawState::Idle;
        self.deselect();
        self.mode = mode;
        log::debug!("Mode set to {mode:?}");
    }

    // --- scene operations -------------------------------------------------

    /// Start a new zero-length line at `point`.
    ///
    /// If a line is selected, a fan from it to the new line is created too.
    pub fn add_line(&mut self, point: Vector) -> LineId {
        let id = self.scene.add_line(Line::degenerate(point));
        let fan = self
            .selection
            .line()
            .filter(|&selected| self.scene.line(selected).is_some())
            .map(|selected| {
                let num_nails = Fan::default_num_nails(0.0, self.settings.nail_distance);
                self.scene.add_fan(Fan::new(
                    selected,
                    id,
                    self.last_color,
                    self.settings.default_stroke_width,
                    num_nails,
                ))
            });
        self.draw_state = DrawState::DrawingLine { line: id, fan };
        id
    }

    /// Move the head of the line being drawn. No-op when not drawing.
    ///
    /// The fan created with the line keeps its nail count in step with the
    /// line's length.
    pub fn update_last_line_endpoint(&mut self, point: Vector) -> bool {
        let DrawState::DrawingLine { line, fan } = self.draw_state else {
            return false;
        };
        let Some(l) = self.scene.line_mut(line) else {
            return false;
        };
        l.p2 = point;
        let length = l.length();
        if let Some(fan) = fan.and_then(|id| self.scene.fan_mut(id)) {
            fan.num_nails = Fan::default_num_nails(length, self.settings.nail_distance);
        }
        true
    }

    /// Finish the line being drawn and select it.
    fn finish_line(&mut self) {
        if let DrawState::DrawingLine { line, .. } = self.draw_state {
            self.draw_state = DrawState::Idle;
            if self.scene.line(line).is_none() {
                return;
            }
            self.select(EntityRef::Line(line));
            log::debug!("Finished {line}");
        }
    }

    /// Drop the line being drawn together with its fan.
    fn abandon_line(&mut self) {
        if let DrawState::DrawingLine { line, .. } = self.draw_state {
            self.draw_state = DrawState::Idle;
            self.scene.remove_line(line);
            log::debug!("Abandoned {line}");
        }
    }

    /// Select an entity, replacing any previous selection.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not part of the scene.
    pub fn select(&mut self, entity: EntityRef) {
        self.selection = Selection::from(entity);
        self.assert_selection_valid();
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selection = Selection::None;
    }

    /// Delete the selected entity; deleting a line also deletes its fans.
    pub fn delete_selection(&mut self) -> bool {
        let Some(entity) = self.selection.entity() else {
            return false;
        };
        let removed = self.scene.remove(entity);
        self.selection = Selection::None;
        self.release_removed_draw_line();
        removed
    }

    /// Stop drawing if the line being drawn has left the scene.
    fn release_removed_draw_line(&mut self) {
        let DrawState::DrawingLine { line, .. } = self.draw_state else {
            return;
        };
        if self.scene.line(line).is_none() {
            log::debug!("{line} was removed while being drawn");
            self.draw_state = DrawState::Idle;
        }
    }

    /// Move the selected entity one step within its z-order.
    pub fn move_selection(&mut self, direction: Direction) -> bool {
        self.selection
            .entity()
            .is_some_and(|entity| self.scene.move_entity(entity, direction))
    }

    /// See [`Scene::next_line_in_stack`].
    pub fn next_line_in_stack(&self, point: Vector, current: Option<LineId>) -> LineId {
        self.scene.next_line_in_stack(point, current)
    }

    /// Remove everything from the scene.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.selection = Selection::None;
        self.draw_state = DrawState::Idle;
    }

    /// Snap `point` as a new position of `side` of `line`.
    fn snap_endpoint(&self, line: LineId, side: Side, point: Vector) -> Vector {
        let fixed = self.scene.line(line).map(|l| l.endpoint(side.opposite()));
        let ctx = SnapContext {
            scene: &self.scene,
            settings: &self.settings,
            editing: Some(line),
            fixed,
            selected: self.selection.line(),
        };
        snap_point(point, &ctx).point
    }

    /// Drag one endpoint of a line, snapping it. Returns the applied position.
    pub fn drag_endpoint(&mut self, line: LineId, side: Side, to: Vector) -> Option<Vector> {
        self.scene.line(line)?;
        let snapped = self.snap_endpoint(line, side, to);
        self.scene.line_mut(line)?.set_endpoint(side, snapped);
        Some(snapped)
    }

    // --- documents --------------------------------------------------------

    /// Snapshot the scene as a persistable document.
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument::from_scene(&self.scene)
    }

    /// Replace the whole scene with a loaded document.
    ///
    /// The selection and any drawing in progress are cleared. On error the
    /// current scene is left untouched.
    pub fn load_document(&mut self, document: &SceneDocument) -> Result<(), DocumentError> {
        self.scene = document.to_scene()?;
        self.selection = Selection::None;
        self.draw_state = DrawState::Idle;
        Ok(())
    }

    // --- event dispatch ---------------------------------------------------

    /// Process one input event. Returns true if anything changed.
    pub fn handle_event(&mut self, event: EditorEvent) -> bool {
        let changed = match (self.mode, event) {
            (_, EditorEvent::Key(key)) => self.on_key(key),
            (Mode::Draw, EditorEvent::PointerClick(point)) => self.on_draw_click(point),
            (Mode::Draw, EditorEvent::PointerMove(point)) => self.on_draw_move(point),
            (Mode::Draw, EditorEvent::DragEndpoint { .. }) => false,
            (Mode::Select, EditorEvent::PointerClick(point)) => self.on_select_click(point),
            (Mode::Select, EditorEvent::PointerMove(_)) => false,
            (Mode::Select, EditorEvent::DragEndpoint { line, side, to }) => {
                self.drag_endpoint(line, side, to).is_some()
            }
        };
        self.assert_selection_valid();
        changed
    }

    fn on_key(&mut self, key: EditorKey) -> bool {
        match key {
            EditorKey::Delete => {
                if matches!(self.draw_state, DrawState::DrawingLine { .. }) {
                    self.abandon_line();
                    return true;
                }
                self.delete_selection()
            }
            EditorKey::Escape => {
                if matches!(self.draw_state, DrawState::DrawingLine { .. }) {
                    self.abandon_line();
                    return true;
                }
                let had_selection = !self.selection.is_none();
                self.deselect();
                had_selection
            }
            EditorKey::Forward => self.move_selection(Direction::Forward),
            EditorKey::Backward => self.move_selection(Direction::Backward),
        }
    }

    fn on_draw_click(&mut self, point: Vector) -> bool {
        match self.draw_state {
            DrawState::Idle => {
                let ctx = SnapContext {
                    scene: &self.scene,
                    settings: &self.settings,
                    editing: None,
                    fixed: None,
                    selected: self.selection.line(),
                };
                let start = snap_point(point, &ctx).point;
                self.add_line(start);
            }
            DrawState::DrawingLine { line, .. } => {
                let end = self.snap_endpoint(line, Side::P2, point);
                self.update_last_line_endpoint(end);
                self.finish_line();
            }
        }
        true
    }

    fn on_draw_move(&mut self, point: Vector) -> bool {
        let DrawState::DrawingLine { line, .. } = self.draw_state else {
            return false;
        };
        let end = self.snap_endpoint(line, Side::P2, point);
        self.update_last_line_endpoint(end)
    }

    fn on_select_click(&mut self, point: Vector) -> bool {
        let tolerance = self.settings.hit_tolerance;

        let nail = point
            .closest_point(self.scene.lines().flat_map(|(_, line)| line.endpoints()))
            .filter(|nail| nail.distance(point) <= tolerance);
        if let Some(nail) = nail {
            let id = self.scene.next_line_in_stack(nail, self.selection.line());
            self.select(EntityRef::Line(id));
            return true;
        }

        if let Some(fan) = self.fan_at(point, tolerance) {
            self.select(EntityRef::Fan(fan));
            return true;
        }

        let had_selection = !self.selection.is_none();
        self.deselect();
        had_selection
    }

    /// The frontmost fan with a string within `tolerance` of `point`.
    pub fn fan_at(&self, point: Vector, tolerance: f64) -> Option<FanId> {
        self.scene.fan_ids().iter().rev().copied().find(|&id| {
            let width = self.scene.fan(id).map_or(0.0, |f| f.stroke_width);
            self.scene.fan_strings(id).is_some_and(|strings| {
                strings
                    .iter()
                    .any(|s| s.distance_to(point) <= tolerance + width / 2.0)
            })
        })
    }
}
