//! Scene store: the ordered collections of lines and fans.

use crate::shapes::{EntityRef, Fan, FanId, Line, LineId, Side};
use crate::vector::Vector;
use kurbo::Rect;
use std::collections::HashMap;

/// Direction for moving an entity within its z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the front (later in render order).
    Forward,
    /// Towards the back (earlier in render order).
    Backward,
}

/// All lines and fans of a composition.
///
/// Entities live in id-keyed arenas; the order vectors are the render and
/// hit-test z-order (back to front). Every fan's boundary lines are present
/// in the line arena at all times.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    lines: HashMap<LineId, Line>,
    line_order: Vec<LineId>,
    fans: HashMap<FanId, Fan>,
    fan_order: Vec<FanId>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line on top of the line z-order.
    pub fn add_line(&mut self, line: Line) -> LineId {
        let id = LineId::new();
        self.lines.insert(id, line);
        self.line_order.push(id);
        log::debug!("Added {id} at {:?}", line.p1);
        id
    }

    /// Append a fan on top of the fan z-order.
    ///
    /// # Panics
    ///
    /// Panics if either boundary line is not in the scene.
    pub fn add_fan(&mut self, fan: Fan) -> FanId {
        assert!(
            self.lines.contains_key(&fan.line1) && self.lines.contains_key(&fan.line2),
            "fan boundary lines must be part of the scene"
        );
        let id = FanId::new();
        log::debug!("Added {id} between {} and {}", fan.line1, fan.line2);
        self.fans.insert(id, fan);
        self.fan_order.push(id);
        id
    }

    /// Look up a line; `None` once it has been removed.
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// Mutable access to a line. Fans pick up the change on their next
    /// geometry query.
    pub fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.get_mut(&id)
    }

    /// Look up a fan; `None` once it has been removed.
    pub fn fan(&self, id: FanId) -> Option<&Fan> {
        self.fans.get(&id)
    }

    /// Mutable access to a fan's style and nail count.
    pub fn fan_mut(&mut self, id: FanId) -> Option<&mut Fan> {
        self.fans.get_mut(&id)
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Line(id) => self.lines.contains_key(&id),
            EntityRef::Fan(id) => self.fans.contains_key(&id),
        }
    }

    /// Line ids in z-order (back to front).
    pub fn line_ids(&self) -> &[LineId] {
        &self.line_order
    }

    /// Fan ids in z-order (back to front).
    pub fn fan_ids(&self) -> &[FanId] {
        &self.fan_order
    }

    /// Lines in z-order (back to front).
    pub fn lines(&self) -> impl Iterator<Item = (LineId, &Line)> {
        self.line_order
            .iter()
            .filter_map(|id| self.lines.get(id).map(|line| (*id, line)))
    }

    /// Fans in z-order (back to front).
    pub fn fans(&self) -> impl Iterator<Item = (FanId, &Fan)> {
        self.fan_order
            .iter()
            .filter_map(|id| self.fans.get(id).map(|fan| (*id, fan)))
    }

    pub fn line_count(&self) -> usize {
        self.line_order.len()
    }

    pub fn fan_count(&self) -> usize {
        self.fan_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_order.is_empty() && self.fan_order.is_empty()
    }

    /// Position of a line in the line z-order.
    pub fn line_index(&self, id: LineId) -> Option<usize> {
        self.line_order.iter().position(|&l| l == id)
    }

    /// The strings of a fan, resolved against the current boundary lines.
    pub fn fan_strings(&self, id: FanId) -> Option<Vec<Line>> {
        let fan = self.fans.get(&id)?;
        let line1 = self.lines.get(&fan.line1)?;
        let line2 = self.lines.get(&fan.line2)?;
        Some(fan.strings(line1, line2))
    }

    /// Fans that use `line` as one of their boundaries, in z-order.
    pub fn fans_referencing(&self, line: LineId) -> Vec<FanId> {
        self.fans()
            .filter(|(_, fan)| fan.references(line))
            .map(|(id, _)| id)
            .collect()
    }

    /// Remove a line together with every fan strung on it.
    ///
    /// Returns the removed line and the ids of the cascaded fans.
    pub fn remove_line(&mut self, id: LineId) -> Option<(Line, Vec<FanId>)> {
        let line = self.lines.remove(&id)?;
        self.line_order.retain(|&l| l != id);

        let cascaded = self.fans_referencing(id);
        for fan_id in &cascaded {
            self.fans.remove(fan_id);
        }
        self.fan_order.retain(|f| !cascaded.contains(f));

        log::debug!("Removed {id} and {} dependent fan(s)", cascaded.len());
        Some((line, cascaded))
    }

    pub fn remove_fan(&mut self, id: FanId) -> Option<Fan> {
        let fan = self.fans.remove(&id)?;
        self.fan_order.retain(|&f| f != id);
        log::debug!("Removed {id}");
        Some(fan)
    }

    /// Remove any entity. Removing a line cascades to its fans.
    pub fn remove(&mut self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Line(id) => self.remove_line(id).is_some(),
            EntityRef::Fan(id) => self.remove_fan(id).is_some(),
        }
    }

    /// Remove all lines and fans.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.line_order.clear();
        self.fans.clear();
        self.fan_order.clear();
    }

    /// Move an entity one step within its own z-order.
    ///
    /// Returns false (and changes nothing) at either end or for unknown ids.
    pub fn move_entity(&mut self, entity: EntityRef, direction: Direction) -> bool {
        match entity {
            EntityRef::Line(id) => step(&mut self.line_order, id, direction),
            EntityRef::Fan(id) => step(&mut self.fan_order, id, direction),
        }
    }

    /// Cycle through the lines with an endpoint exactly at `point`.
    ///
    /// Returns the line after `current` in z-order among the lines at that
    /// nail, wrapping around, or the first such line if `current` is not
    /// one of them.
    ///
    /// # Panics
    ///
    /// Panics if no line has an endpoint at `point`.
    pub fn next_line_in_stack(&self, point: Vector, current: Option<LineId>) -> LineId {
        let stack: Vec<LineId> = self.lines_at(point).into_iter().map(|(id, _)| id).collect();
        assert!(!stack.is_empty(), "no line has a nail at {point:?}");

        let next = current
            .and_then(|cur| stack.iter().position(|&id| id == cur))
            .map_or(0, |pos| (pos + 1) % stack.len());
        stack[next]
    }

    /// Every line that has an endpoint exactly at `point`, with that endpoint.
    pub fn lines_at(&self, point: Vector) -> Vec<(LineId, Side)> {
        self.lines()
            .filter_map(|(id, line)| line.side_of(point).map(|side| (id, side)))
            .collect()
    }

    /// Bounding box of all line endpoints, `None` for a scene without lines.
    pub fn bounds(&self) -> Option<Rect> {
        self.lines()
            .map(|(_, line)| line.bounds())
            .reduce(|acc, r| acc.union(r))
    }
}

fn step<T: PartialEq + Copy>(order: &mut [T], id: T, direction: Direction) -> bool {
    let Some(pos) = order.iter().position(|&item| item == id) else {
        return false;
    };
    match direction {
        Direction::Forward if pos + 1 < order.len() => {
            order.swap(pos, pos + 1);
            true
        }
        Direction::Backward if pos > 0 => {
            order.swap(pos, pos - 1);
            true
        }
        _ => false,
    }
}
