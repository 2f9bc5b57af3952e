//! Snap functionality for attracting edited endpoints to nails and lengths.

use crate::scene::Scene;
use crate::settings::EditorSettings;
use crate::shapes::LineId;
use crate::vector::Vector;

/// What a snap attached the point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    /// No rule fired; the point is the raw input.
    None,
    /// Snapped exactly onto an existing nail.
    Nail,
    /// Snapped onto a reference length at a rounded angle.
    Length,
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Vector,
    pub kind: SnapKind,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Vector) -> Self {
        Self {
            point,
            kind: SnapKind::None,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.kind != SnapKind::None
    }
}

/// Scene state a snap is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct SnapContext<'a> {
    pub scene: &'a Scene,
    pub settings: &'a EditorSettings,
    /// The line whose endpoint is being moved. Never attracts itself.
    pub editing: Option<LineId>,
    /// The endpoint of the edited line that stays put, if any.
    pub fixed: Option<Vector>,
    /// The currently selected line, used as the reference length.
    pub selected: Option<LineId>,
}

/// Collect every nail a point may snap to while `exclude` is being edited.
///
/// That is both endpoints of every other line, plus the string endpoints of
/// the fans strung on `exclude` that lie on their other boundary line.
pub fn collect_nails(scene: &Scene, exclude: Option<LineId>) -> Vec<Vector> {
    let mut nails: Vec<Vector> = scene
        .lines()
        .filter(|(id, _)| Some(*id) != exclude)
        .flat_map(|(_, line)| line.endpoints())
        .collect();

    let Some(exclude) = exclude else {
        return nails;
    };

    for fan_id in scene.fans_referencing(exclude) {
        let Some(fan) = scene.fan(fan_id) else { continue };
        if fan.line1 == fan.line2 {
            continue;
        }
        let Some(strings) = scene.fan_strings(fan_id) else { continue };
        // String p1 ends lie on line1 and p2 ends on line2.
        if fan.line1 == exclude {
            nails.extend(strings.iter().map(|s| s.p2));
        } else {
            nails.extend(strings.iter().map(|s| s.p1));
        }
    }
    nails
}

/// Snap a point onto the closest nail within `radius`.
pub fn snap_to_nails(point: Vector, nails: &[Vector], radius: f64) -> Option<Vector> {
    point
        .closest_point(nails.iter().copied())
        .filter(|nail| nail.distance(point) <= radius)
}

/// Round an angle to the nearest multiple of `increment` degrees.
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    (angle_degrees / increment).round() * increment
}

/// Nearest multiple of `grid` to `length`, never shorter than one grid step.
pub fn snap_length(length: f64, grid: f64) -> f64 {
    ((length / grid).round() * grid).max(grid)
}

/// Snap a free endpoint onto a target length at a rounded angle from `fixed`.
///
/// `target_length` overrides the length grid when given. Returns `None`
/// for a zero-length candidate or when the grid point is outside `radius`.
pub fn snap_to_length(
    point: Vector,
    fixed: Vector,
    target_length: Option<f64>,
    settings: &EditorSettings,
) -> Option<Vector> {
    let raw = point - fixed;
    if raw == Vector::ZERO {
        return None;
    }
    let length = target_length.unwrap_or_else(|| snap_length(raw.length(), settings.nail_distance));
    let angle = snap_angle(raw.angle(), settings.angle_increment);
    let candidate = fixed + Vector::from_polar(length, angle);
    (candidate.distance(point) <= settings.length_snap_radius).then_some(candidate)
}

/// Snap an edited endpoint: nails first, then the length grid.
pub fn snap_point(point: Vector, ctx: &SnapContext<'_>) -> SnapResult {
    let nails = collect_nails(ctx.scene, ctx.editing);
    if let Some(nail) = snap_to_nails(point, &nails, ctx.settings.nail_snap_radius) {
        log::debug!("Snapped {point:?} to nail {nail:?}");
        return SnapResult {
            point: nail,
            kind: SnapKind::Nail,
        };
    }

    let Some(fixed) = ctx.fixed else {
        return SnapResult::none(point);
    };

    let reference = ctx
        .selected
        .filter(|&id| Some(id) != ctx.editing)
        .and_then(|id| ctx.scene.line(id))
        .map(|line| line.length())
        .filter(|&length| length > 0.0);

    match snap_to_length(point, fixed, reference, ctx.settings) {
        Some(snapped) => {
            log::debug!("Snapped {point:?} to length grid at {snapped:?}");
            SnapResult {
                point: snapped,
                kind: SnapKind::Length,
            }
        }
        None => SnapResult::none(point),
    }
}
