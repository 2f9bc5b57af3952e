//! Property box model: field values of the selection and validated edits.
//!
//! The form layer reads [`Properties`] to populate its widgets and sends
//! raw widget text back through [`EditorState::apply_edit`]. Input that does
//! not parse or is out of range is dropped and the previous value stays.

use crate::editor::EditorState;
use crate::selection::Selection;
use crate::shapes::{Fan, FanId, LineId, Side, StringColor};
use crate::vector::Vector;

/// Editable fields of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    P1X,
    P1Y,
    P2X,
    P2Y,
    Length,
    Angle,
    KeepFixed,
}

/// Editable fields of a fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FanField {
    Color,
    StrokeWidth,
    NumNails,
}

/// A raw edit coming from a form widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyEdit {
    Line(LineField, String),
    Fan(FanField, String),
}

/// Current field values of the selected entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Properties {
    Line {
        id: LineId,
        p1: Vector,
        p2: Vector,
        length: f64,
        angle: f64,
        keep_fixed: Side,
    },
    Fan {
        id: FanId,
        color: StringColor,
        stroke_width: f64,
        num_nails: u32,
    },
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_non_negative(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|&v| v >= 0.0)
}

fn parse_nail_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|&n| n >= Fan::MIN_NAILS)
}

impl EditorState {
    /// Field values of the current selection, `None` when nothing is selected.
    pub fn properties(&self) -> Option<Properties> {
        match self.selection() {
            Selection::None => None,
            Selection::Line(id) => self.scene().line(id).map(|line| Properties::Line {
                id,
                p1: line.p1,
                p2: line.p2,
                length: line.length(),
                angle: line.angle(),
                keep_fixed: line.keep_fixed,
            }),
            Selection::Fan(id) => self.scene().fan(id).map(|fan| Properties::Fan {
                id,
                color: fan.color,
                stroke_width: fan.stroke_width,
                num_nails: fan.num_nails,
            }),
        }
    }

    /// Apply a form edit to the selection. Returns false if it was ignored.
    pub fn apply_edit(&mut self, edit: &PropertyEdit) -> bool {
        let applied = match (self.selection(), edit) {
            (Selection::Line(id), PropertyEdit::Line(field, raw)) => self.edit_line(id, *field, raw),
            (Selection::Fan(id), PropertyEdit::Fan(field, raw)) => self.edit_fan(id, *field, raw),
            _ => false,
        };
        if !applied {
            log::warn!("Ignoring property edit {edit:?} for {:?}", self.selection());
        }
        applied
    }

    fn edit_line(&mut self, id: LineId, field: LineField, raw: &str) -> bool {
        let Some(line) = self.scene_mut().line_mut(id) else {
            return false;
        };
        match field {
            LineField::KeepFixed => {
                let Some(side) = Side::parse(raw) else { return false };
                line.keep_fixed = side;
            }
            LineField::Length => {
                let Some(length) = parse_non_negative(raw) else { return false };
                let angle = line.angle();
                line.adjust(length, angle);
            }
            LineField::Angle => {
                let Some(angle) = parse_number(raw) else { return false };
                let length = line.length();
                line.adjust(length, angle);
            }
            LineField::P1X | LineField::P1Y | LineField::P2X | LineField::P2Y => {
                let Some(value) = parse_number(raw) else { return false };
                match field {
                    LineField::P1X => line.p1.x = value,
                    LineField::P1Y => line.p1.y = value,
                    LineField::P2X => line.p2.x = value,
                    _ => line.p2.y = value,
                }
            }
        }
        true
    }

    fn edit_fan(&mut self, id: FanId, field: FanField, raw: &str) -> bool {
        let mut new_color = None;
        {
            let Some(fan) = self.scene_mut().fan_mut(id) else {
                return false;
            };
            match field {
                FanField::Color => {
                    let Some(color) = StringColor::parse(raw) else { return false };
                    fan.color = color;
                    new_color = Some(color);
                }
                FanField::StrokeWidth => {
                    let Some(width) = parse_non_negative(raw) else { return false };
                    fan.stroke_width = width;
                }
                FanField::NumNails => {
                    let Some(count) = parse_nail_count(raw) else { return false };
                    fan.num_nails = count;
                }
            }
        }
        if let Some(color) = new_color {
            self.set_last_color(color);
        }
        true
    }
}
