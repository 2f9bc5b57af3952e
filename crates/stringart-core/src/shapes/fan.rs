//! Fan of strings between two nail lines.

use super::{Line, LineId};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque RGB string color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StringColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl StringColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self::new(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::new(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => None,
        }
    }
}

impl Default for StringColor {
    fn default() -> Self {
        Self::new(0x2d, 0x89, 0x23)
    }
}

impl fmt::Display for StringColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for StringColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid color: {s:?}"))
    }
}

impl TryFrom<String> for StringColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StringColor> for String {
    fn from(color: StringColor) -> Self {
        color.to_string()
    }
}

impl From<StringColor> for Color {
    fn from(color: StringColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

/// A set of strings interpolated between two boundary lines.
///
/// The fan only holds the ids of its boundary lines; geometry is resolved
/// against the scene on every access, so edits to either line show up
/// immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fan {
    pub line1: LineId,
    pub line2: LineId,
    pub color: StringColor,
    pub stroke_width: f64,
    pub num_nails: u32,
}

impl Fan {
    pub const MIN_NAILS: u32 = 2;

    pub fn new(line1: LineId, line2: LineId, color: StringColor, stroke_width: f64, num_nails: u32) -> Self {
        Self {
            line1,
            line2,
            color,
            stroke_width,
            num_nails,
        }
    }

    /// Nail count for a line of `length`: one nail every `nail_distance`, at least two.
    pub fn default_num_nails(length: f64, nail_distance: f64) -> u32 {
        let count = (length / nail_distance).round() + 1.0;
        if count.is_finite() && count > Self::MIN_NAILS as f64 {
            count as u32
        } else {
            Self::MIN_NAILS
        }
    }

    pub fn references(&self, line: LineId) -> bool {
        self.line1 == line || self.line2 == line
    }

    /// The boundary line paired with `line`, if `line` is one of them.
    pub fn other_line(&self, line: LineId) -> Option<LineId> {
        if self.line1 == line {
            Some(self.line2)
        } else if self.line2 == line {
            Some(self.line1)
        } else {
            None
        }
    }

    /// Generate this fan's strings from its resolved boundary lines.
    pub fn strings(&self, line1: &Line, line2: &Line) -> Vec<Line> {
        interpolate_strings(line1, line2, self.num_nails)
    }
}

/// Interpolate `num_nails` strings between two boundary lines.
///
/// String `i` starts at the i-th nail of `line1` walking `p1 -> p2` and ends
/// at the i-th nail of `line2` walking `p2 -> p1`, which makes consecutive
/// strings cross into the fan shape.
///
/// # Panics
///
/// Panics if `num_nails < 2`.
pub fn interpolate_strings(line1: &Line, line2: &Line, num_nails: u32) -> Vec<Line> {
    assert!(
        num_nails >= Fan::MIN_NAILS,
        "a fan needs at least {} nails, got {num_nails}",
        Fan::MIN_NAILS
    );
    let steps = f64::from(num_nails - 1);
    let l1_delta = (line1.p2 - line1.p1) / steps;
    let l2_delta = (line2.p1 - line2.p2) / steps;

    (0..num_nails)
        .map(|i| {
            let i = f64::from(i);
            Line::new(line1.p1 + l1_delta * i, line2.p2 + l2_delta * i)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector;

    const EPS: f64 = 1e-9;

    fn close(a: Vector, b: Vector) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_string_count_and_ends() {
        let l1 = Line::new(Vector::new(0.0, 0.0), Vector::new(0.0, 100.0));
        let l2 = Line::new(Vector::new(0.0, 100.0), Vector::new(100.0, 100.0));
        for n in [2, 3, 7, 20] {
            let strings = interpolate_strings(&l1, &l2, n);
            assert_eq!(strings.len(), n as usize);
            assert_eq!(strings[0].p1, l1.p1);
            assert_eq!(strings[0].p2, l2.p2);
            let last = strings[strings.len() - 1];
            assert!(close(last.p1, l1.p2));
            assert!(close(last.p2, l2.p1));
        }
    }

    #[test]
    fn test_middle_string_is_interpolated() {
        let l1 = Line::new(Vector::new(0.0, 0.0), Vector::new(10.0, 0.0));
        let l2 = Line::new(Vector::new(0.0, 10.0), Vector::new(10.0, 10.0));
        let strings = interpolate_strings(&l1, &l2, 3);
        assert!(close(strings[1].p1, Vector::new(5.0, 0.0)));
        assert!(close(strings[1].p2, Vector::new(5.0, 10.0)));
        // Opposite walking directions make the outer strings cross.
        assert!(close(strings[0].p2, Vector::new(10.0, 10.0)));
        assert!(close(strings[2].p2, Vector::new(0.0, 10.0)));
    }

    #[test]
    #[should_panic(expected = "at least 2 nails")]
    fn test_too_few_nails_panics() {
        let l = Line::new(Vector::new(0.0, 0.0), Vector::new(1.0, 1.0));
        interpolate_strings(&l, &l, 1);
    }

    #[test]
    fn test_default_num_nails() {
        assert_eq!(Fan::default_num_nails(0.0, 10.0), 2);
        assert_eq!(Fan::default_num_nails(4.0, 10.0), 2);
        assert_eq!(Fan::default_num_nails(100.0, 10.0), 11);
        assert_eq!(Fan::default_num_nails(104.9, 10.0), 11);
        assert_eq!(Fan::default_num_nails(105.0, 10.0), 12);
    }

    #[test]
    fn test_color_parse_and_display() {
        assert_eq!(StringColor::parse("#2D8923"), Some(StringColor::new(0x2d, 0x89, 0x23)));
        assert_eq!(StringColor::parse("#fff"), Some(StringColor::new(255, 255, 255)));
        assert_eq!(StringColor::parse("2d8923"), None);
        assert_eq!(StringColor::parse("#12345"), None);
        assert_eq!(StringColor::parse("#gg0000"), None);
        assert_eq!(StringColor::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn test_color_serde_as_string() {
        let color = StringColor::new(0xab, 0xcd, 0xef);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#abcdef\"");
        let back: StringColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
        assert!(serde_json::from_str::<StringColor>("\"red\"").is_err());
    }

    #[test]
    fn test_color_into_peniko() {
        let color: Color = StringColor::new(10, 20, 30).into();
        let rgba = color.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (10, 20, 30, 255));
    }

    #[test]
    fn test_other_line() {
        let (a, b, c) = (LineId::new(), LineId::new(), LineId::new());
        let fan = Fan::new(a, b, StringColor::default(), 1.0, 5);
        assert_eq!(fan.other_line(a), Some(b));
        assert_eq!(fan.other_line(b), Some(a));
        assert_eq!(fan.other_line(c), None);
        assert!(fan.references(a) && !fan.references(c));
    }
}
