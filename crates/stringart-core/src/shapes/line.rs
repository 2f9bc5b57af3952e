//! Nail line.

use crate::vector::Vector;
use kurbo::{Line as KurboLine, ParamCurveNearest, Point, Rect};
use serde::{Deserialize, Serialize};

/// One endpoint of a [`Line`].
///
/// Also used as the `keepFixed` value: the endpoint held constant when the
/// line's length or angle is edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    P1,
    P2,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::P1 => "p1",
            Side::P2 => "p2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "p1" => Some(Side::P1),
            "p2" => Some(Side::P2),
            _ => None,
        }
    }
}

/// A directed segment: `p1` is the tail, `p2` the head.
///
/// Lines double as the nail rows of the composition and as the generated
/// strings of a fan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub p1: Vector,
    pub p2: Vector,
    #[serde(default)]
    pub keep_fixed: Side,
}

impl Line {
    pub fn new(p1: Vector, p2: Vector) -> Self {
        Self {
            p1,
            p2,
            keep_fixed: Side::P1,
        }
    }

    /// A zero-length line at `point`, as created by the first draw click.
    pub fn degenerate(point: Vector) -> Self {
        Self::new(point, point)
    }

    pub fn delta(&self) -> Vector {
        self.p2 - self.p1
    }

    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    /// Direction in degrees. Meaningless (0) for a zero-length line.
    pub fn angle(&self) -> f64 {
        self.delta().angle()
    }

    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    pub fn endpoint(&self, side: Side) -> Vector {
        match side {
            Side::P1 => self.p1,
            Side::P2 => self.p2,
        }
    }

    pub fn set_endpoint(&mut self, side: Side, point: Vector) {
        match side {
            Side::P1 => self.p1 = point,
            Side::P2 => self.p2 = point,
        }
    }

    pub fn endpoints(&self) -> [Vector; 2] {
        [self.p1, self.p2]
    }

    /// Recompute the free endpoint so the line has the given length and angle.
    ///
    /// The `keep_fixed` endpoint does not move. The angle always describes
    /// the direction `p1 -> p2`, whichever side is fixed.
    pub fn adjust(&mut self, new_length: f64, new_angle: f64) {
        let offset = Vector::from_polar(new_length, new_angle);
        match self.keep_fixed {
            Side::P1 => self.p2 = self.p1 + offset,
            Side::P2 => self.p1 = self.p2 - offset,
        }
    }

    /// Which endpoint, if any, sits exactly at `point`.
    pub fn side_of(&self, point: Vector) -> Option<Side> {
        if self.p1 == point {
            Some(Side::P1)
        } else if self.p2 == point {
            Some(Side::P2)
        } else {
            None
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(Point::from(self.p1), Point::from(self.p2))
    }

    /// Distance from `point` to the closest point of the segment.
    pub fn distance_to(&self, point: Vector) -> f64 {
        if self.is_degenerate() {
            return self.p1.distance(point);
        }
        self.as_kurbo().nearest(Point::from(point), 1e-9).distance_sq.sqrt()
    }

    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.p1, self.p2)
    }
}
