//! 2D point/vector value type.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// An immutable 2D point or displacement.
///
/// All operations return new values. Equality is exact: two vectors are
/// equal only if both coordinates are bit-for-bit equal floats, which is what
/// nail stacking relies on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a vector from a length and an angle in degrees.
    pub fn from_polar(length: f64, angle_degrees: f64) -> Self {
        let radians = angle_degrees.to_radians();
        Self::new(length * radians.cos(), length * radians.sin())
    }

    /// Component-wise sum.
    pub fn plus(self, other: Vector) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference, `self - other`.
    pub fn minus(self, other: Vector) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Scale both components by `factor`.
    pub fn times(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Divide both components by `factor`. Dividing by zero yields
    /// infinite or NaN components.
    pub fn div(self, factor: f64) -> Self {
        Self::new(self.x / factor, self.y / factor)
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        Vec2::from(self).hypot()
    }

    /// Angle to the x-axis in degrees, in `(-180, 180]`.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn distance(self, other: Vector) -> f64 {
        self.minus(other).length()
    }

    /// Return the candidate closest to `self`, or `None` for no candidates.
    ///
    /// Ties keep the first candidate encountered.
    pub fn closest_point<I>(self, candidates: I) -> Option<Vector>
    where
        I: IntoIterator<Item = Vector>,
    {
        let mut best: Option<(Vector, f64)> = None;
        for candidate in candidates {
            let dist = self.distance(candidate);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((candidate, dist)),
            }
        }
        best.map(|(point, _)| point)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.minus(rhs)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.times(rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector::div(self, rhs)
    }
}

impl From<Vector> for Point {
    fn from(v: Vector) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for Vector {
    fn from(p: Point) -> Self {
        Vector::new(p.x, p.y)
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Vector::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_arithmetic() {
        let a = Vector::new(3.0, 4.0);
        let b = Vector::new(1.0, -2.0);
        assert_eq!(a.plus(b), Vector::new(4.0, 2.0));
        assert_eq!(a.minus(b), Vector::new(2.0, 6.0));
        assert_eq!(a.times(2.0), Vector::new(6.0, 8.0));
        assert_eq!(a.div(2.0), Vector::new(1.5, 2.0));
        assert_eq!(a + b, a.plus(b));
        assert_eq!(a - b, a.minus(b));
    }

    #[test]
    fn test_length_and_angle() {
        let v = Vector::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < EPS);
        assert!((Vector::new(0.0, 1.0).angle() - 90.0).abs() < EPS);
        assert!((Vector::new(-1.0, 0.0).angle() - 180.0).abs() < EPS);
        assert!((Vector::new(1.0, -1.0).angle() + 45.0).abs() < EPS);
    }

    #[test]
    fn test_from_polar() {
        let v = Vector::from_polar(10.0, 90.0);
        assert!(v.x.abs() < EPS);
        assert!((v.y - 10.0).abs() < EPS);

        let w = Vector::from_polar(2.0, 225.0);
        assert!((w.length() - 2.0).abs() < EPS);
        assert!((w.angle() + 135.0).abs() < EPS);
    }

    #[test]
    fn test_closest_point_empty() {
        let p = Vector::new(1.0, 1.0);
        assert_eq!(p.closest_point(Vec::new()), None);
    }

    #[test]
    fn test_closest_point_picks_nearest() {
        let p = Vector::new(0.0, 0.0);
        let candidates = vec![
            Vector::new(10.0, 0.0),
            Vector::new(0.0, 3.0),
            Vector::new(-5.0, 0.0),
        ];
        assert_eq!(p.closest_point(candidates), Some(Vector::new(0.0, 3.0)));
    }

    #[test]
    fn test_closest_point_tie_keeps_first() {
        let p = Vector::new(0.0, 0.0);
        let candidates = vec![Vector::new(0.0, 2.0), Vector::new(2.0, 0.0)];
        assert_eq!(p.closest_point(candidates), Some(Vector::new(0.0, 2.0)));
    }

    #[test]
    fn test_kurbo_conversions() {
        let v = Vector::new(1.5, -2.5);
        let p: Point = v.into();
        assert_eq!(p, Point::new(1.5, -2.5));
        assert_eq!(Vector::from(p), v);
        assert_eq!(Vector::from(Vec2::from(v)), v);
    }
}
