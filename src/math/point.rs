use std::ops::Add;

use super::{is_zero, MathError, Vector};

/// A position in 3D space.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ZERO: Point = Point::new(0., 0., 0.);

    /// Instantiate a new Point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Move this point by a vector.
    pub fn add(self, v: Vector) -> Point {
        Point::new(self.x + v.x(), self.y + v.y(), self.z + v.z())
    }

    /// Move this point by `v` scaled by `k`. Zero `k` leaves it in place.
    pub fn add_scaled(self, v: Vector, k: f64) -> Point {
        Point::new(self.x + v.x() * k, self.y + v.y() * k, self.z + v.z() * k)
    }

    /// The vector pointing from `other` to this point. Fails when both points coincide.
    pub fn subtract(self, other: Point) -> Result<Vector, MathError> {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2)
    }

    pub fn distance(self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Equality within the numeric tolerance, component by component.
    pub fn is_almost_equal(self, other: Point) -> bool {
        is_zero(self.x - other.x) && is_zero(self.y - other.y) && is_zero(self.z - other.z)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Self::Output {
        Point::add(self, rhs)
    }
}
