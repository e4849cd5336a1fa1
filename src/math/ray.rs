use crate::object::GeoPoint;

use super::{is_zero, Point, Vector};

/// How far secondary rays are pushed off a surface to avoid hitting it again.
pub const DELTA: f64 = 0.1;

/// A half-line with an origin and a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    /// Instantiate a new Ray. The direction is normalized.
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// A ray leaving a surface point, nudged by [`DELTA`] along the normal on the side
    /// the direction points to.
    pub fn offset(origin: Point, direction: Vector, normal: Vector) -> Self {
        let nd = normal.dot_product(direction);
        let delta = if nd < 0. { -DELTA } else { DELTA };
        Self::new(origin.add_scaled(normal, delta), direction)
    }

    /// The point at parameter `t` along the ray.
    pub fn point_at(&self, t: f64) -> Point {
        if is_zero(t) {
            return self.origin;
        }

        self.origin.add_scaled(self.direction, t)
    }

    /// The point nearest to the ray origin. The first of several equidistant points wins.
    pub fn find_closest_point(&self, points: &[Point]) -> Option<Point> {
        let mut closest: Option<(Point, f64)> = None;
        for &p in points {
            let d = self.origin.distance_squared(p);
            match closest {
                Some((_, min)) if d >= min => continue,
                _ => closest = Some((p, d)),
            }
        }

        closest.map(|(p, _)| p)
    }

    /// The intersection nearest to the ray origin. Among equidistant hits, the one
    /// produced first (geometry insertion order) wins.
    pub fn find_closest_geo_point<'a>(&self, points: Vec<GeoPoint<'a>>) -> Option<GeoPoint<'a>> {
        let mut closest: Option<(GeoPoint<'a>, f64)> = None;
        for gp in points {
            let d = self.origin.distance_squared(gp.point);
            match closest {
                Some((_, min)) if d >= min => continue,
                _ => closest = Some((gp, d)),
            }
        }

        closest.map(|(gp, _)| gp)
    }
}
