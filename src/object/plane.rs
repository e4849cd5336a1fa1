use crate::{
    material::{Color, Material},
    math::{align_zero, is_zero, Point, Ray, Vector},
};

use super::{in_range, surface, GeoPoint, Geometry, GeometryError, Intersectable};

/// An infinite plane.
#[derive(Debug, Clone)]
pub struct Plane {
    /// A reference point on the plane.
    point: Point,

    /// The unit normal of the plane.
    normal: Vector,

    pub emission: Color,
    pub material: Material,
}

impl Plane {
    /// A plane through `point` with the given normal. The normal is normalized.
    pub fn new(point: Point, normal: Vector) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            emission: Color::BLACK,
            material: Material::default(),
        }
    }

    /// The plane through three points, with normal `(p2 - p1) x (p3 - p1)`.
    /// Fails if any two points coincide or all three are collinear.
    pub fn from_points(p1: Point, p2: Point, p3: Point) -> Result<Self, GeometryError> {
        let u = p2.subtract(p1)?;
        let v = p3.subtract(p1)?;
        let normal = u.cross_product(v)?;
        Ok(Self::new(p1, normal))
    }

    pub fn point(&self) -> Point {
        self.point
    }

    /// The plane's normal, which is the same everywhere.
    pub fn plane_normal(&self) -> Vector {
        self.normal
    }

    /// The ray parameter at which the ray meets this plane, if it is in range.
    pub(crate) fn intersect_t(&self, ray: &Ray, max_distance: f64) -> Option<f64> {
        let to_plane = self.point.subtract(ray.origin).ok()?;

        let denom = self.normal.dot_product(ray.direction);
        if is_zero(denom) {
            return None;
        }

        let t = align_zero(self.normal.dot_product(to_plane) / denom);
        in_range(t, max_distance).then(|| t)
    }
}

surface!(Plane);

impl Intersectable for Plane {
    fn find_geo_intersections_bounded(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        match self.intersect_t(ray, max_distance) {
            Some(t) => vec![GeoPoint::new(self, ray.point_at(t))],
            None => vec![],
        }
    }
}

impl Geometry for Plane {
    fn normal(&self, _: Point) -> Vector {
        self.normal
    }

    fn emission(&self) -> Color {
        self.emission
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::MathError;

    fn v(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z).unwrap()
    }

    #[test]
    fn from_points_builds_unit_normal() {
        let p1 = Point::new(0., 0., 1.);
        let p2 = Point::new(1., 0., 0.);
        let p3 = Point::new(0., 1., 0.);
        let plane = Plane::from_points(p1, p2, p3).unwrap();
        let n = plane.normal(p1);

        assert_abs_diff_eq!(n.length(), 1., epsilon = 1e-8);
        assert_abs_diff_eq!(n.dot_product(p2.subtract(p1).unwrap()), 0., epsilon = 1e-10);
        assert_abs_diff_eq!(n.dot_product(p3.subtract(p1).unwrap()), 0., epsilon = 1e-10);
    }

    #[test]
    fn from_points_rejects_degenerate_input() {
        // two equal points
        assert_eq!(
            Plane::from_points(Point::new(1., 1., 1.), Point::new(1., 1., 1.), Point::new(0., 1., 0.)).unwrap_err(),
            GeometryError::Math(MathError::ZeroVector)
        );
        // collinear
        assert!(Plane::from_points(Point::new(1., 1., 1.), Point::new(2., 2., 2.), Point::new(3., 3., 3.)).is_err());
    }

    #[test]
    fn intersections() {
        let plane = Plane::new(Point::new(0., 0., 1.), v(0., 0., 1.));

        // ray crosses the plane
        let ray = Ray::new(Point::new(1., 1., 0.), v(0., 1., 1.));
        assert_eq!(plane.find_intersections(&ray), vec![Point::new(1., 2., 1.)]);

        // ray points away from the plane
        let ray = Ray::new(Point::new(1., 1., 0.), v(0., 1., -1.));
        assert!(plane.find_intersections(&ray).is_empty());
    }

    #[test]
    fn parallel_rays_miss() {
        let plane = Plane::new(Point::new(0., 0., 1.), v(0., 0., 1.));

        // parallel, outside the plane
        let ray = Ray::new(Point::new(1., 1., 0.), v(1., 0., 0.));
        assert!(plane.find_intersections(&ray).is_empty());

        // parallel, inside the plane
        let ray = Ray::new(Point::new(1., 1., 1.), v(1., 0., 0.));
        assert!(plane.find_intersections(&ray).is_empty());
    }

    #[test]
    fn orthogonal_rays() {
        let plane = Plane::new(Point::new(0., 0., 1.), v(0., 0., 1.));

        // before the plane
        let ray = Ray::new(Point::new(1., 1., 0.), v(0., 0., 1.));
        assert_eq!(plane.find_intersections(&ray), vec![Point::new(1., 1., 1.)]);

        // in the plane
        let ray = Ray::new(Point::new(1., 1., 1.), v(0., 0., 1.));
        assert!(plane.find_intersections(&ray).is_empty());

        // after the plane
        let ray = Ray::new(Point::new(1., 1., 2.), v(0., 0., 1.));
        assert!(plane.find_intersections(&ray).is_empty());
    }

    #[test]
    fn ray_from_reference_point_misses() {
        let plane = Plane::new(Point::new(0., 0., 1.), v(0., 0., 1.));
        let ray = Ray::new(Point::new(0., 0., 1.), v(1., 1., 1.));
        assert!(plane.find_intersections(&ray).is_empty());
    }

    #[test]
    fn max_distance_bounds_hits() {
        let plane = Plane::new(Point::new(0., 0., 5.), v(0., 0., 1.));
        let ray = Ray::new(Point::ZERO, v(0., 0., 1.));
        assert!(plane.find_geo_intersections_bounded(&ray, 4.).is_empty());
        assert!(plane.find_geo_intersections_bounded(&ray, 5.).is_empty());
        assert_eq!(plane.find_geo_intersections_bounded(&ray, 6.).len(), 1);
    }
}
