use crate::{
    material::{Color, Material},
    math::{align_zero, Point, Ray, Vector},
};

use super::{in_range, surface, GeoPoint, Geometry, GeometryError, Intersectable};

/// A sphere.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point,
    radius: f64,

    pub emission: Color,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Point, radius: f64) -> Result<Self, GeometryError> {
        if radius <= 0. {
            return Err(GeometryError::NonPositiveRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            emission: Color::BLACK,
            material: Material::default(),
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Ray parameters of the hits in range, in increasing order.
    fn intersect_ts(&self, ray: &Ray, max_distance: f64) -> Vec<f64> {
        // a ray from the center leaves through exactly one point
        let u = match self.center.subtract(ray.origin) {
            Ok(u) => u,
            Err(_) => {
                return if in_range(self.radius, max_distance) {
                    vec![self.radius]
                } else {
                    vec![]
                }
            }
        };

        let tm = u.dot_product(ray.direction);
        let d = (u.length_squared() - tm * tm).max(0.).sqrt();
        if align_zero(d - self.radius) >= 0. {
            return vec![];
        }

        let th = (self.radius * self.radius - d * d).sqrt();
        let t1 = align_zero(tm - th);
        let t2 = align_zero(tm + th);

        [t1, t2]
            .iter()
            .copied()
            .filter(|&t| in_range(t, max_distance))
            .collect()
    }
}

surface!(Sphere);

impl Intersectable for Sphere {
    fn find_geo_intersections_bounded(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        self.intersect_ts(ray, max_distance)
            .into_iter()
            .map(|t| GeoPoint::new(self, ray.point_at(t)))
            .collect()
    }
}

impl Geometry for Sphere {
    fn normal(&self, point: Point) -> Vector {
        point
            .subtract(self.center)
            .map(Vector::normalize)
            // the center itself has no meaningful normal
            .unwrap_or(Vector::Z)
    }

    fn emission(&self) -> Color {
        self.emission
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
