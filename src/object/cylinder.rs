use crate::{
    material::{Color, Material},
    math::{align_zero, Point, Ray, Vector},
};

use super::{tube::tube_normal, GeoPoint, Geometry, GeometryError, Intersectable, Tube};

/// A finite, open-ended cylinder: the lateral surface of a tube between the axis origin
/// and `height` along the axis. It has no end caps.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> Result<Self, GeometryError> {
        if height <= 0. {
            return Err(GeometryError::NonPositiveHeight(height));
        }

        Ok(Self {
            tube: Tube::new(axis, radius)?,
            height,
        })
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.tube = self.tube.with_emission(emission);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.tube = self.tube.with_material(material);
        self
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn radius(&self) -> f64 {
        self.tube.radius()
    }

    /// Whether a point on the tube lies strictly between the two ends.
    fn within_height(&self, point: Point) -> bool {
        let axis = self.tube.axis();
        let along = match point.subtract(axis.origin) {
            Ok(to_point) => align_zero(axis.direction.dot_product(to_point)),
            Err(_) => 0.,
        };
        along > 0. && align_zero(along - self.height) < 0.
    }
}

impl Intersectable for Cylinder {
    fn find_geo_intersections_bounded(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        self.tube
            .intersect_ts(ray, max_distance)
            .into_iter()
            .map(|t| ray.point_at(t))
            .filter(|&p| self.within_height(p))
            .map(|p| GeoPoint::new(self, p))
            .collect()
    }
}

impl Geometry for Cylinder {
    fn normal(&self, point: Point) -> Vector {
        tube_normal(self.tube.axis(), point)
    }

    fn emission(&self) -> Color {
        self.tube.emission
    }

    fn material(&self) -> &Material {
        &self.tube.material
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn cylinder() -> Cylinder {
        Cylinder::new(Ray::new(Point::ZERO, Vector::Z), 1., 2.).unwrap()
    }

    #[test]
    fn invalid_dimensions_fail() {
        let axis = Ray::new(Point::ZERO, Vector::Z);
        assert_eq!(
            Cylinder::new(axis, 1., 0.).unwrap_err(),
            GeometryError::NonPositiveHeight(0.)
        );
        assert_eq!(
            Cylinder::new(axis, -1., 1.).unwrap_err(),
            GeometryError::NonPositiveRadius(-1.)
        );
    }

    #[test]
    fn hits_within_height() {
        let ray = Ray::new(Point::new(-2., 0., 1.), Vector::X);
        assert_eq!(
            cylinder().find_intersections(&ray),
            vec![Point::new(-1., 0., 1.), Point::new(1., 0., 1.)]
        );
    }

    #[test]
    fn misses_beyond_height() {
        let ray = Ray::new(Point::new(-2., 0., 3.), Vector::X);
        assert!(cylinder().find_intersections(&ray).is_empty());

        let ray = Ray::new(Point::new(-2., 0., -1.), Vector::X);
        assert!(cylinder().find_intersections(&ray).is_empty());
    }

    #[test]
    fn oblique_ray_keeps_only_the_side_within_height() {
        // enters the lateral surface at z = 1.5, would leave it at z = 2.5
        let ray = Ray::new(Point::new(-2., 0., 1.), Vector::new(1., 0., 0.5).unwrap());
        let hits = cylinder().find_intersections(&ray);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].x, -1., epsilon = 1e-9);
        assert_abs_diff_eq!(hits[0].z, 1.5, epsilon = 1e-9);
    }

    #[test]
    fn normal_is_radial() {
        let n = cylinder().normal(Point::new(0., -1., 1.));
        assert_eq!(n, Vector::new(0., -1., 0.).unwrap());
    }
}
