use crate::{
    material::{Color, Material},
    math::{align_zero, is_zero, Point, Ray, Vector},
};

use super::{in_range, surface, GeoPoint, Geometry, GeometryError, Intersectable};

/// An infinite cylinder around an axis.
#[derive(Debug, Clone)]
pub struct Tube {
    axis: Ray,
    radius: f64,

    pub emission: Color,
    pub material: Material,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> Result<Self, GeometryError> {
        if radius <= 0. {
            return Err(GeometryError::NonPositiveRadius(radius));
        }

        Ok(Self {
            axis,
            radius,
            emission: Color::BLACK,
            material: Material::default(),
        })
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Ray parameters of the hits in range, in increasing order.
    pub(crate) fn intersect_ts(&self, ray: &Ray, max_distance: f64) -> Vec<f64> {
        let dir = ray.direction;
        let v = self.axis.direction;
        let dir_v = dir.dot_product(v);
        let keep = |ts: &[f64]| -> Vec<f64> {
            ts.iter()
                .copied()
                .filter(|&t| in_range(t, max_distance))
                .collect()
        };

        let delta_p = match ray.origin.subtract(self.axis.origin) {
            Ok(delta_p) => delta_p,
            // the ray starts on the axis origin: the hit is where the component of the
            // direction perpendicular to the axis covers one radius
            Err(_) => {
                if is_zero(dir_v) {
                    return keep(&[self.radius]);
                }

                let perpendicular = v.scale(dir_v).and_then(|along| dir.subtract(along));
                return match perpendicular {
                    Ok(perp) => keep(&[(self.radius * self.radius / perp.length_squared()).sqrt()]),
                    Err(_) => vec![],
                };
            }
        };

        let dp_v = delta_p.dot_product(v);
        let a = 1. - dir_v * dir_v;
        let b = 2. * (dir.dot_product(delta_p) - dir_v * dp_v);
        let c = delta_p.length_squared() - dp_v * dp_v - self.radius * self.radius;

        // parallel to the axis, the equation degenerates to a linear one
        if is_zero(a) {
            if is_zero(b) {
                return vec![];
            }
            return keep(&[align_zero(-c / b)]);
        }

        let discriminant = align_zero(b * b - 4. * a * c);
        if discriminant <= 0. {
            return vec![];
        }

        let sq = discriminant.sqrt();
        let t1 = align_zero((-b - sq) / (2. * a));
        let t2 = align_zero((-b + sq) / (2. * a));
        keep(&[t1, t2])
    }
}

surface!(Tube);

impl Intersectable for Tube {
    fn find_geo_intersections_bounded(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        self.intersect_ts(ray, max_distance)
            .into_iter()
            .map(|t| GeoPoint::new(self, ray.point_at(t)))
            .collect()
    }
}

/// The outward normal of an infinite tube: from the point's projection on the axis to the point.
pub(crate) fn tube_normal(axis: &Ray, point: Point) -> Vector {
    let to_point = match point.subtract(axis.origin) {
        Ok(to_point) => to_point,
        Err(_) => return axis.direction,
    };

    let t = axis.direction.dot_product(to_point);
    if is_zero(t) {
        return to_point.normalize();
    }

    point
        .subtract(axis.point_at(t))
        .map(Vector::normalize)
        .unwrap_or(axis.direction)
}

impl Geometry for Tube {
    fn normal(&self, point: Point) -> Vector {
        tube_normal(&self.axis, point)
    }

    fn emission(&self) -> Color {
        self.emission
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
