mod cylinder;
mod geometries;
mod plane;
mod polygon;
mod sphere;
mod triangle;
mod tube;

use thiserror::Error;

use crate::{
    material::{Color, Material},
    math::{MathError, Point, Ray, Vector},
};

pub use cylinder::*;
pub use geometries::*;
pub use plane::*;
pub use polygon::*;
pub use sphere::*;
pub use triangle::*;
pub use tube::*;

/// Why a shape could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Math(#[from] MathError),

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("all vertices of a polygon must lie in the same plane")]
    NotCoplanar,

    #[error("polygon vertices must be ordered and the polygon must be convex")]
    NotConvex,

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),
}

/// An intersection between a ray and a geometry.
#[derive(Clone, Copy)]
pub struct GeoPoint<'a> {
    /// The geometry that was struck. Owned by the enclosing collection.
    pub geometry: &'a dyn Geometry,

    /// The world-space intersection point.
    pub point: Point,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a dyn Geometry, point: Point) -> Self {
        Self { geometry, point }
    }
}

impl std::fmt::Debug for GeoPoint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoPoint")
            .field("geometry", &(self.geometry as *const dyn Geometry as *const ()))
            .field("point", &self.point)
            .finish()
    }
}

/// Anything a ray can be intersected with.
pub trait Intersectable: Send + Sync {
    /// Find every intersection with the ray strictly closer than `max_distance`.
    /// An empty list means no intersection.
    fn find_geo_intersections_bounded(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>>;

    /// Find every intersection with the ray.
    fn find_geo_intersections(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        self.find_geo_intersections_bounded(ray, f64::INFINITY)
    }

    /// Find every intersection point with the ray.
    fn find_intersections(&self, ray: &Ray) -> Vec<Point> {
        self.find_geo_intersections(ray)
            .into_iter()
            .map(|gp| gp.point)
            .collect()
    }
}

/// A renderable shape.
pub trait Geometry: Intersectable {
    /// The unit normal at a point on the surface.
    fn normal(&self, point: Point) -> Vector;

    /// The color this geometry emits on its own.
    fn emission(&self) -> Color;

    fn material(&self) -> &Material;
}

/// Whether `t` is a usable ray parameter: in front of the origin and short of `max_distance`.
pub(crate) fn in_range(t: f64, max_distance: f64) -> bool {
    t > 0. && crate::math::align_zero(t - max_distance) < 0.
}

/// Implement the emission/material accessors and fluent setters for a shape with
/// `emission` and `material` fields.
macro_rules! surface {
    ($shape:ty) => {
        impl $shape {
            /// Set the emitted color.
            pub fn with_emission(mut self, emission: $crate::material::Color) -> Self {
                self.emission = emission;
                self
            }

            /// Set the material.
            pub fn with_material(mut self, material: $crate::material::Material) -> Self {
                self.material = material;
                self
            }
        }
    };
}

pub(crate) use surface;
