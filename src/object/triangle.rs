use crate::{
    material::{Color, Material},
    math::{Point, Ray, Vector},
};

use super::{
    polygon::{passes_inside, validate},
    surface, GeoPoint, Geometry, GeometryError, Intersectable, Plane,
};

/// A flat triangle. Its edges and vertices are not part of it.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertices: [Point; 3],
    plane: Plane,

    pub emission: Color,
    pub material: Material,
}

impl Triangle {
    /// Fails when two vertices coincide or all three are collinear.
    pub fn new(p1: Point, p2: Point, p3: Point) -> Result<Self, GeometryError> {
        let vertices = [p1, p2, p3];
        let plane = validate(&vertices)?;
        Ok(Self {
            vertices,
            plane,
            emission: Color::BLACK,
            material: Material::default(),
        })
    }

    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }
}

surface!(Triangle);

impl Intersectable for Triangle {
    fn find_geo_intersections_bounded(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        match self.plane.intersect_t(ray, max_distance) {
            Some(t) if passes_inside(ray, &self.vertices) => {
                vec![GeoPoint::new(self, ray.point_at(t))]
            }
            _ => vec![],
        }
    }
}

impl Geometry for Triangle {
    fn normal(&self, _: Point) -> Vector {
        self.plane.plane_normal()
    }

    fn emission(&self) -> Color {
        self.emission
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
