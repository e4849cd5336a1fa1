use crate::{
    material::{Color, Material},
    math::{align_zero, is_zero, Point, Ray, Vector},
};

use super::{surface, GeoPoint, Geometry, GeometryError, Intersectable, Plane};

/// A flat convex polygon.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point>,
    plane: Plane,

    pub emission: Color,
    pub material: Material,
}

impl Polygon {
    /// Build a polygon from its vertices, in order along the edge path.
    ///
    /// The vertices must be coplanar, ordered, distinct, and describe a convex shape
    /// with no vertex lying on the line of its neighbours.
    pub fn new(vertices: &[Point]) -> Result<Self, GeometryError> {
        let plane = validate(vertices)?;
        Ok(Self {
            vertices: vertices.to_vec(),
            plane,
            emission: Color::BLACK,
            material: Material::default(),
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }
}

surface!(Polygon);

/// Check that a vertex path forms a convex planar polygon, returning its plane.
pub(crate) fn validate(vertices: &[Point]) -> Result<Plane, GeometryError> {
    let size = vertices.len();
    if size < 3 {
        return Err(GeometryError::TooFewVertices(size));
    }

    // fails for co-located or collinear leading vertices
    let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
    if size == 3 {
        return Ok(plane);
    }

    let n = plane.plane_normal();

    // the cross product of consecutive edges must always point to the same side of the
    // plane; a zero cross product means a vertex lies on its neighbours' line
    let mut edge1 = vertices[size - 1].subtract(vertices[size - 2])?;
    let mut edge2 = vertices[0].subtract(vertices[size - 1])?;
    let positive = edge1.cross_product(edge2)?.dot_product(n) > 0.;

    for i in 1..size {
        if !is_zero(vertices[i].subtract(vertices[0])?.dot_product(n)) {
            return Err(GeometryError::NotCoplanar);
        }

        edge1 = edge2;
        edge2 = vertices[i].subtract(vertices[i - 1])?;
        if positive != (edge1.cross_product(edge2)?.dot_product(n) > 0.) {
            return Err(GeometryError::NotConvex);
        }
    }

    Ok(plane)
}

/// Whether a ray crossing the supporting plane passes strictly inside the vertex loop.
/// Hits on an edge or a vertex are rejected.
pub(crate) fn passes_inside(ray: &Ray, vertices: &[Point]) -> bool {
    let edge_sign = |a: Point, b: Point| -> Option<f64> {
        let va = a.subtract(ray.origin).ok()?;
        let vb = b.subtract(ray.origin).ok()?;
        let n = va.cross_product(vb).ok()?;
        let s = align_zero(ray.direction.dot_product(n));
        (s != 0.).then(|| s)
    };

    let mut first: Option<f64> = None;
    for i in 0..vertices.len() {
        let next = vertices[(i + 1) % vertices.len()];
        let s = match edge_sign(vertices[i], next) {
            Some(s) => s,
            None => return false,
        };

        match first {
            None => first = Some(s),
            Some(f) if f * s <= 0. => return false,
            _ => (),
        }
    }

    true
}

impl Intersectable for Polygon {
    fn find_geo_intersections_bounded(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        match self.plane.intersect_t(ray, max_distance) {
            Some(t) if passes_inside(ray, &self.vertices) => {
                vec![GeoPoint::new(self, ray.point_at(t))]
            }
            _ => vec![],
        }
    }
}

impl Geometry for Polygon {
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
