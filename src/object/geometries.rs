use crate::math::Ray;

use super::{GeoPoint, Intersectable};

/// A composite of intersectables. Intersection is a linear scan over every child.
#[derive(Default)]
pub struct Geometries {
    children: Vec<Box<dyn Intersectable>>,
}

impl Geometries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child.
    pub fn add<I: Intersectable + 'static>(&mut self, child: I) {
        self.children.push(Box::new(child));
    }

    /// Append a child, builder style.
    pub fn with<I: Intersectable + 'static>(mut self, child: I) -> Self {
        self.add(child);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Intersectable for Geometries {
    fn find_geo_intersections_bounded(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        // results keep the children's order
        self.children
            .iter()
            .flat_map(|child| child.find_geo_intersections_bounded(ray, max_distance))
            .collect()
    }
}
