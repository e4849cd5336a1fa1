use crate::{
    material::Color,
    math::{Point, Vector},
};

use super::LightSource;

/// A directional light, which has no position, just a vector direction that is
/// true for all points in the world.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _: Point) -> Color {
        self.intensity
    }

    fn direction_at(&self, _: Point) -> Option<Vector> {
        Some(self.direction)
    }

    fn distance(&self, _: Point) -> f64 {
        f64::INFINITY
    }
}
