use crate::{
    material::Color,
    math::{Point, Vector},
};

use super::LightSource;

/// A point light, which is a light that emits in all directions from a specified position.
/// Its intensity falls off as `1 / (kc + kl*d + kq*d^2)`.
#[derive(Clone, Debug)]
pub struct PointLight {
    /// The intensity of this light at its source.
    pub intensity: Color,

    /// The position in space of this light.
    pub position: Point,

    /// Constant attenuation.
    pub kc: f64,

    /// Linear attenuation.
    pub kl: f64,

    /// Quadratic attenuation.
    pub kq: f64,
}

impl PointLight {
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.,
            kl: 0.,
            kq: 0.,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Point) -> Color {
        let d2 = point.distance_squared(self.position);
        let d = d2.sqrt();
        self.intensity.scale(1. / (self.kc + self.kl * d + self.kq * d2))
    }

    fn direction_at(&self, point: Point) -> Option<Vector> {
        point.subtract(self.position).ok().map(Vector::normalize)
    }

    fn distance(&self, point: Point) -> f64 {
        point.distance(self.position)
    }
}
