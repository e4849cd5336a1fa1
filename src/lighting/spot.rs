use crate::{
    material::Color,
    math::{Point, Vector},
};

use super::{LightSource, PointLight};

/// A point light that shines mostly along one direction. The intensity is scaled by
/// `max(0, dir . l) ^ narrow_beam`.
#[derive(Clone, Debug)]
pub struct SpotLight {
    light: PointLight,
    direction: Vector,
    narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> Self {
        Self {
            light: PointLight::new(intensity, position),
            direction: direction.normalize(),
            narrow_beam: 1.,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.light = self.light.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.light = self.light.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.light = self.light.with_kq(kq);
        self
    }

    /// Sharpen the beam. Higher values focus the light more tightly around its direction.
    pub fn with_narrow_beam(mut self, narrow_beam: f64) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Point) -> Color {
        let factor = match self.light.direction_at(point) {
            Some(l) => self.direction.dot_product(l).max(0.),
            None => 0.,
        };

        self.light
            .intensity_at(point)
            .scale(factor.powf(self.narrow_beam))
    }

    fn direction_at(&self, point: Point) -> Option<Vector> {
        self.light.direction_at(point)
    }

    fn distance(&self, point: Point) -> f64 {
        self.light.distance(point)
    }
}
