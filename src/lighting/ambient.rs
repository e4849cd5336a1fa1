use crate::{material::Color, math::Double3};

/// A uniform light reaching every surface from everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient light at all.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::BLACK,
    };

    /// An ambient light with intensity `ia * ka`.
    pub fn new(ia: Color, ka: impl Into<Double3>) -> Self {
        Self {
            intensity: ia.attenuate(ka.into()),
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_is_scaled() {
        let ambient = AmbientLight::new(Color::new(200., 100., 50.), 0.1);
        assert_eq!(ambient.intensity(), Color::new(20., 10., 5.));

        let ambient = AmbientLight::new(Color::white(), Double3::new(1., 0., 0.5));
        assert_eq!(ambient.intensity(), Color::new(255., 0., 127.5));
    }
}
