use crate::{
    lighting::{AmbientLight, LightSource},
    material::Color,
    object::Geometries,
};

/// A scene, which contains the geometry, the lights, and the colors that surround them.
/// It is read-only while rendering.
pub struct Scene {
    pub name: String,

    /// The color of rays that strike nothing.
    pub background: Color,

    pub ambient_light: AmbientLight,
    pub geometries: Geometries,
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// An empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::BLACK,
            ambient_light: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    /// Add a light, builder style.
    pub fn with_light<L: LightSource + 'static>(mut self, light: L) -> Self {
        self.lights.push(Box::new(light));
        self
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("scene")
    }
}
