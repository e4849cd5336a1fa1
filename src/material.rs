use std::ops::{Add, Mul};

use crate::math::Double3;

/// How far apart two channels may be for two colors to be considered the same.
pub const COLOR_TOLERANCE: f64 = 1.;

/// An RGB color on a 0-255 scale. Channels are unbounded while shading and clamped
/// only when converted to 24-bit output.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    rgb: Double3,
}

impl Color {
    pub const BLACK: Color = Color::new(0., 0., 0.);

    pub fn white() -> Self {
        Self::new(255., 255., 255.)
    }

    pub fn red() -> Self {
        Self::new(255., 0., 0.)
    }

    pub fn green() -> Self {
        Self::new(0., 255., 0.)
    }

    pub fn blue() -> Self {
        Self::new(0., 0., 255.)
    }

    /// Instantiate a new Color.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            rgb: Double3::new(r, g, b),
        }
    }

    pub fn r(&self) -> f64 {
        self.rgb.d1
    }

    pub fn g(&self) -> f64 {
        self.rgb.d2
    }

    pub fn b(&self) -> f64 {
        self.rgb.d3
    }

    pub fn add(self, other: Self) -> Self {
        Self {
            rgb: self.rgb + other.rgb,
        }
    }

    /// Scale every channel by the same factor.
    pub fn scale(self, k: f64) -> Self {
        Self {
            rgb: self.rgb.scale(k),
        }
    }

    /// Scale each channel by its own attenuation factor.
    pub fn attenuate(self, k: Double3) -> Self {
        Self {
            rgb: self.rgb.product(k),
        }
    }

    /// Divide every channel by `n`. Used for averaging.
    pub fn reduce(self, n: usize) -> Self {
        Self {
            rgb: self.rgb.reduce(n as f64),
        }
    }

    /// Whether two colors are perceptually the same, channel by channel.
    pub fn is_almost_equal(&self, other: &Self) -> bool {
        (self.r() - other.r()).abs() <= COLOR_TOLERANCE
            && (self.g() - other.g()).abs() <= COLOR_TOLERANCE
            && (self.b() - other.b()).abs() <= COLOR_TOLERANCE
    }

    /// The 24-bit value of this color, clamped.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            self.r().clamp(0., 255.) as u8,
            self.g().clamp(0., 255.) as u8,
            self.b().clamp(0., 255.) as u8,
        ]
    }

    /// Average a set of colors. An empty set is black.
    pub fn average<I: IntoIterator<Item = Color>>(colors: I) -> Self {
        let (sum, n) = colors
            .into_iter()
            .fold((Color::BLACK, 0), |(sum, n), c| (sum.add(c), n + 1));
        if n == 0 {
            Color::BLACK
        } else {
            sum.reduce(n)
        }
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Self) -> Self::Output {
        Color::add(self, rhs)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<Double3> for Color {
    type Output = Color;

    fn mul(self, rhs: Double3) -> Self::Output {
        self.attenuate(rhs)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb(color.to_rgb8())
    }
}

/// How a surface responds to light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse coefficient.
    pub kd: Double3,

    /// Specular coefficient.
    pub ks: Double3,

    /// Transparency. Scales both the light passing through in shadow tests and the
    /// refracted contribution.
    pub kt: Double3,

    /// Reflectance of the mirror contribution.
    pub kr: Double3,

    /// The exponent of the specular highlight.
    pub shininess: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: Double3::ZERO,
            ks: Double3::ZERO,
            kt: Double3::ZERO,
            kr: Double3::ZERO,
            shininess: 0,
        }
    }
}

impl Material {
    pub fn with_kd(mut self, kd: impl Into<Double3>) -> Self {
        self.kd = kd.into();
        self
    }

    pub fn with_ks(mut self, ks: impl Into<Double3>) -> Self {
        self.ks = ks.into();
        self
    }

    pub fn with_kt(mut self, kt: impl Into<Double3>) -> Self {
        self.kt = kt.into();
        self
    }

    pub fn with_kr(mut self, kr: impl Into<Double3>) -> Self {
        self.kr = kr.into();
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_clamped() {
        assert_eq!(Color::new(300., -5., 127.9).to_rgb8(), [255, 0, 127]);
    }

    #[test]
    fn average() {
        let avg = Color::average(vec![Color::new(10., 20., 30.), Color::new(30., 40., 50.)]);
        assert_eq!(avg, Color::new(20., 30., 40.));
        assert_eq!(Color::average(Vec::new()), Color::BLACK);
    }

    #[test]
    fn almost_equal() {
        let c = Color::new(100., 100., 100.);
        assert!(c.is_almost_equal(&Color::new(100.5, 99.5, 101.)));
        assert!(!c.is_almost_equal(&Color::new(100., 100., 102.)));
    }

    #[test]
    fn material_setters() {
        let m = Material::default().with_kd(0.5).with_kt(Double3::new(0.5, 0., 0.)).with_shininess(20);
        assert_eq!(m.kd, Double3::uniform(0.5));
        assert_eq!(m.kt, Double3::new(0.5, 0., 0.));
        assert_eq!(m.ks, Double3::ZERO);
        assert_eq!(m.shininess, 20);
    }
}
