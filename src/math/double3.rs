use std::ops::{Add, Mul, Sub};

/// A plain triple of doubles. Used for coordinates and for per-channel
/// material coefficients.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Double3 {
    pub d1: f64,
    pub d2: f64,
    pub d3: f64,
}

impl Double3 {
    pub const ZERO: Double3 = Double3::new(0., 0., 0.);
    pub const ONE: Double3 = Double3::new(1., 1., 1.);

    /// Instantiate a new Double3.
    pub const fn new(d1: f64, d2: f64, d3: f64) -> Self {
        Self { d1, d2, d3 }
    }

    /// A triple with the same value in every component.
    pub const fn uniform(d: f64) -> Self {
        Self::new(d, d, d)
    }

    pub fn scale(self, rhs: f64) -> Self {
        Self::new(self.d1 * rhs, self.d2 * rhs, self.d3 * rhs)
    }

    /// Divide every component by a value.
    pub fn reduce(self, rhs: f64) -> Self {
        Self::new(self.d1 / rhs, self.d2 / rhs, self.d3 / rhs)
    }

    /// Component-wise product.
    pub fn product(self, rhs: Self) -> Self {
        Self::new(self.d1 * rhs.d1, self.d2 * rhs.d2, self.d3 * rhs.d3)
    }

    /// Whether all three components are strictly below `k`.
    pub fn lower_than(self, k: f64) -> bool {
        self.d1 < k && self.d2 < k && self.d3 < k
    }
}

impl From<f64> for Double3 {
    fn from(d: f64) -> Self {
        Self::uniform(d)
    }
}

impl Add for Double3 {
    type Output = Double3;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.d1 + rhs.d1, self.d2 + rhs.d2, self.d3 + rhs.d3)
    }
}

impl Sub for Double3 {
    type Output = Double3;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.d1 - rhs.d1, self.d2 - rhs.d2, self.d3 - rhs.d3)
    }
}

impl Mul for Double3 {
    type Output = Double3;

    fn mul(self, rhs: Self) -> Self::Output {
        self.product(rhs)
    }
}

impl Mul<f64> for Double3 {
    type Output = Double3;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}
