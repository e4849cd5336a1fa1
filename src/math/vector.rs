use std::ops::Neg;

use super::MathError;

/// A direction or displacement in 3D space. Never the zero vector.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Vector {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector {
    pub const X: Vector = Vector { x: 1., y: 0., z: 0. };
    pub const Y: Vector = Vector { x: 0., y: 1., z: 0. };
    pub const Z: Vector = Vector { x: 0., y: 0., z: 1. };

    /// Instantiate a new Vector, refusing the zero vector.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, MathError> {
        if x == 0. && y == 0. && z == 0. {
            return Err(MathError::ZeroVector);
        }

        Ok(Self { x, y, z })
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn z(self) -> f64 {
        self.z
    }

    pub fn add(self, other: Self) -> Result<Self, MathError> {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn subtract(self, other: Self) -> Result<Self, MathError> {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Scale this vector. Scaling by zero fails.
    pub fn scale(self, k: f64) -> Result<Self, MathError> {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    /// Find the dot product between two Vectors.
    pub fn dot_product(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross two Vectors. Parallel vectors fail.
    pub fn cross_product(self, other: Self) -> Result<Self, MathError> {
        Self::new(
            self.y * other.z - self.z * other.y,
            -self.x * other.z + self.z * other.x,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(self) -> f64 {
        self.dot_product(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Normalize this Vector by dividing it by its own length.
    pub fn normalize(self) -> Self {
        let len = self.length();
        Self {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }

    /// Mirror this vector about a surface with the given unit normal: `v - 2(v.n)n`.
    pub fn reflect(self, normal: Self) -> Result<Self, MathError> {
        let vn = self.dot_product(normal);
        Self::new(
            self.x - 2. * vn * normal.x,
            self.y - 2. * vn * normal.y,
            self.z - 2. * vn * normal.z,
        )
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}
