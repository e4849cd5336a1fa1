mod double3;
mod point;
mod ray;
mod vector;

use thiserror::Error;

pub use double3::*;
pub use point::*;
pub use ray::*;
pub use vector::*;

/// Values closer to zero than this are snapped to exactly zero before sign tests.
pub const EPSILON: f64 = 1e-10;

/// An error produced by the vector algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("invalid vector: the zero vector is not allowed")]
    ZeroVector,
}

/// Snap a value to zero if it is within [`EPSILON`] of it.
pub fn align_zero(x: f64) -> f64 {
    if x.abs() < EPSILON {
        0.
    } else {
        x
    }
}

/// Whether a value is zero within [`EPSILON`].
pub fn is_zero(x: f64) -> bool {
    align_zero(x) == 0.
}
