mod ambient;
mod directional;
mod point;
mod spot;

use crate::{
    material::Color,
    math::{Point, Vector},
};

pub use ambient::*;
pub use directional::*;
pub use point::*;
pub use spot::*;

/// This trait represents any light that illuminates surfaces from a direction.
/// It provides the light's intensity at a point, and where that light comes from.
pub trait LightSource: Send + Sync {
    /// The light's intensity arriving at a point.
    fn intensity_at(&self, point: Point) -> Color;

    /// The unit direction of the light travelling from the source to the point.
    /// `None` when the direction is undefined, e.g. the point is the light's position.
    fn direction_at(&self, point: Point) -> Option<Vector>;

    /// The distance between the point and the light. Infinite for lights with no position.
    fn distance(&self, point: Point) -> f64;
}
