use crate::{
    math::{is_zero, Point, Vector},
    output::ImageWriter,
    tracer::RayTracer,
};

use super::{Camera, CameraError, Lens, Sampling};

/// Collects the settings of a [`Camera`] and validates them all at once.
pub struct CameraBuilder<W> {
    location: Option<Point>,
    direction: Option<(Vector, Vector)>,
    vp_size: Option<(f64, f64)>,
    vp_distance: Option<f64>,
    sampling: Sampling,
    threads: usize,
    image_writer: Option<W>,
    ray_tracer: Option<Box<dyn RayTracer>>,
}

impl<W: ImageWriter> Default for CameraBuilder<W> {
    fn default() -> Self {
        Self {
            location: None,
            direction: None,
            vp_size: None,
            vp_distance: None,
            sampling: Sampling::Single,
            threads: 0,
            image_writer: None,
            ray_tracer: None,
        }
    }
}

impl<W: ImageWriter> CameraBuilder<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The eye point.
    pub fn location(mut self, location: Point) -> Self {
        self.location = Some(location);
        self
    }

    /// The viewing direction and the up direction. They must be orthogonal.
    pub fn direction(mut self, to: Vector, up: Vector) -> Self {
        self.direction = Some((to, up));
        self
    }

    /// The size of the view plane, in scene units.
    pub fn vp_size(mut self, width: f64, height: f64) -> Self {
        self.vp_size = Some((width, height));
        self
    }

    /// The distance from the eye to the view plane.
    pub fn vp_distance(mut self, distance: f64) -> Self {
        self.vp_distance = Some(distance);
        self
    }

    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// The number of render workers. Zero picks a count from the available cores.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn image_writer(mut self, image_writer: W) -> Self {
        self.image_writer = Some(image_writer);
        self
    }

    pub fn ray_tracer(mut self, ray_tracer: Box<dyn RayTracer>) -> Self {
        self.ray_tracer = Some(ray_tracer);
        self
    }

    pub fn build(self) -> Result<Camera<W>, CameraError> {
        let location = self.location.ok_or(CameraError::Missing("location"))?;

        let (to, up) = self.direction.ok_or(CameraError::Missing("direction"))?;
        let (to, up) = (to.normalize(), up.normalize());
        if !is_zero(to.dot_product(up)) {
            return Err(CameraError::NotOrthogonal);
        }
        let right = to.cross_product(up)?.normalize();

        let (width, height) = self.vp_size.ok_or(CameraError::Missing("view plane size"))?;
        if !(width > 0. && height > 0.) {
            return Err(CameraError::InvalidViewPlaneSize);
        }

        let distance = self
            .vp_distance
            .ok_or(CameraError::Missing("view plane distance"))?;
        if !(distance > 0.) {
            return Err(CameraError::InvalidViewPlaneDistance);
        }

        let image_writer = self.image_writer.ok_or(CameraError::Missing("image writer"))?;
        let ray_tracer = self.ray_tracer.ok_or(CameraError::Missing("ray tracer"))?;

        Ok(Camera {
            lens: Lens {
                location,
                to,
                up,
                right,
                width,
                height,
                distance,
                sampling: self.sampling,
                ray_tracer,
            },
            threads: self.threads,
            image_writer,
        })
    }
}
