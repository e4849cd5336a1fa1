mod builder;
mod pixel;
mod sampling;

use std::{sync::mpsc, time::Instant};

use log::{debug, info};
use rayon::ThreadPoolBuilder;
use thiserror::Error;

use crate::{
    material::Color,
    math::{MathError, Point, Ray, Vector},
    output::ImageWriter,
    tracer::RayTracer,
};

pub use builder::*;
pub use pixel::*;
pub use sampling::*;

/// An error in the camera settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("missing camera setting: {0}")]
    Missing(&'static str),

    #[error("the camera's to and up vectors are not orthogonal")]
    NotOrthogonal,

    #[error("the view plane size must be positive")]
    InvalidViewPlaneSize,

    #[error("the view plane distance must be positive")]
    InvalidViewPlaneDistance,

    #[error(transparent)]
    Math(#[from] MathError),
}

/// An error while rendering or saving an image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not start the render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("could not write the image: {0}")]
    Image(#[from] image::ImageError),
}

/// Everything a render worker needs to turn a pixel into a color.
pub(crate) struct Lens {
    location: Point,
    to: Vector,
    up: Vector,
    right: Vector,
    width: f64,
    height: f64,
    distance: f64,
    sampling: Sampling,
    ray_tracer: Box<dyn RayTracer>,
}

impl Lens {
    fn pixel_size(&self, nx: u32, ny: u32) -> (f64, f64) {
        (self.width / nx as f64, self.height / ny as f64)
    }

    /// The center of a pixel, along `right` and `up` from the view plane center.
    fn pixel_center(&self, nx: u32, ny: u32, column: u32, row: u32) -> (f64, f64) {
        let (rx, ry) = self.pixel_size(nx, ny);
        let x = (column as f64 - (nx as f64 - 1.) / 2.) * rx;
        let y = -(row as f64 - (ny as f64 - 1.) / 2.) * ry;
        (x, y)
    }

    fn point_on_plane(&self, x: f64, y: f64) -> Point {
        self.location
            .add_scaled(self.to, self.distance)
            .add_scaled(self.right, x)
            .add_scaled(self.up, y)
    }

    fn ray_through(&self, point: Point) -> Ray {
        match point.subtract(self.location) {
            Ok(direction) => Ray::new(self.location, direction),
            // the view plane never contains the eye
            Err(_) => Ray::new(self.location, self.to),
        }
    }

    fn construct_ray(&self, nx: u32, ny: u32, column: u32, row: u32) -> Ray {
        let (x, y) = self.pixel_center(nx, ny, column, row);
        self.ray_through(self.point_on_plane(x, y))
    }

    fn pixel_color(&self, nx: u32, ny: u32, column: u32, row: u32) -> Color {
        match self.sampling {
            Sampling::Single => self.ray_tracer.trace_ray(&self.construct_ray(nx, ny, column, row)),
            Sampling::Uniform { rays } => self
                .ray_tracer
                .trace_rays(&self.construct_beam(nx, ny, column, row, rays)),
            Sampling::Adaptive { rays } => self.adaptive_color(nx, ny, column, row, rays),
        }
    }
}

/// A pinhole camera. It shoots rays through a view plane in front of it and writes
/// the resulting colors into its image writer.
pub struct Camera<W> {
    lens: Lens,
    threads: usize,
    image_writer: W,
}

impl<W: ImageWriter> Camera<W> {
    pub fn builder() -> CameraBuilder<W> {
        CameraBuilder::new()
    }

    /// The ray from the eye through the center of pixel (`column`, `row`) of an
    /// `nx` by `ny` grid laid over the view plane.
    pub fn construct_ray(&self, nx: u32, ny: u32, column: u32, row: u32) -> Ray {
        self.lens.construct_ray(nx, ny, column, row)
    }

    /// The center ray of a pixel followed by a uniform grid of rays across its footprint.
    pub fn construct_beam(&self, nx: u32, ny: u32, column: u32, row: u32, rays: usize) -> Vec<Ray> {
        self.lens.construct_beam(nx, ny, column, row, rays)
    }

    /// The color of a pixel by adaptive supersampling with a budget of `rays`.
    pub fn adaptive_color(&self, nx: u32, ny: u32, column: u32, row: u32, rays: usize) -> Color {
        self.lens.adaptive_color(nx, ny, column, row, rays)
    }

    /// The color of a pixel of the image, sampled as configured.
    pub fn pixel_color(&self, column: u32, row: u32) -> Color {
        let (nx, ny) = (self.image_writer.width(), self.image_writer.height());
        self.lens.pixel_color(nx, ny, column, row)
    }

    /// Render every pixel of the image into the image writer.
    pub fn render_image(&mut self) -> Result<&mut Self, RenderError> {
        let (nx, ny) = (self.image_writer.width(), self.image_writer.height());
        let threads = worker_count(self.threads);
        info!(
            "rendering {}x{} pixels with {:?} sampling on {} threads",
            nx, ny, self.lens.sampling, threads
        );
        let start = Instant::now();

        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        let cursor = PixelCursor::new(nx, ny);
        let lens = &self.lens;
        let writer = &mut self.image_writer;

        pool.in_place_scope(|scope| {
            let (tx, rx) = mpsc::channel();
            for _ in 0..threads {
                let tx = tx.clone();
                let cursor = &cursor;
                scope.spawn(move |_| {
                    while let Some(pixel) = cursor.next() {
                        let color = lens.pixel_color(nx, ny, pixel.column, pixel.row);
                        if tx.send((pixel, color)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);

            for (pixel, color) in rx {
                writer.write_pixel(pixel.column, pixel.row, color);
            }
        });

        info!("rendered in {:.3}s", start.elapsed().as_secs_f64());
        Ok(self)
    }

    /// Overwrite every pixel whose row or column is a multiple of `interval`.
    pub fn print_grid(&mut self, interval: u32, color: Color) -> &mut Self {
        if interval == 0 {
            return self;
        }

        let (nx, ny) = (self.image_writer.width(), self.image_writer.height());
        for row in 0..ny {
            for column in 0..nx {
                if row % interval == 0 || column % interval == 0 {
                    self.image_writer.write_pixel(column, row, color);
                }
            }
        }

        self
    }

    /// Flush the image writer.
    pub fn write_to_image(&mut self) -> Result<&mut Self, RenderError> {
        debug!("flushing image");
        self.image_writer.flush()?;
        Ok(self)
    }

    pub fn location(&self) -> Point {
        self.lens.location
    }

    pub fn to(&self) -> Vector {
        self.lens.to
    }

    pub fn up(&self) -> Vector {
        self.lens.up
    }

    pub fn right(&self) -> Vector {
        self.lens.right
    }

    /// The width of the view plane.
    pub fn width(&self) -> f64 {
        self.lens.width
    }

    /// The height of the view plane.
    pub fn height(&self) -> f64 {
        self.lens.height
    }

    /// The distance from the eye to the view plane.
    pub fn distance(&self) -> f64 {
        self.lens.distance
    }

    pub fn sampling(&self) -> Sampling {
        self.lens.sampling
    }

    pub fn image_writer(&self) -> &W {
        &self.image_writer
    }

    pub fn into_image_writer(self) -> W {
        self.image_writer
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::output::PngWriter;

    /// Every ray gets the same color.
    struct Flat(Color);

    impl RayTracer for Flat {
        fn trace_ray(&self, _: &Ray) -> Color {
            self.0
        }
    }

    /// Black left of the `x = 0` plane, white from it on. Counts the rays it traces.
    struct Split(Arc<AtomicUsize>);

    impl RayTracer for Split {
        fn trace_ray(&self, ray: &Ray) -> Color {
            self.0.fetch_add(1, Ordering::Relaxed);
            if ray.direction.x() < 0. {
                Color::BLACK
            } else {
                Color::white()
            }
        }
    }

    fn builder(tracer: Box<dyn RayTracer>) -> CameraBuilder<PngWriter> {
        Camera::builder()
            .location(Point::ZERO)
            .direction(-Vector::Z, Vector::Y)
            .vp_size(3., 3.)
            .vp_distance(1.)
            .image_writer(PngWriter::new("unused.png", 3, 3))
            .ray_tracer(tracer)
    }

    fn camera() -> Camera<PngWriter> {
        builder(Box::new(Flat(Color::BLACK))).build().unwrap()
    }

    fn assert_direction(ray: &Ray, x: f64, y: f64, z: f64) {
        let expected = Vector::new(x, y, z).unwrap().normalize();
        assert_abs_diff_eq!(ray.direction.x(), expected.x(), epsilon = 1e-12);
        assert_abs_diff_eq!(ray.direction.y(), expected.y(), epsilon = 1e-12);
        assert_abs_diff_eq!(ray.direction.z(), expected.z(), epsilon = 1e-12);
    }

    #[test]
    fn builder_validates() {
        let flat = || Box::new(Flat(Color::BLACK)) as Box<dyn RayTracer>;

        let missing = CameraBuilder::<PngWriter>::new().build();
        assert!(matches!(missing, Err(CameraError::Missing("location"))));

        let skewed = builder(flat()).direction(-Vector::Z, Vector::new(0., 1., 1.).unwrap()).build();
        assert!(matches!(skewed, Err(CameraError::NotOrthogonal)));

        let flat_plane = builder(flat()).vp_size(0., 3.).build();
        assert!(matches!(flat_plane, Err(CameraError::InvalidViewPlaneSize)));

        let behind = builder(flat()).vp_distance(-1.).build();
        assert!(matches!(behind, Err(CameraError::InvalidViewPlaneDistance)));

        let no_tracer = Camera::builder()
            .location(Point::ZERO)
            .direction(-Vector::Z, Vector::Y)
            .vp_size(3., 3.)
            .vp_distance(1.)
            .image_writer(PngWriter::new("unused.png", 3, 3))
            .build();
        assert!(matches!(no_tracer, Err(CameraError::Missing("ray tracer"))));
    }

    #[test]
    fn builder_normalizes() {
        let camera = builder(Box::new(Flat(Color::BLACK)))
            .direction(Vector::new(0., 0., -4.).unwrap(), Vector::new(0., 2., 0.).unwrap())
            .build()
            .unwrap();
        assert_eq!(camera.to(), -Vector::Z);
        assert_eq!(camera.up(), Vector::Y);
        assert_eq!(camera.right(), Vector::X);
        assert_eq!(camera.distance(), 1.);
    }

    #[test]
    fn construct_ray_through_pixel_centers() {
        let camera = camera();

        // 3x3 grid over a 3x3 plane: unit pixels
        let center = camera.construct_ray(3, 3, 1, 1);
        assert_eq!(center.origin, Point::ZERO);
        assert_direction(&center, 0., 0., -1.);
        assert_direction(&camera.construct_ray(3, 3, 0, 0), -1., 1., -1.);
        assert_direction(&camera.construct_ray(3, 3, 2, 1), 1., 0., -1.);

        // even grids have no center pixel
        assert_direction(&camera.construct_ray(4, 4, 0, 0), -1.125, 1.125, -1.);
        assert_direction(&camera.construct_ray(2, 2, 1, 1), 0.75, -0.75, -1.);
    }

    #[test]
    fn beam_covers_the_pixel() {
        let camera = camera();
        assert_eq!(camera.construct_beam(3, 3, 1, 1, 1).len(), 1);
        assert_eq!(camera.construct_beam(3, 3, 1, 1, 3).len(), 1);
        assert_eq!(camera.construct_beam(3, 3, 1, 1, 10).len(), 10);

        let beam = camera.construct_beam(3, 3, 1, 1, 4);
        assert_eq!(beam[0], camera.construct_ray(3, 3, 1, 1));
        assert_direction(&beam[1], -0.25, 0.25, -1.);
        assert_direction(&beam[4], 0.25, -0.25, -1.);

        // every ray stays inside the pixel's footprint on the view plane
        for ray in camera.construct_beam(3, 3, 1, 1, 81) {
            let t = -1. / ray.direction.z();
            assert!((ray.direction.x() * t).abs() < 0.5);
            assert!((ray.direction.y() * t).abs() < 0.5);
        }
    }

    #[test]
    fn adaptive_on_flat_pixel_traces_the_corners_once() {
        let rays = Arc::new(AtomicUsize::new(0));
        let camera = builder(Box::new(Split(rays.clone()))).build().unwrap();
        // column 2 is entirely right of x = 0
        assert_eq!(camera.adaptive_color(3, 3, 2, 1, 81), Color::white());
        assert_eq!(rays.load(Ordering::Relaxed), 4);

        let camera = builder(Box::new(Flat(Color::new(10., 20., 30.)))).build().unwrap();
        assert_eq!(camera.adaptive_color(3, 3, 0, 0, 81), Color::new(10., 20., 30.));
        assert_eq!(camera.adaptive_color(3, 3, 0, 0, 1), Color::new(10., 20., 30.));
    }

    #[test]
    fn adaptive_refines_edges() {
        let rays = Arc::new(AtomicUsize::new(0));
        let camera = builder(Box::new(Split(rays.clone())))
            .sampling(Sampling::Adaptive { rays: 16 })
            .build()
            .unwrap();

        // the center pixel straddles x = 0: its left half is black, its right half white
        let color = camera.pixel_color(1, 1);
        assert_abs_diff_eq!(color.r(), 127.5, epsilon = 1e-9);

        // 9 distinct corners on a 3x3 lattice plus 8 centers of the split quadrants;
        // tracing shared corners again would take 28
        assert_eq!(rays.load(Ordering::Relaxed), 17);
    }

    #[test]
    fn adaptive_reuses_corners_far_from_the_origin() {
        // pixels a third of a unit wide, so corner coordinates are not exact in binary
        let rays = Arc::new(AtomicUsize::new(0));
        let camera = builder(Box::new(Split(rays.clone())))
            .location(Point::new(1e6, 1e6, 1e6))
            .image_writer(PngWriter::new("unused.png", 9, 9))
            .build()
            .unwrap();

        let color = camera.adaptive_color(9, 9, 4, 4, 16);
        assert_abs_diff_eq!(color.r(), 127.5, epsilon = 1e-9);
        assert_eq!(rays.load(Ordering::Relaxed), 17);
    }

    #[test]
    fn print_grid_marks_rows_and_columns() {
        let mut camera = builder(Box::new(Flat(Color::BLACK)))
            .image_writer(PngWriter::new("unused.png", 4, 4))
            .build()
            .unwrap();
        camera.print_grid(2, Color::white());

        let writer = camera.image_writer();
        assert_eq!(writer.pixel(0, 0), image::Rgb([255, 255, 255]));
        assert_eq!(writer.pixel(1, 0), image::Rgb([255, 255, 255]));
        assert_eq!(writer.pixel(2, 3), image::Rgb([255, 255, 255]));
        assert_eq!(writer.pixel(1, 1), image::Rgb([0, 0, 0]));
        assert_eq!(writer.pixel(3, 3), image::Rgb([0, 0, 0]));
    }

    #[test]
    fn render_fills_every_pixel() {
        let mut camera = builder(Box::new(Flat(Color::new(1., 2., 3.))))
            .image_writer(PngWriter::new("unused.png", 7, 5))
            .threads(3)
            .build()
            .unwrap();
        camera.render_image().unwrap();

        let writer = camera.into_image_writer();
        assert!(writer.buffer().pixels().all(|p| *p == image::Rgb([1, 2, 3])));
    }
}
