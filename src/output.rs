use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, Rgb, RgbImage};
use log::debug;

use crate::material::Color;

/// Where a camera puts the pixels it renders.
pub trait ImageWriter {
    /// The number of columns.
    fn width(&self) -> u32;

    /// The number of rows.
    fn height(&self) -> u32;

    /// Set one pixel. `(0, 0)` is the top left corner.
    fn write_pixel(&mut self, x: u32, y: u32, color: Color);

    /// Persist everything written so far.
    fn flush(&mut self) -> Result<(), ImageError>;
}

/// Keeps the image in memory and saves it as a PNG file on flush.
pub struct PngWriter {
    path: PathBuf,
    image: RgbImage,
}

impl PngWriter {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            image: RgbImage::new(width, height),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn buffer(&self) -> &RgbImage {
        &self.image
    }
}

impl ImageWriter for PngWriter {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.image.put_pixel(x, y, color.into());
    }

    fn flush(&mut self) -> Result<(), ImageError> {
        debug!("saving {}", self.path.display());
        self.image.save_with_format(&self.path, ImageFormat::Png)
    }
}
