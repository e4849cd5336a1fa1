use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;

/// A pixel position in the image. Row 0 is the top of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub column: u32,
    pub row: u32,
}

/// Hands out every pixel of an image exactly once, in row-major order, to any number
/// of workers.
pub struct PixelCursor {
    width: u32,
    total: usize,
    next: AtomicUsize,
}

impl PixelCursor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            total: width as usize * height as usize,
            next: AtomicUsize::new(0),
        }
    }

    /// Claim the next pixel, or `None` once the image is exhausted.
    pub fn next(&self) -> Option<Pixel> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        if index >= self.total {
            return None;
        }

        // report every 10%
        let before = index * 10 / self.total;
        let after = (index + 1) * 10 / self.total;
        if after > before {
            debug!("{}% of pixels dispatched", after * 10);
        }

        let width = self.width as usize;
        Some(Pixel {
            column: (index % width) as u32,
            row: (index / width) as u32,
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// The number of workers to render with. Zero asks for every core but two, and a
/// machine with that few to spare gets a single worker.
pub fn worker_count(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }

    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let spare = cores.saturating_sub(2);
    if spare <= 2 {
        1
    } else {
        spare
    }
}
