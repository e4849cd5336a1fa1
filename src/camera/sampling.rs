use serde::Deserialize;

use crate::{
    material::Color,
    math::{Point, Ray},
};

use super::Lens;

/// How many rays are traced through each pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Sampling {
    /// One ray through the pixel center.
    Single,

    /// A fixed grid of `floor(sqrt(rays))` squared sub-pixel rays, plus the center ray.
    Uniform { rays: usize },

    /// Recursive refinement that only subdivides where the corners disagree, down to
    /// a cell of `1 / floor(sqrt(rays))` of the pixel.
    Adaptive { rays: usize },
}

impl Default for Sampling {
    fn default() -> Self {
        Sampling::Single
    }
}

/// The side of the sub-pixel grid for a ray budget.
pub(crate) fn grid_size(rays: usize) -> usize {
    (rays as f64).sqrt().floor() as usize
}

/// A region of the view plane, in plane coordinates around the view plane center.
#[derive(Clone, Copy)]
struct Region {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Region {
    fn corners(&self) -> [(f64, f64); 4] {
        let (hw, hh) = (self.width / 2., self.height / 2.);
        [
            (self.x - hw, self.y + hh),
            (self.x + hw, self.y + hh),
            (self.x - hw, self.y - hh),
            (self.x + hw, self.y - hh),
        ]
    }

    fn quadrants(&self) -> [Region; 4] {
        let (qw, qh) = (self.width / 4., self.height / 4.);
        let (width, height) = (self.width / 2., self.height / 2.);
        [
            (self.x - qw, self.y + qh),
            (self.x + qw, self.y + qh),
            (self.x - qw, self.y - qh),
            (self.x + qw, self.y - qh),
        ]
        .map(|(x, y)| Region { x, y, width, height })
    }
}

impl Lens {
    pub(crate) fn construct_beam(&self, nx: u32, ny: u32, column: u32, row: u32, rays: usize) -> Vec<Ray> {
        let center = self.construct_ray(nx, ny, column, row);
        let k = grid_size(rays);
        if k <= 1 {
            return vec![center];
        }

        let (rx, ry) = self.pixel_size(nx, ny);
        let (xc, yc) = self.pixel_center(nx, ny, column, row);
        let (sw, sh) = (rx / k as f64, ry / k as f64);

        let mut beam = Vec::with_capacity(k * k + 1);
        beam.push(center);
        for a in 0..k {
            for b in 0..k {
                let x = xc - rx / 2. + (b as f64 + 0.5) * sw;
                let y = yc + ry / 2. - (a as f64 + 0.5) * sh;
                beam.push(self.ray_through(self.point_on_plane(x, y)));
            }
        }

        beam
    }

    pub(crate) fn adaptive_color(&self, nx: u32, ny: u32, column: u32, row: u32, rays: usize) -> Color {
        let k = grid_size(rays);
        if k <= 1 {
            return self.ray_tracer.trace_ray(&self.construct_ray(nx, ny, column, row));
        }

        let (rx, ry) = self.pixel_size(nx, ny);
        let (x, y) = self.pixel_center(nx, ny, column, row);
        let region = Region {
            x,
            y,
            width: rx,
            height: ry,
        };

        let (min_width, min_height) = (rx / k as f64, ry / k as f64);
        let mut samples = SampleCache::new(min_width.min(min_height));
        self.adaptive_rec(region, min_width, min_height, &mut samples)
    }

    fn adaptive_rec(&self, region: Region, min_width: f64, min_height: f64, samples: &mut SampleCache) -> Color {
        if region.width < 2. * min_width || region.height < 2. * min_height {
            let center = self.point_on_plane(region.x, region.y);
            return self.ray_tracer.trace_ray(&self.ray_through(center));
        }

        let colors = region
            .corners()
            .map(|(x, y)| self.sample(self.point_on_plane(x, y), samples));
        if colors[1..].iter().all(|c| c.is_almost_equal(&colors[0])) {
            return colors[0];
        }

        Color::average(
            region
                .quadrants()
                .map(|quadrant| self.adaptive_rec(quadrant, min_width, min_height, samples)),
        )
    }

    fn sample(&self, point: Point, samples: &mut SampleCache) -> Color {
        if let Some(color) = samples.get(point) {
            return color;
        }

        let color = self.ray_tracer.trace_ray(&self.ray_through(point));
        samples.insert(point, color);
        color
    }
}

/// Colors already traced for one pixel. Corners shared between neighbouring cells
/// are traced once.
struct SampleCache {
    /// Squared match distance, a quarter of the smallest cell. Distinct corners are
    /// always at least a cell apart.
    tolerance: f64,
    samples: Vec<(Point, Color)>,
}

impl SampleCache {
    fn new(min_cell: f64) -> Self {
        Self {
            tolerance: (min_cell / 4.).powi(2),
            samples: Vec::new(),
        }
    }

    fn get(&self, point: Point) -> Option<Color> {
        self.samples
            .iter()
            .find(|(p, _)| p.distance_squared(point) < self.tolerance)
            .map(|(_, color)| *color)
    }

    fn insert(&mut self, point: Point, color: Color) {
        self.samples.push((point, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid() {
        assert_eq!(grid_size(0), 0);
        assert_eq!(grid_size(1), 1);
        assert_eq!(grid_size(3), 1);
        assert_eq!(grid_size(4), 2);
        assert_eq!(grid_size(80), 8);
        assert_eq!(grid_size(81), 9);
    }

    #[test]
    fn default_is_single() {
        assert_eq!(Sampling::default(), Sampling::Single);
    }

    #[test]
    fn quadrants_tile_the_region() {
        let region = Region {
            x: 1.,
            y: -1.,
            width: 2.,
            height: 4.,
        };
        let quadrants = region.quadrants();
        assert_eq!((quadrants[0].x, quadrants[0].y), (0.5, 0.));
        assert_eq!((quadrants[3].x, quadrants[3].y), (1.5, -2.));
        assert!(quadrants.iter().all(|q| q.width == 1. && q.height == 2.));
        assert_eq!(region.corners()[0], (0., 1.));
    }

    #[test]
    fn cache_matches_within_a_fraction_of_a_cell() {
        let mut cache = SampleCache::new(0.2);
        let p = Point::new(1e6, 1e6, 1e6);
        cache.insert(p, Color::white());

        // a rounding error far larger than EPSILON still hits
        assert_eq!(cache.get(Point::new(1e6 + 1e-9, 1e6, 1e6)), Some(Color::white()));
        // the next corner over does not
        assert_eq!(cache.get(Point::new(1e6 + 0.2, 1e6, 1e6)), None);
    }
}
