use std::sync::Arc;

use log::trace;
use serde::Deserialize;

use crate::{
    lighting::LightSource,
    material::{Color, Material},
    math::{align_zero, Double3, Ray, Vector},
    object::{GeoPoint, Intersectable},
    scene::Scene,
};

/// Tracer options. Defaults are provided.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TracerOptions {
    /// The maximum number of levels in the reflection/refraction tree, counting the
    /// primary hit. At level 1 only local effects are computed.
    pub max_level: u32,

    /// Paths whose accumulated attenuation falls below this on every channel are dropped.
    pub min_k: f64,
}

impl Default for TracerOptions {
    fn default() -> Self {
        Self {
            max_level: 10,
            min_k: 0.001,
        }
    }
}

/// Computes the color seen along a ray.
pub trait RayTracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray) -> Color;

    /// The average color of a bundle of rays. Black when the bundle is empty.
    fn trace_rays(&self, rays: &[Ray]) -> Color {
        Color::average(rays.iter().map(|ray| self.trace_ray(ray)))
    }
}

/// A recursive Whitted-style tracer: Phong local illumination with transparent
/// shadows, plus mirror reflection and straight-through refraction.
pub struct SimpleRayTracer {
    scene: Arc<Scene>,
    options: TracerOptions,
}

impl SimpleRayTracer {
    pub fn new(scene: Arc<Scene>) -> Self {
        trace!("ray tracer created for scene {:?}", scene.name);
        Self {
            scene,
            options: TracerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TracerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn options(&self) -> &TracerOptions {
        &self.options
    }

    fn find_closest_intersection(&self, ray: &Ray) -> Option<GeoPoint<'_>> {
        ray.find_closest_geo_point(self.scene.geometries.find_geo_intersections(ray))
    }

    /// The full color of a hit. The ambient term is added once, outside the recursion.
    fn calc_color(&self, gp: GeoPoint<'_>, ray: &Ray) -> Color {
        self.calc_color_rec(gp, ray, self.options.max_level, Double3::ONE)
            + self.scene.ambient_light.intensity()
    }

    fn calc_color_rec(&self, gp: GeoPoint<'_>, ray: &Ray, level: u32, k: Double3) -> Color {
        let color = self.calc_local_effects(gp, ray, k);
        if level <= 1 {
            color
        } else {
            color + self.calc_global_effects(gp, ray, level, k)
        }
    }

    fn calc_local_effects(&self, gp: GeoPoint<'_>, ray: &Ray, k: Double3) -> Color {
        let mut color = gp.geometry.emission();

        let v = ray.direction;
        let n = gp.geometry.normal(gp.point);
        let nv = align_zero(n.dot_product(v));
        if nv == 0. {
            return color;
        }

        let material = gp.geometry.material();
        for light in self.scene.lights.iter() {
            let l = match light.direction_at(gp.point) {
                Some(l) => l,
                None => continue,
            };

            // the light and the viewer must be on the same side of the surface
            let nl = align_zero(n.dot_product(l));
            if nl * nv <= 0. {
                continue;
            }

            let ktr = self.transparency(gp, light.as_ref(), l, n);
            if ktr.product(k).lower_than(self.options.min_k) {
                continue;
            }

            let intensity = light.intensity_at(gp.point).attenuate(ktr);
            color = color
                + intensity.attenuate(calc_diffusive(material, nl))
                + intensity.attenuate(calc_specular(material, n, l, v));
        }

        color
    }

    /// How much of a light reaches a point through the geometry in between.
    fn transparency(&self, gp: GeoPoint<'_>, light: &dyn LightSource, l: Vector, n: Vector) -> Double3 {
        let light_ray = Ray::offset(gp.point, -l, n);
        let blockers = self
            .scene
            .geometries
            .find_geo_intersections_bounded(&light_ray, light.distance(gp.point));

        let mut ktr = Double3::ONE;
        for blocker in blockers {
            ktr = ktr.product(blocker.geometry.material().kt);
            if ktr.lower_than(self.options.min_k) {
                return Double3::ZERO;
            }
        }

        ktr
    }

    fn calc_global_effects(&self, gp: GeoPoint<'_>, ray: &Ray, level: u32, k: Double3) -> Color {
        let v = ray.direction;
        let n = gp.geometry.normal(gp.point);
        let material = gp.geometry.material();

        let reflected = match v.reflect(n) {
            Ok(r) => self.calc_global_effect(&Ray::offset(gp.point, r, n), material.kr, level, k),
            Err(_) => Color::BLACK,
        };
        let refracted = self.calc_global_effect(&Ray::offset(gp.point, v, n), material.kt, level, k);

        reflected + refracted
    }

    fn calc_global_effect(&self, ray: &Ray, kx: Double3, level: u32, k: Double3) -> Color {
        let kkx = kx.product(k);
        if kkx.lower_than(self.options.min_k) {
            return Color::BLACK;
        }

        match self.find_closest_intersection(ray) {
            Some(gp) => self.calc_color_rec(gp, ray, level - 1, kkx).attenuate(kx),
            None => self.scene.background.attenuate(kx),
        }
    }
}

impl RayTracer for SimpleRayTracer {
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.find_closest_intersection(ray) {
            Some(gp) => self.calc_color(gp, ray),
            None => self.scene.background,
        }
    }
}

fn calc_diffusive(material: &Material, nl: f64) -> Double3 {
    material.kd.scale(nl.abs())
}

/// Phong specular term, `ks * max(0, -v.r)^shininess` with `r` the light mirrored about the normal.
fn calc_specular(material: &Material, n: Vector, l: Vector, v: Vector) -> Double3 {
    let minus_vr = match l.reflect(n) {
        Ok(r) => -v.dot_product(r),
        Err(_) => return Double3::ZERO,
    };

    material.ks.scale(minus_vr.max(0.).powi(material.shininess))
}
