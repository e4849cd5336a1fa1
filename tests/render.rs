use std::sync::Arc;

use image::Rgb;
use whitted::{
    camera::{Camera, Sampling},
    lighting::{AmbientLight, SpotLight},
    material::{Color, Material},
    math::{Point, Vector},
    object::{Geometries, Sphere},
    output::{ImageWriter, PngWriter},
    scene::Scene,
    tracer::SimpleRayTracer,
};

const BACKGROUND: Color = Color::new(0., 0., 200.);

/// A camera on the z axis looking down at the origin.
fn camera(scene: &Arc<Scene>, z: f64, vp_size: f64, pixels: u32, sampling: Sampling, threads: usize) -> Camera<PngWriter> {
    Camera::builder()
        .location(Point::new(0., 0., z))
        .direction(-Vector::Z, Vector::Y)
        .vp_size(vp_size, vp_size)
        .vp_distance(z)
        .sampling(sampling)
        .threads(threads)
        .image_writer(PngWriter::new("unused.png", pixels, pixels))
        .ray_tracer(Box::new(SimpleRayTracer::new(scene.clone())))
        .build()
        .unwrap()
}

/// The distance of a pixel center from the image center, in view plane units.
fn radius(column: u32, row: u32, pixels: u32, vp_size: f64) -> f64 {
    let size = vp_size / pixels as f64;
    let half = (pixels as f64 - 1.) / 2.;
    let x = (column as f64 - half) * size;
    let y = (row as f64 - half) * size;
    (x * x + y * y).sqrt()
}

/// A unit sphere at the origin with only ambient light.
fn ambient_sphere() -> Arc<Scene> {
    Arc::new(
        Scene::new("ambient sphere")
            .with_background(BACKGROUND)
            .with_ambient_light(AmbientLight::new(Color::white(), 0.1))
            .with_geometries(
                Geometries::new().with(Sphere::new(Point::ZERO, 1.).unwrap().with_material(Material::default().with_kd(1.))),
            ),
    )
}

/// A transparent blue sphere around an opaque red one, under a green spot light.
fn concentric_spheres() -> Arc<Scene> {
    let center = Point::new(0., 0., -50.);
    Arc::new(
        Scene::new("concentric spheres")
            .with_geometries(
                Geometries::new()
                    .with(
                        Sphere::new(center, 50.)
                            .unwrap()
                            .with_emission(Color::new(0., 0., 100.))
                            .with_material(Material::default().with_kd(0.4).with_ks(0.3).with_shininess(100).with_kt(0.5)),
                    )
                    .with(
                        Sphere::new(center, 25.)
                            .unwrap()
                            .with_emission(Color::new(200., 0., 0.))
                            .with_material(Material::default().with_kd(0.5).with_ks(0.5).with_shininess(100)),
                    ),
            )
            .with_light(
                SpotLight::new(Color::new(0., 600., 0.), Point::new(0., 0., 500.), -Vector::Z)
                    .with_kl(0.0004)
                    .with_kq(0.0000006),
            ),
    )
}

#[test]
fn ambient_sphere_is_flat() {
    // the sphere's silhouette on the view plane has a radius of 10 / sqrt(99)
    let scene = ambient_sphere();
    let mut camera = camera(&scene, 10., 3., 30, Sampling::Single, 2);
    camera.render_image().unwrap();

    let writer = camera.image_writer();
    for row in 0..30 {
        for column in 0..30 {
            let r = radius(column, row, 30, 3.);
            let pixel = writer.pixel(column, row);
            if r < 0.9 {
                assert_eq!(pixel, Rgb([25, 25, 25]), "pixel ({}, {})", column, row);
            } else if r > 1.1 {
                assert_eq!(pixel, Rgb([0, 0, 200]), "pixel ({}, {})", column, row);
            }
        }
    }
}

#[test]
fn inner_sphere_has_a_sharp_silhouette() {
    // silhouettes on the view plane: about 23.8 for the inner sphere, 47.7 for the outer
    let scene = concentric_spheres();
    let mut camera = camera(&scene, 1000., 150., 50, Sampling::Single, 4);
    camera.render_image().unwrap();

    let writer = camera.image_writer();
    for row in 0..50 {
        for column in 0..50 {
            let r = radius(column, row, 50, 150.);
            let Rgb([red, _, blue]) = writer.pixel(column, row);
            if r < 20. {
                // seen through the outer sphere
                assert!(red >= 99, "pixel ({}, {}) is {}", column, row, red);
            } else if r > 27. && r < 44. {
                assert_eq!(red, 0, "pixel ({}, {})", column, row);
                assert!(blue > 0);
            } else if r > 51. {
                assert_eq!(writer.pixel(column, row), Rgb([0, 0, 0]));
            }
        }
    }
}

#[test]
fn thread_count_does_not_change_the_image() {
    let scene = concentric_spheres();
    let render = |threads: usize| {
        let mut camera = camera(&scene, 1000., 150., 40, Sampling::Uniform { rays: 4 }, threads);
        camera.render_image().unwrap();
        camera.into_image_writer().buffer().clone()
    };

    let single = render(1);
    assert_eq!(single, render(3));
    assert_eq!(single, render(8));
    assert_eq!(single, render(1));
}

#[test]
fn adaptive_matches_single_on_flat_pixels() {
    let scene = ambient_sphere();
    let single = camera(&scene, 10., 3., 30, Sampling::Single, 1);
    let adaptive = camera(&scene, 10., 3., 30, Sampling::Adaptive { rays: 81 }, 1);

    for (column, row) in [(15, 15), (14, 14), (12, 17), (0, 0), (29, 3)] {
        assert_eq!(single.pixel_color(column, row), adaptive.pixel_color(column, row));
    }
}

#[test]
fn supersampling_blends_the_silhouette() {
    // a 3x3 image of a plane 3 wide: the center pixel's right edge sits on the sphere's edge
    let scene = Arc::new(
        Scene::new("edge").with_background(Color::BLACK).with_geometries(
            Geometries::new().with(Sphere::new(Point::new(-1., 0., -10.), 1.5).unwrap().with_emission(Color::white())),
        ),
    );

    for sampling in [Sampling::Uniform { rays: 81 }, Sampling::Adaptive { rays: 81 }] {
        let camera = camera(&scene, 10., 3., 3, sampling, 1);
        let c = camera.pixel_color(1, 1);
        assert!(c.r() > 0. && c.r() < 255., "{:?} gave {:?}", sampling, c);
    }

    let camera = camera(&scene, 10., 3., 3, Sampling::Single, 1);
    assert_eq!(camera.pixel_color(1, 1), Color::white());
    assert_eq!(camera.image_writer().width(), 3);
}
