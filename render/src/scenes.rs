use anyhow::{bail, Result};
use whitted::{
    lighting::{AmbientLight, DirectionalLight, SpotLight},
    material::{Color, Material},
    math::{Double3, Point, Vector},
    object::{Geometries, Sphere, Triangle},
    scene::Scene,
};

/// The scenes this binary knows how to build.
pub const NAMES: &[&str] = &["two-spheres", "mirrors", "shadow", "teddy-bear", "flat-sphere"];

/// Where the camera stands for a scene.
pub struct View {
    pub location: Point,
    pub to: Vector,
    pub up: Vector,
    /// The view plane is square.
    pub size: f64,
    pub distance: f64,
}

impl View {
    fn looking_down_z(z: f64, size: f64, distance: f64) -> Self {
        Self {
            location: Point::new(0., 0., z),
            to: -Vector::Z,
            up: Vector::Y,
            size,
            distance,
        }
    }
}

pub struct Demo {
    pub scene: Scene,
    pub view: View,
}

pub fn build(name: &str) -> Result<Demo> {
    match name {
        "two-spheres" => two_spheres(),
        "mirrors" => mirrors(),
        "shadow" => shadow(),
        "teddy-bear" => teddy_bear(),
        "flat-sphere" => flat_sphere(),
        _ => bail!("unknown scene {:?}, expected one of {:?}", name, NAMES),
    }
}

fn rgb(r: f64, g: f64, b: f64) -> Color {
    Color::new(r, g, b)
}

/// A blue glass sphere around a red one, under a spot light.
fn two_spheres() -> Result<Demo> {
    let center = Point::new(0., 0., -50.);
    let geometries = Geometries::new()
        .with(
            Sphere::new(center, 50.)?
                .with_emission(Color::blue())
                .with_material(Material::default().with_kd(0.4).with_ks(0.3).with_shininess(100).with_kt(0.3)),
        )
        .with(
            Sphere::new(center, 25.)?
                .with_emission(Color::red())
                .with_material(Material::default().with_kd(0.5).with_ks(0.5).with_shininess(100)),
        );

    let scene = Scene::new("two spheres").with_geometries(geometries).with_light(
        SpotLight::new(rgb(1000., 600., 0.), Point::new(-100., -100., 500.), Vector::new(-1., -1., -2.)?)
            .with_kl(0.0004)
            .with_kq(0.0000006),
    );

    Ok(Demo {
        scene,
        view: View::looking_down_z(1000., 150., 1000.),
    })
}

/// Nested spheres reflected in two large triangular mirrors.
fn mirrors() -> Result<Demo> {
    let center = Point::new(-950., -900., -1000.);
    let mirror_a = Point::new(1500., -1500., -1500.);
    let mirror_b = Point::new(-1500., 1500., -1500.);

    let geometries = Geometries::new()
        .with(
            Sphere::new(center, 400.)?
                .with_emission(rgb(0., 50., 100.))
                .with_material(
                    Material::default()
                        .with_kd(0.25)
                        .with_ks(0.25)
                        .with_shininess(20)
                        .with_kt(Double3::new(0.5, 0., 0.)),
                ),
        )
        .with(
            Sphere::new(center, 200.)?
                .with_emission(rgb(100., 50., 20.))
                .with_material(Material::default().with_kd(0.25).with_ks(0.25).with_shininess(20)),
        )
        .with(
            Triangle::new(mirror_a, mirror_b, Point::new(670., 670., 3000.))?
                .with_emission(rgb(20., 20., 20.))
                .with_material(Material::default().with_kr(1.)),
        )
        .with(
            Triangle::new(mirror_a, mirror_b, Point::new(-1500., -1500., -2000.))?
                .with_emission(rgb(20., 20., 20.))
                .with_material(Material::default().with_kr(Double3::new(0.5, 0., 0.4))),
        );

    let scene = Scene::new("mirrors")
        .with_geometries(geometries)
        .with_ambient_light(AmbientLight::new(Color::white(), 0.1))
        .with_light(
            SpotLight::new(rgb(1020., 400., 400.), Point::new(-750., -750., -150.), Vector::new(-1., -1., -4.)?)
                .with_kl(0.00001)
                .with_kq(0.000005),
        );

    Ok(Demo {
        scene,
        view: View::looking_down_z(10000., 2500., 10000.),
    })
}

/// Two triangles with a partial shadow cast by a transparent sphere.
fn shadow() -> Result<Demo> {
    let shared = Point::new(-150., -150., -115.);
    let far = Point::new(75., 75., -150.);
    let matte = Material::default().with_kd(0.5).with_ks(0.5).with_shininess(60);

    let geometries = Geometries::new()
        .with(Triangle::new(shared, Point::new(150., -150., -135.), far)?.with_material(matte))
        .with(Triangle::new(shared, Point::new(-70., 70., -140.), far)?.with_material(matte))
        .with(
            Sphere::new(Point::new(60., 50., -50.), 30.)?
                .with_emission(Color::blue())
                .with_material(Material::default().with_kd(0.2).with_ks(0.2).with_shininess(30).with_kt(0.6)),
        );

    let scene = Scene::new("shadow")
        .with_geometries(geometries)
        .with_ambient_light(AmbientLight::new(Color::white(), 0.15))
        .with_light(
            SpotLight::new(rgb(700., 400., 400.), Point::new(60., 50., 0.), -Vector::Z)
                .with_kl(4e-5)
                .with_kq(2e-7),
        );

    Ok(Demo {
        scene,
        view: View::looking_down_z(1000., 200., 1000.),
    })
}

/// A teddy bear holding a balloon with another balloon inside.
fn teddy_bear() -> Result<Demo> {
    let fur = rgb(153., 102., 0.);
    let pink = rgb(255., 0., 128.);
    let brown = rgb(69., 43., 29.);
    let plush = |kt: f64| Material::default().with_kd(0.6).with_ks(0.9).with_shininess(1000).with_kt(kt);
    let sphere = |x: f64, y: f64, z: f64, radius: f64| Sphere::new(Point::new(x, y, z), radius);

    let mut geometries = Geometries::new();

    // ears
    for x in [-50., 50.] {
        geometries.add(sphere(x, 75., -100., 20.)?.with_emission(fur).with_material(plush(0.15)));
    }
    for x in [-48., 48.] {
        geometries.add(sphere(x, 73., -100., 15.)?.with_emission(pink).with_material(plush(0.3)));
    }

    // blush
    geometries.add(sphere(25., 15., -100., 8.)?.with_emission(pink).with_material(plush(0.1)));
    geometries.add(sphere(-25., 15., -100., 8.)?.with_emission(pink).with_material(plush(0.2)));

    // eyes and nose
    for x in [18., -18.] {
        geometries.add(sphere(x, 22., -45., 7.)?.with_emission(brown));
    }
    geometries.add(
        Triangle::new(Point::new(-5., 14., 95.), Point::new(5., 14., 115.), Point::new(0., 10., 130.))?
            .with_emission(brown)
            .with_material(Material::default().with_kd(0.5).with_ks(0.5).with_shininess(30)),
    );

    // head, body, hands, legs
    geometries.add(sphere(0., 40., -100., 60.)?.with_emission(fur).with_material(plush(0.15)));
    geometries.add(sphere(0., -40., -120., 50.)?.with_emission(fur).with_material(plush(0.15)));
    for x in [-47., 47.] {
        geometries.add(sphere(x, -17., -100., 13.)?.with_emission(fur).with_material(plush(0.15)));
    }
    for x in [-40., 40.] {
        geometries.add(sphere(x, -70., -100., 20.)?.with_emission(fur).with_material(plush(0.15)));
    }

    // balloons and string
    geometries.add(
        sphere(-95., 70., -120., 36.)?
            .with_emission(Color::red())
            .with_material(Material::default().with_ks(0.2).with_shininess(1000).with_kt(0.6).with_kr(0.2)),
    );
    geometries.add(
        sphere(-95., 70., -120., 20.)?
            .with_emission(rgb(0., 100., 100.))
            .with_material(Material::default().with_kd(0.6).with_ks(0.9).with_shininess(1000).with_kr(1.)),
    );
    geometries.add(
        Triangle::new(Point::new(-70., 42., 95.), Point::new(-67., 42., 115.), Point::new(-40., -17., 130.))?
            .with_material(Material::default().with_kd(0.5).with_ks(0.5).with_shininess(30)),
    );

    let scene = Scene::new("teddy bear")
        .with_geometries(geometries)
        .with_background(rgb(167., 199., 231.))
        .with_light(
            SpotLight::new(rgb(1000., 600., 400.), Point::new(-250., 400., 1500.), Vector::new(-40., -1., -2.)?)
                .with_kl(0.0004)
                .with_kq(0.0000006),
        )
        .with_light(DirectionalLight::new(rgb(50., 100., 0.), Vector::new(-50., -1., -1.)?));

    Ok(Demo {
        scene,
        view: View::looking_down_z(1700., 150., 1000.),
    })
}

/// A single diffuse sphere lit only by ambient light. Renders as a flat disc.
fn flat_sphere() -> Result<Demo> {
    let scene = Scene::new("flat sphere")
        .with_geometries(
            Geometries::new().with(
                Sphere::new(Point::new(0., 0., -100.), 50.)?.with_material(Material::default().with_kd(1.)),
            ),
        )
        .with_ambient_light(AmbientLight::new(Color::white(), 0.1));

    Ok(Demo {
        scene,
        view: View::looking_down_z(1000., 150., 1000.),
    })
}
