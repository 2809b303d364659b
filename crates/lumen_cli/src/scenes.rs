//! Built-in demo scenes.

use anyhow::Result;
use clap::ValueEnum;
use lumen_core::{AmbientLight, Color, DirectionalLight, Material, PointLight, SpotLight};
use lumen_math::{DVec3, Ray};
use lumen_renderer::{Camera, Cylinder, Geometry, Plane, Polygon, Scene, Sphere, Tube};

/// Selectable demo scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoScene {
    /// Transparent sphere around a smaller one under a spot light
    TwoSpheres,
    /// Two spheres reflected in a pair of large mirrors
    Mirrors,
    /// Transparent sphere casting a soft shadow on two triangles
    SoftShadow,
    /// Cylinders and a tube on a reflective floor
    Cylinders,
}

/// A scene together with the camera looking at it.
pub struct Demo {
    pub scene: Scene,
    pub camera: Camera,
}

impl DemoScene {
    pub fn build(self) -> Result<Demo> {
        match self {
            DemoScene::TwoSpheres => two_spheres(),
            DemoScene::Mirrors => mirrors(),
            DemoScene::SoftShadow => soft_shadow(),
            DemoScene::Cylinders => cylinders(),
        }
    }
}

/// Color from 8-bit channel values.
fn rgb(r: f64, g: f64, b: f64) -> Color {
    Color::new(r, g, b) / 255.0
}

fn front_camera(distance: f64, size: f64) -> Result<Camera> {
    Ok(Camera::builder()
        .location(DVec3::new(0.0, 0.0, distance))
        .direction(DVec3::NEG_Z, DVec3::Y)
        .vp_distance(distance)
        .vp_size(size, size)
        .build()?)
}

fn two_spheres() -> Result<Demo> {
    let mut scene = Scene::new("two spheres");
    scene.add_geometry(
        Geometry::new(Sphere::new(DVec3::new(0.0, 0.0, -50.0), 50.0)?)
            .with_emission(rgb(0.0, 0.0, 255.0))
            .with_material(Material::new().with_kd(0.4).with_ks(0.3).with_shininess(100).with_kt(0.3)),
    );
    scene.add_geometry(
        Geometry::new(Sphere::new(DVec3::new(0.0, 0.0, -50.0), 25.0)?)
            .with_emission(rgb(255.0, 0.0, 0.0))
            .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(100)),
    );
    scene.add_light(
        SpotLight::new(rgb(1000.0, 600.0, 0.0), DVec3::new(-100.0, -100.0, 500.0), DVec3::new(-1.0, -1.0, -2.0))?
            .with_kl(0.0004)
            .with_kq(0.000_000_6),
    );

    Ok(Demo {
        scene,
        camera: front_camera(1000.0, 150.0)?,
    })
}

fn mirrors() -> Result<Demo> {
    let mut scene = Scene::new("mirrors")
        .with_ambient_light(AmbientLight::new(Color::ONE, 0.1));
    scene.add_geometry(
        Geometry::new(Sphere::new(DVec3::new(-950.0, -900.0, -1000.0), 400.0)?)
            .with_emission(rgb(0.0, 50.0, 100.0))
            .with_material(
                Material::new()
                    .with_kd(0.25)
                    .with_ks(0.25)
                    .with_shininess(20)
                    .with_kt_rgb(DVec3::new(0.5, 0.0, 0.0)),
            ),
    );
    scene.add_geometry(
        Geometry::new(Sphere::new(DVec3::new(-950.0, -900.0, -1000.0), 200.0)?)
            .with_emission(rgb(100.0, 50.0, 20.0))
            .with_material(Material::new().with_kd(0.25).with_ks(0.25).with_shininess(20)),
    );
    scene.add_geometry(
        Geometry::new(Polygon::triangle(
            DVec3::new(1500.0, -1500.0, -1500.0),
            DVec3::new(-1500.0, 1500.0, -1500.0),
            DVec3::new(670.0, 670.0, 3000.0),
        )?)
        .with_emission(rgb(20.0, 20.0, 20.0))
        .with_material(Material::new().with_kr(1.0)),
    );
    scene.add_geometry(
        Geometry::new(Polygon::triangle(
            DVec3::new(1500.0, -1500.0, -1500.0),
            DVec3::new(-1500.0, 1500.0, -1500.0),
            DVec3::new(-1500.0, -1500.0, -2000.0),
        )?)
        .with_emission(rgb(20.0, 20.0, 20.0))
        .with_material(Material::new().with_kr_rgb(DVec3::new(0.5, 0.0, 0.4))),
    );
    scene.add_light(
        SpotLight::new(rgb(1020.0, 400.0, 400.0), DVec3::new(-750.0, -750.0, -150.0), DVec3::new(-1.0, -1.0, -4.0))?
            .with_kl(0.000_01)
            .with_kq(0.000_005),
    );

    Ok(Demo {
        scene,
        camera: front_camera(10000.0, 2500.0)?,
    })
}

fn soft_shadow() -> Result<Demo> {
    let surface = Material::new().with_kd(0.5).with_ks(0.5).with_shininess(60);

    let mut scene = Scene::new("soft shadow")
        .with_ambient_light(AmbientLight::new(Color::ONE, 0.15));
    scene.add_geometry(
        Geometry::new(Polygon::triangle(
            DVec3::new(-150.0, -150.0, -115.0),
            DVec3::new(150.0, -150.0, -135.0),
            DVec3::new(75.0, 75.0, -150.0),
        )?)
        .with_material(surface),
    );
    scene.add_geometry(
        Geometry::new(Polygon::triangle(
            DVec3::new(-150.0, -150.0, -115.0),
            DVec3::new(-70.0, 70.0, -140.0),
            DVec3::new(75.0, 75.0, -150.0),
        )?)
        .with_material(surface),
    );
    scene.add_geometry(
        Geometry::new(Sphere::new(DVec3::new(60.0, 50.0, -50.0), 30.0)?)
            .with_emission(rgb(0.0, 0.0, 255.0))
            .with_material(Material::new().with_kd(0.2).with_ks(0.2).with_shininess(30).with_kt(0.6)),
    );
    scene.add_light(
        SpotLight::new(rgb(700.0, 400.0, 400.0), DVec3::new(60.0, 50.0, 0.0), DVec3::NEG_Z)?
            .with_kl(4e-5)
            .with_kq(2e-7)
            .with_target_area(10.0, 8),
    );

    Ok(Demo {
        scene,
        camera: front_camera(1000.0, 200.0)?,
    })
}

fn cylinders() -> Result<Demo> {
    let mut scene = Scene::new("cylinders")
        .with_background(rgb(10.0, 10.0, 30.0))
        .with_ambient_light(AmbientLight::new(Color::ONE, 0.05));
    scene.add_geometry(
        Geometry::new(Plane::new(DVec3::new(0.0, -40.0, 0.0), DVec3::Y)?)
            .with_material(Material::new().with_kd(0.4).with_ks(0.2).with_shininess(10).with_kr(0.3)),
    );
    scene.add_geometry(
        Geometry::new(Cylinder::new(Ray::new(DVec3::new(-40.0, -40.0, -120.0), DVec3::Y)?, 20.0, 60.0)?)
            .with_emission(rgb(60.0, 0.0, 0.0))
            .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(40)),
    );
    scene.add_geometry(
        Geometry::new(Cylinder::new(Ray::new(DVec3::new(30.0, -40.0, -90.0), DVec3::new(1.0, 1.0, 0.0))?, 12.0, 50.0)?)
            .with_emission(rgb(0.0, 40.0, 20.0))
            .with_material(Material::new().with_kd(0.4).with_ks(0.6).with_shininess(80).with_kt(0.4)),
    );
    scene.add_geometry(
        Geometry::new(Tube::new(Ray::new(DVec3::new(0.0, 60.0, -250.0), DVec3::X)?, 10.0)?)
            .with_emission(rgb(30.0, 30.0, 60.0))
            .with_material(Material::new().with_kd(0.3).with_ks(0.3).with_shininess(20)),
    );
    scene.add_light(
        PointLight::new(rgb(500.0, 450.0, 400.0), DVec3::new(60.0, 80.0, 0.0))
            .with_kl(1e-4)
            .with_kq(5e-6)
            .with_target_area(15.0, 6),
    );
    scene.add_light(DirectionalLight::new(rgb(80.0, 80.0, 120.0), DVec3::new(-1.0, -2.0, -1.0))?);

    let camera = Camera::builder()
        .location(DVec3::new(0.0, 0.0, 200.0))
        .direction(DVec3::NEG_Z, DVec3::Y)
        .vp_distance(200.0)
        .vp_size(250.0, 250.0)
        .build()?;

    Ok(Demo { scene, camera })
}
