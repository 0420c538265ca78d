//! A small analytic scene used only by this crate's own tests: two
//! occluding spheres (one diffuse, one mirror), a point light, an
//! emissive sphere acting as an area light, and a pinhole camera.
//! None of this is meant to be a real renderer's scene representation —
//! it exists to give the subpath generators, the strategies and the MIS
//! weighter something concrete to run against.

use cgmath::{InnerSpace, Point3, Vector3};

use super::{
    Camera, CameraSample, DirectSample, EmissionSample, Hit, Light, LightKind, LightSampler,
    Material, Sampler, ScatterSample, Scene,
};
use crate::color::{Color, BLACK};
use crate::float::{Float, DIST_SQ_EPSILON, EPSILON, INV_PI};
use crate::ray::Ray;
use crate::sample::{cosine_hemisphere_pdf, cosine_sample_hemisphere, uniform_sample_sphere};

fn to_world(local: Vector3<Float>, normal: Vector3<Float>) -> Vector3<Float> {
    let up = if normal.x.abs() > 0.9 {
        Vector3::unit_y()
    } else {
        Vector3::unit_x()
    };
    let tangent = up.cross(normal).normalize();
    let bitangent = normal.cross(tangent);
    tangent * local.x + bitangent * local.y + normal * local.z
}

fn reflect(wi: Vector3<Float>, normal: Vector3<Float>) -> Vector3<Float> {
    normal * 2.0 * wi.dot(normal) - wi
}

enum TestMaterial {
    Diffuse(Color),
    Mirror(Color),
    Emissive(Color),
}

impl Material for TestMaterial {
    fn scatter(&self, wi: Vector3<Float>, hit: &Hit, sampler: &mut dyn Sampler) -> Option<ScatterSample> {
        match self {
            TestMaterial::Diffuse(albedo) => {
                let (u1, u2) = sampler.next_2d();
                let (local, pdf) = cosine_sample_hemisphere(u1, u2);
                let wo = to_world(local, hit.normal);
                Some(ScatterSample {
                    wo,
                    attenuation: *albedo * INV_PI,
                    pdf,
                    is_specular: false,
                })
            }
            TestMaterial::Mirror(albedo) => Some(ScatterSample {
                wo: reflect(wi, hit.normal),
                attenuation: *albedo,
                pdf: 1.0,
                is_specular: true,
            }),
            TestMaterial::Emissive(_) => None,
        }
    }

    fn pdf(&self, _wi: Vector3<Float>, wo: Vector3<Float>, n: Vector3<Float>) -> (Float, bool) {
        match self {
            TestMaterial::Diffuse(_) => (cosine_hemisphere_pdf(n.dot(wo)), false),
            TestMaterial::Mirror(_) => (0.0, true),
            TestMaterial::Emissive(_) => (0.0, false),
        }
    }

    fn evaluate(&self, _wi: Vector3<Float>, wo: Vector3<Float>, n: Vector3<Float>) -> Color {
        match self {
            TestMaterial::Diffuse(albedo) if n.dot(wo) > 0.0 => *albedo * INV_PI,
            _ => BLACK,
        }
    }

    fn emit(&self, _wo: Vector3<Float>) -> Color {
        match self {
            TestMaterial::Emissive(radiance) => *radiance,
            _ => BLACK,
        }
    }
}

/// One of the two finite shapes the test fixture can hand the BVH-less
/// `TestScene::intersect` loop. Kept as a plain enum rather than a
/// `dyn Shape` object since this fixture never needs more than these two.
enum Shape {
    Sphere(SphereGeom),
    Rect(AxisRect),
}

impl Shape {
    fn intersect(&self, ray: &Ray) -> Option<(Float, Point3<Float>, Vector3<Float>)> {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Rect(r) => r.intersect(ray),
        }
    }
}

struct SphereGeom {
    center: Point3<Float>,
    radius: Float,
}

impl SphereGeom {
    fn intersect(&self, ray: &Ray) -> Option<(Float, Point3<Float>, Vector3<Float>)> {
        let oc = ray.origin - self.center;
        let a = ray.dir.dot(ray.dir);
        let b = 2.0 * oc.dot(ray.dir);
        let c = oc.dot(oc) - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t0 = (-b - sqrt_disc) / (2.0 * a);
        let t1 = (-b + sqrt_disc) / (2.0 * a);
        let t = if t0 > EPSILON && t0 < ray.t_max {
            t0
        } else if t1 > EPSILON && t1 < ray.t_max {
            t1
        } else {
            return None;
        };
        let point = ray.at(t);
        let normal = (point - self.center).normalize();
        Some((t, point, normal))
    }

    fn area(&self) -> Float {
        4.0 * crate::float::PI * self.radius * self.radius
    }
}

/// Which world axis an [`AxisRect`] is perpendicular to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
}

/// A finite axis-aligned rectangle: a fixed coordinate on one axis and
/// bounds on the other two. Used for the box walls and the ceiling
/// light in [`cornell_box_scene`] and the floor in [`ground_plane_scene`].
struct AxisRect {
    axis: Axis,
    k: Float,
    u_min: Float,
    u_max: Float,
    v_min: Float,
    v_max: Float,
    /// +1.0 or -1.0: which way the geometric normal faces along `axis`.
    normal_sign: Float,
}

impl AxisRect {
    fn normal(&self) -> Vector3<Float> {
        match self.axis {
            Axis::X => Vector3::new(self.normal_sign, 0.0, 0.0),
            Axis::Y => Vector3::new(0.0, self.normal_sign, 0.0),
            Axis::Z => Vector3::new(0.0, 0.0, self.normal_sign),
        }
    }

    fn area(&self) -> Float {
        (self.u_max - self.u_min) * (self.v_max - self.v_min)
    }

    fn intersect(&self, ray: &Ray) -> Option<(Float, Point3<Float>, Vector3<Float>)> {
        let (k_axis, u_axis, v_axis) = match self.axis {
            Axis::X => (ray.origin.x, ray.origin.y, ray.origin.z),
            Axis::Y => (ray.origin.y, ray.origin.x, ray.origin.z),
            Axis::Z => (ray.origin.z, ray.origin.x, ray.origin.y),
        };
        let (dk, du, dv) = match self.axis {
            Axis::X => (ray.dir.x, ray.dir.y, ray.dir.z),
            Axis::Y => (ray.dir.y, ray.dir.x, ray.dir.z),
            Axis::Z => (ray.dir.z, ray.dir.x, ray.dir.y),
        };
        if dk.abs() < DIST_SQ_EPSILON {
            return None;
        }
        let t = (self.k - k_axis) / dk;
        if t <= EPSILON || t >= ray.t_max {
            return None;
        }
        let u = u_axis + t * du;
        let v = v_axis + t * dv;
        if u < self.u_min || u > self.u_max || v < self.v_min || v > self.v_max {
            return None;
        }
        Some((t, ray.at(t), self.normal()))
    }

    /// Uniform point on the rectangle from two canonical samples.
    fn sample_point(&self, u1: Float, u2: Float) -> Point3<Float> {
        let u = self.u_min + u1 * (self.u_max - self.u_min);
        let v = self.v_min + u2 * (self.v_max - self.v_min);
        match self.axis {
            Axis::X => Point3::new(self.k, u, v),
            Axis::Y => Point3::new(u, self.k, v),
            Axis::Z => Point3::new(u, v, self.k),
        }
    }
}

struct PointLight {
    position: Point3<Float>,
    intensity: Color,
}

impl Light for PointLight {
    fn kind(&self) -> LightKind {
        LightKind::Point
    }

    fn sample_emission(&self, _u_pos: (Float, Float), u_dir: (Float, Float)) -> EmissionSample {
        let (dir, dir_pdf) = uniform_sample_sphere(u_dir.0, u_dir.1);
        EmissionSample {
            point: self.position,
            normal: dir,
            direction: dir,
            radiance: self.intensity,
            area_pdf: 1.0,
            direction_pdf: dir_pdf,
        }
    }

    fn sample_direct(
        &self,
        from: Point3<Float>,
        _from_normal: Vector3<Float>,
        _sampler: &mut dyn Sampler,
    ) -> Option<DirectSample> {
        let to_light = self.position - from;
        let dist_sq = to_light.magnitude2();
        if dist_sq <= DIST_SQ_EPSILON {
            return None;
        }
        let dist = dist_sq.sqrt();
        let direction = to_light / dist;
        Some(DirectSample {
            point: self.position,
            normal: direction,
            radiance: self.intensity / dist_sq,
            direction,
            distance: dist,
            pdf: 1.0,
        })
    }

    fn emission_pdf_position(&self, _point: Point3<Float>) -> Float {
        1.0
    }

    fn emission_pdf_direction(&self, _point: Point3<Float>, _direction: Vector3<Float>) -> Float {
        crate::sample::uniform_sphere_pdf()
    }
}

/// An emissive sphere, sampled by cosine-weighted direction about its own
/// surface normal at the sampled point (a one-sided diffuse emitter).
struct SphereLight {
    center: Point3<Float>,
    radius: Float,
    radiance: Color,
}

impl SphereLight {
    fn area(&self) -> Float {
        4.0 * crate::float::PI * self.radius * self.radius
    }
}

impl Light for SphereLight {
    fn kind(&self) -> LightKind {
        LightKind::Area
    }

    fn sample_emission(&self, u_pos: (Float, Float), u_dir: (Float, Float)) -> EmissionSample {
        let (normal, _) = uniform_sample_sphere(u_pos.0, u_pos.1);
        let point = self.center + normal * self.radius;
        let (local, dir_pdf) = cosine_sample_hemisphere(u_dir.0, u_dir.1);
        let direction = to_world(local, normal);
        EmissionSample {
            point,
            normal,
            direction,
            radiance: self.radiance,
            area_pdf: 1.0 / self.area(),
            direction_pdf: dir_pdf,
        }
    }

    fn sample_direct(
        &self,
        from: Point3<Float>,
        _from_normal: Vector3<Float>,
        sampler: &mut dyn Sampler,
    ) -> Option<DirectSample> {
        let (u1, u2) = sampler.next_2d();
        let (normal, _) = uniform_sample_sphere(u1, u2);
        let point = self.center + normal * self.radius;

        let to_point = point - from;
        let dist_sq = to_point.magnitude2();
        if dist_sq <= DIST_SQ_EPSILON {
            return None;
        }
        let dist = dist_sq.sqrt();
        let direction = to_point / dist;

        let cos_light = normal.dot(-direction);
        if cos_light <= 0.0 {
            return None;
        }

        let pdf = (1.0 / self.area()) * dist_sq / cos_light;
        Some(DirectSample {
            point,
            normal,
            radiance: self.radiance,
            direction,
            distance: dist,
            pdf,
        })
    }

    fn emission_pdf_position(&self, _point: Point3<Float>) -> Float {
        1.0 / self.area()
    }

    fn emission_pdf_direction(&self, point: Point3<Float>, direction: Vector3<Float>) -> Float {
        let normal = (point - self.center) / self.radius;
        cosine_hemisphere_pdf(normal.dot(direction))
    }
}

/// A one-sided diffuse area light shaped like an [`AxisRect`], used for
/// the ceiling light in [`cornell_box_scene`]. Mirrors [`SphereLight`]'s
/// sampling shape with a fixed (rather than per-sample) normal.
struct RectLight {
    rect: AxisRect,
    radiance: Color,
}

impl Light for RectLight {
    fn kind(&self) -> LightKind {
        LightKind::Area
    }

    fn sample_emission(&self, u_pos: (Float, Float), u_dir: (Float, Float)) -> EmissionSample {
        let point = self.rect.sample_point(u_pos.0, u_pos.1);
        let normal = self.rect.normal();
        let (local, dir_pdf) = cosine_sample_hemisphere(u_dir.0, u_dir.1);
        let direction = to_world(local, normal);
        EmissionSample {
            point,
            normal,
            direction,
            radiance: self.radiance,
            area_pdf: 1.0 / self.rect.area(),
            direction_pdf: dir_pdf,
        }
    }

    fn sample_direct(
        &self,
        from: Point3<Float>,
        _from_normal: Vector3<Float>,
        sampler: &mut dyn Sampler,
    ) -> Option<DirectSample> {
        let (u1, u2) = sampler.next_2d();
        let point = self.rect.sample_point(u1, u2);
        let normal = self.rect.normal();

        let to_point = point - from;
        let dist_sq = to_point.magnitude2();
        if dist_sq <= DIST_SQ_EPSILON {
            return None;
        }
        let dist = dist_sq.sqrt();
        let direction = to_point / dist;

        let cos_light = normal.dot(-direction);
        if cos_light <= 0.0 {
            return None;
        }

        let pdf = (1.0 / self.rect.area()) * dist_sq / cos_light;
        Some(DirectSample {
            point,
            normal,
            radiance: self.radiance,
            direction,
            distance: dist,
            pdf,
        })
    }

    fn emission_pdf_position(&self, _point: Point3<Float>) -> Float {
        1.0 / self.rect.area()
    }

    fn emission_pdf_direction(&self, _point: Point3<Float>, direction: Vector3<Float>) -> Float {
        cosine_hemisphere_pdf(self.rect.normal().dot(direction))
    }
}

/// A uniform-radiance "sky" infinite light, gradient-shaded between a
/// horizon and zenith color purely as a visual stand-in — the MIS-facing
/// densities treat it as emitting uniformly over the sphere of
/// directions, matching `sample_emission`/`sample_direct` below.
struct GradientSky {
    top: Color,
    bottom: Color,
    scene_radius: Float,
}

impl GradientSky {
    fn shade(&self, dir: Vector3<Float>) -> Color {
        let t = 0.5 * (dir.y + 1.0);
        self.bottom * (1.0 - t) + self.top * t
    }
}

impl Light for GradientSky {
    fn kind(&self) -> LightKind {
        LightKind::Infinite
    }

    fn sample_emission(&self, u_pos: (Float, Float), u_dir: (Float, Float)) -> EmissionSample {
        let (outward, _) = uniform_sample_sphere(u_pos.0, u_pos.1);
        let point = Point3::new(0.0, 0.0, 0.0) + outward * self.scene_radius;
        let direction = -outward;
        let (_to_scene, dir_pdf) = uniform_sample_sphere(u_dir.0, u_dir.1);
        EmissionSample {
            point,
            normal: outward,
            direction,
            radiance: self.shade(direction),
            area_pdf: 1.0 / (crate::float::PI * self.scene_radius * self.scene_radius),
            direction_pdf: dir_pdf,
        }
    }

    fn sample_direct(
        &self,
        _from: Point3<Float>,
        _from_normal: Vector3<Float>,
        sampler: &mut dyn Sampler,
    ) -> Option<DirectSample> {
        let (u1, u2) = sampler.next_2d();
        let (direction, pdf) = uniform_sample_sphere(u1, u2);
        if pdf <= 0.0 {
            return None;
        }
        let distance = 2.0 * self.scene_radius;
        Some(DirectSample {
            point: Point3::new(0.0, 0.0, 0.0) + direction * distance,
            normal: -direction,
            radiance: self.shade(direction),
            direction,
            distance,
            pdf,
        })
    }

    fn emission_pdf_position(&self, _point: Point3<Float>) -> Float {
        0.0
    }

    fn emission_pdf_direction(&self, _point: Point3<Float>, _direction: Vector3<Float>) -> Float {
        crate::sample::uniform_sphere_pdf()
    }

    fn emit(&self, ray: &Ray) -> Color {
        self.shade(ray.dir)
    }
}

struct UniformLightSampler {
    count: usize,
}

impl LightSampler for UniformLightSampler {
    fn sample(&self, u: Float) -> (usize, Float) {
        if self.count == 0 {
            return (0, 0.0);
        }
        let idx = ((u * self.count as Float) as usize).min(self.count - 1);
        (idx, 1.0 / self.count as Float)
    }

    fn pdf(&self, _light_index: usize, _at_point: Point3<Float>, _at_normal: Vector3<Float>) -> Float {
        if self.count == 0 {
            0.0
        } else {
            1.0 / self.count as Float
        }
    }
}

pub struct TestScene {
    /// Each shape's geometry, its material index, and (for shapes that
    /// are themselves an area light's surface) the index of that light
    /// in `lights`.
    shapes: Vec<(Shape, usize, Option<usize>)>,
    materials: Vec<TestMaterial>,
    lights: Vec<Box<dyn Light>>,
    light_sampler: UniformLightSampler,
    scene_radius: Float,
}

impl Scene for TestScene {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut best: Option<(Float, Point3<Float>, Vector3<Float>, usize, Option<usize>)> = None;
        for (geom, material_index, light_index) in &self.shapes {
            if let Some((t, point, normal)) = geom.intersect(ray) {
                if best.map_or(true, |(best_t, ..)| t < best_t) {
                    best = Some((t, point, normal, *material_index, *light_index));
                }
            }
        }
        best.map(|(_, point, normal, material_index, light_index)| Hit {
            point,
            normal,
            material: &self.materials[material_index] as &dyn Material,
            area_light: light_index.map(|li| (self.lights[li].as_ref(), li)),
        })
    }

    fn occluded(&self, ray: &Ray) -> bool {
        self.shapes.iter().any(|(geom, ..)| geom.intersect(ray).is_some())
    }

    fn radius(&self) -> Float {
        self.scene_radius
    }

    fn lights(&self) -> &[Box<dyn Light>] {
        &self.lights
    }

    fn light_sampler(&self) -> &dyn LightSampler {
        &self.light_sampler
    }
}

pub struct TestCamera {
    eye: Point3<Float>,
    forward: Vector3<Float>,
    right: Vector3<Float>,
    up: Vector3<Float>,
    dist: Float,
    half_size: Float,
}

impl TestCamera {
    fn image_area(&self) -> Float {
        let side = 2.0 * self.half_size;
        side * side
    }
}

impl Camera for TestCamera {
    fn generate_ray(&self, pixel: (Float, Float), _lens_u: (Float, Float)) -> (Ray, Color) {
        let x = (pixel.0 * 2.0 - 1.0) * self.half_size;
        let y = (1.0 - pixel.1 * 2.0) * self.half_size;
        let dir = (self.forward * self.dist + self.right * x + self.up * y).normalize();
        (Ray::new(self.eye, dir), crate::color::WHITE)
    }

    fn ray_pdfs(&self, ray: &Ray) -> (Float, Float) {
        let cos_theta = self.forward.dot(ray.dir);
        if cos_theta <= 0.0 {
            return (0.0, 0.0);
        }
        let dir_pdf = self.dist * self.dist / (cos_theta.powi(3) * self.image_area());
        (1.0, dir_pdf)
    }

    fn sample_from_point(&self, point: Point3<Float>, _u: (Float, Float)) -> Option<CameraSample> {
        let to_point = point - self.eye;
        let dist_sq = to_point.magnitude2();
        if dist_sq <= DIST_SQ_EPSILON {
            return None;
        }
        let dist = dist_sq.sqrt();
        let dir = to_point / dist;
        let cos_theta = self.forward.dot(dir);
        if cos_theta <= 0.0 {
            return None;
        }
        let importance = 1.0 / (self.image_area() * cos_theta.powi(4));
        Some(CameraSample {
            ray: Ray::new(self.eye, dir),
            weight: Color::gray(importance),
            pdf: 1.0,
        })
    }
}

pub struct SceneFixture {
    pub scene: TestScene,
    pub camera: TestCamera,
}

impl SceneFixture {
    pub fn camera_ray(&self, u: Float, v: Float) -> Ray {
        self.camera.generate_ray((u, v), (0.0, 0.0)).0
    }
}

/// Two occluding spheres, a point light and an emissive sphere acting as
/// an area light, viewed through a simple pinhole camera at the origin
/// looking down `-z`.
pub fn simple_sphere_scene() -> SceneFixture {
    let materials = vec![
        TestMaterial::Diffuse(Color::new(0.8, 0.3, 0.3)),
        TestMaterial::Mirror(Color::gray(0.9)),
        TestMaterial::Emissive(Color::gray(8.0)),
    ];

    let shapes = vec![
        (
            Shape::Sphere(SphereGeom {
                center: Point3::new(0.0, 0.0, -4.0),
                radius: 1.0,
            }),
            0,
            None,
        ),
        (
            Shape::Sphere(SphereGeom {
                center: Point3::new(-2.0, 0.5, -5.0),
                radius: 0.5,
            }),
            1,
            None,
        ),
        (
            Shape::Sphere(SphereGeom {
                center: Point3::new(2.0, 2.0, -3.0),
                radius: 0.3,
            }),
            2,
            Some(1),
        ),
    ];

    let point_light: Box<dyn Light> = Box::new(PointLight {
        position: Point3::new(1.5, 3.0, -2.0),
        intensity: Color::gray(6.0),
    });
    let area_light: Box<dyn Light> = Box::new(SphereLight {
        center: Point3::new(2.0, 2.0, -3.0),
        radius: 0.3,
        radiance: Color::gray(8.0),
    });
    let lights = vec![point_light, area_light];
    let light_sampler = UniformLightSampler { count: lights.len() };

    let scene = TestScene {
        shapes,
        materials,
        lights,
        light_sampler,
        scene_radius: 10.0,
    };

    let camera = TestCamera {
        eye: Point3::new(0.0, 0.0, 0.0),
        forward: Vector3::new(0.0, 0.0, -1.0),
        right: Vector3::new(1.0, 0.0, 0.0),
        up: Vector3::new(0.0, 1.0, 0.0),
        dist: 1.0,
        half_size: 0.5,
    };

    SceneFixture { scene, camera }
}

/// A Cornell-box-shaped fixture (floor, ceiling, back wall, red/green
/// side walls, one rectangular ceiling light) for scenario tests that
/// need a closed room with a single area light rather than the open
/// sphere scene above.
pub struct CornellFixture {
    pub scene: TestScene,
    pub camera: TestCamera,
    /// World-space centroid of the ceiling light, handy for building
    /// test rays that deliberately aim at it.
    pub light_center: Point3<Float>,
}

pub fn cornell_box_scene() -> CornellFixture {
    let (width, height, depth) = (556.0, 548.8, 559.2);
    let light_y = height - 0.8;
    let (light_x0, light_x1) = (213.0, 343.0);
    let (light_z0, light_z1) = (227.0, 332.0);
    let light_center = Point3::new(
        (light_x0 + light_x1) / 2.0,
        light_y,
        (light_z0 + light_z1) / 2.0,
    );

    let materials = vec![
        TestMaterial::Diffuse(Color::gray(0.73)),
        TestMaterial::Diffuse(Color::new(0.65, 0.05, 0.05)),
        TestMaterial::Diffuse(Color::new(0.12, 0.45, 0.15)),
        TestMaterial::Emissive(Color::gray(15.0)),
    ];

    let light_rect = AxisRect {
        axis: Axis::Y,
        k: light_y,
        u_min: light_x0,
        u_max: light_x1,
        v_min: light_z0,
        v_max: light_z1,
        normal_sign: -1.0,
    };

    let shapes = vec![
        (
            Shape::Rect(AxisRect {
                axis: Axis::Y,
                k: 0.0,
                u_min: 0.0,
                u_max: width,
                v_min: 0.0,
                v_max: depth,
                normal_sign: 1.0,
            }),
            0,
            None,
        ),
        (
            Shape::Rect(AxisRect {
                axis: Axis::Y,
                k: height,
                u_min: 0.0,
                u_max: width,
                v_min: 0.0,
                v_max: depth,
                normal_sign: -1.0,
            }),
            0,
            None,
        ),
        (
            Shape::Rect(AxisRect {
                axis: Axis::Z,
                k: depth,
                u_min: 0.0,
                u_max: width,
                v_min: 0.0,
                v_max: height,
                normal_sign: -1.0,
            }),
            0,
            None,
        ),
        (
            Shape::Rect(AxisRect {
                axis: Axis::X,
                k: 0.0,
                u_min: 0.0,
                u_max: height,
                v_min: 0.0,
                v_max: depth,
                normal_sign: 1.0,
            }),
            1,
            None,
        ),
        (
            Shape::Rect(AxisRect {
                axis: Axis::X,
                k: width,
                u_min: 0.0,
                u_max: height,
                v_min: 0.0,
                v_max: depth,
                normal_sign: -1.0,
            }),
            2,
            None,
        ),
        (
            Shape::Rect(AxisRect {
                axis: Axis::Y,
                k: light_y,
                u_min: light_x0,
                u_max: light_x1,
                v_min: light_z0,
                v_max: light_z1,
                normal_sign: -1.0,
            }),
            3,
            Some(0),
        ),
    ];

    let light: Box<dyn Light> = Box::new(RectLight {
        rect: light_rect,
        radiance: Color::gray(15.0),
    });
    let lights = vec![light];
    let light_sampler = UniformLightSampler { count: lights.len() };

    let scene_radius = 0.5 * (width * width + height * height + depth * depth).sqrt();
    let scene = TestScene {
        shapes,
        materials,
        lights,
        light_sampler,
        scene_radius,
    };

    let camera = TestCamera {
        eye: Point3::new(width / 2.0, 273.0, -800.0),
        forward: Vector3::new(0.0, 0.0, 1.0),
        right: Vector3::new(1.0, 0.0, 0.0),
        up: Vector3::new(0.0, 1.0, 0.0),
        dist: 1.0,
        half_size: 0.26,
    };

    CornellFixture {
        scene,
        camera,
        light_center,
    }
}

/// A single large floor plane under a gradient infinite light.
/// `mirror` picks between a diffuse and a perfectly specular floor
/// material.
pub struct GroundFixture {
    pub scene: TestScene,
    pub camera: TestCamera,
}

pub fn ground_plane_scene(mirror: bool) -> GroundFixture {
    let materials = vec![if mirror {
        TestMaterial::Mirror(Color::gray(0.9))
    } else {
        TestMaterial::Diffuse(Color::gray(0.5))
    }];

    let shapes = vec![(
        Shape::Rect(AxisRect {
            axis: Axis::Y,
            k: 0.0,
            u_min: -1.0e4,
            u_max: 1.0e4,
            v_min: -1.0e4,
            v_max: 1.0e4,
            normal_sign: 1.0,
        }),
        0,
        None,
    )];

    let scene_radius = 1.0e4;
    let sky: Box<dyn Light> = Box::new(GradientSky {
        top: Color::new(0.5, 0.7, 1.0),
        bottom: Color::gray(1.0),
        scene_radius,
    });
    let lights = vec![sky];
    let light_sampler = UniformLightSampler { count: lights.len() };

    let scene = TestScene {
        shapes,
        materials,
        lights,
        light_sampler,
        scene_radius,
    };

    let camera = TestCamera {
        eye: Point3::new(0.0, 0.75, 2.0),
        forward: Vector3::new(0.0, 0.0, -1.0),
        right: Vector3::new(1.0, 0.0, 0.0),
        up: Vector3::new(0.0, 1.0, 0.0),
        dist: 1.0,
        half_size: 0.5,
    };

    GroundFixture { scene, camera }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_ray_points_into_the_scene() {
        let fixture = simple_sphere_scene();
        let ray = fixture.camera_ray(0.5, 0.5);
        assert!(fixture.scene.intersect(&ray).is_some());
    }

    #[test]
    fn sphere_geom_area_matches_surface_area_formula() {
        let geom = SphereGeom {
            center: Point3::new(0.0, 0.0, 0.0),
            radius: 2.0,
        };
        assert!((geom.area() - 4.0 * crate::float::PI * 4.0).abs() < 1e-4);
    }
}
