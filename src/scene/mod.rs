//! Trait contracts this crate consumes from the (out of scope) scene
//! database, material system, light implementations and camera model.
//!
//! Every one of these is a borrowed, read-only handle: the integrator
//! never mutates scene data and never owns the lifetime of a light or
//! material. `testscene` is a small concrete implementation of these
//! traits used only by this crate's own tests.

pub mod testscene;

use cgmath::{Point3, Vector3};

use crate::color::Color;
use crate::float::Float;
use crate::ray::Ray;

/// A sampler handle. Production callers wrap an RNG (or a low-discrepancy
/// sequence); anything implementing `rand::Rng` gets this for free via the
/// blanket impl below.
pub trait Sampler {
    fn next_1d(&mut self) -> Float;
    fn next_2d(&mut self) -> (Float, Float);
}

impl<R: rand::Rng> Sampler for R {
    fn next_1d(&mut self) -> Float {
        self.gen()
    }

    fn next_2d(&mut self) -> (Float, Float) {
        crate::sample::rand_pair(self)
    }
}

/// Surface hit returned by the scene's closest-hit query.
pub struct Hit<'s> {
    pub point: Point3<Float>,
    pub normal: Vector3<Float>,
    pub material: &'s dyn Material,
    /// The light this surface belongs to, and its index into
    /// [`Scene::lights`], when the primitive hit is itself an area light
    /// (as opposed to an ordinary surface that merely emits with no
    /// sampleable light wrapping it). `None` for every non-emissive
    /// surface and for emissive surfaces the scene doesn't expose as a
    /// sampleable light. Needed by the path extender so a vertex landed
    /// on by a BVH trace carries the same light identity a direct-lighting
    /// sample of that light would have, for the light-origin density hinge.
    pub area_light: Option<(&'s dyn Light, usize)>,
}

/// What a material's `scatter` call produces: the new outgoing direction,
/// how much of the incoming light it carries, the solid-angle density it
/// was sampled with, and whether the interaction is a delta (specular)
/// event.
pub struct ScatterSample {
    pub wo: Vector3<Float>,
    pub attenuation: Color,
    pub pdf: Float,
    pub is_specular: bool,
}

pub trait Material {
    /// Sample a scattered direction given the incoming direction `wi`
    /// (pointing away from the surface, back toward where the ray came
    /// from) and the hit record. `None` means the ray was absorbed.
    fn scatter(&self, wi: Vector3<Float>, hit: &Hit, sampler: &mut dyn Sampler) -> Option<ScatterSample>;

    /// Density (and delta-ness) with which `wo` would be produced by a
    /// scatter call whose incoming direction was `wi`.
    fn pdf(&self, wi: Vector3<Float>, wo: Vector3<Float>, n: Vector3<Float>) -> (Float, bool);

    /// BRDF value for an explicit pair of directions, used by connection
    /// strategies rather than by sampling.
    fn evaluate(&self, wi: Vector3<Float>, wo: Vector3<Float>, n: Vector3<Float>) -> Color;

    /// Self-emitted radiance seen by a ray leaving in direction `wo`
    /// (pointing away from the surface). Non-emissive materials return
    /// black.
    fn emit(&self, _wo: Vector3<Float>) -> Color {
        crate::color::BLACK
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LightKind {
    Area,
    Point,
    Infinite,
}

pub struct EmissionSample {
    pub point: Point3<Float>,
    pub normal: Vector3<Float>,
    pub direction: Vector3<Float>,
    pub radiance: Color,
    pub area_pdf: Float,
    pub direction_pdf: Float,
}

pub struct DirectSample {
    pub point: Point3<Float>,
    pub normal: Vector3<Float>,
    pub radiance: Color,
    pub direction: Vector3<Float>,
    pub distance: Float,
    pub pdf: Float,
}

pub trait Light {
    fn kind(&self) -> LightKind;

    fn is_delta(&self) -> bool {
        self.kind() == LightKind::Point
    }

    /// Sample an emission event: a point (and, for area lights, a normal)
    /// on the light, an outgoing direction, the emitted radiance, and the
    /// area- and direction-measure densities of that sample.
    fn sample_emission(&self, u_pos: (Float, Float), u_dir: (Float, Float)) -> EmissionSample;

    /// Sample a point on the light directly visible-ish from `from`, for
    /// next-event estimation. `pdf` is already multiplied by whatever
    /// selection probability picked this light.
    fn sample_direct(
        &self,
        from: Point3<Float>,
        from_normal: Vector3<Float>,
        sampler: &mut dyn Sampler,
    ) -> Option<DirectSample>;

    /// Per-area density of having sampled `point` as the emission origin
    /// (1 / area for area lights; `1.0` for point lights, whose position
    /// is deterministic once the light itself is chosen). Not meaningful
    /// for infinite lights, whose origin density is computed separately
    /// by `mis::infinite_light_density`.
    fn emission_pdf_position(&self, point: Point3<Float>) -> Float;

    /// Directional density (solid angle) of having sampled `direction`
    /// as the outgoing emission direction from `point`: cos(theta)/pi
    /// for area lights, the light's own directional distribution for
    /// point and infinite lights.
    fn emission_pdf_direction(&self, point: Point3<Float>, direction: Vector3<Float>) -> Float;

    /// Background radiance along a ray that escaped the scene. Only
    /// infinite lights return anything non-black here.
    fn emit(&self, _ray: &Ray) -> Color {
        crate::color::BLACK
    }
}

pub trait LightSampler {
    /// Pick one light given a single uniform sample, returning its index
    /// and the probability with which it was chosen.
    fn sample(&self, u: Float) -> (usize, Float);

    /// The probability `sample` would have picked `light_index`, given a
    /// receiving point and normal (uniform and power-based samplers both
    /// ignore the point; spatially adaptive ones may not).
    fn pdf(&self, light_index: usize, at_point: Point3<Float>, at_normal: Vector3<Float>) -> Float;
}

pub struct CameraSample {
    pub ray: Ray,
    pub weight: Color,
    pub pdf: Float,
}

pub trait Camera {
    /// The primary ray for a pixel/lens sample, used by the baseline path
    /// tracer and by tests. Not part of the BDPT connection contract.
    fn generate_ray(&self, pixel: (Float, Float), lens_u: (Float, Float)) -> (Ray, Color);

    /// Decompose a ray already known to originate at the camera into its
    /// area-measure (lens) and direction-measure (pixel) densities.
    fn ray_pdfs(&self, ray: &Ray) -> (Float, Float);

    /// Sample a point on the camera importance-visible from `point`,
    /// returning the connecting ray (pointing from the camera toward
    /// `point`), an importance weight, and the density of the sample.
    fn sample_from_point(&self, point: Point3<Float>, u: (Float, Float)) -> Option<CameraSample>;
}

/// Read-only scene handle: geometry, lights and camera, queried only
/// through the traits above.
pub trait Scene {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>>;
    fn occluded(&self, ray: &Ray) -> bool;

    /// Bounding scene radius, used to normalize infinite-light area
    /// densities. Defaults to 1 for scenes with no finite geometry.
    fn radius(&self) -> Float {
        1.0
    }

    fn lights(&self) -> &[Box<dyn Light>];
    fn light_sampler(&self) -> &dyn LightSampler;

    fn infinite_lights(&self) -> Vec<&dyn Light> {
        self.lights()
            .iter()
            .map(|l| l.as_ref())
            .filter(|l| l.kind() == LightKind::Infinite)
            .collect()
    }
}
