//! The per-vertex record shared by both subpaths and by the MIS weighter,
//! and the bounded sequence type that holds them.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::color::{Color, BLACK, WHITE};
use crate::float::{Float, DIST_SQ_EPSILON};
use crate::ray::Ray;
use crate::scene::{Light, LightKind, Material};

/// A single vertex of a camera or light subpath.
///
/// Exactly one of `is_camera`, `is_light`, or "ordinary surface" (neither
/// flag set) holds. `is_specular` is independent of those three and only
/// meaningful on an ordinary surface vertex; light and camera vertices
/// always carry `is_specular = false`. `is_infinite_light` implies
/// `is_light`.
pub struct Vertex<'s> {
    pub position: Point3<Float>,
    /// Geometric/shading normal; for a camera vertex this is `-ray.dir`
    /// of the primary ray, matching the seeding convention in SS4.2.
    pub normal: Vector3<Float>,
    /// Direction the arriving ray came from, i.e. pointing away from the
    /// surface back toward the previous vertex in this subpath.
    pub wi: Vector3<Float>,

    pub is_camera: bool,
    pub is_light: bool,
    pub is_specular: bool,
    pub is_infinite_light: bool,

    pub material: Option<&'s dyn Material>,
    pub light: Option<(&'s dyn Light, usize)>,

    pub beta: Color,
    pub emitted: Color,

    /// Forward density: the probability (area measure, or solid-angle
    /// measure for an infinite-light vertex) of producing this vertex
    /// given the previous one, in this subpath's own generation
    /// direction.
    pub pdf_fwd: Float,
    /// Reverse density: the same quantity under the opposite generation
    /// direction. Written by the bounce that creates the *next* vertex,
    /// so it starts at 0 and is populated at most once after creation.
    pub pdf_rev: Float,
}

impl<'s> Vertex<'s> {
    pub fn camera_seed(position: Point3<Float>, normal: Vector3<Float>) -> Self {
        Vertex {
            position,
            normal,
            wi: normal,
            is_camera: true,
            is_light: false,
            is_specular: false,
            is_infinite_light: false,
            material: None,
            light: None,
            beta: WHITE,
            emitted: BLACK,
            pdf_fwd: 0.0,
            pdf_rev: 0.0,
        }
    }

    /// "Is on a real surface" per SS3: true for an ordinary surface vertex
    /// with a material, or a light vertex whose light is an area light;
    /// false for point lights, the camera endpoint, and infinite lights.
    pub fn is_on_surface(&self) -> bool {
        if self.is_camera || self.is_infinite_light {
            return false;
        }
        if self.material.is_some() {
            return true;
        }
        matches!(self.light, Some((light, _)) if light.kind() == LightKind::Area)
    }

    /// Not specular, and not a delta (point) light.
    pub fn is_connectible(&self) -> bool {
        if self.is_specular {
            return false;
        }
        if let Some((light, _)) = self.light {
            return !light.is_delta();
        }
        true
    }

    /// BRDF-ish value seen from this vertex toward `wo`, per the
    /// connection rules in SS4.3: an ordinary surface evaluates its
    /// material, a light vertex with no material (a pure emitter) passes
    /// light through unfiltered, an infinite-light endpoint never
    /// scatters, and anything else contributes nothing.
    pub fn f(&self, wo: Vector3<Float>) -> Color {
        if self.is_infinite_light {
            return BLACK;
        }
        if let Some(material) = self.material {
            return material.evaluate(self.wi, wo, self.normal);
        }
        if self.is_light {
            return WHITE;
        }
        BLACK
    }
}

/// Converts a solid-angle (or, for an infinite-light target, already
/// area-equivalent) density measured at `from` into the area-measure
/// density at `to`.
pub fn convert_density(pdf_dir: Float, from: Point3<Float>, to: &Vertex) -> Float {
    if to.is_infinite_light {
        return pdf_dir;
    }
    let d = to.position - from;
    let dist_sq = d.magnitude2();
    if dist_sq <= DIST_SQ_EPSILON {
        return 0.0;
    }
    let dir = d / dist_sq.sqrt();
    crate::sample::convert_density(pdf_dir, to.normal, dir, dist_sq)
}

/// A bounded sequence of vertices, built outward from one anchor (camera
/// or light) by the path extender. Never reordered or shrunk; dies with
/// the primary-ray evaluation that owns it.
pub struct Path<'s> {
    vertices: Vec<Vertex<'s>>,
}

impl<'s> Path<'s> {
    pub fn with_capacity(cap: usize) -> Self {
        Path {
            vertices: Vec::with_capacity(cap),
        }
    }

    pub fn push(&mut self, v: Vertex<'s>) {
        self.vertices.push(v);
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn last(&self) -> Option<&Vertex<'s>> {
        self.vertices.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Vertex<'s>> {
        self.vertices.last_mut()
    }
}

impl<'s> std::ops::Index<usize> for Path<'s> {
    type Output = Vertex<'s>;
    fn index(&self, i: usize) -> &Vertex<'s> {
        &self.vertices[i]
    }
}

impl<'s> std::ops::IndexMut<usize> for Path<'s> {
    fn index_mut(&mut self, i: usize) -> &mut Vertex<'s> {
        &mut self.vertices[i]
    }
}

/// A light-tracing contribution that targets whatever pixel the
/// connecting ray lands on, not necessarily the pixel of the primary ray
/// that produced it. The enclosing tile renderer (out of scope here)
/// resolves `ray` to a raster position.
#[derive(Copy, Clone, Debug)]
pub struct SplatRay {
    pub ray: Ray,
    pub color: Color,
}
