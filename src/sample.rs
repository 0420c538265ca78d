//! Small sampling and density-conversion helpers shared by the subpath
//! generators, the connection strategies and the baseline path tracer.

use cgmath::{InnerSpace, Vector3};
use rand::Rng;

use crate::float::{Float, DIST_SQ_EPSILON, INV_PI, PI};

/// Concentric mapping from a unit square to a unit disk (Shirley & Chiu).
pub fn concentric_sample_disk(u1: Float, u2: Float) -> (Float, Float) {
    let ox = 2.0 * u1 - 1.0;
    let oy = 2.0 * u2 - 1.0;
    if ox == 0.0 && oy == 0.0 {
        return (0.0, 0.0);
    }
    let (r, theta) = if ox.abs() > oy.abs() {
        (ox, (PI / 4.0) * (oy / ox))
    } else {
        (oy, (PI / 2.0) - (PI / 4.0) * (ox / oy))
    };
    (r * theta.cos(), r * theta.sin())
}

/// Cosine-weighted direction in the local frame (z is the normal).
/// Returns the direction together with its solid-angle density.
pub fn cosine_sample_hemisphere(u1: Float, u2: Float) -> (Vector3<Float>, Float) {
    let (x, y) = concentric_sample_disk(u1, u2);
    let z = (1.0 - x * x - y * y).max(0.0).sqrt();
    (Vector3::new(x, y, z), z * INV_PI)
}

pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta.max(0.0) * INV_PI
}

/// Uniform direction over the full sphere, used for point lights and
/// infinite-light direction sampling.
pub fn uniform_sample_sphere(u1: Float, u2: Float) -> (Vector3<Float>, Float) {
    let z = 1.0 - 2.0 * u1;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * u2;
    (Vector3::new(r * phi.cos(), r * phi.sin(), z), 1.0 / (4.0 * PI))
}

pub fn uniform_sphere_pdf() -> Float {
    1.0 / (4.0 * PI)
}

/// The power heuristic (beta = 2) used by the baseline path tracer to
/// weight next-event estimation against BSDF sampling.
pub fn power_heuristic(nf: u32, f_pdf: Float, ng: u32, g_pdf: Float) -> Float {
    let f = nf as Float * f_pdf;
    let g = ng as Float * g_pdf;
    if f == 0.0 && g == 0.0 {
        return 0.0;
    }
    (f * f) / (f * f + g * g)
}

/// Converts a solid-angle density at `from` into an area-measure density
/// at `to`, given the geometric normal at `to` and the squared distance
/// between the two points.
///
/// `p_area = p_solid_angle * |cos(theta_to)| / dist^2`
///
/// A zero or degenerate distance maps to zero, which is the correct
/// "this connection is impossible" value rather than an infinity.
pub fn convert_density(
    pdf_solid_angle: Float,
    to_normal: Vector3<Float>,
    from_to_dir: Vector3<Float>,
    dist_sq: Float,
) -> Float {
    if dist_sq <= DIST_SQ_EPSILON {
        return 0.0;
    }
    let cos_theta = to_normal.dot(from_to_dir).abs();
    pdf_solid_angle * cos_theta / dist_sq
}

/// Remaps a zero density to one, per the "remap-to-1" rule used when
/// comparing densities across strategies that may legitimately be zero
/// because the hinge vertex is a delta vertex.
pub fn remap0(pdf: Float) -> Float {
    if pdf == 0.0 {
        1.0
    } else {
        pdf
    }
}

pub fn rand_pair<R: Rng + ?Sized>(rng: &mut R) -> (Float, Float) {
    (rng.gen::<Float>(), rng.gen::<Float>())
}
