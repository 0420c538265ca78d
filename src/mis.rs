//! The balance-heuristic MIS weighter.
//!
//! Implements only the **on-demand** variant: every hypothetical density
//! is recomputed from the path data at the moment it's needed, never
//! written back into a `Vertex`. The mutating save/restore variant pbrt
//! also describes is deliberately not implemented here.

use cgmath::InnerSpace;

use crate::float::Float;
use crate::ray::Ray;
use crate::sample::remap0;
use crate::scene::{Camera, Scene};
use crate::vertex::{convert_density, Path, Vertex};

/// The solid-angle density that `vertex` would sample `target`'s
/// direction under the alternative strategy being hypothesized, already
/// converted to an area density at `target` ("general vertex density").
///
/// When `vertex` is itself a light, the area density is computed
/// directly (distance-squared and the target's cosine folded in by
/// hand) rather than through the generic solid-angle-then-convert path,
/// since a light's "direction pdf" already needs that special handling
/// for infinite lights.
fn general_vertex_density(
    scene: &dyn Scene,
    camera: &dyn Camera,
    vertex: &Vertex,
    prev: Option<&Vertex>,
    target: &Vertex,
) -> Float {
    if vertex.is_light {
        return light_emission_density(scene, vertex, target);
    }

    let wn = target.position - vertex.position;
    let dist_sq = wn.magnitude2();
    if dist_sq <= crate::float::DIST_SQ_EPSILON {
        return 0.0;
    }
    let wn = wn / dist_sq.sqrt();

    let pdf_dir = if vertex.is_camera {
        let ray = Ray::new(vertex.position, wn);
        let (_area_pdf, dir_pdf) = camera.ray_pdfs(&ray);
        dir_pdf
    } else {
        let material = match vertex.material {
            Some(m) => m,
            None => return 0.0,
        };
        let wp = match prev {
            Some(p) => {
                let d = p.position - vertex.position;
                if d.magnitude2() <= crate::float::DIST_SQ_EPSILON {
                    return 0.0;
                }
                d / cgmath::InnerSpace::magnitude(d)
            }
            None => return 0.0,
        };
        let (pdf, is_delta) = material.pdf(wp, wn, vertex.normal);
        if is_delta {
            return 0.0;
        }
        pdf
    };

    convert_density(pdf_dir, vertex.position, target)
}

/// The area density with which a light vertex would have emitted toward
/// `target`, including `target`'s own cosine factor when it is on a real
/// surface (the light branch of "general vertex density").
fn light_emission_density(scene: &dyn Scene, light_vertex: &Vertex, target: &Vertex) -> Float {
    let w = target.position - light_vertex.position;
    let dist_sq = w.magnitude2();
    if dist_sq <= crate::float::DIST_SQ_EPSILON {
        return 0.0;
    }
    let w = w / dist_sq.sqrt();

    let mut pdf = if light_vertex.is_infinite_light {
        infinite_light_density(scene, target.position, target.normal, -w)
    } else {
        match light_vertex.light {
            Some((light, _idx)) => light.emission_pdf_direction(light_vertex.position, w) / dist_sq,
            None => 0.0,
        }
    };

    if target.is_on_surface() {
        pdf *= target.normal.dot(w).abs();
    }
    pdf
}

/// The reverse density of a light vertex under the hypothesis that the
/// alternative strategy sampled *that same light* as an origin, given a
/// receiving point/normal to evaluate selection probability at
/// ("light-origin density").
fn light_origin_density(
    scene: &dyn Scene,
    light_vertex: &Vertex,
    receiving_point: cgmath::Point3<Float>,
    receiving_normal: cgmath::Vector3<Float>,
) -> Float {
    if light_vertex.is_infinite_light {
        let dir = (light_vertex.position - receiving_point);
        let dist_sq = dir.magnitude2();
        if dist_sq <= crate::float::DIST_SQ_EPSILON {
            return 0.0;
        }
        return infinite_light_density(scene, receiving_point, receiving_normal, dir / dist_sq.sqrt());
    }
    match light_vertex.light {
        Some((light, idx)) => {
            let area_pdf = light.emission_pdf_position(light_vertex.position);
            let selection_pdf = scene.light_sampler().pdf(idx, receiving_point, receiving_normal);
            area_pdf * selection_pdf
        }
        None => 0.0,
    }
}

/// Aggregate directional density of all infinite lights in the scene
/// toward `direction` (pointing from `point` away from the surface, the
/// "wi" convention), each weighted by its own selection probability
/// ("infinite-light density").
pub fn infinite_light_density(
    scene: &dyn Scene,
    point: cgmath::Point3<Float>,
    normal: cgmath::Vector3<Float>,
    direction: cgmath::Vector3<Float>,
) -> Float {
    let mut sum = 0.0;
    for (idx, light) in scene.lights().iter().enumerate() {
        if light.kind() != crate::scene::LightKind::Infinite {
            continue;
        }
        let dir_pdf = light.emission_pdf_direction(point, direction);
        let selection_pdf = scene.light_sampler().pdf(idx, point, normal);
        sum += dir_pdf * selection_pdf;
    }
    sum
}

fn camera_effective<'p, 's>(
    camera_path: &'p Path<'s>,
    t: usize,
    sampled: Option<&'p Vertex<'s>>,
    i: usize,
) -> &'p Vertex<'s> {
    if t == 1 && i == 0 {
        sampled.expect("sampled camera vertex required for t == 1")
    } else {
        &camera_path[i]
    }
}

fn light_effective<'p, 's>(
    light_path: &'p Path<'s>,
    s: usize,
    sampled: Option<&'p Vertex<'s>>,
    i: usize,
) -> &'p Vertex<'s> {
    if s == 1 && i == 0 {
        sampled.expect("sampled light vertex required for s == 1")
    } else {
        &light_path[i]
    }
}

/// The balance-heuristic MIS weight for strategy `(s, t)` given both
/// subpaths and, for `s == 1` or `t == 1`, the sampled vertex produced by
/// that strategy's evaluator.
pub fn mis_weight<'s>(
    scene: &'s dyn Scene,
    camera: &dyn Camera,
    light_path: &Path<'s>,
    camera_path: &Path<'s>,
    s: usize,
    t: usize,
    sampled: Option<&Vertex<'s>>,
) -> Float {
    if s + t == 2 {
        return 1.0;
    }

    let pt_ref = camera_effective(camera_path, t, sampled, t - 1);
    let pt_minus_ref = if t >= 2 {
        Some(&camera_path[t - 2])
    } else {
        None
    };
    let qs_ref = if s >= 1 {
        Some(light_effective(light_path, s, sampled, s - 1))
    } else {
        None
    };
    let qs_minus_ref = if s >= 2 { Some(&light_path[s - 2]) } else { None };

    // The four hinge overrides: reverse densities recomputed as if the
    // alternative strategy had generated this same path, at the
    // connection vertex on each side and its predecessor.
    let pt_rev_override = if s > 0 {
        general_vertex_density(scene, camera, qs_ref.unwrap(), qs_minus_ref, pt_ref)
    } else {
        light_origin_density(scene, pt_ref, pt_minus_ref.unwrap().position, pt_minus_ref.unwrap().normal)
    };

    let pt_minus_rev_override = pt_minus_ref.map(|pt_minus| {
        if s > 0 {
            general_vertex_density(scene, camera, pt_ref, qs_ref, pt_minus)
        } else {
            general_vertex_density(scene, camera, pt_ref, None, pt_minus)
        }
    });

    let qs_rev_override =
        qs_ref.map(|qs| general_vertex_density(scene, camera, pt_ref, pt_minus_ref, qs));

    let qs_minus_rev_override = qs_minus_ref
        .map(|qs_minus| general_vertex_density(scene, camera, qs_ref.unwrap(), Some(pt_ref), qs_minus));

    let mut sum_ri: Float = 0.0;

    // Camera subpath, walked from t - 1 down to 1.
    let mut ri: Float = 1.0;
    for i in (1..t).rev() {
        let fwd = camera_effective(camera_path, t, sampled, i).pdf_fwd;
        let rev = if i == t - 1 {
            pt_rev_override
        } else if i == t - 2 {
            pt_minus_rev_override.unwrap()
        } else {
            camera_effective(camera_path, t, sampled, i).pdf_rev
        };
        ri *= remap0(rev) / remap0(fwd);

        let connectible_i = if i == t - 1 {
            true
        } else {
            camera_effective(camera_path, t, sampled, i).is_connectible()
        };
        let connectible_prev = camera_effective(camera_path, t, sampled, i - 1).is_connectible();
        if connectible_i && connectible_prev {
            sum_ri += ri;
        }
    }

    // Light subpath, walked from s - 1 down to 0.
    let mut ri: Float = 1.0;
    for i in (0..s).rev() {
        let fwd = light_effective(light_path, s, sampled, i).pdf_fwd;
        let rev = if i == s - 1 {
            qs_rev_override.unwrap()
        } else if i == s - 2 {
            qs_minus_rev_override.unwrap()
        } else {
            light_effective(light_path, s, sampled, i).pdf_rev
        };
        ri *= remap0(rev) / remap0(fwd);

        let connectible_i = if i == s - 1 {
            true
        } else {
            light_effective(light_path, s, sampled, i).is_connectible()
        };
        let connectible_prev = if i == 0 {
            true
        } else {
            light_effective(light_path, s, sampled, i - 1).is_connectible()
        };
        if connectible_i && connectible_prev {
            sum_ri += ri;
        }
    }

    1.0 / (1.0 + sum_ri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::testscene::simple_sphere_scene;

    #[test]
    fn two_vertex_path_has_unit_weight() {
        let fixture = simple_sphere_scene();
        let light_path: Path = Path::with_capacity(1);
        let camera_path: Path = Path::with_capacity(2);
        let w = mis_weight(&fixture.scene, &fixture.camera, &light_path, &camera_path, 0, 2, None);
        assert_eq!(w, 1.0);
    }
}
