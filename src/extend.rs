//! The shared path extender (SS4.1): walks a ray forward from a seed
//! vertex, appending one vertex per bounce and wiring up the forward and
//! reverse area densities as it goes. Both subpath generators are this
//! walker with a different seed.

use cgmath::InnerSpace;

use crate::color::{Color, BLACK};
use crate::config::BdptConfig;
use crate::float::Float;
use crate::ray::Ray;
use crate::scene::{Light, Material, Sampler, Scene};
use crate::vertex::{convert_density, Path, Vertex};

/// Position of the synthetic background vertex along an escaping ray.
/// Only its direction and flags matter downstream; the scalar just needs
/// to be large enough that it reads as "at infinity" to anything that
/// looks at it (nothing in this crate does, since `is_infinite_light`
/// vertices skip the usual density-conversion and visibility math).
const BACKGROUND_DISTANCE: Float = 1.0e7;

fn infinite_light_emission(scene: &dyn Scene, ray: &Ray) -> Color {
    scene
        .infinite_lights()
        .iter()
        .fold(BLACK, |acc, light| acc + light.emit(ray))
}

/// Walks `ray` forward for up to `max_bounces` bounces, appending vertices
/// to `path`. `beta` is the throughput carried into the seed vertex
/// already on `path`; `pdf_fwd_dir` is the solid-angle density with which
/// `ray`'s direction was sampled at that seed.
///
/// Russian roulette (driven by `config.rr_start_depth`/`rr_min`/`rr_max`)
/// may terminate the walk early; it only ever affects whether the walk
/// continues, never the forward/reverse densities already recorded on a
/// vertex.
#[allow(clippy::too_many_arguments)]
pub fn extend_path<'s>(
    scene: &'s dyn Scene,
    path: &mut Path<'s>,
    mut ray: Ray,
    mut beta: Color,
    mut pdf_fwd_dir: Float,
    max_bounces: usize,
    is_camera_walk: bool,
    config: &BdptConfig,
    sampler: &mut dyn Sampler,
) {
    for bounce in 0..max_bounces {
        if beta.is_black() {
            return;
        }
        if bounce >= config.rr_start_depth {
            let q = crate::float::clamp(beta.luminance(), config.rr_min, config.rr_max);
            if sampler.next_1d() > q {
                return;
            }
            beta = beta / q;
        }
        match scene.intersect(&ray) {
            None => {
                if is_camera_walk {
                    let emitted = infinite_light_emission(scene, &ray);
                    let far = ray.origin + ray.dir * BACKGROUND_DISTANCE;
                    path.push(Vertex {
                        position: far,
                        normal: -ray.dir,
                        wi: -ray.dir,
                        is_camera: false,
                        is_light: true,
                        is_specular: false,
                        is_infinite_light: true,
                        material: None,
                        light: None,
                        beta,
                        emitted,
                        pdf_fwd: pdf_fwd_dir,
                        pdf_rev: 0.0,
                    });
                }
                return;
            }
            Some(hit) => {
                let prev_pos = match path.last() {
                    Some(v) => v.position,
                    None => return,
                };

                let emitted = hit.material.emit(-ray.dir);
                let mut vtx = Vertex {
                    position: hit.point,
                    normal: hit.normal,
                    wi: -ray.dir,
                    is_camera: false,
                    is_light: !emitted.is_black(),
                    is_specular: false,
                    is_infinite_light: false,
                    material: Some(hit.material),
                    light: if emitted.is_black() { None } else { hit.area_light },
                    beta,
                    emitted,
                    pdf_fwd: 0.0,
                    pdf_rev: 0.0,
                };
                vtx.pdf_fwd = convert_density(pdf_fwd_dir, prev_pos, &vtx);

                let scatter = match hit.material.scatter(-ray.dir, &hit, sampler) {
                    Some(s) => s,
                    None => {
                        path.push(vtx);
                        return;
                    }
                };

                if scatter.is_specular {
                    beta = beta * scatter.attenuation;
                } else {
                    if scatter.pdf <= 0.0 {
                        path.push(vtx);
                        return;
                    }
                    let cos = scatter.wo.dot(hit.normal).abs();
                    beta = beta * scatter.attenuation * (cos / scatter.pdf);
                }

                let (mut rev_pdf, rev_is_delta) = hit.material.pdf(scatter.wo, -ray.dir, hit.normal);
                let mut next_pdf_dir = scatter.pdf;
                vtx.is_specular = scatter.is_specular || rev_is_delta;
                if rev_is_delta {
                    next_pdf_dir = 0.0;
                    rev_pdf = 0.0;
                }

                if let Some(prev) = path.last_mut() {
                    prev.pdf_rev = convert_density(rev_pdf, vtx.position, prev);
                }

                path.push(vtx);

                ray = Ray::new(hit.point, scatter.wo);
                pdf_fwd_dir = next_pdf_dir;
            }
        }
    }
}
