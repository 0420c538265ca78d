//! The baseline unidirectional path tracer: next-event estimation plus
//! BSDF sampling combined with the power heuristic, and dynamic Russian
//! roulette. Not part of BDPT — kept here as the cross-validation oracle
//! the tests run against, sharing the same ray/scene/config/sampler
//! shape as the BDPT integrator.

use cgmath::{InnerSpace, Point3};

use crate::color::{BLACK, WHITE};
use crate::config::BdptConfig;
use crate::float::{clamp, Float};
use crate::ray::Ray;
use crate::sample::power_heuristic;
use crate::scene::{Sampler, Scene};

pub fn path_trace_li(
    mut ray: Ray,
    scene: &dyn Scene,
    config: &BdptConfig,
    sampler: &mut dyn Sampler,
) -> crate::color::Color {
    let mut radiance = BLACK;
    let mut beta = WHITE;
    let mut bounce = 0usize;
    let mut specular_bounce = true;
    let mut prev_point: Option<Point3<Float>> = None;
    let mut prev_dir_pdf = 0.0;

    loop {
        let hit = match scene.intersect(&ray) {
            Some(hit) => hit,
            None => {
                for light in scene.infinite_lights() {
                    let emitted = light.emit(&ray);
                    if emitted.is_black() {
                        continue;
                    }
                    if specular_bounce || prev_point.is_none() {
                        radiance += beta * emitted;
                    } else {
                        let point = prev_point.unwrap();
                        let light_index = scene
                            .lights()
                            .iter()
                            .position(|l| std::ptr::eq(l.as_ref(), light))
                            .unwrap_or(0);
                        let selection_pdf =
                            scene.light_sampler().pdf(light_index, point, ray.dir);
                        let dir_pdf = light.emission_pdf_direction(point, ray.dir);
                        let mis = power_heuristic(1, prev_dir_pdf, 1, selection_pdf * dir_pdf);
                        radiance += beta * emitted * mis;
                    }
                }
                break;
            }
        };

        let emitted = hit.material.emit(-ray.dir);
        if !emitted.is_black() {
            if bounce == 0 || specular_bounce {
                radiance += beta * emitted;
            } else if let Some((light, light_index)) = hit.area_light {
                let prev = prev_point.unwrap();
                let dist_sq = (hit.point - prev).magnitude2();
                let cos_light = hit.normal.dot(-ray.dir);
                let light_pdf = if dist_sq > crate::float::DIST_SQ_EPSILON && cos_light > 0.0 {
                    let selection_pdf = scene.light_sampler().pdf(light_index, prev, ray.dir);
                    light.emission_pdf_position(hit.point) * dist_sq / cos_light * selection_pdf
                } else {
                    0.0
                };
                let mis = power_heuristic(1, prev_dir_pdf, 1, light_pdf);
                radiance += beta * emitted * mis;
            }
        }

        if bounce + 1 >= config.max_depth {
            break;
        }

        let (light_index, selection_pdf) = scene.light_sampler().sample(sampler.next_1d());
        if !scene.lights().is_empty() && selection_pdf > 0.0 {
            let light = scene.lights()[light_index].as_ref();
            if let Some(sample) = light.sample_direct(hit.point, hit.normal, sampler) {
                // Fold in the selection probability so this pdf is over
                // the whole scene's lights, matching the density the
                // BSDF-sampling half's MIS weight is compared against.
                let pdf = sample.pdf * selection_pdf;
                if !sample.radiance.is_black() && pdf > 0.0 {
                    let cos_theta = hit.normal.dot(sample.direction);
                    if cos_theta > 0.0 {
                        let shadow = Ray::between(hit.point, sample.point);
                        if !scene.occluded(&shadow) {
                            let (bsdf_pdf, is_delta) =
                                hit.material.pdf(-ray.dir, sample.direction, hit.normal);
                            let mis = if is_delta {
                                0.0
                            } else {
                                power_heuristic(1, pdf, 1, bsdf_pdf)
                            };
                            let brdf =
                                hit.material.evaluate(-ray.dir, sample.direction, hit.normal);
                            radiance += beta * brdf * sample.radiance * cos_theta * mis / pdf;
                        }
                    }
                }
            }
        }

        let scatter = match hit.material.scatter(-ray.dir, &hit, sampler) {
            Some(s) => s,
            None => break,
        };

        specular_bounce = scatter.is_specular;
        if scatter.is_specular {
            beta = beta * scatter.attenuation;
        } else {
            if scatter.pdf <= 0.0 {
                break;
            }
            let cos = scatter.wo.dot(hit.normal).abs();
            beta = beta * scatter.attenuation * (cos / scatter.pdf);
        }

        prev_point = Some(hit.point);
        prev_dir_pdf = scatter.pdf;
        ray = Ray::new(hit.point, scatter.wo);
        bounce += 1;

        if bounce >= config.rr_min_bounces {
            let q = clamp(beta.luminance(), config.rr_min, config.rr_max);
            if sampler.next_1d() > q {
                break;
            }
            beta = beta / q;
        }
    }

    radiance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::testscene::simple_sphere_scene;

    #[test]
    fn terminates_and_stays_finite() {
        use rand::SeedableRng;
        let fixture = simple_sphere_scene();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let ray = fixture.camera_ray(0.5, 0.5);
        let config = BdptConfig::default();
        let radiance = path_trace_li(ray, &fixture.scene, &config, &mut rng);
        assert!(radiance.is_finite());
    }
}
