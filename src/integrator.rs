//! The BDPT integrator entry point: generates both subpaths, enumerates
//! every admissible `(s, t)` connection strategy, applies its MIS weight,
//! and aggregates the pixel radiance plus any light-tracing splats.

use crate::camera_path::generate_camera_path;
use crate::color::{Color, BLACK};
use crate::config::BdptConfig;
use crate::light_path::generate_light_path;
use crate::mis::mis_weight;
use crate::ray::Ray;
use crate::scene::{Camera, Sampler, Scene};
use crate::stats::StatsCollector;
use crate::strategies;
use crate::vertex::SplatRay;

/// An unbiased radiance estimate for `ray`, plus any splats produced by
/// light-tracing strategies for the enclosing renderer to scatter into
/// other pixels. `stats`, when supplied, gets a tally of rays traced and
/// strategies evaluated — a purely observational side effect, never
/// required for correctness.
pub fn ray_color(
    ray: Ray,
    scene: &dyn Scene,
    camera: &dyn Camera,
    config: &BdptConfig,
    sampler: &mut dyn Sampler,
    stats: Option<&StatsCollector>,
) -> (Color, Vec<SplatRay>) {
    if let Some(stats) = stats {
        stats.record_ray();
    }

    let camera_path = generate_camera_path(scene, camera, ray, config, sampler);
    let light_path = generate_light_path(scene, config, sampler);

    let mut radiance = BLACK;
    let mut splats = Vec::new();

    for s in 0..=light_path.len() {
        for t in 1..=camera_path.len() {
            if s + t < 2 {
                continue;
            }
            if s == 1 && t == 1 {
                continue;
            }

            if let Some(stats) = stats {
                stats.record_strategy(s, t);
            }

            let (contribution, sampled, splat) = if s == 0 {
                if t == camera_path.len() {
                    (strategies::pure_camera_path(&camera_path, t), None, None)
                } else {
                    (BLACK, None, None)
                }
            } else if t == 1 {
                if s < 2 {
                    (BLACK, None, None)
                } else {
                    let (splat, sampled) =
                        strategies::light_tracing(scene, camera, &light_path, s, sampler);
                    let contribution = splat.as_ref().map(|sp| sp.color).unwrap_or(BLACK);
                    (contribution, sampled, splat)
                }
            } else if s == 1 {
                let (contribution, sampled) =
                    strategies::direct_lighting(scene, &camera_path, t, sampler);
                (contribution, sampled, None)
            } else {
                (
                    strategies::interior_connection(scene, &light_path, s, &camera_path, t),
                    None,
                    None,
                )
            };

            if contribution.is_black() && splat.is_none() {
                continue;
            }

            let weight = mis_weight(
                scene,
                camera,
                &light_path,
                &camera_path,
                s,
                t,
                sampled.as_ref(),
            );

            if config.verbose {
                println!(
                    "bdpt: s={} t={} contribution={:?} weight={:.4}",
                    s, t, contribution, weight
                );
            }

            if let Some(mut splat) = splat {
                splat.color *= weight;
                if config.collect_splats {
                    if let Some(stats) = stats {
                        stats.record_splat();
                    }
                    splats.push(splat);
                }
            } else {
                radiance += contribution * weight;
            }
        }
    }

    (radiance, splats)
}
