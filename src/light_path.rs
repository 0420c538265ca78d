//! Light subpath generation: sample one emitting light's emission event,
//! seed the first vertex with it, delegate to the shared path extender,
//! then patch up the first two vertices' forward densities when the
//! sampled light was an infinite light.

use cgmath::InnerSpace;

use crate::config::BdptConfig;
use crate::extend::extend_path;
use crate::mis::infinite_light_density;
use crate::ray::Ray;
use crate::scene::{LightKind, Sampler, Scene};
use crate::vertex::Path;

/// Generates a light subpath, or an empty one if the scene has no
/// lights. `max_depth` bounds the *camera* subpath; the light subpath
/// gets one fewer bounce since its own seed vertex already consumed one
/// unit of the shared vertex budget.
pub fn generate_light_path<'s>(
    scene: &'s dyn Scene,
    config: &BdptConfig,
    sampler: &mut dyn Sampler,
) -> Path<'s> {
    let mut path = Path::with_capacity(config.max_depth + 1);

    if scene.lights().is_empty() {
        return path;
    }

    let (light_index, selection_pdf) = scene.light_sampler().sample(sampler.next_1d());
    let light = scene.lights()[light_index].as_ref();

    let emission = light.sample_emission(sampler.next_2d(), sampler.next_2d());
    let is_infinite = light.kind() == LightKind::Infinite;

    let cos_theta = emission.direction.dot(emission.normal).abs();
    let denom = selection_pdf * emission.area_pdf * emission.direction_pdf;

    let seed = crate::vertex::Vertex {
        position: emission.point,
        normal: emission.normal,
        wi: -emission.direction,
        is_camera: false,
        is_light: true,
        is_specular: false,
        is_infinite_light: is_infinite,
        material: None,
        light: Some((light, light_index)),
        beta: emission.radiance,
        emitted: emission.radiance,
        pdf_fwd: selection_pdf * emission.area_pdf,
        pdf_rev: 0.0,
    };
    path.push(seed);

    if denom <= 0.0 {
        return path;
    }
    let beta_extend = emission.radiance * (cos_theta / denom);

    let ray = Ray::new(emission.point, emission.direction);
    extend_path(
        scene,
        &mut path,
        ray,
        beta_extend,
        emission.direction_pdf,
        config.max_depth.saturating_sub(1),
        false,
        config,
        sampler,
    );

    if is_infinite && path.len() >= 2 {
        let first_bounce_on_surface = path[1].material.is_some();
        let cos_first = if first_bounce_on_surface {
            path[1].normal.dot(-emission.direction).abs()
        } else {
            1.0
        };
        path[1].pdf_fwd = selection_pdf * emission.area_pdf * cos_first;

        let incoming = path[1].wi;
        path[0].pdf_fwd = infinite_light_density(scene, path[1].position, path[1].normal, incoming);
    }

    path
}
