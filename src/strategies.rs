//! The four connection strategies. Each returns the
//! *unweighted* radiance contribution and, for the strategies that
//! sample a fresh endpoint, a "sampled vertex" record the MIS weighter
//! needs.

use cgmath::InnerSpace;

use crate::color::{Color, BLACK};
use crate::ray::Ray;
use crate::scene::{Camera, Sampler, Scene};
use crate::vertex::{Path, SplatRay, Vertex};

/// `s = 0`: the camera subpath landed on something emissive all by
/// itself. Defined only when `t` is the *entire* camera subpath — the
/// integrator only ever calls this with `t == camera_path.len()`, so
/// there is nothing further to check here.
pub fn pure_camera_path(camera_path: &Path, t: usize) -> Color {
    let vertex = &camera_path[t - 1];
    vertex.beta * vertex.emitted
}

/// `s = 1`: next-event estimation from the camera vertex `t - 1` to a
/// freshly sampled point on a light. Returns the unweighted contribution
/// and the sampled-light-vertex record the MIS weighter needs to
/// reweight against the strategies that would have produced this same
/// endpoint by path extension.
pub fn direct_lighting<'s>(
    scene: &'s dyn Scene,
    camera_path: &Path<'s>,
    t: usize,
    sampler: &mut dyn Sampler,
) -> (Color, Option<Vertex<'s>>) {
    let camera_vertex = &camera_path[t - 1];
    if camera_vertex.is_specular || camera_vertex.material.is_none() {
        return (BLACK, None);
    }

    let (light_index, selection_pdf) = scene.light_sampler().sample(sampler.next_1d());
    let light = scene.lights()[light_index].as_ref();
    let sample = match light.sample_direct(camera_vertex.position, camera_vertex.normal, sampler) {
        Some(s) => s,
        None => return (BLACK, None),
    };

    if sample.radiance.is_black() || sample.pdf <= 0.0 || selection_pdf <= 0.0 {
        return (BLACK, None);
    }
    // `light.sample_direct`'s own pdf is conditional on this light already
    // having been chosen; fold in the selection probability so it's a
    // density over the whole scene's lights, matching the convention
    // `mis::light_origin_density` uses for the same vertex.
    let pdf = sample.pdf * selection_pdf;
    let cos_theta = camera_vertex.normal.dot(sample.direction);
    if cos_theta <= 0.0 {
        return (BLACK, None);
    }

    let shadow_ray = Ray::between(camera_vertex.position, sample.point);
    if scene.occluded(&shadow_ray) {
        return (BLACK, None);
    }

    let brdf = camera_vertex
        .material
        .unwrap()
        .evaluate(camera_vertex.wi, sample.direction, camera_vertex.normal);

    let contribution = camera_vertex.beta * brdf * sample.radiance * (cos_theta / pdf);

    let sampled = Vertex {
        position: sample.point,
        normal: sample.normal,
        wi: -sample.direction,
        is_camera: false,
        is_light: true,
        is_specular: false,
        is_infinite_light: false,
        material: None,
        light: Some((light, light_index)),
        beta: sample.radiance / pdf,
        emitted: sample.radiance,
        pdf_fwd: pdf,
        pdf_rev: 0.0,
    };

    (contribution, Some(sampled))
}

/// `t = 1`: light tracing. Connects the light subpath's last used vertex
/// back to the camera lens, producing a splat rather than a per-pixel
/// contribution. Requires `s >= 2`; the `s == 1` case is folded into
/// `s = 0, t = 2`.
pub fn light_tracing<'s>(
    scene: &'s dyn Scene,
    camera: &dyn Camera,
    light_path: &Path<'s>,
    s: usize,
    sampler: &mut dyn Sampler,
) -> (Option<SplatRay>, Option<Vertex<'s>>) {
    let light_vertex = &light_path[s - 1];
    if light_vertex.is_specular {
        return (None, None);
    }

    let sample = match camera.sample_from_point(light_vertex.position, sampler.next_2d()) {
        Some(s) => s,
        None => return (None, None),
    };
    if sample.pdf <= 0.0 {
        return (None, None);
    }

    let to_camera = -sample.ray.dir;
    let cos_theta = light_vertex.normal.dot(to_camera);
    if cos_theta <= 0.0 {
        return (None, None);
    }

    let brdf = light_vertex.f(to_camera);
    let mut color = light_vertex.beta * brdf * (sample.weight / sample.pdf);
    if light_vertex.is_on_surface() {
        color *= cos_theta;
    }
    if color.is_black() {
        return (None, None);
    }

    let shadow_ray = Ray::between(light_vertex.position, sample.ray.origin);
    if scene.occluded(&shadow_ray) {
        return (None, None);
    }

    // `SplatRay` points from the scene back toward the camera, matching
    // the image-plane projection — the opposite sense from `sample.ray`,
    // which the camera contract defines as pointing from the lens
    // toward the connected point.
    let splat = SplatRay {
        ray: Ray::new(light_vertex.position, to_camera),
        color,
    };

    let sampled = Vertex {
        position: sample.ray.origin,
        normal: to_camera,
        wi: to_camera,
        is_camera: true,
        is_light: false,
        is_specular: false,
        is_infinite_light: false,
        material: None,
        light: None,
        beta: sample.weight / sample.pdf,
        emitted: BLACK,
        pdf_fwd: 0.0,
        pdf_rev: 0.0,
    };

    (Some(splat), Some(sampled))
}

/// `s >= 2, t >= 2`: an interior connection between the camera
/// subpath's last vertex and the light subpath's last vertex. No
/// sampled-vertex record: both endpoints already exist in their
/// subpaths, so MIS reads their stored densities directly.
pub fn interior_connection(
    scene: &dyn Scene,
    light_path: &Path,
    s: usize,
    camera_path: &Path,
    t: usize,
) -> Color {
    let pc = &camera_path[t - 1];
    let pl = &light_path[s - 1];
    if pc.is_specular || pl.is_specular {
        return BLACK;
    }

    let d = pl.position - pc.position;
    let dist_sq = d.magnitude2();
    if dist_sq <= crate::float::DIST_SQ_EPSILON {
        return BLACK;
    }
    let len = dist_sq.sqrt();
    let omega = d / len;

    let cos_c = omega.dot(pc.normal);
    let cos_l = (-omega).dot(pl.normal);
    if cos_c <= 0.0 || cos_l <= 0.0 {
        return BLACK;
    }

    let g = (cos_c * cos_l) / dist_sq;

    let mut ray = Ray::new(pc.position, omega);
    ray.t_max = (len - crate::float::EPSILON).max(0.0);
    if scene.occluded(&ray) {
        return BLACK;
    }

    let brdf_l = pl.f(-omega);
    let brdf_c = pc.f(omega);

    pl.beta * brdf_l * brdf_c * pc.beta * g
}
