//! Camera subpath generation: seed the first vertex from the camera,
//! then delegate to the shared path extender.

use crate::color::WHITE;
use crate::config::BdptConfig;
use crate::extend::extend_path;
use crate::ray::Ray;
use crate::scene::{Camera, Sampler, Scene};
use crate::vertex::{Path, Vertex};

/// Generates a camera subpath starting from `ray`, the primary ray cast
/// through a pixel/lens sample. The seed vertex carries `pdf_fwd = 0` by
/// convention (the camera has no upstream sampler); its distinguishing
/// feature is `is_camera = true`.
pub fn generate_camera_path<'s>(
    scene: &'s dyn Scene,
    camera: &dyn Camera,
    ray: Ray,
    config: &BdptConfig,
    sampler: &mut dyn Sampler,
) -> Path<'s> {
    let mut path = Path::with_capacity(config.max_depth + 1);
    path.push(Vertex::camera_seed(ray.origin, -ray.dir));

    let (_area_pdf, dir_pdf) = camera.ray_pdfs(&ray);
    extend_path(
        scene,
        &mut path,
        ray,
        WHITE,
        dir_pdf,
        config.max_depth,
        true,
        config,
        sampler,
    );
    path
}
