//! Unit checks for the area/solid-angle density conversion rule and its
//! round trip through a `Vertex`.

use cgmath::{Point3, Vector3};

use bdpt_core::sample::convert_density as convert_density_raw;
use bdpt_core::scene::testscene::simple_sphere_scene;
use bdpt_core::scene::Camera;
use bdpt_core::vertex::{convert_density, Path};

#[test]
fn unit_distance_orthogonal_normal_is_untouched() {
    // from (0,0,0) normal (0,1,0) to (1,0,0) normal (-1,0,0), solid-angle
    // pdf = 1: the connecting direction is exactly along the target's
    // normal and the distance is 1, so the area density equals the
    // solid-angle density unchanged.
    let to_normal = Vector3::new(-1.0, 0.0, 0.0);
    let from_to_dir = Vector3::new(1.0, 0.0, 0.0);
    let area_pdf = convert_density_raw(1.0, to_normal, from_to_dir, 1.0);
    assert!((area_pdf - 1.0).abs() < 1e-12);
}

#[test]
fn grazing_normal_drives_density_to_zero() {
    let to_normal = Vector3::new(0.0, 1.0, 0.0);
    let from_to_dir = Vector3::new(1.0, 0.0, 0.0);
    let area_pdf = convert_density_raw(1.0, to_normal, from_to_dir, 4.0);
    assert!(area_pdf.abs() < 1e-12);
}

#[test]
fn doubling_distance_quarters_the_area_density() {
    let to_normal = Vector3::new(-1.0, 0.0, 0.0);
    let from_to_dir = Vector3::new(1.0, 0.0, 0.0);
    let near = convert_density_raw(2.0, to_normal, from_to_dir, 1.0);
    let far = convert_density_raw(2.0, to_normal, from_to_dir, 4.0);
    assert!((near / 4.0 - far).abs() < 1e-9);
}

#[test]
fn degenerate_distance_is_zero_not_infinite() {
    let to_normal = Vector3::new(0.0, 1.0, 0.0);
    let from_to_dir = Vector3::new(0.0, 1.0, 0.0);
    let area_pdf = convert_density_raw(1.0, to_normal, from_to_dir, 0.0);
    assert_eq!(area_pdf, 0.0);
}

/// Builds a minimal camera subpath (two vertices) on the sphere fixture
/// so the `Vertex`-level `convert_density` wrapper (which reads the
/// target's own position/normal) can be exercised end to end.
#[test]
fn vertex_round_trip_preserves_the_density_set_by_the_extender() {
    use rand::SeedableRng;

    let fixture = simple_sphere_scene();
    let ray = fixture.camera_ray(0.5, 0.5);
    let config = bdpt_core::BdptConfig::default();
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(11);

    let path: Path = bdpt_core::camera_path::generate_camera_path(
        &fixture.scene,
        &fixture.camera,
        ray,
        &config,
        &mut rng,
    );

    assert!(path.len() >= 2, "camera ray should hit the sphere and bounce at least once");

    // Forward density of vertex 1 was set by `extend_path` from vertex 0's
    // position and the camera's direction pdf; re-deriving it here with
    // the same inputs must reproduce the stored value exactly, since
    // `convert_density` is a pure function of its arguments.
    let cam_dir_pdf = fixture.camera.ray_pdfs(&ray).1;
    let recomputed = convert_density(cam_dir_pdf, path[0].position, &path[1]);
    assert_eq!(recomputed, path[1].pdf_fwd);

    // Reading it back a second time still agrees (no hidden mutation).
    assert_eq!(recomputed, path[1].pdf_fwd);
}

#[test]
fn infinite_light_target_passes_density_through_unconverted() {
    use bdpt_core::color::BLACK;
    use bdpt_core::vertex::Vertex;

    let far = Vertex {
        position: Point3::new(1.0e7, 0.0, 0.0),
        normal: Vector3::new(-1.0, 0.0, 0.0),
        wi: Vector3::new(-1.0, 0.0, 0.0),
        is_camera: false,
        is_light: true,
        is_specular: false,
        is_infinite_light: true,
        material: None,
        light: None,
        beta: bdpt_core::color::WHITE,
        emitted: BLACK,
        pdf_fwd: 0.0,
        pdf_rev: 0.0,
    };
    let converted = convert_density(0.37, Point3::new(0.0, 0.0, 0.0), &far);
    assert_eq!(converted, 0.37);
}
