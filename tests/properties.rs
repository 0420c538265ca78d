//! Randomized invariant checks over subpath generation, the connection
//! strategies and the MIS weighter. These stand in for a full
//! partition-of-unity proof with a safely verifiable subset: every
//! density and color produced along the way stays finite and
//! non-negative, and every MIS weight the weighter can actually be
//! asked for lands in `(0, 1]` (see DESIGN.md for why the full
//! multi-strategy reconstruction isn't attempted here).

use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bdpt_core::camera_path::generate_camera_path;
use bdpt_core::light_path::generate_light_path;
use bdpt_core::mis::mis_weight;
use bdpt_core::scene::testscene::simple_sphere_scene;
use bdpt_core::strategies;
use bdpt_core::BdptConfig;

/// Maps an arbitrary byte onto an open unit interval sample, avoiding the
/// exact boundary values a camera/lens sampler would never actually hand
/// the renderer.
fn unit(v: u8) -> f64 {
    (v as f64 + 0.5) / 256.0
}

#[quickcheck]
fn subpath_vertices_stay_finite_and_nonnegative_density(seed: u64, px: u8, py: u8) -> bool {
    let fixture = simple_sphere_scene();
    let config = BdptConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let ray = fixture.camera_ray(unit(px), unit(py));

    let camera_path = generate_camera_path(&fixture.scene, &fixture.camera, ray, &config, &mut rng);
    let light_path = generate_light_path(&fixture.scene, &config, &mut rng);

    let check_path = |path: &bdpt_core::Path<'_>| -> bool {
        for i in 0..path.len() {
            let v = &path[i];
            if !v.position.x.is_finite() || !v.position.y.is_finite() || !v.position.z.is_finite() {
                return false;
            }
            if !v.normal.x.is_finite() || !v.normal.y.is_finite() || !v.normal.z.is_finite() {
                return false;
            }
            if !v.beta.is_finite() || !v.emitted.is_finite() {
                return false;
            }
            if !v.pdf_fwd.is_finite() || v.pdf_fwd < 0.0 {
                return false;
            }
            if !v.pdf_rev.is_finite() || v.pdf_rev < 0.0 {
                return false;
            }
        }
        true
    };

    check_path(&camera_path) && check_path(&light_path)
}

#[quickcheck]
fn interior_and_camera_only_contributions_are_finite_and_nonnegative(
    seed: u64,
    px: u8,
    py: u8,
) -> bool {
    let fixture = simple_sphere_scene();
    let config = BdptConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let ray = fixture.camera_ray(unit(px), unit(py));

    let camera_path = generate_camera_path(&fixture.scene, &fixture.camera, ray, &config, &mut rng);
    let light_path = generate_light_path(&fixture.scene, &config, &mut rng);

    let is_sane = |c: bdpt_core::Color| c.is_finite() && !(c.0.x < 0.0 || c.0.y < 0.0 || c.0.z < 0.0);

    if camera_path.len() >= 1 {
        let contribution = strategies::pure_camera_path(&camera_path, camera_path.len());
        if !is_sane(contribution) {
            return false;
        }
    }

    for t in 2..=camera_path.len() {
        for s in 2..=light_path.len() {
            let contribution =
                strategies::interior_connection(&fixture.scene, &light_path, s, &camera_path, t);
            if !is_sane(contribution) {
                return false;
            }
        }
    }

    true
}

#[quickcheck]
fn mis_weight_is_bounded_and_finite_for_every_admissible_sampled_free_strategy(
    seed: u64,
    px: u8,
    py: u8,
) -> bool {
    let fixture = simple_sphere_scene();
    let config = BdptConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let ray = fixture.camera_ray(unit(px), unit(py));

    let camera_path = generate_camera_path(&fixture.scene, &fixture.camera, ray, &config, &mut rng);
    let light_path = generate_light_path(&fixture.scene, &config, &mut rng);

    // Restrict to (s, t) pairs whose evaluation never needs a freshly
    // sampled vertex (that is, skip t == 1 and s == 1): those strategies
    // are exercised separately through the full integrator in
    // `scenarios.rs`, where a real sampled vertex is available.
    for t in 2..=camera_path.len() {
        for s in 0..=light_path.len() {
            if s == 1 {
                continue;
            }
            let weight = mis_weight(
                &fixture.scene,
                &fixture.camera,
                &light_path,
                &camera_path,
                s,
                t,
                None,
            );
            if !weight.is_finite() || weight <= 0.0 || weight > 1.0 {
                return false;
            }
        }
    }

    true
}
