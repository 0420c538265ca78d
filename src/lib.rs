//! Bidirectional path tracing core with multiple importance sampling.
//!
//! Subpath generation from both the camera and the lights, the four
//! connection strategies between them, and the on-demand
//! balance-heuristic MIS weighter that combines them into a single
//! unbiased pixel estimate.
//! Everything the core needs from the surrounding renderer — the scene,
//! materials, lights, the camera — is consumed only through the trait
//! contracts in [`scene`].

pub mod camera_path;
pub mod color;
pub mod config;
pub mod error;
pub mod extend;
pub mod float;
pub mod integrator;
pub mod light_path;
pub mod mis;
pub mod pathtracer;
pub mod ray;
pub mod sample;
pub mod scene;
pub mod stats;
pub mod strategies;
pub mod vertex;

pub use color::Color;
pub use config::BdptConfig;
pub use error::BdptError;
pub use integrator::ray_color;
pub use pathtracer::path_trace_li;
pub use ray::Ray;
pub use vertex::{Path, SplatRay, Vertex};
