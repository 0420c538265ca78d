use cgmath::{Point3, Vector3};

use crate::float::{Float, EPSILON};

/// A ray, offset from its true origin by `EPSILON` along `dir` to dodge
/// self-intersection at the surface it was spawned from.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Point3<Float>,
    pub dir: Vector3<Float>,
    pub t_max: Float,
}

impl Ray {
    pub fn new(origin: Point3<Float>, dir: Vector3<Float>) -> Self {
        Ray {
            origin: origin + dir * EPSILON,
            dir,
            t_max: Float::INFINITY,
        }
    }

    /// A shadow/visibility ray between two surface points, with `t_max`
    /// pulled in just short of the target so the target itself is never
    /// reported as an occluder.
    pub fn between(from: Point3<Float>, to: Point3<Float>) -> Self {
        let full = to - from;
        let dist = cgmath::InnerSpace::magnitude(full);
        let dir = full / dist.max(EPSILON);
        Ray {
            origin: from + dir * EPSILON,
            dir,
            t_max: (dist - EPSILON).max(0.0),
        }
    }

    pub fn at(&self, t: Float) -> Point3<Float> {
        self.origin + self.dir * t
    }
}
