use std::ops::{Add, AddAssign, Div, Mul, MulAssign};

use cgmath::Vector3;

use crate::float::Float;

/// Linear RGB radiance/importance/throughput value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub Vector3<Float>);

pub const BLACK: Color = Color(Vector3::new(0.0, 0.0, 0.0));
pub const WHITE: Color = Color(Vector3::new(1.0, 1.0, 1.0));

impl Color {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Color(Vector3::new(r, g, b))
    }

    pub fn gray(v: Float) -> Self {
        Color(Vector3::new(v, v, v))
    }

    pub fn is_black(&self) -> bool {
        self.0.x <= 0.0 && self.0.y <= 0.0 && self.0.z <= 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite() && self.0.z.is_finite()
    }

    /// Relative luminance used to drive Russian roulette and other
    /// scalar-valued decisions.
    pub fn luminance(&self) -> Float {
        0.212_671 * self.0.x + 0.715_160 * self.0.y + 0.072_169 * self.0.z
    }

    pub fn component_mul(self, rhs: Color) -> Color {
        Color(Vector3::new(
            self.0.x * rhs.0.x,
            self.0.y * rhs.0.y,
            self.0.z * rhs.0.z,
        ))
    }
}

impl Add for Color {
    type Output = Color;
    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

impl Mul<Float> for Color {
    type Output = Color;
    fn mul(self, rhs: Float) -> Color {
        Color(self.0 * rhs)
    }
}

impl MulAssign<Float> for Color {
    fn mul_assign(&mut self, rhs: Float) {
        self.0 *= rhs;
    }
}

impl Mul<Color> for Color {
    type Output = Color;
    fn mul(self, rhs: Color) -> Color {
        self.component_mul(rhs)
    }
}

impl Div<Float> for Color {
    type Output = Color;
    fn div(self, rhs: Float) -> Color {
        Color(self.0 / rhs)
    }
}

impl Default for Color {
    fn default() -> Self {
        BLACK
    }
}
