use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// Vectors shorter than this normalize to [`Vec3::ZERO`].
pub const NORMALIZE_EPSILON: f32 = 1e-7;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the unit vector in the same direction.
    ///
    /// Vectors with a magnitude at or below [`NORMALIZE_EPSILON`] come back as
    /// [`Vec3::ZERO`] instead of dividing by (almost) zero.
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude <= NORMALIZE_EPSILON {
            return Self::ZERO;
        }
        *self / magnitude
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Arithmetic mean of a set of points. Returns zero for an empty iterator.
    pub fn mean(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut sum = Self::ZERO;
        let mut count = 0usize;
        for p in points {
            sum += p;
            count += 1;
        }
        if count == 0 {
            Self::ZERO
        } else {
            sum / count as f32
        }
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Scalar multiplication of a vector.
impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

/// Scalar division of a vector.
impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

/// Negation of a vector.
impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_produces_unit_length() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-0.001, 0.002, 0.0005),
            Vec3::new(1e3, -2e3, 5e2),
            Vec3::new(1e-6, 0.0, 0.0),
        ] {
            assert_relative_eq!(v.normalize().magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn normalize_near_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert_eq!(Vec3::new(1e-8, 0.0, 0.0).normalize(), Vec3::ZERO);
        assert_eq!(Vec3::new(0.0, -5e-8, 5e-8).normalize(), Vec3::ZERO);
    }

    #[test]
    fn cross_is_orthogonal() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-2.0, 0.5, 4.0);
        let c = a.cross(b);
        assert_relative_eq!(c.dot(a), 0.0, epsilon = 1e-5);
        assert_relative_eq!(c.dot(b), 0.0, epsilon = 1e-5);
        assert_eq!(Vec3::UP.cross(Vec3::FORWARD), Vec3::RIGHT);
    }

    #[test]
    fn mean_of_points() {
        let m = Vec3::mean([
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(2.0, 0.0, 4.0),
            Vec3::new(1.0, 3.0, 6.0),
        ]);
        assert_eq!(m, Vec3::new(1.0, 1.0, 4.0));
        assert_eq!(Vec3::mean(std::iter::empty()), Vec3::ZERO);
    }

    #[test]
    fn operators() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!((a * 2.0) / 2.0, a);
        assert_eq!(a - a, Vec3::ZERO);
    }
}
