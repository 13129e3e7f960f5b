//! 4x4 affine and projective transforms.
//!
//! Points are column vectors multiplied on the right (`m * p`), so translation
//! sits in the last column and `a * b * p` applies `b` before `a`. A model
//! matrix built as `translation * rotation` spins about the local origin and
//! then moves into place.

use std::ops::Mul;

use super::vec3::Vec3;

/// Homogeneous `w` values at or below this magnitude skip the perspective divide.
pub const W_EPSILON: f32 = 1e-7;

/// Row-major storage: `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed rotation about X, radians.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// `Rx * Ry * Rz` for angles in radians.
    pub fn rotation_xyz(x: f32, y: f32, z: f32) -> Self {
        Mat4::rotation_x(x) * Mat4::rotation_y(y) * Mat4::rotation_z(z)
    }

    /// Creates a perspective projection matrix for a vertical field of view.
    ///
    /// The output `w` is the input view-space `z`, so the perspective divide keys
    /// off view depth. After the divide, `z = near` maps to 0 and `z = far` to 1.
    pub fn perspective_fov(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let y_scale = 1.0 / (fov * 0.5).tan();
        let x_scale = y_scale / aspect_ratio;
        let depth = far / (far - near);
        Mat4::new([
            [x_scale, 0.0, 0.0, 0.0],
            [0.0, y_scale, 0.0, 0.0],
            [0.0, 0.0, depth, -near * depth],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// View matrix: `eye` goes to the origin and `target` onto +Z.
    ///
    /// `up` only picks the roll; it need not be perpendicular to the view
    /// direction, but must not be parallel to it.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = up.cross(forward).normalize();
        // Unit in exact arithmetic; renormalized to keep the basis orthonormal in f32.
        let up = forward.cross(right).normalize();

        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [forward.x, forward.y, forward.z, -forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Transforms a point (implicit `w = 1`) and applies the perspective divide.
    ///
    /// The divide is skipped when the resulting `|w| <= W_EPSILON`.
    pub fn transform(&self, v: Vec3) -> Vec3 {
        let m = &self.data;
        let x = m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3];
        let y = m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3];
        let z = m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3];
        let w = m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3];

        if w.abs() > W_EPSILON {
            Vec3::new(x / w, y / w, z / w)
        } else {
            Vec3::new(x, y, z)
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Same as [`Mat4::transform`].
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        self.transform(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::FRAC_PI_2;

    fn random_matrix(rng: &mut StdRng) -> Mat4 {
        let mut data = [[0.0f32; 4]; 4];
        for row in data.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.gen_range(-2.0..2.0);
            }
        }
        Mat4::new(data)
    }

    fn assert_mat_eq(a: Mat4, b: Mat4, epsilon: f32) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = epsilon);
            }
        }
    }

    #[test]
    fn product_is_associative() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let a = random_matrix(&mut rng);
            let b = random_matrix(&mut rng);
            let c = random_matrix(&mut rng);
            assert_mat_eq((a * b) * c, a * (b * c), 1e-3);
        }
    }

    #[test]
    fn identity_transform_is_identity() {
        let id = Mat4::identity();
        for v in [
            Vec3::ZERO,
            Vec3::new(1.5, -2.0, 7.25),
            Vec3::new(-100.0, 0.001, 3.0),
        ] {
            assert_eq!(id * v, v);
        }
    }

    #[test]
    fn translation_then_rotation_order() {
        // Rotation applied first, then translation.
        let m = Mat4::translation(0.0, 0.0, 5.0) * Mat4::rotation_y(FRAC_PI_2);
        let p = m * Vec3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn rotation_x_turns_y_into_z() {
        let p = Mat4::rotation_x(FRAC_PI_2) * Vec3::UP;
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn look_at_maps_eye_to_origin() {
        let eye = Vec3::new(3.0, -1.0, 2.0);
        let forward = Vec3::new(0.3, 0.2, 1.0).normalize();
        let view = Mat4::look_at(eye, eye + forward, Vec3::UP);
        let origin = view * eye;
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.z, 0.0, epsilon = 1e-5);

        let ahead = view * (eye + forward * 4.0);
        assert_relative_eq!(ahead.z, 4.0, epsilon = 1e-4);
    }

    #[test]
    fn perspective_maps_near_and_far() {
        let proj = Mat4::perspective_fov(70f32.to_radians(), 16.0 / 9.0, 0.1, 300.0);
        assert_relative_eq!((proj * Vec3::new(0.0, 0.0, 0.1)).z, 0.0, epsilon = 1e-5);
        assert_relative_eq!((proj * Vec3::new(0.0, 0.0, 300.0)).z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_w_skips_divide() {
        let proj = Mat4::perspective_fov(FRAC_PI_2, 1.0, 0.1, 10.0);
        let p = proj * Vec3::new(2.0, 3.0, 0.0);
        assert!(p.x.is_finite() && p.y.is_finite());
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-5);
    }
}
