//! 2D affine maps used by shape transforms (`move_by`, `rotate`, `scale`).

use nalgebra::{Matrix2, Vector2};

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }
    #[inline]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::new(dx, dy),
        }
    }
    /// Counterclockwise rotation by `angle` radians about the origin.
    #[inline]
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: Matrix2::new(c, -s, s, c),
            t: Vector2::zeros(),
        }
    }
    /// Rotation by `angle` about `center`.
    pub fn rotation_about(angle: f64, center: Vector2<f64>) -> Self {
        let r = Self::rotation(angle);
        Self {
            m: r.m,
            t: center - r.m * center,
        }
    }
    #[inline]
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            m: Matrix2::new(sx, 0.0, 0.0, sy),
            t: Vector2::zeros(),
        }
    }
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }
    #[inline]
    pub fn det(&self) -> f64 {
        self.m.determinant()
    }
    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.det() > 0.0
    }
    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.m * p + self.t
    }
    /// Linear part only (tangents, displacements).
    #[inline]
    pub fn apply_vector(&self, v: Vector2<f64>) -> Vector2<f64> {
        self.m * v
    }
    /// `next ∘ self`.
    pub fn then(&self, next: &Affine2) -> Affine2 {
        Affine2 {
            m: next.m * self.m,
            t: next.m * self.t + next.t,
        }
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}
