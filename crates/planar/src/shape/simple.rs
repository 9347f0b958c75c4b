//! Region bounded by a single Jordan curve.

use super::Density;
use crate::curve::Affine2;
use crate::jordan::JordanCurve;
use nalgebra::Vector2;
use std::sync::Arc;

/// The left side of one closed curve: a disk-like region for a counterclockwise
/// curve, the exterior of a disk for a clockwise one.
///
/// The curve is shared (`Arc`) between shapes built from it; `boundary` says
/// whether the curve itself belongs to the region.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleShape {
    jordan: Arc<JordanCurve>,
    boundary: bool,
}

impl SimpleShape {
    /// Closed region (boundary included).
    pub fn new(jordan: JordanCurve) -> Self {
        Self::from_shared(Arc::new(jordan), true)
    }

    pub fn from_shared(jordan: Arc<JordanCurve>, boundary: bool) -> Self {
        Self { jordan, boundary }
    }

    pub fn with_boundary(&self, boundary: bool) -> Self {
        Self {
            jordan: Arc::clone(&self.jordan),
            boundary,
        }
    }

    #[inline]
    pub fn jordan(&self) -> &JordanCurve {
        &self.jordan
    }

    #[inline]
    pub fn shared(&self) -> &Arc<JordanCurve> {
        &self.jordan
    }

    #[inline]
    pub fn boundary(&self) -> bool {
        self.boundary
    }

    /// Signed area of the curve; negative for unbounded regions.
    #[inline]
    pub fn area(&self) -> f64 {
        self.jordan.area()
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.jordan.is_positive()
    }

    /// Complement: same curve reversed, boundary membership flipped.
    pub fn invert(&self) -> SimpleShape {
        Self {
            jordan: Arc::new(self.jordan.invert()),
            boundary: !self.boundary,
        }
    }

    /// `other` is the complement of `self` up to the boundary flag.
    pub(crate) fn is_inverse_of(&self, other: &SimpleShape) -> bool {
        self.jordan.orientation() != other.jordan.orientation()
            && self.jordan.invert() == *other.jordan
    }

    pub fn density(&self, p: Vector2<f64>) -> Density {
        self.jordan.density(p)
    }

    pub fn winding(&self, p: Vector2<f64>) -> f64 {
        self.jordan.winding(p)
    }

    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        let w = self.jordan.winding(p);
        if self.boundary {
            w > 0.0
        } else {
            w == 1.0
        }
    }

    pub fn transform(&self, f: &Affine2) -> SimpleShape {
        Self {
            jordan: Arc::new(self.jordan.transform(f)),
            boundary: self.boundary,
        }
    }
}
