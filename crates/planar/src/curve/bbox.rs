//! Axis-aligned bounding boxes.

use nalgebra::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box2 {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Box2 {
    #[inline]
    pub fn from_point(p: Vector2<f64>) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box holding every point; `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Vector2<f64>>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = Self::from_point(it.next()?);
        Some(it.fold(first, |b, p| b.include(p)))
    }

    #[inline]
    pub fn include(&self, p: Vector2<f64>) -> Self {
        Self {
            min: self.min.inf(&p),
            max: self.max.sup(&p),
        }
    }

    #[inline]
    pub fn union(&self, other: &Box2) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    #[inline]
    pub fn intersects(&self, other: &Box2, eps: f64) -> bool {
        self.min.x <= other.max.x + eps
            && other.min.x <= self.max.x + eps
            && self.min.y <= other.max.y + eps
            && other.min.y <= self.max.y + eps
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>, eps: f64) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }

    #[inline]
    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).norm()
    }

    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        0.5 * (self.min + self.max)
    }
}
