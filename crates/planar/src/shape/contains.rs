//! Containment between shapes, and of curves in shapes.
//!
//! Closed-set semantics throughout: a curve running along the boundary of a
//! region counts as inside it. Simple-in-simple is decided from the signs of
//! the two areas plus one curve-in-region test, composites reduce to their
//! members.

use super::{Shape, SimpleShape};
use crate::cfg::EPS_NODE;
use crate::jordan::JordanCurve;
use nalgebra::Vector2;

impl Shape {
    /// `self ⊂ other`.
    pub fn is_subset_of(&self, other: &Shape) -> bool {
        is_subset(self, other)
    }

    /// `other ⊂ self`.
    pub fn contains(&self, other: &Shape) -> bool {
        is_subset(other, self)
    }

    /// Every point of `curve` lies in the closure of this region.
    pub fn contains_curve(&self, curve: &JordanCurve) -> bool {
        curve_in(self, curve)
    }

    /// Mutual containment.
    pub fn set_eq(&self, other: &Shape) -> bool {
        is_subset(self, other) && is_subset(other, self)
    }
}

pub(crate) fn is_subset(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Empty, _) | (_, Shape::Whole) => true,
        (Shape::Whole, _) | (_, Shape::Empty) => false,
        (Shape::Disjoint(d), _) => d.members().iter().all(|m| is_subset(m, b)),
        (_, Shape::Connected(c)) => c.members().iter().all(|m| in_simple(a, m)),
        (_, Shape::Disjoint(d)) => d.members().iter().any(|m| is_subset(a, m)),
        (_, Shape::Simple(y)) => in_simple(a, y),
    }
}

fn in_simple(a: &Shape, y: &SimpleShape) -> bool {
    match a {
        Shape::Empty => true,
        Shape::Whole => false,
        Shape::Simple(x) => simple_in_simple(x, y),
        Shape::Connected(c) => {
            is_subset(&Shape::Simple(y.invert()), &Shape::Disjoint(c.complement()))
        }
        Shape::Disjoint(d) => d.members().iter().all(|m| in_simple(m, y)),
    }
}

pub(crate) fn simple_in_simple(a: &SimpleShape, b: &SimpleShape) -> bool {
    let (area_a, area_b) = (a.area(), b.area());
    if area_a < 0.0 && area_b > 0.0 {
        return false;
    }
    let (box_a, box_b) = (a.jordan().bounding_box(), b.jordan().bounding_box());
    if !box_a.intersects(&box_b, EPS_NODE) {
        return area_a > 0.0 && area_b < 0.0;
    }
    if area_a > 0.0 && area_b < 0.0 {
        return curve_in_simple(a.jordan(), b) && !curve_in_simple(b.jordan(), a);
    }
    if area_a < 0.0 && area_b < 0.0 {
        return simple_in_simple(&b.invert(), &a.invert());
    }
    if area_a - area_b > 1e-9 * area_b.abs().max(1.0) {
        return false;
    }
    curve_in_simple(a.jordan(), b)
}

fn curve_in_simple(curve: &JordanCurve, b: &SimpleShape) -> bool {
    curve_in(&Shape::Simple(b.clone()), curve)
}

/// Vertices inside, and if the curve meets the boundary, the midpoint of every
/// piece between consecutive meeting points inside as well.
pub(crate) fn curve_in(shape: &Shape, curve: &JordanCurve) -> bool {
    let inside = |p: Vector2<f64>| shape.winding(p) > 0.0;
    if !curve.vertices().into_iter().all(|p| inside(p)) {
        return false;
    }
    let mut cuts: Vec<(usize, f64)> = Vec::new();
    for j in shape.jordans() {
        match curve.intersect(j) {
            Ok(hits) => cuts.extend(hits.iter().map(|h| (h.seg_a, h.t))),
            Err(_) => cuts.extend((0..curve.len()).map(|i| (i, 0.0))),
        }
    }
    if cuts.is_empty() {
        return true;
    }
    curve
        .split_local(&cuts)
        .iter()
        .all(|piece| inside(piece.midpoint()))
}
