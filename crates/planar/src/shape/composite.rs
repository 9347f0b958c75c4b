//! Multi-curve regions: intersections (`ConnectedShape`) and disjoint unions
//! (`DisjointShape`) of simpler regions.
//!
//! Invariants (checked by `new`, assumed by the `*_unchecked` builders used on
//! boolean-engine output)
//! - Connected: at least two simple members, at most one of them bounded
//!   (the outer boundary, stored first); the holes (clockwise members) are
//!   pairwise disjoint and lie inside the outer member; holes follow by
//!   increasing enclosed area.
//! - Disjoint: at least two members, each Simple or Connected, pairwise
//!   disjoint, at most one unbounded (stored first); the rest follow by
//!   decreasing area.

use super::contains::{is_subset, simple_in_simple};
use super::{Density, Shape, SimpleShape};
use crate::curve::Affine2;
use crate::error::GeometryError;
use crate::integrate;
use nalgebra::Vector2;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectedShape {
    members: Vec<SimpleShape>,
}

impl ConnectedShape {
    pub fn new(members: Vec<SimpleShape>) -> Result<Self, GeometryError> {
        if members.len() < 2 {
            return Err(GeometryError::construction(format!(
                "connected shape needs at least 2 members, got {}",
                members.len()
            )));
        }
        let outer = members.iter().filter(|m| m.is_bounded()).count();
        if outer > 1 {
            return Err(GeometryError::construction(format!(
                "connected shape has {outer} bounded members, at most 1 allowed"
            )));
        }
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                if !holes_are_compatible(a, b) {
                    return Err(GeometryError::construction(
                        "connected shape members cross, nest the wrong way or overlap",
                    ));
                }
            }
        }
        Ok(Self::from_unchecked(members))
    }

    pub(crate) fn from_unchecked(mut members: Vec<SimpleShape>) -> Self {
        sort_connected(&mut members);
        Self { members }
    }

    #[inline]
    pub fn members(&self) -> &[SimpleShape] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Has an outer boundary.
    pub fn is_bounded(&self) -> bool {
        self.members.first().map_or(false, SimpleShape::is_bounded)
    }

    pub fn density(&self, p: Vector2<f64>) -> Density {
        self.members
            .iter()
            .fold(Density::full(), |acc, m| acc.intersection(&m.density(p)))
    }

    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        self.members.iter().all(|m| m.contains_point(p))
    }

    /// Union of the inverted members: the outer exterior plus one disk per hole.
    pub fn complement(&self) -> DisjointShape {
        DisjointShape::from_unchecked(
            self.members
                .iter()
                .map(|m| Shape::Simple(m.invert()))
                .collect(),
        )
    }

    pub fn transform(&self, f: &Affine2) -> ConnectedShape {
        Self::from_unchecked(self.members.iter().map(|m| m.transform(f)).collect())
    }
}

/// Two members of a connected shape: each one's curve lies in the other region,
/// i.e. a hole sits inside the outer boundary, or two holes are apart.
fn holes_are_compatible(a: &SimpleShape, b: &SimpleShape) -> bool {
    let (hole, other) = match (a.is_bounded(), b.is_bounded()) {
        (true, false) => (b, a),
        (false, _) => (a, b),
        (true, true) => return false,
    };
    simple_in_simple(&hole.invert(), other)
}

fn sort_connected(members: &mut [SimpleShape]) {
    members.sort_by(|a, b| match (a.is_bounded(), b.is_bounded()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.area().abs().total_cmp(&b.area().abs()),
    });
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisjointShape {
    members: Vec<Shape>,
}

impl DisjointShape {
    pub fn new(members: Vec<Shape>) -> Result<Self, GeometryError> {
        if members.len() < 2 {
            return Err(GeometryError::construction(format!(
                "disjoint shape needs at least 2 members, got {}",
                members.len()
            )));
        }
        if let Some(m) = members
            .iter()
            .find(|m| !matches!(m, Shape::Simple(_) | Shape::Connected(_)))
        {
            return Err(GeometryError::construction(format!(
                "disjoint shape member must be simple or connected, got {}",
                m.kind()
            )));
        }
        let unbounded = members.iter().filter(|m| !m.is_bounded()).count();
        if unbounded > 1 {
            return Err(GeometryError::construction(format!(
                "disjoint shape has {unbounded} unbounded members, at most 1 allowed"
            )));
        }
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                if !is_subset(a, &b.complement()) {
                    return Err(GeometryError::construction(
                        "disjoint shape members overlap",
                    ));
                }
            }
        }
        Ok(Self::from_unchecked(members))
    }

    pub(crate) fn from_unchecked(mut members: Vec<Shape>) -> Self {
        members.sort_by(|a, b| match (a.is_bounded(), b.is_bounded()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => integrate::area(b).total_cmp(&integrate::area(a)),
        });
        Self { members }
    }

    #[inline]
    pub fn members(&self) -> &[Shape] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_bounded(&self) -> bool {
        self.members.iter().all(Shape::is_bounded)
    }

    pub fn density(&self, p: Vector2<f64>) -> Density {
        self.members
            .iter()
            .fold(Density::empty(), |acc, m| acc.union(&m.density(p)))
    }

    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        self.members.iter().any(|m| m.contains_point(p))
    }

    pub fn transform(&self, f: &Affine2) -> DisjointShape {
        Self::from_unchecked(self.members.iter().map(|m| m.transform(f)).collect())
    }
}
