//! Canonical planar regions and their boolean algebra.
//!
//! Purpose
//! - `Shape` is one of five canonical forms: `Empty`, `Whole`, `Simple` (one
//!   curve), `Connected` (intersection of simple regions: an outer boundary
//!   with holes), `Disjoint` (union of pairwise disjoint simple/connected
//!   regions).
//! - Operators `!`, `&`, `|`, `-`, `^` build [`Lazy`] expressions;
//!   `Lazy::resolve` (or the eager helpers `union`, `intersection`, ...) turns
//!   them back into a canonical `Shape`.
//! - Point queries use [`Density`]: 1 inside, 0 outside, the interior angle
//!   fraction on the boundary.
//!
//! Notes
//! - Complements of Simple and Connected shapes are computed directly; only
//!   binary operations on crossing curves go through the graph engine.
//! - Curves are shared between shapes through `Arc`, so cloning shapes is cheap.

mod boolean;
mod composite;
mod contains;
mod density;
mod lazy;
pub mod primitive;
pub mod random;
mod simple;

pub use composite::{ConnectedShape, DisjointShape};
pub use density::Density;
pub use lazy::Lazy;
pub use simple::SimpleShape;

use crate::curve::Affine2;
use crate::integrate;
use crate::jordan::JordanCurve;
use nalgebra::Vector2;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Empty,
    Whole,
    Simple(SimpleShape),
    Connected(ConnectedShape),
    Disjoint(DisjointShape),
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Empty => "empty",
            Shape::Whole => "whole",
            Shape::Simple(_) => "simple",
            Shape::Connected(_) => "connected",
            Shape::Disjoint(_) => "disjoint",
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Shape::Empty)
    }

    #[inline]
    pub fn is_whole(&self) -> bool {
        matches!(self, Shape::Whole)
    }

    /// Fits in a finite box.
    pub fn is_bounded(&self) -> bool {
        match self {
            Shape::Empty => true,
            Shape::Whole => false,
            Shape::Simple(s) => s.is_bounded(),
            Shape::Connected(c) => c.is_bounded(),
            Shape::Disjoint(d) => d.is_bounded(),
        }
    }

    /// Boundary curves, members in order.
    pub fn jordans(&self) -> Vec<&JordanCurve> {
        match self {
            Shape::Empty | Shape::Whole => Vec::new(),
            Shape::Simple(s) => vec![s.jordan()],
            Shape::Connected(c) => c.members().iter().map(SimpleShape::jordan).collect(),
            Shape::Disjoint(d) => d.members().iter().flat_map(Shape::jordans).collect(),
        }
    }

    pub fn density(&self, p: Vector2<f64>) -> Density {
        match self {
            Shape::Empty => Density::empty(),
            Shape::Whole => Density::full(),
            Shape::Simple(s) => s.density(p),
            Shape::Connected(c) => c.density(p),
            Shape::Disjoint(d) => d.density(p),
        }
    }

    /// Lebesgue density at `p`, in [0, 1].
    pub fn winding(&self, p: Vector2<f64>) -> f64 {
        match self {
            Shape::Simple(s) => s.winding(p),
            _ => self.density(p).measure(),
        }
    }

    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        match self {
            Shape::Empty => false,
            Shape::Whole => true,
            Shape::Simple(s) => s.contains_point(p),
            Shape::Connected(c) => c.contains_point(p),
            Shape::Disjoint(d) => d.contains_point(p),
        }
    }

    /// Set complement, canonical.
    pub fn complement(&self) -> Shape {
        match self {
            Shape::Empty => Shape::Whole,
            Shape::Whole => Shape::Empty,
            Shape::Simple(s) => Shape::Simple(s.invert()),
            Shape::Connected(c) => Shape::Disjoint(c.complement()),
            Shape::Disjoint(d) => {
                let simple: Option<Vec<SimpleShape>> = d
                    .members()
                    .iter()
                    .map(|m| match m {
                        Shape::Simple(s) => Some(s.invert()),
                        _ => None,
                    })
                    .collect();
                match simple {
                    Some(members) => Shape::Connected(ConnectedShape::from_unchecked(members)),
                    None => (!self).resolve(),
                }
            }
        }
    }

    pub fn union(&self, other: &Shape) -> Shape {
        (self | other).resolve()
    }

    pub fn intersection(&self, other: &Shape) -> Shape {
        (self & other).resolve()
    }

    pub fn difference(&self, other: &Shape) -> Shape {
        (self - other).resolve()
    }

    pub fn symmetric_difference(&self, other: &Shape) -> Shape {
        (self ^ other).resolve()
    }

    pub fn transform(&self, f: &Affine2) -> Shape {
        match self {
            Shape::Empty | Shape::Whole => self.clone(),
            Shape::Simple(s) => Shape::Simple(s.transform(f)),
            Shape::Connected(c) => Shape::Connected(c.transform(f)),
            Shape::Disjoint(d) => Shape::Disjoint(d.transform(f)),
        }
    }

    pub fn move_by(&self, dx: f64, dy: f64) -> Shape {
        self.transform(&Affine2::translation(dx, dy))
    }

    /// Rotation about the origin.
    pub fn rotate(&self, angle: f64) -> Shape {
        self.transform(&Affine2::rotation(angle))
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Shape {
        self.transform(&Affine2::scaling(sx, sy))
    }

    /// Area with default quadrature; see [`integrate::area`].
    pub fn area(&self) -> f64 {
        integrate::area(self)
    }

    /// Same kind and the same boundary curves (as point sets with orientation),
    /// regardless of member order and curve segmentation.
    pub fn same_as(&self, other: &Shape) -> bool {
        let curves_match = |a: Vec<&JordanCurve>, b: Vec<&JordanCurve>| {
            a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| x.same_as(y)))
        };
        self.kind() == other.kind() && curves_match(self.jordans(), other.jordans())
    }
}

impl From<SimpleShape> for Shape {
    fn from(s: SimpleShape) -> Self {
        Shape::Simple(s)
    }
}

impl From<ConnectedShape> for Shape {
    fn from(c: ConnectedShape) -> Self {
        Shape::Connected(c)
    }
}

impl From<DisjointShape> for Shape {
    fn from(d: DisjointShape) -> Self {
        Shape::Disjoint(d)
    }
}

impl From<JordanCurve> for Shape {
    fn from(j: JordanCurve) -> Self {
        Shape::Simple(SimpleShape::new(j))
    }
}
