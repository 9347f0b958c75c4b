//! Unevaluated boolean expressions over shapes.
//!
//! `!`, `&`, `|`, `-`, `^` on shapes build a `Lazy` tree; nothing is computed
//! until `resolve()`. Point queries (`density`, `winding`) work on the tree
//! directly by combining the leaves' direction sets.

use super::{boolean, Density, Shape};
use nalgebra::Vector2;
use std::ops::{BitAnd, BitOr, BitXor, Not, Sub};

#[derive(Clone, Debug, PartialEq)]
pub enum Lazy {
    Leaf(Shape),
    Not(Box<Lazy>),
    And(Vec<Lazy>),
    Or(Vec<Lazy>),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Junction {
    And,
    Or,
}

impl Junction {
    fn identity(self) -> Shape {
        match self {
            Junction::And => Shape::Whole,
            Junction::Or => Shape::Empty,
        }
    }

    fn absorbing(self) -> Shape {
        match self {
            Junction::And => Shape::Empty,
            Junction::Or => Shape::Whole,
        }
    }

    fn build(self, items: Vec<Lazy>) -> Lazy {
        match self {
            Junction::And => Lazy::And(items),
            Junction::Or => Lazy::Or(items),
        }
    }

    fn dual(self, negate: bool) -> Junction {
        match (self, negate) {
            (j, false) => j,
            (Junction::And, true) => Junction::Or,
            (Junction::Or, true) => Junction::And,
        }
    }
}

impl Lazy {
    /// Algebraic clean-up: flatten nested And/Or, drop identities, absorb,
    /// `!!x = x`, drop repeated operands, `x & !x = Empty`, `x | !x = Whole`.
    pub fn simplify(self) -> Lazy {
        match self {
            Lazy::Leaf(s) => Lazy::Leaf(s),
            Lazy::Not(x) => match x.simplify() {
                Lazy::Leaf(Shape::Empty) => Lazy::Leaf(Shape::Whole),
                Lazy::Leaf(Shape::Whole) => Lazy::Leaf(Shape::Empty),
                Lazy::Not(y) => *y,
                other => Lazy::Not(Box::new(other)),
            },
            Lazy::And(items) => simplify_junction(items, Junction::And),
            Lazy::Or(items) => simplify_junction(items, Junction::Or),
        }
    }

    /// Negation normal form with simple leaves: connected operands become the
    /// And of their members, disjoint ones the Or, negations are pushed onto
    /// the curves.
    pub(crate) fn expand(self, negate: bool) -> Lazy {
        match self {
            Lazy::Leaf(shape) => expand_leaf(shape, negate),
            Lazy::Not(x) => x.expand(!negate),
            Lazy::And(items) => Junction::And
                .dual(negate)
                .build(items.into_iter().map(|x| x.expand(negate)).collect()),
            Lazy::Or(items) => Junction::Or
                .dual(negate)
                .build(items.into_iter().map(|x| x.expand(negate)).collect()),
        }
    }

    pub(crate) fn leaves(&self) -> Vec<&Shape> {
        match self {
            Lazy::Leaf(s) => vec![s],
            Lazy::Not(x) => x.leaves(),
            Lazy::And(items) | Lazy::Or(items) => items.iter().flat_map(Lazy::leaves).collect(),
        }
    }

    /// Directions at `p` pointing into the region the expression describes.
    pub fn density(&self, p: Vector2<f64>) -> Density {
        match self {
            Lazy::Leaf(s) => s.density(p),
            Lazy::Not(x) => x.density(p).complement(),
            Lazy::And(items) => items
                .iter()
                .fold(Density::full(), |acc, x| acc.intersection(&x.density(p))),
            Lazy::Or(items) => items
                .iter()
                .fold(Density::empty(), |acc, x| acc.union(&x.density(p))),
        }
    }

    pub fn winding(&self, p: Vector2<f64>) -> f64 {
        self.density(p).measure()
    }

    /// Evaluate into a canonical shape.
    pub fn resolve(&self) -> Shape {
        let expr = self.clone().simplify().expand(false).simplify();
        tracing::debug!(leaves = expr.leaves().len(), "resolving boolean expression");
        boolean::resolve(&expr)
    }

    pub fn is_subset_of(&self, other: &Lazy) -> bool {
        self.resolve().is_subset_of(&other.resolve())
    }

    pub fn set_eq(&self, other: &Lazy) -> bool {
        self.resolve().set_eq(&other.resolve())
    }
}

fn simplify_junction(items: Vec<Lazy>, j: Junction) -> Lazy {
    let mut flat: Vec<Lazy> = Vec::with_capacity(items.len());
    for item in items.into_iter().map(Lazy::simplify) {
        match item {
            Lazy::And(inner) if j == Junction::And => flat.extend(inner),
            Lazy::Or(inner) if j == Junction::Or => flat.extend(inner),
            other => flat.push(other),
        }
    }
    let mut out: Vec<Lazy> = Vec::with_capacity(flat.len());
    for item in flat {
        if let Lazy::Leaf(s) = &item {
            if *s == j.identity() {
                continue;
            }
            if *s == j.absorbing() {
                return Lazy::Leaf(j.absorbing());
            }
        }
        if out.contains(&item) {
            continue;
        }
        if out.iter().any(|o| complementary(o, &item)) {
            return Lazy::Leaf(j.absorbing());
        }
        out.push(item);
    }
    if out.len() > 1 {
        j.build(out)
    } else {
        out.pop().unwrap_or_else(|| Lazy::Leaf(j.identity()))
    }
}

fn complementary(a: &Lazy, b: &Lazy) -> bool {
    match (a, b) {
        (Lazy::Not(x), y) | (y, Lazy::Not(x)) => **x == *y,
        (Lazy::Leaf(Shape::Simple(s)), Lazy::Leaf(Shape::Simple(t))) => s.is_inverse_of(t),
        _ => false,
    }
}

fn expand_leaf(shape: Shape, negate: bool) -> Lazy {
    match shape {
        Shape::Empty | Shape::Whole if negate => Lazy::Leaf(shape.complement()),
        Shape::Simple(s) if negate => Lazy::Leaf(Shape::Simple(s.invert())),
        Shape::Connected(c) => Junction::And.dual(negate).build(
            c.members()
                .iter()
                .map(|m| Lazy::Leaf(Shape::Simple(if negate { m.invert() } else { m.clone() })))
                .collect(),
        ),
        Shape::Disjoint(d) => Junction::Or.dual(negate).build(
            d.members()
                .iter()
                .map(|m| expand_leaf(m.clone(), negate))
                .collect(),
        ),
        other => Lazy::Leaf(other),
    }
}

impl From<Shape> for Lazy {
    fn from(s: Shape) -> Self {
        Lazy::Leaf(s)
    }
}

impl From<&Shape> for Lazy {
    fn from(s: &Shape) -> Self {
        Lazy::Leaf(s.clone())
    }
}

impl From<&Lazy> for Lazy {
    fn from(e: &Lazy) -> Self {
        e.clone()
    }
}

macro_rules! lazy_ops {
    ($($t:ty),*) => {$(
        impl<R: Into<Lazy>> BitAnd<R> for $t {
            type Output = Lazy;
            fn bitand(self, rhs: R) -> Lazy {
                Lazy::And(vec![self.into(), rhs.into()])
            }
        }

        impl<R: Into<Lazy>> BitOr<R> for $t {
            type Output = Lazy;
            fn bitor(self, rhs: R) -> Lazy {
                Lazy::Or(vec![self.into(), rhs.into()])
            }
        }

        /// `a - b = a & !b`
        impl<R: Into<Lazy>> Sub<R> for $t {
            type Output = Lazy;
            fn sub(self, rhs: R) -> Lazy {
                Lazy::And(vec![self.into(), Lazy::Not(Box::new(rhs.into()))])
            }
        }

        /// `a ^ b = (a & !b) | (b & !a)`
        impl<R: Into<Lazy>> BitXor<R> for $t {
            type Output = Lazy;
            fn bitxor(self, rhs: R) -> Lazy {
                let (a, b): (Lazy, Lazy) = (self.into(), rhs.into());
                Lazy::Or(vec![
                    Lazy::And(vec![a.clone(), Lazy::Not(Box::new(b.clone()))]),
                    Lazy::And(vec![b, Lazy::Not(Box::new(a))]),
                ])
            }
        }

        impl Not for $t {
            type Output = Lazy;
            fn not(self) -> Lazy {
                Lazy::Not(Box::new(self.into()))
            }
        }
    )*};
}

lazy_ops!(Shape, &Shape, Lazy, &Lazy);
