//! Scalar analytic functions of one parameter.
//!
//! Purpose
//! - Coordinate functions of planar segments: `x(t)`, `y(t)` on [0,1].
//! - Two representations behind one enum: power basis (`Polynomial`, Horner)
//!   and Bernstein basis (`Bezier`, de Casteljau). Arithmetic stays in the
//!   Bernstein basis when both sides are Bezier, otherwise falls back to power basis.
//!
//! Equality is exact: two functions are equal iff their trimmed power-basis
//! coefficients match bit-for-bit.

mod bezier;
mod polynomial;

pub use bezier::Bezier;
pub use polynomial::Polynomial;

use std::ops::{Add, Mul, Neg, Sub};

/// `C(n, k)` as a float; exact for the degrees used here.
pub(crate) fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

#[derive(Clone, Debug)]
pub enum AnalyticFunction {
    Polynomial(Polynomial),
    Bezier(Bezier),
}

impl AnalyticFunction {
    pub fn polynomial(coefs: Vec<f64>) -> Self {
        Self::Polynomial(Polynomial::new(coefs))
    }

    pub fn bezier(ctrl: Vec<f64>) -> Self {
        Self::Bezier(Bezier::new(ctrl))
    }

    pub fn constant(c: f64) -> Self {
        Self::Polynomial(Polynomial::constant(c))
    }

    pub fn eval(&self, t: f64) -> f64 {
        match self {
            Self::Polynomial(p) => p.eval(t),
            Self::Bezier(b) => b.eval(t),
        }
    }

    pub fn derivative(&self) -> AnalyticFunction {
        match self {
            Self::Polynomial(p) => Self::Polynomial(p.derivative()),
            Self::Bezier(b) => Self::Bezier(b.derivative()),
        }
    }

    /// k-th derivative value at `t`.
    pub fn eval_derivative(&self, t: f64, order: usize) -> f64 {
        let mut f = self.clone();
        for _ in 0..order {
            f = f.derivative();
        }
        f.eval(t)
    }

    /// True degree; 0 for constants, including the zero function.
    pub fn degree(&self) -> usize {
        match self {
            Self::Polynomial(p) => p.degree(),
            Self::Bezier(b) => b.to_polynomial().degree(),
        }
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    pub fn to_polynomial(&self) -> Polynomial {
        match self {
            Self::Polynomial(p) => p.trimmed(),
            Self::Bezier(b) => b.to_polynomial(),
        }
    }

    pub fn to_bezier(&self) -> Bezier {
        match self {
            Self::Polynomial(p) => Bezier::from_polynomial(p, p.degree()),
            Self::Bezier(b) => b.clone(),
        }
    }

    /// `f(scale·t + shift)`. Bezier functions stay in Bernstein form (blossoming).
    pub fn compose_affine(&self, scale: f64, shift: f64) -> AnalyticFunction {
        match self {
            Self::Polynomial(p) => Self::Polynomial(p.compose_affine(scale, shift)),
            Self::Bezier(b) => Self::Bezier(b.restrict(shift, shift + scale)),
        }
    }

    /// Same function on [a, b] stretched to [0, 1].
    pub fn restrict(&self, a: f64, b: f64) -> AnalyticFunction {
        self.compose_affine(b - a, a)
    }

    pub fn add_constant(&self, c: f64) -> AnalyticFunction {
        match self {
            Self::Polynomial(p) => Self::Polynomial(p + &Polynomial::constant(c)),
            Self::Bezier(b) => Self::Bezier(b.map(|v| v + c)),
        }
    }

    pub fn scale(&self, s: f64) -> AnalyticFunction {
        match self {
            Self::Polynomial(p) => Self::Polynomial(p.scale(s)),
            Self::Bezier(b) => Self::Bezier(b.map(|v| v * s)),
        }
    }

    pub fn powi(&self, n: u32) -> AnalyticFunction {
        let mut out = AnalyticFunction::constant(1.0);
        for _ in 0..n {
            out = &out * self;
        }
        out
    }

    /// `∫_0^1 f(t) dt` in closed form.
    pub fn integrate(&self) -> f64 {
        match self {
            Self::Polynomial(p) => p.integrate(0.0, 1.0),
            Self::Bezier(b) => b.integral(),
        }
    }
}

impl PartialEq for AnalyticFunction {
    fn eq(&self, other: &Self) -> bool {
        self.to_polynomial() == other.to_polynomial()
    }
}

impl From<Polynomial> for AnalyticFunction {
    fn from(p: Polynomial) -> Self {
        Self::Polynomial(p)
    }
}

impl From<Bezier> for AnalyticFunction {
    fn from(b: Bezier) -> Self {
        Self::Bezier(b)
    }
}

impl Add for &AnalyticFunction {
    type Output = AnalyticFunction;
    fn add(self, rhs: &AnalyticFunction) -> AnalyticFunction {
        match (self, rhs) {
            (AnalyticFunction::Bezier(a), AnalyticFunction::Bezier(b)) => {
                AnalyticFunction::Bezier(a.add(b))
            }
            _ => AnalyticFunction::Polynomial(&self.to_polynomial() + &rhs.to_polynomial()),
        }
    }
}

impl Sub for &AnalyticFunction {
    type Output = AnalyticFunction;
    fn sub(self, rhs: &AnalyticFunction) -> AnalyticFunction {
        self + &(-rhs)
    }
}

impl Neg for &AnalyticFunction {
    type Output = AnalyticFunction;
    fn neg(self) -> AnalyticFunction {
        self.scale(-1.0)
    }
}

impl Mul<f64> for &AnalyticFunction {
    type Output = AnalyticFunction;
    fn mul(self, rhs: f64) -> AnalyticFunction {
        self.scale(rhs)
    }
}

impl Mul for &AnalyticFunction {
    type Output = AnalyticFunction;
    fn mul(self, rhs: &AnalyticFunction) -> AnalyticFunction {
        match (self, rhs) {
            (AnalyticFunction::Bezier(a), AnalyticFunction::Bezier(b)) => {
                AnalyticFunction::Bezier(a.mul(b))
            }
            _ => AnalyticFunction::Polynomial(&self.to_polynomial() * &rhs.to_polynomial()),
        }
    }
}

macro_rules! forward_owned {
    ($tr:ident, $m:ident) => {
        impl $tr for AnalyticFunction {
            type Output = AnalyticFunction;
            fn $m(self, rhs: AnalyticFunction) -> AnalyticFunction {
                (&self).$m(&rhs)
            }
        }
    };
}

forward_owned!(Add, add);
forward_owned!(Sub, sub);
forward_owned!(Mul, mul);

impl Mul<f64> for AnalyticFunction {
    type Output = AnalyticFunction;
    fn mul(self, rhs: f64) -> AnalyticFunction {
        self.scale(rhs)
    }
}

impl Neg for AnalyticFunction {
    type Output = AnalyticFunction;
    fn neg(self) -> AnalyticFunction {
        self.scale(-1.0)
    }
}

#[cfg(test)]
mod tests;
