//! Power-basis polynomials `Σ a_k t^k` and real root isolation.

use crate::cfg::{EPS_ROOT, NEWTON_ITERS};
use std::ops::{Add, Mul, Neg, Sub};

/// Polynomial in the power basis; `coefs[k]` multiplies `t^k`.
///
/// Trailing zeros are allowed in storage and ignored by every query.
#[derive(Clone, Debug)]
pub struct Polynomial {
    coefs: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefs: Vec<f64>) -> Self {
        if coefs.is_empty() {
            return Self::zero();
        }
        Self { coefs }
    }

    #[inline]
    pub fn zero() -> Self {
        Self { coefs: vec![0.0] }
    }

    #[inline]
    pub fn constant(c: f64) -> Self {
        Self { coefs: vec![c] }
    }

    /// Coefficients as stored (may carry trailing zeros).
    #[inline]
    pub fn coefs(&self) -> &[f64] {
        &self.coefs
    }

    /// Index of the last non-zero coefficient; the zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coefs.iter().rposition(|c| *c != 0.0).unwrap_or(0)
    }

    fn active(&self) -> &[f64] {
        &self.coefs[..=self.degree()]
    }

    pub fn trimmed(&self) -> Polynomial {
        Polynomial::new(self.active().to_vec())
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    /// Horner evaluation.
    pub fn eval(&self, t: f64) -> f64 {
        self.active().iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    pub fn derivative(&self) -> Polynomial {
        let a = self.active();
        if a.len() <= 1 {
            return Polynomial::zero();
        }
        Polynomial::new(
            a.iter()
                .enumerate()
                .skip(1)
                .map(|(k, c)| c * k as f64)
                .collect(),
        )
    }

    /// Antiderivative with zero constant term.
    pub fn antiderivative(&self) -> Polynomial {
        let mut out = Vec::with_capacity(self.degree() + 2);
        out.push(0.0);
        out.extend(
            self.active()
                .iter()
                .enumerate()
                .map(|(k, c)| c / (k as f64 + 1.0)),
        );
        Polynomial::new(out)
    }

    /// `∫_a^b p(t) dt` in closed form.
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        let anti = self.antiderivative();
        anti.eval(b) - anti.eval(a)
    }

    pub fn scale(&self, s: f64) -> Polynomial {
        Polynomial::new(self.active().iter().map(|c| c * s).collect())
    }

    /// `p(scale·t + shift)`.
    pub fn compose_affine(&self, scale: f64, shift: f64) -> Polynomial {
        let inner = Polynomial::new(vec![shift, scale]);
        self.active()
            .iter()
            .rev()
            .fold(Polynomial::zero(), |acc, c| &(&acc * &inner) + &Polynomial::constant(*c))
    }

    pub fn powi(&self, n: u32) -> Polynomial {
        let mut out = Polynomial::constant(1.0);
        for _ in 0..n {
            out = &out * self;
        }
        out
    }

    /// Sum of coefficient magnitudes; bounds |p| on [-1, 1].
    pub(crate) fn magnitude(&self) -> f64 {
        self.active().iter().map(|c| c.abs()).sum()
    }

    /// All real roots in `[lo, hi]`, ascending.
    ///
    /// Roots are isolated between consecutive critical points (roots of the
    /// derivative, found recursively) and refined by safeguarded Newton. Critical
    /// points where |p| is negligible are reported too, so even-multiplicity
    /// (tangential) roots are not lost. The zero polynomial reports no roots.
    pub fn roots_in(&self, lo: f64, hi: f64) -> Vec<f64> {
        let n = self.degree();
        let tol = EPS_ROOT * self.magnitude();
        if n == 0 || !(lo <= hi) {
            return Vec::new();
        }
        let a = self.active();
        if n == 1 {
            let r = -a[0] / a[1];
            let slack = 1e-12 * (hi - lo).max(1.0);
            return if r >= lo - slack && r <= hi + slack {
                vec![r.clamp(lo, hi)]
            } else {
                Vec::new()
            };
        }
        let mut knots = vec![lo];
        knots.extend(
            self.derivative()
                .roots_in(lo, hi)
                .into_iter()
                .filter(|c| *c > lo && *c < hi),
        );
        knots.push(hi);
        let vals: Vec<f64> = knots.iter().map(|k| self.eval(*k)).collect();
        let mut roots = Vec::new();
        for i in 0..knots.len() {
            if vals[i].abs() <= tol {
                roots.push(knots[i]);
            }
            if i + 1 < knots.len() {
                let (fa, fb) = (vals[i], vals[i + 1]);
                if fa.abs() > tol && fb.abs() > tol && fa.signum() != fb.signum() {
                    roots.push(self.bracketed_root(knots[i], knots[i + 1], fa));
                }
            }
        }
        roots.sort_by(|x, y| x.total_cmp(y));
        roots.dedup_by(|x, y| (*x - *y).abs() <= 1e-12 * (1.0 + y.abs()));
        roots
    }

    fn bracketed_root(&self, mut a: f64, mut b: f64, fa: f64) -> f64 {
        let d = self.derivative();
        let mut x = 0.5 * (a + b);
        for _ in 0..2 * NEWTON_ITERS {
            let fx = self.eval(x);
            if fx == 0.0 {
                return x;
            }
            if fx.signum() == fa.signum() {
                a = x;
            } else {
                b = x;
            }
            let dx = d.eval(x);
            let step = if dx != 0.0 { x - fx / dx } else { f64::NAN };
            let next = if step > a && step < b {
                step
            } else {
                0.5 * (a + b)
            };
            if (next - x).abs() <= 2.0 * f64::EPSILON * (1.0 + x.abs()) {
                return next;
            }
            x = next;
        }
        x
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.active() == other.active()
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: &Polynomial) -> Polynomial {
        let n = self.coefs.len().max(rhs.coefs.len());
        Polynomial::new(
            (0..n)
                .map(|k| self.coefs.get(k).unwrap_or(&0.0) + rhs.coefs.get(k).unwrap_or(&0.0))
                .collect(),
        )
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self + &(-rhs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let (a, b) = (self.active(), rhs.active());
        let mut out = vec![0.0; a.len() + b.len() - 1];
        for (i, x) in a.iter().enumerate() {
            for (j, y) in b.iter().enumerate() {
                out[i + j] += x * y;
            }
        }
        Polynomial::new(out)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: Polynomial) -> Polynomial {
        &self + &rhs
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: Polynomial) -> Polynomial {
        &self - &rhs
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        -&self
    }
}
