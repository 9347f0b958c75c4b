//! Bernstein-basis (Bezier) scalar functions on [0,1].

use super::{binomial, Polynomial};

/// Scalar Bezier function `Σ b_i B_{i,n}(t)` with `n = ctrl.len() - 1`.
#[derive(Clone, Debug)]
pub struct Bezier {
    ctrl: Vec<f64>,
}

impl Bezier {
    pub fn new(ctrl: Vec<f64>) -> Self {
        if ctrl.is_empty() {
            return Self { ctrl: vec![0.0] };
        }
        Self { ctrl }
    }

    #[inline]
    pub fn ctrl(&self) -> &[f64] {
        &self.ctrl
    }

    /// Nominal degree (`ctrl.len() - 1`); the true degree may be lower.
    #[inline]
    pub fn order(&self) -> usize {
        self.ctrl.len() - 1
    }

    /// de Casteljau evaluation. Exact at `t = 0` and `t = 1`.
    pub fn eval(&self, t: f64) -> f64 {
        let mut work = self.ctrl.clone();
        for level in 1..work.len() {
            for i in 0..work.len() - level {
                work[i] = (1.0 - t) * work[i] + t * work[i + 1];
            }
        }
        work[0]
    }

    /// Blossom `B(t_1, …, t_n)`; one de Casteljau level per argument.
    pub fn blossom(&self, ts: &[f64]) -> f64 {
        debug_assert_eq!(ts.len(), self.order());
        let mut work = self.ctrl.clone();
        for (level, t) in ts.iter().enumerate() {
            for i in 0..work.len() - level - 1 {
                work[i] = (1.0 - t) * work[i] + t * work[i + 1];
            }
        }
        work[0]
    }

    /// Control values of the same function reparametrized from [a, b] to [0, 1].
    pub fn restrict(&self, a: f64, b: f64) -> Bezier {
        let n = self.order();
        let ctrl = (0..=n)
            .map(|i| {
                let mut ts = vec![a; n - i];
                ts.extend(std::iter::repeat(b).take(i));
                self.blossom(&ts)
            })
            .collect();
        Bezier { ctrl }
    }

    /// de Casteljau subdivision; both halves share the value at `t` bit-for-bit.
    pub fn split_at(&self, t: f64) -> (Bezier, Bezier) {
        let n = self.order();
        let mut work = self.ctrl.clone();
        let mut left = Vec::with_capacity(n + 1);
        let mut right = vec![0.0; n + 1];
        left.push(work[0]);
        right[n] = work[n];
        for level in 1..=n {
            for i in 0..=n - level {
                work[i] = (1.0 - t) * work[i] + t * work[i + 1];
            }
            left.push(work[0]);
            right[n - level] = work[n - level];
        }
        (Bezier { ctrl: left }, Bezier { ctrl: right })
    }

    pub fn reverse(&self) -> Bezier {
        Bezier {
            ctrl: self.ctrl.iter().rev().copied().collect(),
        }
    }

    /// Degree elevation to nominal degree `to` (no-op if already there).
    pub fn elevate(&self, to: usize) -> Bezier {
        let mut ctrl = self.ctrl.clone();
        while ctrl.len() - 1 < to {
            let n1 = ctrl.len() as f64;
            let mut next = Vec::with_capacity(ctrl.len() + 1);
            next.push(ctrl[0]);
            for i in 1..ctrl.len() {
                let a = i as f64 / n1;
                next.push(a * ctrl[i - 1] + (1.0 - a) * ctrl[i]);
            }
            next.push(ctrl[ctrl.len() - 1]);
            ctrl = next;
        }
        Bezier { ctrl }
    }

    pub fn derivative(&self) -> Bezier {
        let n = self.order();
        if n == 0 {
            return Bezier { ctrl: vec![0.0] };
        }
        Bezier {
            ctrl: self
                .ctrl
                .windows(2)
                .map(|w| n as f64 * (w[1] - w[0]))
                .collect(),
        }
    }

    pub fn to_polynomial(&self) -> Polynomial {
        let n = self.order();
        let coefs = (0..=n)
            .map(|k| {
                let s: f64 = (0..=k)
                    .map(|i| {
                        let sign = if (k - i) % 2 == 0 { 1.0 } else { -1.0 };
                        sign * binomial(k, i) * self.ctrl[i]
                    })
                    .sum();
                binomial(n, k) * s
            })
            .collect();
        Polynomial::new(coefs)
    }

    /// Bernstein form of `p` at nominal degree `order` (raised to `p.degree()` if lower).
    pub fn from_polynomial(p: &Polynomial, order: usize) -> Bezier {
        let n = order.max(p.degree());
        let a = p.coefs();
        let ctrl = (0..=n)
            .map(|i| {
                (0..=i.min(p.degree()))
                    .map(|k| binomial(i, k) / binomial(n, k) * a.get(k).copied().unwrap_or(0.0))
                    .sum()
            })
            .collect();
        Bezier { ctrl }
    }

    pub(crate) fn add(&self, other: &Bezier) -> Bezier {
        let n = self.order().max(other.order());
        let (a, b) = (self.elevate(n), other.elevate(n));
        Bezier {
            ctrl: a.ctrl.iter().zip(&b.ctrl).map(|(x, y)| x + y).collect(),
        }
    }

    pub(crate) fn map(&self, f: impl Fn(f64) -> f64) -> Bezier {
        Bezier {
            ctrl: self.ctrl.iter().map(|c| f(*c)).collect(),
        }
    }

    /// Product in Bernstein form: `(fg)_k = Σ_{i+j=k} C(m,i)C(n,j)/C(m+n,k) f_i g_j`.
    pub(crate) fn mul(&self, other: &Bezier) -> Bezier {
        let (m, n) = (self.order(), other.order());
        let mut ctrl = vec![0.0; m + n + 1];
        for (i, fi) in self.ctrl.iter().enumerate() {
            for (j, gj) in other.ctrl.iter().enumerate() {
                ctrl[i + j] += binomial(m, i) * binomial(n, j) / binomial(m + n, i + j) * fi * gj;
            }
        }
        Bezier { ctrl }
    }

    /// `∫_0^1` equals the mean of the control values.
    pub fn integral(&self) -> f64 {
        self.ctrl.iter().sum::<f64>() / self.ctrl.len() as f64
    }
}
