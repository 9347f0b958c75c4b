//! Segment–segment intersection.
//!
//! Dispatch by segment family:
//! - line × line: one 2×2 solve.
//! - line × analytic: substitute the curve into the implicit line equation and
//!   find the polynomial's roots on [0, 1].
//! - line × conic: `A cos θ + B sin θ = C` in closed form.
//! - analytic × analytic: resultant in `t`, interpolated at Chebyshev nodes
//!   in `u`, roots in `u`, then a 2D Newton polish of each pair.
//! - anything with a non-linear conic partner: box subdivision + Newton.
//!
//! Coincident pieces are found first from the end points of either segment lying
//! on the other; their end parameters are reported so callers can split there.

use crate::analytic::Polynomial;
use crate::cfg::{EPS_NODE, EPS_PARAM, EPS_POINT, NEWTON_ITERS};
use crate::curve::{ConicArc, Segment};
use crate::error::GeometryError;
use crate::parallelogram_area as cross;
use nalgebra::{DMatrix, Vector2};
use std::f64::consts::PI;

/// Parameter pairs `(t, u)` with `a(t) == b(u)`, sorted by `t`.
///
/// Fails only when the two segments share a continuous piece that the end
/// point test cannot isolate (the resultant vanishes identically).
pub(crate) fn segment_pair(a: &Segment, b: &Segment) -> Result<Vec<(f64, f64)>, GeometryError> {
    if a.is_degenerate() || b.is_degenerate() {
        return Ok(Vec::new());
    }
    if !a.bounding_box().intersects(&b.bounding_box(), EPS_NODE) {
        return Ok(Vec::new());
    }
    let touches = endpoint_touches(a, b);
    if is_overlap(a, b, &touches) {
        return Ok(finish(a, b, touches));
    }
    let hits = match (a, b) {
        _ if a.is_linear() && b.is_linear() => line_line(a, b),
        (_, Segment::Conic(arc)) if a.is_linear() => line_conic(a, arc),
        _ if a.is_linear() => line_curve(a, b),
        (Segment::Conic(arc), _) if b.is_linear() => swapped(line_conic(b, arc)),
        _ if b.is_linear() => swapped(line_curve(b, a)),
        (Segment::Analytic { .. }, Segment::Analytic { .. }) => resultant(a, b)?,
        _ => subdivision(a, b),
    };
    let mut all = touches;
    all.extend(hits);
    Ok(finish(a, b, all))
}

fn swapped(hits: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    hits.into_iter().map(|(u, t)| (t, u)).collect()
}

fn endpoint_touches(a: &Segment, b: &Segment) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    for (t, p) in [(0.0, a.start()), (1.0, a.end())] {
        let (u, d) = b.project(p);
        if d <= EPS_POINT {
            out.push((t, u));
        }
    }
    for (u, q) in [(0.0, b.start()), (1.0, b.end())] {
        let (t, d) = a.project(q);
        if d <= EPS_POINT {
            out.push((t, u));
        }
    }
    out
}

/// Two distinct touch points with the stretch of `a` between them lying on `b`.
fn is_overlap(a: &Segment, b: &Segment, touches: &[(f64, f64)]) -> bool {
    let lo = touches.iter().map(|h| h.0).fold(f64::INFINITY, f64::min);
    let hi = touches.iter().map(|h| h.0).fold(f64::NEG_INFINITY, f64::max);
    if touches.len() < 2 || !(hi - lo > EPS_PARAM) {
        return false;
    }
    if (a.eval(hi) - a.eval(lo)).norm() <= EPS_NODE {
        return false;
    }
    [0.25, 0.5, 0.75]
        .iter()
        .all(|f| b.project(a.eval(lo + f * (hi - lo))).1 <= 10.0 * EPS_POINT)
}

fn line_line(a: &Segment, b: &Segment) -> Vec<(f64, f64)> {
    let (p, d) = (a.start(), a.end() - a.start());
    let (q, e) = (b.start(), b.end() - b.start());
    let det = cross(d, e);
    if det.abs() <= 1e-15 * d.norm() * e.norm() {
        return Vec::new();
    }
    let w = q - p;
    vec![(cross(w, e) / det, cross(w, d) / det)]
}

/// Hits as `(t_line, u_curve)`.
fn line_curve(line: &Segment, curve: &Segment) -> Vec<(f64, f64)> {
    let Segment::Analytic { x, y } = curve else {
        return Vec::new();
    };
    let (p, d) = (line.start(), line.end() - line.start());
    let n = Vector2::new(-d.y, d.x);
    let f = &(&x.to_polynomial().scale(n.x) + &y.to_polynomial().scale(n.y))
        + &Polynomial::constant(-n.dot(&p));
    f.roots_in(0.0, 1.0)
        .into_iter()
        .map(|u| ((curve.eval(u) - p).dot(&d) / d.norm_squared(), u))
        .collect()
}

/// Hits as `(t_line, u_arc)`.
fn line_conic(line: &Segment, arc: &ConicArc) -> Vec<(f64, f64)> {
    let (p, d) = (line.start(), line.end() - line.start());
    let n = Vector2::new(-d.y, d.x);
    let ab = arc.axes().transpose() * n;
    let c = n.dot(&(p - arc.center()));
    let r = ab.x.hypot(ab.y);
    if r == 0.0 || (c / r).abs() > 1.0 + 1e-12 {
        return Vec::new();
    }
    let phi = ab.y.atan2(ab.x);
    let delta = (c / r).clamp(-1.0, 1.0).acos();
    let thetas = if delta < 1e-12 {
        vec![phi]
    } else {
        vec![phi + delta, phi - delta]
    };
    thetas
        .into_iter()
        .filter_map(|th| arc.param_of_angle(th))
        .map(|u| {
            let q = arc.eval(u);
            ((q - p).dot(&d) / d.norm_squared(), u)
        })
        .collect()
}

/// Coordinates in a frame centered on both boxes and scaled to unit size.
fn normalized(a: &Segment, b: &Segment) -> Option<[Polynomial; 4]> {
    let (Segment::Analytic { x: xa, y: ya }, Segment::Analytic { x: xb, y: yb }) = (a, b) else {
        return None;
    };
    let frame = a.bounding_box().union(&b.bounding_box());
    let (c, s) = (frame.center(), frame.diagonal().max(f64::MIN_POSITIVE));
    let norm = |f: &crate::analytic::AnalyticFunction, o: f64| {
        (&f.to_polynomial() + &Polynomial::constant(-o)).scale(1.0 / s)
    };
    Some([norm(xa, c.x), norm(ya, c.y), norm(xb, c.x), norm(yb, c.y)])
}

fn sylvester_det(p: &[f64], q: &[f64]) -> f64 {
    let (m, n) = (p.len() - 1, q.len() - 1);
    let mut s = DMatrix::<f64>::zeros(m + n, m + n);
    for r in 0..n {
        for (k, c) in p.iter().rev().enumerate() {
            s[(r, r + k)] = *c;
        }
    }
    for r in 0..m {
        for (k, c) in q.iter().rev().enumerate() {
            s[(n + r, r + k)] = *c;
        }
    }
    s.determinant()
}

fn resultant(a: &Segment, b: &Segment) -> Result<Vec<(f64, f64)>, GeometryError> {
    let Some([xa, ya, xb, yb]) = normalized(a, b) else {
        return Ok(Vec::new());
    };
    if xa.is_constant() || ya.is_constant() {
        return Ok(axis_aligned(a, b, &xa, &ya, &xb, &yb));
    }
    if xb.is_constant() || yb.is_constant() {
        return Ok(swapped(axis_aligned(b, a, &xb, &yb, &xa, &ya)));
    }
    let (pa, qa) = (xa.trimmed(), ya.trimmed());
    let (m, n) = (pa.degree(), qa.degree());
    let k = n * xb.degree() + m * yb.degree() + 1;
    let nodes: Vec<f64> = (0..k)
        .map(|i| (PI * (i as f64 + 0.5) / k as f64).cos())
        .collect();
    let vals: Vec<f64> = nodes
        .iter()
        .map(|s| {
            let u = 0.5 * (s + 1.0);
            let mut p = pa.coefs().to_vec();
            let mut q = qa.coefs().to_vec();
            p[0] -= xb.eval(u);
            q[0] -= yb.eval(u);
            sylvester_det(&p, &q)
        })
        .collect();
    let scale = vals.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale <= 1e-13 {
        return Err(GeometryError::UnsupportedIntersection { segments: (0, 0) });
    }
    let cheb: Vec<f64> = (0..k)
        .map(|j| {
            let s: f64 = (0..k)
                .map(|i| vals[i] / scale * (PI * j as f64 * (i as f64 + 0.5) / k as f64).cos())
                .sum();
            s * 2.0 / k as f64 * if j == 0 { 0.5 } else { 1.0 }
        })
        .collect();
    let mut t_prev = Polynomial::constant(1.0);
    let mut t_cur = Polynomial::new(vec![0.0, 1.0]);
    let mut r = t_prev.scale(cheb[0]);
    if k > 1 {
        r = &r + &t_cur.scale(cheb[1]);
    }
    let two_s = Polynomial::new(vec![0.0, 2.0]);
    for c in cheb.iter().skip(2) {
        let next = &(&t_cur * &two_s) - &t_prev;
        r = &r + &next.scale(*c);
        t_prev = t_cur;
        t_cur = next;
    }
    let r_u = r.compose_affine(2.0, -1.0);
    let mut out = Vec::new();
    for u in r_u.roots_in(0.0, 1.0) {
        let mut ts = (&pa - &Polynomial::constant(xb.eval(u))).roots_in(0.0, 1.0);
        ts.extend((&qa - &Polynomial::constant(yb.eval(u))).roots_in(0.0, 1.0));
        out.extend(ts.into_iter().filter_map(|t| newton_polish(a, b, t, u)));
    }
    Ok(out)
}

/// `a` has a constant coordinate: solve that coordinate on `b`, then the other on `a`.
fn axis_aligned(
    a: &Segment,
    b: &Segment,
    xa: &Polynomial,
    ya: &Polynomial,
    xb: &Polynomial,
    yb: &Polynomial,
) -> Vec<(f64, f64)> {
    let (fixed, free_a, fixed_b, free_b) = if xa.is_constant() {
        (xa.eval(0.0), ya, xb, yb)
    } else {
        (ya.eval(0.0), xa, yb, xb)
    };
    let mut out = Vec::new();
    for u in (fixed_b - &Polynomial::constant(fixed)).roots_in(0.0, 1.0) {
        for t in (free_a - &Polynomial::constant(free_b.eval(u))).roots_in(0.0, 1.0) {
            out.extend(newton_polish(a, b, t, u));
        }
    }
    out
}

/// 2D Newton on `a(t) - b(u) = 0`; `None` unless it lands on a common point.
fn newton_polish(a: &Segment, b: &Segment, mut t: f64, mut u: f64) -> Option<(f64, f64)> {
    for _ in 0..NEWTON_ITERS {
        let f = a.eval(t) - b.eval(u);
        if f.norm() == 0.0 {
            break;
        }
        let (da, db) = (a.derivative(t, 1), b.derivative(u, 1));
        let det = cross(da, -db);
        if det == 0.0 || !det.is_finite() {
            break;
        }
        let dt = cross(-f, -db) / det;
        let du = cross(da, -f) / det;
        let (nt, nu) = ((t + dt).clamp(0.0, 1.0), (u + du).clamp(0.0, 1.0));
        if (nt - t).abs() + (nu - u).abs() <= 1e-16 {
            break;
        }
        t = nt;
        u = nu;
    }
    ((a.eval(t) - b.eval(u)).norm() <= EPS_POINT).then_some((t, u))
}

fn subdivision(a: &Segment, b: &Segment) -> Vec<(f64, f64)> {
    let leaf = 1e-2 * a.bounding_box().diagonal().max(b.bounding_box().diagonal());
    let mut out = Vec::new();
    subdivide(a, b, (0.0, 1.0), (0.0, 1.0), leaf, 0, &mut out);
    out
}

fn subdivide(
    a: &Segment,
    b: &Segment,
    ta: (f64, f64),
    tb: (f64, f64),
    leaf: f64,
    depth: usize,
    out: &mut Vec<(f64, f64)>,
) {
    let ba = a.restrict(ta.0, ta.1).bounding_box();
    let bb = b.restrict(tb.0, tb.1).bounding_box();
    if !ba.intersects(&bb, EPS_POINT) {
        return;
    }
    let (ma, mb) = (0.5 * (ta.0 + ta.1), 0.5 * (tb.0 + tb.1));
    if depth >= 16 || (ba.diagonal() <= leaf && bb.diagonal() <= leaf) {
        out.extend(newton_polish(a, b, ma, mb));
        return;
    }
    for sa in [(ta.0, ma), (ma, ta.1)] {
        for sb in [(tb.0, mb), (mb, tb.1)] {
            subdivide(a, b, sa, sb, leaf, depth + 1, out);
        }
    }
}

fn snap(s: &Segment, t: f64) -> f64 {
    let p = s.eval(t);
    if t <= EPS_PARAM || (p - s.start()).norm() <= EPS_POINT {
        0.0
    } else if t >= 1.0 - EPS_PARAM || (p - s.end()).norm() <= EPS_POINT {
        1.0
    } else {
        t
    }
}

/// Range filter, end snapping, verification and dedup (first occurrence wins).
fn finish(a: &Segment, b: &Segment, hits: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let range = -1e-9..=1.0 + 1e-9;
    let mut out: Vec<(f64, f64, Vector2<f64>)> = Vec::new();
    for (t, u) in hits {
        if !range.contains(&t) || !range.contains(&u) {
            continue;
        }
        let (t, u) = (snap(a, t.clamp(0.0, 1.0)), snap(b, u.clamp(0.0, 1.0)));
        let p = a.eval(t);
        if (p - b.eval(u)).norm() > EPS_NODE {
            continue;
        }
        if out.iter().any(|(_, _, q)| (q - p).norm() <= EPS_NODE) {
            continue;
        }
        out.push((t, u, p));
    }
    out.sort_by(|x, y| x.0.total_cmp(&y.0));
    out.into_iter().map(|(t, u, _)| (t, u)).collect()
}
