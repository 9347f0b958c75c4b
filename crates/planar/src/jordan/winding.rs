//! Point queries: winding number off the curve, angular density on it.

use super::JordanCurve;
use crate::cfg::{EPS_ANGLE, MAX_SUBDIVISION};
use crate::curve::{opposite, turns, Segment};
use crate::parallelogram_area as cross;
use crate::shape::Density;
use nalgebra::Vector2;
use std::f64::consts::TAU;

/// Angle swept by `seg` over [t0, t1] as seen from `p` (p not on the piece).
///
/// Once `p` is outside the piece's box, the piece stays in a convex set that
/// misses `p`, so the swept angle is the chord angle.
fn swept(seg: &Segment, p: Vector2<f64>, t0: f64, t1: f64, depth: usize) -> f64 {
    let (a, b) = (seg.eval(t0) - p, seg.eval(t1) - p);
    let chord = cross(a, b).atan2(a.dot(&b));
    if seg.is_linear() || depth >= MAX_SUBDIVISION {
        return chord;
    }
    if !seg.restrict(t0, t1).bounding_box().contains(p, 0.0) {
        return chord;
    }
    let m = 0.5 * (t0 + t1);
    swept(seg, p, t0, m, depth + 1) + swept(seg, p, m, t1, depth + 1)
}

impl JordanCurve {
    /// Signed number of turns around an off-curve point: ±1 or 0.
    pub fn winding_number(&self, p: Vector2<f64>) -> f64 {
        let total: f64 = self
            .segments()
            .iter()
            .zip(self.boxes())
            .filter(|(s, _)| !s.is_degenerate())
            .map(|(s, b)| {
                if b.contains(p, 0.0) {
                    swept(s, p, 0.0, 1.0, 0)
                } else {
                    let (a, c) = (s.start() - p, s.end() - p);
                    cross(a, c).atan2(a.dot(&c))
                }
            })
            .sum();
        (total / TAU).round()
    }

    /// Off-curve membership in the region this curve bounds (left side).
    fn encloses(&self, p: Vector2<f64>) -> bool {
        let w = self.winding_number(p);
        if self.is_positive() {
            w >= 1.0
        } else {
            w > -1.0
        }
    }

    fn live_neighbour(&self, i: usize, step: isize) -> &Segment {
        let n = self.len() as isize;
        let mut k = i as isize;
        for _ in 0..n {
            k = (k + step).rem_euclid(n);
            if !self.segments()[k as usize].is_degenerate() {
                break;
            }
        }
        &self.segments()[k as usize]
    }

    /// Incoming and outgoing travel directions at `(i, t)`.
    fn headings(&self, i: usize, t: f64) -> (Vector2<f64>, Vector2<f64>) {
        let seg = &self.segments()[i];
        if seg.is_degenerate() {
            (self.live_neighbour(i, -1).heading_in(1.0), self.live_neighbour(i, 1).heading_out(0.0))
        } else if t == 0.0 {
            (self.live_neighbour(i, -1).heading_in(1.0), seg.heading_out(0.0))
        } else {
            (seg.heading_in(t), seg.heading_out(t))
        }
    }

    /// Travel continues in the same direction through `(i, t)`: inside a
    /// segment, or at a joint whose unit tangents agree up to `EPS_ANGLE`.
    fn is_smooth(v_in: Vector2<f64>, v_out: Vector2<f64>) -> bool {
        let (a, b) = (v_in.normalize(), v_out.normalize());
        cross(b, a).abs() <= EPS_ANGLE && a.dot(&b) > 0.0
    }

    /// Zero-width corner: look just past the tip along the incoming direction.
    fn cusp_is_inside(&self, p: Vector2<f64>, incoming: Vector2<f64>) -> bool {
        let step = 1e-6 * self.bounding_box().diagonal().max(1.0);
        self.encloses(p + incoming.normalize() * step)
    }

    /// Directions at `p` that point into the region bounded by this curve.
    ///
    /// On the curve the set is the sector from the outgoing direction
    /// counterclockwise to the reversed incoming direction.
    pub fn density(&self, p: Vector2<f64>) -> Density {
        let Some((i, t)) = self.locate(p) else {
            return if self.encloses(p) {
                Density::full()
            } else {
                Density::empty()
            };
        };
        let (v_in, v_out) = self.headings(i, t);
        let a_out = turns(v_out);
        let a_back = if Self::is_smooth(v_in, v_out) {
            opposite(a_out)
        } else {
            turns(-v_in)
        };
        if a_back == a_out {
            return if self.cusp_is_inside(p, v_in) {
                Density::full()
            } else {
                Density::empty()
            };
        }
        Density::sector(a_out, a_back)
    }

    /// Density as a number: 1 inside, 0 outside, the interior angle fraction on
    /// the curve (exactly 0.5 at smooth points).
    pub fn winding(&self, p: Vector2<f64>) -> f64 {
        let Some((i, t)) = self.locate(p) else {
            return if self.encloses(p) { 1.0 } else { 0.0 };
        };
        let (v_in, v_out) = self.headings(i, t);
        if Self::is_smooth(v_in, v_out) {
            return 0.5;
        }
        let w = (turns(-v_in) - turns(v_out)).rem_euclid(1.0);
        if w == 0.0 {
            return if self.cusp_is_inside(p, v_in) { 1.0 } else { 0.0 };
        }
        w
    }
}
