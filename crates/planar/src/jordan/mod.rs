//! Closed, simple, piecewise curves.
//!
//! Purpose
//! - `JordanCurve`: cyclic segment list with exact closure and no
//!   self-intersections, validated once at construction.
//! - Orientation comes from the signed area (Green's theorem), cached.
//! - Curve–curve intersection, splitting into sub-arcs and re-joining are the
//!   primitives of the boolean engine; winding/density answer point queries.
//!
//! Parameters
//! - Global parameter `s ∈ [0, n)`: segment `floor(s)`, local `s - floor(s)`.
//!   Split points are carried as `(segment, t)` pairs so that neighbouring
//!   pieces are cut at bit-identical local parameters.

mod intersect;
mod winding;

pub(crate) use intersect::segment_pair;

use crate::cfg::{QuadratureCfg, EPS_ADJACENT, EPS_NODE, EPS_POINT};
use crate::curve::{Affine2, Box2, PiecewiseCurve, Segment};
use crate::error::GeometryError;
use crate::integrate::green;
use nalgebra::Vector2;

/// One crossing or touching point of two curves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub seg_a: usize,
    pub t: f64,
    pub seg_b: usize,
    pub u: f64,
    pub point: Vector2<f64>,
}

impl Intersection {
    #[inline]
    pub fn param_a(&self) -> f64 {
        self.seg_a as f64 + self.t
    }
    #[inline]
    pub fn param_b(&self) -> f64 {
        self.seg_b as f64 + self.u
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JordanCurve {
    segments: Vec<Segment>,
    boxes: Vec<Box2>,
    area: f64,
}

impl JordanCurve {
    /// Validate closure (exact), simplicity and non-zero area.
    pub fn new(segments: Vec<Segment>) -> Result<Self, GeometryError> {
        if segments.is_empty() {
            return Err(GeometryError::malformed("jordan curve without segments"));
        }
        if segments.iter().all(Segment::is_degenerate) {
            return Err(GeometryError::degenerate(
                "jordan curve made only of point segments",
            ));
        }
        let n = segments.len();
        for i in 0..n {
            let j = (i + 1) % n;
            if segments[i].end() != segments[j].start() {
                return Err(GeometryError::malformed(format!(
                    "not closed: segment {i} ends at {:?}, segment {j} starts at {:?}",
                    segments[i].end(),
                    segments[j].start()
                )));
            }
        }
        check_simple(&segments)?;
        let curve = Self::from_segments_unchecked(segments);
        if !(curve.area.abs() > 0.0) {
            return Err(GeometryError::degenerate("jordan curve encloses zero area"));
        }
        Ok(curve)
    }

    /// Closed polygon through `points` (the last point connects back to the first).
    pub fn from_points(points: &[Vector2<f64>]) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::degenerate(format!(
                "polygon needs at least 3 vertices, got {}",
                points.len()
            )));
        }
        let n = points.len();
        Self::new(
            (0..n)
                .map(|i| Segment::linear(points[i], points[(i + 1) % n]))
                .collect(),
        )
    }

    /// Re-join sub-arcs (as produced by [`JordanCurve::split`]) into one curve.
    pub fn from_arcs(arcs: &[PiecewiseCurve]) -> Result<Self, GeometryError> {
        Self::new(
            arcs.iter()
                .flat_map(|a| a.segments().iter().cloned())
                .collect(),
        )
    }

    /// Caller guarantees closure and simplicity (boolean engine output).
    pub(crate) fn from_segments_unchecked(segments: Vec<Segment>) -> Self {
        let boxes = segments.iter().map(Segment::bounding_box).collect();
        let area = green::boundary_integral(&segments, 0, 0, &QuadratureCfg::default());
        Self {
            segments,
            boxes,
            area,
        }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Signed enclosed area: positive for counterclockwise curves.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// +1 counterclockwise, -1 clockwise.
    #[inline]
    pub fn orientation(&self) -> i8 {
        if self.area > 0.0 {
            1
        } else {
            -1
        }
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.area > 0.0
    }

    /// Segment start points, in order.
    pub fn vertices(&self) -> Vec<Vector2<f64>> {
        self.segments.iter().map(Segment::start).collect()
    }

    pub fn bounding_box(&self) -> Box2 {
        self.boxes
            .iter()
            .copied()
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| Box2::from_point(Vector2::zeros()))
    }

    pub(crate) fn boxes(&self) -> &[Box2] {
        &self.boxes
    }

    fn local(&self, s: f64) -> (usize, f64) {
        let n = self.len();
        let s = s.rem_euclid(n as f64);
        let i = (s.floor() as usize).min(n - 1);
        (i, s - i as f64)
    }

    /// Point at global parameter `s` (taken mod n).
    pub fn eval(&self, s: f64) -> Vector2<f64> {
        let (i, t) = self.local(s);
        self.segments[i].eval(t)
    }

    /// Same point set traversed the other way; flips the area sign.
    pub fn invert(&self) -> JordanCurve {
        let segments: Vec<Segment> = self.segments.iter().rev().map(Segment::reverse).collect();
        let boxes = self.boxes.iter().rev().copied().collect();
        JordanCurve {
            segments,
            boxes,
            area: -self.area,
        }
    }

    /// Image under `f`. Orientation-reversing maps are followed by `invert` so
    /// the enclosed side stays enclosed.
    pub fn transform(&self, f: &Affine2) -> JordanCurve {
        let segments: Vec<Segment> = self.segments.iter().map(|s| s.transform(f)).collect();
        let boxes = segments.iter().map(Segment::bounding_box).collect();
        let mapped = JordanCurve {
            segments,
            boxes,
            area: self.area * f.det().abs(),
        };
        if f.is_orientation_preserving() {
            mapped
        } else {
            JordanCurve {
                area: -mapped.area,
                ..mapped
            }
            .invert()
        }
    }

    pub fn move_by(&self, dx: f64, dy: f64) -> JordanCurve {
        self.transform(&Affine2::translation(dx, dy))
    }

    /// Rotation about the origin by `angle` radians.
    pub fn rotate(&self, angle: f64) -> JordanCurve {
        self.transform(&Affine2::rotation(angle))
    }

    pub fn scale(&self, sx: f64, sy: f64) -> JordanCurve {
        self.transform(&Affine2::scaling(sx, sy))
    }

    /// All points shared with `other`, one record per point.
    ///
    /// Records landing on a segment end are reported at the start of the next
    /// segment, so a crossing at a shared vertex appears once.
    pub fn intersect(&self, other: &JordanCurve) -> Result<Vec<Intersection>, GeometryError> {
        let mut out: Vec<Intersection> = Vec::new();
        if !self.bounding_box().intersects(&other.bounding_box(), EPS_NODE) {
            return Ok(out);
        }
        let (n, m) = (self.len(), other.len());
        for (i, a) in self.segments.iter().enumerate() {
            for (j, b) in other.segments.iter().enumerate() {
                if !self.boxes[i].intersects(&other.boxes[j], EPS_NODE) {
                    continue;
                }
                let hits = segment_pair(a, b).map_err(|_| {
                    GeometryError::UnsupportedIntersection { segments: (i, j) }
                })?;
                for (t, u) in hits {
                    let point = a.eval(t);
                    let (seg_a, t) = if t == 1.0 { ((i + 1) % n, 0.0) } else { (i, t) };
                    let (seg_b, u) = if u == 1.0 { ((j + 1) % m, 0.0) } else { (j, u) };
                    if out.iter().any(|r| (r.point - point).norm() <= EPS_NODE) {
                        continue;
                    }
                    out.push(Intersection {
                        seg_a,
                        t,
                        seg_b,
                        u,
                        point,
                    });
                }
            }
        }
        out.sort_by(|x, y| x.param_a().total_cmp(&y.param_a()));
        tracing::trace!(count = out.len(), "curve intersections");
        Ok(out)
    }

    /// Sub-arcs between consecutive global parameters (cyclic). No parameters
    /// yields the whole curve as one piece; one parameter yields the whole curve
    /// starting there.
    pub fn split(&self, params: &[f64]) -> Vec<PiecewiseCurve> {
        let locals: Vec<(usize, f64)> = params.iter().map(|s| self.local(*s)).collect();
        self.split_local(&locals)
    }

    pub(crate) fn split_local(&self, params: &[(usize, f64)]) -> Vec<PiecewiseCurve> {
        let mut ps = params.to_vec();
        ps.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        ps.dedup();
        if ps.is_empty() {
            return vec![PiecewiseCurve::from_segments_unchecked(self.segments.clone())];
        }
        let k = ps.len();
        (0..k)
            .map(|i| {
                let (from, to) = (ps[i], ps[(i + 1) % k]);
                PiecewiseCurve::from_segments_unchecked(self.sub_curve(from, to))
            })
            .collect()
    }

    /// Segments from `from` to `to`, wrapping once around when `to <= from`.
    fn sub_curve(&self, from: (usize, f64), to: (usize, f64)) -> Vec<Segment> {
        let n = self.len();
        let wraps = to.0 < from.0 || (to.0 == from.0 && to.1 <= from.1);
        let last = if wraps { to.0 + n } else { to.0 };
        let mut out = Vec::new();
        for k in from.0..=last {
            let lo = if k == from.0 { from.1 } else { 0.0 };
            let hi = if k == last { to.1 } else { 1.0 };
            if hi > lo {
                out.push(self.segments[k % n].restrict(lo, hi));
            }
        }
        out
    }

    /// Same point set and orientation, regardless of segmentation or start point.
    pub fn same_as(&self, other: &JordanCurve) -> bool {
        if self.orientation() != other.orientation()
            || (self.area - other.area).abs() > 1e-9 * self.area.abs().max(1.0)
        {
            return false;
        }
        let on = |c: &JordanCurve, p: Vector2<f64>| c.locate(p).is_some();
        let samples = |c: &JordanCurve| {
            c.segments
                .iter()
                .flat_map(|s| [s.start(), s.eval(0.5)])
                .collect::<Vec<_>>()
        };
        samples(self).into_iter().all(|p| on(other, p))
            && samples(other).into_iter().all(|p| on(self, p))
    }

    /// `(segment, t)` of a curve point within `EPS_POINT` of `p`, if any.
    pub fn locate(&self, p: Vector2<f64>) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64, f64)> = None;
        for (i, seg) in self.segments.iter().enumerate() {
            if !self.boxes[i].contains(p, EPS_POINT) {
                continue;
            }
            let (t, d) = seg.project(p);
            if d <= EPS_POINT && best.map_or(true, |b| d < b.2) {
                best = Some((i, t, d));
            }
        }
        best.map(|(i, t, _)| {
            if t == 1.0 {
                ((i + 1) % self.len(), 0.0)
            } else {
                (i, t)
            }
        })
    }
}

/// Non-adjacent segments must not meet; adjacent ones only at their shared end.
/// Point segments are skipped, and adjacency is taken over the remaining ones.
fn check_simple(segments: &[Segment]) -> Result<(), GeometryError> {
    let live: Vec<usize> = (0..segments.len())
        .filter(|i| !segments[*i].is_degenerate())
        .collect();
    let k = live.len();
    let boxes: Vec<Box2> = live.iter().map(|i| segments[*i].bounding_box()).collect();
    for a in 0..k {
        for b in a + 1..k {
            if !boxes[a].intersects(&boxes[b], EPS_POINT) {
                continue;
            }
            let (i, j) = (live[a], live[b]);
            let (si, sj) = (&segments[i], &segments[j]);
            let hits = segment_pair(si, sj).map_err(|_| {
                GeometryError::malformed(format!("segments {i} and {j} overlap"))
            })?;
            let next = b == a + 1;
            let wrap = a == 0 && b == k - 1;
            for (t, _) in hits {
                let p = si.eval(t);
                let shared = (next && (p - si.end()).norm() <= EPS_ADJACENT)
                    || (wrap && (p - si.start()).norm() <= EPS_ADJACENT);
                if !shared {
                    return Err(GeometryError::malformed(format!(
                        "segments {i} and {j} intersect at {p:?}"
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
