//! Open chains of segments, the pieces a Jordan curve is cut into.

use super::{Box2, Segment};
use crate::error::GeometryError;
use nalgebra::Vector2;

/// Chain of segments with `seg[i].end() == seg[i + 1].start()` (exact).
///
/// Global parameter `s ∈ [0, n]`: segment `floor(s)` at local `s - floor(s)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseCurve {
    segments: Vec<Segment>,
}

impl PiecewiseCurve {
    pub fn new(segments: Vec<Segment>) -> Result<Self, GeometryError> {
        if segments.is_empty() {
            return Err(GeometryError::malformed("piecewise curve without segments"));
        }
        for (i, w) in segments.windows(2).enumerate() {
            if w[0].end() != w[1].start() {
                return Err(GeometryError::malformed(format!(
                    "segment {} ends at {:?} but segment {} starts at {:?}",
                    i,
                    w[0].end(),
                    i + 1,
                    w[1].start()
                )));
            }
        }
        Ok(Self { segments })
    }

    pub(crate) fn from_segments_unchecked(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Vector2<f64> {
        self.segments[0].start()
    }

    pub fn end(&self) -> Vector2<f64> {
        self.segments[self.segments.len() - 1].end()
    }

    pub fn is_closed(&self) -> bool {
        self.start() == self.end()
    }

    fn locate(&self, s: f64) -> (usize, f64) {
        let n = self.segments.len();
        let s = s.clamp(0.0, n as f64);
        let i = (s.floor() as usize).min(n - 1);
        (i, s - i as f64)
    }

    pub fn eval(&self, s: f64) -> Vector2<f64> {
        let (i, t) = self.locate(s);
        self.segments[i].eval(t)
    }

    pub fn tangent(&self, s: f64) -> Vector2<f64> {
        let (i, t) = self.locate(s);
        self.segments[i].heading_out(t)
    }

    /// Middle of the middle segment; never a joint between two segments.
    pub fn midpoint(&self) -> Vector2<f64> {
        self.segments[self.segments.len() / 2].eval(0.5)
    }

    pub fn reverse(&self) -> PiecewiseCurve {
        PiecewiseCurve {
            segments: self.segments.iter().rev().map(Segment::reverse).collect(),
        }
    }

    pub fn bounding_box(&self) -> Box2 {
        self.segments
            .iter()
            .map(Segment::bounding_box)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| Box2::from_point(Vector2::zeros()))
    }

    /// Closest global parameter to `p` and its distance.
    pub fn project(&self, p: Vector2<f64>) -> (f64, f64) {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, seg)| {
                let (t, d) = seg.project(p);
                (i as f64 + t, d)
            })
            .fold((0.0, f64::INFINITY), |acc, c| if c.1 < acc.1 { c } else { acc })
    }

    /// Append `other`; its start must equal this chain's end exactly.
    pub fn concat(&self, other: &PiecewiseCurve) -> Result<PiecewiseCurve, GeometryError> {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        PiecewiseCurve::new(segments)
    }
}
