//! Lebesgue density of a region at a point, as a set of directions.
//!
//! Directions are measured in turns on [0, 1). A point strictly inside a region
//! sees every direction (`full`), a point outside sees none, a smooth boundary
//! point sees a half-plane, a corner sees its interior angle. The measure of the
//! set is the density; boolean operators act on the sets pointwise, which is how
//! an unresolved expression is evaluated at a point.

/// Disjoint, sorted, half-open intervals `[lo, hi)` inside [0, 1).
#[derive(Clone, Debug, PartialEq)]
pub struct Density {
    intervals: Vec<(f64, f64)>,
}

impl Density {
    pub fn empty() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    pub fn full() -> Self {
        Self {
            intervals: vec![(0.0, 1.0)],
        }
    }

    /// Directions swept counterclockwise from `start` to `end` (turns in [0, 1)).
    /// Equal ends give the empty set; callers resolve zero-width corners themselves.
    pub fn sector(start: f64, end: f64) -> Self {
        if end > start {
            Self {
                intervals: vec![(start, end)],
            }
        } else if end < start {
            Self::normalized(vec![(0.0, end), (start, 1.0)])
        } else {
            Self::empty()
        }
    }

    fn normalized(mut v: Vec<(f64, f64)>) -> Self {
        v.retain(|(lo, hi)| hi > lo);
        v.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut out: Vec<(f64, f64)> = Vec::with_capacity(v.len());
        for (lo, hi) in v {
            match out.last_mut() {
                Some(last) if lo <= last.1 => last.1 = last.1.max(hi),
                _ => out.push((lo, hi)),
            }
        }
        Self { intervals: out }
    }

    #[inline]
    pub fn intervals(&self) -> &[(f64, f64)] {
        &self.intervals
    }

    /// Fraction of directions covered, in [0, 1].
    pub fn measure(&self) -> f64 {
        self.intervals.iter().map(|(lo, hi)| hi - lo).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.intervals == [(0.0, 1.0)]
    }

    /// Whether direction `turn` (any real, taken mod 1) lies in the set.
    pub fn contains_direction(&self, turn: f64) -> bool {
        let a = turn.rem_euclid(1.0);
        self.intervals.iter().any(|(lo, hi)| *lo <= a && a < *hi)
    }

    pub fn complement(&self) -> Density {
        let mut out = Vec::with_capacity(self.intervals.len() + 1);
        let mut cursor = 0.0;
        for (lo, hi) in &self.intervals {
            out.push((cursor, *lo));
            cursor = *hi;
        }
        out.push((cursor, 1.0));
        Self::normalized(out)
    }

    pub fn intersection(&self, other: &Density) -> Density {
        let mut out = Vec::new();
        for (a0, a1) in &self.intervals {
            for (b0, b1) in &other.intervals {
                out.push((a0.max(*b0), a1.min(*b1)));
            }
        }
        Self::normalized(out)
    }

    pub fn union(&self, other: &Density) -> Density {
        let mut all = self.intervals.clone();
        all.extend_from_slice(&other.intervals);
        Self::normalized(all)
    }
}
