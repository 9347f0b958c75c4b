use super::*;
use nalgebra::vector;
use std::f64::consts::{FRAC_PI_2, PI};

#[test]
fn linear_segment_basics() {
    let s = Segment::linear(vector![0.0, 0.0], vector![2.0, 1.0]);
    assert_eq!(s.start(), vector![0.0, 0.0]);
    assert_eq!(s.end(), vector![2.0, 1.0]);
    assert_eq!(s.degree(), Some(1));
    assert!(s.is_linear());
    assert!(!s.is_degenerate());
    assert_eq!(s.derivative(0.3, 1), vector![2.0, 1.0]);
    assert_eq!(s.derivative(0.3, 2), vector![0.0, 0.0]);
}

#[test]
fn degenerate_point_segment_is_flagged() {
    let p = vector![1.0, 1.0];
    assert!(Segment::linear(p, p).is_degenerate());
    assert!(Segment::bezier(&[p]).is_err());
}

#[test]
fn split_rejoins_exactly() {
    let s = Segment::bezier(&[
        vector![0.0, 0.0],
        vector![1.0, 2.0],
        vector![3.0, -1.0],
        vector![4.0, 0.5],
    ])
    .unwrap();
    let (l, r) = s.split_at(0.3);
    assert_eq!(l.end(), r.start());
    assert_eq!(l.start(), s.start());
    assert_eq!(r.end(), s.end());
    let joined = PiecewiseCurve::new(vec![l.clone(), r.clone()]).unwrap();
    assert!(UCurve(&joined) == UCurve(&PiecewiseCurve::new(vec![s.clone()]).unwrap()));
    assert!(USegment(&s.restrict(0.0, 0.3)) == USegment(&l));
}

#[test]
fn polynomial_segment_splits_via_bernstein_form() {
    let s = Segment::polynomial(vec![0.0, 1.0], vec![0.0, 0.0, 1.0]);
    let (l, r) = s.split_at(0.5);
    assert!((l.end() - vector![0.5, 0.25]).norm() < 1e-15);
    assert_eq!(l.end(), r.start());
    assert!((r.eval(0.5) - s.eval(0.75)).norm() < 1e-14);
}

#[test]
fn reverse_traces_backwards() {
    let s = Segment::polynomial(vec![1.0, 2.0, -1.0], vec![0.0, 1.0]);
    let r = s.reverse();
    for k in 0..=4 {
        let t = k as f64 / 4.0;
        assert!((r.eval(t) - s.eval(1.0 - t)).norm() < 1e-14);
    }
    assert!(USegment(&s) != USegment(&r));
}

#[test]
fn bounding_box_includes_interior_extrema() {
    // Parabola bulging to y = 1 at t = 0.5.
    let s = Segment::bezier(&[vector![0.0, 0.0], vector![1.0, 2.0], vector![2.0, 0.0]]).unwrap();
    let b = s.bounding_box();
    assert!((b.max.y - 1.0).abs() < 1e-12);
    assert_eq!(b.min, vector![0.0, 0.0]);
    assert_eq!(b.max.x, 2.0);
}

#[test]
fn conic_arc_eval_split_and_box() {
    let arc = ConicArc::circular(vector![0.0, 0.0], 2.0, 0.0, PI);
    let s = Segment::conic(arc.clone());
    assert!((s.eval(0.5) - vector![0.0, 2.0]).norm() < 1e-14);
    assert!((s.derivative(0.0, 1) - vector![0.0, 2.0 * PI]).norm() < 1e-12);
    let (l, r) = s.split_at(0.25);
    assert_eq!(l.end(), r.start());
    let b = s.bounding_box();
    assert!((b.max.y - 2.0).abs() < 1e-12);
    assert!((b.min.x + 2.0).abs() < 1e-12);
    assert!(b.min.y.abs() < 1e-12);
    assert_eq!(arc.param_of_angle(FRAC_PI_2), Some(0.5));
    assert_eq!(arc.param_of_angle(-FRAC_PI_2), None);
}

#[test]
fn projection_onto_segments() {
    let line = Segment::linear(vector![0.0, 0.0], vector![4.0, 0.0]);
    let (t, d) = line.project(vector![1.0, 3.0]);
    assert!((t - 0.25).abs() < 1e-15 && (d - 3.0).abs() < 1e-15);
    let arc = Segment::conic(ConicArc::circular(vector![0.0, 0.0], 1.0, 0.0, FRAC_PI_2));
    let (t, d) = arc.project(vector![2.0, 2.0]);
    assert!((t - 0.5).abs() < 1e-12 && (d - (8f64.sqrt() - 1.0)).abs() < 1e-12);
    let curve = Segment::bezier(&[vector![0.0, 0.0], vector![1.0, 2.0], vector![2.0, 0.0]]).unwrap();
    let p = curve.eval(0.37);
    let (t, d) = curve.project(p);
    assert!((t - 0.37).abs() < 1e-9 && d < 1e-12);
}

#[test]
fn affine_transform_of_segments() {
    let f = Affine2::rotation(FRAC_PI_2).then(&Affine2::translation(1.0, 0.0));
    let s = Segment::linear(vector![1.0, 0.0], vector![2.0, 0.0]);
    let g = s.transform(&f);
    assert!((g.start() - vector![1.0, 1.0]).norm() < 1e-15);
    assert!((g.end() - vector![1.0, 2.0]).norm() < 1e-15);
    let arc = Segment::conic(ConicArc::circular(vector![0.0, 0.0], 1.0, 0.0, FRAC_PI_2));
    let h = arc.transform(&Affine2::scaling(2.0, 1.0));
    assert!((h.eval(0.0) - vector![2.0, 0.0]).norm() < 1e-15);
    assert!(f.inverse().is_some());
    assert!(!Affine2::scaling(-1.0, 1.0).is_orientation_preserving());
    let about = Affine2::rotation_about(PI, vector![1.0, 1.0]);
    assert!((about.apply(vector![0.0, 1.0]) - vector![2.0, 1.0]).norm() < 1e-15);
    assert!((about.apply_vector(vector![1.0, 0.0]) - vector![-1.0, 0.0]).norm() < 1e-15);
}

#[test]
fn chains_concatenate_end_to_start() {
    let a = PiecewiseCurve::new(vec![Segment::linear(vector![0.0, 0.0], vector![1.0, 0.0])]).unwrap();
    let b = PiecewiseCurve::new(vec![
        Segment::linear(vector![1.0, 0.0], vector![1.0, 1.0]),
        Segment::linear(vector![1.0, 1.0], vector![0.0, 1.0]),
    ])
    .unwrap();
    let ab = a.concat(&b).unwrap();
    assert_eq!(ab.len(), 3);
    assert_eq!(ab.start(), vector![0.0, 0.0]);
    assert_eq!(ab.end(), vector![0.0, 1.0]);
    assert!(!ab.is_closed());
    assert!(b.concat(&a).is_err());
}

#[test]
fn snapping_end_points() {
    let s = Segment::bezier(&[vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 0.0]]).unwrap();
    let q = s.with_endpoints(vector![0.0, 1e-12], vector![2.0, -1e-12]);
    assert_eq!(q.start(), vector![0.0, 1e-12]);
    assert_eq!(q.end(), vector![2.0, -1e-12]);
}

struct Parabola;

impl ParametricCurve for Parabola {
    fn eval(&self, t: f64) -> nalgebra::Vector2<f64> {
        vector![t, t * t]
    }
    fn derivative(&self, t: f64, order: usize) -> nalgebra::Vector2<f64> {
        match order {
            0 => self.eval(t),
            1 => vector![1.0, 2.0 * t],
            2 => vector![0.0, 2.0],
            _ => vector![0.0, 0.0],
        }
    }
}

#[test]
fn hermite_adapter_reproduces_low_degree_curves() {
    let s = Segment::hermite(&Parabola);
    for k in 0..=5 {
        let t = k as f64 / 5.0;
        assert!((s.eval(t) - Parabola.eval(t)).norm() < 1e-14);
    }
}

#[test]
fn turns_are_normalized() {
    assert_eq!(turns(vector![1.0, 0.0]), 0.0);
    assert_eq!(turns(vector![0.0, 1.0]), 0.25);
    assert_eq!(turns(vector![-1.0, 0.0]), 0.5);
    assert_eq!(turns(vector![0.0, -1.0]), 0.75);
    assert!((polar(2.0, FRAC_PI_2) - vector![0.0, 2.0]).norm() < 1e-15);
}

#[test]
fn turns_lie_on_a_grid_and_halves_are_exact() {
    let grid = 2f64.powi(53);
    for k in 0..97 {
        let th = k as f64 * 0.0731;
        let v = vector![3.0 * th.cos(), 3.0 * th.sin()];
        let a = turns(v);
        assert!((0.0..1.0).contains(&a));
        assert_eq!((a * grid).fract(), 0.0);
        let b = opposite(a);
        assert_eq!((a - b).abs(), 0.5);
        let d = (turns(-v) - b).abs();
        assert!(d.min(1.0 - d) < 1e-15, "{k}: {d}");
    }
}
