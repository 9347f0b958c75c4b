use super::*;
use crate::curve::ConicArc;
use nalgebra::{vector, Matrix2};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

fn square(lo: f64, hi: f64) -> JordanCurve {
    JordanCurve::from_points(&[
        vector![lo, lo],
        vector![hi, lo],
        vector![hi, hi],
        vector![lo, hi],
    ])
    .unwrap()
}

fn unit_circle() -> JordanCurve {
    let pts = [
        vector![1.0, 0.0],
        vector![0.0, 1.0],
        vector![-1.0, 0.0],
        vector![0.0, -1.0],
    ];
    let segments = (0..4)
        .map(|k| {
            let th = k as f64 * FRAC_PI_2;
            Segment::conic(ConicArc::with_points(
                Vector2::zeros(),
                Matrix2::identity(),
                th,
                th + FRAC_PI_2,
                pts[k],
                pts[(k + 1) % 4],
            ))
        })
        .collect();
    JordanCurve::new(segments).unwrap()
}

#[test]
fn square_area_and_orientation() {
    let sq = square(0.0, 2.0);
    assert_eq!(sq.len(), 4);
    assert!((sq.area() - 4.0).abs() < 1e-12);
    assert_eq!(sq.orientation(), 1);
    assert!(sq.is_positive());
    let bb = sq.bounding_box();
    assert_eq!(bb.min, vector![0.0, 0.0]);
    assert_eq!(bb.max, vector![2.0, 2.0]);
}

#[test]
fn construction_rejects_bad_input() {
    assert!(matches!(
        JordanCurve::new(Vec::new()),
        Err(GeometryError::MalformedCurve { .. })
    ));

    let p = vector![1.0, 1.0];
    assert!(matches!(
        JordanCurve::new(vec![Segment::linear(p, p)]),
        Err(GeometryError::DegenerateInput { .. })
    ));

    let open = vec![
        Segment::linear(vector![0.0, 0.0], vector![1.0, 0.0]),
        Segment::linear(vector![1.0, 0.0], vector![1.0, 1.0]),
    ];
    assert!(matches!(
        JordanCurve::new(open),
        Err(GeometryError::MalformedCurve { .. })
    ));

    let bowtie = JordanCurve::from_points(&[
        vector![0.0, 0.0],
        vector![2.0, 2.0],
        vector![2.0, 0.0],
        vector![0.0, 2.0],
    ]);
    assert!(matches!(bowtie, Err(GeometryError::MalformedCurve { .. })));

    let (a, b) = (vector![0.0, 0.0], vector![1.0, 0.0]);
    let flat = JordanCurve::new(vec![Segment::linear(a, b), Segment::linear(b, a)]);
    assert!(matches!(flat, Err(GeometryError::DegenerateInput { .. })));

    assert!(JordanCurve::from_points(&[a, b]).is_err());
}

#[test]
fn point_segments_are_tolerated() {
    let (a, b, c) = (vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]);
    let j = JordanCurve::new(vec![
        Segment::linear(a, b),
        Segment::linear(b, b),
        Segment::linear(b, c),
        Segment::linear(c, a),
    ])
    .unwrap();
    assert!((j.area() - 0.5).abs() < 1e-12);
    assert!((j.winding(b) - 0.125).abs() < 1e-12);
}

#[test]
fn invert_flips_orientation() {
    let sq = square(0.0, 2.0);
    let inv = sq.invert();
    assert_eq!(inv.orientation(), -1);
    assert!((inv.area() + 4.0).abs() < 1e-12);
    assert!(!inv.same_as(&sq));
    assert!(inv.invert().same_as(&sq));
}

#[test]
fn transforms_keep_enclosed_side() {
    let sq = square(0.0, 2.0);
    let moved = sq.move_by(1.0, 1.0);
    assert_eq!(moved.bounding_box().min, vector![1.0, 1.0]);
    assert!((moved.area() - 4.0).abs() < 1e-12);

    let mirrored = sq.scale(-1.0, 1.0);
    assert!(mirrored.is_positive());
    assert!((mirrored.area() - 4.0).abs() < 1e-12);
    assert_eq!(mirrored.winding(vector![-1.0, 1.0]), 1.0);

    let stretched = sq.scale(2.0, 0.5);
    assert!((stretched.area() - 4.0).abs() < 1e-12);

    let turned = sq.rotate(FRAC_PI_4);
    assert!((turned.area() - 4.0).abs() < 1e-9);
}

#[test]
fn crossing_squares_meet_twice() {
    let a = square(0.0, 2.0);
    let b = square(1.0, 3.0);
    let hits = a.intersect(&b).unwrap();
    assert_eq!(hits.len(), 2);
    assert!((hits[0].point - vector![2.0, 1.0]).norm() < 1e-12);
    assert!((hits[1].point - vector![1.0, 2.0]).norm() < 1e-12);
    assert_eq!(hits[0].seg_a, 1);
    assert!((hits[0].param_a() - 1.5).abs() < 1e-12);
    assert!((hits[1].param_b() - 3.5).abs() < 1e-12);
    for h in &hits {
        assert!((a.eval(h.param_a()) - b.eval(h.param_b())).norm() < 1e-9);
    }
}

#[test]
fn far_apart_curves_do_not_meet() {
    let a = square(0.0, 1.0);
    let b = square(5.0, 6.0);
    assert!(a.intersect(&b).unwrap().is_empty());
}

#[test]
fn shared_edge_reports_its_ends() {
    let a = square(0.0, 2.0);
    let b = JordanCurve::from_points(&[
        vector![2.0, 0.0],
        vector![4.0, 0.0],
        vector![4.0, 2.0],
        vector![2.0, 2.0],
    ])
    .unwrap();
    let hits = a.intersect(&b).unwrap();
    assert_eq!(hits.len(), 2);
    let mut pts: Vec<_> = hits.iter().map(|h| h.point).collect();
    pts.sort_by(|p, q| p.y.total_cmp(&q.y));
    assert_eq!(pts, vec![vector![2.0, 0.0], vector![2.0, 2.0]]);
}

#[test]
fn line_crosses_circle() {
    let c = unit_circle();
    let r = JordanCurve::from_points(&[
        vector![0.5, -2.0],
        vector![2.0, -2.0],
        vector![2.0, 2.0],
        vector![0.5, 2.0],
    ])
    .unwrap();
    let hits = c.intersect(&r).unwrap();
    assert_eq!(hits.len(), 2);
    for h in hits {
        assert!((h.point.x - 0.5).abs() < 1e-9);
        assert!((h.point.norm() - 1.0).abs() < 1e-9);
        assert_eq!(h.seg_b, 3);
    }
}

#[test]
fn circle_area_and_winding() {
    let c = unit_circle();
    assert!((c.area() - PI).abs() < 1e-10);
    assert_eq!(c.winding_number(vector![0.0, 0.0]), 1.0);
    assert_eq!(c.winding_number(vector![0.9, 0.3]), 1.0);
    assert_eq!(c.winding_number(vector![1.1, 0.0]), 0.0);
    let on = vector![FRAC_PI_4.cos(), FRAC_PI_4.sin()];
    assert_eq!(c.winding(on), 0.5);
    assert!((c.winding(vector![1.0, 0.0]) - 0.5).abs() < 1e-9);
}

#[test]
fn square_density_values() {
    let sq = square(0.0, 2.0);
    assert_eq!(sq.winding(vector![1.0, 1.0]), 1.0);
    assert_eq!(sq.winding(vector![3.0, 1.0]), 0.0);
    assert_eq!(sq.winding(vector![1.0, 0.0]), 0.5);
    assert_eq!(sq.winding(vector![0.0, 0.0]), 0.25);
    assert_eq!(sq.winding(vector![2.0, 2.0]), 0.25);

    let d = sq.density(vector![0.0, 0.0]);
    assert_eq!(d.intervals(), &[(0.0, 0.25)]);
    assert!(d.contains_direction(0.125));
    assert!(!d.contains_direction(0.5));

    let inv = sq.invert();
    assert_eq!(inv.winding(vector![1.0, 1.0]), 0.0);
    assert_eq!(inv.winding(vector![3.0, 1.0]), 1.0);
    assert_eq!(inv.winding(vector![1.0, 0.0]), 0.5);
    assert_eq!(inv.winding(vector![0.0, 0.0]), 0.75);
    assert_eq!(inv.winding_number(vector![1.0, 1.0]), -1.0);
}

#[test]
fn split_and_rejoin() {
    let sq = square(0.0, 2.0);
    let whole = sq.split(&[]);
    assert_eq!(whole.len(), 1);
    assert_eq!(whole[0].len(), 4);

    let one = sq.split(&[1.5]);
    assert_eq!(one.len(), 1);
    assert!(one[0].is_closed());
    assert_eq!(one[0].start(), vector![2.0, 1.0]);

    let pieces = sq.split(&[0.5, 2.5]);
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].start(), vector![1.0, 0.0]);
    assert_eq!(pieces[0].end(), vector![1.0, 2.0]);
    assert_eq!(pieces[1].end(), pieces[0].start());
    let back = JordanCurve::from_arcs(&pieces).unwrap();
    assert!(back.same_as(&sq));
    assert_eq!(back.len(), 6);
}

#[test]
fn locate_normalizes_segment_ends() {
    let sq = square(0.0, 2.0);
    assert_eq!(sq.locate(vector![2.0, 0.0]), Some((1, 0.0)));
    assert_eq!(sq.locate(vector![1.0, 0.0]), Some((0, 0.5)));
    assert_eq!(sq.locate(vector![1.0, 1.0]), None);
}

/// Closed quadratic Bezier lens through (±1, 0) bulging by 1/2; `upright`
/// turns it a quarter turn.
fn bezier_lens(upright: bool) -> JordanCurve {
    let r = |x: f64, y: f64| if upright { vector![-y, x] } else { vector![x, y] };
    JordanCurve::new(vec![
        Segment::bezier(&[r(-1.0, 0.0), r(0.0, -1.0), r(1.0, 0.0)]).unwrap(),
        Segment::bezier(&[r(1.0, 0.0), r(0.0, 1.0), r(-1.0, 0.0)]).unwrap(),
    ])
    .unwrap()
}

/// Unit circle from 16 quadratic Beziers meeting with G1 continuity.
fn bezier_circle() -> JordanCurve {
    let n = 16;
    let step = 2.0 * PI / n as f64;
    let pts: Vec<Vector2<f64>> = (0..n)
        .map(|k| {
            let th = k as f64 * step;
            vector![th.cos(), th.sin()]
        })
        .collect();
    let segments = (0..n)
        .map(|k| {
            let mid = (k as f64 + 0.5) * step;
            let ctrl = vector![mid.cos(), mid.sin()] / (0.5 * step).cos();
            Segment::bezier(&[pts[k], ctrl, pts[(k + 1) % n]]).unwrap()
        })
        .collect();
    JordanCurve::new(segments).unwrap()
}

#[test]
fn bezier_joints_are_smooth() {
    let c = bezier_circle();
    assert_eq!(c.len(), 16);
    for seg in c.segments() {
        let p = seg.start();
        assert_eq!(c.winding(p), 0.5, "{p}");
        assert_eq!(c.density(p).measure(), 0.5, "{p}");
    }
    assert_eq!(c.winding(vector![0.0, 0.0]), 1.0);
    assert_eq!(c.winding(vector![1.5, 0.0]), 0.0);
    // true corners keep their angle
    assert_eq!(square(0.0, 1.0).winding(vector![1.0, 1.0]), 0.25);
}

#[test]
fn crossing_bezier_lenses() {
    let a = bezier_lens(false);
    let b = bezier_lens(true);
    let hits = a.intersect(&b).unwrap();
    assert_eq!(hits.len(), 4);
    let s = 2f64.sqrt() - 1.0;
    for h in &hits {
        assert!((h.point.x.abs() - s).abs() < 1e-9, "{}", h.point);
        assert!((h.point.y.abs() - s).abs() < 1e-9, "{}", h.point);
        assert!((a.eval(h.param_a()) - b.eval(h.param_b())).norm() < 1e-9);
    }
    assert!((a.area() - 4.0 / 3.0).abs() < 1e-12);
}

#[test]
fn bezier_lens_meets_circle() {
    let lens = bezier_lens(false);
    let c = unit_circle().scale(0.8, 0.8);
    let hits = lens.intersect(&c).unwrap();
    assert_eq!(hits.len(), 4);
    for h in &hits {
        assert!((h.point.norm() - 0.8).abs() < 1e-9, "{}", h.point);
        assert!((h.point.y.abs() - 0.2).abs() < 1e-9, "{}", h.point);
        assert!((h.point.x.abs() - 0.6f64.sqrt()).abs() < 1e-9, "{}", h.point);
    }
}

#[test]
fn segment_with_constant_coordinate_meets_curve() {
    // x = 1/2, y = t² + t - 1 runs up from -1 to 1 at varying speed.
    let upright = Segment::polynomial(vec![0.5], vec![-1.0, 1.0, 1.0]);
    let arch = Segment::bezier(&[vector![0.0, 0.0], vector![0.5, 1.0], vector![1.0, 0.0]]).unwrap();
    assert!(!upright.is_linear());
    let t = 0.5 * (7f64.sqrt() - 1.0);
    for (hits, flip) in [
        (segment_pair(&upright, &arch).unwrap(), false),
        (segment_pair(&arch, &upright).unwrap(), true),
    ] {
        assert_eq!(hits.len(), 1);
        let (ta, tb) = if flip { (hits[0].1, hits[0].0) } else { hits[0] };
        assert!((ta - t).abs() < 1e-9, "{ta}");
        assert!((tb - 0.5).abs() < 1e-9, "{tb}");
        assert!((upright.eval(ta) - vector![0.5, 0.5]).norm() < 1e-9);
    }
}
