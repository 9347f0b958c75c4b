use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn horner_and_de_casteljau_agree_after_conversion() {
    let p = Polynomial::new(vec![1.0, -3.0, 0.5, 2.0]);
    let b = Bezier::from_polynomial(&p, 3);
    for k in 0..=10 {
        let t = k as f64 / 10.0;
        assert!(close(p.eval(t), b.eval(t)), "t={t}");
    }
    assert_eq!(b.to_polynomial(), p);
}

#[test]
fn degree_trims_trailing_zeros_and_zero_has_degree_zero() {
    assert_eq!(Polynomial::new(vec![1.0, 2.0, 0.0, 0.0]).degree(), 1);
    assert_eq!(Polynomial::zero().degree(), 0);
    assert_eq!(AnalyticFunction::polynomial(vec![0.0, 0.0]).degree(), 0);
    // Nominal cubic whose control points lie on a line is really linear.
    let f = AnalyticFunction::bezier(vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(f.degree(), 1);
}

#[test]
fn equality_is_basis_independent() {
    let f = AnalyticFunction::bezier(vec![0.0, 1.0, 2.0]);
    let g = AnalyticFunction::polynomial(vec![0.0, 2.0]);
    assert_eq!(f, g);
    assert_ne!(f, AnalyticFunction::polynomial(vec![0.0, 2.0, 1e-300]));
}

#[test]
fn derivative_in_both_bases() {
    let p = AnalyticFunction::polynomial(vec![1.0, 2.0, 3.0]);
    assert_eq!(p.derivative(), AnalyticFunction::polynomial(vec![2.0, 6.0]));
    let b = AnalyticFunction::bezier(vec![0.0, 2.0, 1.0]);
    // x(t) = 4t(1-t) + t² = 4t - 3t², x' = 4 - 6t
    assert!(close(b.derivative().eval(0.25), 2.5));
    assert!(close(b.eval_derivative(0.5, 2), -6.0));
    assert!(AnalyticFunction::constant(5.0).derivative().is_constant());
}

#[test]
fn arithmetic_matches_pointwise_values() {
    let f = AnalyticFunction::bezier(vec![1.0, -1.0, 2.0]);
    let g = AnalyticFunction::polynomial(vec![0.5, 0.0, 1.0, -1.0]);
    let h = AnalyticFunction::bezier(vec![3.0, 0.0]);
    for k in 0..=8 {
        let t = k as f64 / 8.0;
        let (ft, gt, ht) = (f.eval(t), g.eval(t), h.eval(t));
        assert!(close((&f + &g).eval(t), ft + gt));
        assert!(close((&f - &g).eval(t), ft - gt));
        assert!(close((&f * &g).eval(t), ft * gt));
        assert!(close((&f * &h).eval(t), ft * ht));
        assert!(close((&f * 2.5).eval(t), 2.5 * ft));
        assert!(close((-&f).eval(t), -ft));
        assert!(close(f.powi(3).eval(t), ft.powi(3)));
    }
    // Bezier ⊗ Bezier stays in Bernstein form.
    assert!(matches!(&f * &h, AnalyticFunction::Bezier(_)));
}

#[test]
fn compose_affine_and_restrict() {
    let p = AnalyticFunction::polynomial(vec![0.0, 0.0, 1.0]);
    let q = p.compose_affine(2.0, -1.0);
    assert!(close(q.eval(0.75), 0.25));
    let b = AnalyticFunction::bezier(vec![0.0, 3.0, -1.0, 2.0]);
    let r = b.restrict(0.25, 0.75);
    for k in 0..=4 {
        let s = k as f64 / 4.0;
        assert!(close(r.eval(s), b.eval(0.25 + 0.5 * s)));
    }
}

#[test]
fn split_halves_share_the_split_value_exactly() {
    let b = Bezier::new(vec![0.1, 0.7, -0.3, 0.9]);
    let (l, r) = b.split_at(0.37);
    assert_eq!(l.ctrl()[3], r.ctrl()[0]);
    assert_eq!(l.ctrl()[0], b.ctrl()[0]);
    assert_eq!(r.ctrl()[3], b.ctrl()[3]);
    assert!((l.eval(1.0) - b.eval(0.37)).abs() < 1e-15);
    assert!((r.eval(0.5) - b.eval(0.37 + 0.63 * 0.5)).abs() < 1e-14);
}

#[test]
fn elevation_preserves_values() {
    let b = Bezier::new(vec![1.0, -2.0, 4.0]);
    let e = b.elevate(5);
    assert_eq!(e.order(), 5);
    for k in 0..=5 {
        let t = k as f64 / 5.0;
        assert!(close(b.eval(t), e.eval(t)));
    }
}

#[test]
fn closed_form_integrals() {
    let p = AnalyticFunction::polynomial(vec![1.0, 0.0, 3.0]);
    assert!(close(p.integrate(), 2.0));
    let b = AnalyticFunction::bezier(vec![0.0, 1.0, 0.0]);
    assert!(close(b.integrate(), 1.0 / 3.0));
}

#[test]
fn roots_simple_and_double() {
    // (t-0.2)(t-0.5)(t-0.9)
    let p = &(&Polynomial::new(vec![-0.2, 1.0]) * &Polynomial::new(vec![-0.5, 1.0]))
        * &Polynomial::new(vec![-0.9, 1.0]);
    let r = p.roots_in(0.0, 1.0);
    assert_eq!(r.len(), 3);
    for (x, y) in r.iter().zip([0.2, 0.5, 0.9]) {
        assert!((x - y).abs() < 1e-12);
    }
    // Tangential root: (t-0.5)^2
    let q = Polynomial::new(vec![0.25, -1.0, 1.0]);
    let r = q.roots_in(0.0, 1.0);
    assert_eq!(r.len(), 1);
    assert!((r[0] - 0.5).abs() < 1e-9);
    // Endpoint roots count.
    let e = Polynomial::new(vec![0.0, -1.0, 1.0]);
    let r = e.roots_in(0.0, 1.0);
    assert_eq!(r, vec![0.0, 1.0]);
    // No roots, and the zero polynomial reports none.
    assert!(Polynomial::new(vec![1.0, 0.0, 1.0]).roots_in(0.0, 1.0).is_empty());
    assert!(Polynomial::zero().roots_in(0.0, 1.0).is_empty());
}

#[test]
fn binomials() {
    assert_eq!(binomial(5, 2), 10.0);
    assert_eq!(binomial(6, 0), 1.0);
    assert_eq!(binomial(3, 4), 0.0);
}
