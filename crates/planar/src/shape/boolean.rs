//! Boolean engine: resolve an expression over simple regions into a canonical shape.
//!
//! Model
//! - The input is in negation normal form with simple leaves (see `Lazy::resolve`).
//! - Two leaves whose curves never meet are decided without sampling: each
//!   curve lies entirely inside or entirely outside the other region.
//! - Otherwise every leaf curve is cut at all intersection points, the pieces
//!   become edges of a planar graph, and each edge is kept iff exactly one of
//!   its sides belongs to the result (tested with the expression density at the
//!   edge's middle). Kept edges are oriented with the result on their left and
//!   walked into closed loops.
//!
//! Robustness
//! - Nodes closer than `EPS_NODE` are merged and edge ends are snapped onto them,
//!   so loops close exactly.
//! - Edges with the same end nodes and the same trace (shared boundary) are
//!   kept once.
//! - At a node the walk takes the first outgoing edge clockwise from the
//!   reversed incoming one. Directions are chords over a short parameter step,
//!   which separates edges that leave a node tangentially.

use super::composite::{ConnectedShape, DisjointShape};
use super::{Lazy, Shape, SimpleShape};
use crate::cfg::EPS_NODE;
use crate::curve::{turns, PiecewiseCurve, Segment, UCurve};
use crate::jordan::JordanCurve;
use nalgebra::Vector2;

const DIRECTION_STEP: f64 = 1e-4;

/// Graph edge between two node indices.
struct Edge {
    curve: PiecewiseCurve,
    from: usize,
    to: usize,
}

pub(crate) fn resolve(expr: &Lazy) -> Shape {
    match expr {
        Lazy::Leaf(shape) => return shape.clone(),
        Lazy::And(items) | Lazy::Or(items) if items.len() == 2 => {
            if let (Lazy::Leaf(Shape::Simple(a)), Lazy::Leaf(Shape::Simple(b))) =
                (&items[0], &items[1])
            {
                if let Some(shape) = apart(a, b, matches!(expr, Lazy::And(_))) {
                    tracing::debug!(kind = shape.kind(), "boolean: curves apart");
                    return shape;
                }
            }
        }
        _ => {}
    }
    graph(expr)
}

/// AND / OR of two simple regions whose curves do not meet; `None` if they do.
fn apart(a: &SimpleShape, b: &SimpleShape, and: bool) -> Option<Shape> {
    match a.jordan().intersect(b.jordan()) {
        Ok(hits) if hits.is_empty() => {}
        _ => return None,
    }
    if and {
        Some(and_apart(a, b))
    } else {
        Some(and_apart(&a.invert(), &b.invert()).complement())
    }
}

fn and_apart(a: &SimpleShape, b: &SimpleShape) -> Shape {
    let a_in_b = b.winding(a.jordan().eval(0.0)) == 1.0;
    let b_in_a = a.winding(b.jordan().eval(0.0)) == 1.0;
    match (a_in_b, b_in_a) {
        (true, true) => Shape::Connected(ConnectedShape::from_unchecked(vec![
            a.clone(),
            b.clone(),
        ])),
        (true, false) => Shape::Simple(a.clone()),
        (false, true) => Shape::Simple(b.clone()),
        (false, false) => Shape::Empty,
    }
}

/// Leaf curves up to orientation: a curve and its reverse cut the plane alike.
fn distinct_curves(expr: &Lazy) -> Vec<JordanCurve> {
    let mut out: Vec<JordanCurve> = Vec::new();
    for leaf in expr.leaves() {
        for j in leaf.jordans() {
            if out.iter().any(|c| c == j || c.invert() == *j) {
                continue;
            }
            out.push(j.clone());
        }
    }
    out
}

fn graph(expr: &Lazy) -> Shape {
    let curves = distinct_curves(expr);
    tracing::debug!(curves = curves.len(), "boolean graph: leaf curves");

    let mut cuts: Vec<Vec<(usize, f64)>> = curves.iter().map(|_| vec![(0, 0.0)]).collect();
    let mut crossings = 0usize;
    for i in 0..curves.len() {
        for j in i + 1..curves.len() {
            match curves[i].intersect(&curves[j]) {
                Ok(hits) => {
                    crossings += hits.len();
                    for h in hits {
                        cuts[i].push((h.seg_a, h.t));
                        cuts[j].push((h.seg_b, h.u));
                    }
                }
                Err(err) => {
                    tracing::debug!(%err, i, j, "boolean graph: cutting at every vertex");
                    cuts[i].extend((0..curves[i].len()).map(|k| (k, 0.0)));
                    cuts[j].extend((0..curves[j].len()).map(|k| (k, 0.0)));
                }
            }
        }
    }
    tracing::debug!(crossings, "boolean graph: intersections");

    let pieces: Vec<PiecewiseCurve> = curves
        .iter()
        .zip(&cuts)
        .flat_map(|(c, k)| c.split_local(k))
        .filter(|p| p.segments().iter().any(|s| !s.is_degenerate()))
        .collect();
    let edges = dedup(build_edges(pieces));
    let kept = classify(expr, edges);
    tracing::debug!(kept = kept.len(), "boolean graph: kept edges");

    let loops = walk(&kept);
    tracing::debug!(loops = loops.len(), "boolean graph: loops");
    if loops.is_empty() {
        return if expr.density(far_point(&curves)).is_full() {
            Shape::Whole
        } else {
            Shape::Empty
        };
    }
    shape_from_jordans(loops)
}

fn node_of(nodes: &mut Vec<Vector2<f64>>, p: Vector2<f64>) -> usize {
    if let Some(k) = nodes.iter().position(|q| (q - p).norm() <= EPS_NODE) {
        return k;
    }
    nodes.push(p);
    nodes.len() - 1
}

fn build_edges(pieces: Vec<PiecewiseCurve>) -> Vec<Edge> {
    let mut nodes: Vec<Vector2<f64>> = Vec::new();
    let mut edges = Vec::with_capacity(pieces.len());
    for curve in pieces {
        let from = node_of(&mut nodes, curve.start());
        let to = node_of(&mut nodes, curve.end());
        edges.push(Edge {
            curve: snapped(curve, nodes[from], nodes[to]),
            from,
            to,
        });
    }
    edges
}

fn snapped(curve: PiecewiseCurve, p: Vector2<f64>, q: Vector2<f64>) -> PiecewiseCurve {
    let mut segments = curve.into_segments();
    if let Some(first) = segments.first_mut() {
        if first.start() != p {
            *first = first.with_endpoints(p, first.end());
        }
    }
    if let Some(last) = segments.last_mut() {
        if last.end() != q {
            *last = last.with_endpoints(last.start(), q);
        }
    }
    PiecewiseCurve::from_segments_unchecked(segments)
}

fn dedup(edges: Vec<Edge>) -> Vec<Edge> {
    let mut out: Vec<Edge> = Vec::with_capacity(edges.len());
    for e in edges {
        let duplicate = out.iter().any(|f| {
            let same_nodes =
                (f.from == e.from && f.to == e.to) || (f.from == e.to && f.to == e.from);
            same_nodes
                && (UCurve(&f.curve) == UCurve(&e.curve)
                    || UCurve(&f.curve) == UCurve(&e.curve.reverse()))
        });
        if !duplicate {
            out.push(e);
        }
    }
    out
}

/// A point strictly inside the edge and the travel direction there.
fn probe(curve: &PiecewiseCurve) -> (Vector2<f64>, Vector2<f64>) {
    let segs = curve.segments();
    let n = segs.len();
    let k = (n / 2..n)
        .chain(0..n / 2)
        .find(|&i| !segs[i].is_degenerate())
        .unwrap_or(0);
    (segs[k].eval(0.5), segs[k].heading_out(0.5))
}

fn classify(expr: &Lazy, edges: Vec<Edge>) -> Vec<Edge> {
    edges
        .into_iter()
        .filter_map(|e| {
            let (m, v) = probe(&e.curve);
            let tau = turns(v);
            let d = expr.density(m);
            let left = d.contains_direction((tau + 0.25).rem_euclid(1.0));
            let right = d.contains_direction((tau + 0.75).rem_euclid(1.0));
            match (left, right) {
                (true, false) => Some(e),
                (false, true) => Some(Edge {
                    curve: e.curve.reverse(),
                    from: e.to,
                    to: e.from,
                }),
                _ => None,
            }
        })
        .collect()
}

/// Chord direction leaving the start of `curve`.
fn leaving(curve: &PiecewiseCurve) -> Vector2<f64> {
    let seg = curve
        .segments()
        .iter()
        .find(|s| !s.is_degenerate())
        .unwrap_or(&curve.segments()[0]);
    seg.eval(DIRECTION_STEP) - seg.start()
}

/// Chord direction from the end of `curve` back along it.
fn arriving_back(curve: &PiecewiseCurve) -> Vector2<f64> {
    let seg = curve
        .segments()
        .iter()
        .rev()
        .find(|s| !s.is_degenerate())
        .unwrap_or(&curve.segments()[0]);
    seg.eval(1.0 - DIRECTION_STEP) - seg.end()
}

/// Clockwise turn from direction `from` to direction `to`, in (0, 1].
fn clockwise(from: f64, to: f64) -> f64 {
    let a = (from - to).rem_euclid(1.0);
    if a == 0.0 {
        1.0
    } else {
        a
    }
}

fn walk(edges: &[Edge]) -> Vec<JordanCurve> {
    let out_dir: Vec<f64> = edges.iter().map(|e| turns(leaving(&e.curve))).collect();
    let back_dir: Vec<f64> = edges
        .iter()
        .map(|e| turns(arriving_back(&e.curve)))
        .collect();
    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();
    for start in 0..edges.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut path = vec![start];
        let mut cur = start;
        let closed = loop {
            let node = edges[cur].to;
            let r = back_dir[cur];
            let next = (0..edges.len())
                .filter(|&k| edges[k].from == node && (!used[k] || k == start))
                .min_by(|&x, &y| clockwise(r, out_dir[x]).total_cmp(&clockwise(r, out_dir[y])));
            match next {
                Some(k) if k == start => break true,
                Some(k) => {
                    used[k] = true;
                    path.push(k);
                    cur = k;
                }
                None => break false,
            }
        };
        if !closed {
            tracing::debug!(edges = path.len(), "boolean graph: dropping open chain");
            continue;
        }
        let segments: Vec<Segment> = path
            .iter()
            .flat_map(|&k| edges[k].curve.segments().iter().cloned())
            .collect();
        let jordan = JordanCurve::from_segments_unchecked(close_chain(segments));
        if jordan.area() != 0.0 {
            loops.push(jordan);
        }
    }
    loops
}

/// Make every joint exact: each segment starts where its predecessor ends.
fn close_chain(mut segments: Vec<Segment>) -> Vec<Segment> {
    let n = segments.len();
    for i in 0..n {
        let j = (i + 1) % n;
        let p = segments[i].end();
        if segments[j].start() != p {
            segments[j] = segments[j].with_endpoints(p, segments[j].end());
        }
    }
    segments
}

fn far_point(curves: &[JordanCurve]) -> Vector2<f64> {
    curves
        .iter()
        .map(JordanCurve::bounding_box)
        .reduce(|a, b| a.union(&b))
        .map_or_else(Vector2::zeros, |b| {
            b.max + Vector2::repeat(b.diagonal() + 1.0)
        })
}

/// Positive `outer` encloses `inner`: decided at the first sample of `inner`
/// that is not on `outer`.
fn encloses(outer: &JordanCurve, inner: &JordanCurve) -> bool {
    inner
        .segments()
        .iter()
        .flat_map(|s| [s.start(), s.eval(0.5)])
        .find(|p| outer.locate(*p).is_none())
        .map_or(false, |p| outer.winding(p) == 1.0)
}

/// Group closed loops into components: each clockwise loop becomes a hole of
/// the smallest counterclockwise loop around it; clockwise loops around which
/// there is none bound the unbounded component together.
pub(crate) fn shape_from_jordans(loops: Vec<JordanCurve>) -> Shape {
    let (outers, inners): (Vec<JordanCurve>, Vec<JordanCurve>) =
        loops.into_iter().partition(JordanCurve::is_positive);
    let mut holes: Vec<Vec<JordanCurve>> = vec![Vec::new(); outers.len()];
    let mut free: Vec<JordanCurve> = Vec::new();
    for h in inners {
        let host = outers
            .iter()
            .enumerate()
            .filter(|(_, p)| encloses(p, &h))
            .min_by(|a, b| a.1.area().total_cmp(&b.1.area()))
            .map(|(i, _)| i);
        match host {
            Some(i) => holes[i].push(h),
            None => free.push(h),
        }
    }
    let mut components: Vec<Shape> = outers
        .into_iter()
        .zip(holes)
        .map(|(p, hs)| component(Some(p), hs))
        .collect();
    if !free.is_empty() {
        components.push(component(None, free));
    }
    if components.len() > 1 {
        Shape::Disjoint(DisjointShape::from_unchecked(components))
    } else {
        components.pop().unwrap_or(Shape::Empty)
    }
}

fn component(outer: Option<JordanCurve>, holes: Vec<JordanCurve>) -> Shape {
    let mut members: Vec<SimpleShape> = outer
        .into_iter()
        .chain(holes)
        .map(SimpleShape::new)
        .collect();
    if members.len() > 1 {
        Shape::Connected(ConnectedShape::from_unchecked(members))
    } else {
        members
            .pop()
            .map_or(Shape::Empty, Shape::Simple)
    }
}
