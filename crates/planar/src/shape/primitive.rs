//! Factories for common shapes.
//!
//! All factories return bounded simple shapes (counterclockwise curves), except
//! `polygon`, which keeps the orientation of the given vertex order.

use super::Shape;
use crate::curve::{polar, ConicArc, Segment};
use crate::error::GeometryError;
use crate::jordan::JordanCurve;
use nalgebra::{Matrix2, Vector2};
use std::f64::consts::{FRAC_PI_2, TAU};

fn positive(name: &str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::degenerate(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

/// Closed polygon through `vertices`.
pub fn polygon(vertices: &[Vector2<f64>]) -> Result<Shape, GeometryError> {
    Ok(JordanCurve::from_points(vertices)?.into())
}

/// Right isosceles triangle with legs of length `side` along +x and +y from
/// the right-angle vertex `corner`.
pub fn triangle(side: f64, corner: Vector2<f64>) -> Result<Shape, GeometryError> {
    let s = positive("side", side)?;
    polygon(&[
        corner,
        corner + Vector2::new(s, 0.0),
        corner + Vector2::new(0.0, s),
    ])
}

/// Axis-aligned square.
pub fn square(side: f64, center: Vector2<f64>) -> Result<Shape, GeometryError> {
    let h = 0.5 * positive("side", side)?;
    polygon(&[
        center + Vector2::new(h, h),
        center + Vector2::new(-h, h),
        center + Vector2::new(-h, -h),
        center + Vector2::new(h, -h),
    ])
}

/// Axis-aligned rectangle.
pub fn rectangle(width: f64, height: f64, center: Vector2<f64>) -> Result<Shape, GeometryError> {
    let w = 0.5 * positive("width", width)?;
    let h = 0.5 * positive("height", height)?;
    polygon(&[
        center + Vector2::new(w, h),
        center + Vector2::new(-w, h),
        center + Vector2::new(-w, -h),
        center + Vector2::new(w, -h),
    ])
}

/// Regular polygon inscribed in the circle of `radius`, first vertex on +x.
pub fn regular_polygon(
    nsides: usize,
    radius: f64,
    center: Vector2<f64>,
) -> Result<Shape, GeometryError> {
    if nsides < 3 {
        return Err(GeometryError::degenerate(format!(
            "regular polygon needs at least 3 sides, got {nsides}"
        )));
    }
    let r = positive("radius", radius)?;
    let vertices: Vec<Vector2<f64>> = (0..nsides)
        .map(|k| center + polar(r, TAU * k as f64 / nsides as f64))
        .collect();
    polygon(&vertices)
}

/// Circle made of four quarter arcs meeting at exact cardinal points.
pub fn circle(radius: f64, center: Vector2<f64>) -> Result<Shape, GeometryError> {
    let r = positive("radius", radius)?;
    let cardinal = [
        center + Vector2::new(r, 0.0),
        center + Vector2::new(0.0, r),
        center + Vector2::new(-r, 0.0),
        center + Vector2::new(0.0, -r),
    ];
    let axes = Matrix2::identity() * r;
    let segments = (0..4)
        .map(|k| {
            let theta = k as f64 * FRAC_PI_2;
            Segment::conic(ConicArc::with_points(
                center,
                axes,
                theta,
                theta + FRAC_PI_2,
                cardinal[k],
                cardinal[(k + 1) % 4],
            ))
        })
        .collect();
    Ok(JordanCurve::new(segments)?.into())
}
