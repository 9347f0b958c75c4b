//! JSON scene files: named primitives plus one boolean expression over them.
//!
//! ```json
//! {
//!   "shapes": {
//!     "disk": { "primitive": { "circle": { "radius": 2.0 } } },
//!     "hole": { "primitive": { "square": { "side": 1.0 } }, "rotate": 0.3 }
//!   },
//!   "expr": { "sub": ["disk", "hole"] }
//! }
//! ```

use anyhow::{bail, Context, Result};
use planar::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Circle {
        radius: f64,
        #[serde(default)]
        center: [f64; 2],
    },
    Square {
        side: f64,
        #[serde(default)]
        center: [f64; 2],
    },
    Rectangle {
        width: f64,
        height: f64,
        #[serde(default)]
        center: [f64; 2],
    },
    Triangle {
        side: f64,
        #[serde(default)]
        corner: [f64; 2],
    },
    RegularPolygon {
        sides: usize,
        radius: f64,
        #[serde(default)]
        center: [f64; 2],
    },
    Polygon {
        vertices: Vec<[f64; 2]>,
    },
}

fn v([x, y]: [f64; 2]) -> Vec2<f64> {
    Vec2::new(x, y)
}

impl Primitive {
    fn build(&self) -> Result<Shape, GeometryError> {
        match self {
            Primitive::Circle { radius, center } => primitive::circle(*radius, v(*center)),
            Primitive::Square { side, center } => primitive::square(*side, v(*center)),
            Primitive::Rectangle {
                width,
                height,
                center,
            } => primitive::rectangle(*width, *height, v(*center)),
            Primitive::Triangle { side, corner } => primitive::triangle(*side, v(*corner)),
            Primitive::RegularPolygon {
                sides,
                radius,
                center,
            } => primitive::regular_polygon(*sides, *radius, v(*center)),
            Primitive::Polygon { vertices } => {
                let pts: Vec<Vec2<f64>> = vertices.iter().copied().map(v).collect();
                primitive::polygon(&pts)
            }
        }
    }
}

/// A primitive placed by scale, then rotation about the origin, then translation.
#[derive(Debug, Deserialize)]
pub struct ShapeDef {
    pub primitive: Primitive,
    #[serde(default)]
    pub scale: Option<[f64; 2]>,
    #[serde(default)]
    pub rotate: Option<f64>,
    #[serde(default)]
    pub translate: Option<[f64; 2]>,
}

impl ShapeDef {
    pub fn build(&self) -> Result<Shape, GeometryError> {
        let mut f = Affine2::identity();
        if let Some([sx, sy]) = self.scale {
            if !(sx * sy).is_normal() {
                return Err(GeometryError::DegenerateInput {
                    reason: format!("scale factors must be nonzero, got [{sx}, {sy}]"),
                });
            }
            f = f.then(&Affine2::scaling(sx, sy));
        }
        if let Some(angle) = self.rotate {
            f = f.then(&Affine2::rotation(angle));
        }
        if let Some([dx, dy]) = self.translate {
            f = f.then(&Affine2::translation(dx, dy));
        }
        Ok(self.primitive.build()?.transform(&f))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    Name(String),
    Op(Box<Op>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Not(Expr),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Sub(Expr, Expr),
    Xor(Expr, Expr),
}

#[derive(Debug, Deserialize)]
pub struct Scene {
    pub shapes: BTreeMap<String, ShapeDef>,
    pub expr: Expr,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds every named shape and resolves the expression.
    pub fn evaluate(&self) -> Result<Shape> {
        let mut built = BTreeMap::new();
        for (name, def) in &self.shapes {
            let shape = def
                .build()
                .with_context(|| format!("building shape {name:?}"))?;
            tracing::debug!(name = name.as_str(), kind = shape.kind(), "built");
            built.insert(name.as_str(), shape);
        }
        let lazy = lower(&self.expr, &built)?;
        Ok(lazy.resolve())
    }
}

fn lower(expr: &Expr, shapes: &BTreeMap<&str, Shape>) -> Result<Lazy> {
    let all = |xs: &[Expr]| -> Result<Vec<Lazy>> { xs.iter().map(|x| lower(x, shapes)).collect() };
    Ok(match expr {
        Expr::Name(name) => match shapes.get(name.as_str()) {
            Some(shape) => Lazy::from(shape),
            None => bail!("unknown shape {name:?} in expression"),
        },
        Expr::Op(op) => match op.as_ref() {
            Op::Not(x) => !lower(x, shapes)?,
            Op::And(xs) => Lazy::And(all(xs)?),
            Op::Or(xs) => Lazy::Or(all(xs)?),
            Op::Sub(a, b) => lower(a, shapes)? - lower(b, shapes)?,
            Op::Xor(a, b) => lower(a, shapes)? ^ lower(b, shapes)?,
        },
    })
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub kind: &'static str,
    pub bounded: bool,
    pub area: f64,
    pub moment_x: f64,
    pub moment_y: f64,
    pub centroid: Option<[f64; 2]>,
    pub members: usize,
    /// Vertex lists of the boundary curves, counterclockwise around the region.
    pub curves: Vec<Vec<[f64; 2]>>,
}

impl Report {
    pub fn of(shape: &Shape) -> Self {
        let members = match shape {
            Shape::Empty | Shape::Whole => 0,
            Shape::Simple(_) => 1,
            Shape::Connected(c) => c.len(),
            Shape::Disjoint(d) => d.len(),
        };
        Self {
            kind: shape.kind(),
            bounded: shape.is_bounded(),
            area: area(shape),
            moment_x: moment(shape, 1, 0),
            moment_y: moment(shape, 0, 1),
            centroid: centroid(shape).map(|c| [c.x, c.y]),
            members,
            curves: shape
                .jordans()
                .iter()
                .map(|j| j.vertices().iter().map(|p| [p.x, p.y]).collect())
                .collect(),
        }
    }
}
