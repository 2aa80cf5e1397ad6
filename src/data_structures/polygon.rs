//! Convex polygon overlap via the separating axis theorem.
//!
//! Models bake their transformed outline into a [`Polygon`] so callers can do
//! cheap 2D hit tests without touching the GPU.

use cgmath::{InnerSpace, Matrix4, Vector2, Vector3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub points: Vec<Vector2<f32>>,
}

/// The extent of a polygon projected onto an axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub min: f32,
    pub max: f32,
}

impl Projection {
    pub fn length(&self) -> f32 {
        self.max - self.min
    }

    /// Strict overlap; projections that merely touch do not overlap.
    pub fn overlaps(&self, other: &Projection) -> bool {
        self.min < other.max && other.min < self.max
    }
}

impl Polygon {
    pub fn new(points: Vec<Vector2<f32>>) -> Self {
        Self { points }
    }

    /// XY outline of `positions` after transforming them by `matrix`.
    pub fn from_transformed(positions: &[Vector3<f32>], matrix: &Matrix4<f32>) -> Self {
        let points = positions
            .iter()
            .map(|p| {
                let p = *matrix * p.extend(1.0);
                Vector2::new(p.x, p.y)
            })
            .collect();
        Self { points }
    }

    pub fn push(&mut self, point: Vector2<f32>) {
        self.points.push(point);
    }

    /// Right perpendicular of edge `n`, i.e. of `p[n] - p[n + 1]` (indices wrap).
    /// `None` for an empty polygon.
    pub fn edge_normal(&self, n: usize) -> Option<Vector2<f32>> {
        let len = self.points.len();
        if len == 0 {
            return None;
        }
        let d = self.points[n % len] - self.points[(n + 1) % len];
        Some(Vector2::new(d.y, -d.x))
    }

    /// Projects every point onto the normalised `axis`. `None` for an empty
    /// polygon or a zero axis.
    pub fn project(&self, axis: Vector2<f32>) -> Option<Projection> {
        if self.points.is_empty() || axis.magnitude2() == 0.0 {
            return None;
        }
        let axis = axis.normalize();
        let (min, max) = self
            .points
            .iter()
            .map(|p| p.dot(axis))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), d| {
                (min.min(d), max.max(d))
            });
        Some(Projection { min, max })
    }

    pub fn intersects(&self, other: &Polygon) -> bool {
        if self.points.is_empty() || other.points.is_empty() {
            return false;
        }
        !Self::has_separating_axis(self, self, other) && !Self::has_separating_axis(other, self, other)
    }

    fn has_separating_axis(edges: &Polygon, a: &Polygon, b: &Polygon) -> bool {
        if edges.points.len() < 2 {
            return false;
        }
        (0..edges.points.len()).any(|i| {
            let Some(normal) = edges.edge_normal(i) else {
                return false;
            };
            match (a.project(normal), b.project(normal)) {
                (Some(pa), Some(pb)) => !pa.overlaps(&pb),
                // duplicate points give a zero-length edge, which separates nothing
                _ => false,
            }
        })
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> Option<(Vector2<f32>, Vector2<f32>)> {
        let first = *self.points.first()?;
        Some(self.points.iter().skip(1).fold((first, first), |(min, max), p| {
            (
                Vector2::new(min.x.min(p.x), min.y.min(p.y)),
                Vector2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }

    /// Even-odd point containment; works for concave outlines too.
    pub fn contains(&self, point: Vector2<f32>) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (pi, pj) = (self.points[i], self.points[j]);
            if (pi.y > point.y) != (pj.y > point.y)
                && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}
