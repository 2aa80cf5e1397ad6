use std::fmt;

use cgmath::{InnerSpace, Point3, Vector3, Zero};

/// A half-line with a unit-length direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    start: Point3<f32>,
    direction: Vector3<f32>,
}

impl Ray {
    /// Returns `None` for a zero (or non-finite) direction, which has no normalised form.
    pub fn new(start: Point3<f32>, direction: Vector3<f32>) -> Option<Self> {
        if direction.is_zero() {
            return None;
        }
        let direction = direction.normalize();
        if !(direction.x.is_finite() && direction.y.is_finite() && direction.z.is_finite()) {
            return None;
        }
        Some(Self { start, direction })
    }

    pub fn from_target(start: Point3<f32>, target: Point3<f32>) -> Option<Self> {
        Self::new(start, target - start)
    }

    pub fn start(&self) -> Point3<f32> {
        self.start
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.start + self.direction * t
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) => ({}, {}, {})",
            self.start.x, self.start.y, self.start.z, self.direction.x, self.direction.y, self.direction.z
        )
    }
}
