//! Small angle and scalar helpers for 2D game code.

use cgmath::{Deg, Rad, Vector2};

/// Direction angle of `v` in radians, measured from +X.
pub fn angle(v: Vector2<f32>) -> f32 {
    v.y.atan2(v.x)
}

/// Direction angle of the vector pointing from `a` to `b`, in radians.
pub fn angle_between(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    angle(b - a)
}

/// Unit vector for an angle given in degrees.
pub fn angle_vector(deg: f32) -> Vector2<f32> {
    let rad = to_radians(deg);
    Vector2::new(rad.cos(), rad.sin())
}

pub fn to_radians(deg: f32) -> f32 {
    Rad::from(Deg(deg)).0
}

pub fn to_degrees(rad: f32) -> f32 {
    Deg::from(Rad(rad)).0
}

/// `e^(-v * rate)`; 1 at `v == 0`, falling towards 0.
pub fn exp_decay(v: f32, rate: f32) -> f32 {
    (-v * rate).exp()
}

/// Wraps `v` into `[min, max)`. Returns `min` for an empty range.
pub fn wrap(v: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range <= 0.0 {
        return min;
    }
    min + (v - min).rem_euclid(range)
}
