mod transform;

pub use glam::{Mat3, Quat, Vec3};
pub use transform::{abs_rotation, Transform};

/// Common math constants
pub mod consts {
    /// A small epsilon value for floating point comparisons
    pub const EPSILON: f32 = 1e-6;
}

/// Returns true if every component of `v` is finite and `>= 0`.
#[inline]
pub fn is_non_negative(v: Vec3) -> bool {
    v.is_finite() && v.cmpge(Vec3::ZERO).all()
}

/// Per-axis sign selection: `+extent` where `direction >= 0`, `-extent` otherwise.
#[inline]
pub fn select_by_sign(direction: Vec3, extent: Vec3) -> Vec3 {
    Vec3::select(direction.cmpge(Vec3::ZERO), extent, -extent)
}
