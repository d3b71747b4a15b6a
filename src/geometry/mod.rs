mod aabb;
mod mass;

pub use aabb::Aabb;
pub use mass::MassProperties;
