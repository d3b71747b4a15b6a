//! # rustphy-shapes
//!
//! Collision shapes for the rustphy physics engine.
//!
//! ## Features
//!
//! - **Shape capability**: every shape reports its margin, bounds, volume and
//!   mass properties through [`CollisionShape`]
//! - **Support mapping**: convex shapes implement [`ConvexShape`], with and
//!   without margin
//! - **Primitives**: Sphere, Box, Capsule, Cylinder, Convex Hull and Compound
//! - **Descriptions**: build shapes from JSON with [`ShapeFactory`]
//!
//! ## Quick Start
//!
//! ```rust
//! use rustphy_shapes::prelude::*;
//!
//! // A 1x1x1 crate with the usual 0.04 collision margin
//! let factory = ShapeFactory::default();
//! let shape = factory
//!     .build(&ShapeDesc::Box { half_extents: Vec3::splat(0.5), margin: None })
//!     .unwrap();
//!
//! let half_extents = shape.as_box().unwrap().half_extents_without_margin();
//! assert!((half_extents.x - 0.46).abs() < 1e-6);
//!
//! let bounds = shape.aabb(Transform::from_position(Vec3::new(0.0, 3.0, 0.0)));
//! assert_eq!(bounds.center(), Vec3::new(0.0, 3.0, 0.0));
//! ```

pub mod config;
mod error;
mod factory;
pub mod geometry;
pub mod math;
pub mod shapes;

pub use config::ShapeConfig;
pub use error::ShapeError;
pub use factory::{ChildDesc, ShapeDesc, ShapeFactory};
pub use shapes::{CollisionShape, ConvexShape, Shape, ShapeType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ShapeConfig;
    pub use crate::error::ShapeError;
    pub use crate::factory::{ChildDesc, ShapeDesc, ShapeFactory};
    pub use crate::geometry::{Aabb, MassProperties};
    pub use crate::math::{Mat3, Quat, Transform, Vec3};
    pub use crate::shapes::{
        BoxShape, Capsule, CollisionShape, Compound, CompoundChild, ConvexHull, ConvexShape,
        Cylinder, Shape, ShapeType, Sphere,
    };
}
