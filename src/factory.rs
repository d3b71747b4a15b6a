//! Building shapes from serializable descriptions.
//!
//! A [`ShapeDesc`] is what prefabs and asset files carry. Box and cylinder
//! dimensions in a description are outer dimensions: the margin is carved
//! out of them, so a described 1x1x1 box collides as a 1x1x1 box whatever
//! margin the backend uses.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::ShapeConfig;
use crate::error::ShapeError;
use crate::math::{Transform, Vec3};
use crate::shapes::{
    BoxShape, Capsule, CollisionShape, Compound, CompoundChild, ConvexHull, Cylinder, Shape,
    Sphere,
};

/// Serializable description of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Sphere {
        radius: f32,
    },
    Box {
        half_extents: Vec3,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        margin: Option<f32>,
    },
    Capsule {
        radius: f32,
        half_height: f32,
    },
    Cylinder {
        radius: f32,
        half_height: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        margin: Option<f32>,
    },
    ConvexHull {
        points: Vec<Vec3>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        margin: Option<f32>,
    },
    Compound {
        children: Vec<ChildDesc>,
    },
}

/// A compound child in a [`ShapeDesc::Compound`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildDesc {
    #[serde(default)]
    pub transform: Transform,
    pub shape: ShapeDesc,
}

impl From<&Shape> for ShapeDesc {
    fn from(shape: &Shape) -> Self {
        match shape {
            Shape::Sphere(s) => ShapeDesc::Sphere { radius: s.radius() },
            Shape::Box(b) => ShapeDesc::Box {
                half_extents: b.half_extents_with_margin(),
                margin: Some(b.margin()),
            },
            Shape::Capsule(c) => ShapeDesc::Capsule {
                radius: c.radius(),
                half_height: c.half_height(),
            },
            Shape::Cylinder(c) => ShapeDesc::Cylinder {
                radius: c.radius(),
                half_height: c.half_height(),
                margin: Some(c.margin()),
            },
            Shape::ConvexHull(h) => ShapeDesc::ConvexHull {
                points: h.points().to_vec(),
                margin: Some(h.margin()),
            },
            Shape::Compound(c) => ShapeDesc::Compound {
                children: c
                    .children()
                    .iter()
                    .map(|child| ChildDesc {
                        transform: child.transform(),
                        shape: ShapeDesc::from(child.shape()),
                    })
                    .collect(),
            },
        }
    }
}

/// Turns [`ShapeDesc`]s into validated [`Shape`]s.
#[derive(Debug, Clone, Default)]
pub struct ShapeFactory {
    config: ShapeConfig,
}

impl ShapeFactory {
    /// Creates a factory after validating `config`
    pub fn new(config: ShapeConfig) -> Result<Self, ShapeError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    /// Parses a JSON description and builds it
    pub fn build_json(&self, json: &str) -> Result<Shape, ShapeError> {
        let desc: ShapeDesc = serde_json::from_str(json)?;
        self.build(&desc)
    }

    /// Builds a validated shape, filling in defaults from the config
    pub fn build(&self, desc: &ShapeDesc) -> Result<Shape, ShapeError> {
        let shape = match desc {
            ShapeDesc::Sphere { radius } => Shape::Sphere(Sphere::new(*radius)?),
            ShapeDesc::Box {
                half_extents,
                margin,
            } => {
                let margin = self.margin_for(*margin, half_extents.min_element(), "box");
                Shape::Box(BoxShape::with_margin(*half_extents, margin)?)
            }
            ShapeDesc::Capsule {
                radius,
                half_height,
            } => Shape::Capsule(Capsule::new(*radius, *half_height)?),
            ShapeDesc::Cylinder {
                radius,
                half_height,
                margin,
            } => {
                let margin = self.margin_for(*margin, radius.min(*half_height), "cylinder");
                Shape::Cylinder(Cylinder::with_margin(*radius, *half_height, margin)?)
            }
            ShapeDesc::ConvexHull { points, margin } => {
                let limit = self.config.convex_hull_max_points;
                if points.len() > limit {
                    return Err(ShapeError::TooManyHullPoints {
                        count: points.len(),
                        limit,
                    });
                }
                let margin = margin.unwrap_or(self.config.default_margin);
                Shape::ConvexHull(ConvexHull::with_margin(points.clone(), margin)?)
            }
            ShapeDesc::Compound { children } => {
                let children = children
                    .iter()
                    .map(|child| CompoundChild::new(child.transform, self.build(&child.shape)?))
                    .collect::<Result<Vec<_>, ShapeError>>()?;
                Shape::Compound(Compound::new(children)?)
            }
        };

        debug!(
            "built {} shape, margin {}, local bounds {:?}",
            shape.shape_type(),
            shape.margin(),
            shape.local_aabb()
        );
        Ok(shape)
    }

    /// Explicit margins are used as given; the default margin is clamped to
    /// the smallest extent so thin shapes still build.
    fn margin_for(&self, explicit: Option<f32>, smallest_extent: f32, kind: &str) -> f32 {
        if let Some(margin) = explicit {
            return margin;
        }
        let default = self.config.default_margin;
        if smallest_extent.is_finite() && (0.0..default).contains(&smallest_extent) {
            warn!(
                "{kind} extent {smallest_extent} is thinner than the default margin {default}, clamping margin"
            );
            smallest_extent
        } else {
            default
        }
    }
}
