//! Builds shapes from a JSON list of descriptions and logs their bounds.
//!
//! Run with: `RUST_LOG=debug cargo run --example shape_report [shapes.json] [config.json]`

use rustphy_shapes::prelude::*;

const SAMPLE: &str = r#"[
    { "type": "box", "half_extents": [0.5, 0.5, 0.5] },
    { "type": "box", "half_extents": [2.0, 0.02, 1.0] },
    { "type": "sphere", "radius": 0.3 },
    { "type": "cylinder", "radius": 0.4, "half_height": 1.0 },
    {
        "type": "compound",
        "children": [
            { "shape": { "type": "box", "half_extents": [1.0, 0.1, 1.0] } },
            {
                "transform": { "position": [0.0, 0.6, 0.0] },
                "shape": { "type": "capsule", "radius": 0.2, "half_height": 0.4 }
            }
        ]
    }
]"#;

fn main() -> Result<(), ShapeError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let descs = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_owned(),
    };
    let config = match args.next() {
        Some(path) => ShapeConfig::load(path)?,
        None => ShapeConfig::default(),
    };

    let factory = ShapeFactory::new(config)?;
    let descs: Vec<ShapeDesc> = serde_json::from_str(&descs)?;

    let placement = Transform::new(
        Vec3::new(0.0, 2.0, 0.0),
        Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_4),
    );

    for desc in &descs {
        let shape = factory.build(desc)?;
        let props = shape.mass_properties(1.0)?;
        log::info!(
            "{}: margin {:.3}, volume {:.3}, mass {:.3}, placed bounds {:?}",
            shape.shape_type(),
            shape.margin(),
            shape.volume(),
            props.mass,
            shape.aabb(placement)
        );
        if let Some(b) = shape.as_box() {
            log::info!(
                "  half extents without margin {}, with margin {}",
                b.half_extents_without_margin(),
                b.half_extents_with_margin()
            );
        }
    }

    Ok(())
}
