//! The `transform` constructor.
//!
//! ```text
//! transform:
//!   position: [x, y, z]   # default [0, 0, 0]
//!   rotation: [x, y, z]   # turns, default [0, 0, 0]
//!   scale:    [x, y, z]   # default [1, 1, 1]
//! ```

use engine_component::{Entity, Stamp, World};
use engine_math::Transform;

use super::vec3_field;
use crate::error::ConstructError;
use crate::registry::ComponentConstructor;
use crate::tree::Node;

/// Builds a [`Transform`]. A second write replaces the whole component.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformConstructor;

impl TransformConstructor {
    /// Parse declared transform data. `null` yields the identity transform.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructError`] if `data` is neither a map nor null, or a
    /// field is not a sequence of numbers.
    pub fn parse(data: &Node) -> Result<Transform, ConstructError> {
        let fields = match data {
            Node::Null => return Ok(Transform::IDENTITY),
            Node::Map(fields) => fields,
            other => return Err(ConstructError::ExpectedMap { found: other.kind() }),
        };
        let position = vec3_field(fields, "position", 0.0)?;
        let rotation = vec3_field(fields, "rotation", 0.0)?;
        let scale = vec3_field(fields, "scale", 1.0)?;
        Ok(Transform::from_turns(position, rotation, scale))
    }
}

impl ComponentConstructor for TransformConstructor {
    fn apply_to_entity(
        &self,
        world: &mut World,
        entity: Entity,
        data: &Node,
    ) -> Result<(), ConstructError> {
        world.assign(entity, Self::parse(data)?)?;
        Ok(())
    }

    fn apply_to_stamp(&self, stamp: &mut Stamp, data: &Node) -> Result<(), ConstructError> {
        stamp.set(Self::parse(data)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use engine_math::Vec3;

    use super::*;

    #[test]
    fn test_parse_full() {
        let data = Node::from(serde_json::json!({
            "position": [1, 2, 3],
            "rotation": [0, 0.25, 0],
            "scale": [2, 2, 2],
        }));
        let t = TransformConstructor::parse(&data).unwrap();
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert!((t.rotation.y - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(t.scale, Vec3::splat(2.0));
    }

    #[test]
    fn test_parse_defaults() {
        let t = TransformConstructor::parse(&Node::from(serde_json::json!({}))).unwrap();
        assert_eq!(t, Transform::IDENTITY);
        assert_eq!(TransformConstructor::parse(&Node::Null).unwrap(), Transform::IDENTITY);
    }

    #[test]
    fn test_parse_rejects_scalar() {
        let result = TransformConstructor::parse(&Node::from(3.0));
        assert!(matches!(result, Err(ConstructError::ExpectedMap { found: "scalar" })));
    }

    #[test]
    fn test_stamp_write_replaces_whole_component() {
        let mut stamp = Stamp::new();
        let first = Node::from(serde_json::json!({"position": [1, 1, 1], "scale": [3, 3, 3]}));
        let second = Node::from(serde_json::json!({"position": [5, 0, 0]}));
        TransformConstructor.apply_to_stamp(&mut stamp, &first).unwrap();
        TransformConstructor.apply_to_stamp(&mut stamp, &second).unwrap();

        let t = stamp.get::<Transform>().unwrap();
        assert_eq!(t.position, Vec3::new(5.0, 0.0, 0.0));
        // The earlier scale does not survive.
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn test_ill_typed_data_leaves_stamp_untouched() {
        let mut stamp = Stamp::new();
        let data = Node::from(serde_json::json!({"position": "here"}));
        assert!(TransformConstructor.apply_to_stamp(&mut stamp, &data).is_err());
        assert!(stamp.is_empty());
    }
}
