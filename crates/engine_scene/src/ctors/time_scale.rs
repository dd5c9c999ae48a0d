//! The `time_scale` constructor.
//!
//! Accepts either a bare number (`time_scale: 0.5`) or a map
//! (`time_scale: { scale: 0.5 }`).

use engine_component::{Entity, Stamp, World};

use crate::error::ConstructError;
use crate::hierarchy::TimeScale;
use crate::registry::ComponentConstructor;
use crate::tree::Node;

/// Builds a [`TimeScale`]. A second write replaces the whole component.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeScaleConstructor;

impl TimeScaleConstructor {
    /// Parse declared time-scale data. `null`, or a map without `scale`,
    /// yields the default scale.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructError`] if `data` is neither a number nor a map
    /// with a numeric `scale`.
    pub fn parse(data: &Node) -> Result<TimeScale, ConstructError> {
        let scale = match data {
            Node::Null => return Ok(TimeScale::DEFAULT),
            Node::Map(fields) => match fields.get("scale") {
                None => return Ok(TimeScale::DEFAULT),
                Some(node) => node,
            },
            Node::Scalar(_) => data,
            other => return Err(ConstructError::ExpectedMap { found: other.kind() }),
        };
        scale
            .as_f32()
            .map(TimeScale::new)
            .ok_or(ConstructError::ExpectedNumber {
                field: "scale",
                found: scale.kind(),
            })
    }
}

impl ComponentConstructor for TimeScaleConstructor {
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
