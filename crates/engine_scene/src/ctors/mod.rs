//! Built-in component constructors.

mod time_scale;
mod transform;

pub use time_scale::TimeScaleConstructor;
pub use transform::TransformConstructor;

use engine_math::Vec3;

use crate::error::ConstructError;
use crate::tree::{Map, Node};

/// Read an optional 3-vector field.
///
/// Missing or null fields yield `default` on every axis; sequences shorter
/// than three are padded with `default` and extra elements are ignored.
pub(crate) fn vec3_field(
    fields: &Map,
    field: &'static str,
    default: f32,
) -> Result<Vec3, ConstructError> {
    let mut axes = [default; 3];
    let node = match fields.get(field) {
        None | Some(Node::Null) => return Ok(Vec3::from_array(axes)),
        Some(node) => node,
    };
    let items = node.as_sequence().ok_or(ConstructError::ExpectedSequence {
        field,
        found: node.kind(),
    })?;
    for (axis, item) in axes.iter_mut().zip(items) {
        *axis = item.as_f32().ok_or(ConstructError::ExpectedNumber {
            field,
            found: item.kind(),
        })?;
    }
    Ok(Vec3::from_array(axes))
}
