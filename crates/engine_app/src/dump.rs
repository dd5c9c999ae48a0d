//! JSON rendering of instantiated entity hierarchies.

use engine_component::{Entity, World, WorldError};
use engine_scene::Children;
use serde_json::{Value, json};

/// Render `entity` and its descendants as nested JSON.
///
/// Each entity becomes `{ "entity", "components", "children" }`, where
/// `components` is the store's snapshot of the entity and `children` follows
/// its [`Children`] component.
///
/// # Errors
///
/// Returns a [`WorldError`] if an entity in the hierarchy is missing or a
/// component fails to serialize.
pub fn dump_entity(world: &World, entity: Entity) -> Result<Value, WorldError> {
    let components = world.snapshot(entity)?;
    let children = world
        .get::<Children>(entity)
        .map(|c| c.children.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|&child| dump_entity(world, child))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({
        "entity": entity.id(),
        "components": components,
        "children": children,
    }))
}

#[cfg(test)]
mod tests {
    use engine_component::Stamp;
    use engine_math::Transform;
    use engine_scene::{Blueprint, instantiate};

    use super::*;

    #[test]
    fn test_dump_hierarchy() {
        let mut world = World::new();
        let mut stamp = Stamp::new();
        stamp.set(Transform::IDENTITY);
        let blueprint = Blueprint::new(stamp).with_child(Blueprint::default());
        let root = instantiate(&mut world, blueprint).unwrap();

        let dump = dump_entity(&world, root).unwrap();
        assert_eq!(dump["entity"], json!(root.id()));
        assert!(dump["components"].get("Transform").is_some());
        assert_eq!(dump["components"]["TimeScale"], json!({"scale": 1.0}));

        let children = dump["children"].as_array().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(
            children[0]["components"]["Parent"],
            json!({"parent": root.id()})
        );
        assert_eq!(children[0]["children"], json!([]));
    }

    #[test]
    fn test_dump_missing_entity() {
        let world = World::new();
        assert!(matches!(
            dump_entity(&world, Entity::from_raw(7)),
            Err(WorldError::EntityNotFound(_))
        ));
    }
}
