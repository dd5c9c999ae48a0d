//! # engine_app
//!
//! Command-line front end for the scene system. Reads a scene document from
//! a directory, builds it once, instantiates it `--copies` times into a fresh
//! world and prints every instantiated root, with its descendants, as JSON.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod config;
mod dump;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine_component::World;
use engine_scene::{
    ComponentRegistry, DirectoryLoader, EntityIndex, SceneBuilder, instantiate_all_indexed,
};

use config::AppConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::parse();

    let registry = ComponentRegistry::with_defaults();
    let loader = DirectoryLoader::new(&config.scene_dir);
    info!(
        dir = %config.scene_dir.display(),
        scene = %config.scene,
        components = ?registry.names(),
        "building scene"
    );

    let blueprints = SceneBuilder::new(&registry, &loader)
        .with_options(config.build_options())
        .build_scene(&config.scene)
        .with_context(|| format!("failed to build scene '{}'", config.scene))?;
    info!(roots = blueprints.len(), "scene built");

    let mut world = World::new();
    let mut index = EntityIndex::new();
    let mut roots = Vec::new();
    for _ in 0..config.copies {
        roots.extend(instantiate_all_indexed(
            &mut world,
            blueprints.iter().cloned(),
            &mut index,
        )?);
    }
    info!(
        roots = roots.len(),
        entities = world.entity_count(),
        named = index.len(),
        "scene instantiated"
    );

    let dumped = roots
        .iter()
        .map(|&root| dump::dump_entity(&world, root))
        .collect::<Result<Vec<_>, _>>()?;
    let output = serde_json::Value::Array(dumped);
    let text = if config.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use engine_scene::{Children, TimeScale, instantiate_all};

    use super::*;

    fn scene_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../scenes")
    }

    #[test]
    fn test_demo_scene() {
        let registry = ComponentRegistry::with_defaults();
        let loader = DirectoryLoader::new(scene_dir());
        let blueprints = SceneBuilder::new(&registry, &loader)
            .build_scene("demo")
            .unwrap();
        assert_eq!(blueprints.len(), 3);

        let mut world = World::new();
        let mut index = EntityIndex::new();
        let roots = instantiate_all_indexed(&mut world, blueprints, &mut index).unwrap();
        assert_eq!(world.entity_count(), 7);

        let player = index.get("player").unwrap();
        assert_eq!(player, roots[0]);
        assert_eq!(world.get::<TimeScale>(player), Some(&TimeScale::DEFAULT));
        let camera = index.get("camera").unwrap();
        assert_eq!(world.get::<Children>(player).unwrap().children, vec![camera]);

        // Crate, then its lid, then the usage-site label.
        let left_crate = index.get("left_crate").unwrap();
        assert_eq!(world.get::<TimeScale>(left_crate), Some(&TimeScale::new(0.5)));
        let lid = index.get("lid").unwrap();
        let label = index.get("label").unwrap();
        assert_eq!(world.get::<TimeScale>(lid), Some(&TimeScale::DEFAULT));
        assert_eq!(
            world.get::<Children>(left_crate).unwrap().children,
            vec![lid, label]
        );

        let right_crate = index.get("right_crate").unwrap();
        assert_eq!(right_crate, roots[2]);
        assert_eq!(world.get::<Children>(right_crate).unwrap().children.len(), 1);
        assert!(!index.contains("props"));
    }

    #[test]
    fn test_demo_scene_copies_are_independent() {
        let registry = ComponentRegistry::with_defaults();
        let loader = DirectoryLoader::new(scene_dir());
        let blueprints = SceneBuilder::new(&registry, &loader)
            .build_scene("demo.json")
            .unwrap();

        let mut world = World::new();
        let first = instantiate_all(&mut world, blueprints.iter().cloned()).unwrap();
        let second = instantiate_all(&mut world, blueprints).unwrap();
        assert_eq!(world.entity_count(), 14);

        let a = dump::dump_entity(&world, first[0]).unwrap();
        let b = dump::dump_entity(&world, second[0]).unwrap();
        assert_ne!(a["entity"], b["entity"]);
        assert_eq!(
            a["components"]["Transform"],
            b["components"]["Transform"]
        );
    }
}
