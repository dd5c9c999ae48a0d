//! # engine_scene
//!
//! Declarative scene composition. A scene document is a tree of named
//! `entity`, `group` and `template` nodes; this crate turns it into live
//! entities in two phases:
//!
//! 1. [`SceneBuilder`] walks the tree, consulting the [`ComponentRegistry`]
//!    for each declared component, and produces a forest of [`Blueprint`]s.
//! 2. [`instantiate`] materializes a blueprint into a [`World`], wiring up
//!    [`Parent`]/[`Children`] and assigning a default [`TimeScale`].
//!    [`instantiate_indexed`] also records each entity's declared [`Name`]
//!    in an [`EntityIndex`].
//!
//! Blueprints carry no entity identities, so one build can be instantiated
//! any number of times by cloning it.
//!
//! ```
//! use engine_component::World;
//! use engine_scene::{ComponentRegistry, MemoryLoader, Node, SceneBuilder, instantiate_all};
//!
//! let registry = ComponentRegistry::with_defaults();
//! let loader = MemoryLoader::new();
//! let tree = Node::from_json_str(
//!     r#"{"hero": {"type": "entity", "components": {"transform": {"position": [1, 2, 3]}}}}"#,
//! )
//! .unwrap();
//!
//! let blueprints = SceneBuilder::new(&registry, &loader).build(&tree).unwrap();
//! let mut world = World::new();
//! let roots = instantiate_all(&mut world, blueprints).unwrap();
//! assert_eq!(roots.len(), 1);
//! ```
//!
//! [`World`]: engine_component::World

pub mod blueprint;
pub mod builder;
pub mod ctors;
pub mod error;
pub mod hierarchy;
pub mod loader;
pub mod registry;
pub mod tree;

pub use blueprint::{
    Blueprint, EntityIndex, instantiate, instantiate_all, instantiate_all_indexed,
    instantiate_indexed,
};
pub use builder::{BuildOptions, SceneBuilder};
pub use ctors::{TimeScaleConstructor, TransformConstructor};
pub use error::{BuildError, ConstructError, LoadError};
pub use hierarchy::{Children, Name, Parent, TimeScale};
pub use loader::{DirectoryLoader, MemoryLoader, TreeLoader};
pub use registry::{ComponentConstructor, ComponentRegistry};
pub use tree::{Map, Node, Scalar};
