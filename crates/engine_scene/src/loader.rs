//! Tree loaders.
//!
//! The builder resolves template `source` names (and whole scene documents)
//! through a [`TreeLoader`]. Two implementations are provided: an in-memory
//! table and a directory of JSON documents.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LoadError;
use crate::tree::Node;

/// Resolves a logical document name to a parsed tree.
pub trait TreeLoader {
    /// Load the tree registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the name cannot be resolved or parsed.
    fn load_tree(&self, name: &str) -> Result<Node, LoadError>;
}

/// Serves trees from an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    trees: HashMap<String, Node>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tree under `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, tree: impl Into<Node>) {
        self.trees.insert(name.into(), tree.into());
    }

    /// Builder-style variant of [`MemoryLoader::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, tree: impl Into<Node>) -> Self {
        self.insert(name, tree);
        self
    }
}

impl TreeLoader for MemoryLoader {
    fn load_tree(&self, name: &str) -> Result<Node, LoadError> {
        self.trees
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }
}

/// Reads JSON documents from a directory.
///
/// A name resolves to `<root>/<name>` if that file exists, otherwise to
/// `<root>/<name>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory documents are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let exact = self.root.join(name);
        if exact.is_file() {
            return Some(exact);
        }
        let with_extension = self.root.join(format!("{name}.json"));
        with_extension.is_file().then_some(with_extension)
    }
}

impl TreeLoader for DirectoryLoader {
    fn load_tree(&self, name: &str) -> Result<Node, LoadError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| LoadError::NotFound(name.to_string()))?;
        debug!(name, path = %path.display(), "reading tree");

        let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
            name: name.to_string(),
            path: path.clone(),
            source,
        })?;
        Node::from_json_str(&text).map_err(|source| LoadError::Parse {
            name: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("engine_scene_loader_{test}"));
        // Left behind by an earlier failed run.
        if dir.exists() {
            std::fs::remove_dir_all(&dir).unwrap();
        }
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryLoader::new().with("crate", serde_json::json!({"a": 1}));
        let tree = loader.load_tree("crate").unwrap();
        assert!(tree.get("a").is_some());
        assert!(matches!(
            loader.load_tree("missing"),
            Err(LoadError::NotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_directory_loader_appends_extension() {
        let dir = scratch_dir("extension");
        std::fs::write(dir.join("barrel.json"), r#"{"barrel": {"type": "entity"}}"#).unwrap();

        let loader = DirectoryLoader::new(&dir);
        let tree = loader.load_tree("barrel").unwrap();
        assert!(tree.get("barrel").is_some());
        let exact = loader.load_tree("barrel.json").unwrap();
        assert_eq!(tree, exact);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_scratch_dir_starts_empty() {
        let dir = scratch_dir("stale");
        std::fs::write(dir.join("leftover.json"), "{}").unwrap();

        let dir = scratch_dir("stale");
        assert!(std::fs::read_dir(&dir).unwrap().next().is_none());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_directory_loader_errors() {
        let dir = scratch_dir("errors");
        std::fs::write(dir.join("broken.json"), "{ nope").unwrap();

        let loader = DirectoryLoader::new(&dir);
        assert!(matches!(loader.load_tree("absent"), Err(LoadError::NotFound(_))));
        assert!(matches!(loader.load_tree("broken"), Err(LoadError::Parse { .. })));

        std::fs::remove_dir_all(dir).unwrap();
    }
}
