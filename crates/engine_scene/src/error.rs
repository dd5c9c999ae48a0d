//! Scene-layer error types.

use std::path::PathBuf;

use engine_component::WorldError;

/// Errors raised by a [`TreeLoader`](crate::TreeLoader).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No document exists under the requested name.
    #[error("tree '{0}' not found")]
    NotFound(String),

    /// The document exists but could not be read.
    #[error("failed to read tree '{name}' from {}: {source}", .path.display())]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be parsed.
    #[error("failed to parse tree '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by a [`ComponentConstructor`](crate::ComponentConstructor)
/// when the declared data does not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum ConstructError {
    #[error("expected a map, found {found}")]
    ExpectedMap { found: &'static str },

    #[error("field '{field}': expected a sequence, found {found}")]
    ExpectedSequence {
        field: &'static str,
        found: &'static str,
    },

    #[error("field '{field}': expected a number, found {found}")]
    ExpectedNumber {
        field: &'static str,
        found: &'static str,
    },

    /// The entity store rejected the component.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Fatal errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A template source (or scene document) could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A template includes itself, directly or through other templates.
    #[error("template '{0}' includes itself")]
    TemplateCycle(String),

    /// The tree nests deeper than [`BuildOptions::max_depth`](crate::BuildOptions).
    #[error("node '{name}' exceeds the maximum nesting depth of {max_depth}")]
    DepthExceeded { name: String, max_depth: usize },

    /// A scene document has no top-level `scene` map.
    #[error("scene document '{0}' has no 'scene' map")]
    MissingScene(String),
}
