//! Scene builder.
//!
//! Walks a declarative tree and produces a forest of [`Blueprint`]s. Every
//! named node of a tree map is one of:
//!
//! - `entity`: a stamp built from `components`, plus `children`.
//! - `group`: its `children`, with each `defaults` component applied to every
//!   resulting blueprint. A group contributes no entity of its own.
//! - `template`: the single `entity`/`template` node of the document named by
//!   `source`, with the usage site's `children` appended.
//!
//! Malformed nodes and unknown components are skipped, ill-typed component
//! data is reported and ignored. Only loader failures, template cycles and
//! runaway nesting abort a build.

use std::collections::HashMap;
use std::rc::Rc;

use engine_component::Stamp;
use tracing::{debug, trace, warn};

use crate::blueprint::Blueprint;
use crate::error::BuildError;
use crate::hierarchy::Name;
use crate::loader::TreeLoader;
use crate::registry::ComponentRegistry;
use crate::tree::{Map, Node};

/// Tunables for a [`SceneBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Deepest node nesting accepted before the build is aborted. Top-level
    /// nodes sit at depth 1; the root of an expanded template counts one
    /// level below its usage site.
    pub max_depth: usize,
}

impl BuildOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds blueprints from declarative trees.
///
/// The builder borrows the registry and the loader for its lifetime. Template
/// documents are loaded at most once per builder and reused for every usage
/// site.
pub struct SceneBuilder<'a> {
    registry: &'a ComponentRegistry,
    loader: &'a dyn TreeLoader,
    options: BuildOptions,
    templates: HashMap<String, Rc<Node>>,
    /// Template sources currently being expanded, outermost first.
    expanding: Vec<String>,
}

impl<'a> SceneBuilder<'a> {
    #[must_use]
    pub fn new(registry: &'a ComponentRegistry, loader: &'a dyn TreeLoader) -> Self {
        Self {
            registry,
            loader,
            options: BuildOptions::default(),
            templates: HashMap::new(),
            expanding: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build every node of `tree`, in declaration order.
    ///
    /// A tree that is not a map builds to an empty forest.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] if a template source cannot be loaded, a
    /// template includes itself, or the nesting depth limit is exceeded.
    pub fn build(&mut self, tree: &Node) -> Result<Vec<Blueprint>, BuildError> {
        self.build_nodes(tree, 1)
    }

    /// Load the scene document `name` and build its top-level `scene` map.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingScene`] if the document has no `scene`
    /// map, and otherwise the same errors as [`SceneBuilder::build`].
    pub fn build_scene(&mut self, name: &str) -> Result<Vec<Blueprint>, BuildError> {
        let document = self.loader.load_tree(name)?;
        let scene = document
            .get("scene")
            .filter(|scene| scene.as_map().is_some())
            .ok_or_else(|| BuildError::MissingScene(name.to_string()))?;
        debug!(scene = name, "building scene");
        self.build(scene)
    }

    fn build_nodes(&mut self, tree: &Node, depth: usize) -> Result<Vec<Blueprint>, BuildError> {
        let mut blueprints = Vec::new();
        match tree.as_map() {
            Some(nodes) => {
                for (name, node) in nodes.iter() {
                    self.build_node(name, node, depth, &mut blueprints)?;
                }
            }
            None if tree.is_null() => {}
            None => trace!(found = tree.kind(), "skipping node list that is not a map"),
        }
        Ok(blueprints)
    }

    fn build_node(
        &mut self,
        name: &str,
        node: &Node,
        depth: usize,
        out: &mut Vec<Blueprint>,
    ) -> Result<(), BuildError> {
        let Some(fields) = node.as_map() else {
            trace!(node = name, found = node.kind(), "skipping node that is not a map");
            return Ok(());
        };
        let kind = match fields.get("type").and_then(Node::as_str) {
            Some("entity") => NodeKind::Entity,
            Some("group") => NodeKind::Group,
            Some("template") => NodeKind::Template,
            Some(other) => {
                trace!(node = name, kind = other, "skipping node of unknown type");
                return Ok(());
            }
            None => {
                trace!(node = name, "skipping node without a type");
                return Ok(());
            }
        };

        if depth > self.options.max_depth {
            return Err(BuildError::DepthExceeded {
                name: name.to_string(),
                max_depth: self.options.max_depth,
            });
        }

        log_node(kind, name, fields);
        match kind {
            NodeKind::Entity => {
                let blueprint = self.build_entity(name, fields, depth)?;
                out.push(blueprint);
            }
            NodeKind::Group => {
                let blueprints = self.build_group(name, fields, depth)?;
                out.extend(blueprints);
            }
            NodeKind::Template => {
                let blueprint = self.build_template(name, fields, depth)?;
                out.push(blueprint);
            }
        }
        Ok(())
    }

    fn build_entity(
        &mut self,
        name: &str,
        fields: &Map,
        depth: usize,
    ) -> Result<Blueprint, BuildError> {
        let mut stamp = Stamp::new();
        stamp.set(Name::new(name));
        if let Some(components) = fields.get("components").and_then(Node::as_map) {
            for (component, data) in components.iter() {
                self.apply_component(&mut stamp, name, component, data);
            }
        }
        let children = self.build_children(fields, depth)?;
        Ok(Blueprint { stamp, children })
    }

    fn build_group(
        &mut self,
        name: &str,
        fields: &Map,
        depth: usize,
    ) -> Result<Vec<Blueprint>, BuildError> {
        let mut blueprints = self.build_children(fields, depth)?;
        if let Some(defaults) = fields.get("defaults").and_then(Node::as_map) {
            for (component, data) in defaults.iter() {
                for blueprint in &mut blueprints {
                    self.apply_component(&mut blueprint.stamp, name, component, data);
                }
            }
        }
        Ok(blueprints)
    }

    fn build_template(
        &mut self,
        name: &str,
        fields: &Map,
        depth: usize,
    ) -> Result<Blueprint, BuildError> {
        let source = match fields.get("source") {
            Some(Node::Scalar(source)) => source.to_string(),
            _ => {
                warn!(node = name, "template has no source, using an empty blueprint");
                return Ok(Blueprint::default());
            }
        };
        if self.expanding.contains(&source) {
            return Err(BuildError::TemplateCycle(source));
        }

        let tree = self.load_template(&source)?;
        let root = tree.as_map().and_then(|nodes| {
            nodes.iter().find(|(_, node)| {
                matches!(
                    node.get("type").and_then(Node::as_str),
                    Some("entity" | "template")
                )
            })
        });
        let Some((root_name, root)) = root else {
            warn!(
                node = name,
                source = %source,
                "template source has no entity or template node, using an empty blueprint"
            );
            return Ok(Blueprint::default());
        };

        self.expanding.push(source);
        let mut built = Vec::with_capacity(1);
        let result = self.build_node(root_name, root, depth + 1, &mut built);
        self.expanding.pop();
        result?;

        let mut blueprint = built.into_iter().next().unwrap_or_default();
        blueprint.stamp.set(Name::new(name));
        blueprint.children.extend(self.build_children(fields, depth)?);
        Ok(blueprint)
    }

    fn build_children(&mut self, fields: &Map, depth: usize) -> Result<Vec<Blueprint>, BuildError> {
        match fields.get("children") {
            Some(children) => self.build_nodes(children, depth + 1),
            None => Ok(Vec::new()),
        }
    }

    fn load_template(&mut self, source: &str) -> Result<Rc<Node>, BuildError> {
        if let Some(tree) = self.templates.get(source) {
            return Ok(Rc::clone(tree));
        }
        debug!(source, "loading template");
        let tree = Rc::new(self.loader.load_tree(source)?);
        self.templates.insert(source.to_string(), Rc::clone(&tree));
        Ok(tree)
    }

    fn apply_component(&self, stamp: &mut Stamp, node: &str, component: &str, data: &Node) {
        let Some(constructor) = self.registry.lookup(component) else {
            trace!(node, component, "skipping unknown component");
            return;
        };
        if let Err(err) = constructor.apply_to_stamp(stamp, data) {
            warn!(node, component, error = %err, "ignoring ill-typed component data");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Entity,
    Group,
    Template,
}

impl NodeKind {
    fn as_str(self) -> &'static str {
        match self {
            NodeKind::Entity => "entity",
            NodeKind::Group => "group",
            NodeKind::Template => "template",
        }
    }
}

fn log_node(kind: NodeKind, name: &str, fields: &Map) {
    let kind = kind.as_str();
    match fields.get("comment") {
        Some(Node::Scalar(comment)) => debug!("loading {kind}: {name} - {comment}"),
        _ => debug!("loading {kind}: {name}"),
    }
}
