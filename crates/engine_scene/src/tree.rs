//! Declarative tree AST.
//!
//! Scene and template documents are loaded into a [`Node`] tree of scalars,
//! sequences and maps. Maps keep their entries in declaration order, which
//! the builder relies on for deterministic hierarchy order.

use std::collections::HashMap;
use std::fmt;

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

/// An insertion-ordered string-keyed map.
///
/// Entries live in a vector in declaration order; a key index makes both
/// insertion and lookup constant time on average.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    entries: Vec<(String, Node)>,
    index: HashMap<String, usize>,
}

impl Map {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. An existing key keeps its position and gets the new
    /// value.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Map {
            entries: Vec::with_capacity(iter.size_hint().0),
            index: HashMap::with_capacity(iter.size_hint().0),
        };
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// A node of a declarative tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Map(Map),
}

impl Node {
    /// Parse a JSON document into a tree.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if `text` is not valid JSON.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from(value))
    }

    /// Look up a key if this node is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map()?.get(key)
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// The string value of a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The value of a numeric scalar. Strings holding a number are accepted
    /// too, since not every document format distinguishes the two.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Node::Scalar(Scalar::Number(n)) => Some(*n as f32),
            Node::Scalar(Scalar::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Short description of the node's shape, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Scalar(_) => "scalar",
            Node::Sequence(_) => "sequence",
            Node::Map(_) => "map",
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            // Every JSON number is representable (possibly lossily) as f64.
            Value::Number(n) => Node::Scalar(Scalar::Number(n.as_f64().unwrap_or_default())),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(object) => {
                Node::Map(object.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Scalar(Scalar::Number(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_preserves_declaration_order() {
        let node = Node::from_json_str(r#"{"c": 1, "a": 2, "b": 3}"#).unwrap();
        let keys: Vec<&str> = node.as_map().unwrap().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_from_json_value() {
        let node = Node::from(serde_json::json!({
            "type": "entity",
            "position": [1, 2.5, "3"],
            "flag": true,
            "nothing": null,
        }));

        assert_eq!(node.get("type").and_then(Node::as_str), Some("entity"));
        let position = node.get("position").and_then(Node::as_sequence).unwrap();
        let numbers: Vec<Option<f32>> = position.iter().map(Node::as_f32).collect();
        assert_eq!(numbers, vec![Some(1.0), Some(2.5), Some(3.0)]);
        assert_eq!(node.get("flag"), Some(&Node::Scalar(Scalar::Bool(true))));
        assert!(node.get("nothing").unwrap().is_null());
        assert!(node.get("missing").is_none());
    }

    #[test]
    fn test_accessors_reject_wrong_shape() {
        let scalar = Node::from("text");
        assert!(scalar.as_map().is_none());
        assert!(scalar.as_sequence().is_none());
        assert!(scalar.as_f32().is_none());
        assert!(scalar.get("key").is_none());
        assert_eq!(scalar.kind(), "scalar");
    }

    #[test]
    fn test_map_insert_replaces_in_place() {
        let mut map = Map::new();
        map.insert("a", Node::from(1.0));
        map.insert("b", Node::from(2.0));
        map.insert("a", Node::from(3.0));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&Node::from(3.0)));
        assert_eq!(map.iter().next().map(|(k, _)| k), Some("a"));
    }

    #[test]
    fn test_large_map_conversion() {
        let object: serde_json::Map<String, serde_json::Value> = (0..40_000)
            .map(|i| (format!("node_{i}"), serde_json::json!({"type": "entity"})))
            .collect();

        let start = std::time::Instant::now();
        let node = Node::from(serde_json::Value::Object(object));
        assert!(start.elapsed() < std::time::Duration::from_secs(1));

        let map = node.as_map().unwrap();
        assert_eq!(map.len(), 40_000);
        assert_eq!(map.iter().nth(12_345).map(|(k, _)| k), Some("node_12345"));
        assert!(map.get("node_39999").is_some());
    }

    #[test]
    fn test_invalid_json() {
        assert!(Node::from_json_str("{ not json").is_err());
    }
}
