//! Structural (key-path) immutable updates
//!
//! `update(root, path, value)` returns a new tree equal to `root` except at
//! `path`. Every node along the path is shallow-copied; everything off the path
//! is shared with the original through `Arc`, so an update costs time
//! proportional to the path length (times the width of each copied node) and
//! never touches the original tree.
//!
//! Resolution rules:
//! - an empty path replaces the whole tree
//! - intermediate keys must resolve to an existing map entry or list element
//! - on a map, a missing *final* key is inserted at the end
//! - on a list, the final index must be in bounds
//! - an index key on a map looks up the field named by that number
//!
//! # Examples
//!
//! ```
//! use fnkit::core::path_update::{update, KeyPath, Node};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let user = Node::from_json(json!({
//!     "name": "John Doe",
//!     "address": { "city": "New York", "street": "123 Main St" },
//!     "preferences": { "theme": "dark" }
//! }));
//!
//! let moved = update(&user, &KeyPath::parse("address.city"), Node::leaf("Boston")).unwrap();
//!
//! assert_eq!(moved.to_json()["address"]["city"], "Boston");
//! assert_eq!(user.to_json()["address"]["city"], "New York");
//!
//! let before = user.get_field("preferences").unwrap();
//! let after = moved.get_field("preferences").unwrap();
//! assert!(Arc::ptr_eq(before, after));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

/// A node of a persistent JSON-like tree
///
/// Objects and arrays become `Map` and `List`; everything else is a `Leaf`.
/// Children are reference-counted so that updates can share them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Value),
    Map(IndexMap<String, Arc<Node>>),
    List(Vec<Arc<Node>>),
}

impl Node {
    /// Build a node from any JSON-convertible value
    ///
    /// Objects and arrays become addressable `Map` and `List` nodes, so the
    /// result is the same as going through [`from_json`](Self::from_json).
    pub fn leaf(value: impl Into<Value>) -> Self {
        Node::from(value.into())
    }

    /// Convert a JSON value into a shared tree
    pub fn from_json(value: Value) -> Arc<Node> {
        Arc::new(Node::from(value))
    }

    /// Render the tree back into a JSON value
    pub fn to_json(&self) -> Value {
        match self {
            Node::Leaf(value) => value.clone(),
            Node::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_json()))
                    .collect(),
            ),
            Node::List(items) => Value::Array(items.iter().map(|item| item.to_json()).collect()),
        }
    }

    /// Look up a direct child of a map node
    pub fn get_field(&self, name: &str) -> Option<&Arc<Node>> {
        match self {
            Node::Map(entries) => entries.get(name),
            _ => None,
        }
    }

    /// Look up a direct child of a list node
    pub fn get_index(&self, index: usize) -> Option<&Arc<Node>> {
        match self {
            Node::List(items) => items.get(index),
            _ => None,
        }
    }

    /// Whether the node can be addressed by a key
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Map(_) | Node::List(_))
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(entries) => Node::Map(
                entries
                    .into_iter()
                    .map(|(key, child)| (key, Node::from_json(child)))
                    .collect(),
            ),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from_json).collect()),
            scalar => Node::Leaf(scalar),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(value) => value.serialize(serializer),
            Node::Map(entries) => serializer.collect_map(entries.iter().map(|(k, v)| (k, &**v))),
            Node::List(items) => serializer.collect_seq(items.iter().map(|item| &**item)),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}

/// One segment of a key-path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathKey {
    Field(String),
    Index(usize),
}

impl PathKey {
    /// The map field this key addresses
    fn field_name(&self) -> Cow<'_, str> {
        match self {
            PathKey::Field(name) => Cow::Borrowed(name.as_str()),
            PathKey::Index(index) => Cow::Owned(index.to_string()),
        }
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Field(name) => write!(f, "{}", name),
            PathKey::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathKey {
    fn from(name: &str) -> Self {
        PathKey::Field(name.to_string())
    }
}

impl From<String> for PathKey {
    fn from(name: String) -> Self {
        PathKey::Field(name)
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        PathKey::Index(index)
    }
}

/// An ordered sequence of keys addressing a node in a tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    keys: Vec<PathKey>,
}

impl KeyPath {
    /// The empty path, addressing the root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse dotted notation such as `address.city` or `items.0.quantity`
    ///
    /// Canonical decimal segments (`0`, `12`, but not `007`) become indices,
    /// so every index prints back as the segment it came from. The empty
    /// string is the root path.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        let keys = dotted
            .split('.')
            .map(|segment| match segment.parse::<usize>() {
                Ok(index) if is_canonical_index(segment) => PathKey::Index(index),
                _ => PathKey::Field(segment.to_string()),
            })
            .collect();
        Self { keys }
    }

    /// Extend the path by one key
    pub fn child(mut self, key: impl Into<PathKey>) -> Self {
        self.keys.push(key.into());
        self
    }

    pub fn keys(&self) -> &[PathKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn is_canonical_index(segment: &str) -> bool {
    let digits = segment.bytes().all(|b| b.is_ascii_digit());
    digits && (segment == "0" || !segment.starts_with('0'))
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "<root>");
        }
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl From<Vec<PathKey>> for KeyPath {
    fn from(keys: Vec<PathKey>) -> Self {
        Self { keys }
    }
}

impl<K: Into<PathKey>> FromIterator<K> for KeyPath {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Why a key-path failed to resolve
///
/// Every variant is an invalid path; `depth` is the index of the offending key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("key {depth} of '{path}' reaches into a leaf value")]
    NotIndexable { path: KeyPath, depth: usize },

    #[error("key {depth} of '{path}' names a missing field")]
    MissingKey { path: KeyPath, depth: usize },

    #[error("key {depth} of '{path}' is out of bounds for a list of length {len}")]
    IndexOutOfBounds {
        path: KeyPath,
        depth: usize,
        len: usize,
    },

    #[error("key {depth} of '{path}' is a field name but the node is a list")]
    KeyKindMismatch { path: KeyPath, depth: usize },
}

impl PathError {
    /// The full path that failed
    pub fn path(&self) -> &KeyPath {
        match self {
            PathError::NotIndexable { path, .. }
            | PathError::MissingKey { path, .. }
            | PathError::IndexOutOfBounds { path, .. }
            | PathError::KeyKindMismatch { path, .. } => path,
        }
    }

    /// Index of the key that failed to resolve
    pub fn depth(&self) -> usize {
        match self {
            PathError::NotIndexable { depth, .. }
            | PathError::MissingKey { depth, .. }
            | PathError::IndexOutOfBounds { depth, .. }
            | PathError::KeyKindMismatch { depth, .. } => *depth,
        }
    }
}

/// Pure: Return a new tree with `value` placed at `path`
///
/// The input tree is never modified. Nodes off the path are shared with the
/// result by pointer.
pub fn update(
    root: &Arc<Node>,
    path: &KeyPath,
    value: impl Into<Arc<Node>>,
) -> Result<Arc<Node>, PathError> {
    update_at(root, path, 0, value.into())
}

fn update_at(
    node: &Arc<Node>,
    path: &KeyPath,
    depth: usize,
    value: Arc<Node>,
) -> Result<Arc<Node>, PathError> {
    let Some(key) = path.keys.get(depth) else {
        return Ok(value);
    };
    let is_last = depth + 1 == path.len();
    trace!(depth, key = %key, "Rebinding key on copied node");

    match (&**node, key) {
        (Node::Map(entries), key) => {
            let name = key.field_name();
            let child = match entries.get(&*name) {
                Some(current) => update_at(current, path, depth + 1, value)?,
                None if is_last => value,
                None => {
                    return Err(PathError::MissingKey {
                        path: path.clone(),
                        depth,
                    })
                }
            };
            let mut copy = entries.clone();
            copy.insert(name.into_owned(), child);
            Ok(Arc::new(Node::Map(copy)))
        }
        (Node::List(items), PathKey::Index(index)) => {
            let current = items.get(*index).ok_or_else(|| PathError::IndexOutOfBounds {
                path: path.clone(),
                depth,
                len: items.len(),
            })?;
            let child = update_at(current, path, depth + 1, value)?;
            let mut copy = items.clone();
            copy[*index] = child;
            Ok(Arc::new(Node::List(copy)))
        }
        (Node::List(_), PathKey::Field(_)) => Err(PathError::KeyKindMismatch {
            path: path.clone(),
            depth,
        }),
        (Node::Leaf(_), _) => Err(PathError::NotIndexable {
            path: path.clone(),
            depth,
        }),
    }
}

/// Pure: Resolve `path` against `root`
///
/// Returns `None` when any key fails to resolve.
pub fn get<'a>(root: &'a Arc<Node>, path: &KeyPath) -> Option<&'a Arc<Node>> {
    path.keys.iter().try_fold(root, |node, key| match (&**node, key) {
        (Node::Map(entries), key) => entries.get(&*key.field_name()),
        (Node::List(items), PathKey::Index(index)) => items.get(*index),
        _ => None,
    })
}
