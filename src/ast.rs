use core::fmt;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::formatter::{Formatter, FormatterConfig, Layout};

/// Parsed KFG document: top-level names bound to values.
///
/// Scoped assignments (`server:: port = 80`) appear here as nested dictionaries under the
/// first scope name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ast {
    pub assignments: BTreeMap<String, Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.assignments.get(name)
    }

    /// Looks up a value through nested dictionaries, `["server", "port"]`.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.get(first.as_ref())?, |node, segment| {
                node.get(segment.as_ref())
            })
    }

    /// Binds `node` to `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) -> Option<Node> {
        self.assignments.insert(name.into(), node)
    }

    /// Binds `node` at a nested path, creating or reusing dictionaries for every segment but
    /// the last one. A non-dictionary value in the way is replaced.
    pub fn insert_path(&mut self, path: &[String], node: Node) {
        if let Some((first, rest)) = path.split_first() {
            self.assignments
                .entry(first.clone())
                .or_insert(Node::Null)
                .insert_path(rest, node);
        }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.assignments.iter()
    }

    /// Number of assignments including every entry of nested dictionaries.
    pub fn assignment_count(&self) -> usize {
        count_entries(&self.assignments)
    }

    /// Single-line rendering, `name = value` pairs separated by `; `.
    pub fn inline(&self) -> String {
        Formatter::new(FormatterConfig {
            layout: Layout::Inline,
            ..FormatterConfig::default()
        })
        .format(self)
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Formatter::default().write_ast(f, self)
    }
}

impl IntoIterator for Ast {
    type Item = (String, Node);
    type IntoIter = std::collections::btree_map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.into_iter()
    }
}

/// A typed value.
///
/// `Null` is the zero value used while building nested dictionaries. A successful parse
/// never leaves one in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<Node>),
    Dict(BTreeMap<String, Node>),
    Null,
}

impl Node {
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::String(_) => "String",
            Node::Integer(_) => "Integer",
            Node::Float(_) => "Float",
            Node::Bool(_) => "Bool",
            Node::Array(_) => "Array",
            Node::Dict(_) => "Dict",
            Node::Null => "Null",
        }
    }

    /// Dictionary entry lookup; `None` for other node types.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Dict(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Float(value) => Some(*value),
            Node::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    fn insert_path(&mut self, path: &[String], node: Node) {
        let Some((first, rest)) = path.split_first() else {
            *self = node;
            return;
        };

        if !matches!(self, Node::Dict(_)) {
            *self = Node::Dict(BTreeMap::new());
        }
        if let Node::Dict(entries) = self {
            entries
                .entry(first.clone())
                .or_insert(Node::Null)
                .insert_path(rest, node);
        }
    }

    pub fn inline(&self) -> String {
        Formatter::new(FormatterConfig {
            layout: Layout::Inline,
            ..FormatterConfig::default()
        })
        .format_node(self)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Formatter::default().write_node(f, self)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Integer(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Node {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(entries: T) -> Self {
        Node::Dict(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

fn count_entries(entries: &BTreeMap<String, Node>) -> usize {
    entries
        .values()
        .filter_map(|node| node.as_dict().map(count_entries))
        .sum::<usize>()
        + entries.len()
}
