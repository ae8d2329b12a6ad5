//! Generic document tree.
//!
//! Parsed TOML is converted into [`Node`] once, so validation only has to
//! match on the shapes it cares about.

use std::collections::BTreeMap;

use crate::error::{LoadError, Position};

/// A parsed document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    String(String),
    Array(Vec<Node>),
    Table(BTreeMap<String, Node>),
    /// Any other TOML scalar; only its kind is kept for error messages.
    Scalar(&'static str),
}

impl Node {
    /// Human-readable kind, used in type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Table(_) => "table",
            Node::Scalar(kind) => kind,
        }
    }
}

impl From<toml::Value> for Node {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Node::String(s),
            toml::Value::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            toml::Value::Table(table) => Node::from(table),
            toml::Value::Integer(_) => Node::Scalar("integer"),
            toml::Value::Float(_) => Node::Scalar("float"),
            toml::Value::Boolean(_) => Node::Scalar("boolean"),
            toml::Value::Datetime(_) => Node::Scalar("datetime"),
        }
    }
}

impl From<toml::Table> for Node {
    fn from(table: toml::Table) -> Self {
        Node::Table(table.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
    }
}

/// Parse TOML text into a raw table.
///
/// `target` names the document in error messages.
pub fn parse_table(text: &str, target: &str) -> Result<toml::Table, LoadError> {
    toml::from_str::<toml::Table>(text).map_err(|e| LoadError::Parse {
        target: target.to_string(),
        position: e.span().map(|span| position_at(text, span.start)),
        message: e.message().to_string(),
    })
}

/// Parse TOML text into a [`Node`] tree.
pub fn parse_document(text: &str, target: &str) -> Result<Node, LoadError> {
    parse_table(text, target).map(Node::from)
}

/// Convert a byte offset into a 1-based line and column.
fn position_at(text: &str, offset: usize) -> Position {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let before = &text[..end];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(idx) => before[idx + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    Position { line, column }
}
