//! Parses the categories and layout documents into [`Mapping`]s.
//!
//! JSON objects are first read into an order-preserving tree that keeps
//! every key/value pair, repeated keys included. A separate pass then looks
//! for repeated keys before any mapping is built, so a document with a
//! duplicate key is refused instead of one value silently winning.

use crate::domain::model::Mapping;
use crate::utils::error::{LayoutError, Result};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::collections::HashSet;
use std::fmt;

const BOM: char = '\u{feff}';

/// Raw JSON value with object entries kept in document order.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Null,
    Bool,
    Number,
    String(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl Node {
    fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool => "boolean",
            Node::Number => "number",
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
        }
    }

    fn collect_duplicate_keys(&self, out: &mut Vec<String>) {
        match self {
            Node::Object(entries) => {
                let mut seen = HashSet::new();
                for (key, value) in entries {
                    if !seen.insert(key.as_str()) && !out.contains(key) {
                        out.push(key.clone());
                    }
                    value.collect_duplicate_keys(out);
                }
            }
            Node::Array(items) => {
                for item in items {
                    item.collect_duplicate_keys(out);
                }
            }
            _ => {}
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> std::result::Result<Node, E> {
        Ok(Node::Bool)
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> std::result::Result<Node, E> {
        Ok(Node::Number)
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> std::result::Result<Node, E> {
        Ok(Node::Number)
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> std::result::Result<Node, E> {
        Ok(Node::Number)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Node, E> {
        Ok(Node::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Node, E> {
        Ok(Node::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or_default());
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            entries.push((key, value));
        }
        Ok(Node::Object(entries))
    }
}

/// Parses `text` as a name -> list-of-strings document.
///
/// `source_name` only labels errors (usually the file name).
pub fn parse_mapping(text: &str, source_name: &str) -> Result<Mapping> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let root: Node = serde_json::from_str(text).map_err(|error| LayoutError::Parse {
        source_name: source_name.to_string(),
        error,
    })?;

    let mut duplicates = Vec::new();
    root.collect_duplicate_keys(&mut duplicates);
    if !duplicates.is_empty() {
        return Err(LayoutError::DuplicateKey {
            source_name: source_name.to_string(),
            keys: duplicates,
        });
    }

    let entries = match root {
        Node::Object(entries) => entries,
        other => {
            return Err(LayoutError::ShapeError {
                source_name: source_name.to_string(),
                message: format!(
                    "must be a JSON object at top level, found {}",
                    other.type_name()
                ),
            })
        }
    };

    let mut mapping = Mapping::new();
    for (key, value) in entries {
        let values = string_list(value).ok_or_else(|| LayoutError::ShapeError {
            source_name: source_name.to_string(),
            message: format!("values must be lists of strings. Bad value for '{}'", key),
        })?;
        mapping.insert(key, values);
    }
    tracing::debug!("{}: parsed {} entries", source_name, mapping.len());
    Ok(mapping)
}

/// Parses raw bytes, rejecting anything that is not UTF-8.
pub fn parse_mapping_bytes(data: &[u8], source_name: &str) -> Result<Mapping> {
    let text = std::str::from_utf8(data).map_err(|e| LayoutError::ShapeError {
        source_name: source_name.to_string(),
        message: format!("not valid UTF-8: {}", e),
    })?;
    parse_mapping(text, source_name)
}

fn string_list(node: Node) -> Option<Vec<String>> {
    match node {
        Node::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Node::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}
