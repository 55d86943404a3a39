//! Drawing Node - the vector-drawing tree
//!
//! A node is a tag, an ordered attribute map and ordered children. Children
//! are owned by value, so every tree is acyclic. The structural JSON form is
//! `{"tagName": .., "attributes": {..}, "children": [..]}`.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::HeartError;

/// String-valued attributes in insertion order; keys are unique.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tag {
    Svg,
    Group,
    Rect,
    Path,
    Circle,
    Text,
    ClipPath,
    Animate,
    Style,
    /// Any element this crate does not build itself.
    Other(String),
}

impl Tag {
    pub fn as_str(&self) -> &str {
        match self {
            Tag::Svg => "svg",
            Tag::Group => "g",
            Tag::Rect => "rect",
            Tag::Path => "path",
            Tag::Circle => "circle",
            Tag::Text => "text",
            Tag::ClipPath => "clipPath",
            Tag::Animate => "animate",
            Tag::Style => "style",
            Tag::Other(name) => name,
        }
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        match name.as_str() {
            "svg" => Tag::Svg,
            "g" => Tag::Group,
            "rect" => Tag::Rect,
            "path" => Tag::Path,
            "circle" => Tag::Circle,
            "text" => Tag::Text,
            "clipPath" => Tag::ClipPath,
            "animate" => Tag::Animate,
            "style" => Tag::Style,
            _ => Tag::Other(name),
        }
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A child is either an element or a run of character data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Text(String),
    Node(Node),
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "tagName")]
    pub tag: Tag,
    #[serde(default, deserialize_with = "deserialize_attributes")]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Child>,
}

impl Node {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: Attributes::new(),
            children: vec![],
        }
    }

    /// Set an attribute, replacing any earlier value for the key.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_attrs<K, V>(mut self, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in attrs {
            self.attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<C: Into<Child>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Element children, skipping text runs.
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|child| match child {
            Child::Node(node) => Some(node),
            Child::Text(_) => None,
        })
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Child::Text(text) => Some(text.as_str()),
                Child::Node(_) => None,
            })
            .collect()
    }

    /// Depth-first, pre-order walk over this node and all element descendants.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for child in self.elements() {
            out.extend(child.descendants());
        }
        out
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.descendants().into_iter().find(|node| node.id() == Some(id))
    }

    pub fn find_all(&self, tag: &Tag) -> Vec<&Node> {
        self.descendants()
            .into_iter()
            .filter(|node| &node.tag == tag)
            .collect()
    }

    pub fn to_json_value(&self) -> Result<Value, HeartError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json_value(value: Value) -> Result<Self, HeartError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, HeartError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Attribute values are strings; numbers and booleans are stringified and a
/// `style` object is flattened to `key:value;key:value`.
fn deserialize_attributes<'de, D>(deserializer: D) -> Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
    let mut attributes = Attributes::with_capacity(raw.len());
    for (key, value) in raw {
        let value = attribute_string(&key, value).map_err(serde::de::Error::custom)?;
        attributes.insert(key, value);
    }
    Ok(attributes)
}

fn attribute_string(key: &str, value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Object(map) => {
            let mut parts = Vec::with_capacity(map.len());
            for (prop, v) in map {
                parts.push(format!("{}:{}", prop, attribute_string(&prop, v)?));
            }
            Ok(parts.join(";"))
        }
        other => Err(format!("attribute {key:?} has unsupported value {other}")),
    }
}
