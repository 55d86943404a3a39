//! Flag Model - named color sequences and their striped banners

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::HeartError;
use crate::markup;
use crate::node::Node;
use crate::shapes::{group, Frame, Length, Rect, ViewBox};

/// Overlay drawn on top of the stripes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Symbol {
    #[default]
    None,
    Node(Node),
}

impl Symbol {
    pub fn is_none(&self) -> bool {
        matches!(self, Symbol::None)
    }

    pub fn node(&self) -> Option<&Node> {
        match self {
            Symbol::None => None,
            Symbol::Node(node) => Some(node),
        }
    }

    /// Resolve a stored symbol. Accepts the structural object form and the
    /// legacy form where that object was itself encoded as a JSON string.
    pub fn from_json_value(value: Value) -> Result<Self, HeartError> {
        match value {
            Value::Null => Ok(Symbol::None),
            Value::String(encoded) => Ok(Symbol::Node(Node::from_json_str(&encoded)?)),
            Value::Object(_) => Ok(Symbol::Node(Node::from_json_value(value)?)),
            other => Err(HeartError::MalformedNode(format!(
                "symbol must be an object, got {other}"
            ))),
        }
    }
}

impl From<Node> for Symbol {
    fn from(node: Node) -> Self {
        Symbol::Node(node)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Symbol::None => serializer.serialize_none(),
            Symbol::Node(node) => node.serialize(serializer),
        }
    }
}

/// Vertical placement of the stripes, in percent of the frame height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StripeLayout {
    #[serde(default = "default_height_perc")]
    pub height_perc: f64,
    #[serde(default = "default_shift")]
    pub shift: f64,
}

fn default_height_perc() -> f64 { 73.0 }
fn default_shift() -> f64 { 5.0 }

impl Default for StripeLayout {
    fn default() -> Self {
        Self {
            height_perc: default_height_perc(),
            shift: default_shift(),
        }
    }
}

/// One horizontal stripe: top edge and height, both in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub top: f64,
    pub height: f64,
}

impl Band {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Stripe bands for `count` colors; band `i` starts at
/// `-height_perc/2 + shift + i * height_perc/count`.
pub fn bands(count: usize, layout: StripeLayout) -> Vec<Band> {
    if count == 0 {
        return vec![];
    }
    let height = layout.height_perc / count as f64;
    let start = -layout.height_perc / 2.0 + layout.shift;
    (0..count)
        .map(|i| Band {
            top: start + i as f64 * height,
            height,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredFlag")]
pub struct FlagSpec {
    pub name: String,
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Symbol::is_none")]
    pub symbol: Symbol,
    /// Any other catalog fields, carried through untouched.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// On-disk shape before the symbol is resolved.
#[derive(Deserialize)]
struct StoredFlag {
    name: String,
    colors: Vec<String>,
    #[serde(default)]
    symbol: Value,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl TryFrom<StoredFlag> for FlagSpec {
    type Error = HeartError;

    fn try_from(stored: StoredFlag) -> Result<Self, Self::Error> {
        let symbol = Symbol::from_json_value(stored.symbol)?;
        let mut spec = FlagSpec::new(stored.name, stored.colors)?.with_symbol(symbol);
        spec.extra = stored.extra;
        Ok(spec)
    }
}

impl FlagSpec {
    pub fn new(name: impl Into<String>, colors: Vec<String>) -> Result<Self, HeartError> {
        let name = name.into();
        if colors.is_empty() {
            return Err(HeartError::EmptyColors(name));
        }
        Ok(Self {
            name,
            colors,
            symbol: Symbol::None,
            extra: IndexMap::new(),
        })
    }

    pub fn with_symbol(mut self, symbol: impl Into<Symbol>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Attach a pass-through field; it is written back out next to `name`.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn stripe_count(&self) -> usize {
        self.colors.len()
    }

    pub fn bands(&self, layout: StripeLayout) -> Vec<Band> {
        bands(self.colors.len(), layout)
    }

    /// One `rect` per color, top to bottom.
    pub fn stripes(&self, layout: StripeLayout) -> Vec<Node> {
        self.bands(layout)
            .into_iter()
            .zip(&self.colors)
            .map(|(band, color)| {
                Node::from(
                    Rect::new(-25.0, Length::Percent(band.top), 50.0, Length::Percent(band.height))
                        .fill(color.as_str())
                        .stroke(color.as_str()),
                )
            })
            .collect()
    }

    /// Stripe group with the symbol, if any, drawn last.
    pub fn flag(&self, layout: StripeLayout) -> Node {
        self.flag_with(layout, Vec::<(String, String)>::new())
    }

    pub fn flag_with<K, V>(&self, layout: StripeLayout, attrs: impl IntoIterator<Item = (K, V)>) -> Node
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut internal = self.stripes(layout);
        if let Some(symbol) = self.symbol.node() {
            internal.push(symbol.clone());
        }
        group(internal).with_attrs(attrs)
    }

    /// Standalone preview in the heart-sized square.
    pub fn frame(&self, layout: StripeLayout) -> Node {
        Frame::new(ViewBox::HEART).child(self.flag(layout)).into()
    }

    pub fn encode(&self, layout: StripeLayout) -> Vec<u8> {
        markup::encode(&self.frame(layout))
    }
}
