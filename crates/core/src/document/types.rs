use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Element attributes, keyed by property name. Values are plain strings, so
/// hast booleans flatten to "" (present) or are dropped (absent).
pub type Properties = BTreeMap<String, String>;

/// A node of an HTML document tree.
///
/// The JSON form uses hast field names (`type`, `tagName`, `properties`,
/// `children`, `value`) so trees can be exchanged with rehype-style pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Root {
        #[serde(default)]
        children: Vec<Node>,
    },
    Element(Element),
    Text {
        value: String,
    },
    Comment {
        value: String,
    },
    /// Pre-rendered HTML, serialized verbatim.
    Raw {
        value: String,
    },
}

/// An element node with its tag, attributes and children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub tag_name: String,
    #[serde(default, deserialize_with = "deserialize_properties")]
    pub properties: Properties,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root { children }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text { value: value.into() }
    }

    pub fn raw(value: impl Into<String>) -> Self {
        Node::Raw { value: value.into() }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Children of a root or element node; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root { children } => children,
            Node::Element(el) => &el.children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root { children } => Some(children),
            Node::Element(el) => Some(&mut el.children),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text { value } => out.push_str(value),
        other => {
            for child in other.children() {
                collect_text(child, out);
            }
        }
    }
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self { tag_name: tag_name.into(), ..Self::default() }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(self, value: impl Into<String>) -> Self {
        self.with_child(Node::text(value))
    }

    /// Look up a property ignoring ASCII case, so `appid` from raw HTML matches `appId`.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .or_else(|| {
                self.properties
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            collect_text(child, &mut out);
        }
        out
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// hast allows non-string property values; flatten them to attribute strings.
fn deserialize_properties<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = BTreeMap::deserialize(deserializer)?;
    let mut props = Properties::new();

    for (key, value) in raw {
        let flat = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(true) => String::new(),
            Value::Bool(false) | Value::Null => continue,
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" "),
            Value::Object(_) => value.to_string(),
        };
        props.insert(key, flat);
    }

    Ok(props)
}
