//! Design-document node model.
//!
//! Only the fields the walk needs are typed; everything else a node carries
//! (geometry, fills, strokes, effects, ...) is kept verbatim in
//! [`Node::properties`] so it can feed the structural hash.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node types the flattening walk distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    /// Any other node type (vectors, text, instances, ...).
    Other,
}

impl NodeKind {
    pub fn parse(node_type: &str) -> Self {
        match node_type {
            "DOCUMENT" => Self::Document,
            "CANVAS" => Self::Canvas,
            "FRAME" => Self::Frame,
            "GROUP" => Self::Group,
            "SECTION" => Self::Section,
            "COMPONENT" => Self::Component,
            "COMPONENT_SET" => Self::ComponentSet,
            _ => Self::Other,
        }
    }

    /// Nodes the walk descends into looking for components.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Document | Self::Canvas | Self::Frame | Self::Group | Self::Section
        )
    }
}

fn default_visible() -> bool {
    true
}

/// A node of the remote design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub children: Vec<Node>,
    /// All remaining node attributes.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        NodeKind::parse(&self.node_type)
    }
}

/// Response body of the file endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FileResponse {
    pub document: Node,
}

/// Response body of the image-export endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImagesResponse {
    #[serde(default)]
    pub err: Option<String>,
    #[serde(default)]
    pub images: std::collections::BTreeMap<String, Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_land_in_properties() {
        let node: Node = serde_json::from_value(json!({
            "id": "1:2",
            "name": "arrow",
            "type": "COMPONENT",
            "fills": [{"type": "SOLID"}],
            "strokeWeight": 1.5
        }))
        .unwrap();

        assert_eq!(node.kind(), NodeKind::Component);
        assert!(node.visible);
        assert!(node.children.is_empty());
        assert_eq!(node.properties["strokeWeight"], json!(1.5));
        assert!(node.properties.contains_key("fills"));
        assert!(!node.properties.contains_key("name"));
    }

    #[test]
    fn unknown_type_is_other() {
        assert_eq!(NodeKind::parse("VECTOR"), NodeKind::Other);
        assert!(!NodeKind::Other.is_container());
        assert!(NodeKind::Section.is_container());
    }
}
