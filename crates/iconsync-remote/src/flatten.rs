//! Flattening a design document into remote items.
//!
//! The walk descends through visible container nodes (pages, frames, groups,
//! sections) and stops at components and component sets. A component becomes
//! one item; each visible variant of a component set becomes one item named
//! `"{setName}__{variantName}"`.

use iconsync_fs::checksum::compute_checksum;
use serde_json::{Map, Value};

use crate::node::{Node, NodeKind};
use crate::source::RemoteItem;

/// Node attributes that identify or describe a node without affecting how it
/// renders. They are excluded from the content hash.
const IDENTITY_FIELDS: &[&str] = &[
    "key",
    "componentId",
    "description",
    "documentationLinks",
    "pluginData",
    "sharedPluginData",
];

/// Bounding boxes given in canvas coordinates.
const ABSOLUTE_BOXES: &[&str] = &["absoluteBoundingBox", "absoluteRenderBounds"];

/// Options controlling which parts of the document are walked.
#[derive(Debug, Clone, Default)]
pub struct FlattenOptions {
    /// Page (canvas) names to include. Empty means every page.
    pub pages: Vec<String>,
}

/// Flatten `document` into remote items, in document order.
pub fn flatten(document: &Node, options: &FlattenOptions) -> Vec<RemoteItem> {
    let mut items = Vec::new();
    walk(document, options, &mut items);
    items
}

fn walk(node: &Node, options: &FlattenOptions, items: &mut Vec<RemoteItem>) {
    if !node.visible {
        return;
    }

    match node.kind() {
        NodeKind::Component => push_item(items, node, &node.name),
        NodeKind::ComponentSet => {
            for variant in node.children.iter().filter(|c| c.visible) {
                if variant.kind() == NodeKind::Component {
                    let name = format!("{}__{}", node.name, variant.name);
                    push_item(items, variant, &name);
                }
            }
        }
        NodeKind::Canvas if !options.pages.is_empty() && !options.pages.contains(&node.name) => {
            tracing::debug!(page = %node.name, "skipping page not in filter");
        }
        kind if kind.is_container() => {
            for child in &node.children {
                walk(child, options, items);
            }
        }
        _ => {}
    }
}

fn push_item(items: &mut Vec<RemoteItem>, node: &Node, raw_name: &str) {
    let name = normalize_name(raw_name);
    if name.is_empty() {
        tracing::warn!(id = %node.id, raw_name, "skipping component with empty name");
        return;
    }
    items.push(RemoteItem {
        identifier: node.id.clone(),
        name,
        content_hash: content_hash(node),
    });
}

/// Trim every `/`-separated segment of a raw layer name and drop empty,
/// `.` and `..` segments.
pub fn normalize_name(raw: &str) -> String {
    raw.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect::<Vec<_>>()
        .join("/")
}

/// Structural hash of a node: identical visuals hash identically regardless
/// of the node's name, identifier, documentation or canvas position.
pub fn content_hash(node: &Node) -> String {
    let origin = node.properties.get("absoluteBoundingBox").and_then(point);
    let mut root = descriptor(node, origin);
    // The root's transform places it on the canvas
    if let Value::Object(map) = &mut root {
        map.remove("relativeTransform");
    }
    let descriptor = canonicalize(root);
    // Serializing a `Value` cannot fail
    let bytes = serde_json::to_vec(&descriptor).unwrap_or_default();
    compute_checksum(&bytes)
}

/// Descriptor with absolute boxes rewritten relative to `origin`, the
/// component's top-left corner. Without an origin only the box size is kept.
fn descriptor(node: &Node, origin: Option<(f64, f64)>) -> Value {
    let mut map = Map::new();
    for (key, value) in &node.properties {
        if IDENTITY_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let value = if ABSOLUTE_BOXES.contains(&key.as_str()) {
            relative_box(value, origin)
        } else {
            value.clone()
        };
        map.insert(key.clone(), value);
    }
    map.insert("type".into(), Value::String(node.node_type.clone()));
    map.insert("visible".into(), Value::Bool(node.visible));
    if !node.children.is_empty() {
        map.insert(
            "children".into(),
            Value::Array(node.children.iter().map(|c| descriptor(c, origin)).collect()),
        );
    }
    Value::Object(map)
}

fn point(value: &Value) -> Option<(f64, f64)> {
    Some((value.get("x")?.as_f64()?, value.get("y")?.as_f64()?))
}

fn relative_box(value: &Value, origin: Option<(f64, f64)>) -> Value {
    let Value::Object(rect) = value else {
        return value.clone();
    };
    let mut rect = rect.clone();
    match (point(value), origin) {
        (Some((x, y)), Some((ox, oy))) => {
            rect.insert("x".into(), rounded(x - ox));
            rect.insert("y".into(), rounded(y - oy));
        }
        _ => {
            rect.remove("x");
            rect.remove("y");
        }
    }
    Value::Object(rect)
}

/// Round to thousandths so float noise from the subtraction cannot leak
/// into the hash.
fn rounded(v: f64) -> Value {
    let r = (v * 1000.0).round() / 1000.0;
    serde_json::Number::from_f64(r + 0.0).map_or(Value::Null, Value::Number)
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("arrow", "arrow")]
    #[case(" arrows / left ", "arrows/left")]
    #[case("arrows//left/", "arrows/left")]
    #[case(" / ", "")]
    #[case("../icons/./logo", "icons/logo")]
    #[case("Size: 16", "Size: 16")]
    fn normalizes_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_name(raw), expected);
    }
}
