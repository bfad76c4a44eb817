//! Descriptor parsing.
//!
//! Turns raw descriptor values into [`NavNode`]s. Each value is classified
//! once by shape:
//!
//! - a string is a [`NavNode::Ref`]
//! - an object's `type` selects `doc`, `category`, `autogenerated` or `link`
//! - an object without `type` holding a single array is a category shorthand,
//!   `{ "Label": [items...] }`
//!
//! Unknown types, unknown fields and missing required fields are rejected
//! with a [`MalformedNodeError`] naming the value's location.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{MalformedNodeError, NodePath};
use crate::node::{Autogenerated, Category, CategoryLink, DocRef, ExternalLink, GeneratedIndex, NavNode};

/// Category options other than `type`, `items` and `link`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CategoryFields {
    label: String,
    #[serde(default)]
    collapsed: Option<bool>,
    #[serde(default)]
    collapsible: Option<bool>,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    custom_props: Option<Value>,
}

/// Fields of a `{type: "doc"}` category link.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DocLinkFields {
    id: String,
}

/// Parse the value of one sidebar entry.
///
/// A sidebar is normally a list of nodes. An object is accepted as a list of
/// shorthand categories, one per key, in key order.
///
/// # Errors
///
/// Returns [`MalformedNodeError`] for the first value that is not a node.
pub fn parse_sidebar(name: &str, raw: &Value) -> Result<Vec<NavNode>, MalformedNodeError> {
    let root = NodePath::root(name);
    match raw {
        Value::Array(items) => parse_items(items, &root),
        Value::Object(categories) => categories
            .iter()
            .map(|(label, items)| parse_shorthand(label, items, &root.child(label.as_str())))
            .collect(),
        other => Err(MalformedNodeError::new(
            &root,
            format!("sidebar must be a list of items, found {}", value_kind(other)),
        )),
    }
}

/// Parse an ordered list of nodes under `parent`.
///
/// # Errors
///
/// Returns [`MalformedNodeError`] for the first item that is not a node.
pub fn parse_items(items: &[Value], parent: &NodePath) -> Result<Vec<NavNode>, MalformedNodeError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_node(item, &parent.child(raw_segment(item, index))))
        .collect()
}

/// Parse a single node located at `path`.
///
/// # Errors
///
/// Returns [`MalformedNodeError`] if the value matches no node shape.
pub fn parse_node(raw: &Value, path: &NodePath) -> Result<NavNode, MalformedNodeError> {
    match raw {
        Value::String(id) if id.is_empty() => {
            Err(MalformedNodeError::new(path, "doc id cannot be empty"))
        }
        Value::String(id) => Ok(NavNode::Ref(id.clone())),
        Value::Object(fields) => parse_object(fields, path),
        other => Err(MalformedNodeError::new(
            path,
            format!("expected a doc id or an object, found {}", value_kind(other)),
        )),
    }
}

fn parse_object(fields: &Map<String, Value>, path: &NodePath) -> Result<NavNode, MalformedNodeError> {
    let Some(kind) = fields.get("type") else {
        return match shorthand_entry(fields) {
            Some((label, items)) => parse_shorthand(label, items, path),
            None => Err(MalformedNodeError::new(path, "item is missing `type`")),
        };
    };
    let kind = kind
        .as_str()
        .ok_or_else(|| MalformedNodeError::new(path, "`type` must be a string"))?;

    let mut fields = fields.clone();
    fields.remove("type");

    match kind {
        "doc" => {
            let doc: DocRef = decode(fields, path, "doc")?;
            require_non_empty(&doc.id, "doc id", path)?;
            Ok(NavNode::Doc(doc))
        }
        "category" => parse_category(fields, path).map(NavNode::Category),
        "autogenerated" => {
            let auto: Autogenerated = decode(fields, path, "autogenerated item")?;
            tracing::debug!(path = %path, dir = %auto.dir_name, "Leaving autogenerated items to the renderer");
            Ok(NavNode::Autogenerated(auto))
        }
        "link" => {
            let link: ExternalLink = decode(fields, path, "link")?;
            require_non_empty(&link.href, "link href", path)?;
            Ok(NavNode::Link(link))
        }
        other => Err(MalformedNodeError::new(
            path,
            format!("unknown item type `{other}`"),
        )),
    }
}

fn parse_category(
    mut fields: Map<String, Value>,
    path: &NodePath,
) -> Result<Category, MalformedNodeError> {
    let items = match fields.remove("items") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(MalformedNodeError::new(
                path,
                format!("category `items` must be a list, found {}", value_kind(&other)),
            ));
        }
        None => return Err(MalformedNodeError::new(path, "category is missing `items`")),
    };
    let link = fields
        .remove("link")
        .map(|link| parse_category_link(&link, path))
        .transpose()?;
    let CategoryFields {
        label,
        collapsed,
        collapsible,
        class_name,
        custom_props,
    } = decode(fields, path, "category")?;

    Ok(Category {
        label,
        link,
        collapsed,
        collapsible,
        class_name,
        custom_props,
        items: parse_items(&items, path)?,
    })
}

fn parse_category_link(raw: &Value, path: &NodePath) -> Result<CategoryLink, MalformedNodeError> {
    let Value::Object(fields) = raw else {
        return Err(MalformedNodeError::new(
            path,
            format!("category `link` must be an object, found {}", value_kind(raw)),
        ));
    };
    let kind = fields
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| MalformedNodeError::new(path, "category `link` is missing `type`"))?;

    let mut fields = fields.clone();
    fields.remove("type");

    match kind {
        "doc" => {
            let DocLinkFields { id } = decode(fields, path, "category doc link")?;
            require_non_empty(&id, "category link id", path)?;
            Ok(CategoryLink::Doc { id })
        }
        "generated-index" => {
            decode::<GeneratedIndex>(fields, path, "generated-index link").map(CategoryLink::GeneratedIndex)
        }
        other => Err(MalformedNodeError::new(
            path,
            format!("unknown category link type `{other}`"),
        )),
    }
}

/// Parse `{ "Label": [items...] }` into a category with no options.
fn parse_shorthand(label: &str, items: &Value, path: &NodePath) -> Result<NavNode, MalformedNodeError> {
    let Value::Array(items) = items else {
        return Err(MalformedNodeError::new(
            path,
            format!("shorthand category `{label}` must map to a list, found {}", value_kind(items)),
        ));
    };
    Ok(NavNode::Category(Category::new(label, parse_items(items, path)?)))
}

/// The single `label -> list` entry of a shorthand category object.
fn shorthand_entry(fields: &Map<String, Value>) -> Option<(&str, &Value)> {
    let mut entries = fields.iter();
    match (entries.next(), entries.next()) {
        (Some((label, items @ Value::Array(_))), None) => Some((label.as_str(), items)),
        _ => None,
    }
}

fn decode<T: DeserializeOwned>(
    fields: Map<String, Value>,
    path: &NodePath,
    what: &str,
) -> Result<T, MalformedNodeError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| MalformedNodeError::new(path, format!("invalid {what}: {e}")))
}

fn require_non_empty(value: &str, field: &str, path: &NodePath) -> Result<(), MalformedNodeError> {
    if value.is_empty() {
        return Err(MalformedNodeError::new(path, format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Path segment for a raw value, before it is known to be well-formed.
fn raw_segment(raw: &Value, index: usize) -> String {
    let named = match raw {
        Value::String(id) if !id.is_empty() => Some(id.as_str()),
        Value::Object(fields) => ["label", "id", "dirName", "href"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .or_else(|| {
                if fields.contains_key("type") {
                    None
                } else {
                    shorthand_entry(fields).map(|(label, _)| label)
                }
            }),
        _ => None,
    };
    named.map_or_else(|| format!("[{index}]"), str::to_owned)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
