//! Tree normalization.
//!
//! Produces the form renderers consume: bare ids become [`DocRef`]s, every
//! category has explicit `collapsed`/`collapsible` flags and every generated
//! index has a slug. Normalizing a normalized tree returns it unchanged.

use crate::node::{Category, CategoryLink, DocRef, NavNode, default_index_slug};

/// Sidebar-wide defaults for category flags left unset in the descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryDefaults {
    /// Initial state of collapsible categories.
    pub collapsed: bool,
    /// Whether categories can be collapsed.
    pub collapsible: bool,
}

impl Default for CategoryDefaults {
    fn default() -> Self {
        Self {
            collapsed: true,
            collapsible: true,
        }
    }
}

/// Normalize a list of nodes, preserving order.
#[must_use]
pub fn normalize(nodes: Vec<NavNode>, defaults: &CategoryDefaults) -> Vec<NavNode> {
    nodes
        .into_iter()
        .map(|node| normalize_node(node, defaults))
        .collect()
}

fn normalize_node(node: NavNode, defaults: &CategoryDefaults) -> NavNode {
    match node {
        NavNode::Ref(id) => NavNode::Doc(DocRef::new(id)),
        NavNode::Category(category) => NavNode::Category(normalize_category(category, defaults)),
        other => other,
    }
}

fn normalize_category(mut category: Category, defaults: &CategoryDefaults) -> Category {
    let collapsible = category.collapsible.unwrap_or(defaults.collapsible);
    // Non-collapsible categories are always expanded.
    let collapsed = category
        .collapsed
        .unwrap_or(collapsible && defaults.collapsed);

    if let Some(CategoryLink::GeneratedIndex(index)) = &mut category.link
        && index.slug.is_none()
    {
        index.slug = Some(default_index_slug(&category.label));
    }

    Category {
        collapsed: Some(collapsed),
        collapsible: Some(collapsible),
        items: normalize(category.items, defaults),
        ..category
    }
}
