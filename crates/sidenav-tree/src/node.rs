//! Navigation node model.
//!
//! A sidebar is an ordered list of [`NavNode`]s. Nodes are resolved into
//! their variant once, at parse time; everything downstream matches on the
//! enum instead of re-inspecting descriptor shapes.
//!
//! # Serialization
//!
//! Nodes serialize back into the descriptor shape they were parsed from:
//! objects carry a `type` tag, keys are camelCase, unset options are omitted
//! and [`NavNode::Ref`] is written as a bare string. A normalized tree can
//! therefore be written out and parsed again without loss.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// A node in a sidebar tree.
#[derive(Clone, Debug, PartialEq)]
pub enum NavNode {
    /// Bare content identifier, shorthand for a [`DocRef`] with no overrides.
    ///
    /// Only present before normalization.
    Ref(String),
    /// Link to a single documentation page.
    Doc(DocRef),
    /// Named group of child nodes.
    Category(Category),
    /// Placeholder expanded by the renderer from a docs directory.
    Autogenerated(Autogenerated),
    /// External URL.
    Link(ExternalLink),
}

/// Link to a documentation page by content identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocRef {
    /// Content identifier, resolved against pages by the renderer.
    pub id: String,
    /// Display label override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Styling tag, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Opaque properties for the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<Value>,
}

impl DocRef {
    /// Create a reference with no overrides.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Named group of navigation nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Display label.
    pub label: String,
    /// Landing page for the category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLink>,
    /// Whether the category starts collapsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Whether the category can be collapsed at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    /// Styling tag, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Opaque properties for the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<Value>,
    /// Child nodes in render order.
    pub items: Vec<NavNode>,
}

impl Category {
    /// Create a category with the given children and no options set.
    #[must_use]
    pub fn new(label: impl Into<String>, items: Vec<NavNode>) -> Self {
        Self {
            label: label.into(),
            items,
            ..Self::default()
        }
    }

    /// Generated index settings, if the category links to one.
    #[must_use]
    pub fn generated_index(&self) -> Option<&GeneratedIndex> {
        match &self.link {
            Some(CategoryLink::GeneratedIndex(index)) => Some(index),
            _ => None,
        }
    }

    /// Slug of the generated index page.
    ///
    /// Falls back to `/category/<label>` when the index sets no slug.
    /// Returns `None` when the category has no generated index.
    #[must_use]
    pub fn index_slug(&self) -> Option<String> {
        self.generated_index().map(|index| {
            index
                .slug
                .clone()
                .unwrap_or_else(|| default_index_slug(&self.label))
        })
    }
}

/// Landing page of a category.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryLink {
    /// Use an existing document as the landing page.
    Doc {
        /// Content identifier of the landing document.
        id: String,
    },
    /// Render an index page listing the category's children.
    GeneratedIndex(GeneratedIndex),
}

/// Metadata for a generated category index page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratedIndex {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URL slug, unique within a sidebar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Search keywords.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Social card image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Items generated from a docs directory by the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Autogenerated {
    /// Directory to scan, relative to the docs root.
    pub dir_name: String,
}

/// Link to an external URL.
#[derive(Clone, Debug, PartialEq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExternalLink {
    /// Target URL.
    pub href: String,
    /// Display label.
    pub label: String,
    /// Styling tag, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Opaque properties for the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<Value>,
}

impl NavNode {
    /// Content identifier for doc nodes.
    #[must_use]
    pub fn doc_id(&self) -> Option<&str> {
        match self {
            Self::Ref(id) => Some(id),
            Self::Doc(doc) => Some(&doc.id),
            _ => None,
        }
    }

    /// Display label, if the node has one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Ref(_) | Self::Autogenerated(_) => None,
            Self::Doc(doc) => doc.label.as_deref(),
            Self::Category(category) => Some(&category.label),
            Self::Link(link) => Some(&link.label),
        }
    }

    /// Name of this node in error paths: its label, else its identifier.
    #[must_use]
    pub fn path_segment(&self) -> &str {
        match self {
            Self::Ref(id) => id,
            Self::Doc(doc) => doc.label.as_deref().unwrap_or(&doc.id),
            Self::Category(category) => &category.label,
            Self::Autogenerated(auto) => &auto.dir_name,
            Self::Link(link) => &link.label,
        }
    }

    /// Category payload, if this node is a category.
    #[must_use]
    pub fn as_category(&self) -> Option<&Category> {
        match self {
            Self::Category(category) => Some(category),
            _ => None,
        }
    }

    /// Visit this node and all of its descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a NavNode)) {
        visit(self);
        if let Self::Category(category) = self {
            for child in &category.items {
                child.walk(visit);
            }
        }
    }
}

impl From<DocRef> for NavNode {
    fn from(doc: DocRef) -> Self {
        Self::Doc(doc)
    }
}

impl From<Category> for NavNode {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

/// Borrowed view used to tag object nodes with their `type`.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedNode<'a> {
    Doc(&'a DocRef),
    Category(&'a Category),
    Autogenerated(&'a Autogenerated),
    Link(&'a ExternalLink),
}

impl Serialize for NavNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ref(id) => serializer.serialize_str(id),
            Self::Doc(doc) => TaggedNode::Doc(doc).serialize(serializer),
            Self::Category(category) => TaggedNode::Category(category).serialize(serializer),
            Self::Autogenerated(auto) => TaggedNode::Autogenerated(auto).serialize(serializer),
            Self::Link(link) => TaggedNode::Link(link).serialize(serializer),
        }
    }
}

/// Default generated index slug for a category label.
#[must_use]
pub fn default_index_slug(label: &str) -> String {
    format!("/category/{}", slugify(label))
}

/// Convert a label to a URL-safe slug.
///
/// Lowercases ASCII letters, turns whitespace/dashes/underscores into single
/// dashes and drops every other character.
fn slugify(label: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in label.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}
