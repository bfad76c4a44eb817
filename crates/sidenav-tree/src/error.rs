//! Error types for sidebar parsing, validation and loading.

use std::fmt;
use std::path::PathBuf;

/// Location of a node: the sidebar name followed by the labels (or ids)
/// of every node down to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<String>);

impl NodePath {
    /// Path of a sidebar's root.
    #[must_use]
    pub fn root(sidebar: &str) -> Self {
        Self(vec![sidebar.to_owned()])
    }

    /// Path of a child of this node.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Path segments, starting with the sidebar name.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Name of the sidebar this path belongs to.
    #[must_use]
    pub fn sidebar(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.0.join(" > "))
    }
}

/// A descriptor value that does not have the shape of any node.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Malformed sidebar item at {path}: {reason}")]
pub struct MalformedNodeError {
    /// Location of the offending value.
    pub path: NodePath,
    /// What is wrong with it.
    pub reason: String,
}

impl MalformedNodeError {
    pub(crate) fn new(path: &NodePath, reason: impl Into<String>) -> Self {
        Self {
            path: path.clone(),
            reason: reason.into(),
        }
    }
}

/// Well-formed sidebar configuration that breaks a tree invariant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Two generated index pages in one sidebar share a slug.
    #[error("Duplicate generated-index slug \"{slug}\" at {path} (already used at {first})")]
    SlugCollision {
        /// The colliding slug.
        slug: String,
        /// Category that claimed the slug first.
        first: NodePath,
        /// Category that reused it.
        path: NodePath,
    },
    /// A category is collapsed by default but cannot be collapsed.
    #[error("Category at {path} is collapsed but not collapsible")]
    ContradictoryCollapse {
        /// Offending category.
        path: NodePath,
    },
    /// A category has no children.
    #[error("Category at {path} has no items")]
    EmptyCategory {
        /// Offending category.
        path: NodePath,
    },
    /// The same sidebar name appears twice in a descriptor.
    #[error("Sidebar \"{name}\" is defined more than once")]
    DuplicateSidebar {
        /// Repeated sidebar name.
        name: String,
    },
}

impl ConfigError {
    /// Location of the violation, if it concerns a single node.
    #[must_use]
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            Self::SlugCollision { path, .. }
            | Self::ContradictoryCollapse { path }
            | Self::EmptyCategory { path } => Some(path),
            Self::DuplicateSidebar { .. } => None,
        }
    }
}

/// Error returned when building or loading sidebars.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// A node could not be parsed.
    #[error(transparent)]
    Malformed(#[from] MalformedNodeError),
    /// The first invariant violation found.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Every invariant violation found.
    #[error("{}", format_violations(.0))]
    Invalid(Vec<ConfigError>),
    /// Descriptor file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Descriptor path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Descriptor is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Descriptor is not valid YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Descriptor file extension is not recognized.
    #[error("Unsupported sidebar file format: {} (expected .json, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl SidebarError {
    /// Invariant violations carried by this error.
    #[must_use]
    pub fn violations(&self) -> &[ConfigError] {
        match self {
            Self::Config(err) => std::slice::from_ref(err),
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

fn format_violations(errors: &[ConfigError]) -> String {
    let mut message = format!("{} sidebar configuration error(s):", errors.len());
    for err in errors {
        message.push_str("\n  - ");
        message.push_str(&err.to_string());
    }
    message
}
