//! Built sidebar collections.
//!
//! [`Sidebars::build`] runs the whole pipeline over a [`Descriptor`]:
//!
//! 1. parse every sidebar into [`NavNode`]s
//! 2. reject repeated sidebar names
//! 3. validate each sidebar's invariants
//! 4. normalize each sidebar
//!
//! The result is immutable. Build it once at start-up and hand out
//! references (or an `Arc`) to whatever renders it.
//!
//! # Example
//!
//! ```
//! use sidenav_tree::{BuildOptions, Sidebars};
//!
//! let sidebars = Sidebars::from_json_str(
//!     r#"{"tutorialSidebar": [{"type": "doc", "id": "about", "label": "About"}, "quick-start"]}"#,
//!     &BuildOptions::default(),
//! )?;
//!
//! let sidebar = sidebars.get("tutorialSidebar").unwrap();
//! assert_eq!(sidebar.items.len(), 2);
//! assert_eq!(sidebar.items[1].doc_id(), Some("quick-start"));
//! # Ok::<(), sidenav_tree::SidebarError>(())
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::descriptor::{Descriptor, DescriptorFormat};
use crate::error::{ConfigError, SidebarError};
use crate::node::{CategoryLink, NavNode};
use crate::normalize::{CategoryDefaults, normalize};
use crate::parse::parse_sidebar;
use crate::validate::{collect_violations, duplicate_sidebar_names, validate_sidebar};

/// How many invariant violations a build reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Stop at the first violation ([`SidebarError::Config`]).
    #[default]
    FailFast,
    /// Report every violation ([`SidebarError::Invalid`]).
    CollectAll,
}

/// Options for [`Sidebars::build`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Defaults for category flags.
    pub defaults: CategoryDefaults,
    /// Violation reporting mode.
    pub mode: ValidationMode,
}

/// A named, normalized navigation tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Sidebar {
    /// Sidebar name.
    pub name: String,
    /// Top-level nodes in render order.
    pub items: Vec<NavNode>,
}

impl Sidebar {
    /// Visit every node in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a NavNode)) {
        for item in &self.items {
            item.walk(visit);
        }
    }

    /// Referenced doc ids in render order, first occurrence only.
    ///
    /// Includes category landing docs, listed before the category's items.
    #[must_use]
    pub fn doc_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        self.walk(&mut |node| {
            let id = match node {
                NavNode::Category(category) => match &category.link {
                    Some(CategoryLink::Doc { id }) => Some(id.as_str()),
                    _ => None,
                },
                other => other.doc_id(),
            };
            if let Some(id) = id
                && seen.insert(id)
            {
                ids.push(id);
            }
        });
        ids
    }
}

/// Node counts for a set of sidebars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidebarStats {
    /// Number of sidebars.
    pub sidebars: usize,
    /// Number of categories.
    pub categories: usize,
    /// Number of doc nodes (category landing docs excluded).
    pub docs: usize,
    /// Number of external links.
    pub links: usize,
    /// Number of autogenerated placeholders.
    pub autogenerated: usize,
}

/// Validated, normalized sidebars keyed by unique name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sidebars {
    sidebars: Vec<Sidebar>,
    index: HashMap<String, usize>,
}

impl Sidebars {
    /// Parse, validate and normalize every sidebar in a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Malformed`] for the first node that cannot be
    /// parsed. Invariant violations are returned as [`SidebarError::Config`]
    /// or [`SidebarError::Invalid`] depending on [`BuildOptions::mode`].
    pub fn build(descriptor: &Descriptor, options: &BuildOptions) -> Result<Self, SidebarError> {
        let parsed = descriptor
            .entries()
            .iter()
            .map(|(name, raw)| parse_sidebar(name, raw).map(|nodes| (name.as_str(), nodes)))
            .collect::<Result<Vec<_>, _>>()?;

        check_invariants(&parsed, options)?;

        let mut sidebars = Vec::with_capacity(parsed.len());
        let mut index = HashMap::with_capacity(parsed.len());
        for (name, nodes) in parsed {
            let items = normalize(nodes, &options.defaults);
            tracing::debug!(sidebar = name, items = items.len(), "Built sidebar");
            index.insert(name.to_owned(), sidebars.len());
            sidebars.push(Sidebar {
                name: name.to_owned(),
                items,
            });
        }

        Ok(Self { sidebars, index })
    }

    /// Build sidebars from a JSON descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Json`] for invalid JSON, otherwise see
    /// [`Sidebars::build`].
    pub fn from_json_str(content: &str, options: &BuildOptions) -> Result<Self, SidebarError> {
        Self::build(&Descriptor::from_json_str(content)?, options)
    }

    /// Build sidebars from a YAML descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Yaml`] for invalid YAML, otherwise see
    /// [`Sidebars::build`].
    pub fn from_yaml_str(content: &str, options: &BuildOptions) -> Result<Self, SidebarError> {
        Self::build(&Descriptor::from_yaml_str(content)?, options)
    }

    /// Read and build a descriptor file (`.json`, `.yaml` or `.yml`).
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::UnsupportedFormat`] for other extensions,
    /// [`SidebarError::Io`] if the file cannot be read, otherwise see
    /// [`Sidebars::from_json_str`] and [`Sidebars::from_yaml_str`].
    pub fn load(path: &Path, options: &BuildOptions) -> Result<Self, SidebarError> {
        let format = DescriptorFormat::from_path(path)
            .ok_or_else(|| SidebarError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| SidebarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?format, "Loading sidebars");

        match format {
            DescriptorFormat::Json => Self::from_json_str(&content, options),
            DescriptorFormat::Yaml => Self::from_yaml_str(&content, options),
        }
    }

    /// Get a sidebar by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Sidebar> {
        self.index.get(name).map(|&i| &self.sidebars[i])
    }

    /// Sidebars in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Sidebar> {
        self.sidebars.iter()
    }

    /// Sidebar names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sidebars.iter().map(|sidebar| sidebar.name.as_str())
    }

    /// Number of sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    /// Whether there are no sidebars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    /// Referenced doc ids across all sidebars, first occurrence only.
    #[must_use]
    pub fn doc_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sidebars
            .iter()
            .flat_map(Sidebar::doc_ids)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Count nodes by kind.
    #[must_use]
    pub fn stats(&self) -> SidebarStats {
        let mut stats = SidebarStats {
            sidebars: self.sidebars.len(),
            ..SidebarStats::default()
        };
        for sidebar in &self.sidebars {
            sidebar.walk(&mut |node| match node {
                NavNode::Ref(_) | NavNode::Doc(_) => stats.docs += 1,
                NavNode::Category(_) => stats.categories += 1,
                NavNode::Link(_) => stats.links += 1,
                NavNode::Autogenerated(_) => stats.autogenerated += 1,
            });
        }
        stats
    }
}

impl<'a> IntoIterator for &'a Sidebars {
    type Item = &'a Sidebar;
    type IntoIter = std::slice::Iter<'a, Sidebar>;

    fn into_iter(self) -> Self::IntoIter {
        self.sidebars.iter()
    }
}

/// Serializes as the descriptor mapping `name -> items`.
impl Serialize for Sidebars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sidebars.len()))?;
        for sidebar in &self.sidebars {
            map.serialize_entry(&sidebar.name, &sidebar.items)?;
        }
        map.end()
    }
}

fn check_invariants(
    parsed: &[(&str, Vec<NavNode>)],
    options: &BuildOptions,
) -> Result<(), SidebarError> {
    let mut violations: Vec<ConfigError> =
        duplicate_sidebar_names(parsed.iter().map(|(name, _)| *name));

    match options.mode {
        ValidationMode::FailFast => {
            if let Some(first) = violations.into_iter().next() {
                return Err(first.into());
            }
            for (name, nodes) in parsed {
                validate_sidebar(name, nodes, &options.defaults)?;
            }
            Ok(())
        }
        ValidationMode::CollectAll => {
            for (name, nodes) in parsed {
                violations.extend(collect_violations(name, nodes, &options.defaults));
            }
            if violations.is_empty() {
                Ok(())
            } else {
                Err(SidebarError::Invalid(violations))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NodePath;
    use crate::node::DocRef;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    static_assertions::assert_impl_all!(Sidebars: Send, Sync);

    fn build(raw: &serde_json::Value) -> Result<Sidebars, SidebarError> {
        Sidebars::from_json_str(&raw.to_string(), &BuildOptions::default())
    }

    #[test]
    fn test_end_to_end_example() {
        let sidebars = build(&json!({
            "tutorialSidebar": [
                {"type": "doc", "id": "about", "label": "About"},
                "quick-start"
            ]
        }))
        .unwrap();

        assert_eq!(sidebars.len(), 1);
        assert_eq!(
            sidebars.get("tutorialSidebar").unwrap().items,
            vec![
                NavNode::Doc(DocRef::new("about").with_label("About")),
                NavNode::Doc(DocRef::new("quick-start")),
            ]
        );
    }

    #[test]
    fn test_sidebars_keep_declaration_order() {
        let sidebars = Sidebars::from_json_str(
            r#"{"zeta": ["a"], "alpha": ["b"]}"#,
            &BuildOptions::default(),
        )
        .unwrap();

        assert_eq!(sidebars.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert!(sidebars.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_sidebar_name_is_rejected() {
        let err = Sidebars::from_json_str(
            r#"{"docs": ["a"], "api": ["b"], "docs": ["c"]}"#,
            &BuildOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SidebarError::Config(ConfigError::DuplicateSidebar { ref name }) if name == "docs"
        ));
    }

    #[test]
    fn test_malformed_node_fails_build() {
        let err = build(&json!({"docs": [{"type": "category", "label": "Broken"}]})).unwrap_err();

        match err {
            SidebarError::Malformed(err) => {
                assert_eq!(err.path, NodePath::root("docs").child("Broken"));
            }
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_fail_fast_returns_single_violation() {
        let err = build(&json!({
            "docs": [
                {"type": "category", "label": "Empty", "items": []},
                {"type": "category", "label": "Locked", "collapsed": true, "collapsible": false, "items": ["a"]}
            ]
        }))
        .unwrap_err();

        assert_eq!(
            err.violations(),
            &[ConfigError::EmptyCategory {
                path: NodePath::root("docs").child("Empty")
            }]
        );
    }

    #[test]
    fn test_collect_all_returns_every_violation() {
        let options = BuildOptions {
            mode: ValidationMode::CollectAll,
            ..BuildOptions::default()
        };
        let raw = r#"{
            "docs": [
                {"type": "category", "label": "Empty", "items": []},
                {"type": "category", "label": "Locked", "collapsed": true, "collapsible": false, "items": ["a"]}
            ],
            "docs": ["b"],
            "api": [{"type": "category", "label": "Also empty", "items": []}]
        }"#;

        let err = Sidebars::from_json_str(raw, &options).unwrap_err();

        let violations = err.violations();
        assert!(matches!(err, SidebarError::Invalid(_)));
        assert_eq!(violations.len(), 4);
        assert!(matches!(violations[0], ConfigError::DuplicateSidebar { .. }));
        assert_eq!(
            violations[3].path(),
            Some(&NodePath::root("api").child("Also empty"))
        );
    }

    #[test]
    fn test_defaults_come_from_options() {
        let options = BuildOptions {
            defaults: CategoryDefaults {
                collapsed: false,
                collapsible: true,
            },
            ..BuildOptions::default()
        };
        let sidebars = Sidebars::from_json_str(
            r#"{"docs": [{"type": "category", "label": "A", "items": ["a"]}]}"#,
            &options,
        )
        .unwrap();

        let category = sidebars.get("docs").unwrap().items[0].as_category().unwrap();
        assert_eq!(category.collapsed, Some(false));
    }

    #[test]
    fn test_doc_ids_dedup_and_include_landing_docs() {
        let sidebars = build(&json!({
            "docs": [
                "intro",
                {"type": "category", "label": "States", "link": {"type": "doc", "id": "states"}, "items": ["editor-states", "intro"]}
            ],
            "api": ["reference", "intro"]
        }))
        .unwrap();

        assert_eq!(
            sidebars.get("docs").unwrap().doc_ids(),
            vec!["intro", "states", "editor-states"]
        );
        assert_eq!(
            sidebars.doc_ids(),
            vec!["intro", "states", "editor-states", "reference"]
        );
    }

    #[test]
    fn test_stats_counts_nodes() {
        let sidebars = build(&json!({
            "docs": [
                "intro",
                {"type": "category", "label": "A", "items": ["a", {"type": "link", "label": "GitHub", "href": "https://github.com"}]},
                {"type": "autogenerated", "dirName": "api"}
            ]
        }))
        .unwrap();

        assert_eq!(
            sidebars.stats(),
            SidebarStats {
                sidebars: 1,
                categories: 1,
                docs: 2,
                links: 1,
                autogenerated: 1,
            }
        );
    }

    #[test]
    fn test_serialized_sidebars_rebuild_identically() {
        let sidebars = build(&json!({
            "docs": [
                "intro",
                {"type": "category", "label": "Guides", "link": {"type": "generated-index"}, "items": ["a"]}
            ],
            "api": [{"type": "doc", "id": "reference", "label": "Reference", "customProps": {"badge": "new"}}]
        }))
        .unwrap();

        let json = serde_json::to_string(&sidebars).unwrap();
        let rebuilt = Sidebars::from_json_str(&json, &BuildOptions::default()).unwrap();

        assert_eq!(rebuilt, sidebars);
    }

    #[test]
    fn test_yaml_descriptor() {
        let yaml = r"
docs:
  - type: category
    label: Guides
    collapsed: false
    items:
      - intro
      - setup
";
        let sidebars = Sidebars::from_yaml_str(yaml, &BuildOptions::default()).unwrap();

        let category = sidebars.get("docs").unwrap().items[0].as_category().unwrap();
        assert_eq!(category.collapsed, Some(false));
        assert_eq!(category.items.len(), 2);
    }

    fn top_level_labels(sidebars: &Sidebars) -> Vec<&str> {
        sidebars.get("docs").unwrap().items.iter().filter_map(NavNode::label).collect()
    }

    #[test]
    fn test_shorthand_sidebar_keeps_declaration_order() {
        let json = Sidebars::from_json_str(
            r#"{"docs": {"Zeta": ["a"], "Alpha": ["b"], "Mid": ["c"]}}"#,
            &BuildOptions::default(),
        )
        .unwrap();
        let yaml = Sidebars::from_yaml_str(
            "docs:\n  Zeta: [a]\n  Alpha: [b]\n  Mid: [c]\n",
            &BuildOptions::default(),
        )
        .unwrap();

        assert_eq!(top_level_labels(&json), vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(top_level_labels(&yaml), vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(json, yaml);
    }

    #[test]
    fn test_shorthand_sidebar_rejects_repeated_label() {
        let err = Sidebars::from_json_str(
            r#"{"docs": {"Guides": ["a"], "Guides": ["b"]}}"#,
            &BuildOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, SidebarError::Json(_)));
        assert!(err.to_string().contains("duplicate shorthand category `Guides`"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sidebars.json");
        std::fs::write(&path, r#"{"docs": ["intro"]}"#).unwrap();

        let sidebars = Sidebars::load(&path, &BuildOptions::default()).unwrap();

        assert_eq!(sidebars.doc_ids(), vec!["intro"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Sidebars::load(&dir.path().join("missing.yaml"), &BuildOptions::default())
            .unwrap_err();

        assert!(matches!(err, SidebarError::Io { .. }));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let err = Sidebars::load(Path::new("sidebars.js"), &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, SidebarError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_invalid_json_error() {
        let err = Sidebars::from_json_str("{", &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, SidebarError::Json(_)));
    }
}
