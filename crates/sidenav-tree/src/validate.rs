//! Sidebar invariant checks.
//!
//! Runs over parsed (not yet normalized) trees and reports:
//!
//! - generated index slugs used twice in one sidebar
//! - categories that are collapsed but not collapsible
//! - categories without items
//! - sidebar names used twice in one descriptor
//!
//! Collapse flags left unset are resolved against [`CategoryDefaults`], the
//! same way [`normalize`](crate::normalize) resolves them, so a tree that
//! passes validation never normalizes into a contradiction.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{ConfigError, NodePath};
use crate::node::{Category, NavNode};
use crate::normalize::CategoryDefaults;

/// Check a sidebar and return the first violation in depth-first order.
///
/// # Errors
///
/// Returns the first [`ConfigError`] found.
pub fn validate_sidebar(
    name: &str,
    nodes: &[NavNode],
    defaults: &CategoryDefaults,
) -> Result<(), ConfigError> {
    let mut walker = Walker::new(defaults, true);
    walker.visit_all(nodes, &NodePath::root(name));
    walker.violations.into_iter().next().map_or(Ok(()), Err)
}

/// Check a sidebar and return every violation in depth-first order.
#[must_use]
pub fn collect_violations(
    name: &str,
    nodes: &[NavNode],
    defaults: &CategoryDefaults,
) -> Vec<ConfigError> {
    let mut walker = Walker::new(defaults, false);
    walker.visit_all(nodes, &NodePath::root(name));
    walker.violations
}

/// Report every sidebar name that occurs more than once, once per name.
#[must_use]
pub fn duplicate_sidebar_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<ConfigError> {
    let mut seen: HashMap<&str, bool> = HashMap::new();
    let mut duplicates = Vec::new();
    for name in names {
        match seen.entry(name) {
            Entry::Vacant(entry) => {
                entry.insert(false);
            }
            Entry::Occupied(mut entry) => {
                if !entry.get() {
                    entry.insert(true);
                    duplicates.push(ConfigError::DuplicateSidebar {
                        name: name.to_owned(),
                    });
                }
            }
        }
    }
    duplicates
}

struct Walker<'d> {
    defaults: &'d CategoryDefaults,
    stop_at_first: bool,
    slugs: HashMap<String, NodePath>,
    violations: Vec<ConfigError>,
}

impl<'d> Walker<'d> {
    fn new(defaults: &'d CategoryDefaults, stop_at_first: bool) -> Self {
        Self {
            defaults,
            stop_at_first,
            slugs: HashMap::new(),
            violations: Vec::new(),
        }
    }

    fn done(&self) -> bool {
        self.stop_at_first && !self.violations.is_empty()
    }

    fn visit_all(&mut self, nodes: &[NavNode], parent: &NodePath) {
        for node in nodes {
            if self.done() {
                return;
            }
            if let NavNode::Category(category) = node {
                self.visit_category(category, &parent.child(node.path_segment()));
            }
        }
    }

    fn visit_category(&mut self, category: &Category, path: &NodePath) {
        let collapsible = category.collapsible.unwrap_or(self.defaults.collapsible);
        if category.collapsed == Some(true) && !collapsible {
            self.report(ConfigError::ContradictoryCollapse { path: path.clone() });
        }

        if category.items.is_empty() {
            self.report(ConfigError::EmptyCategory { path: path.clone() });
        }

        if let Some(slug) = category.index_slug() {
            let collision = match self.slugs.entry(slug) {
                Entry::Vacant(entry) => {
                    entry.insert(path.clone());
                    None
                }
                Entry::Occupied(entry) => Some(ConfigError::SlugCollision {
                    slug: entry.key().clone(),
                    first: entry.get().clone(),
                    path: path.clone(),
                }),
            };
            if let Some(violation) = collision {
                self.report(violation);
            }
        }

        self.visit_all(&category.items, path);
    }

    fn report(&mut self, violation: ConfigError) {
        if !self.done() {
            self.violations.push(violation);
        }
    }
}
