//! Navigation sidebars for documentation sites.
//!
//! This crate provides:
//! - [`NavNode`]: the sidebar node model (docs, categories, links,
//!   autogenerated placeholders)
//! - [`parse_node`], [`validate_sidebar`] and [`normalize`]: the individual
//!   build steps
//! - [`Sidebars`]: validated, normalized sidebars built from a descriptor
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use sidenav_tree::{BuildOptions, Sidebars};
//!
//! let sidebars = Sidebars::load(Path::new("sidebars.json"), &BuildOptions::default())?;
//!
//! for sidebar in &sidebars {
//!     println!("{}: {} docs", sidebar.name, sidebar.doc_ids().len());
//! }
//! # Ok(())
//! # }
//! ```

mod descriptor;
mod error;
mod node;
mod normalize;
mod parse;
mod sidebars;
mod validate;

pub use descriptor::{Descriptor, DescriptorFormat};
pub use error::{ConfigError, MalformedNodeError, NodePath, SidebarError};
pub use node::{
    Autogenerated, Category, CategoryLink, DocRef, ExternalLink, GeneratedIndex, NavNode,
    default_index_slug,
};
pub use normalize::{CategoryDefaults, normalize};
pub use parse::{parse_items, parse_node, parse_sidebar};
pub use sidebars::{BuildOptions, Sidebar, SidebarStats, Sidebars, ValidationMode};
pub use validate::{collect_violations, duplicate_sidebar_names, validate_sidebar};
