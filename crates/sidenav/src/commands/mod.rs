//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod docs;
pub(crate) mod show;

pub(crate) use check::CheckArgs;
pub(crate) use docs::DocsArgs;
pub(crate) use show::ShowArgs;

use std::path::PathBuf;

use clap::Args;
use sidenav_config::{CliSettings, Config};
use sidenav_tree::{BuildOptions, CategoryDefaults, Sidebar, Sidebars, ValidationMode};

use crate::error::CliError;

/// Where to find the configuration and the sidebars descriptor.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover sidenav.toml).
    #[arg(short, long, env = "SIDENAV_CONFIG")]
    config: Option<PathBuf>,

    /// Sidebars descriptor file (overrides config).
    #[arg(short, long, env = "SIDENAV_SIDEBARS")]
    sidebars: Option<PathBuf>,

    /// Default collapsed state for categories (overrides config).
    #[arg(long)]
    collapsed: Option<bool>,

    /// Default collapsible flag for categories (overrides config).
    #[arg(long)]
    collapsible: Option<bool>,
}

/// Sidebars built from the resolved configuration.
pub(crate) struct Loaded {
    pub(crate) path: PathBuf,
    pub(crate) sidebars: Sidebars,
}

impl SourceArgs {
    /// Load configuration, then read and build the descriptor it points at.
    pub(crate) fn load(&self, collect_all: Option<bool>) -> Result<Loaded, CliError> {
        let cli_settings = self.cli_settings(collect_all);
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(config_path) = &config.config_path {
            tracing::info!(path = %config_path.display(), "Using configuration file");
        }

        let path = config.sidebars_resolved.path.clone();
        tracing::info!(path = %path.display(), "Loading sidebars");
        let sidebars = Sidebars::load(&path, &build_options(&config))?;

        Ok(Loaded { path, sidebars })
    }

    /// Overrides taken from the command line.
    fn cli_settings(&self, collect_all: Option<bool>) -> CliSettings {
        CliSettings {
            sidebars_path: self.sidebars.clone(),
            collapsed: self.collapsed,
            collapsible: self.collapsible,
            collect_all,
        }
    }
}

/// Map resolved configuration onto builder options.
pub(crate) fn build_options(config: &Config) -> BuildOptions {
    BuildOptions {
        defaults: CategoryDefaults {
            collapsed: config.sidebars_resolved.collapsed,
            collapsible: config.sidebars_resolved.collapsible,
        },
        mode: if config.validation.collect_all {
            ValidationMode::CollectAll
        } else {
            ValidationMode::FailFast
        },
    }
}

/// Look up a sidebar by name.
pub(crate) fn select<'a>(sidebars: &'a Sidebars, name: &str) -> Result<&'a Sidebar, CliError> {
    sidebars.get(name).ok_or_else(|| {
        let available: Vec<_> = sidebars.names().collect();
        CliError::Validation(format!(
            "Unknown sidebar `{name}` (available: {})",
            available.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        source: SourceArgs,
    }

    fn parse_source(args: &[&str]) -> SourceArgs {
        TestCli::try_parse_from(std::iter::once("sidenav").chain(args.iter().copied()))
            .unwrap()
            .source
    }

    #[test]
    fn test_cli_settings_from_flags() {
        let source = parse_source(&[
            "--sidebars",
            "nav/sidebars.yaml",
            "--collapsed",
            "false",
            "--collapsible",
            "false",
        ]);

        let settings = source.cli_settings(Some(true));

        assert_eq!(settings.sidebars_path, Some(PathBuf::from("nav/sidebars.yaml")));
        assert_eq!(settings.collapsed, Some(false));
        assert_eq!(settings.collapsible, Some(false));
        assert_eq!(settings.collect_all, Some(true));
    }

    #[test]
    fn test_cli_settings_without_flags() {
        let source = SourceArgs {
            config: None,
            sidebars: None,
            collapsed: None,
            collapsible: None,
        };

        let settings = source.cli_settings(None);

        assert_eq!(settings.sidebars_path, None);
        assert_eq!(settings.collapsed, None);
        assert_eq!(settings.collapsible, None);
        assert_eq!(settings.collect_all, None);
    }

    #[test]
    fn test_collapse_flags_reach_build_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sidebars.json");
        std::fs::write(&path, r#"{"docs": [{"type": "category", "label": "Guides", "items": ["intro"]}]}"#)
            .unwrap();
        let config_path = dir.path().join("sidenav.toml");
        std::fs::write(&config_path, "").unwrap();

        let source = SourceArgs {
            config: Some(config_path),
            sidebars: Some(path),
            collapsed: Some(false),
            collapsible: Some(false),
        };
        let loaded = source.load(None).unwrap();

        let category = loaded.sidebars.get("docs").unwrap().items[0]
            .as_category()
            .unwrap();
        assert_eq!(category.collapsible, Some(false));
        assert_eq!(category.collapsed, Some(false));
    }

    fn sidebars() -> Sidebars {
        Sidebars::from_json_str(
            r#"{"docs": ["intro"], "api": ["reference"]}"#,
            &BuildOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_build_options_from_default_config() {
        let options = build_options(&Config::default());

        assert_eq!(options.mode, ValidationMode::FailFast);
        assert_eq!(options.defaults, CategoryDefaults::default());
    }

    #[test]
    fn test_build_options_collect_all() {
        let mut config = Config::default();
        config.validation.collect_all = true;
        config.sidebars_resolved.collapsed = false;

        let options = build_options(&config);

        assert_eq!(options.mode, ValidationMode::CollectAll);
        assert!(!options.defaults.collapsed);
        assert!(options.defaults.collapsible);
    }

    #[test]
    fn test_select_known_sidebar() {
        let sidebars = sidebars();
        assert_eq!(select(&sidebars, "api").unwrap().name, "api");
    }

    #[test]
    fn test_select_unknown_sidebar_lists_names() {
        let sidebars = sidebars();
        let err = select(&sidebars, "guides").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown sidebar `guides` (available: docs, api)"
        );
    }
}
