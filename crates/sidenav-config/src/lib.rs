//! Configuration management for sidenav.
//!
//! Parses `sidenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [sidebars]
//! path = "sidebars.json"
//! collapsed = true
//! collapsible = true
//!
//! [validation]
//! collect_all = false
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `sidebars.path`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override sidebars descriptor path.
    pub sidebars_path: Option<PathBuf>,
    /// Override default collapsed state.
    pub collapsed: Option<bool>,
    /// Override default collapsible flag.
    pub collapsible: Option<bool>,
    /// Override collect-all validation.
    pub collect_all: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sidenav.toml";

/// Default sidebars descriptor filename.
const DEFAULT_SIDEBARS_FILE: &str = "sidebars.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sidebars configuration (path is a relative string from TOML).
    sidebars: SidebarsConfigRaw,
    /// Validation configuration.
    pub validation: ValidationConfig,

    /// Resolved sidebars configuration (set after loading).
    #[serde(skip)]
    pub sidebars_resolved: SidebarsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw sidebars configuration as parsed from TOML (path as string).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SidebarsConfigRaw {
    path: Option<String>,
    collapsed: Option<bool>,
    collapsible: Option<bool>,
}

/// Resolved sidebars configuration with an absolute descriptor path.
#[derive(Debug, Default)]
pub struct SidebarsConfig {
    /// Sidebars descriptor file (`.json`, `.yaml` or `.yml`).
    pub path: PathBuf,
    /// Whether collapsible categories start collapsed unless they say otherwise.
    pub collapsed: bool,
    /// Whether categories are collapsible unless they say otherwise.
    pub collapsible: bool,
}

/// Validation configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Report every violation instead of stopping at the first.
    pub collect_all: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`sidebars.path`").
        field: String,
        /// Error message (e.g., "${`SIDEBARS`} environment variable not found").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sidenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(path) = &settings.sidebars_path {
            self.sidebars_resolved.path.clone_from(path);
        }
        if let Some(collapsed) = settings.collapsed {
            self.sidebars_resolved.collapsed = collapsed;
        }
        if let Some(collapsible) = settings.collapsible {
            self.sidebars_resolved.collapsible = collapsible;
        }
        if let Some(collect_all) = settings.collect_all {
            self.validation.collect_all = collect_all;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            sidebars: SidebarsConfigRaw::default(),
            validation: ValidationConfig::default(),
            sidebars_resolved: SidebarsConfig {
                path: base.join(DEFAULT_SIDEBARS_FILE),
                collapsed: true,
                collapsible: true,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_sidebars()
    }

    /// Validate sidebars configuration.
    fn validate_sidebars(&self) -> Result<(), ConfigError> {
        let sidebars = &self.sidebars_resolved;

        if sidebars.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "sidebars.path cannot be empty".to_owned(),
            ));
        }

        let supported = sidebars
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "json" | "yaml" | "yml"));
        if !supported {
            return Err(ConfigError::Validation(format!(
                "sidebars.path must end in .json, .yaml or .yml: {}",
                sidebars.path.display()
            )));
        }

        if sidebars.collapsed && !sidebars.collapsible {
            return Err(ConfigError::Validation(
                "sidebars.collapsed cannot be true when sidebars.collapsible is false".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.sidebars.path {
            self.sidebars.path = Some(expand::expand_env(path, "sidebars.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory and fill defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let raw = &self.sidebars;
        // A non-collapsible default implies expanded categories.
        let collapsible = raw.collapsible.unwrap_or(true);
        self.sidebars_resolved = SidebarsConfig {
            path: config_dir.join(raw.path.as_deref().unwrap_or(DEFAULT_SIDEBARS_FILE)),
            collapsed: raw.collapsed.unwrap_or(collapsible),
            collapsible,
        };
    }
}
