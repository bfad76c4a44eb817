//! `sidenav show` command implementation.

use clap::{Args, ValueEnum};
use serde::Serialize;

use super::{SourceArgs, select};
use crate::error::CliError;
use crate::output::Output;

/// Output format for normalized sidebars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Only print the named sidebar.
    #[arg(long)]
    name: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, the sidebar is unknown, or
    /// serialization fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.source.load(None)?;

        let text = match &self.name {
            Some(name) => {
                let sidebar = select(&loaded.sidebars, name)?;
                let mut single = serde_json::Map::new();
                single.insert(sidebar.name.clone(), serde_json::to_value(&sidebar.items)?);
                render(&single, self.format)?
            }
            None => render(&loaded.sidebars, self.format)?,
        };

        output.data(text.trim_end())?;
        Ok(())
    }
}

/// Serialize a value in the requested format.
fn render<T: Serialize + ?Sized>(value: &T, format: Format) -> Result<String, CliError> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
    })
}
