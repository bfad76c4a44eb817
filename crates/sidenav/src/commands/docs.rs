//! `sidenav docs` command implementation.

use clap::Args;

use super::{SourceArgs, select};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the docs command.
#[derive(Args)]
pub(crate) struct DocsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Only list docs from the named sidebar.
    #[arg(long)]
    name: Option<String>,
}

impl DocsArgs {
    /// Execute the docs command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the sidebar is unknown.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.source.load(None)?;

        let ids = match &self.name {
            Some(name) => select(&loaded.sidebars, name)?.doc_ids(),
            None => loaded.sidebars.doc_ids(),
        };
        tracing::info!(count = ids.len(), "Collected doc ids");

        for id in ids {
            output.data(id)?;
        }
        Ok(())
    }
}
