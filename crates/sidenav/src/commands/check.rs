//! `sidenav check` command implementation.

use clap::Args;
use sidenav_tree::SidebarStats;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Report every violation instead of stopping at the first.
    #[arg(long)]
    all: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the descriptor is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let loaded = self.source.load(self.all.then_some(true))?;

        output.info(&format!("Sidebars: {}", loaded.path.display()));
        for sidebar in &loaded.sidebars {
            output.highlight(&format!(
                "  {} ({} top-level items)",
                sidebar.name,
                sidebar.items.len()
            ));
        }
        output.success(&format_summary(&loaded.sidebars.stats()));
        Ok(())
    }
}

/// One-line summary of a valid build.
fn format_summary(stats: &SidebarStats) -> String {
    format!(
        "OK: {} sidebar(s), {} categories, {} docs, {} links, {} autogenerated",
        stats.sidebars, stats.categories, stats.docs, stats.links, stats.autogenerated
    )
}
