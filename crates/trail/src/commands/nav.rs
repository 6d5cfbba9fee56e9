//! `trail nav` command implementation.

use std::path::PathBuf;

use clap::Args;
use trail_breadcrumb::{NavTree, render_top_nav};
use trail_config::Config;

use super::read_context;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Page snapshot (JSON) holding the menu items.
    #[arg(long)]
    context: PathBuf,

    /// Path to configuration file (default: auto-discover trail.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl NavArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let ctx = read_context(&self.context)?;

        let tree = NavTree::build(&ctx.menu_items, &ctx.site_url);
        let entries = tree.top_level(ctx.surrogate_menu.as_deref());
        output.result(&render_top_nav(&entries, &config.site.menu_location));
        Ok(())
    }
}
