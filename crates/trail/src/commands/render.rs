//! `trail render` command implementation.

use std::path::PathBuf;

use clap::Args;
use trail_breadcrumb::{AssemblerConfig, BreadcrumbAssembler};

use super::{ServiceArgs, crumb_source, read_context};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Page snapshot (JSON) to render the breadcrumb for.
    #[arg(long)]
    context: PathBuf,

    /// Walk the local menu when the service returns no ancestors.
    #[arg(long)]
    menu_fallback: bool,

    #[command(flatten)]
    pub(crate) service: ServiceArgs,
}

impl RenderArgs {
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.service.load_config(|settings| {
            settings.menu_fallback = self.menu_fallback.then_some(true);
        })?;
        let ctx = read_context(&self.context)?;

        let assembler = BreadcrumbAssembler::new(
            AssemblerConfig::from_config(&config),
            crumb_source(&config, version),
        );
        let trail = assembler.assemble(&ctx);

        if trail.is_empty() {
            output.warning("No breadcrumb for this page");
            return Ok(());
        }
        output.result(&trail.to_html());
        Ok(())
    }
}
