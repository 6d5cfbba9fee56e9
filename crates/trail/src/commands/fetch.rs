//! `trail fetch` command implementation.

use clap::{Args, ValueEnum};
use trail_menu_api::{CallType, CrumbRequest, CrumbSource, MenuApiClient, PageQuery};

use super::ServiceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Menu-api endpoint.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum FetchKind {
    Breadcrumb,
    Siblings,
}

impl From<FetchKind> for CallType {
    fn from(kind: FetchKind) -> Self {
        match kind {
            FetchKind::Breadcrumb => Self::Breadcrumb,
            FetchKind::Siblings => Self::Siblings,
        }
    }
}

/// Arguments for the fetch command.
#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Endpoint to call.
    #[arg(value_enum)]
    kind: FetchKind,

    /// Page URL to look up.
    #[arg(long)]
    url: String,

    /// Language code.
    #[arg(long, default_value = "en")]
    lang: String,

    /// Language root of the site.
    #[arg(long, default_value = "")]
    home_page_url: String,

    /// Content type of the page.
    #[arg(long, default_value = "page")]
    page_type: String,

    #[command(flatten)]
    pub(crate) service: ServiceArgs,
}

impl FetchArgs {
    /// Query the service directly, bypassing the cache, and print the items.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.service.load_config(|_| {})?;

        let client = MenuApiClient::new(
            &config.menu_api.url,
            std::time::Duration::from_secs(config.menu_api.timeout_secs),
        );
        let page = PageQuery {
            lang: self.lang,
            page_type: self.page_type,
            home_page_url: self.home_page_url,
            ..PageQuery::default()
        };
        let request = CrumbRequest::new(self.kind.into(), &self.url, &page);
        tracing::info!(endpoint = %client.endpoint_url(&request), "calling menu-api");

        let items = client.try_fetch(&request)?;
        output.result(&serde_json::to_string_pretty(&items)?);
        Ok(())
    }
}
