//! Live HTTP client for the menu-api service.

use std::fmt::Write as _;
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;
use ureq::Agent;

use crate::error::MenuApiError;
use crate::source::CrumbSource;
use crate::types::{CrumbItem, CrumbRequest, parse_response, trailing_slash};

/// Unreserved characters (RFC 3986) are left as-is, everything else is encoded.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Menu-api HTTP client.
///
/// One agent is shared by every call so connections are pooled across the
/// ancestor call and the sibling calls that follow it.
pub struct MenuApiClient {
    agent: Agent,
    base_url: String,
}

impl MenuApiClient {
    /// Create a client for the service at `base_url`.
    ///
    /// `timeout` bounds each call end to end; a call that exceeds it fails
    /// like any other transport error.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Full request URL for a call, query string included.
    #[must_use]
    pub fn endpoint_url(&self, request: &CrumbRequest<'_>) -> String {
        let page = request.page;
        let mut params: Vec<(&str, String)> = vec![
            ("lang", page.lang.clone()),
            ("url", trailing_slash(request.url)),
            ("pageType", page.page_type.clone()),
        ];
        if let Some(posts_page) = &page.posts_page {
            params.push(("mainPostPageName", posts_page.title.clone()));
            params.push(("mainPostPageUrl", posts_page.url.clone()));
        }
        params.push(("postName", page.post_name.clone()));
        params.push(("homePageUrl", page.home_page_url.clone()));

        let mut url = format!("{}/menus/{}/", self.base_url, request.kind);
        for (i, (key, value)) in params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            let _ = write!(
                url,
                "{sep}{key}={}",
                utf8_percent_encode(value, QUERY_ENCODE_SET)
            );
        }
        url
    }
}

impl CrumbSource for MenuApiClient {
    fn try_fetch(&self, request: &CrumbRequest<'_>) -> Result<Vec<CrumbItem>, MenuApiError> {
        let url = self.endpoint_url(request);
        debug!("GET {url}");

        let response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status != 200 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(MenuApiError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let items = parse_response(&body.read_to_string()?)?;
        debug!("{} returned {} items", request.kind, items.len());
        Ok(items)
    }
}
