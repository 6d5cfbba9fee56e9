//! Request and response types for the menu-api service.

use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MenuApiError;

/// Which menu-api endpoint to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallType {
    /// Ancestor chain of a page, root first.
    Breadcrumb,
    /// Pages on the same level as a page.
    Siblings,
}

impl CallType {
    /// Path segment of the endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breadcrumb => "breadcrumb",
            Self::Siblings => "siblings",
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page record returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrumbItem {
    /// Menu item identifier, used to spot the current page.
    ///
    /// The service sends either a number or a numeric string; both are
    /// normalized here so callers only compare integers.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub db_id: Option<u64>,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Link target.
    #[serde(default)]
    pub url: String,
}

/// Entry of a same-level dropdown. Same shape as [`CrumbItem`].
pub type SiblingItem = CrumbItem;

/// Deserialize an identifier sent as a number or a numeric string.
///
/// Anything that is not a non-negative integer (fractions, negative numbers,
/// booleans, non-numeric text) becomes `None` instead of failing the whole
/// payload.
pub fn deserialize_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Number(id)) => Some(id),
        Some(RawId::Float(value)) => integral(value),
        Some(RawId::Text(text)) => text.trim().parse().ok(),
        Some(RawId::Other(_)) | None => None,
    })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn integral(value: f64) -> Option<u64> {
    // 2^64 itself is not representable as u64.
    (value.fract() == 0.0 && value >= 0.0 && value < 18_446_744_073_709_551_616.0)
        .then_some(value as u64)
}

/// The site's "posts page", sent as extra context when configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPage {
    /// Page title.
    pub title: String,
    /// Page permalink.
    pub url: String,
}

/// Per-page parameters shared by every call made while rendering one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Active language code (e.g. "en", "fr").
    pub lang: String,
    /// Content type of the page being rendered.
    pub page_type: String,
    /// Title of the page being rendered.
    pub post_name: String,
    /// Posts page, if the site has one.
    pub posts_page: Option<PostsPage>,
    /// Language root of the site (e.g. `https://site.ch/en/`).
    pub home_page_url: String,
}

/// A single call to the service.
#[derive(Debug, Clone, Copy)]
pub struct CrumbRequest<'a> {
    /// Endpoint to call.
    pub kind: CallType,
    /// Page the call is about.
    pub url: &'a str,
    /// Shared page parameters.
    pub page: &'a PageQuery,
}

impl<'a> CrumbRequest<'a> {
    #[must_use]
    pub fn new(kind: CallType, url: &'a str, page: &'a PageQuery) -> Self {
        Self { kind, url, page }
    }
}

#[derive(Deserialize)]
struct MenuApiResponse {
    #[serde(default)]
    result: Option<Vec<CrumbItem>>,
}

/// Parse a service response body.
///
/// # Errors
///
/// Returns [`MenuApiError::Json`] when the body is not the expected JSON
/// document and [`MenuApiError::MissingResult`] when `result` is null or
/// absent.
pub fn parse_response(body: &str) -> Result<Vec<CrumbItem>, MenuApiError> {
    let response: MenuApiResponse = serde_json::from_str(body)?;
    response.result.ok_or(MenuApiError::MissingResult)
}

/// Ensure a URL ends with exactly one slash.
///
/// # Examples
///
/// ```
/// use trail_menu_api::trailing_slash;
///
/// assert_eq!(trailing_slash("https://site.ch/en/page"), "https://site.ch/en/page/");
/// assert_eq!(trailing_slash("https://site.ch/en//"), "https://site.ch/en/");
/// ```
#[must_use]
pub fn trailing_slash(url: &str) -> String {
    format!("{}/", url.trim_end_matches(['/', '\\']))
}
