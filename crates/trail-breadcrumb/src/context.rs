//! Snapshot of what the CMS knows about the page being rendered.

use serde::Deserialize;
use trail_menu_api::PostsPage;

use crate::menu::MenuItem;
use crate::tags::CustomTag;

/// Everything the breadcrumb needs from the CMS for one request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageContext {
    /// Active language code.
    pub language: String,
    /// Page template slug (e.g. "page-homepage.php").
    pub page_template: String,
    /// Active theme (stylesheet) name.
    pub theme: String,
    /// Site URL.
    pub site_url: String,
    /// Incoming request.
    pub request: RequestInfo,
    /// Post being rendered.
    pub post: PostInfo,
    /// Whether the page is a category archive.
    pub is_category: bool,
    /// The site's posts page, if configured.
    pub posts_page: Option<PostsPage>,
    /// Flattened items of the active menu.
    pub menu_items: Vec<MenuItem>,
    /// Locally defined menu whose items replace top-level entries by title.
    pub surrogate_menu: Option<Vec<MenuItem>>,
    /// Tags attached to the site.
    pub site_tags: Vec<CustomTag>,
}

/// Incoming HTTP request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestInfo {
    /// Whether the request came over TLS.
    pub secure: bool,
    /// `Host` header.
    pub host: String,
    /// Request URI, path and query.
    pub uri: String,
}

impl RequestInfo {
    /// Absolute URL of the request.
    #[must_use]
    pub fn url(&self) -> String {
        let scheme = if self.secure { "https://" } else { "http://" };
        format!("{scheme}{}{}", self.host, self.uri)
    }
}

/// Post being rendered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostInfo {
    /// Post identifier.
    pub id: Option<u64>,
    /// URL slug.
    pub slug: String,
    /// Title.
    pub title: String,
    /// Content type (e.g. "page", "post").
    pub post_type: String,
}
