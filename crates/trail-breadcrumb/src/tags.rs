//! Organizational tags shown before the breadcrumb.

use serde::Deserialize;

use crate::context::PageContext;

/// Organizational unit label (school, faculty, ...) attached to a site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomTag {
    /// French link target, may be missing.
    #[serde(default)]
    pub url_fr: Option<String>,
    /// English link target.
    #[serde(default)]
    pub url_en: String,
    /// French label.
    #[serde(default)]
    pub name_fr: String,
    /// English label.
    #[serde(default)]
    pub name_en: String,
    /// Tag kind (e.g. "faculty").
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl CustomTag {
    /// Label and link target for `language`.
    ///
    /// French uses the French pair, falling back to the English URL when the
    /// French one is empty. Every other language uses the English pair.
    #[must_use]
    pub fn localized(&self, language: &str) -> (&str, &str) {
        if language == "fr" {
            let url = self
                .url_fr
                .as_deref()
                .filter(|url| !url.is_empty())
                .unwrap_or(&self.url_en);
            (&self.name_fr, url)
        } else {
            (&self.name_en, &self.url_en)
        }
    }
}

/// Hook supplying the tags of the site being rendered.
pub trait TagProvider: Send + Sync {
    /// Tags to show, in display order.
    fn site_tags(&self, ctx: &PageContext) -> Vec<CustomTag>;
}

/// Uses the tags carried by the [`PageContext`] itself.
pub struct ContextTags;

impl TagProvider for ContextTags {
    fn site_tags(&self, ctx: &PageContext) -> Vec<CustomTag> {
        ctx.site_tags.clone()
    }
}

impl<F> TagProvider for F
where
    F: Fn(&PageContext) -> Vec<CustomTag> + Send + Sync,
{
    fn site_tags(&self, ctx: &PageContext) -> Vec<CustomTag> {
        self(ctx)
    }
}
