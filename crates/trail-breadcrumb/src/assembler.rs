//! Breadcrumb assembly.

use rayon::prelude::*;
use tracing::{debug, info};
use trail_config::Config;
use trail_menu_api::{CallType, CrumbItem, CrumbSource, PageQuery, SiblingItem};

use crate::context::PageContext;
use crate::menu::MenuIndex;
use crate::render::{
    render_crumb, render_custom_tags, render_home_icon, render_mobile_toggle,
};
use crate::tags::{ContextTags, TagProvider};
use crate::trail::BreadcrumbTrail;
use crate::url::{canonical_url, home_page_url};

/// Site settings the assembler needs, passed in explicitly per assembler.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Theme whose home icon links to the site itself.
    pub light_theme: String,
    /// Home icon target for every other theme.
    pub schools_home_url: String,
    /// Page template that hides the breadcrumb.
    pub homepage_template: String,
    /// Walk the local menu when the service returns no ancestors.
    pub menu_fallback: bool,
}

impl AssemblerConfig {
    /// Take the relevant settings from a loaded [`Config`].
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            light_theme: config.site.light_theme.clone(),
            schools_home_url: config.site.schools_home_url.clone(),
            homepage_template: config.site.homepage_template.clone(),
            menu_fallback: config.breadcrumb.menu_fallback,
        }
    }
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Builds the breadcrumb trail of a page.
///
/// Owns the [`CrumbSource`] used for remote lookups and the [`TagProvider`]
/// hook. One assembler can serve any number of requests; all per-request
/// state lives in [`assemble`](Self::assemble).
pub struct BreadcrumbAssembler<S> {
    config: AssemblerConfig,
    source: S,
    tags: Box<dyn TagProvider>,
}

impl<S: CrumbSource> BreadcrumbAssembler<S> {
    /// Create an assembler taking tags from the page context.
    pub fn new(config: AssemblerConfig, source: S) -> Self {
        Self {
            config,
            source,
            tags: Box::new(ContextTags),
        }
    }

    /// Replace the tag hook.
    #[must_use]
    pub fn with_tags(mut self, tags: impl TagProvider + 'static) -> Self {
        self.tags = Box::new(tags);
        self
    }

    /// Assemble the trail for one page.
    ///
    /// Never fails. Pages using the homepage template get an empty trail;
    /// every other page gets at least the home icon, tags and mobile toggle,
    /// followed by whatever ancestors could be resolved.
    pub fn assemble(&self, ctx: &PageContext) -> BreadcrumbTrail {
        let mut trail = BreadcrumbTrail::default();

        if ctx.page_template == self.config.homepage_template {
            debug!("homepage template, no breadcrumb");
            return trail;
        }

        trail.push(render_home_icon(self.home_icon_url(ctx)));
        if let Some(tags) = render_custom_tags(&self.tags.site_tags(ctx), &ctx.language) {
            trail.push(tags);
        }
        trail.push(render_mobile_toggle());

        let index = MenuIndex::build(ctx.menu_items.iter().cloned());
        let current = index.current_item(ctx.post.id);
        if current.is_none() {
            debug!(post_id = ?ctx.post.id, "no menu item for current page");
        }

        let url = canonical_url(
            &ctx.request.url(),
            &ctx.post.slug,
            &ctx.language,
            ctx.is_category,
        );
        let query = PageQuery {
            lang: ctx.language.clone(),
            page_type: ctx.post.post_type.clone(),
            post_name: ctx.post.title.clone(),
            posts_page: ctx.posts_page.clone(),
            home_page_url: home_page_url(&url, &ctx.language),
        };

        let mut ancestors = self
            .source
            .fetch_crumbs(&query, &url, CallType::Breadcrumb);
        if ancestors.is_empty()
            && self.config.menu_fallback
            && let Some(current) = current
        {
            info!(url = %url, "no remote ancestors, using local menu chain");
            ancestors = index
                .ancestor_chain(current)
                .into_iter()
                .map(crate::menu::MenuItem::to_crumb)
                .collect();
        }

        let siblings: Vec<Vec<SiblingItem>> = ancestors
            .par_iter()
            .map(|ancestor| {
                self.source
                    .fetch_crumbs(&query, &ancestor.url, CallType::Siblings)
            })
            .collect();

        let current_id = current.map(|item| item.id).filter(|&id| id != 0);
        for (ancestor, siblings) in ancestors.iter().zip(&siblings) {
            let is_current = is_current_crumb(ancestor, current_id);
            trail.push(render_crumb(ancestor, is_current, siblings));
        }

        debug!(
            url = %url,
            ancestors = ancestors.len(),
            fragments = trail.len(),
            "breadcrumb assembled"
        );
        trail
    }

    fn home_icon_url<'a>(&'a self, ctx: &'a PageContext) -> &'a str {
        if ctx.theme == self.config.light_theme {
            &ctx.site_url
        } else {
            &self.config.schools_home_url
        }
    }
}

/// Whether a remote crumb is the page being rendered. Missing or zero
/// identifiers never match.
fn is_current_crumb(crumb: &CrumbItem, current_id: Option<u64>) -> bool {
    matches!((crumb.db_id, current_id), (Some(a), Some(b)) if a == b && a != 0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trail_menu_api::MockCrumbSource;

    use super::*;
    use crate::context::{PostInfo, RequestInfo};
    use crate::menu::MenuItem;
    use crate::tags::CustomTag;

    fn crumb(id: u64, title: &str, url: &str) -> CrumbItem {
        CrumbItem {
            db_id: Some(id),
            title: title.to_owned(),
            url: url.to_owned(),
        }
    }

    fn menu_item(id: u64, parent_id: u64, title: &str, url: &str) -> MenuItem {
        MenuItem {
            id,
            parent_id,
            title: title.to_owned(),
            url: url.to_owned(),
            current: false,
            object_id: None,
            external_children_count: None,
            soa: None,
        }
    }

    /// Page "Page" under "Section", current menu item 2.
    fn page_context() -> PageContext {
        let mut page = menu_item(2, 1, "Page", "/section/page/");
        page.current = true;
        PageContext {
            language: "en".to_owned(),
            page_template: "default".to_owned(),
            theme: "wp-theme-2018".to_owned(),
            site_url: "https://site.ch".to_owned(),
            request: RequestInfo {
                secure: true,
                host: "site.ch".to_owned(),
                uri: "/en/section/page/".to_owned(),
            },
            post: PostInfo {
                id: Some(20),
                slug: "page".to_owned(),
                title: "Page".to_owned(),
                post_type: "page".to_owned(),
            },
            menu_items: vec![menu_item(1, 0, "Section", "/section/"), page],
            ..PageContext::default()
        }
    }

    const CANONICAL: &str = "https://site.ch/en/section/page/";

    #[test]
    fn test_homepage_template_renders_nothing() {
        let source = MockCrumbSource::new();
        let assembler = BreadcrumbAssembler::new(AssemblerConfig::default(), &source);
        let ctx = PageContext {
            page_template: "page-homepage.php".to_owned(),
            ..page_context()
        };

        let trail = assembler.assemble(&ctx);

        assert!(trail.is_empty());
        assert!(source.calls().is_empty());
    }

    #[test]
    fn test_two_ancestors_current_last() {
        let source = MockCrumbSource::new().with_breadcrumb(
            CANONICAL,
            vec![
                crumb(1, "Section", "/section/"),
                crumb(2, "Page", "/section/page/"),
            ],
        );
        let assembler = BreadcrumbAssembler::new(AssemblerConfig::default(), &source);

        let trail = assembler.assemble(&page_context());
        let fragments = trail.fragments();

        // home, mobile toggle, Section, Page
        assert_eq!(fragments.len(), 4);
        assert!(fragments[0].contains("bread-home"));
        assert!(fragments[1].contains("expand-links"));
        assert!(fragments[2].contains(
            "<a class=\"bread-link\" href=\"/section/\" title=\"Section\">Section</a>"
        ));
        assert!(!fragments[2].contains("aria-current"));
        assert!(fragments[3].contains("aria-current=\"page\""));
        assert!(!fragments[3].contains("<a "));
    }

    #[test]
    fn test_one_siblings_call_per_ancestor_in_order() {
        let source = MockCrumbSource::new()
            .with_breadcrumb(
                CANONICAL,
                vec![
                    crumb(1, "Section", "/section/"),
                    crumb(2, "Page", "/section/page/"),
                ],
            )
            .with_siblings("/section/", vec![crumb(9, "Research", "/research/")])
            .with_siblings(
                "/section/page/",
                vec![
                    crumb(2, "Page", "/section/page/"),
                    crumb(3, "Other", "/section/other/"),
                ],
            );
        let assembler = BreadcrumbAssembler::new(AssemblerConfig::default(), &source);

        let trail = assembler.assemble(&page_context());
        let fragments = trail.fragments();

        let mut calls = source.calls();
        assert_eq!(calls.remove(0), (CallType::Breadcrumb, CANONICAL.to_owned()));
        calls.sort_by(|a, b| a.1.cmp(&b.1));
        assert_eq!(
            calls,
            vec![
                (CallType::Siblings, "/section/".to_owned()),
                (CallType::Siblings, "/section/page/".to_owned()),
            ]
        );

        assert!(fragments[2].contains("<a href=\"/research/\">Research</a>"));
        assert!(fragments[3].contains("current-menu-item-parent"));
        assert!(fragments[3].contains("<a href=\"/section/other/\">Other</a>"));
    }

    #[test]
    fn test_service_down_keeps_home_and_tags() {
        let source = MockCrumbSource::new().with_failure(CallType::Breadcrumb, CANONICAL);
        let assembler = BreadcrumbAssembler::new(AssemblerConfig::default(), &source);
        let ctx = PageContext {
            site_tags: vec![CustomTag {
                url_fr: None,
                url_en: "https://www.epfl.ch/schools/ic/".to_owned(),
                name_fr: "IC".to_owned(),
                name_en: "IC".to_owned(),
                kind: "faculty".to_owned(),
            }],
            ..page_context()
        };

        let trail = assembler.assemble(&ctx);
        let fragments = trail.fragments();

        assert_eq!(fragments.len(), 3);
        assert!(fragments[0].contains("bread-home"));
        assert!(fragments[1].contains("tag tag-primary"));
        assert!(fragments[2].contains("expand-links"));
    }

    #[test]
    fn test_home_icon_depends_on_theme() {
        let source = MockCrumbSource::new();
        let assembler = BreadcrumbAssembler::new(AssemblerConfig::default(), &source);

        let trail = assembler.assemble(&page_context());
        assert!(trail.fragments()[0].contains("href=\"https://www.epfl.ch/\""));

        let light = PageContext {
            theme: "wp-theme-light".to_owned(),
            ..page_context()
        };
        let trail = assembler.assemble(&light);
        assert!(trail.fragments()[0].contains("href=\"https://site.ch\""));
    }

    #[test]
    fn test_tag_hook_overrides_context_tags() {
        let source = MockCrumbSource::new();
        let assembler = BreadcrumbAssembler::new(AssemblerConfig::default(), &source)
            .with_tags(|ctx: &PageContext| {
                vec![CustomTag {
                    url_fr: Some("https://site.ch/fr/".to_owned()),
                    url_en: "https://site.ch/en/".to_owned(),
                    name_fr: format!("Tag {}", ctx.language),
                    name_en: format!("Tag {}", ctx.language),
                    kind: "unit".to_owned(),
                }]
            });

        let trail = assembler.assemble(&page_context());
        assert!(trail.fragments()[1].contains(">Tag en</a>"));
    }

    #[test]
    fn test_canonical_url_sent_for_aliased_request() {
        let source = MockCrumbSource::new();
        let assembler = BreadcrumbAssembler::new(AssemblerConfig::default(), &source);
        let ctx = PageContext {
            request: RequestInfo {
                secure: true,
                host: "site.ch".to_owned(),
                uri: "/".to_owned(),
            },
            ..page_context()
        };

        assembler.assemble(&ctx);

        assert_eq!(
            source.calls(),
            vec![(CallType::Breadcrumb, "https://site.ch/en/page/".to_owned())]
        );
    }

    #[test]
    fn test_no_current_item_marks_nothing_current() {
        let source = MockCrumbSource::new().with_breadcrumb(
            CANONICAL,
            vec![
                crumb(1, "Section", "/section/"),
                crumb(2, "Page", "/section/page/"),
            ],
        );
        let assembler = BreadcrumbAssembler::new(AssemblerConfig::default(), &source);
        let ctx = PageContext {
            menu_items: Vec::new(),
            ..page_context()
        };

        let trail = assembler.assemble(&ctx);

        assert_eq!(trail.len(), 4);
        assert!(trail.fragments().iter().all(|f| !f.contains("aria-current")));
    }

    #[test]
    fn test_menu_fallback_walks_local_chain() {
        let source = MockCrumbSource::new();
        let config = AssemblerConfig {
            menu_fallback: true,
            ..AssemblerConfig::default()
        };
        let assembler = BreadcrumbAssembler::new(config, &source);

        let trail = assembler.assemble(&page_context());
        let fragments = trail.fragments();

        assert_eq!(fragments.len(), 4);
        assert!(fragments[2].contains("title=\"Section\""));
        assert!(fragments[3].contains("aria-current=\"page\""));
    }

    #[test]
    fn test_is_current_crumb_requires_both_ids() {
        assert!(is_current_crumb(&crumb(2, "Page", "/p/"), Some(2)));
        assert!(!is_current_crumb(&crumb(2, "Page", "/p/"), Some(3)));
        assert!(!is_current_crumb(&crumb(2, "Page", "/p/"), None));
        assert!(!is_current_crumb(&crumb(0, "Page", "/p/"), Some(0)));

        let no_id = CrumbItem {
            db_id: None,
            ..crumb(2, "Page", "/p/")
        };
        assert!(!is_current_crumb(&no_id, Some(2)));
    }
}
