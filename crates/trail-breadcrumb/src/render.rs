//! HTML fragments making up a breadcrumb trail.
//!
//! Each function returns one `<li>` of the breadcrumb list (or nothing).
//! Titles and URLs are escaped; the markup and class names follow the site's
//! front-end toolkit.

use std::fmt::Write;

use trail_menu_api::{CrumbItem, SiblingItem};

use crate::tags::CustomTag;

/// Screen-reader label of the mobile expand button.
const EXPAND_LABEL: &str = "Afficher l'intégralité du fil d'Ariane";

/// Screen-reader label of the siblings dropdown toggle.
const SIBLINGS_LABEL: &str = "Affiche les pages de même niveau";

/// Render the home icon crumb linking to `url`.
#[must_use]
pub fn render_home_icon(url: &str) -> String {
    let mut html = String::with_capacity(256);
    html.push_str("<li class=\"breadcrumb-item\">\n");
    let _ = writeln!(
        html,
        "<a class=\"bread-link bread-home\" href=\"{}\" title=\"home\">",
        escape(url)
    );
    html.push_str(
        "<svg class=\"icon\" aria-hidden=\"true\"><use xlink:href=\"#icon-home\"></use></svg>\n",
    );
    html.push_str("</a>\n</li>\n");
    html
}

/// Render the site tags as one crumb, or `None` when there are no tags.
#[must_use]
pub fn render_custom_tags(tags: &[CustomTag], language: &str) -> Option<String> {
    if tags.is_empty() {
        return None;
    }

    let mut html = String::from("<li class=\"breadcrumb-item breadcrumb-tags-wrapper\">\n");
    for tag in tags {
        let (name, url) = tag.localized(language);
        let _ = writeln!(
            html,
            "<a href=\"{}\" class=\"tag tag-primary\">{}</a>",
            escape(url),
            escape(name),
        );
    }
    html.push_str("</li>\n");
    Some(html)
}

/// Render the "…" button that expands the full trail on small screens.
#[must_use]
pub fn render_mobile_toggle() -> String {
    let mut html = String::with_capacity(320);
    html.push_str("<li class=\"breadcrumb-item expand-links\">\n");
    let _ = writeln!(
        html,
        "<button class=\"btn btn-expand-links\" aria-expanded=\"false\" title=\"{}\">",
        escape(EXPAND_LABEL)
    );
    html.push_str("<span class=\"dots\" aria-hidden=\"true\">…</span>\n");
    let _ = writeln!(html, "<span class=\"sr-only\">{}</span>", escape(EXPAND_LABEL));
    html.push_str("</button>\n</li>\n");
    html
}

/// Render one ancestor crumb.
///
/// The current page is plain text marked `aria-current="page"`; every other
/// ancestor is a link. Both carry the dropdown of `siblings`.
#[must_use]
pub fn render_crumb(item: &CrumbItem, is_current: bool, siblings: &[SiblingItem]) -> String {
    let title = escape(&item.title);
    let dropdown = render_siblings(siblings, item);

    let mut html = String::with_capacity(256 + dropdown.len());
    if is_current {
        html.push_str("<li class=\"breadcrumb-item active\" aria-current=\"page\">\n");
        let _ = writeln!(html, "{title}");
    } else {
        html.push_str("<li class=\"breadcrumb-item\">\n");
        let _ = writeln!(
            html,
            "<a class=\"bread-link\" href=\"{}\" title=\"{title}\">{title}</a>",
            escape(&item.url),
        );
    }
    html.push_str(&dropdown);
    html.push_str("</li>\n");
    html
}

/// Render the dropdown listing the siblings of `item`.
///
/// The sibling sharing `item`'s title gets the `current-menu-item-parent`
/// class. No siblings, no dropdown: the result is empty.
#[must_use]
pub fn render_siblings(siblings: &[SiblingItem], item: &CrumbItem) -> String {
    if siblings.is_empty() {
        return String::new();
    }

    let mut html = String::with_capacity(512);
    html.push_str("<div class=\"dropdown\">\n");
    html.push_str(
        "<button class=\"btn btn-secondary dropdown-toggle\" type=\"button\" \
         id=\"dropdownMenuButton\" data-toggle=\"dropdown\" aria-haspopup=\"true\" \
         aria-expanded=\"false\">\n",
    );
    html.push_str(
        "<svg class=\"icon feather\" aria-hidden=\"true\">\
         <use xlink:href=\"#arrow-down-circle\"></use></svg>\n",
    );
    let _ = writeln!(html, "<span class=\"sr-only\">{}</span>", escape(SIBLINGS_LABEL));
    html.push_str("</button>\n");
    html.push_str("<ul class=\"dropdown-menu\" aria-labelledby=\"dropdownMenuButton\">\n");
    for sibling in siblings {
        let class = if sibling.title == item.title {
            "dropdown-item current-menu-item-parent"
        } else {
            "dropdown-item"
        };
        let _ = writeln!(
            html,
            "<li class=\"{class}\"><a href=\"{}\">{}</a></li>",
            escape(&sibling.url),
            escape(&sibling.title),
        );
    }
    html.push_str("</ul>\n</div>\n");
    html
}

/// Escape HTML special characters.
pub(crate) fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
