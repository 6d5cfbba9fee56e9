//! Top navigation bar built from the flat menu item list.
//!
//! Two adjustments are made to the root entries before rendering:
//!
//! - **Phantom entries** are dropped. A root entry is a phantom when it only
//!   exists to host one external menu item belonging to another site (e.g.
//!   a "Labs" placeholder with nothing of ours under it).
//! - **Surrogates** replace entries. A locally defined menu can redirect a
//!   root entry such as "Education" by providing an item with the same title.

use std::collections::HashMap;
use std::fmt::Write;

use trail_menu_api::trailing_slash;

use crate::menu::MenuItem;
use crate::render::escape;

/// Menu items with children indexed by parent identifier.
pub struct NavTree<'a> {
    items: &'a [MenuItem],
    children: HashMap<u64, Vec<usize>>,
    our_site: String,
}

impl<'a> NavTree<'a> {
    /// Index `items`. `site_url` identifies the entries owned by this site.
    #[must_use]
    pub fn build(items: &'a [MenuItem], site_url: &str) -> Self {
        let mut children: HashMap<u64, Vec<usize>> = HashMap::new();
        for (pos, item) in items.iter().enumerate() {
            children.entry(item.parent_id).or_default().push(pos);
        }
        Self {
            items,
            children,
            our_site: trailing_slash(site_url),
        }
    }

    /// Direct children of the entry `id`, in menu order.
    pub fn children_of(&self, id: u64) -> impl Iterator<Item = &'a MenuItem> + '_ {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&pos| &self.items[pos])
    }

    /// Whether `item` only hosts another site's external menu.
    fn is_phantom(&self, item: &MenuItem) -> bool {
        if item.external_children_count != Some(1) {
            return false;
        }
        // Children without an owning site count as someone else's.
        !self.children_of(item.id).any(|child| {
            child
                .soa
                .as_deref()
                .is_none_or(|soa| trailing_slash(soa) != self.our_site)
        })
    }

    /// Root entries to display, phantoms removed and surrogates applied.
    #[must_use]
    pub fn top_level(&self, surrogates: Option<&'a [MenuItem]>) -> Vec<&'a MenuItem> {
        self.children_of(0)
            .filter(|item| !self.is_phantom(item))
            .map(|item| {
                surrogates
                    .and_then(|menu| menu.iter().find(|s| s.title == item.title))
                    .unwrap_or(item)
            })
            .collect()
    }
}

/// Render root entries as the top navigation list of `location`.
#[must_use]
pub fn render_top_nav(items: &[&MenuItem], location: &str) -> String {
    let mut html = String::with_capacity(128 + items.len() * 96);
    let _ = writeln!(
        html,
        "<ul id=\"{}-menu\" class=\"nav-header d-none d-xl-flex\">",
        escape(location)
    );
    for item in items {
        let current = if item.current {
            " current-menu-item"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<li class=\"menu-item menu-item-{}{current}\"><a href=\"{}\">{}</a></li>",
            item.id,
            escape(&item.url),
            escape(&item.title),
        );
    }
    html.push_str("</ul>\n");
    html
}
