//! Local navigation menu: items, index and current-item resolution.

use std::collections::{HashMap, HashSet};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use trail_menu_api::{CrumbItem, deserialize_id};

/// Navigation menu entry as handed over by the CMS for one render.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuItem {
    /// Menu item identifier.
    #[serde(alias = "db_id", deserialize_with = "deserialize_item_id")]
    pub id: u64,
    /// Parent menu item identifier, 0 for root entries.
    #[serde(
        default,
        alias = "menu_item_parent",
        deserialize_with = "deserialize_parent_id"
    )]
    pub parent_id: u64,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Link target.
    #[serde(default)]
    pub url: String,
    /// Whether this entry is the page being rendered.
    #[serde(default)]
    pub current: bool,
    /// Content object the entry links to.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub object_id: Option<u64>,
    /// Number of children pulled in from another site's menu.
    #[serde(default)]
    pub external_children_count: Option<u32>,
    /// Site that owns this entry.
    #[serde(default)]
    pub soa: Option<String>,
}

// The CMS sends identifiers as numbers or numeric strings.
fn deserialize_item_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    deserialize_id(deserializer)?.ok_or_else(|| D::Error::custom("menu item id is not numeric"))
}

fn deserialize_parent_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(deserialize_id(deserializer)?.unwrap_or(0))
}

impl MenuItem {
    /// Same page as a remote crumb record.
    #[must_use]
    pub fn to_crumb(&self) -> CrumbItem {
        CrumbItem {
            db_id: Some(self.id),
            title: self.title.clone(),
            url: self.url.clone(),
        }
    }
}

/// Menu items keyed by identifier, in menu order.
///
/// A later item with an already indexed identifier replaces the earlier one
/// in place.
#[derive(Debug, Default)]
pub struct MenuIndex {
    items: Vec<MenuItem>,
    by_id: HashMap<u64, usize>,
}

impl MenuIndex {
    /// Index a flat menu item list. An empty list gives an empty index.
    pub fn build(items: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut index = Self::default();
        for item in items {
            match index.by_id.get(&item.id) {
                Some(&pos) => index.items[pos] = item,
                None => {
                    index.by_id.insert(item.id, index.items.len());
                    index.items.push(item);
                }
            }
        }
        index
    }

    /// Look up an item by identifier.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&MenuItem> {
        self.by_id.get(&id).map(|&pos| &self.items[pos])
    }

    /// Number of indexed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter()
    }

    /// Resolve the menu item of the page being rendered.
    ///
    /// Prefers the first item flagged `current`. Pages that are not directly
    /// in the menu (e.g. posts) fall back to the first item linking to
    /// `post_id`.
    #[must_use]
    pub fn current_item(&self, post_id: Option<u64>) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.current).or_else(|| {
            let post_id = post_id?;
            self.items
                .iter()
                .find(|item| item.object_id == Some(post_id))
        })
    }

    /// Ancestors of `item` from the menu root down to `item` itself.
    ///
    /// With at most one item indexed there is no hierarchy to walk and the
    /// chain is just `item`. Parent pointers that leave the index or loop
    /// end the walk.
    #[must_use]
    pub fn ancestor_chain<'a>(&'a self, item: &'a MenuItem) -> Vec<&'a MenuItem> {
        if self.len() <= 1 {
            return vec![item];
        }

        let mut chain = vec![item];
        let mut seen = HashSet::from([item.id]);
        let mut parent_id = item.parent_id;
        while let Some(parent) = self.get(parent_id) {
            if !seen.insert(parent.id) {
                break;
            }
            chain.push(parent);
            parent_id = parent.parent_id;
        }
        chain.reverse();
        chain
    }
}
