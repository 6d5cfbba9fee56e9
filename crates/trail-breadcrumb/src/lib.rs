//! Breadcrumb assembly for a multilingual site.
//!
//! The trail rendered above each page is, in order: a home icon, optional
//! organizational tags, a mobile "show everything" toggle, then the ancestor
//! chain of the page as resolved by the menu-api service, each ancestor with a
//! dropdown of its siblings.
//!
//! # Architecture
//!
//! - [`MenuIndex`]: local menu items by identifier, current-item resolution
//! - [`canonical_url`] / [`home_page_url`]: keys for the remote lookups
//! - [`render`]: HTML fragments for each kind of crumb
//! - [`BreadcrumbAssembler`]: orchestrates the above against a
//!   [`CrumbSource`](trail_menu_api::CrumbSource)
//! - [`NavTree`]: the top navigation bar built from the same menu items
//!
//! Nothing here returns an error to the page: a dead service or a missing menu
//! only makes the trail shorter.

mod assembler;
mod context;
mod menu;
mod nav;
pub mod render;
mod tags;
mod trail;
mod url;

pub use assembler::{AssemblerConfig, BreadcrumbAssembler};
pub use context::{PageContext, PostInfo, RequestInfo};
pub use menu::{MenuIndex, MenuItem};
pub use nav::{NavTree, render_top_nav};
pub use tags::{ContextTags, CustomTag, TagProvider};
pub use trail::BreadcrumbTrail;
pub use url::{canonical_url, home_page_url};
