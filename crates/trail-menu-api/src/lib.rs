//! Client for the menu-api breadcrumb and siblings service.
//!
//! The service resolves a canonical page URL into its ancestor chain
//! (`/menus/breadcrumb/`) or into the pages sharing a level with it
//! (`/menus/siblings/`). Both endpoints answer with
//! `{"result": [{"db_id": .., "title": .., "url": ..}, ...]}`.
//!
//! Consumers talk to the service through the [`CrumbSource`] trait:
//!
//! - [`MenuApiClient`]: live HTTP implementation with a bounded timeout
//! - [`CachedCrumbSource`]: two-tier cache in front of any source
//! - `MockCrumbSource` (feature `mock`): canned responses for tests
//!
//! [`CrumbSource::fetch`] never fails: transport errors, bad payloads and
//! null results all come back as an empty list so the page still renders.

mod cached;
mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod source;
mod types;

pub use cached::CachedCrumbSource;
pub use client::MenuApiClient;
pub use error::MenuApiError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCrumbSource;
pub use source::CrumbSource;
pub use types::{
    CallType, CrumbItem, CrumbRequest, PageQuery, PostsPage, SiblingItem, deserialize_id,
    parse_response, trailing_slash,
};
