//! Mock crumb source for testing.
//!
//! Provides [`MockCrumbSource`] for exercising breadcrumb assembly without a
//! running menu-api service.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::MenuApiError;
use crate::source::CrumbSource;
use crate::types::{CallType, CrumbItem, CrumbRequest, trailing_slash};

/// In-memory [`CrumbSource`] with canned responses.
///
/// Responses are keyed by call type and page URL (trailing slash
/// normalized). Unknown requests answer with an empty list. Every request is
/// recorded and can be inspected with [`calls`](Self::calls).
///
/// # Example
///
/// ```ignore
/// use trail_menu_api::{CallType, CrumbSource, MockCrumbSource, PageQuery};
///
/// let source = MockCrumbSource::new().with_failure(CallType::Breadcrumb, "/page/");
/// assert!(source.fetch_crumbs(&PageQuery::default(), "/page/", CallType::Breadcrumb).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MockCrumbSource {
    responses: HashMap<(CallType, String), Vec<CrumbItem>>,
    failures: HashSet<(CallType, String)>,
    calls: Mutex<Vec<(CallType, String)>>,
}

impl MockCrumbSource {
    /// Create a mock that answers every request with an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer breadcrumb requests for `url` with `items`.
    #[must_use]
    pub fn with_breadcrumb(self, url: &str, items: Vec<CrumbItem>) -> Self {
        self.with_response(CallType::Breadcrumb, url, items)
    }

    /// Answer siblings requests for `url` with `items`.
    #[must_use]
    pub fn with_siblings(self, url: &str, items: Vec<CrumbItem>) -> Self {
        self.with_response(CallType::Siblings, url, items)
    }

    /// Answer `kind` requests for `url` with `items`.
    #[must_use]
    pub fn with_response(mut self, kind: CallType, url: &str, items: Vec<CrumbItem>) -> Self {
        self.responses.insert((kind, trailing_slash(url)), items);
        self
    }

    /// Fail `kind` requests for `url` with a 503.
    #[must_use]
    pub fn with_failure(mut self, kind: CallType, url: &str) -> Self {
        self.failures.insert((kind, trailing_slash(url)));
        self
    }

    /// Requests received so far, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn calls(&self) -> Vec<(CallType, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CrumbSource for MockCrumbSource {
    fn try_fetch(&self, request: &CrumbRequest<'_>) -> Result<Vec<CrumbItem>, MenuApiError> {
        let key = (request.kind, trailing_slash(request.url));
        self.calls.lock().unwrap().push(key.clone());

        if self.failures.contains(&key) {
            return Err(MenuApiError::HttpResponse {
                status: 503,
                body: "service unavailable".to_owned(),
            });
        }
        Ok(self.responses.get(&key).cloned().unwrap_or_default())
    }
}
