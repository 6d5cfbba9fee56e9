//! The [`CrumbSource`] seam between breadcrumb assembly and the service.

use crate::error::MenuApiError;
use crate::types::{CallType, CrumbItem, CrumbRequest, PageQuery};

/// Something that can answer breadcrumb and siblings queries.
///
/// Implementors provide [`try_fetch`](Self::try_fetch); callers rendering a
/// page use [`fetch`](Self::fetch) or [`fetch_crumbs`](Self::fetch_crumbs),
/// which never fail.
pub trait CrumbSource: Send + Sync {
    /// Run one call, reporting why it failed.
    fn try_fetch(&self, request: &CrumbRequest<'_>) -> Result<Vec<CrumbItem>, MenuApiError>;

    /// Run one call, returning an empty list on any failure.
    fn fetch(&self, request: &CrumbRequest<'_>) -> Vec<CrumbItem> {
        match self.try_fetch(request) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    kind = %request.kind,
                    url = request.url,
                    "menu-api call failed: {e}"
                );
                Vec::new()
            }
        }
    }

    /// Fetch the `kind` list for `page_url` in the context of `page`.
    fn fetch_crumbs(&self, page: &PageQuery, page_url: &str, kind: CallType) -> Vec<CrumbItem> {
        self.fetch(&CrumbRequest::new(kind, page_url, page))
    }
}

impl<T: CrumbSource + ?Sized> CrumbSource for &T {
    fn try_fetch(&self, request: &CrumbRequest<'_>) -> Result<Vec<CrumbItem>, MenuApiError> {
        (**self).try_fetch(request)
    }
}

impl<T: CrumbSource + ?Sized> CrumbSource for Box<T> {
    fn try_fetch(&self, request: &CrumbRequest<'_>) -> Result<Vec<CrumbItem>, MenuApiError> {
        (**self).try_fetch(request)
    }
}
