//! Error types for menu-api calls.

/// Error from a menu-api call.
///
/// Only surfaced through [`CrumbSource::try_fetch`](crate::CrumbSource::try_fetch);
/// the infallible [`fetch`](crate::CrumbSource::fetch) logs it and returns
/// an empty list instead.
#[derive(Debug, thiserror::Error)]
pub enum MenuApiError {
    /// HTTP request failed (DNS, connection, timeout).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// Service answered with a status other than 200.
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Response body is not the expected JSON document.
    #[error("invalid JSON response")]
    Json(#[from] serde_json::Error),

    /// Response JSON has a null or missing `result` field.
    #[error("response has no result")]
    MissingResult,
}
