//! Canonical page URLs used as keys for menu-api lookups.

use trail_menu_api::trailing_slash;

/// Whether the path of `url` ends with the `segment` path segment.
fn ends_with_segment(url: &str, segment: &str) -> bool {
    url.trim_end_matches('/')
        .strip_suffix(segment)
        .is_some_and(|rest| rest.ends_with('/'))
}

/// Drop the query string and fragment of a URL.
fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

/// Canonical absolute URL of the page being rendered.
///
/// Requests served through an alias may lack the language segment or the
/// post slug, which the menu-api service needs to place the page. Unless the
/// URL already ends with the slug, or the page is a category archive, the
/// language segment (when missing) and the slug are appended.
///
/// # Examples
///
/// ```
/// use trail_breadcrumb::canonical_url;
///
/// assert_eq!(canonical_url("https://site.ch/", "home", "en", false), "https://site.ch/en/home/");
/// assert_eq!(canonical_url("https://site.ch/en/parent", "parent", "en", false), "https://site.ch/en/parent");
/// ```
#[must_use]
pub fn canonical_url(request_url: &str, slug: &str, language: &str, is_category: bool) -> String {
    let url = strip_query(request_url);
    if is_category || slug.is_empty() || ends_with_segment(url, slug) {
        return url.to_owned();
    }

    let mut canonical = trailing_slash(url);
    if !language.is_empty() && !ends_with_segment(url, language) {
        canonical.push_str(language);
        canonical.push('/');
    }
    canonical.push_str(slug);
    canonical.push('/');
    canonical
}

/// Language root of a canonical URL.
///
/// Truncates after the first `/<language>/` segment. URLs without that
/// segment fall back to their origin.
///
/// # Examples
///
/// ```
/// use trail_breadcrumb::home_page_url;
///
/// assert_eq!(home_page_url("https://site.ch/en/section/page/", "en"), "https://site.ch/en/");
/// assert_eq!(home_page_url("https://site.ch/section/", "en"), "https://site.ch/");
/// ```
#[must_use]
pub fn home_page_url(canonical_url: &str, language: &str) -> String {
    let url = trailing_slash(canonical_url);
    let marker = format!("/{language}/");
    if !language.is_empty()
        && let Some(pos) = url.find(&marker)
    {
        return url[..pos + marker.len()].to_owned();
    }
    origin(&url)
}

/// Scheme and authority of a URL, with a trailing slash.
fn origin(url: &str) -> String {
    let authority_start = url.find("://").map_or(0, |pos| pos + 3);
    match url[authority_start..].find('/') {
        Some(pos) => url[..=authority_start + pos].to_owned(),
        None => trailing_slash(url),
    }
}
