//! The assembled breadcrumb trail.

/// Ordered breadcrumb fragments: home, tags, mobile toggle, then ancestors
/// from the root down to the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadcrumbTrail {
    fragments: Vec<String>,
}

impl BreadcrumbTrail {
    /// Append a fragment.
    pub fn push(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    /// Fragments in display order.
    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the trail has nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Full breadcrumb markup, or an empty string for an empty trail.
    #[must_use]
    pub fn to_html(&self) -> String {
        if self.fragments.is_empty() {
            return String::new();
        }

        let body_len: usize = self.fragments.iter().map(String::len).sum();
        let mut html = String::with_capacity(body_len + 256);
        html.push_str("<div class=\"breadcrumb-container\">\n");
        html.push_str(
            "<nav aria-label=\"breadcrumb\" class=\"breadcrumb-wrapper\" id=\"breadcrumb-wrapper\">\n",
        );
        html.push_str("<ol class=\"breadcrumb\">\n");
        for fragment in &self.fragments {
            html.push_str(fragment);
        }
        html.push_str("</ol>\n</nav>\n</div>\n");
        html
    }
}
