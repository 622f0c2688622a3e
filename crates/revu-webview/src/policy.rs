//! Navigation decision policy.
//!
//! Evaluated synchronously inside the engine's navigation callback, before
//! the engine commits. The one rule: a login-page URL without the app-context
//! query marker is cancelled and reissued with the marker appended, which
//! stops redirect loops through the bare login path. Everything else is
//! allowed unconditionally.

/// Outcome of a navigation decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDecision {
    /// Let the engine commit the navigation.
    Allow,
    /// Cancel and reissue with the marker appended.
    RewriteWithMarker(String),
}

/// URL classification rules for the hosted web app.
///
/// Built from config by the shell; the patterns are case-sensitive substring
/// matches against the resolved URL, same as the web app's own routing.
#[derive(Debug, Clone)]
pub struct UrlRules {
    /// Bare login URL (no marker).
    pub login_url: String,
    /// Dashboard URL.
    pub dashboard_url: String,
    /// Substring identifying login pages.
    pub login_pattern: String,
    /// Substring identifying dashboard pages.
    pub dashboard_pattern: String,
    /// App-context query marker key.
    pub marker: String,
}

impl UrlRules {
    pub fn is_login(&self, url: &str) -> bool {
        !self.login_pattern.is_empty() && url.contains(&self.login_pattern)
    }

    pub fn is_dashboard(&self, url: &str) -> bool {
        !self.dashboard_pattern.is_empty() && url.contains(&self.dashboard_pattern)
    }

    /// The login URL the controller targets: bare login URL plus marker.
    pub fn marked_login_url(&self) -> String {
        self.with_marker(&self.login_url)
    }

    /// Whether the URL's query string already carries the marker key.
    pub fn has_marker(&self, url: &str) -> bool {
        let Some((_, query)) = url.split_once('?') else {
            return false;
        };
        query
            .split('&')
            .any(|param| param == self.marker || param.starts_with(&format!("{}=", self.marker)))
    }

    /// Append the marker to a URL, respecting an existing query string.
    pub fn with_marker(&self, url: &str) -> String {
        if url.contains('?') {
            format!("{url}&{}", self.marker)
        } else {
            format!("{url}?{}", self.marker)
        }
    }

    /// Decide whether a navigation may commit.
    pub fn decide(&self, url: &str) -> NavDecision {
        if self.is_login(url) && !self.has_marker(url) {
            NavDecision::RewriteWithMarker(self.with_marker(url))
        } else {
            NavDecision::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> UrlRules {
        UrlRules {
            login_url: "https://app.revulink.net/login/".into(),
            dashboard_url: "https://app.revulink.net/dashboard/".into(),
            login_pattern: "/login/".into(),
            dashboard_pattern: "/dashboard/".into(),
            marker: "app".into(),
        }
    }

    // -- Classification --

    #[test]
    fn classifies_login_and_dashboard() {
        let r = rules();
        assert!(r.is_login("https://app.revulink.net/login/?app"));
        assert!(r.is_login("https://app.revulink.net/login/reset"));
        assert!(!r.is_login("https://app.revulink.net/dashboard/"));

        assert!(r.is_dashboard("https://app.revulink.net/dashboard/"));
        assert!(r.is_dashboard("https://app.revulink.net/dashboard/reports"));
        assert!(!r.is_dashboard("https://app.revulink.net/login/?app"));
    }

    #[test]
    fn onboarding_pages_match_neither() {
        let r = rules();
        assert!(!r.is_login("revu://localhost/onboarding/intro.html"));
        assert!(!r.is_dashboard("revu://localhost/onboarding/splash.html"));
    }

    // -- Marker handling --

    #[test]
    fn detects_bare_marker() {
        let r = rules();
        assert!(r.has_marker("https://app.revulink.net/login/?app"));
        assert!(r.has_marker("https://app.revulink.net/login/?next=x&app"));
        assert!(r.has_marker("https://app.revulink.net/login/?app=1"));
    }

    #[test]
    fn marker_key_must_match_exactly() {
        let r = rules();
        assert!(!r.has_marker("https://app.revulink.net/login/"));
        assert!(!r.has_marker("https://app.revulink.net/login/?application"));
        assert!(!r.has_marker("https://app.revulink.net/login/?myapp"));
    }

    #[test]
    fn with_marker_respects_existing_query() {
        let r = rules();
        assert_eq!(
            r.with_marker("https://app.revulink.net/login/"),
            "https://app.revulink.net/login/?app"
        );
        assert_eq!(
            r.with_marker("https://app.revulink.net/login/?next=x"),
            "https://app.revulink.net/login/?next=x&app"
        );
    }

    #[test]
    fn marked_login_url_is_target_shape() {
        assert_eq!(
            rules().marked_login_url(),
            "https://app.revulink.net/login/?app"
        );
    }

    // -- Decisions --

    #[test]
    fn bare_login_path_is_rewritten() {
        let r = rules();
        assert_eq!(
            r.decide("https://app.revulink.net/login/"),
            NavDecision::RewriteWithMarker("https://app.revulink.net/login/?app".into())
        );
    }

    #[test]
    fn rewrite_is_idempotent() {
        let r = rules();
        let rewritten = match r.decide("https://app.revulink.net/login/") {
            NavDecision::RewriteWithMarker(url) => url,
            NavDecision::Allow => panic!("bare login must be rewritten"),
        };
        // The reissued URL passes through untouched.
        assert_eq!(r.decide(&rewritten), NavDecision::Allow);
    }

    #[test]
    fn non_login_urls_are_allowed() {
        let r = rules();
        assert_eq!(
            r.decide("https://app.revulink.net/dashboard/"),
            NavDecision::Allow
        );
        assert_eq!(
            r.decide("https://cdn.revulink.net/static/app.js"),
            NavDecision::Allow
        );
        assert_eq!(r.decide("revu://localhost/onboarding/intro.html"), NavDecision::Allow);
        assert_eq!(r.decide("about:blank"), NavDecision::Allow);
    }

    #[test]
    fn login_with_extra_query_keeps_it_on_rewrite() {
        let r = rules();
        assert_eq!(
            r.decide("https://app.revulink.net/login/?next=%2Fdashboard%2F"),
            NavDecision::RewriteWithMarker(
                "https://app.revulink.net/login/?next=%2Fdashboard%2F&app".into()
            )
        );
    }
}
