//! Navigation observer: translates surface lifecycle events into the typed
//! signals the controller consumes.
//!
//! The observer is a pure event-to-signal mapper: inputs are the lifecycle
//! event plus the resolved URL, a cookie snapshot, and the rendered body
//! text; output is an ordered list of [`NavSignal`]s. It owns only the load
//! status and the blank-render retry counters, so the whole pipeline is unit
//! testable without a browser engine.

use std::collections::HashMap;

use revu_common::LoadStatus;
use revu_webview::cookies::{has_auth_evidence, CookieRecord};
use revu_webview::UrlRules;
use tracing::{debug, warn};

/// Signals produced from surface lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavSignal {
    /// Load status moved; surfaced to the presentation layer.
    StatusChanged(LoadStatus),
    /// A login page finished: the remember-me observer script belongs in it.
    InjectRememberObserver,
    /// Dashboard cookies carry auth evidence: the session is remembered.
    SessionRemembered,
    /// Generic page-finished notification with the resolved URL.
    PageFinished { url: String, can_go_back: bool },
    /// The engine rendered a blank page; reissue the load, cache bypassed.
    RetryBlankLoad { url: String },
}

/// Whether a rendered body counts as a blank render.
///
/// Covers the empty document the engine produces on a silent failure and
/// the sentinel strings a failed script evaluation yields.
pub fn is_blank_body(body: &str) -> bool {
    let trimmed = body.trim();
    trimmed.is_empty() || trimmed == "null" || trimmed == "undefined"
}

pub struct NavigationObserver {
    rules: UrlRules,
    status: LoadStatus,
    /// Automatic reloads issued per target after blank renders.
    blank_reloads: HashMap<String, u32>,
    blank_reload_limit: u32,
}

impl NavigationObserver {
    pub fn new(rules: UrlRules, blank_reload_limit: u32) -> Self {
        Self {
            rules,
            status: LoadStatus::Loading,
            blank_reloads: HashMap::new(),
            blank_reload_limit,
        }
    }

    /// Current load status, drives the spinner.
    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// A navigation started.
    pub fn on_started(&mut self) -> Vec<NavSignal> {
        self.status = LoadStatus::Loading;
        vec![NavSignal::StatusChanged(LoadStatus::Loading)]
    }

    /// A navigation finished with the given resolved URL, history state,
    /// cookie snapshot, and rendered body text.
    pub fn on_finished(
        &mut self,
        url: &str,
        can_go_back: bool,
        cookies: &[CookieRecord],
        body: &str,
    ) -> Vec<NavSignal> {
        self.status = LoadStatus::Loaded;
        let mut signals = vec![NavSignal::StatusChanged(LoadStatus::Loaded)];

        if self.rules.is_login(url) {
            signals.push(NavSignal::InjectRememberObserver);
        }

        if self.rules.is_dashboard(url) && has_auth_evidence(cookies) {
            debug!(url = %url, "dashboard cookies carry auth evidence");
            signals.push(NavSignal::SessionRemembered);
        }

        signals.push(NavSignal::PageFinished {
            url: url.to_string(),
            can_go_back,
        });

        if is_blank_body(body) {
            let count = self.blank_reloads.entry(url.to_string()).or_insert(0);
            if *count < self.blank_reload_limit {
                *count += 1;
                warn!(url = %url, attempt = *count, "blank render, reissuing load");
                signals.push(NavSignal::RetryBlankLoad {
                    url: url.to_string(),
                });
            } else {
                warn!(url = %url, "blank render persists, giving up on automatic reload");
            }
        } else {
            self.blank_reloads.remove(url);
        }

        signals
    }

    /// A navigation failed (including provisional failures). No retry: the
    /// failure is surfaced and the user recovers via back or reload.
    pub fn on_failed(&mut self, url: &str) -> Vec<NavSignal> {
        warn!(url = %url, "navigation failed");
        self.status = LoadStatus::Failed;
        vec![NavSignal::StatusChanged(LoadStatus::Failed)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN: &str = "https://app.revulink.net/login/?app";
    const DASHBOARD: &str = "https://app.revulink.net/dashboard/";

    fn observer() -> NavigationObserver {
        let rules = UrlRules {
            login_url: "https://app.revulink.net/login/".into(),
            dashboard_url: DASHBOARD.into(),
            login_pattern: "/login/".into(),
            dashboard_pattern: "/dashboard/".into(),
            marker: "app".into(),
        };
        NavigationObserver::new(rules, 1)
    }

    fn auth_cookie() -> Vec<CookieRecord> {
        vec![CookieRecord::new("session_id", "abc123")]
    }

    // -- Load status --

    #[test]
    fn status_is_loading_before_and_loaded_after_finish() {
        let mut obs = observer();
        let started = obs.on_started();
        assert_eq!(
            started,
            vec![NavSignal::StatusChanged(LoadStatus::Loading)]
        );
        assert_eq!(obs.status(), LoadStatus::Loading);

        let finished = obs.on_finished(LOGIN, false, &[], "Sign in");
        assert_eq!(
            finished[0],
            NavSignal::StatusChanged(LoadStatus::Loaded)
        );
        assert_eq!(obs.status(), LoadStatus::Loaded);
    }

    #[test]
    fn failure_sets_failed_with_no_retry() {
        let mut obs = observer();
        obs.on_started();
        let signals = obs.on_failed(LOGIN);
        assert_eq!(signals, vec![NavSignal::StatusChanged(LoadStatus::Failed)]);
        assert_eq!(obs.status(), LoadStatus::Failed);
    }

    // -- Finish-time ordering --

    #[test]
    fn login_finish_injects_then_reports() {
        let mut obs = observer();
        let signals = obs.on_finished(LOGIN, false, &[], "Sign in");
        assert_eq!(
            signals,
            vec![
                NavSignal::StatusChanged(LoadStatus::Loaded),
                NavSignal::InjectRememberObserver,
                NavSignal::PageFinished {
                    url: LOGIN.into(),
                    can_go_back: false
                },
            ]
        );
    }

    #[test]
    fn dashboard_finish_with_auth_cookie_reports_remembered() {
        let mut obs = observer();
        let signals = obs.on_finished(DASHBOARD, true, &auth_cookie(), "Your links");
        assert_eq!(
            signals,
            vec![
                NavSignal::StatusChanged(LoadStatus::Loaded),
                NavSignal::SessionRemembered,
                NavSignal::PageFinished {
                    url: DASHBOARD.into(),
                    can_go_back: true
                },
            ]
        );
    }

    #[test]
    fn dashboard_finish_without_evidence_stays_silent() {
        let mut obs = observer();
        let cookies = vec![CookieRecord::new("_ga", "GA1.2"), CookieRecord::new("locale", "en")];
        let signals = obs.on_finished(DASHBOARD, true, &cookies, "Your links");
        assert!(!signals.contains(&NavSignal::SessionRemembered));
    }

    #[test]
    fn login_cookies_are_not_inspected() {
        // Cookie inspection only runs on dashboard-pattern pages.
        let mut obs = observer();
        let signals = obs.on_finished(LOGIN, false, &auth_cookie(), "Sign in");
        assert!(!signals.contains(&NavSignal::SessionRemembered));
    }

    #[test]
    fn unrelated_page_only_reports_finish() {
        let mut obs = observer();
        let signals = obs.on_finished("revu://localhost/onboarding/intro.html", false, &[], "Welcome");
        assert_eq!(
            signals,
            vec![
                NavSignal::StatusChanged(LoadStatus::Loaded),
                NavSignal::PageFinished {
                    url: "revu://localhost/onboarding/intro.html".into(),
                    can_go_back: false
                },
            ]
        );
    }

    // -- Blank-render retry --

    #[test]
    fn blank_body_triggers_exactly_one_reload() {
        let mut obs = observer();
        let first = obs.on_finished(LOGIN, false, &[], "");
        assert!(first.contains(&NavSignal::RetryBlankLoad { url: LOGIN.into() }));

        // Second consecutive blank on the same target: no further retry.
        let second = obs.on_finished(LOGIN, false, &[], "  ");
        assert!(!second
            .iter()
            .any(|s| matches!(s, NavSignal::RetryBlankLoad { .. })));
    }

    #[test]
    fn non_blank_finish_resets_the_retry_budget() {
        let mut obs = observer();
        obs.on_finished(LOGIN, false, &[], "");
        obs.on_finished(LOGIN, false, &[], "Sign in");

        let signals = obs.on_finished(LOGIN, false, &[], "");
        assert!(signals.contains(&NavSignal::RetryBlankLoad { url: LOGIN.into() }));
    }

    #[test]
    fn retry_budgets_are_per_target() {
        let mut obs = observer();
        obs.on_finished(LOGIN, false, &[], "");
        let signals = obs.on_finished(DASHBOARD, true, &[], "null");
        assert!(signals.contains(&NavSignal::RetryBlankLoad {
            url: DASHBOARD.into()
        }));
    }

    #[test]
    fn blank_body_classification() {
        assert!(is_blank_body(""));
        assert!(is_blank_body("   \n\t "));
        assert!(is_blank_body("null"));
        assert!(is_blank_body("undefined"));
        assert!(!is_blank_body("Sign in"));
        assert!(!is_blank_body("0"));
    }
}
