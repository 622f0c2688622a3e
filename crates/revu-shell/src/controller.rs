//! Host controller: the view-level state machine.
//!
//! Owns the shell phase, the authentication phase, and the navigation
//! target. Reacts to observer signals and onboarding input, and expresses
//! side effects as drained [`ShellCommand`]s plus broadcast [`ShellEvent`]s,
//! so the whole machine runs in unit tests with no engine behind it.
//!
//! The two timed transitions (splash dismissal, post-login dashboard hop)
//! are deadline-based tasks checked in [`HostController::tick`], keyed by a
//! generation token that bumps on every navigation-target change, so a
//! superseded delay can never fire against a stale state.

use std::time::{Duration, Instant};

use revu_common::{AuthPhase, EventBus, NavigationTarget, ShellEvent, ShellPhase};
use revu_config::schema::{TimingConfig, WebConfig};
use revu_webview::bridge::REMEMBER_OBSERVER_SCRIPT;
use revu_webview::UrlRules;
use tracing::{debug, warn};

use crate::observer::NavSignal;
use crate::session::SessionStore;

/// Side effects for the surface, drained and applied by the app loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Load a URL, cache bypassed. `revision` distinguishes repeat loads of
    /// the same URL as distinct presentation instances.
    Load { url: String, revision: u64 },
    /// Evaluate a script in the current page.
    InjectScript { source: String },
    /// Step back in the engine's history.
    GoBack,
    /// Leave the web screen (back to the onboarding intro).
    Dismiss,
}

/// Build URL rules from the configured well-known URLs.
pub fn rules_from(web: &WebConfig) -> UrlRules {
    UrlRules {
        login_url: web.login_url(),
        dashboard_url: web.dashboard_url(),
        login_pattern: web.login_path.clone(),
        dashboard_pattern: web.dashboard_path.clone(),
        marker: web.app_marker.clone(),
    }
}

struct ScheduledHop {
    generation: u64,
    due: Instant,
}

pub struct HostController {
    rules: UrlRules,
    hop_delay: Duration,
    session: SessionStore,
    bus: EventBus,

    phase: ShellPhase,
    auth: AuthPhase,
    target: NavigationTarget,
    /// Bumped on every target *change*; pending timers carry the generation
    /// they were scheduled under and are dropped on mismatch.
    generation: u64,
    splash_deadline: Option<Instant>,
    hop: Option<ScheduledHop>,
    commands: Vec<ShellCommand>,
}

impl HostController {
    pub fn new(rules: UrlRules, timing: &TimingConfig, session: SessionStore, bus: EventBus) -> Self {
        let target = NavigationTarget::new(rules.marked_login_url());
        Self {
            hop_delay: duration_from(timing.auth_hop_secs),
            rules,
            session,
            bus,
            phase: ShellPhase::Splash,
            auth: AuthPhase::Idle,
            target,
            generation: 0,
            splash_deadline: Some(Instant::now() + duration_from(timing.splash_secs)),
            hop: None,
            commands: Vec::new(),
        }
    }

    pub fn phase(&self) -> ShellPhase {
        self.phase
    }

    pub fn auth_phase(&self) -> AuthPhase {
        self.auth
    }

    pub fn target(&self) -> &NavigationTarget {
        &self.target
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The bus carrying phase / auth / load-status changes.
    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Drain pending surface commands.
    pub fn drain_commands(&mut self) -> Vec<ShellCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Advance deadline-based transitions. Called every loop turn.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.phase == ShellPhase::Splash {
            if let Some(deadline) = self.splash_deadline {
                if now >= deadline {
                    self.splash_deadline = None;
                    self.set_phase(ShellPhase::Intro);
                }
            }
        }

        if let Some(hop) = self.hop.take() {
            if hop.generation != self.generation {
                // Target moved while the hop was pending; it must not fire.
                debug!("dropping stale dashboard hop");
            } else if now >= hop.due {
                debug!("remembered session: hopping to dashboard");
                let url = self.rules.dashboard_url.clone();
                self.set_target(url);
            } else {
                self.hop = Some(hop);
            }
        }
    }

    /// The user finished the intro screen.
    ///
    /// The intro is always shown, remembered or not; a remembered session
    /// changes what happens now: the blocking authenticating overlay goes
    /// up and the login load doubles as an automatic sign-in.
    pub fn continue_to_app(&mut self) {
        if self.phase != ShellPhase::Intro {
            warn!(phase = ?self.phase, "continue ignored outside the intro");
            return;
        }
        if self.session.remembered() {
            self.set_auth(AuthPhase::Authenticating);
            self.set_phase(ShellPhase::Authenticating);
        } else {
            self.set_phase(ShellPhase::LoginPending);
        }
        let url = self.rules.marked_login_url();
        self.set_target(url);
    }

    /// Consume one observer signal.
    pub fn handle_signal(&mut self, signal: NavSignal) {
        match signal {
            NavSignal::StatusChanged(status) => {
                self.bus.publish(ShellEvent::LoadStatusChanged(status));
            }
            NavSignal::InjectRememberObserver => {
                self.commands.push(ShellCommand::InjectScript {
                    source: REMEMBER_OBSERVER_SCRIPT.to_string(),
                });
            }
            NavSignal::SessionRemembered => {
                self.session.set_remembered(true);
            }
            NavSignal::PageFinished { url, .. } => {
                self.page_finished(&url);
            }
            NavSignal::RetryBlankLoad { url } => {
                self.retry_blank(&url);
            }
        }
    }

    /// A remember-me change reported over the script bridge.
    pub fn remember_changed(&mut self, remembered: bool) {
        self.session.set_remembered(remembered);
    }

    /// The shell back control was pressed.
    ///
    /// On a login page with no history left, the target resets to the login
    /// URL with a fresh revision instead of dismissing; the login screen is
    /// the floor of the web experience. Anywhere else the engine's history
    /// wins, falling back to dismissing the web screen entirely.
    pub fn back_pressed(&mut self, can_go_back: bool, current_url: &str) {
        if matches!(self.phase, ShellPhase::Splash | ShellPhase::Intro) {
            return;
        }

        if !can_go_back && self.rules.is_login(current_url) {
            let url = self.rules.marked_login_url();
            if self.target.url == url {
                self.refresh_target();
            } else {
                self.set_target(url);
            }
        } else if can_go_back {
            self.commands.push(ShellCommand::GoBack);
        } else {
            // No history left and not on the login page: leave the web
            // screen. Any pending hop dies with the dismissed screen.
            self.generation += 1;
            self.hop = None;
            if self.auth != AuthPhase::Idle {
                self.set_auth(AuthPhase::Idle);
            }
            self.set_phase(ShellPhase::Intro);
            self.commands.push(ShellCommand::Dismiss);
        }
    }

    fn page_finished(&mut self, url: &str) {
        if self.auth == AuthPhase::Authenticating
            && self.rules.is_login(url)
            && self.hop.is_none()
        {
            // Give the remote site the delay window to act on the
            // pre-authenticated session before forcing navigation.
            debug!(url = %url, "login finished during automatic sign-in, scheduling hop");
            self.hop = Some(ScheduledHop {
                generation: self.generation,
                due: Instant::now() + self.hop_delay,
            });
        }

        if self.rules.is_dashboard(url) {
            if self.auth != AuthPhase::Idle {
                self.set_auth(AuthPhase::Idle);
            }
            if matches!(
                self.phase,
                ShellPhase::LoginPending | ShellPhase::Authenticating
            ) {
                self.set_phase(ShellPhase::Dashboard);
            }
        }
    }

    fn retry_blank(&mut self, url: &str) {
        // The retry adopts the resolved URL but keeps the generation: a
        // pending hop survives a blank reload of the login page.
        self.target.url = url.to_string();
        self.refresh_target();
    }

    /// Point the surface at a new URL. Bumps the generation (cancelling
    /// pending timers) and the revision (forcing a fresh presentation).
    fn set_target(&mut self, url: String) {
        self.generation += 1;
        self.hop = None;
        self.target.url = url;
        self.refresh_target();
    }

    /// Reissue the current target with a fresh revision.
    fn refresh_target(&mut self) {
        self.target.revision += 1;
        debug!(
            url = %self.target.url,
            revision = self.target.revision,
            generation = self.generation,
            "navigation target set"
        );
        self.commands.push(ShellCommand::Load {
            url: self.target.url.clone(),
            revision: self.target.revision,
        });
    }

    fn set_phase(&mut self, phase: ShellPhase) {
        if self.phase == phase {
            return;
        }
        debug!(from = ?self.phase, to = ?phase, "shell phase");
        self.phase = phase;
        self.bus.publish(ShellEvent::PhaseChanged(phase));
    }

    fn set_auth(&mut self, auth: AuthPhase) {
        if self.auth == auth {
            return;
        }
        debug!(?auth, "authentication phase");
        self.auth = auth;
        self.bus.publish(ShellEvent::AuthChanged(auth));
    }
}

fn duration_from(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}
