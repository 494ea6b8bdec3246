//! One inactivity monitor per signed-in browser session.

use crate::models::user::SessionTokens;
use crate::services::pages::PageStore;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tower_sessions::Session;
use uuid::Uuid;
use wfn_core::{ActivityEvent, ApiClient, InactivityMonitor, MonitorState, SessionManager};

pub struct ActivityRegistry {
    monitors: Arc<DashMap<Uuid, InactivityMonitor>>,
    timeout: Duration,
}

impl ActivityRegistry {
    pub fn new(timeout: Duration) -> Self {
        Self {
            monitors: Arc::new(DashMap::new()),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start watching a freshly signed-in session. On expiry the session's
    /// tokens are cleared and its cached pages dropped.
    pub fn start(&self, session_key: Uuid, session: Session, api: ApiClient, pages: Arc<PageStore>) {
        let monitors = self.monitors.clone();

        let monitor = InactivityMonitor::start(self.timeout, move || async move {
            let manager = SessionManager::new(&api, SessionTokens::new(session));
            if let Err(e) = manager.logout().await {
                tracing::error!(%session_key, error = %e, "Failed to clear expired session");
            }
            pages.drop_session(session_key);
            monitors.remove(&session_key);
            tracing::info!(%session_key, "Logged out after inactivity");
        });

        // A re-login under the same key replaces (and cancels) the old monitor.
        self.monitors.insert(session_key, monitor);
    }

    /// Report browser input. Unknown sessions count as expired.
    pub fn record(&self, session_key: Uuid, event: ActivityEvent) -> MonitorState {
        self.monitors
            .get(&session_key)
            .map(|monitor| monitor.record(event))
            .unwrap_or(MonitorState::Expired)
    }

    pub fn state(&self, session_key: Uuid) -> MonitorState {
        self.monitors
            .get(&session_key)
            .map(|monitor| monitor.state())
            .unwrap_or(MonitorState::Expired)
    }

    /// Explicit logout: cancel the countdown without firing it.
    pub fn stop(&self, session_key: Uuid) {
        self.monitors.remove(&session_key);
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}
