//! Inactivity auto-logout.
//!
//! One countdown per signed-in session. Every recorded input event restarts
//! it; when it runs out the monitor expires for good and fires its callback
//! once.

use serde::Deserialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityEvent {
    #[serde(alias = "mousemove")]
    PointerMove,
    #[serde(alias = "keydown")]
    KeyPress,
    Click,
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Active,
    Expired,
}

pub struct InactivityMonitor {
    resets: watch::Sender<u64>,
    expired: Arc<AtomicBool>,
    timeout: Duration,
    task: JoinHandle<()>,
}

impl InactivityMonitor {
    /// Start the countdown. `on_expire` runs at most once, on the monitor's
    /// own task.
    pub fn start<F, Fut>(timeout: Duration, on_expire: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (resets, mut rx) = watch::channel(0u64);
        let expired = Arc::new(AtomicBool::new(false));
        let flag = expired.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(timeout) => break,
                    changed = rx.changed() => {
                        // Sender gone: the monitor was torn down.
                        if changed.is_err() {
                            return;
                        }
                    }
                }
            }

            flag.store(true, Ordering::SeqCst);
            tracing::info!(timeout_secs = timeout.as_secs(), "Session expired after inactivity");
            on_expire().await;
        });

        Self {
            resets,
            expired,
            timeout,
            task,
        }
    }

    /// Restart the countdown. Ignored once expired.
    pub fn record(&self, event: ActivityEvent) -> MonitorState {
        if self.expired.load(Ordering::SeqCst) {
            return MonitorState::Expired;
        }

        tracing::trace!(?event, "Activity recorded");
        self.resets.send_modify(|n| *n = n.wrapping_add(1));
        MonitorState::Active
    }

    pub fn state(&self) -> MonitorState {
        if self.expired.load(Ordering::SeqCst) {
            MonitorState::Expired
        } else {
            MonitorState::Active
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Drop for InactivityMonitor {
    fn drop(&mut self) {
        // An expired monitor may still be running its callback.
        if !self.expired.load(Ordering::SeqCst) {
            self.task.abort();
        }
    }
}
