pub mod config;
pub mod documents;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod services;
pub mod startup;
pub mod utils;

use config::SessionSettings;
use services::{activity::ActivityRegistry, pages::PageStore};
use std::sync::Arc;
use wfn_core::ApiClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub activity: Arc<ActivityRegistry>,
    pub pages: Arc<PageStore>,
    pub status_poll_secs: u64,
}

impl AppState {
    pub fn new(api: ApiClient, session: &SessionSettings) -> Self {
        Self {
            api,
            activity: Arc::new(ActivityRegistry::new(session.inactivity_timeout())),
            pages: Arc::new(PageStore::default()),
            status_poll_secs: session.status_poll_secs,
        }
    }
}
