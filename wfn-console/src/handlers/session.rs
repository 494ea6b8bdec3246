//! Endpoints the page script uses to keep the inactivity timer honest.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use wfn_core::{ActivityEvent, MonitorState};

use crate::handlers::redirect_to_login;
use crate::models::AuthUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ActivityBeacon {
    pub event: ActivityEvent,
}

/// Browser input (pointer, key, click, scroll) restarts the countdown.
pub async fn record_activity(
    State(state): State<AppState>,
    session: Session,
    Json(beacon): Json<ActivityBeacon>,
) -> Response {
    let Some(user) = AuthUser::from_session(&session).await else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match state.activity.record(user.session_key, beacon.event) {
        MonitorState::Active => StatusCode::NO_CONTENT.into_response(),
        MonitorState::Expired => StatusCode::UNAUTHORIZED.into_response(),
    }
}

/// Polled by every signed-in page; sends the browser to the login page once
/// the session has lapsed.
pub async fn session_status(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Response {
    match AuthUser::from_session(&session).await {
        Some(user) if state.activity.state(user.session_key) == MonitorState::Active => {
            StatusCode::NO_CONTENT.into_response()
        }
        _ => redirect_to_login(&headers),
    }
}
