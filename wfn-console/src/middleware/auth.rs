use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;
use wfn_core::MonitorState;

use crate::handlers::redirect_to_login;
use crate::models::AuthUser;
use crate::AppState;

/// Gate for every page behind the login.
///
/// A session whose inactivity monitor is gone (expired, or lost in a
/// restart) is flushed and sent back to the login page.
pub async fn require_session(
    State(state): State<AppState>,
    session: Session,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(user) = AuthUser::from_session(&session).await else {
        return redirect_to_login(request.headers());
    };

    if state.activity.state(user.session_key) == MonitorState::Expired {
        tracing::info!(session_key = %user.session_key, "Session no longer active");
        state.pages.drop_session(user.session_key);
        if let Err(e) = session.flush().await {
            tracing::error!(error = %e, "Failed to flush inactive session");
        }
        return redirect_to_login(request.headers());
    }

    next.run(request).await
}
