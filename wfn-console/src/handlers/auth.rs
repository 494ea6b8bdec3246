use askama::Template;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;
use uuid::Uuid;
use wfn_core::models::Credentials;
use wfn_core::SessionManager;

use crate::error::ConsoleError;
use crate::handlers::hx_redirect;
use crate::models::user::{SessionTokens, SESSION_KEY, USER_ID_KEY};
use crate::models::AuthUser;
use crate::utils::jwt::decode_jwt_claims;
use crate::AppState;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {}

pub async fn login_page(session: Session) -> Response {
    if AuthUser::from_session(&session).await.is_some() {
        return Redirect::to("/overview").into_response();
    }
    LoginTemplate {}.into_response()
}

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(credentials): Form<Credentials>,
) -> Result<Response, ConsoleError> {
    // A fresh id for the signed-in session; the anonymous one is discarded.
    session.cycle_id().await?;

    let manager = SessionManager::new(&state.api, SessionTokens::new(session.clone()));
    let tokens = match manager.login(&credentials).await {
        Ok(tokens) => tokens,
        Err(_) => {
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html("<p class='error'>Invalid username or password</p>"),
            )
                .into_response())
        }
    };

    let session_key = Uuid::new_v4();
    session.insert(SESSION_KEY, session_key).await?;

    match decode_jwt_claims(&tokens.access) {
        Ok(claims) => {
            session.insert(USER_ID_KEY, claims.user_id).await?;
            tracing::info!(user_id = claims.user_id, %session_key, "User signed in");
        }
        Err(e) => tracing::warn!(error = %e, %session_key, "Access token claims unreadable"),
    }

    state
        .activity
        .start(session_key, session, state.api.clone(), state.pages.clone());

    Ok(hx_redirect(&headers, "/overview"))
}

pub async fn logout_handler(State(state): State<AppState>, session: Session) -> Response {
    if let Some(user) = AuthUser::from_session(&session).await {
        state.activity.stop(user.session_key);
        state.pages.drop_session(user.session_key);
    }

    let manager = SessionManager::new(&state.api, SessionTokens::new(session));
    if let Err(e) = manager.logout().await {
        tracing::error!(error = %e, "Failed to clear session on logout");
    }

    Redirect::to("/login").into_response()
}
