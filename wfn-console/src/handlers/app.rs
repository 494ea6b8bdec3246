use axum::response::{IntoResponse, Redirect};
use tower_sessions::Session;

use crate::models::AuthUser;

pub async fn index(session: Session) -> impl IntoResponse {
    if AuthUser::from_session(&session).await.is_some() {
        Redirect::to("/overview")
    } else {
        Redirect::to("/login")
    }
}

pub async fn health_check() -> impl IntoResponse {
    "OK"
}
