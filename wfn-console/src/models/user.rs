use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use uuid::Uuid;
use wfn_core::session::ACCESS_TOKEN_KEY;
use wfn_core::{StoreError, TokenStore};

use crate::handlers::redirect_to_login;

/// Session entry identifying one signed-in browser session.
pub const SESSION_KEY: &str = "session_key";
pub const USER_ID_KEY: &str = "user_id";

/// Token storage backed by the server-side session.
#[derive(Clone)]
pub struct SessionTokens(Session);

impl SessionTokens {
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

#[async_trait]
impl TokenStore for SessionTokens {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0
            .get::<String>(key)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0
            .insert(key, value)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }

    /// Logging out drops the whole session, not just the tokens.
    async fn clear(&self) -> Result<(), StoreError> {
        self.0.flush().await.map_err(|e| StoreError(e.to_string()))
    }
}

/// Signed-in user context extracted from the session
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub access_token: String,
    pub session_key: Uuid,
    pub user_id: Option<i64>,
}

impl AuthUser {
    pub async fn from_session(session: &Session) -> Option<Self> {
        let access_token: Option<String> = session.get(ACCESS_TOKEN_KEY).await.unwrap_or(None);
        let session_key: Option<Uuid> = session.get(SESSION_KEY).await.unwrap_or(None);

        match (access_token, session_key) {
            (Some(access_token), Some(session_key)) if !access_token.is_empty() => Some(AuthUser {
                access_token,
                session_key,
                user_id: session.get(USER_ID_KEY).await.unwrap_or(None),
            }),
            _ => None,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Failed to extract session").into_response())?;

        match AuthUser::from_session(&session).await {
            Some(user) => Ok(user),
            None => Err(redirect_to_login(&parts.headers)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;
    use wfn_core::session::REFRESH_TOKEN_KEY;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn session_tokens_round_trip_and_clear() {
        let session = session();
        let tokens = SessionTokens::new(session.clone());

        tokens.save(ACCESS_TOKEN_KEY, "AT").await.unwrap();
        tokens.save(REFRESH_TOKEN_KEY, "RT").await.unwrap();
        assert_eq!(tokens.load(ACCESS_TOKEN_KEY).await.unwrap().as_deref(), Some("AT"));

        tokens.clear().await.unwrap();
        assert_eq!(tokens.load(REFRESH_TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn auth_user_needs_token_and_session_key() {
        let session = session();
        session.insert(ACCESS_TOKEN_KEY, "AT").await.unwrap();
        assert!(AuthUser::from_session(&session).await.is_none());

        let key = Uuid::new_v4();
        session.insert(SESSION_KEY, key).await.unwrap();
        session.insert(USER_ID_KEY, 12_i64).await.unwrap();

        let user = AuthUser::from_session(&session).await.unwrap();
        assert_eq!(user.session_key, key);
        assert_eq!(user.user_id, Some(12));
    }
}
