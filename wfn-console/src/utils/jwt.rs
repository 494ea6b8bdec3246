use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use thiserror::Error;

/// Claims carried by the backend's access token.
#[derive(Debug, Deserialize)]
pub struct JwtClaims {
    pub user_id: i64,
    pub exp: i64,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub jti: Option<String>,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Invalid JWT format")]
    Format,
    #[error("Failed to decode JWT payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Failed to parse JWT claims: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Decode JWT claims without validation
///
/// The token came straight from the backend's token endpoint; only the user id
/// is read, for logging and session context.
pub fn decode_jwt_claims(token: &str) -> Result<JwtClaims, JwtError> {
    let parts: Vec<&str> = token.split('.').collect();

    if parts.len() != 3 {
        return Err(JwtError::Format);
    }

    let payload = general_purpose::URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('='))?;
    Ok(serde_json::from_slice(&payload)?)
}
