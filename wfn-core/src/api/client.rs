use crate::api::payload::Payload;
use crate::editor::Resource;
use crate::error::ApiError;
use crate::models::{Credentials, Organization, TokenPair};
use crate::observability::inject_trace_context;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const TOKEN_PATH: &str = "token/";

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Base URL of the REST backend, e.g. `http://localhost:8000/api/`.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    15
}

/// Shared HTTP client for the backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a backend path (`donors/`, `donors/5/`) against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Exchange credentials for an access/refresh token pair.
    ///
    /// This is the only call made without a bearer token.
    pub async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let body = serde_json::json!({
            "username": credentials.username,
            "password": credentials.password.expose_secret(),
        });

        let response = send(self.client.post(self.url(TOKEN_PATH)).json(&body)).await?;
        decode(response, TOKEN_PATH).await
    }

    /// Borrow the client with an access token attached to every request.
    pub fn with_bearer<'a>(&'a self, access_token: &'a str) -> Authorized<'a> {
        Authorized {
            api: self,
            access_token,
        }
    }
}

/// Backend client bound to one access token.
#[derive(Clone, Copy)]
pub struct Authorized<'a> {
    api: &'a ApiClient,
    access_token: &'a str,
}

impl<'a> Authorized<'a> {
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.api
            .client
            .request(method, self.api.url(path))
            .bearer_auth(self.access_token)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = send(self.request(Method::GET, path)).await?;
        decode(response, path).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, payload: Payload) -> Result<T, ApiError> {
        self.send_payload(Method::POST, path, payload).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, payload: Payload) -> Result<T, ApiError> {
        self.send_payload(Method::PUT, path, payload).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn send_payload<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<T, ApiError> {
        let request = payload.apply(self.request(method, path))?;
        let response = send(request).await?;
        decode(response, path).await
    }

    /// Fetch the full collection; the backend does not paginate.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        self.get(&collection_path(R::COLLECTION)).await
    }

    pub async fn create<R: Resource>(&self, payload: Payload) -> Result<R, ApiError> {
        self.post(&collection_path(R::COLLECTION), payload).await
    }

    pub async fn update<R: Resource>(&self, id: i64, payload: Payload) -> Result<R, ApiError> {
        self.put(&item_path(R::COLLECTION, id), payload).await
    }

    pub async fn remove<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&item_path(R::COLLECTION, id)).await
    }

    /// The console assumes a single organization record: the first one listed.
    pub async fn organization(&self) -> Result<Option<Organization>, ApiError> {
        let organizations: Vec<Organization> = self.list().await?;
        Ok(organizations.into_iter().next())
    }
}

pub fn collection_path(collection: &str) -> String {
    format!("{}/", collection)
}

pub fn item_path(collection: &str, id: i64) -> String {
    format!("{}/{}/", collection, id)
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let mut headers = HeaderMap::new();
    inject_trace_context(&mut headers);

    let response = request.headers(headers).send().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to reach backend");
        ApiError::Transport(e)
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, %url, "Backend rejected request");

    Err(ApiError::Status { status, body })
}

async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(ApiError::Transport)?;

    serde_json::from_slice(&bytes).map_err(|source| {
        tracing::error!(path = %path, error = %source, "Unexpected response body");
        ApiError::Decode {
            path: path.to_string(),
            source,
        }
    })
}
