#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wfn_console::config::SessionSettings;
use wfn_console::startup::build_router;
use wfn_console::AppState;
use wfn_core::{ApiClient, ApiSettings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BOUNDARY: &str = "wfn-test-boundary";

/// The console router wired to a mocked REST backend.
pub struct TestApp {
    pub backend: MockServer,
    pub router: Router,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;
        let api = ApiClient::new(&ApiSettings {
            base_url: format!("{}/api/", backend.uri()),
            timeout_secs: 5,
        })
        .expect("Failed to build API client");

        let state = AppState::new(api, &SessionSettings::default());
        let router = build_router(state, false);

        Self { backend, router }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request")
    }

    /// Sign in through the login form and return the session cookie.
    pub async fn login(&self) -> String {
        Mock::given(method("POST"))
            .and(path("/api/token/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "AT", "refresh": "RT"})))
            .mount(&self.backend)
            .await;

        let response = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .header("HX-Request", "true")
                    .body(Body::from("username=admin&password=secret"))
                    .unwrap(),
            )
            .await;

        assert_eq!(response.headers()["HX-Redirect"], "/overview");
        session_cookie(&response)
    }

    pub async fn mock_list(&self, collection: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/{}/", collection)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.backend)
            .await;
    }
}

pub fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("No session cookie set")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

pub fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn multipart(fields: &[(&str, &str)]) -> Body {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    Body::from(body)
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

pub fn donor_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.org", name.to_lowercase()),
        "phone": "98450 00000",
        "donor_type": "Individual"
    })
}
