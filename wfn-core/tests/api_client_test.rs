mod common;

use common::{donor_json, TestBackend, ACCESS_TOKEN};
use wfn_core::models::{Credentials, Donor, Organization};
use wfn_core::ApiError;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn obtain_token_posts_credentials() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(serde_json::json!({"username": "a", "password": "b"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"access": "AT", "refresh": "RT"})),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let tokens = backend
        .api
        .obtain_token(&Credentials::new("a", "b"))
        .await
        .expect("Token request failed");

    assert_eq!(tokens.access, "AT");
    assert_eq!(tokens.refresh, "RT");
}

#[tokio::test]
async fn list_attaches_bearer_token() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("GET"))
        .and(path("/api/donors/"))
        .and(header("authorization", "Bearer AT"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([donor_json(1, "Asha"), donor_json(2, "Ravi")])),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let donors: Vec<Donor> = backend
        .api
        .with_bearer(ACCESS_TOKEN)
        .list()
        .await
        .expect("List request failed");

    assert_eq!(donors.len(), 2);
    assert_eq!(donors[1].name, "Ravi");
}

#[tokio::test]
async fn missing_organization_is_none() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations/"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&backend.server)
        .await;

    let organization: Option<Organization> = backend
        .api
        .with_bearer(ACCESS_TOKEN)
        .organization()
        .await
        .expect("Organization request failed");

    assert!(organization.is_none());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("DELETE"))
        .and(path("/api/donors/9/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&backend.server)
        .await;

    let err = backend
        .api
        .with_bearer(ACCESS_TOKEN)
        .remove::<Donor>(9)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    match err {
        ApiError::Status { body, .. } => assert_eq!(body, "token expired"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("GET"))
        .and(path("/api/donors/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&backend.server)
        .await;

    let err = backend
        .api
        .with_bearer(ACCESS_TOKEN)
        .list::<Donor>()
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode { ref path, .. } if path == "donors/"));
}
