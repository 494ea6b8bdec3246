#![allow(dead_code)]

use serde_json::{json, Value};
use wfn_core::{ApiClient, ApiSettings};
use wiremock::MockServer;

pub const ACCESS_TOKEN: &str = "AT";
pub const REFRESH_TOKEN: &str = "RT";

/// A mocked REST backend plus a client pointed at it.
pub struct TestBackend {
    pub server: MockServer,
    pub api: ApiClient,
}

impl TestBackend {
    pub async fn spawn() -> Self {
        let server = MockServer::start().await;
        let api = ApiClient::new(&ApiSettings {
            base_url: format!("{}/api/", server.uri()),
            timeout_secs: 5,
        })
        .expect("Failed to build API client");

        Self { server, api }
    }
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

pub fn donation_json(id: i64, donor: Value, amount: &str) -> Value {
    json!({
        "id": id,
        "donor": donor,
        "amount": amount,
        "date": "2024-03-09",
        "method": "Online",
        "description": null,
        "receipt_generated": false
    })
}

pub fn program_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "start_date": "2024-01-01",
        "end_date": "2024-12-31",
        "total_budget": "10000.00",
        "is_active": true
    })
}
