pub mod app;
pub mod auth;
pub mod documents;
pub mod entity;
pub mod forms;
pub mod metrics;
pub mod overview;
pub mod session;

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

/// Browser event the page script turns into a blocking `alert()`.
pub const ALERT_EVENT: &str = "wfn:alert";

pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("HX-Request")
}

/// Full-page navigation for htmx requests, a plain redirect otherwise.
pub fn hx_redirect(headers: &HeaderMap, to: &'static str) -> Response {
    if is_htmx(headers) {
        let mut response = StatusCode::OK.into_response();
        response
            .headers_mut()
            .insert("HX-Redirect", HeaderValue::from_static(to));
        response
    } else {
        Redirect::to(to).into_response()
    }
}

pub fn redirect_to_login(headers: &HeaderMap) -> Response {
    hx_redirect(headers, "/login")
}

/// Show `message` in a blocking alert and leave the page as it is.
pub fn alert(message: &str) -> Response {
    let trigger = serde_json::json!({ ALERT_EVENT: { "message": message } }).to_string();

    let mut response = StatusCode::OK.into_response();
    let headers = response.headers_mut();
    headers.insert("HX-Reswap", HeaderValue::from_static("none"));
    if let Ok(value) = HeaderValue::from_str(&trigger) {
        headers.insert("HX-Trigger", value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_carries_message_and_suppresses_swap() {
        let response = alert("Please fill in all required fields.");
        let trigger = response.headers()["HX-Trigger"].to_str().unwrap();
        let value: serde_json::Value = serde_json::from_str(trigger).unwrap();

        assert_eq!(value[ALERT_EVENT]["message"], "Please fill in all required fields.");
        assert_eq!(response.headers()["HX-Reswap"], "none");
    }

    #[test]
    fn htmx_requests_get_hx_redirect() {
        let mut headers = HeaderMap::new();
        assert_eq!(redirect_to_login(&headers).status(), StatusCode::SEE_OTHER);

        headers.insert("HX-Request", HeaderValue::from_static("true"));
        let response = redirect_to_login(&headers);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["HX-Redirect"], "/login");
    }
}
