use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
    Router,
};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use wfn_core::models::{Donation, Donor, Expense, Organization, Program, SubProgram};

use crate::handlers::{
    app::{health_check, index},
    auth::{login_handler, login_page, logout_handler},
    documents::{donation_receipt, program_report},
    entity,
    metrics::metrics,
    overview::overview_handler,
    session::{record_activity, session_status},
};
use crate::middleware::{
    auth::require_session, metrics::metrics_middleware, request_id::request_id_middleware,
};
use crate::pages::EntityPage;
use crate::AppState;

/// List page plus its htmx fragment endpoints under `/{collection}`.
fn entity_routes<R: EntityPage>() -> Router<AppState> {
    let base = format!("/{}", R::COLLECTION);

    Router::new()
        .route(&base, get(entity::list_page::<R>))
        .route(&format!("{base}/rows"), get(entity::rows::<R>))
        .route(&format!("{base}/save"), post(entity::save::<R>))
        .route(&format!("{base}/cancel"), post(entity::cancel::<R>))
        .route(&format!("{base}/:id/edit"), get(entity::edit::<R>))
        .route(&format!("{base}/:id"), delete(entity::delete::<R>))
}

pub fn build_router(state: AppState, secure_cookies: bool) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure_cookies)
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    let signed_in = Router::new()
        .route("/overview", get(overview_handler))
        .merge(entity_routes::<Donor>())
        .merge(entity_routes::<Donation>())
        .merge(entity_routes::<Program>())
        .merge(entity_routes::<SubProgram>())
        .merge(entity_routes::<Expense>())
        .merge(entity_routes::<Organization>())
        .route("/donations/:id/receipt", get(donation_receipt))
        .route("/programs/:id/report", get(program_report))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/login", get(login_page).post(login_handler))
        .route("/logout", get(logout_handler))
        .route("/session/activity", post(record_activity))
        .route("/session/status", get(session_status))
        .merge(signed_in)
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
