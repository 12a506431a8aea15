use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::{BoxError, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::handlers::api::{
    close_modal, decrement_guests, get_countdown, get_gallery, get_rsvp, increment_guests,
    submit_rsvp, update_form, AppState,
};
use crate::handlers::test::{effects_snapshot, health_check, sample_payload};

/// Server-wide limit on one request, above the relay timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn create_router(app_state: Arc<AppState>, is_production: bool) -> Router {
    let mut router = Router::new();

    // Health check is always available
    let health_route = Router::new().route("/health", get(health_check));
    router = router.merge(health_route);

    // Invitation page routes are always available
    let page_routes = Router::new()
        .route("/countdown", get(get_countdown))
        .route("/gallery", get(get_gallery))
        .route("/rsvp", get(get_rsvp))
        .route("/rsvp/form", patch(update_form))
        .route("/rsvp/submit", post(submit_rsvp))
        .route("/rsvp/modal/close", post(close_modal))
        .route("/guests/:counter/increment", post(increment_guests))
        .route("/guests/:counter/decrement", post(decrement_guests));
    router = router.merge(page_routes);

    // Only add inspection routes if not in production mode
    if !is_production {
        let debug_routes = Router::new()
            .route("/effects", get(effects_snapshot))
            .route("/test/sample-payload", get(sample_payload));

        router = router.merge(debug_routes);

        info!("Inspection routes enabled - server running in development mode");
    } else {
        info!("Running in production mode - inspection routes hidden");
    }

    router.with_state(app_state)
}

/// Wraps a router in the load-shedding, timeout, tracing and CORS stack
pub fn with_middleware(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(move |error: BoxError| {
                handle_error(error, timeout)
            }))
            .load_shed()
            .concurrency_limit(64)
            .timeout(timeout)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::new().allow_origin(Any)),
    )
}

// Map middleware failures to responses
async fn handle_error(error: BoxError, timeout: Duration) -> (StatusCode, String) {
    if error.is::<tower::timeout::error::Elapsed>() {
        warn!("Request exceeded {:?}", timeout);
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else if error.is::<tower::load_shed::error::Overloaded>() {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "Too many requests in flight".to_string(),
        )
    } else {
        error!("Middleware error: {}", error);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {}", error),
        )
    }
}
