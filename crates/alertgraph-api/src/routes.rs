use crate::{handlers, AppState};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))

        // Alerts
        .route("/api/alerts", get(handlers::list_alerts))
        .route("/api/alerts/{id}/dismiss", post(handlers::dismiss_alert))

        // Directory
        .route("/api/managers", get(handlers::list_managers))

        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)

        // Add state
        .with_state(state)

        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}
