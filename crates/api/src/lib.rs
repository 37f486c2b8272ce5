pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.app.cors_origins);

    // Stateless evaluation (no auth)
    let readiness_routes = Router::new().route("/evaluate", post(routes::readiness::evaluate));

    // Routes for the authenticated member
    let member_routes = Router::new()
        .route("/readiness", get(routes::readiness::me))
        .route(
            "/payment-intent",
            get(routes::payment_intent::get)
                .put(routes::payment_intent::save)
                .delete(routes::payment_intent::clear),
        );

    let api = Router::new()
        .nest("/readiness", readiness_routes)
        .nest("/members/me", member_routes);

    // Health check
    let health = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(allowed)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
