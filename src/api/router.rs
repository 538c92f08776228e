use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Positions (table view data source)
        .route(
            "/api/positions",
            get(handlers::positions::list).post(handlers::positions::create),
        )
        .route(
            "/api/positions/:id",
            get(handlers::positions::detail)
                .put(handlers::positions::update)
                .delete(handlers::positions::remove),
        )
        // Manual refresh trigger
        .route("/api/refresh", axum::routing::post(handlers::refresh::trigger))
        // Chart time-series
        .route("/api/charts/:id/:range", get(handlers::charts::data))
        // Symbol search
        .route("/api/search", get(handlers::search::search));

    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Single-tenant panel; the dashboard frontend may be served from
    // anywhere, so CORS stays open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
