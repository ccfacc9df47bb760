//! HTTP layer: Axum routes, shared state, and auth middleware.

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use moneta_shared::JwtService;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Issues and verifies bearer tokens.
    pub jwt_service: Arc<JwtService>,
}

/// Builds the full application router.
///
/// `/health` stays at the root; everything else is nested under
/// `/api/v1`. All responses pass through trace and permissive CORS
/// layers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
