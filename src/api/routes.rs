//! Routing definitions for the task gateway.

use axum::Json;
use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::dto::HealthResponse;
use crate::api::handlers;
use crate::api::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Router Creation
// =============================================================================

/// Creates the router with every endpoint, request tracing and CORS.
///
/// ```ignore
/// let state = AppState::in_memory(AppConfig::default())?;
/// let router = create_router(state);
/// ```
pub fn create_router(state: AppState) -> Router {
    let tasks = Router::new()
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/api/tasks/{id}/title", post(handlers::modify_title))
        .route("/api/tasks/{id}/complete", post(handlers::complete_task))
        .route("/api/tasks/{id}/star", post(handlers::star_task))
        .route("/api/tasks/{id}/unstar", post(handlers::unstar_task))
        .route("/api/tasks/{id}/delete", delete(handlers::delete_task))
        .route("/api/tasks/{id}/restore", put(handlers::restore_task))
        .route("/api/notifications", get(handlers::list_notifications));

    Router::new()
        .route("/health", get(health_check))
        .merge(tasks)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
