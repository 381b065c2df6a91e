//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router. The literal time-slots path is registered next
    // to the {id} capture; literal segments win the match.
    let api = Router::new()
        // Class slot CRUD
        .route("/class-slots", get(handlers::list_class_slots))
        .route("/class-slots", post(handlers::create_class_slot))
        .route("/class-slots/time-slots", get(handlers::get_time_slots))
        .route("/class-slots/{id}", get(handlers::get_class_slot))
        .route("/class-slots/{id}", put(handlers::update_class_slot))
        .route("/class-slots/{id}", delete(handlers::delete_class_slot))
        .route(
            "/class-slots/semester/{semester_name}",
            get(handlers::get_semester_class_slots),
        )
        // Full routine mirror and reschedule
        .route("/full-routines", get(handlers::list_full_routines))
        .route("/full-routines/{id}", get(handlers::get_full_routine))
        .route("/full-routines/{id}", put(handlers::reschedule_full_routine));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        // Slot and reschedule payloads are small JSON bodies.
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
