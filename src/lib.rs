//! Vocabulary learning backend.
//!
//! SQLite-backed, owner-scoped vocabulary CRUD with pending-word queues and
//! aggregate stats, exposed over REST behind bearer-token auth. The [`store`]
//! module additionally offers the view-state container consumed by
//! presentation layers embedding this crate.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use service::VocabularyService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: VocabularyService,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the secret for the auth layer
    let jwt_secret = state.config.jwt_secret.clone();

    // API routes
    let api_routes = Router::new()
        .route("/vocabularies", get(api::list_vocabularies))
        .route("/vocabularies", post(api::create_vocabulary))
        .route("/vocabularies/bulk", post(api::create_vocabularies_bulk))
        .route("/vocabularies/pending", get(api::list_pending_words))
        .route("/vocabularies/stats", get(api::get_stats))
        .route("/vocabularies/{id}", get(api::get_vocabulary))
        .route("/vocabularies/{id}", put(api::update_vocabulary))
        .route("/vocabularies/{id}", delete(api::delete_vocabulary))
        // Apply bearer auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::bearer_auth_layer(jwt_secret.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
