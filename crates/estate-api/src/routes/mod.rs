//! Route definitions
//!
//! All API routes organized by domain.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, favorites, health, properties};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(property_routes())
        .merge(favorite_routes())
        .merge(user_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session_check))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
}

/// Property routes
fn property_routes() -> Router<AppState> {
    Router::new()
        // Catalog and listing CRUD
        .route("/properties", get(properties::list_properties))
        .route("/properties", post(properties::create_property))
        // The GET path parameter accepts either a numeric id or a slug
        .route("/properties/:id", get(properties::get_property))
        .route("/properties/:id", put(properties::update_property))
        .route("/properties/:id", delete(properties::delete_property))
        // Lifecycle transitions
        .route("/properties/:id/approve", post(properties::approve_property))
        .route("/properties/:id/reject", post(properties::reject_property))
        .route("/properties/:id/restore", post(properties::restore_property))
        // View counting
        .route("/properties/:id/view", post(properties::record_view))
}

/// Favorite routes
fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(favorites::list_favorites))
        .route("/favorites", post(favorites::create_favorite))
        .route("/favorites", delete(favorites::delete_favorite_by_property))
        .route("/favorites/:id", delete(favorites::delete_favorite))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/@me/properties", get(properties::list_own_properties))
}
