pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analytics::handlers as analytics;
use crate::auth::handlers as auth;
use crate::generation::handlers as generation;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(session::handle_index))
        .route("/navigate", post(session::handle_navigate))
        // Login / register
        .route("/login", post(auth::handle_login))
        .route("/register", post(auth::handle_register))
        .route("/logout", post(auth::handle_logout))
        // Generation views
        .route("/campaign", post(generation::handle_campaign))
        .route("/pitch", post(generation::handle_pitch))
        .route("/lead", post(generation::handle_lead))
        // Analytics
        .route("/analytics/delete", post(analytics::handle_delete))
        .route("/analytics/export", get(analytics::handle_export))
        .with_state(state)
}
