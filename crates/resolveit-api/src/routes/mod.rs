//! Route definitions
//!
//! All API routes organized by audience and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{admin, auth, complaints, health};
use crate::state::AppState;

/// Public prefix of stored attachments
pub const UPLOADS_PATH: &str = "/uploads";

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Static attachment files
pub fn upload_routes(upload_dir: &str) -> Router<AppState> {
    Router::new().nest_service(UPLOADS_PATH, ServeDir::new(upload_dir))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(complaint_routes())
        .merge(admin_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

/// Submission, tracking and submitter listings
fn complaint_routes() -> Router<AppState> {
    Router::new()
        .route("/complaints", post(complaints::create_complaint))
        .route("/complaints/track/:identifier", get(complaints::track_complaint))
        .route("/complaints/anonymous", get(complaints::list_anonymous))
        .route("/users/@me/complaints", get(complaints::list_my_complaints))
        .route("/users/:user_id/complaints", get(complaints::list_user_complaints))
        // Older clients
        .route("/user-complaints/:user_id", get(complaints::list_legacy))
}

/// Admin routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/complaints", get(admin::list_complaints))
        .route("/admin/complaints/:id", put(admin::update_complaint))
        .route("/admin/complaints/:id/timeline", get(admin::complaint_timeline))
        .route("/admin/stats", get(admin::stats))
        .route("/admin/export", get(admin::export))
        .route("/admin/escalation/run", post(admin::run_escalation))
        .route("/admin/escalation-rules", get(admin::list_escalation_rules))
        .route("/admin/escalation-rules/:urgency", put(admin::upsert_escalation_rule))
}
