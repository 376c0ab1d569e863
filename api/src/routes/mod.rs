//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/auth` → registration and login (public)
//! - `/quizzes` → quiz bank management (authenticated; writes admin-only)
//! - `/exams` → exam management (authenticated; writes admin-only)
//! - `/exam-results` → submission grading, review and history (authenticated)

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    auth::auth_routes, exam_results::exam_result_routes, exams::exam_routes,
    health::health_routes, quizzes::quiz_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod auth;
pub mod common;
pub mod exam_results;
pub mod exams;
pub mod health;
pub mod quizzes;

/// Builds the complete application router for all HTTP endpoints.
///
/// Registration stays centralized here so `main` only deals with server
/// startup. Group-level guards run before any per-route admin guard.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/quizzes",
            quiz_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/exams",
            exam_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/exam-results",
            exam_result_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
