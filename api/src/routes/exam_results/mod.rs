//! Exam result routes under `/api/exam-results`.
//!
//! - `POST   /exam-results/submit`      → grade and record a submission
//! - `GET    /exam-results`             → paginated result history
//! - `GET    /exam-results/{result_id}` → one result with its review
//! - `DELETE /exam-results/{result_id}` → remove a result (admin only)
//!
//! Submit and the reads are policy-checked rather than admin-gated: a
//! non-admin caller may only touch results they own. Each handler declares
//! its [`crate::policy::Policy`] next to its request type.

use crate::auth::guards::allow_admin;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};
use util::state::AppState;

use delete::delete_result;
use get::{get_result, list_results};
use post::submit_exam;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

pub fn exam_result_routes() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit_exam))
        .route("/", get(list_results))
        .route("/{result_id}", get(get_result))
        .route(
            "/{result_id}",
            delete(delete_result).route_layer(from_fn(allow_admin)),
        )
}
