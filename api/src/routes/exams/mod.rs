//! Exam routes under `/api/exams`.
//!
//! - `GET    /exams`           → paginated list with filters
//! - `GET    /exams/{exam_id}` → single exam with its quiz membership
//! - `POST   /exams`           → create (admin only)
//! - `PUT    /exams/{exam_id}` → full update (admin only)
//! - `DELETE /exams/{exam_id}` → delete (admin only)

use crate::auth::guards::allow_admin;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use delete::delete_exam;
use get::{get_exam, list_exams};
use post::create_exam;
use put::edit_exam;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub fn exam_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exams))
        .route("/", post(create_exam).route_layer(from_fn(allow_admin)))
        .route("/{exam_id}", get(get_exam))
        .route(
            "/{exam_id}",
            put(edit_exam).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{exam_id}",
            delete(delete_exam).route_layer(from_fn(allow_admin)),
        )
}
