//! Quiz bank routes under `/api/quizzes`.
//!
//! - `GET    /quizzes`           → paginated list with filters
//! - `GET    /quizzes/{quiz_id}` → single quiz
//! - `POST   /quizzes`           → create (admin only)
//! - `POST   /quizzes/bulk`      → create many, all-or-nothing (admin only)
//! - `PUT    /quizzes/{quiz_id}` → full update (admin only)
//! - `DELETE /quizzes/{quiz_id}` → delete (admin only)

use crate::auth::guards::allow_admin;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use delete::delete_quiz;
use get::{get_quiz, list_quizzes};
use post::{bulk_create_quizzes, create_quiz};
use put::edit_quiz;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quizzes))
        .route("/", post(create_quiz).route_layer(from_fn(allow_admin)))
        .route(
            "/bulk",
            post(bulk_create_quizzes).route_layer(from_fn(allow_admin)),
        )
        .route("/{quiz_id}", get(get_quiz))
        .route(
            "/{quiz_id}",
            put(edit_quiz).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{quiz_id}",
            delete(delete_quiz).route_layer(from_fn(allow_admin)),
        )
}
