//! Authentication routes under `/api/auth`.
//!
//! - `POST /register` → create an account and issue a token
//! - `POST /login` → verify credentials and issue a token

use axum::{Router, routing::post};
use post::{login, register};
use util::state::AppState;

pub mod post;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
