use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use db::models::user::{Column as UserColumn, Entity as UserEntity, Model as UserModel};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 3,
        max = 64,
        message = "Username must be between 3 and 64 characters"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/register
///
/// Register a new user and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the user payload, token and expiry
/// - `400 Bad Request` on validation failure
/// - `409 Conflict` when the email or username is already taken
/// - `500 Internal Server Error` on database faults
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    match UserEntity::find()
        .filter(UserColumn::Email.eq(&req.email))
        .one(db)
        .await
    {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<UserResponse>::error(
                    "A user with this email already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match UserEntity::find()
        .filter(UserColumn::Username.eq(&req.username))
        .one(db)
        .await
    {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<UserResponse>::error(
                    "A user with this username already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match UserModel::create(db, &req.username, &req.email, &req.password, false).await {
        Ok(user) => {
            let (token, expires_at) = generate_jwt(user.id, user.admin);
            let user_response = UserResponse {
                id: user.id,
                username: user.username,
                email: user.email,
                admin: user.admin,
                token,
                expires_at,
            };
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    user_response,
                    "User registered successfully",
                )),
            )
        }
        Err(e) => {
            // The pre-checks race against concurrent registrations, so the
            // unique indexes are still the source of truth.
            let msg = e.to_string();
            if msg.contains("users.email") {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<UserResponse>::error(
                        "A user with this email already exists",
                    )),
                );
            }
            if msg.contains("users.username") {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<UserResponse>::error(
                        "A user with this username already exists",
                    )),
                );
            }

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            )
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
}

/// POST /auth/login
///
/// Authenticate an existing user by email and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "email": "alice@example.com",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the user payload, token and expiry
/// - `400 Bad Request` on validation failure
/// - `401 Unauthorized` for an unknown email or wrong password
/// - `500 Internal Server Error` on database faults
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    match UserModel::verify_credentials(db, &req.email, &req.password).await {
        Ok(Some(user)) => {
            let (token, expires_at) = generate_jwt(user.id, user.admin);
            let user_response = UserResponse {
                id: user.id,
                username: user.username,
                email: user.email,
                admin: user.admin,
                token,
                expires_at,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(user_response, "Login successful")),
            )
        }
        // Unknown email and wrong password answer identically.
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<UserResponse>::error("Invalid credentials")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
