use std::collections::HashSet;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use db::models::quiz::{ActiveModel as QuizActiveModel, Model as QuizModel};
use db::models::subject::{Column as SubjectColumn, Entity as SubjectEntity};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait,
};
use util::{answer_set, state::AppState};
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::routes::quizzes::common::{QuizRequest, QuizResponse};

/// POST /api/quizzes
///
/// Create a new quiz. Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "subject_id": 1,
///   "question": "Which of these are prime?",
///   "options": ["2", "3", "4", "5"],
///   "correct_answers": [0, 1, 3],
///   "multiple_choice": true
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the stored quiz
/// - `400 Bad Request` on validation failure or out-of-range answer indices
/// - `404 Not Found` when the subject does not exist
/// - `500 Internal Server Error` on database faults
pub async fn create_quiz(
    State(app_state): State<AppState>,
    Json(req): Json<QuizRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<QuizResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    if req.invalid_index().is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<QuizResponse>::error(
                "Each correct answer must reference a valid option index",
            )),
        );
    }

    match SubjectEntity::find_by_id(req.subject_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<QuizResponse>::error(format!(
                    "Subject not found with id: {}",
                    req.subject_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QuizResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match QuizModel::create(
        db,
        req.subject_id,
        &req.question,
        &req.options,
        &req.correct_answers,
        req.multiple_choice,
    )
    .await
    {
        Ok(quiz) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                QuizResponse::from(quiz),
                "Quiz created successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<QuizResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

/// POST /api/quizzes/bulk
///
/// Create several quizzes in one call. Admin only.
///
/// The whole batch is validated up front and inserted inside a single
/// transaction, so either every quiz is stored or none are.
///
/// ### Responses
/// - `201 Created` with the stored quizzes in request order
/// - `400 Bad Request` on an empty batch, validation failure or
///   out-of-range answer indices
/// - `404 Not Found` when any referenced subject does not exist
/// - `500 Internal Server Error` on database faults
pub async fn bulk_create_quizzes(
    State(app_state): State<AppState>,
    Json(reqs): Json<Vec<QuizRequest>>,
) -> impl IntoResponse {
    let db = app_state.db();

    if reqs.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Vec<QuizResponse>>::error(
                "At least one quiz is required",
            )),
        );
    }

    for req in &reqs {
        if let Err(e) = req.validate() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Vec<QuizResponse>>::error(
                    format_validation_errors(&e),
                )),
            );
        }

        if req.invalid_index().is_some() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Vec<QuizResponse>>::error(
                    "Each correct answer must reference a valid option index",
                )),
            );
        }
    }

    let mut subject_ids: Vec<i64> = reqs.iter().map(|r| r.subject_id).collect();
    subject_ids.sort_unstable();
    subject_ids.dedup();

    let found: HashSet<i64> = match SubjectEntity::find()
        .filter(SubjectColumn::Id.is_in(subject_ids.clone()))
        .all(db)
        .await
    {
        Ok(rows) => rows.into_iter().map(|s| s.id).collect(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<QuizResponse>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Some(missing) = subject_ids.iter().find(|id| !found.contains(id)) {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Vec<QuizResponse>>::error(format!(
                "Subject not found with id: {}",
                missing
            ))),
        );
    }

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<QuizResponse>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut created = Vec::with_capacity(reqs.len());
    for req in &reqs {
        let now = Utc::now();
        let quiz = QuizActiveModel {
            subject_id: Set(req.subject_id),
            question: Set(req.question.clone()),
            options: Set(answer_set::encode_options(&req.options)),
            correct_answers: Set(answer_set::encode_indices(&req.correct_answers)),
            multiple_choice: Set(req.multiple_choice),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match quiz.insert(&txn).await {
            Ok(model) => created.push(QuizResponse::from(model)),
            Err(e) => {
                let _ = txn.rollback().await;
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<Vec<QuizResponse>>::error(format!(
                        "Database error: {}",
                        e
                    ))),
                );
            }
        }
    }

    if let Err(e) = txn.commit().await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<QuizResponse>>::error(format!(
                "Database error: {}",
                e
            ))),
        );
    }

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(created, "Quizzes created successfully")),
    )
}
