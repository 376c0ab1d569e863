use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::quiz::{Column as QuizColumn, Entity as QuizEntity};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::routes::quizzes::common::QuizResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct ListQuizzesQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub subject_id: Option<i64>,
    pub multiple_choice: Option<bool>,
}

#[derive(Debug, Serialize, Default)]
pub struct QuizListResponse {
    pub quizzes: Vec<QuizResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/quizzes
///
/// Retrieve a paginated list of quizzes with optional filtering and sorting.
///
/// ### Query Parameters
/// - `page` (optional): Page number (default: 1, min: 1)
/// - `per_page` (optional): Items per page (default: 20, min: 1, max: 100)
/// - `query` (optional): Case-insensitive partial match on question text
/// - `subject_id` (optional): Filter by owning subject
/// - `multiple_choice` (optional): Filter by answer mode
/// - `sort` (optional): Comma-separated sort fields; `-` prefix for descending
///
/// ### Responses
/// - `200 OK` with `{ quizzes, page, per_page, total }`
/// - `400 Bad Request` on invalid query parameters
/// - `500 Internal Server Error` on database faults
pub async fn list_quizzes(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuizzesQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<QuizListResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(20);

    let mut condition = Condition::all();

    if let Some(q) = &query.query {
        condition = condition.add(QuizColumn::Question.contains(q));
    }

    if let Some(subject_id) = query.subject_id {
        condition = condition.add(QuizColumn::SubjectId.eq(subject_id));
    }

    if let Some(multiple_choice) = query.multiple_choice {
        condition = condition.add(QuizColumn::MultipleChoice.eq(multiple_choice));
    }

    let mut query_builder = QuizEntity::find().filter(condition);

    if let Some(sort_param) = &query.sort {
        for sort_field in sort_param.split(',') {
            let (field, desc) = if let Some(stripped) = sort_field.strip_prefix('-') {
                (stripped, true)
            } else {
                (sort_field, false)
            };

            match field {
                "question" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(QuizColumn::Question)
                    } else {
                        query_builder.order_by_asc(QuizColumn::Question)
                    };
                }
                "subject_id" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(QuizColumn::SubjectId)
                    } else {
                        query_builder.order_by_asc(QuizColumn::SubjectId)
                    };
                }
                "created_at" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(QuizColumn::CreatedAt)
                    } else {
                        query_builder.order_by_asc(QuizColumn::CreatedAt)
                    };
                }
                _ => {}
            }
        }
    } else {
        query_builder = query_builder.order_by_asc(QuizColumn::Id);
    }

    let paginator = query_builder.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(n) => n,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QuizListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };
    let quizzes = match paginator.fetch_page(page - 1).await {
        Ok(rows) => rows.into_iter().map(QuizResponse::from).collect(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QuizListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            QuizListResponse {
                quizzes,
                page,
                per_page,
                total,
            },
            "Quizzes retrieved successfully",
        )),
    )
}

/// GET /api/quizzes/{quiz_id}
///
/// Fetch a single quiz by ID.
///
/// ### Responses
/// - `200 OK` with the quiz payload
/// - `404 Not Found` when the quiz does not exist
/// - `500 Internal Server Error` on database faults
pub async fn get_quiz(
    State(app_state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match QuizEntity::find_by_id(quiz_id).one(db).await {
        Ok(Some(quiz)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                QuizResponse::from(quiz),
                "Quiz retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<QuizResponse>::error(format!(
                "Quiz not found with id: {}",
                quiz_id
            ))),
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
