use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::exam::{Column as ExamColumn, Entity as ExamEntity, ExamDuration};
use db::models::exam_quiz::{Column as ExamQuizColumn, Entity as ExamQuizEntity};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::routes::exams::common::{DURATION_MESSAGE, ExamResponse};

#[derive(Debug, Deserialize, Validate)]
pub struct ListExamsQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub subject_id: Option<i64>,
    pub duration: Option<u32>,
}

#[derive(Debug, Serialize, Default)]
pub struct ExamListResponse {
    pub exams: Vec<ExamResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/exams
///
/// Retrieve a paginated list of exams with optional filtering and sorting.
///
/// ### Query Parameters
/// - `page` (optional): Page number (default: 1, min: 1)
/// - `per_page` (optional): Items per page (default: 20, min: 1, max: 100)
/// - `query` (optional): Case-insensitive partial match on title
/// - `subject_id` (optional): Filter by owning subject
/// - `duration` (optional): Filter by exam length in minutes
/// - `sort` (optional): Comma-separated sort fields; `-` prefix for descending
///
/// ### Responses
/// - `200 OK` with `{ exams, page, per_page, total }`
/// - `400 Bad Request` on invalid query parameters
/// - `500 Internal Server Error` on database faults
pub async fn list_exams(
    State(app_state): State<AppState>,
    Query(query): Query<ListExamsQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ExamListResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(20);

    let mut condition = Condition::all();

    if let Some(q) = &query.query {
        condition = condition.add(ExamColumn::Title.contains(q));
    }

    if let Some(subject_id) = query.subject_id {
        condition = condition.add(ExamColumn::SubjectId.eq(subject_id));
    }

    if let Some(minutes) = query.duration {
        let Some(duration) = ExamDuration::from_minutes(minutes) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ExamListResponse>::error(DURATION_MESSAGE)),
            );
        };
        condition = condition.add(ExamColumn::Duration.eq(duration));
    }

    let mut query_builder = ExamEntity::find().filter(condition);

    if let Some(sort_param) = &query.sort {
        for sort_field in sort_param.split(',') {
            let (field, desc) = if let Some(stripped) = sort_field.strip_prefix('-') {
                (stripped, true)
            } else {
                (sort_field, false)
            };

            match field {
                "title" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(ExamColumn::Title)
                    } else {
                        query_builder.order_by_asc(ExamColumn::Title)
                    };
                }
                "subject_id" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(ExamColumn::SubjectId)
                    } else {
                        query_builder.order_by_asc(ExamColumn::SubjectId)
                    };
                }
                "created_at" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(ExamColumn::CreatedAt)
                    } else {
                        query_builder.order_by_asc(ExamColumn::CreatedAt)
                    };
                }
                _ => {}
            }
        }
    } else {
        query_builder = query_builder.order_by_asc(ExamColumn::Id);
    }

    let paginator = query_builder.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(n) => n,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };
    let exams = match paginator.fetch_page(page - 1).await {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    // One batched query for the page's quiz memberships.
    let exam_ids: Vec<i64> = exams.iter().map(|e| e.id).collect();
    let links = match ExamQuizEntity::find()
        .filter(ExamQuizColumn::ExamId.is_in(exam_ids))
        .order_by_asc(ExamQuizColumn::QuizId)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut quiz_ids_by_exam: HashMap<i64, Vec<i64>> = HashMap::new();
    for link in links {
        quiz_ids_by_exam
            .entry(link.exam_id)
            .or_default()
            .push(link.quiz_id);
    }

    let exams = exams
        .into_iter()
        .map(|exam| {
            let quiz_ids = quiz_ids_by_exam.remove(&exam.id).unwrap_or_default();
            ExamResponse::from_model(exam, quiz_ids)
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            ExamListResponse {
                exams,
                page,
                per_page,
                total,
            },
            "Exams retrieved successfully",
        )),
    )
}

/// GET /api/exams/{exam_id}
///
/// Fetch a single exam, including its current quiz membership.
///
/// ### Responses
/// - `200 OK` with the exam payload
/// - `404 Not Found` when the exam does not exist
/// - `500 Internal Server Error` on database faults
pub async fn get_exam(
    State(app_state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let exam = match ExamEntity::find_by_id(exam_id).one(db).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ExamResponse>::error(format!(
                    "Exam not found with id: {}",
                    exam_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let quiz_ids = match exam.quizzes(db).await {
        Ok(quizzes) => quizzes.into_iter().map(|q| q.id).collect(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            ExamResponse::from_model(exam, quiz_ids),
            "Exam retrieved successfully",
        )),
    )
}
