#[cfg(test)]
mod tests {
    use crate::helpers::app::make_test_app;
    use api::auth::generate_jwt;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::{
        quiz::Model as QuizModel, subject::Model as SubjectModel, user::Model as UserModel,
    };
    use sea_orm::DatabaseConnection;
    use serde_json::json;
    use tower::ServiceExt;

    struct TestData {
        admin_user: UserModel,
        subject: SubjectModel,
        quiz: QuizModel,
    }

    async fn setup_test_data(db: &DatabaseConnection) -> TestData {
        let admin_user = UserModel::create(db, "admin", "admin@test.com", "password123", true)
            .await
            .expect("Failed to create admin user");
        let subject = SubjectModel::create(db, "Mathematics", None)
            .await
            .expect("Failed to create subject");
        let quiz = QuizModel::create(
            db,
            subject.id,
            "2 + 2?",
            &["3".to_string(), "4".to_string()],
            &[1],
            false,
        )
        .await
        .expect("Failed to create quiz");

        TestData {
            admin_user,
            subject,
            quiz,
        }
    }

    fn put_json(uri: &str, token: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    /// Test Case: Admin replaces a quiz's content
    #[tokio::test]
    async fn test_edit_quiz_success() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let req_body = json!({
            "subject_id": data.subject.id,
            "question": "2 + 3?",
            "options": ["4", "5", "6"],
            "correct_answers": [1],
            "multiple_choice": false
        });

        let response = app
            .oneshot(put_json(
                &format!("/api/quizzes/{}", data.quiz.id),
                &token,
                &req_body,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Quiz updated successfully");
        assert_eq!(json["data"]["question"], "2 + 3?");
        assert_eq!(json["data"]["options"], json!(["4", "5", "6"]));
    }

    /// Test Case: Editing an unknown quiz answers 404
    #[tokio::test]
    async fn test_edit_quiz_not_found() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let req_body = json!({
            "subject_id": data.subject.id,
            "question": "2 + 3?",
            "options": ["4", "5"],
            "correct_answers": [1]
        });

        let response = app
            .oneshot(put_json("/api/quizzes/9999", &token, &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Quiz not found with id: 9999");
    }

    /// Test Case: Out-of-range correct index is rejected on edit too
    #[tokio::test]
    async fn test_edit_quiz_invalid_answer_index() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let req_body = json!({
            "subject_id": data.subject.id,
            "question": "2 + 3?",
            "options": ["4", "5"],
            "correct_answers": [5]
        });

        let response = app
            .oneshot(put_json(
                &format!("/api/quizzes/{}", data.quiz.id),
                &token,
                &req_body,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["message"],
            "Each correct answer must reference a valid option index"
        );
    }
}
