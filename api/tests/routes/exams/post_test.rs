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
        regular_user: UserModel,
        subject: SubjectModel,
        quizzes: Vec<QuizModel>,
    }

    async fn setup_test_data(db: &DatabaseConnection) -> TestData {
        let admin_user = UserModel::create(db, "admin", "admin@test.com", "password123", true)
            .await
            .expect("Failed to create admin user");
        let regular_user = UserModel::create(db, "student", "student@test.com", "password123", false)
            .await
            .expect("Failed to create regular user");
        let subject = SubjectModel::create(db, "Mathematics", None)
            .await
            .expect("Failed to create subject");

        let mut quizzes = Vec::new();
        for (question, correct) in [("2 + 2?", 1i64), ("3 * 3?", 1), ("10 / 2?", 0)] {
            quizzes.push(
                QuizModel::create(
                    db,
                    subject.id,
                    question,
                    &["5".to_string(), "4".to_string()],
                    &[correct],
                    false,
                )
                .await
                .expect("Failed to create quiz"),
            );
        }

        TestData {
            admin_user,
            regular_user,
            subject,
            quizzes,
        }
    }

    fn post_json(uri: &str, token: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    /// Test Case: Admin creates an exam with quiz membership
    #[tokio::test]
    async fn test_create_exam_success() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let quiz_ids: Vec<i64> = data.quizzes.iter().map(|q| q.id).collect();

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let req_body = json!({
            "title": "Algebra Midterm",
            "duration": 45,
            "subject_id": data.subject.id,
            "quiz_ids": quiz_ids
        });

        let response = app
            .oneshot(post_json("/api/exams", &token, &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Exam created successfully");
        assert_eq!(json["data"]["title"], "Algebra Midterm");
        assert_eq!(json["data"]["duration"], 45);
        assert_eq!(json["data"]["quiz_ids"], json!(quiz_ids));
    }

    /// Test Case: An exam without quizzes is valid
    #[tokio::test]
    async fn test_create_exam_without_quizzes() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let req_body = json!({
            "title": "Empty Shell",
            "duration": 10,
            "subject_id": data.subject.id
        });

        let response = app
            .oneshot(post_json("/api/exams", &token, &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        assert_eq!(json["data"]["quiz_ids"], json!([]));
    }

    /// Test Case: Non-admin cannot create exams
    #[tokio::test]
    async fn test_create_exam_forbidden_for_non_admin() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.regular_user.id, data.regular_user.admin);
        let req_body = json!({
            "title": "Sneaky Exam",
            "duration": 30,
            "subject_id": data.subject.id
        });

        let response = app
            .oneshot(post_json("/api/exams", &token, &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Admin access required");
    }

    /// Test Case: Durations outside the closed set are rejected
    #[tokio::test]
    async fn test_create_exam_invalid_duration() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let req_body = json!({
            "title": "Odd Duration",
            "duration": 42,
            "subject_id": data.subject.id
        });

        let response = app
            .oneshot(post_json("/api/exams", &token, &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert_eq!(
            json["message"],
            "Duration must be one of 10, 15, 30, 45, 60, 90, 120 minutes"
        );
    }

    /// Test Case: Every referenced quiz must exist
    #[tokio::test]
    async fn test_create_exam_unknown_quiz() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let req_body = json!({
            "title": "Ghost Questions",
            "duration": 30,
            "subject_id": data.subject.id,
            "quiz_ids": [data.quizzes[0].id, 9999]
        });

        let response = app
            .oneshot(post_json("/api/exams", &token, &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Quiz not found with id: 9999");
    }

    /// Test Case: The subject must exist
    #[tokio::test]
    async fn test_create_exam_unknown_subject() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let req_body = json!({
            "title": "Orphan Exam",
            "duration": 30,
            "subject_id": 9999
        });

        let response = app
            .oneshot(post_json("/api/exams", &token, &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Subject not found with id: 9999");
    }

    /// Test Case: Duplicate quiz ids collapse to one membership row
    #[tokio::test]
    async fn test_create_exam_dedupes_quiz_ids() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let quiz_id = data.quizzes[0].id;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let req_body = json!({
            "title": "Repeated Quiz",
            "duration": 15,
            "subject_id": data.subject.id,
            "quiz_ids": [quiz_id, quiz_id, quiz_id]
        });

        let response = app
            .oneshot(post_json("/api/exams", &token, &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        assert_eq!(json["data"]["quiz_ids"], json!([quiz_id]));
    }
}
