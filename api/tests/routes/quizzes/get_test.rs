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
    use tower::ServiceExt;

    struct TestData {
        user: UserModel,
        math: SubjectModel,
        history: SubjectModel,
    }

    fn strs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    async fn setup_test_data(db: &DatabaseConnection) -> TestData {
        let user = UserModel::create(db, "student", "student@test.com", "password123", false)
            .await
            .expect("Failed to create user");
        let math = SubjectModel::create(db, "Mathematics", None)
            .await
            .expect("Failed to create subject");
        let history = SubjectModel::create(db, "History", None)
            .await
            .expect("Failed to create subject");

        QuizModel::create(db, math.id, "2 + 2?", &strs(&["3", "4"]), &[1], false)
            .await
            .expect("Failed to create quiz");
        QuizModel::create(db, math.id, "3 * 3?", &strs(&["6", "9"]), &[1], false)
            .await
            .expect("Failed to create quiz");
        QuizModel::create(
            db,
            history.id,
            "Year of the moon landing?",
            &strs(&["1969", "1972"]),
            &[0],
            false,
        )
        .await
        .expect("Failed to create quiz");

        TestData {
            user,
            math,
            history,
        }
    }

    fn get(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    /// Test Case: Listing requires an Authorization header
    #[tokio::test]
    async fn test_list_quizzes_requires_auth() {
        let (app, _app_state) = make_test_app().await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/quizzes")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Authentication required");
    }

    /// Test Case: Subject filter narrows the list
    #[tokio::test]
    async fn test_list_quizzes_filters_by_subject() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.user.id, data.user.admin);
        let response = app
            .oneshot(get(
                &format!("/api/quizzes?subject_id={}", data.math.id),
                &token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Quizzes retrieved successfully");
        assert_eq!(json["data"]["total"], 2);
        assert_eq!(json["data"]["quizzes"].as_array().unwrap().len(), 2);
    }

    /// Test Case: Question text search matches substrings
    #[tokio::test]
    async fn test_list_quizzes_text_search() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.user.id, data.user.admin);
        let response = app
            .oneshot(get("/api/quizzes?query=moon", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(
            json["data"]["quizzes"][0]["subject_id"],
            data.history.id
        );
    }

    /// Test Case: Pagination slices the full set
    #[tokio::test]
    async fn test_list_quizzes_pagination() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.user.id, data.user.admin);
        let response = app
            .oneshot(get("/api/quizzes?per_page=2&page=2", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["total"], 3);
        assert_eq!(json["data"]["page"], 2);
        assert_eq!(json["data"]["quizzes"].as_array().unwrap().len(), 1);
    }

    /// Test Case: Fetch one quiz by id
    #[tokio::test]
    async fn test_get_quiz_by_id() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let quiz = QuizModel::create(
            app_state.db(),
            data.math.id,
            "10 / 2?",
            &strs(&["4", "5"]),
            &[1],
            false,
        )
        .await
        .unwrap();

        let (token, _) = generate_jwt(data.user.id, data.user.admin);
        let response = app
            .oneshot(get(&format!("/api/quizzes/{}", quiz.id), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Quiz retrieved successfully");
        assert_eq!(json["data"]["id"], quiz.id);
        assert_eq!(json["data"]["question"], "10 / 2?");
        assert_eq!(json["data"]["correct_answers"], serde_json::json!([1]));
    }

    /// Test Case: Unknown quiz id answers 404
    #[tokio::test]
    async fn test_get_quiz_not_found() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.user.id, data.user.admin);
        let response = app.oneshot(get("/api/quizzes/9999", &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Quiz not found with id: 9999");
    }
}
