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
        admin_user: UserModel,
        regular_user: UserModel,
        quiz: QuizModel,
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
            regular_user,
            quiz,
        }
    }

    fn delete(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
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

    /// Test Case: Admin deletes a quiz and it is gone afterwards
    #[tokio::test]
    async fn test_delete_quiz_success() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let response = app
            .clone()
            .oneshot(delete(&format!("/api/quizzes/{}", data.quiz.id), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Quiz deleted successfully");

        let get_req = Request::builder()
            .method("GET")
            .uri(format!("/api/quizzes/{}", data.quiz.id))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(get_req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Test Case: Non-admin cannot delete quizzes
    #[tokio::test]
    async fn test_delete_quiz_forbidden_for_non_admin() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.regular_user.id, data.regular_user.admin);
        let response = app
            .oneshot(delete(&format!("/api/quizzes/{}", data.quiz.id), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Admin access required");
    }

    /// Test Case: Deleting an unknown quiz answers 404
    #[tokio::test]
    async fn test_delete_quiz_not_found() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let response = app.oneshot(delete("/api/quizzes/9999", &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Quiz not found with id: 9999");
    }
}
