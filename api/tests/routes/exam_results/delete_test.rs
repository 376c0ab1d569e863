#[cfg(test)]
mod tests {
    use crate::helpers::app::make_test_app;
    use api::auth::generate_jwt;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::exam::{ExamDuration, Model as ExamModel};
    use db::models::exam_result::{Entity as ResultEntity, Model as ExamResultModel};
    use db::models::user::Entity as UserEntity;
    use db::models::{
        quiz::Model as QuizModel, subject::Model as SubjectModel, user::Model as UserModel,
    };
    use sea_orm::{DatabaseConnection, EntityTrait};
    use tower::ServiceExt;

    struct TestData {
        admin_user: UserModel,
        student: UserModel,
        exam: ExamModel,
        result_id: i64,
    }

    fn strs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    async fn setup_test_data(db: &DatabaseConnection) -> TestData {
        let admin_user = UserModel::create(db, "admin", "admin@test.com", "password123", true)
            .await
            .expect("Failed to create admin user");
        let student = UserModel::create(db, "student", "student@test.com", "password123", false)
            .await
            .expect("Failed to create student");
        let subject = SubjectModel::create(db, "Biology", None)
            .await
            .expect("Failed to create subject");
        let quiz = QuizModel::create(
            db,
            subject.id,
            "Powerhouse of the cell?",
            &strs(&["Nucleus", "Mitochondria"]),
            &[1],
            false,
        )
        .await
        .expect("Failed to create quiz");
        let exam = ExamModel::create(db, "Cell Biology", ExamDuration::Min15, subject.id)
            .await
            .expect("Failed to create exam");
        exam.replace_quizzes(db, &[quiz.id])
            .await
            .expect("Failed to link quiz");

        let result =
            ExamResultModel::create(db, student.id, exam.id, 100.0, 1, 0, 90, "{\"1\":[1]}")
                .await
                .expect("Failed to create result");

        TestData {
            admin_user,
            student,
            exam,
            result_id: result.id,
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

    /// Test Case: Admin delete removes the row and nothing else
    #[tokio::test]
    async fn test_delete_result_success() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let db = app_state.db();

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let response = app
            .oneshot(delete(
                &format!("/api/exam-results/{}", data.result_id),
                &token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Exam result deleted successfully");

        let gone = ResultEntity::find_by_id(data.result_id).one(db).await.unwrap();
        assert!(gone.is_none());

        // The submitting user and the exam survive the delete.
        let user = UserEntity::find_by_id(data.student.id).one(db).await.unwrap();
        assert!(user.is_some());
        let exam = db::models::exam::Entity::find_by_id(data.exam.id)
            .one(db)
            .await
            .unwrap();
        assert!(exam.is_some());
    }

    /// Test Case: Deleting results is admin-only
    #[tokio::test]
    async fn test_delete_result_forbidden_for_non_admin() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        // Even the owner cannot delete their own result.
        let (token, _) = generate_jwt(data.student.id, data.student.admin);
        let response = app
            .oneshot(delete(
                &format!("/api/exam-results/{}", data.result_id),
                &token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Admin access required");

        let still_there = ResultEntity::find_by_id(data.result_id)
            .one(app_state.db())
            .await
            .unwrap();
        assert!(still_there.is_some());
    }

    /// Test Case: Unknown result id answers 404
    #[tokio::test]
    async fn test_delete_result_not_found() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let (token, _) = generate_jwt(data.admin_user.id, data.admin_user.admin);
        let response = app
            .oneshot(delete("/api/exam-results/9999", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = json_body(response).await;
        assert_eq!(json["message"], "Result not found id: 9999");
    }
}
