#[cfg(test)]
mod tests {
    use crate::helpers::app::make_test_app;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::user::Model as UserModel;
    use serde_json::json;
    use tower::ServiceExt;

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    /// Test Case: Register a new user successfully
    #[tokio::test]
    async fn test_register_success() {
        let (app, _app_state) = make_test_app().await;

        let req_body = json!({
            "username": "alice",
            "email": "alice@test.com",
            "password": "password123"
        });
        let response = app
            .oneshot(post_json("/api/auth/register", &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "User registered successfully");
        assert_eq!(json["data"]["username"], "alice");
        assert_eq!(json["data"]["email"], "alice@test.com");
        assert_eq!(json["data"]["admin"], false);
        assert!(json["data"]["token"].as_str().is_some());
        assert!(json["data"]["expires_at"].as_str().is_some());
    }

    /// Test Case: Registering an already-used email is rejected
    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (app, app_state) = make_test_app().await;
        UserModel::create(
            app_state.db(),
            "existing",
            "taken@test.com",
            "password123",
            false,
        )
        .await
        .unwrap();

        let req_body = json!({
            "username": "newuser",
            "email": "taken@test.com",
            "password": "password123"
        });
        let response = app
            .oneshot(post_json("/api/auth/register", &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "A user with this email already exists");
    }

    /// Test Case: Registering an already-used username is rejected
    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (app, app_state) = make_test_app().await;
        UserModel::create(
            app_state.db(),
            "existing",
            "existing@test.com",
            "password123",
            false,
        )
        .await
        .unwrap();

        let req_body = json!({
            "username": "existing",
            "email": "fresh@test.com",
            "password": "password123"
        });
        let response = app
            .oneshot(post_json("/api/auth/register", &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "A user with this username already exists");
    }

    /// Test Case: Short password fails validation
    #[tokio::test]
    async fn test_register_short_password() {
        let (app, _app_state) = make_test_app().await;

        let req_body = json!({
            "username": "bob",
            "email": "bob@test.com",
            "password": "short"
        });
        let response = app
            .oneshot(post_json("/api/auth/register", &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Password must be at least 8 characters")
        );
    }

    /// Test Case: Login with valid credentials issues a token
    #[tokio::test]
    async fn test_login_success() {
        let (app, app_state) = make_test_app().await;
        UserModel::create(
            app_state.db(),
            "carol",
            "carol@test.com",
            "password123",
            false,
        )
        .await
        .unwrap();

        let req_body = json!({"email": "carol@test.com", "password": "password123"});
        let response = app
            .oneshot(post_json("/api/auth/login", &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["data"]["username"], "carol");
        assert!(json["data"]["token"].as_str().is_some());
    }

    /// Test Case: Wrong password is rejected
    #[tokio::test]
    async fn test_login_wrong_password() {
        let (app, app_state) = make_test_app().await;
        UserModel::create(
            app_state.db(),
            "dave",
            "dave@test.com",
            "password123",
            false,
        )
        .await
        .unwrap();

        let req_body = json!({"email": "dave@test.com", "password": "wrongpassword"});
        let response = app
            .oneshot(post_json("/api/auth/login", &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Invalid credentials");
    }

    /// Test Case: Unknown email answers exactly like a wrong password
    #[tokio::test]
    async fn test_login_unknown_email() {
        let (app, _app_state) = make_test_app().await;

        let req_body = json!({"email": "nobody@test.com", "password": "password123"});
        let response = app
            .oneshot(post_json("/api/auth/login", &req_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Invalid credentials");
    }
}
