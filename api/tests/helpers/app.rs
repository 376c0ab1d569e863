use api::routes::routes;
use axum::Router;
use db::test_utils::setup_test_db;
use util::state::AppState;

/// Builds the full `/api` router over a fresh in-memory database.
///
/// Every call gets an isolated database, so tests can run in parallel
/// without seeing each other's rows. The request-logging middleware is
/// left off: it needs the connect-info extension that only a real
/// listener provides.
pub async fn make_test_app() -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db);

    let app = Router::new().nest("/api", routes(app_state.clone()));

    (app, app_state)
}
