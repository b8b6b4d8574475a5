use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use lending_console::adapters::mock::{
    MockAuthGateway, MockBookCatalog, MockTransactionRepository, MockUserDirectory,
};
use lending_console::api::handlers::AppState;
use lending_console::api::router::create_router;
use lending_console::application::lending::ServiceDependencies;
use lending_console::domain::{BookId, BorrowTransaction, Role, TransactionId, UserId};
use lending_console::session::SessionStore;

// ============================================================================
// テストセットアップ
// ============================================================================

struct TestApp {
    router: Router,
    repository: Arc<MockTransactionRepository>,
    auth_gateway: Arc<MockAuthGateway>,
}

fn setup() -> TestApp {
    let repository = Arc::new(MockTransactionRepository::new());
    let user_directory = Arc::new(MockUserDirectory::new());
    let book_catalog = Arc::new(MockBookCatalog::new());
    let auth_gateway = Arc::new(MockAuthGateway::new());
    let session_store = Arc::new(SessionStore::new());

    let service_deps = ServiceDependencies {
        transaction_repository: repository.clone(),
        user_directory: user_directory.clone(),
        book_catalog: book_catalog.clone(),
    };

    let state = Arc::new(AppState {
        service_deps,
        session_store,
        auth_gateway: auth_gateway.clone(),
    });

    TestApp {
        router: create_router(state),
        repository,
        auth_gateway,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn transaction(
    id: i64,
    email: &str,
    title: &str,
    borrow_date: NaiveDate,
    return_date: Option<NaiveDate>,
) -> BorrowTransaction {
    BorrowTransaction {
        transaction_id: TransactionId::new(id),
        user_id: UserId::new(id),
        book_id: BookId::new(id),
        user_email: email.to_string(),
        book_title: title.to_string(),
        borrow_date,
        due_date: borrow_date + chrono::Duration::days(7),
        return_date,
        fine_amount: 0.0,
    }
}

async fn send_json(router: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(router, request).await
}

async fn send_get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn login_as(app: &TestApp, role: Role) {
    let email = format!("{}@example.com", role.as_str());
    app.auth_gateway.register_account(&email, "secret", role);

    let (status, _) = send_json(
        &app.router,
        "POST",
        "/login",
        json!({"email": email, "password": "secret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// セッションとロールゲートのテスト
// ============================================================================

#[tokio::test]
async fn test_login_returns_role_based_redirect() {
    let app = setup();
    app.auth_gateway
        .register_account("admin@example.com", "secret", Role::Admin);

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/login",
        json!({"email": "admin@example.com", "password": "secret"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");
    assert_eq!(body["redirect_to"], "/admin/dashboard");
    assert!(body["token"].as_str().unwrap().starts_with("mock-token-"));
}

#[tokio::test]
async fn test_login_with_bad_credentials_is_unauthorized() {
    let app = setup();
    app.auth_gateway
        .register_account("admin@example.com", "secret", Role::Admin);

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/login",
        json!({"email": "admin@example.com", "password": "wrong"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "LOGIN_FAILED");
}

#[tokio::test]
async fn test_admin_view_requires_session() {
    let app = setup();

    let (status, body) = send_get(&app.router, "/admin/transactions").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_admin_view_rejects_user_role_with_own_dashboard() {
    let app = setup();
    login_as(&app, Role::User).await;

    let (status, body) = send_get(&app.router, "/admin/transactions").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("/user/dashboard")
    );
}

#[tokio::test]
async fn test_logout_drops_the_session() {
    let app = setup();
    login_as(&app, Role::Admin).await;

    let (status, _) = send_json(&app.router, "POST", "/logout", json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_get(&app.router, "/admin/transactions").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// 貸出中ビューのテスト
// ============================================================================

#[tokio::test]
async fn test_active_loans_view_filters_and_derives_status() {
    let app = setup();
    login_as(&app, Role::Admin).await;

    app.repository.add_transaction(transaction(
        1,
        "alice@example.com",
        "Dune",
        date(2024, 1, 1),
        None,
    ));
    app.repository.add_transaction(transaction(
        2,
        "bob@example.com",
        "Emma",
        date(2024, 1, 2),
        Some(date(2024, 1, 9)),
    ));

    let (status, body) = send_get(&app.router, "/admin/transactions").await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["user_email"], "alice@example.com");
    assert_eq!(records[0]["status"], "borrowed");
    assert_eq!(records[0]["fine_amount"], 0.0);
}

#[tokio::test]
async fn test_active_loans_search_matches_title_case_insensitively() {
    let app = setup();
    login_as(&app, Role::Admin).await;

    app.repository.add_transaction(transaction(
        1,
        "alice@example.com",
        "Dune",
        date(2024, 1, 1),
        None,
    ));
    app.repository.add_transaction(transaction(
        2,
        "bob@example.com",
        "Emma",
        date(2024, 1, 2),
        None,
    ));

    let (status, body) = send_get(&app.router, "/admin/transactions?search=DUNE").await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["book_title"], "Dune");
}

// ============================================================================
// 履歴ビューのテスト
// ============================================================================

#[tokio::test]
async fn test_history_view_applies_month_filter() {
    let app = setup();
    login_as(&app, Role::Admin).await;

    app.repository.add_transaction(transaction(
        1,
        "alice@example.com",
        "Dune",
        date(2024, 4, 20),
        Some(date(2024, 4, 30)),
    ));
    app.repository.add_transaction(transaction(
        2,
        "bob@example.com",
        "Emma",
        date(2024, 5, 1),
        Some(date(2024, 5, 15)),
    ));
    app.repository.add_transaction(transaction(
        3,
        "carol@example.com",
        "Ivanhoe",
        date(2024, 5, 2),
        None,
    ));

    let (status, body) = send_get(&app.router, "/admin/transactions/history?month=2024-05").await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["user_email"], "bob@example.com");
    assert_eq!(records[0]["status"], "returned");
}

#[tokio::test]
async fn test_history_view_rejects_malformed_month() {
    let app = setup();
    login_as(&app, Role::Admin).await;

    let (status, body) = send_get(&app.router, "/admin/transactions/history?month=05-2024").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

// ============================================================================
// 変異エンドポイントのテスト
// ============================================================================

#[tokio::test]
async fn test_borrow_endpoint_creates_and_returns_reloaded_collection() {
    let app = setup();
    login_as(&app, Role::Admin).await;

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/admin/transactions/borrow",
        json!({
            "userId": 10,
            "bookId": 20,
            "borrowDate": "2024-01-25"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    // 返却期限は貸出日+7日、月またぎもカレンダー通り
    assert_eq!(records[0]["due_date"], "2024-02-01");
    assert_eq!(records[0]["status"], "borrowed");
}

#[tokio::test]
async fn test_borrow_endpoint_rejects_missing_book_before_backend_call() {
    let app = setup();
    login_as(&app, Role::Admin).await;

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/admin/transactions/borrow",
        json!({
            "userId": 10,
            "borrowDate": "2024-01-25"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_FIELD");
    assert!(app.repository.borrow_calls().is_empty());
}

#[tokio::test]
async fn test_return_endpoint_marks_transaction_returned() {
    let app = setup();
    login_as(&app, Role::Admin).await;

    app.repository.add_transaction(transaction(
        1,
        "alice@example.com",
        "Dune",
        date(2024, 1, 1),
        None,
    ));

    let (status, body) = send_json(
        &app.router,
        "PUT",
        "/admin/transactions/return",
        json!({
            "transactionId": 1,
            "returnDate": "2024-01-10"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records[0]["return_date"], "2024-01-10");
    assert_eq!(records[0]["status"], "returned");
}

#[tokio::test]
async fn test_backend_failure_surfaces_as_bad_gateway() {
    let app = setup();
    login_as(&app, Role::Admin).await;
    app.repository.set_offline(true);

    let (status, body) = send_get(&app.router, "/admin/transactions").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "BACKEND_ERROR");
}
