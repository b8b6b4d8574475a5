use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_borrow, form_options, list_active_loans, list_history, login, logout,
    mark_returned,
};

/// Creates the console router
///
/// Session endpoints:
/// - POST /login - authenticate and establish the session
/// - POST /logout - drop the session
///
/// Admin console endpoints (role-gated):
/// - GET /admin/transactions - active loans view
/// - GET /admin/transactions/history - returned loans view
/// - GET /admin/transactions/form-options - borrow form selectors
/// - POST /admin/transactions/borrow - create a borrow transaction
/// - PUT /admin/transactions/return - mark a transaction returned
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Session endpoints
        .route("/login", post(login))
        .route("/logout", post(logout))
        // Admin console endpoints
        .route("/admin/transactions", get(list_active_loans))
        .route("/admin/transactions/history", get(list_history))
        .route("/admin/transactions/form-options", get(form_options))
        .route("/admin/transactions/borrow", post(create_borrow))
        .route("/admin/transactions/return", put(mark_returned))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
