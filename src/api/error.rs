use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::lending::LendingApplicationError;
use crate::domain::Role;

use super::types::{ErrorResponse, dashboard_path};

/// API層のエラー型
///
/// アプリケーション層・認可のエラーをHTTPレスポンスへ写す。
#[derive(Debug)]
pub enum ApiError {
    /// セッション未確立
    Unauthenticated,
    /// ロール不一致。呼び出し側自身のダッシュボードを案内する
    Forbidden { current_role: Role },
    /// クエリパラメータ等の不正
    BadRequest(String),
    /// ログイン失敗。詳細はログのみに残す
    LoginFailed,
    /// アプリケーション層のエラー
    Application(LendingApplicationError),
}

impl From<LendingApplicationError> for ApiError {
    fn from(err: LendingApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            // 401 Unauthorized - 認証されていない
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Login required".to_string(),
            ),

            // 403 Forbidden - ロールが画面の要求と一致しない
            ApiError::Forbidden { current_role } => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                format!(
                    "This view requires the admin role; your dashboard is {}",
                    dashboard_path(current_role)
                ),
            ),

            // 400 Bad Request
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),

            // 401 Unauthorized - クレデンシャル不正とバックエンド障害を区別しない
            ApiError::LoginFailed => (
                StatusCode::UNAUTHORIZED,
                "LOGIN_FAILED",
                "Login failed, please check your credentials".to_string(),
            ),

            ApiError::Application(err) => match err {
                // 400 Bad Request - ネットワーク呼び出し前に検出されたバリデーション失敗
                LendingApplicationError::MissingField(field) => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_FIELD",
                    format!("Missing required field: {}", field),
                ),

                // 502 Bad Gateway - バックエンド呼び出しの失敗
                // 詳細はログに記録し、クライアントには一般的なメッセージのみを返す
                LendingApplicationError::RepositoryError(ref e) => {
                    tracing::error!("Transaction repository error: {}", e);
                    (
                        StatusCode::BAD_GATEWAY,
                        "BACKEND_ERROR",
                        "Failed to reach the lending backend".to_string(),
                    )
                }
                LendingApplicationError::DirectoryError(ref e) => {
                    tracing::error!("User directory error: {}", e);
                    (
                        StatusCode::BAD_GATEWAY,
                        "BACKEND_ERROR",
                        "Failed to reach the lending backend".to_string(),
                    )
                }
                LendingApplicationError::CatalogError(ref e) => {
                    tracing::error!("Book catalog error: {}", e);
                    (
                        StatusCode::BAD_GATEWAY,
                        "BACKEND_ERROR",
                        "Failed to reach the lending backend".to_string(),
                    )
                }
            },
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
