use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use crate::application::lending::{
    ServiceDependencies, borrow_book, borrow_form_options, load_transactions, return_book,
};
use crate::domain::{
    Role, TransactionId, YearMonth, filter_active_loans, filter_history,
};
use crate::ports::AuthGateway;
use crate::session::SessionStore;

use super::{
    error::ApiError,
    types::{
        ActiveLoansQuery, BorrowRequestBody, FormOptionsResponse, HistoryQuery, LoginRequest,
        LoginResponse, ReturnRequestBody, TransactionResponse, dashboard_path,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    pub session_store: Arc<SessionStore>,
    pub auth_gateway: Arc<dyn AuthGateway>,
}

/// 管理画面のロールゲート
///
/// セッションが未確立なら401、確立済みでもadmin以外なら403。
/// ロール不一致時は呼び出し側自身のダッシュボードパスを案内する。
fn require_admin(session_store: &SessionStore) -> Result<(), ApiError> {
    let context = session_store
        .current()
        .ok_or(ApiError::Unauthenticated)?;

    if context.role != Role::Admin {
        return Err(ApiError::Forbidden {
            current_role: context.role,
        });
    }
    Ok(())
}

// ============================================================================
// Session handlers
// ============================================================================

/// POST /login - ログインしてセッションを確立
///
/// バックエンドの認証に成功したらセッションストアへ書き込み、
/// ロールに応じた遷移先を返す。セッションストアへの書き込みは
/// ここが唯一の経路。
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let context = state
        .auth_gateway
        .login(&req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(email = %req.email, "login failed: {}", e);
            ApiError::LoginFailed
        })?;

    state.session_store.establish(context.clone());

    Ok(Json(LoginResponse {
        token: context.token.as_str().to_string(),
        role: context.role.as_str(),
        redirect_to: dashboard_path(context.role),
    }))
}

/// POST /logout - セッションを破棄
pub async fn logout(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session_store.clear();
    StatusCode::NO_CONTENT
}

// ============================================================================
// Transaction view handlers (GET)
// ============================================================================

/// GET /admin/transactions - 貸出中ビュー
///
/// 全件を取得・整列したうえで貸出中のみに絞る。searchクエリが
/// あればユーザーメール・書籍タイトルへの部分一致も要求する。
pub async fn list_active_loans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ActiveLoansQuery>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    require_admin(&state.session_store)?;

    let records = load_transactions(&state.service_deps).await?;
    let search = query.search.unwrap_or_default();

    let filtered = filter_active_loans(&records, &search)
        .into_iter()
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(filtered))
}

/// GET /admin/transactions/history - 履歴ビュー
///
/// 返却済みのみを対象に、search・month（YYYY-MM）で絞り込む。
/// monthの形式不正は400。
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    require_admin(&state.session_store)?;

    let month_filter = match query.month.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<YearMonth>()
                .map_err(ApiError::BadRequest)?,
        ),
    };

    let records = load_transactions(&state.service_deps).await?;
    let search = query.search.unwrap_or_default();

    let filtered = filter_history(&records, &search, month_filter)
        .into_iter()
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(filtered))
}

/// GET /admin/transactions/form-options - 貸出フォームのセレクタ選択肢
pub async fn form_options(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FormOptionsResponse>, ApiError> {
    require_admin(&state.session_store)?;

    let options = borrow_form_options(&state.service_deps).await?;
    Ok(Json(FormOptionsResponse::from(options)))
}

// ============================================================================
// Mutation handlers
// ============================================================================

/// POST /admin/transactions/borrow - 貸出を作成
///
/// 必須項目の欠落はバックエンド呼び出し前に400で返す。
/// 返却期限が未指定なら貸出日+7日で確定する。
/// 成功時は再取得・整列済みのコレクションを返す（無効化して再読込）。
pub async fn create_borrow(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BorrowRequestBody>,
) -> Result<(StatusCode, Json<Vec<TransactionResponse>>), ApiError> {
    require_admin(&state.session_store)?;

    let records = borrow_book(&state.service_deps, body.into_form()).await?;
    let response = records.into_iter().map(TransactionResponse::from).collect();

    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /admin/transactions/return - 返却をマーク
///
/// 成功時は再取得・整列済みのコレクションを返す。
pub async fn mark_returned(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReturnRequestBody>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    require_admin(&state.session_store)?;

    let records = return_book(
        &state.service_deps,
        TransactionId::new(body.transaction_id),
        body.return_date,
    )
    .await?;
    let response = records.into_iter().map(TransactionResponse::from).collect();

    Ok(Json(response))
}
