use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::lending::BorrowFormOptions;
use crate::domain::{
    BookId, BorrowForm, BorrowTransaction, Role, TransactionId, UserId, classify_status,
};
use crate::ports::{BookSummary, UserSummary};

/// ログインリクエスト（POST /login）
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// ログインレスポンス
///
/// redirect_toはロールに応じた遷移先。フロントはこれに従って
/// ダッシュボードへ移動する。
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: &'static str,
    pub redirect_to: &'static str,
}

/// ロールごとのダッシュボードパス
pub fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/dashboard",
        Role::User => "/user/dashboard",
    }
}

/// 貸出中ビューのクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ActiveLoansQuery {
    /// ユーザーメール・書籍タイトルに対する部分一致検索
    pub search: Option<String>,
}

/// 履歴ビューのクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub search: Option<String>,
    /// `YYYY-MM`形式の月フィルタ
    pub month: Option<String>,
}

/// 貸出リクエスト（POST /admin/transactions/borrow）
///
/// 欠落チェックはドメイン層のバリデーションに委ねるため、
/// ここでは全項目をOptionで受ける。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequestBody {
    pub user_id: Option<i64>,
    pub book_id: Option<i64>,
    pub borrow_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

impl BorrowRequestBody {
    pub fn into_form(self) -> BorrowForm {
        BorrowForm {
            user_id: self.user_id.map(UserId::new),
            book_id: self.book_id.map(BookId::new),
            borrow_date: self.borrow_date,
            due_date: self.due_date,
        }
    }
}

/// 返却リクエスト（PUT /admin/transactions/return）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequestBody {
    pub transaction_id: i64,
    pub return_date: NaiveDate,
}

/// トランザクションレスポンス
///
/// statusは常にreturn_dateから導出した値を返す。
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub user_email: String,
    pub book_title: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub fine_amount: f64,
    pub status: &'static str,
}

impl From<BorrowTransaction> for TransactionResponse {
    fn from(record: BorrowTransaction) -> Self {
        let status = classify_status(&record).as_str();
        Self {
            transaction_id: record.transaction_id,
            user_id: record.user_id,
            book_id: record.book_id,
            user_email: record.user_email,
            book_title: record.book_title,
            borrow_date: record.borrow_date,
            due_date: record.due_date,
            return_date: record.return_date,
            fine_amount: record.fine_amount,
            status,
        }
    }
}

/// 貸出フォームのセレクタ選択肢
#[derive(Debug, Serialize)]
pub struct UserOption {
    pub user_id: UserId,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct BookOption {
    pub book_id: BookId,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct FormOptionsResponse {
    pub users: Vec<UserOption>,
    pub books: Vec<BookOption>,
}

impl From<BorrowFormOptions> for FormOptionsResponse {
    fn from(options: BorrowFormOptions) -> Self {
        Self {
            users: options.users.into_iter().map(user_option).collect(),
            books: options.books.into_iter().map(book_option).collect(),
        }
    }
}

fn user_option(user: UserSummary) -> UserOption {
    let label = user.display_name().to_string();
    UserOption {
        user_id: user.user_id,
        label,
    }
}

fn book_option(book: BookSummary) -> BookOption {
    BookOption {
        book_id: book.book_id,
        title: book.title,
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
