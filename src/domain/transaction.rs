use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::{BookId, MissingFieldError, TransactionId, TransactionStatus, UserId, YearMonth};

/// 返却期限を指定しなかった場合の貸出期間（日数）
pub const DEFAULT_LOAN_PERIOD_DAYS: i64 = 7;

/// 貸出トランザクション - バックエンドが所有するレコードの読み取りコピー
///
/// クライアントはこれを永続化しない。画面を開くたびに全件を再取得するため、
/// メモリ上のコレクションの寿命は画面の閲覧セッションと等しい。
///
/// バックエンドはstatus文字列も返すが、ここでは意図的にデシリアライズしない。
/// ステータスは常に`classify_status`でreturn_dateから導出する。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowTransaction {
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub book_id: BookId,

    // バックエンドが付与する表示用の非正規化フィールド
    pub user_email: String,
    pub book_title: String,

    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    /// 返却日。バックエンドが空文字列を返すことがあり、欠落として扱う
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub return_date: Option<NaiveDate>,

    /// 延滞金。バックエンドが計算・所有し、クライアントは表示のみ。欠落時は0
    #[serde(default, deserialize_with = "missing_fine_as_zero")]
    pub fine_amount: f64,
}

/// 空文字列・nullの返却日を欠落として読み込む
fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<NaiveDate>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// null・欠落の延滞金を0として読み込む
fn missing_fine_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.unwrap_or(0.0))
}

/// 貸出画面から提出されるフォーム入力（バリデーション前）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorrowForm {
    pub user_id: Option<UserId>,
    pub book_id: Option<BookId>,
    pub borrow_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

/// バリデーション済みの貸出申請
///
/// `validate_borrow_request`を通してのみ生成され、
/// 返却期限はこの時点で常に確定している。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub user_id: UserId,
    pub book_id: BookId,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// 純粋関数：返却期限のデフォルト値を導出する
///
/// ビジネスルール：
/// - 明示的に指定されていればそのまま使う
/// - 指定がなければ貸出日 + 7日
///
/// 月またぎ・年またぎはカレンダー通りに繰り上がる。入力の欠落は
/// エラーにはならず、常にデフォルトに落ちる。
pub fn derive_default_due_date(borrow_date: NaiveDate, explicit: Option<NaiveDate>) -> NaiveDate {
    match explicit {
        Some(due_date) => due_date,
        None => borrow_date + Duration::days(DEFAULT_LOAN_PERIOD_DAYS),
    }
}

/// 純粋関数：貸出申請をバリデーションする
///
/// ユーザー・書籍・貸出日のいずれかが欠落していれば`MissingFieldError`。
/// これが提出前の唯一のバリデーションゲートで、在庫確認や重複貸出の
/// 検査は行わない（バックエンドの責務）。
pub fn validate_borrow_request(form: &BorrowForm) -> Result<BorrowRequest, MissingFieldError> {
    let user_id = form.user_id.ok_or(MissingFieldError { field: "userId" })?;
    let book_id = form.book_id.ok_or(MissingFieldError { field: "bookId" })?;
    let borrow_date = form
        .borrow_date
        .ok_or(MissingFieldError { field: "borrowDate" })?;

    Ok(BorrowRequest {
        user_id,
        book_id,
        borrow_date,
        due_date: derive_default_due_date(borrow_date, form.due_date),
    })
}

/// 純粋関数：ステータスを導出する
///
/// 不変条件：`Returned` ⟺ return_dateが存在する。
/// 整形式のレコード全体に対して全域。
pub fn classify_status(record: &BorrowTransaction) -> TransactionStatus {
    if record.return_date.is_some() {
        TransactionStatus::Returned
    } else {
        TransactionStatus::Borrowed
    }
}

/// 返却中のレコードを先頭に、各区画内は貸出日の降順で整列する
///
/// 全順序：
/// - return_dateのないレコード（貸出中）が返却済みより前
/// - 同じ区画内は貸出日の新しい順
/// - 貸出日が等しい場合は入力順を保持（安定ソート）
///
/// 取得直後に一度だけ適用する。フィルタ後に再適用してはならない
/// （フィルタが順序を作り替えてはいけない）。
pub fn sort_active_first(records: &mut [BorrowTransaction]) {
    records.sort_by(|a, b| {
        let a_returned = a.return_date.is_some();
        let b_returned = b.return_date.is_some();
        a_returned
            .cmp(&b_returned)
            .then(b.borrow_date.cmp(&a.borrow_date))
    });
}

/// 貸出中ビューのフィルタ
///
/// ステータスが貸出中のレコードのみ残す。検索語が空でなければ、
/// さらにユーザーメールまたは書籍タイトルに対する大文字小文字を
/// 区別しない部分一致を要求する。空の検索語は恒等フィルタ。
pub fn filter_active_loans(
    records: &[BorrowTransaction],
    search_query: &str,
) -> Vec<BorrowTransaction> {
    records
        .iter()
        .filter(|record| classify_status(record) == TransactionStatus::Borrowed)
        .filter(|record| matches_search(record, search_query))
        .cloned()
        .collect()
}

/// 履歴ビューのフィルタ
///
/// ステータスが返却済みのレコードのみ残す。検索語の意味は
/// `filter_active_loans`と同一。月フィルタが指定された場合は
/// 返却日の年月が完全一致するレコードのみ残す。返却日のない
/// レコードは月フィルタに一致し得ないが、そもそもステータス
/// フィルタで除外されている（整合性の帰結であり追加ルールではない）。
pub fn filter_history(
    records: &[BorrowTransaction],
    search_query: &str,
    month_filter: Option<YearMonth>,
) -> Vec<BorrowTransaction> {
    records
        .iter()
        .filter(|record| classify_status(record) == TransactionStatus::Returned)
        .filter(|record| matches_search(record, search_query))
        .filter(|record| match month_filter {
            None => true,
            Some(month) => record
                .return_date
                .map(|date| month.contains(date))
                .unwrap_or(false),
        })
        .cloned()
        .collect()
}

/// 検索語との部分一致判定（大文字小文字を区別しない）
fn matches_search(record: &BorrowTransaction, search_query: &str) -> bool {
    if search_query.is_empty() {
        return true;
    }
    let query = search_query.to_lowercase();
    record.user_email.to_lowercase().contains(&query)
        || record.book_title.to_lowercase().contains(&query)
}
