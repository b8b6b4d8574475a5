use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::{
    BorrowForm, BorrowTransaction, TransactionId, sort_active_first, validate_borrow_request,
};
use crate::ports::{BookCatalog, BookSummary, TransactionRepository, UserDirectory, UserSummary};

use super::errors::{LendingApplicationError, Result};

/// サービスの依存関係
///
/// データ構造として定義し、振る舞いは純粋な非同期関数に依存関係を渡す。
/// すべての依存が明示的になり、モックアダプタ差し替えだけでテストできる。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub transaction_repository: Arc<dyn TransactionRepository>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub book_catalog: Arc<dyn BookCatalog>,
}

/// 貸出フォームのセレクタに流し込む選択肢
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowFormOptions {
    pub users: Vec<UserSummary>,
    pub books: Vec<BookSummary>,
}

/// 全トランザクションを取得して整列する
///
/// 整列はフェッチ直後にここで一度だけ適用される。以降のクライアント側
/// フィルタは順序を作り替えない。
///
/// # エラー
/// バックエンド呼び出しの失敗はそのまま呼び出し側へ伝播し、
/// 読込済みの状態には触れない。
pub async fn load_transactions(deps: &ServiceDependencies) -> Result<Vec<BorrowTransaction>> {
    let mut records = deps
        .transaction_repository
        .list_all()
        .await
        .map_err(LendingApplicationError::RepositoryError)?;

    sort_active_first(&mut records);
    Ok(records)
}

/// 書籍を貸し出す
///
/// 処理フロー：
/// 1. フォーム入力をバリデーション（欠落があればネットワーク呼び出し前に失敗）
/// 2. 返却期限の確定（未指定なら貸出日+7日）
/// 3. バックエンドへ貸出作成を送信
/// 4. 無効化して再読込 - 楽観的なローカル更新はせず全件を取り直す
///
/// # 戻り値
/// 再取得・整列済みのトランザクションコレクション
pub async fn borrow_book(
    deps: &ServiceDependencies,
    form: BorrowForm,
) -> Result<Vec<BorrowTransaction>> {
    // 1, 2. バリデーションと返却期限の確定
    let request = validate_borrow_request(&form)
        .map_err(|e| LendingApplicationError::MissingField(e.field))?;

    // 3. バックエンドへ送信
    deps.transaction_repository
        .borrow(&request)
        .await
        .map_err(LendingApplicationError::RepositoryError)?;

    tracing::info!(
        user_id = request.user_id.value(),
        book_id = request.book_id.value(),
        due_date = %request.due_date,
        "borrow transaction created"
    );

    // 4. 無効化して再読込
    load_transactions(deps).await
}

/// 書籍を返却する
///
/// return_dateを設定し、トランザクションをreturnedに遷移させる。
/// 遷移は一度きりで、再オープンのフローは存在しない。
/// 変異後は貸出と同じく全件を取り直す。
pub async fn return_book(
    deps: &ServiceDependencies,
    transaction_id: TransactionId,
    return_date: NaiveDate,
) -> Result<Vec<BorrowTransaction>> {
    deps.transaction_repository
        .mark_returned(transaction_id, return_date)
        .await
        .map_err(LendingApplicationError::RepositoryError)?;

    tracing::info!(
        transaction_id = transaction_id.value(),
        return_date = %return_date,
        "borrow transaction returned"
    );

    load_transactions(deps).await
}

/// 貸出フォームのセレクタ用にユーザーと書籍を取得する
///
/// adminロールのユーザーは貸出対象にならないため除外する。
pub async fn borrow_form_options(deps: &ServiceDependencies) -> Result<BorrowFormOptions> {
    let users = deps
        .user_directory
        .list_users()
        .await
        .map_err(LendingApplicationError::DirectoryError)?
        .into_iter()
        .filter(|user| user.role != "admin")
        .collect();

    let books = deps
        .book_catalog
        .list_books()
        .await
        .map_err(LendingApplicationError::CatalogError)?;

    Ok(BorrowFormOptions { users, books })
}
