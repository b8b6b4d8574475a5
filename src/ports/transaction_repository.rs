use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{BorrowRequest, BorrowTransaction, TransactionId};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出トランザクションリポジトリポート
///
/// バックエンドに対するremote list/create/updateを抽象化する。
/// ローカル永続化は行わない。変異後の反映は「無効化して再読込」の
/// 契約に従い、呼び出し側が`list_all`を再実行する。
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// 全トランザクションを取得する
    ///
    /// 画面を開くたび・変異のたびに全件を取り直す。
    async fn list_all(&self) -> Result<Vec<BorrowTransaction>>;

    /// 貸出を作成する
    ///
    /// 在庫確認・重複貸出の検査はバックエンド側で行われる。
    async fn borrow(&self, request: &BorrowRequest) -> Result<()>;

    /// 返却済みとしてマークする
    ///
    /// return_dateは一度だけ設定され、以後の再貸出フローは存在しない。
    async fn mark_returned(&self, transaction_id: TransactionId, return_date: NaiveDate)
    -> Result<()>;
}
