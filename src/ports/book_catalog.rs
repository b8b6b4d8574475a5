use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::BookId;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出フォームのセレクタに表示する書籍概要
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub book_id: BookId,
    pub title: String,
}

/// 書籍カタログポート
///
/// 貸出コンテキストとカタログコンテキストの境界を維持する。
/// 蔵書管理のCRUDはこのコンソールの外にあり、ここでは選択肢の
/// 取得のみを行う。
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// 全書籍を取得する
    async fn list_books(&self) -> Result<Vec<BookSummary>>;
}
