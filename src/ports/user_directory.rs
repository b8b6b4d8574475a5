use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::UserId;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出フォームのセレクタに表示するユーザー概要
///
/// ユーザー詳細はユーザー管理コンテキストの責務で、
/// ここでは選択肢の描画に必要な項目だけを持つ。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: UserId,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// バックエンドが所有するロール文字列。貸出フォームではadminを除外する
    #[serde(default)]
    pub role: String,
}

impl UserSummary {
    /// セレクタの表示名。氏名がなければメールアドレスに落ちる
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}

/// ユーザーディレクトリポート
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// 全ユーザーを取得する
    async fn list_users(&self) -> Result<Vec<UserSummary>>;
}
