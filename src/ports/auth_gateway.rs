use async_trait::async_trait;

use crate::session::SessionContext;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 認証ゲートウェイポート
///
/// クレデンシャルの検証とトークン発行はバックエンドの責務。
/// このポートはログイン結果をセッションコンテキストとして返すだけで、
/// セッションストアへの書き込みは呼び出し側（API層）が行う。
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// メールアドレスとパスワードでログインする
    async fn login(&self, email: &str, password: &str) -> Result<SessionContext>;
}
