use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

use crate::session::SessionStore;

/// バックエンド呼び出しのエラー
#[derive(Debug, Error)]
pub enum BackendError {
    /// セッション未確立のまま認証必須のエンドポイントを呼んだ
    #[error("No established session")]
    NoSession,

    /// トランスポート層の失敗（接続不可・タイムアウトなど）
    #[error("Backend request failed")]
    Transport(#[from] reqwest::Error),

    /// バックエンドがエラーステータスを返した
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// トークンのペイロードが解読できない
    #[error("Malformed token payload")]
    MalformedToken,
}

/// バックエンドREST APIクライアント
///
/// 全アダプタで共有されるHTTP層。リクエストごとにセッションストアから
/// Bearerクレデンシャルを読み出して付与する。リトライ・キャンセルは
/// 実装しない。連続送信時は最後に到着したレスポンスが勝つ。
/// タイムアウトはネットワーク層のデフォルトに従う。
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// 現在のセッションからBearerヘッダ値を組み立てる
    fn bearer(&self) -> Result<String, BackendError> {
        let context = self.session.current().ok_or(BackendError::NoSession)?;
        Ok(format!("Bearer {}", context.token.as_str()))
    }

    /// 認証付きGET
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self
            .http
            .get(self.url(path))
            .header(AUTHORIZATION, self.bearer()?)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// 認証付きPOST（ボディはJSON）
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.url(path))
            .header(AUTHORIZATION, self.bearer()?)
            .json(body)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// 認証付きPUT（ボディはJSON）
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), BackendError> {
        let response = self
            .http
            .put(self.url(path))
            .header(AUTHORIZATION, self.bearer()?)
            .json(body)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// 認証なしPOST（ログイン用）
    pub async fn post_json_unauthenticated<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// エラーステータスをBackendError::Statusに写す
///
/// 詳細ボディはログにのみ残し、呼び出し側へはステータスと短いボディを返す。
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %body, "backend returned error status");
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthToken, Role};
    use crate::session::SessionContext;

    #[test]
    fn test_url_joins_base_and_path() {
        let session = Arc::new(SessionStore::new());
        let client = BackendClient::new("https://backend.example.com/api/", session);
        assert_eq!(
            client.url("/borrowtransaction"),
            "https://backend.example.com/api/borrowtransaction"
        );
    }

    #[test]
    fn test_bearer_requires_established_session() {
        let session = Arc::new(SessionStore::new());
        let client = BackendClient::new("https://backend.example.com/api", session.clone());

        assert!(matches!(client.bearer(), Err(BackendError::NoSession)));

        session.establish(SessionContext {
            token: AuthToken::new("abc"),
            role: Role::Admin,
        });
        assert_eq!(client.bearer().unwrap(), "Bearer abc");
    }
}
