use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthToken, Role};
use crate::ports::auth_gateway::{AuthGateway, Result};
use crate::session::SessionContext;

use super::client::{BackendClient, BackendError};

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponseBody {
    token: String,
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    role: String,
}

/// AuthGatewayのバックエンドREST実装（POST /user/login）
///
/// バックエンドはトークンのみを返す。ロールはJWTのペイロードセグメント
/// （base64url）に入っているクレームから読み出す。署名検証はしない -
/// トークンの正当性を判定するのはバックエンドで、ここでは表示・
/// ルーティング用のロールフラグを取り出すだけ。
pub struct AuthGatewayAdapter {
    client: BackendClient,
}

impl AuthGatewayAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for AuthGatewayAdapter {
    async fn login(&self, email: &str, password: &str) -> Result<SessionContext> {
        let payload = LoginPayload { email, password };
        let body: LoginResponseBody = self
            .client
            .post_json_unauthenticated("/user/login", &payload)
            .await?;

        let role = decode_role_claim(&body.token)?;

        Ok(SessionContext {
            token: AuthToken::new(body.token),
            role,
        })
    }
}

/// JWTのペイロードからroleクレームを取り出す
fn decode_role_claim(token: &str) -> std::result::Result<Role, BackendError> {
    let payload_segment = token
        .split('.')
        .nth(1)
        .ok_or(BackendError::MalformedToken)?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload_segment.trim_end_matches('='))
        .map_err(|_| BackendError::MalformedToken)?;

    let claims: TokenClaims =
        serde_json::from_slice(&payload).map_err(|_| BackendError::MalformedToken)?;

    claims.role.parse().map_err(|_| BackendError::MalformedToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "header.{}.signature",
            URL_SAFE_NO_PAD.encode(payload.as_bytes())
        )
    }

    #[test]
    fn test_decode_role_claim_admin() {
        let token = token_with_payload(r#"{"sub":"1","role":"admin","exp":1735689600}"#);
        assert_eq!(decode_role_claim(&token).unwrap(), Role::Admin);
    }

    #[test]
    fn test_decode_role_claim_user() {
        let token = token_with_payload(r#"{"role":"user"}"#);
        assert_eq!(decode_role_claim(&token).unwrap(), Role::User);
    }

    #[test]
    fn test_decode_role_claim_rejects_unknown_role() {
        let token = token_with_payload(r#"{"role":"librarian"}"#);
        assert!(decode_role_claim(&token).is_err());
    }

    #[test]
    fn test_decode_role_claim_rejects_opaque_token() {
        assert!(decode_role_claim("not-a-jwt").is_err());
        assert!(decode_role_claim("a.!!!invalid-base64!!!.c").is_err());
    }
}
