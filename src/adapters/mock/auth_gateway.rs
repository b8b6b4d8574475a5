use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{AuthToken, Role};
use crate::ports::auth_gateway::{AuthGateway, Result};
use crate::session::SessionContext;

/// AuthGatewayのモック実装
///
/// 登録されたアカウントに対してのみログインを許可し、
/// 決定的なトークンを発行する。
pub struct MockAuthGateway {
    accounts: Mutex<HashMap<String, (String, Role)>>,
}

impl MockAuthGateway {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// テスト用にアカウントを登録する
    pub fn register_account(&self, email: &str, password: &str, role: Role) {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), role));
    }
}

impl Default for MockAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn login(&self, email: &str, password: &str) -> Result<SessionContext> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((expected, role)) if expected == password => Ok(SessionContext {
                token: AuthToken::new(format!("mock-token-{}", email)),
                role: *role,
            }),
            _ => Err("invalid credentials".into()),
        }
    }
}
