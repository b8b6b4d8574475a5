use std::sync::RwLock;

use crate::domain::{AuthToken, Role};

/// 確立済みセッションのコンテキスト
///
/// 認証トークンとロールフラグの組。ログイン時にのみ書き込まれ、
/// 他のコンポーネントはこれを読むだけ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub token: AuthToken,
    pub role: Role,
}

/// セッションストア
///
/// プロセス全体で共有されるセッション状態。アンビエントな参照ではなく
/// `Arc`で明示的に注入する。ライフサイクルは明示的で、ログイン時の
/// `establish`とログアウト時の`clear`以外に書き込み経路はない。
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<SessionContext>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// セッションを確立する（ログイン時）
    pub fn establish(&self, context: SessionContext) {
        let mut guard = self.current.write().expect("session store lock poisoned");
        *guard = Some(context);
    }

    /// セッションを破棄する（ログアウト・失効時）
    pub fn clear(&self) {
        let mut guard = self.current.write().expect("session store lock poisoned");
        *guard = None;
    }

    /// 現在のセッションを取得する
    pub fn current(&self) -> Option<SessionContext> {
        self.current
            .read()
            .expect("session store lock poisoned")
            .clone()
    }
}
