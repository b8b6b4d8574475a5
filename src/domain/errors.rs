/// 貸出申請バリデーションのエラー
///
/// エンジンが返す唯一の明示的な失敗。提出前に必須項目の欠落のみを検査する。
/// 在庫の有無や同一ユーザーの重複貸出チェックはバックエンドの責務。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFieldError {
    /// 欠落していた項目名
    pub field: &'static str,
}

impl std::fmt::Display for MissingFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Missing required field: {}", self.field)
    }
}

impl std::error::Error for MissingFieldError {}
