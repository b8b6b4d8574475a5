use thiserror::Error;

/// 貸出管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LendingApplicationError {
    /// 必須項目の欠落（ネットワーク呼び出し前に検出される）
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// トランザクションリポジトリのエラー（バックエンド呼び出し失敗）
    #[error("Transaction repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ユーザーディレクトリのエラー
    #[error("User directory error")]
    DirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 書籍カタログのエラー
    #[error("Book catalog error")]
    CatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LendingApplicationError>;
