use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 貸出トランザクションID - バックエンドが採番する一意な識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// ユーザーID - ユーザー管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 書籍ID - カタログ管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 貸出トランザクションのステータス
///
/// 保存される値ではなく、return_dateから導出される概念。
/// バックエンドがstatus文字列を返す場合でも、クライアント側では
/// 常にreturn_dateから再導出する（二重管理による不整合を避けるため）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// 貸出中
    Borrowed,
    /// 返却済み
    Returned,
}

impl TransactionStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Borrowed => "borrowed",
            TransactionStatus::Returned => "returned",
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "borrowed" => Ok(TransactionStatus::Borrowed),
            "returned" => Ok(TransactionStatus::Returned),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

/// セッションに紐づくロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// 年月のフィルタ条件
///
/// 履歴画面の月フィルタで使用される。`YYYY-MM`形式から生成し、
/// カレンダー日付がその年月に含まれるかを判定する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// 年月を生成する
    ///
    /// # エラー
    /// 月が1〜12の範囲外の場合はエラーを返す
    pub fn new(year: i32, month: u32) -> std::result::Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("Invalid month: {}", month));
        }
        Ok(Self { year, month })
    }

    /// 日付がこの年月に属するか判定する
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (year_part, month_part) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid year-month: {}", s))?;

        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(format!("Invalid year-month: {}", s));
        }

        let year: i32 = year_part
            .parse()
            .map_err(|_| format!("Invalid year-month: {}", s))?;
        let month: u32 = month_part
            .parse()
            .map_err(|_| format!("Invalid year-month: {}", s))?;

        Self::new(year, month)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// 認証トークン
///
/// ログイン時にバックエンドから発行されるBearerクレデンシャル。
/// 発行・検証は完全にバックエンドの責務で、クライアントは保持と送信のみ行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ID value objects のテスト
    #[test]
    fn test_transaction_id_holds_value() {
        let id = TransactionId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_ids_with_same_value_are_equal() {
        assert_eq!(UserId::new(7), UserId::new(7));
        assert_ne!(BookId::new(1), BookId::new(2));
    }

    // TransactionStatus のテスト
    #[test]
    fn test_transaction_status_as_str() {
        assert_eq!(TransactionStatus::Borrowed.as_str(), "borrowed");
        assert_eq!(TransactionStatus::Returned.as_str(), "returned");
    }

    #[test]
    fn test_transaction_status_from_str() {
        assert_eq!(
            "borrowed".parse::<TransactionStatus>(),
            Ok(TransactionStatus::Borrowed)
        );
        assert_eq!(
            "returned".parse::<TransactionStatus>(),
            Ok(TransactionStatus::Returned)
        );
        assert!("lost".parse::<TransactionStatus>().is_err());
    }

    // Role のテスト
    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert!("librarian".parse::<Role>().is_err());
    }

    // YearMonth のテスト
    #[test]
    fn test_year_month_from_str() {
        let ym = "2024-05".parse::<YearMonth>().unwrap();
        assert!(ym.contains(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()));
    }

    #[test]
    fn test_year_month_rejects_malformed_input() {
        assert!("2024".parse::<YearMonth>().is_err());
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("24-05".parse::<YearMonth>().is_err());
        assert!("2024-5".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_display_round_trip() {
        let ym = YearMonth::new(2024, 5).unwrap();
        assert_eq!(ym.to_string(), "2024-05");
        assert_eq!(ym.to_string().parse::<YearMonth>(), Ok(ym));
    }
}
