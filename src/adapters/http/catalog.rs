use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::ports::book_catalog::{BookCatalog, BookSummary};
use crate::ports::user_directory::{UserDirectory, UserSummary};

use super::client::{BackendClient, BackendError};

/// 単一オブジェクトと配列のどちらで返ってきても配列に正規化する
///
/// バックエンドは要素が1件のとき配列ではなく単体オブジェクトを
/// 返すことがある。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

async fn fetch_list<T: DeserializeOwned>(
    client: &BackendClient,
    path: &str,
) -> Result<Vec<T>, BackendError> {
    let response: OneOrMany<T> = client.get_json(path).await?;
    Ok(response.into())
}

/// UserDirectoryのバックエンドREST実装（GET /user）
pub struct UserDirectoryAdapter {
    client: BackendClient,
}

impl UserDirectoryAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserDirectory for UserDirectoryAdapter {
    async fn list_users(&self) -> crate::ports::user_directory::Result<Vec<UserSummary>> {
        let users = fetch_list(&self.client, "/user").await?;
        Ok(users)
    }
}

/// BookCatalogのバックエンドREST実装（GET /Book）
///
/// パスの大文字小文字はバックエンドのルーティングに合わせている。
pub struct BookCatalogAdapter {
    client: BackendClient,
}

impl BookCatalogAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookCatalog for BookCatalogAdapter {
    async fn list_books(&self) -> crate::ports::book_catalog::Result<Vec<BookSummary>> {
        let books = fetch_list(&self.client, "/Book").await?;
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_one_or_many_accepts_array() {
        let parsed: OneOrMany<Item> = serde_json::from_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        let items: Vec<Item> = parsed.into();
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[test]
    fn test_one_or_many_accepts_single_object() {
        let parsed: OneOrMany<Item> = serde_json::from_str(r#"{"id":1}"#).unwrap();
        let items: Vec<Item> = parsed.into();
        assert_eq!(items, vec![Item { id: 1 }]);
    }
}
