use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::BookId;
use crate::ports::book_catalog::{BookCatalog, BookSummary, Result};

/// BookCatalogのモック実装
pub struct MockBookCatalog {
    books: Mutex<Vec<BookSummary>>,
}

impl MockBookCatalog {
    pub fn new() -> Self {
        Self {
            books: Mutex::new(Vec::new()),
        }
    }

    /// テスト用に書籍を登録する
    pub fn add_book(&self, book_id: i64, title: &str) {
        self.books.lock().unwrap().push(BookSummary {
            book_id: BookId::new(book_id),
            title: title.to_string(),
        });
    }
}

impl Default for MockBookCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookCatalog for MockBookCatalog {
    async fn list_books(&self) -> Result<Vec<BookSummary>> {
        Ok(self.books.lock().unwrap().clone())
    }
}
