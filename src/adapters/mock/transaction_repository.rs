use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;

use crate::domain::{BorrowRequest, BorrowTransaction, TransactionId};
use crate::ports::transaction_repository::{Result, TransactionRepository};

/// TransactionRepositoryのモック実装
///
/// インメモリのトランザクション集合を保持し、貸出・返却の呼び出しを
/// 記録する。`set_offline`でバックエンド障害を模擬できる。
pub struct MockTransactionRepository {
    transactions: Mutex<Vec<BorrowTransaction>>,
    borrow_calls: Mutex<Vec<BorrowRequest>>,
    return_calls: Mutex<Vec<(TransactionId, NaiveDate)>>,
    offline: Mutex<bool>,
}

impl MockTransactionRepository {
    pub fn new() -> Self {
        Self {
            transactions: Mutex::new(Vec::new()),
            borrow_calls: Mutex::new(Vec::new()),
            return_calls: Mutex::new(Vec::new()),
            offline: Mutex::new(false),
        }
    }

    /// テスト用にトランザクションを登録する
    pub fn add_transaction(&self, transaction: BorrowTransaction) {
        self.transactions.lock().unwrap().push(transaction);
    }

    /// バックエンド障害を模擬する
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    /// 記録された貸出リクエスト
    pub fn borrow_calls(&self) -> Vec<BorrowRequest> {
        self.borrow_calls.lock().unwrap().clone()
    }

    /// 記録された返却リクエスト
    pub fn return_calls(&self) -> Vec<(TransactionId, NaiveDate)> {
        self.return_calls.lock().unwrap().clone()
    }

    fn check_online(&self) -> Result<()> {
        if *self.offline.lock().unwrap() {
            return Err("backend unreachable".into());
        }
        Ok(())
    }

    fn next_id(&self) -> i64 {
        let transactions = self.transactions.lock().unwrap();
        transactions
            .iter()
            .map(|t| t.transaction_id.value())
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl Default for MockTransactionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionRepository for MockTransactionRepository {
    async fn list_all(&self) -> Result<Vec<BorrowTransaction>> {
        self.check_online()?;
        Ok(self.transactions.lock().unwrap().clone())
    }

    /// 貸出を記録し、バックエンド同様に新しいレコードを集合へ追加する
    async fn borrow(&self, request: &BorrowRequest) -> Result<()> {
        self.check_online()?;
        self.borrow_calls.lock().unwrap().push(request.clone());

        let transaction = BorrowTransaction {
            transaction_id: TransactionId::new(self.next_id()),
            user_id: request.user_id,
            book_id: request.book_id,
            user_email: format!("user{}@example.com", request.user_id.value()),
            book_title: format!("Book {}", request.book_id.value()),
            borrow_date: request.borrow_date,
            due_date: request.due_date,
            return_date: None,
            fine_amount: 0.0,
        };
        self.transactions.lock().unwrap().push(transaction);
        Ok(())
    }

    async fn mark_returned(
        &self,
        transaction_id: TransactionId,
        return_date: NaiveDate,
    ) -> Result<()> {
        self.check_online()?;
        self.return_calls
            .lock()
            .unwrap()
            .push((transaction_id, return_date));

        let mut transactions = self.transactions.lock().unwrap();
        match transactions
            .iter_mut()
            .find(|t| t.transaction_id == transaction_id)
        {
            Some(transaction) => {
                transaction.return_date = Some(return_date);
                Ok(())
            }
            None => Err(format!("transaction {} not found", transaction_id.value()).into()),
        }
    }
}
