use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{BorrowRequest, BorrowTransaction, TransactionId};
use crate::ports::transaction_repository::{Result, TransactionRepository};

use super::client::BackendClient;

/// 返却リクエストのワイヤ形式
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReturnPayload {
    transaction_id: TransactionId,
    return_date: NaiveDate,
}

/// TransactionRepositoryのバックエンドREST実装
///
/// 消費するエンドポイント：
/// - GET  /borrowtransaction        - 全件取得
/// - POST /borrowtransaction/borrow - 貸出作成
/// - PUT  /borrowtransaction/return - 返却マーク
pub struct TransactionRepositoryAdapter {
    client: BackendClient,
}

impl TransactionRepositoryAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransactionRepository for TransactionRepositoryAdapter {
    async fn list_all(&self) -> Result<Vec<BorrowTransaction>> {
        let records = self.client.get_json("/borrowtransaction").await?;
        Ok(records)
    }

    async fn borrow(&self, request: &BorrowRequest) -> Result<()> {
        // BorrowRequestはそのままワイヤ形式（camelCase）にシリアライズされる
        self.client
            .post_json("/borrowtransaction/borrow", request)
            .await?;
        Ok(())
    }

    async fn mark_returned(
        &self,
        transaction_id: TransactionId,
        return_date: NaiveDate,
    ) -> Result<()> {
        let payload = ReturnPayload {
            transaction_id,
            return_date,
        };
        self.client
            .put_json("/borrowtransaction/return", &payload)
            .await?;
        Ok(())
    }
}
