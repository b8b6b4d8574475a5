pub mod auth_gateway;
pub mod catalog;
pub mod client;
pub mod transaction_repository;

pub use auth_gateway::AuthGatewayAdapter;
pub use catalog::{BookCatalogAdapter, UserDirectoryAdapter};
pub use client::{BackendClient, BackendError};
pub use transaction_repository::TransactionRepositoryAdapter;
