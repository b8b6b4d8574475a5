pub mod auth_gateway;
pub mod book_catalog;
pub mod transaction_repository;
pub mod user_directory;

pub use auth_gateway::AuthGateway;
pub use book_catalog::{BookCatalog, BookSummary};
pub use transaction_repository::TransactionRepository;
pub use user_directory::{UserDirectory, UserSummary};
