pub mod auth_gateway;
pub mod book_catalog;
pub mod transaction_repository;
pub mod user_directory;

pub use auth_gateway::MockAuthGateway;
pub use book_catalog::MockBookCatalog;
pub use transaction_repository::MockTransactionRepository;
pub use user_directory::MockUserDirectory;
