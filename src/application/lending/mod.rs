mod errors;
mod lending_service;

pub use errors::{LendingApplicationError, Result};
pub use lending_service::{
    BorrowFormOptions, ServiceDependencies, borrow_book, borrow_form_options, load_transactions,
    return_book,
};
