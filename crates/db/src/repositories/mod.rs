//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod category;
mod reconcile;
pub mod summary;
pub mod transaction;
pub mod user;

pub use account::{
    AccountError, AccountRepository, CreateAccountInput, TransferInput, TransferOutcome,
    UpdateAccountInput,
};
pub use category::{CategoryRepository, CreateCategoryInput};
pub use summary::SummaryRepository;
pub use transaction::{
    CreateTransactionInput, CreatedTransaction, TransactionError, TransactionFilter,
    TransactionRepository, UpdateTransactionInput,
};
pub use user::UserRepository;
