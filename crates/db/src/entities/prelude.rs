//! Re-exports of all entity types.

pub use super::accounts::Entity as Accounts;
pub use super::categories::Entity as Categories;
pub use super::transactions::Entity as Transactions;
pub use super::users::Entity as Users;
