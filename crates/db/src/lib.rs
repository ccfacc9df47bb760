//! Persistence layer: `SeaORM` entities, repositories, and migrations
//! for the moneta schema.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountRepository, CategoryRepository, SummaryRepository, TransactionRepository,
    UserRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Opens a connection pool against `database_url`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
