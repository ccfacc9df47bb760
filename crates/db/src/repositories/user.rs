//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    accounts, categories,
    sea_orm_active_enums::{AccountKind, CategoryKind},
    users,
};

/// Accounts every new user starts with: (name, kind, color, icon).
const DEFAULT_ACCOUNTS: [(&str, AccountKind, &str, &str); 2] = [
    ("Cash", AccountKind::Cash, "hsl(45, 90%, 50%)", "Wallet"),
    (
        "Bank Account",
        AccountKind::Bank,
        "hsl(200, 75%, 50%)",
        "Building2",
    ),
];

/// Categories every new user starts with: (name, kind, icon, color).
const DEFAULT_CATEGORIES: [(&str, CategoryKind, &str, &str); 6] = [
    (
        "Salary",
        CategoryKind::Income,
        "Briefcase",
        "hsl(152, 70%, 40%)",
    ),
    (
        "Freelance",
        CategoryKind::Income,
        "Laptop",
        "hsl(200, 75%, 50%)",
    ),
    (
        "Food & Dining",
        CategoryKind::Expense,
        "Utensils",
        "hsl(0, 72%, 55%)",
    ),
    (
        "Transportation",
        CategoryKind::Expense,
        "Car",
        "hsl(280, 65%, 55%)",
    ),
    (
        "Shopping",
        CategoryKind::Expense,
        "ShoppingBag",
        "hsl(15, 85%, 60%)",
    ),
    (
        "Bills & Utilities",
        CategoryKind::Expense,
        "Receipt",
        "hsl(200, 60%, 45%)",
    ),
];

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user together with the default accounts and
    /// categories, in one database transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the inserts fail.
    pub async fn create_with_defaults(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<users::Model, DbErr> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();
        let user_id = Uuid::new_v4();

        let user = users::ActiveModel {
            id: Set(user_id),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        for (account_name, kind, color, icon) in DEFAULT_ACCOUNTS {
            accounts::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                name: Set(account_name.to_string()),
                kind: Set(kind),
                balance: Set(rust_decimal::Decimal::ZERO),
                color: Set(color.to_string()),
                icon: Set(icon.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        for (category_name, kind, icon, color) in DEFAULT_CATEGORIES {
            categories::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(Some(user_id)),
                name: Set(category_name.to_string()),
                kind: Set(kind),
                icon: Set(icon.to_string()),
                color: Set(color.to_string()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(user)
    }
}
