//! Category repository.
//!
//! Rows with a `user_id` belong to that user; rows with `user_id = NULL`
//! are shared across all users. Listing returns both.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{categories, sea_orm_active_enums::CategoryKind};

/// Input for creating a custom category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Category name.
    pub name: String,
    /// Whether the category classifies income or expenses.
    pub kind: CategoryKind,
    /// Icon identifier.
    pub icon: String,
    /// Display color.
    pub color: String,
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the user's categories plus the shared ones, by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<categories::Model>, DbErr> {
        categories::Entity::find()
            .filter(
                Condition::any()
                    .add(categories::Column::UserId.eq(user_id))
                    .add(categories::Column::UserId.is_null()),
            )
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
    }

    /// Creates a category owned by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateCategoryInput,
    ) -> Result<categories::Model, DbErr> {
        categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(Some(user_id)),
            name: Set(input.name),
            kind: Set(input.kind),
            icon: Set(input.icon),
            color: Set(input.color),
        }
        .insert(&self.db)
        .await
    }
}
