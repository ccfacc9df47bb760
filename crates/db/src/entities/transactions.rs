//! `SeaORM` Entity for transactions table.
//!
//! Account linkage columns carry no foreign key: transaction history
//! outlives account deletion, so `account_id` may dangle while the
//! `account_name` cache keeps the row readable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TransactionKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: TransactionKind,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub amount: Decimal,
    pub description: String,
    pub category: Option<String>,
    pub division: Option<String>,
    pub account_id: Option<Uuid>,
    pub account_name: Option<String>,
    pub from_account_id: Option<Uuid>,
    pub from_account_name: Option<String>,
    pub to_account_id: Option<Uuid>,
    pub to_account_name: Option<String>,
    pub date_time: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
