//! `SeaORM` entities for the moneta schema.

pub mod prelude;

pub mod accounts;
pub mod categories;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;
