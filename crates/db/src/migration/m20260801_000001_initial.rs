//! Initial database migration.
//!
//! Creates the enums, core tables, and indexes for users, accounts,
//! transactions, and categories.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CORE TABLES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(CATEGORIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account kinds
CREATE TYPE account_kind AS ENUM (
    'cash',
    'bank',
    'credit',
    'investment'
);

-- Transaction kinds
CREATE TYPE transaction_kind AS ENUM (
    'income',
    'expense',
    'transfer'
);

-- Category kinds
CREATE TYPE category_kind AS ENUM (
    'income',
    'expense'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    kind account_kind NOT NULL,
    balance NUMERIC(20, 4) NOT NULL DEFAULT 0,
    color VARCHAR(64) NOT NULL,
    icon VARCHAR(64) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT accounts_user_name_unique UNIQUE (user_id, name)
);

CREATE INDEX idx_accounts_user ON accounts(user_id);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    kind transaction_kind NOT NULL,
    amount NUMERIC(20, 4) NOT NULL CHECK (amount >= 0),
    description TEXT NOT NULL DEFAULT '',
    category VARCHAR(255),
    division VARCHAR(255),
    -- No FK on account linkage: transaction history outlives account deletion.
    account_id UUID,
    account_name VARCHAR(255),
    from_account_id UUID,
    from_account_name VARCHAR(255),
    to_account_id UUID,
    to_account_name VARCHAR(255),
    date_time TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_transactions_user_date ON transactions(user_id, date_time DESC);
CREATE INDEX idx_transactions_user_kind ON transactions(user_id, kind);
CREATE INDEX idx_transactions_user_account ON transactions(user_id, account_id);
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    kind category_kind NOT NULL,
    icon VARCHAR(64) NOT NULL,
    color VARCHAR(64) NOT NULL
);

CREATE INDEX idx_categories_user ON categories(user_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS categories CASCADE;
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP TYPE IF EXISTS category_kind;
DROP TYPE IF EXISTS transaction_kind;
DROP TYPE IF EXISTS account_kind;
";
