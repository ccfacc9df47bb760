//! Database seeder for Moneta development and testing.
//!
//! Seeds a demo user (with the standard default accounts and categories)
//! plus a few weeks of sample transactions and one transfer, so a fresh
//! local database has something to look at.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::str::FromStr;
use uuid::Uuid;

use moneta_core::auth::hash_password;
use moneta_db::entities::sea_orm_active_enums::TransactionKind;
use moneta_db::repositories::{
    AccountRepository, CreateTransactionInput, TransactionFilter, TransactionRepository,
    TransferInput, UserRepository,
};

/// Email of the demo user (consistent across runs).
const DEMO_EMAIL: &str = "demo@moneta.dev";
/// Password of the demo user.
const DEMO_PASSWORD: &str = "demo-password";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = moneta_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo user...");
    let user_id = seed_demo_user(&db).await;

    if let Some(user_id) = user_id {
        println!("Seeding sample transactions...");
        seed_sample_transactions(&db, user_id).await;
    }

    println!("Seeding complete!");
}

/// Seeds the demo user, who gets the default accounts and categories
/// through the normal signup path. Returns the user id.
async fn seed_demo_user(db: &DatabaseConnection) -> Option<Uuid> {
    let repo = UserRepository::new(db.clone());

    match repo.find_by_email(DEMO_EMAIL).await {
        Ok(Some(user)) => {
            println!("  Demo user already exists, skipping...");
            return Some(user.id);
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Failed to look up demo user: {e}");
            return None;
        }
    }

    let password_hash = hash_password(DEMO_PASSWORD).expect("Failed to hash demo password");

    match repo
        .create_with_defaults("Demo User", DEMO_EMAIL, &password_hash)
        .await
    {
        Ok(user) => {
            println!("  Created demo user: {DEMO_EMAIL} (password: {DEMO_PASSWORD})");
            Some(user.id)
        }
        Err(e) => {
            eprintln!("Failed to insert demo user: {e}");
            None
        }
    }
}

/// Seeds sample income and expenses against the default accounts, plus
/// one transfer so every transaction kind shows up in the history.
async fn seed_sample_transactions(db: &DatabaseConnection, user_id: Uuid) {
    let tx_repo = TransactionRepository::new(db.clone());

    match tx_repo.list(user_id, TransactionFilter::default()).await {
        Ok(existing) if !existing.is_empty() => {
            println!("  Transactions already exist, skipping...");
            return;
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Failed to check existing transactions: {e}");
            return;
        }
    }

    let account_repo = AccountRepository::new(db.clone());
    let accounts = match account_repo.list(user_id).await {
        Ok(accounts) => accounts,
        Err(e) => {
            eprintln!("Failed to list accounts: {e}");
            return;
        }
    };
    let bank = accounts.iter().find(|a| a.name == "Bank Account");
    let cash = accounts.iter().find(|a| a.name == "Cash");
    let (Some(bank), Some(cash)) = (bank, cash) else {
        eprintln!("Default accounts missing, skipping transactions");
        return;
    };

    // (kind, amount, description, category, account, days ago)
    let samples = [
        (
            TransactionKind::Income,
            "3500.00",
            "Monthly salary",
            "Salary",
            bank.id,
            20,
        ),
        (
            TransactionKind::Income,
            "450.00",
            "Logo design gig",
            "Freelance",
            bank.id,
            12,
        ),
        (
            TransactionKind::Expense,
            "85.50",
            "Groceries",
            "Food & Dining",
            cash.id,
            9,
        ),
        (
            TransactionKind::Expense,
            "32.00",
            "Fuel",
            "Transportation",
            cash.id,
            7,
        ),
        (
            TransactionKind::Expense,
            "129.99",
            "Headphones",
            "Shopping",
            bank.id,
            5,
        ),
        (
            TransactionKind::Expense,
            "210.00",
            "Electricity bill",
            "Bills & Utilities",
            bank.id,
            3,
        ),
        (
            TransactionKind::Expense,
            "18.75",
            "Lunch out",
            "Food & Dining",
            cash.id,
            1,
        ),
    ];

    let mut inserted = 0;
    for (kind, amount, description, category, account_id, days_ago) in samples {
        let input = CreateTransactionInput {
            kind,
            amount: Decimal::from_str(amount).expect("Sample amounts are valid decimals"),
            description: description.to_string(),
            category: category.to_string(),
            division: "Personal".to_string(),
            account_id,
            date_time: Some((Utc::now() - Duration::days(days_ago)).into()),
        };

        if let Err(e) = tx_repo.create(user_id, input).await {
            eprintln!("Failed to insert transaction '{description}': {e}");
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} transactions");

    let transfer = TransferInput {
        from_account_id: bank.id,
        to_account_id: cash.id,
        amount: Decimal::from_str("200.00").expect("Sample amounts are valid decimals"),
        description: None,
    };
    match account_repo.transfer(user_id, transfer).await {
        Ok(_) => println!("  Inserted transfer Bank Account -> Cash"),
        Err(e) => eprintln!("Failed to insert transfer: {e}"),
    }
}
