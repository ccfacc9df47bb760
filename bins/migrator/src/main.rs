//! Schema migration CLI for the Moneta database.
//!
//! Wraps sea-orm-migration's runner; `DATABASE_URL` selects the target.
//!
//!   migrator up       apply pending migrations
//!   migrator down     roll back the most recent one
//!   migrator status   list applied and pending migrations
//!   migrator fresh    drop everything and reapply from scratch

use sea_orm_migration::prelude::*;

use moneta_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI sets up its own tracing.
    cli::run_cli(Migrator).await;
}
