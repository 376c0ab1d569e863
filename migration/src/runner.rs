use colored::*;
use futures::FutureExt;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 72;

/// Applies every registered migration in order, one status line each.
/// A failing or panicking migration aborts the process so a half-migrated
/// database is never left behind silently.
pub async fn run_all_migrations(url: &str) {
    let db = sea_orm::Database::connect(url)
        .await
        .expect("DB connection failed");

    let schema_manager = SchemaManager::new(&db);
    let migrations = <migration::Migrator as MigratorTrait>::migrations();
    let count = migrations.len();

    println!("Running {} migrations...", count);
    let start = Instant::now();

    for migration in migrations {
        apply_one(&schema_manager, migration).await;
    }

    println!(
        "{} {} migrations in {:.2?}",
        "Applied".green().bold(),
        count,
        start.elapsed()
    );
}

async fn apply_one(schema_manager: &SchemaManager<'_>, migration: Box<dyn MigrationTrait>) {
    let label = format!("  {}", migration.name().bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.len()));
    print!("{}{} ", label, dots);
    io::stdout().flush().expect("Failed to flush stdout");

    let start = Instant::now();
    let outcome = std::panic::AssertUnwindSafe(migration.up(schema_manager))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(())) => {
            let elapsed = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "done".green(), elapsed);
        }
        Ok(Err(e)) => {
            println!("{} {}", "failed".red(), e);
            std::process::exit(1);
        }
        Err(_) => {
            println!("{}", "panicked".red());
            std::process::exit(1);
        }
    }
}
