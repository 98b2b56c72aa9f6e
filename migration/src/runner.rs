use colored::*;
use migration::{Migrator, MigratorTrait};
use std::io::{self, Write};
use std::process;
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

pub async fn run_all_migrations(url: &str) {
    let db = match sea_orm::Database::connect(url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {}", "DB connection failed:".red(), e);
            process::exit(1);
        }
    };

    let pending = match Migrator::get_pending_migrations(&db).await {
        Ok(pending) => pending,
        Err(e) => {
            eprintln!("{} {}", "Could not read migration status:".red(), e);
            process::exit(1);
        }
    };

    if pending.is_empty() {
        println!("Nothing to migrate");
        return;
    }

    println!("Running migrations...");
    for migration in pending {
        let name_str = format!("Applying {}", migration.name().bold());
        let dots = ".".repeat(STATUS_COLUMN.saturating_sub(name_str.len()));
        print!("{}{} ", name_str, dots);
        io::stdout().flush().ok();

        let start = Instant::now();
        match Migrator::up(&db, Some(1)).await {
            Ok(()) => {
                let time_str = format!("({:.2?})", start.elapsed()).dimmed();
                println!("{} {}", "done".green(), time_str);
            }
            Err(e) => {
                println!("{}", "failed".red());
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }
}
