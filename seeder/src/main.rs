use crate::seed::{Seeder, run_seeder};
use crate::seeds::{apply_course::ApplyCourseSeeder, course::CourseSeeder, user::UserSeeder};
use colored::*;
use migration::{Migrator, MigratorTrait};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let Ok(path) = std::env::var("DATABASE_PATH") else {
        eprintln!("{}", "DATABASE_PATH is required".red());
        std::process::exit(1);
    };

    let db = match db::connect(&path).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {e}", "Failed to open database:".red());
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {e}", "Failed to apply migrations:".red());
        std::process::exit(1);
    }

    let seeders: [(Box<dyn Seeder + Send + Sync>, &str); 3] = [
        (Box::new(UserSeeder), "User"),
        (Box::new(CourseSeeder), "Course"),
        (Box::new(ApplyCourseSeeder), "ApplyCourse"),
    ];

    for (seeder, name) in seeders {
        if let Err(e) = run_seeder(&*seeder, name, &db).await {
            eprintln!("  {e}");
            std::process::exit(1);
        }
    }
}
