pub mod models;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;

/// Opens a connection to the configured database.
///
/// `path_or_url` may be a full DSN (`sqlite:...`, `postgres://...`) or a plain
/// SQLite file path, in which case the file and its parent directory are
/// created on demand.
pub async fn connect(path_or_url: &str) -> Result<DatabaseConnection, DbErr> {
    let url = if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url.to_owned()
    } else {
        // SQLite won't create intermediate dirs.
        if let Some(parent) = Path::new(path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    };

    Database::connect(&url).await
}
