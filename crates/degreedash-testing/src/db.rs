//! Isolated stores for integration tests.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;

use degreedash_api_migration::Migrator;

/// Open a fresh in-memory SQLite database with every migration applied.
///
/// Each call gets its own database. The pool is pinned to a single connection
/// because every `:memory:` connection is a separate database.
///
/// Panics if the store cannot be opened or migrated.
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("failed to open in-memory sqlite");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    db
}

/// A migrated SQLite file that lives as long as this value.
pub struct FileDb {
    pub db: DatabaseConnection,
    _dir: TempDir,
}

/// Open a migrated SQLite file in a fresh temporary directory.
///
/// Unlike [`test_db`], every pooled connection sees the same data, so
/// concurrent writers really contend for the database lock.
///
/// Panics if the store cannot be opened or migrated.
pub async fn file_db(max_connections: u32) -> FileDb {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("degreedash.db").display()
    );
    let mut opt = ConnectOptions::new(url);
    opt.max_connections(max_connections)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("failed to open sqlite file");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    FileDb { db, _dir: dir }
}
