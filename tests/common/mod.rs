use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use givehub::db::{DbPool, establish_connection_pool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// File-backed SQLite database living in a temporary directory that is
/// removed when the value is dropped.
pub struct TestDb {
    _dir: tempfile::TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);

        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create connection pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
