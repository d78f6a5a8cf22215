/// Schema initialisation
///
/// The schema lives in the workspace `migrations/` directory and is embedded
/// at compile time with `sqlx::migrate!`. [`run_migrations`] is called once at
/// process start, before the server accepts requests; re-running it against
/// an up-to-date database is a no-op.
///
/// # Migration Files
///
/// `{timestamp}_{name}.sql`, applied in timestamp order and recorded in
/// `_sqlx_migrations`.

use sqlx::postgres::PgPool;
use tracing::{debug, info, warn};

/// Migration status information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Number of migrations recorded as applied
    pub applied_migrations: usize,

    /// Latest applied migration version (timestamp)
    pub latest_version: Option<i64>,

    /// Number of migrations embedded in this binary
    pub known_migrations: usize,
}

impl MigrationStatus {
    /// True when every embedded migration has been applied
    pub fn is_up_to_date(&self) -> bool {
        self.applied_migrations >= self.known_migrations
    }
}

/// Applies all pending migrations
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the recorded checksum
/// of an applied migration no longer matches the embedded file.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Reports how many migrations are applied versus embedded
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    debug!("Checking migration status");

    let known_migrations = sqlx::migrate!("../migrations").iter().count();

    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = '_sqlx_migrations'
        )",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        debug!("Migrations table does not exist yet");
        return Ok(MigrationStatus {
            applied_migrations: 0,
            latest_version: None,
            known_migrations,
        });
    }

    let (count, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success = true",
    )
    .fetch_one(pool)
    .await?;

    debug!(
        applied_migrations = count,
        latest_version = ?latest_version,
        "Migration status retrieved"
    );

    Ok(MigrationStatus {
        applied_migrations: usize::try_from(count).unwrap_or(0),
        latest_version,
        known_migrations,
    })
}
