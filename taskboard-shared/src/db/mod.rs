/// Database plumbing for the PostgreSQL backend
///
/// - `pool`: connection pool creation, health check, shutdown
/// - `migrations`: embedded schema migrations, run once at startup
///
/// Queries themselves live in [`crate::store::PgStore`].

pub mod migrations;
pub mod pool;
