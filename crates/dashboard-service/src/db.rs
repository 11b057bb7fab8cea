//! Database connection lifecycle.
//!
//! The pool is opened once in `main` before the server starts accepting
//! requests and closed after graceful shutdown completes.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::instrument;

/// Per-statement timeout applied to every pooled connection.
pub const STATEMENT_TIMEOUT_SECONDS: u32 = 5;

/// Open a PostgreSQL pool.
#[instrument(skip_all, name = "dashboard.db.connect")]
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let url = add_query_timeout(database_url, STATEMENT_TIMEOUT_SECONDS);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&url)
        .await
}

/// Verify connectivity with a trivial query.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map(|_| ())
}

/// Close the pool, waiting for checked-out connections to be returned.
pub async fn close(pool: &PgPool) {
    pool.close().await;
    tracing::info!(target: "dashboard.database", "Database pool closed");
}

/// Adds statement_timeout to the database URL.
fn add_query_timeout(url: &str, timeout_secs: u32) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}options=-c%20statement_timeout%3D{}s",
        url, separator, timeout_secs
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_query_timeout_without_params() {
        assert_eq!(
            add_query_timeout("postgresql://localhost/dashboard", 5),
            "postgresql://localhost/dashboard?options=-c%20statement_timeout%3D5s"
        );
    }

    #[test]
    fn test_add_query_timeout_with_existing_params() {
        assert_eq!(
            add_query_timeout("postgresql://localhost/dashboard?sslmode=disable", 10),
            "postgresql://localhost/dashboard?sslmode=disable&options=-c%20statement_timeout%3D10s"
        );
    }
}
