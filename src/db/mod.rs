mod models;
pub mod seed;

pub use models::*;

use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Connection, Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

const CREATE_SUBMISSIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS submissions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        anonymized_text TEXT,
        category TEXT NOT NULL,
        platform TEXT NOT NULL,
        context TEXT,
        status TEXT NOT NULL DEFAULT 'pending',
        timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
"#;

const CREATE_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_submissions_status ON submissions (status)",
    "CREATE INDEX IF NOT EXISTS idx_submissions_timestamp ON submissions (timestamp)",
];

/// Process-wide handle to the submissions database.
///
/// Opened once at startup and shared by cloning (the pool is reference
/// counted). Call [`Store::close`] at shutdown.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open a pool for a `sqlite:` URL, creating the database file if needed.
    pub async fn connect(database_url: &str) -> Result<Self> {
        if database_url.trim().is_empty() {
            return Err(Error::Connection("database URL is empty".to_string()));
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| Error::Connection(format!("invalid database URL: {}", e)))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        // An in-memory database lives only as long as its connection, so pin one.
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        tracing::info!("Connected to store at {}", database_url);
        Ok(Self { pool })
    }

    /// Create the submissions table and its indexes if they are missing.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_SUBMISSIONS).execute(&self.pool).await?;
        for stmt in CREATE_INDEXES {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        tracing::debug!("Schema ensured");
        Ok(())
    }

    /// Drop every submission and recreate an empty table.
    pub async fn reset_schema(&self) -> Result<()> {
        sqlx::query("DROP TABLE IF EXISTS submissions")
            .execute(&self.pool)
            .await?;
        tracing::warn!("Submissions table dropped");
        self.ensure_schema().await
    }

    pub async fn open_session(&self) -> Result<Session> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// One pooled connection reserved for a group of related operations.
///
/// Reads run directly on the connection. Writes go through [`Session::begin`];
/// a transaction that is dropped without `commit` is rolled back.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    pub async fn begin(&mut self) -> Result<Transaction<'_, Sqlite>> {
        Ok(self.conn.begin().await?)
    }

    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

pub async fn insert_submission(
    conn: &mut SqliteConnection,
    new: &NewSubmission,
    timestamp: DateTime<Utc>,
) -> Result<Submission> {
    let submission = sqlx::query_as::<_, Submission>(
        r#"
        INSERT INTO submissions (text, anonymized_text, category, platform, context, status, timestamp)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&new.text)
    .bind(&new.anonymized_text)
    .bind(new.category)
    .bind(new.platform)
    .bind(&new.context)
    .bind(new.status)
    .bind(timestamp)
    .fetch_one(conn)
    .await?;
    Ok(submission)
}

pub async fn get_submission(conn: &mut SqliteConnection, id: i64) -> Result<Option<Submission>> {
    let submission = sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(submission)
}

/// Set the status of one row, returning the updated row if it exists.
pub async fn update_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: Status,
) -> Result<Option<Submission>> {
    let submission = sqlx::query_as::<_, Submission>(
        "UPDATE submissions SET status = $1 WHERE id = $2 RETURNING *",
    )
    .bind(status)
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(submission)
}

/// Newest first, optionally restricted to one status.
pub async fn list_submissions(
    conn: &mut SqliteConnection,
    status: Option<Status>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Submission>> {
    let rows = sqlx::query_as::<_, Submission>(
        r#"
        SELECT * FROM submissions
        WHERE ($1 IS NULL OR status = $1)
        ORDER BY timestamp DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

/// All rows with the given status in insertion order.
pub async fn submissions_with_status(
    conn: &mut SqliteConnection,
    status: Status,
) -> Result<Vec<Submission>> {
    let rows = sqlx::query_as::<_, Submission>(
        "SELECT * FROM submissions WHERE status = $1 ORDER BY id",
    )
    .bind(status)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn count_by_status(conn: &mut SqliteConnection) -> Result<Vec<(Status, i64)>> {
    let rows = sqlx::query_as::<_, (Status, i64)>(
        "SELECT status, COUNT(*) FROM submissions GROUP BY status",
    )
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn count_by_category(conn: &mut SqliteConnection) -> Result<Vec<(Category, i64)>> {
    let rows = sqlx::query_as::<_, (Category, i64)>(
        "SELECT category, COUNT(*) FROM submissions GROUP BY category",
    )
    .fetch_all(conn)
    .await?;
    Ok(rows)
}
