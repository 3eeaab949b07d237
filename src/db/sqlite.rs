use crate::auth::password::hash_password_blocking;
use crate::db::models::{AdminCredential, ContentEntry, InitReport, UpsertOutcome};
use crate::db::schema::SQLITE_INIT;
use crate::db::seed::{BOOTSTRAP_PASSWORD, BOOTSTRAP_USERNAME, DEFAULT_CONTENT};
use crate::error::CopydeskError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Handle to the page-copy database. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct ContentStore {
    pool: SqlitePool,
}

impl ContentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database behind `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, CopydeskError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        // Every connection to an in-memory database is its own database, so
        // pin a single connection that never idles out.
        let pool_opts = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(8)
        };
        let pool = pool_opts.connect_with(connect_opts).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables, bootstrap the admin if none exists, and insert any
    /// missing default copy. Safe to call repeatedly and concurrently.
    pub async fn initialize(&self) -> Result<InitReport, CopydeskError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }

        let bootstrap_created = self.seed_bootstrap_admin().await?;
        let content_seeded = self.seed_default_content().await?;

        debug!(bootstrap_created, content_seeded, "content store initialized");
        Ok(InitReport {
            bootstrap_created,
            content_seeded,
        })
    }

    async fn seed_bootstrap_admin(&self) -> Result<bool, CopydeskError> {
        // Skips the hash on warm starts; the conditional insert below is what
        // guarantees a single bootstrap row.
        if self.credential_count().await? > 0 {
            return Ok(false);
        }

        let hash = hash_password_blocking(BOOTSTRAP_PASSWORD.to_string()).await?;
        let result = sqlx::query(
            r#"
            INSERT INTO admin_credentials (username, password_hash, created_at)
            SELECT ?, ?, ?
            WHERE NOT EXISTS (SELECT 1 FROM admin_credentials)
            "#,
        )
        .bind(BOOTSTRAP_USERNAME)
        .bind(hash)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn seed_default_content(&self) -> Result<u64, CopydeskError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;
        let mut seeded = 0;

        for (section, key, value) in DEFAULT_CONTENT.iter().copied() {
            let result = sqlx::query(
                r#"
                INSERT INTO content (section, key, value, updated_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(section, key) DO NOTHING
                "#,
            )
            .bind(section)
            .bind(key)
            .bind(value)
            .bind(now.as_str())
            .execute(&mut *tx)
            .await?;
            seeded += result.rows_affected();
        }

        tx.commit().await?;
        Ok(seeded)
    }

    /// All entries in insertion order, optionally restricted to one section.
    pub async fn list_content(
        &self,
        section: Option<&str>,
    ) -> Result<Vec<ContentEntry>, CopydeskError> {
        let rows = sqlx::query(
            r#"SELECT id, section, key, value, updated_at
               FROM content WHERE (?1 IS NULL OR section = ?1) ORDER BY id"#,
        )
        .bind(section)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_entry).collect()
    }

    pub async fn find_content(
        &self,
        section: &str,
        key: &str,
    ) -> Result<Option<ContentEntry>, CopydeskError> {
        let row = sqlx::query(
            r#"SELECT id, section, key, value, updated_at
               FROM content WHERE section = ? AND key = ?"#,
        )
        .bind(section)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_entry).transpose()
    }

    /// Upsert by unique (section, key).
    /// Uses SQLite `INSERT ... ON CONFLICT(section, key) DO UPDATE ... RETURNING id`.
    /// Both arms write the row, so `changes` is always 1.
    pub async fn upsert_content(
        &self,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<UpsertOutcome, CopydeskError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO content (section, key, value, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(section, key) DO UPDATE SET
                value=excluded.value,
                updated_at=excluded.updated_at
            RETURNING id
            "#,
        )
        .bind(section)
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        Ok(UpsertOutcome { id, changes: 1 })
    }

    pub async fn find_credential(
        &self,
        username: &str,
    ) -> Result<Option<AdminCredential>, CopydeskError> {
        let row = sqlx::query(
            r#"SELECT id, username, password_hash, created_at
               FROM admin_credentials WHERE username = ?"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_credential).transpose()
    }

    /// Replace the stored hash. Returns rows changed; 0 means no such user.
    pub async fn update_credential_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> Result<u64, CopydeskError> {
        let hash = hash_password_blocking(new_password.to_string()).await?;
        let result = sqlx::query("UPDATE admin_credentials SET password_hash = ? WHERE username = ?")
            .bind(hash)
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn credential_count(&self) -> Result<i64, CopydeskError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_credentials")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    fn row_to_entry(row: SqliteRow) -> Result<ContentEntry, CopydeskError> {
        let updated_at: String = row.try_get("updated_at")?;
        Ok(ContentEntry {
            id: row.try_get("id")?,
            section: row.try_get("section")?,
            key: row.try_get("key")?,
            value: row.try_get("value")?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn row_to_credential(row: SqliteRow) -> Result<AdminCredential, CopydeskError> {
        let created_at: String = row.try_get("created_at")?;
        Ok(AdminCredential {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CopydeskError> {
    let ts = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc);
    Ok(ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> ContentStore {
        let store = ContentStore::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite should open");
        store.initialize().await.expect("initialize should succeed");
        store
    }

    #[tokio::test]
    async fn fresh_init_reports_everything_seeded() {
        let store = ContentStore::connect("sqlite::memory:").await.unwrap();
        let report = store.initialize().await.unwrap();
        assert!(report.bootstrap_created);
        assert_eq!(report.content_seeded, DEFAULT_CONTENT.len() as u64);
    }

    #[tokio::test]
    async fn second_init_writes_nothing() {
        let store = memory_store().await;
        let report = store.initialize().await.unwrap();
        assert_eq!(report, InitReport::default());
        assert_eq!(store.credential_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn upsert_keeps_row_id_stable() {
        let store = memory_store().await;
        let first = store.upsert_content("faq", "q1", "one").await.unwrap();
        let second = store.upsert_content("faq", "q1", "two").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.changes, 1);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
