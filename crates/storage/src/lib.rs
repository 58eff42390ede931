use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use moodlog_core::{EntryDraft, EntryRecord, Sentiment, UserRecord};
use parking_lot::RwLock;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

pub trait UserRepository: Send + Sync {
    /// Inserts a user; `None` when the email is already registered.
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserRecord>>;
    async fn find_user(&self, user_id: i64) -> Result<Option<UserRecord>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
}

pub trait EntryRepository: Send + Sync {
    async fn insert_entry(
        &self,
        user_id: i64,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<EntryRecord>;
    async fn find_entry(&self, entry_id: i64) -> Result<Option<EntryRecord>>;
    /// Newest first.
    async fn list_entries(&self, user_id: i64) -> Result<Vec<EntryRecord>>;
    async fn list_entries_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<EntryRecord>>;
    /// Writes the editable fields and `updated_at` of an existing entry.
    async fn update_entry(&self, entry: &EntryRecord) -> Result<bool>;
    async fn delete_entry(&self, entry_id: i64) -> Result<bool>;
    async fn delete_entries_for_user(&self, user_id: i64) -> Result<u64>;
}

fn newest_first(entries: &mut [EntryRecord]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<i64, UserRecord>>>,
    entries: Arc<RwLock<BTreeMap<i64, EntryRecord>>>,
    next_user_id: Arc<AtomicI64>,
    next_entry_id: Arc<AtomicI64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryStore {
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserRecord>> {
        let mut users = self.users.write();
        if users.values().any(|user| user.email == email) {
            return Ok(None);
        }

        let user = UserRecord {
            id: self.next_user_id.fetch_add(1, Ordering::Relaxed) + 1,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(Some(user))
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        Ok(self.users.read().get(&user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }
}

impl EntryRepository for MemoryStore {
    async fn insert_entry(
        &self,
        user_id: i64,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<EntryRecord> {
        let entry = EntryRecord {
            id: self.next_entry_id.fetch_add(1, Ordering::Relaxed) + 1,
            user_id,
            content: draft.content.clone(),
            sentiment: draft.sentiment,
            summary: draft.summary.clone(),
            suggestion: draft.suggestion.clone(),
            created_at: now,
            updated_at: now,
        };
        self.entries.write().insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn find_entry(&self, entry_id: i64) -> Result<Option<EntryRecord>> {
        Ok(self.entries.read().get(&entry_id).cloned())
    }

    async fn list_entries(&self, user_id: i64) -> Result<Vec<EntryRecord>> {
        let mut entries = self
            .entries
            .read()
            .values()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        newest_first(&mut entries);
        Ok(entries)
    }

    async fn list_entries_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<EntryRecord>> {
        let mut entries = self
            .entries
            .read()
            .values()
            .filter(|entry| entry.user_id == user_id && entry.created_at >= since)
            .cloned()
            .collect::<Vec<_>>();
        newest_first(&mut entries);
        Ok(entries)
    }

    async fn update_entry(&self, entry: &EntryRecord) -> Result<bool> {
        let mut entries = self.entries.write();
        let Some(existing) = entries.get_mut(&entry.id) else {
            return Ok(false);
        };

        existing.content = entry.content.clone();
        existing.sentiment = entry.sentiment;
        existing.summary = entry.summary.clone();
        existing.suggestion = entry.suggestion.clone();
        existing.updated_at = entry.updated_at;
        Ok(true)
    }

    async fn delete_entry(&self, entry_id: i64) -> Result<bool> {
        Ok(self.entries.write().remove(&entry_id).is_some())
    }

    async fn delete_entries_for_user(&self, user_id: i64) -> Result<u64> {
        let mut removed = 0_u64;
        self.entries.write().retain(|_, entry| {
            let keep = entry.user_id != user_id;
            if !keep {
                removed += 1;
            }
            keep
        });

        Ok(removed)
    }
}

// Fixed-width UTC timestamps so that text comparison in SQL orders correctly.
fn encode_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .with_context(|| format!("invalid stored timestamp `{raw}`"))
}

fn user_from_row(row: &SqliteRow) -> Result<UserRecord> {
    Ok(UserRecord {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: decode_timestamp(row.try_get::<&str, _>("created_at")?)?,
    })
}

fn entry_from_row(row: &SqliteRow) -> Result<EntryRecord> {
    let sentiment_raw: &str = row.try_get("sentiment")?;
    let sentiment = Sentiment::parse(sentiment_raw)
        .ok_or_else(|| anyhow!("invalid stored sentiment `{sentiment_raw}`"))?;

    Ok(EntryRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        content: row.try_get("content")?,
        sentiment,
        summary: row.try_get("summary")?,
        suggestion: row.try_get("suggestion")?,
        created_at: decode_timestamp(row.try_get::<&str, _>("created_at")?)?,
        updated_at: decode_timestamp(row.try_get::<&str, _>("updated_at")?)?,
    })
}

const ENTRY_COLUMNS: &str =
    "id, user_id, content, sentiment, summary, suggestion, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite url {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("failed connecting to sqlite at {}", database_url))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              email TEXT NOT NULL UNIQUE,
              password_hash TEXT NOT NULL,
              created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_entries (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
              content TEXT NOT NULL,
              sentiment TEXT NOT NULL CHECK (sentiment IN ('positive', 'neutral', 'negative')),
              summary TEXT NOT NULL,
              suggestion TEXT NOT NULL,
              created_at TEXT NOT NULL,
              updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_daily_entries_user_created ON daily_entries (user_id, created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl UserRepository for SqliteStore {
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserRecord>> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(email) DO NOTHING
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(encode_timestamp(now))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }
}

impl EntryRepository for SqliteStore {
    async fn insert_entry(
        &self,
        user_id: i64,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<EntryRecord> {
        let stamp = encode_timestamp(now);
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO daily_entries (user_id, content, sentiment, summary, suggestion, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&draft.content)
        .bind(draft.sentiment.as_str())
        .bind(&draft.summary)
        .bind(&draft.suggestion)
        .bind(stamp)
        .fetch_one(&self.pool)
        .await?;

        entry_from_row(&row)
    }

    async fn find_entry(&self, entry_id: i64) -> Result<Option<EntryRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM daily_entries WHERE id = ?1"
        ))
        .bind(entry_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(entry_from_row).transpose()
    }

    async fn list_entries(&self, user_id: i64) -> Result<Vec<EntryRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM daily_entries WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(entry_from_row).collect()
    }

    async fn list_entries_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<EntryRecord>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM daily_entries
            WHERE user_id = ?1 AND created_at >= ?2
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(user_id)
        .bind(encode_timestamp(since))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(entry_from_row).collect()
    }

    async fn update_entry(&self, entry: &EntryRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE daily_entries
            SET content = ?1, sentiment = ?2, summary = ?3, suggestion = ?4, updated_at = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&entry.content)
        .bind(entry.sentiment.as_str())
        .bind(&entry.summary)
        .bind(&entry.suggestion)
        .bind(encode_timestamp(entry.updated_at))
        .bind(entry.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_entry(&self, entry_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM daily_entries WHERE id = ?1")
            .bind(entry_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_entries_for_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM daily_entries WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[derive(Clone)]
pub enum Store {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl Store {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    pub async fn sqlite(database_url: &str) -> Result<Self> {
        let sqlite = SqliteStore::connect(database_url).await?;
        Ok(Self::Sqlite(sqlite))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Memory(_) => "memory",
            Store::Sqlite(_) => "sqlite",
        }
    }
}

impl UserRepository for Store {
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserRecord>> {
        match self {
            Store::Memory(store) => store.create_user(email, password_hash, now).await,
            Store::Sqlite(store) => store.create_user(email, password_hash, now).await,
        }
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        match self {
            Store::Memory(store) => store.find_user(user_id).await,
            Store::Sqlite(store) => store.find_user(user_id).await,
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        match self {
            Store::Memory(store) => store.find_user_by_email(email).await,
            Store::Sqlite(store) => store.find_user_by_email(email).await,
        }
    }
}

impl EntryRepository for Store {
    async fn insert_entry(
        &self,
        user_id: i64,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<EntryRecord> {
        match self {
            Store::Memory(store) => store.insert_entry(user_id, draft, now).await,
            Store::Sqlite(store) => store.insert_entry(user_id, draft, now).await,
        }
    }

    async fn find_entry(&self, entry_id: i64) -> Result<Option<EntryRecord>> {
        match self {
            Store::Memory(store) => store.find_entry(entry_id).await,
            Store::Sqlite(store) => store.find_entry(entry_id).await,
        }
    }

    async fn list_entries(&self, user_id: i64) -> Result<Vec<EntryRecord>> {
        match self {
            Store::Memory(store) => store.list_entries(user_id).await,
            Store::Sqlite(store) => store.list_entries(user_id).await,
        }
    }

    async fn list_entries_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<EntryRecord>> {
        match self {
            Store::Memory(store) => store.list_entries_since(user_id, since).await,
            Store::Sqlite(store) => store.list_entries_since(user_id, since).await,
        }
    }

    async fn update_entry(&self, entry: &EntryRecord) -> Result<bool> {
        match self {
            Store::Memory(store) => store.update_entry(entry).await,
            Store::Sqlite(store) => store.update_entry(entry).await,
        }
    }

    async fn delete_entry(&self, entry_id: i64) -> Result<bool> {
        match self {
            Store::Memory(store) => store.delete_entry(entry_id).await,
            Store::Sqlite(store) => store.delete_entry(entry_id).await,
        }
    }

    async fn delete_entries_for_user(&self, user_id: i64) -> Result<u64> {
        match self {
            Store::Memory(store) => store.delete_entries_for_user(user_id).await,
            Store::Sqlite(store) => store.delete_entries_for_user(user_id).await,
        }
    }
}
