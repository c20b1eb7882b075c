use crate::error::{Result, StoreError};
use chrono::Utc;
use docket_core::drafts::KeyValueStore;
use rusqlite::{params, Connection, OptionalExtension};

pub struct LocalStorageRepo<'a> {
    conn: &'a Connection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStorageEntry {
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}

impl<'a> LocalStorageRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get_entry(&self, key: &str) -> Result<Option<LocalStorageEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT key, value, updated_at FROM local_storage WHERE key = ?1;",
                [key],
                |row| {
                    Ok(LocalStorageEntry {
                        key: row.get(0)?,
                        value: row.get(1)?,
                        updated_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    pub fn set_at(&self, key: &str, value: &str, now_utc: i64) -> Result<()> {
        ensure_key(key)?;
        self.conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at;",
            params![key, value, now_utc],
        )?;
        Ok(())
    }

    pub fn list_prefix(&self, prefix: &str) -> Result<Vec<LocalStorageEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT key, value, updated_at
             FROM local_storage
             WHERE substr(key, 1, length(?1)) = ?1
             ORDER BY key ASC;",
        )?;
        let mut rows = stmt.query([prefix])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(LocalStorageEntry {
                key: row.get(0)?,
                value: row.get(1)?,
                updated_at: row.get(2)?,
            });
        }
        Ok(entries)
    }
}

impl KeyValueStore for LocalStorageRepo<'_> {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_entry(key)?.map(|entry| entry.value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_at(key, value, Utc::now().timestamp())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn ensure_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(StoreError::BlankKey);
    }
    Ok(())
}
