use crate::error::{Result, StoreError};
use rusqlite::Connection;

/// Applied in order; the schema version is the count applied so far,
/// kept in SQLite's `user_version` header field.
const MIGRATIONS: &[&str] = &[include_str!("../migrations/001_init.sql")];

pub fn apply(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    let current = user_version(&tx)?;
    let known = MIGRATIONS.len() as u32;
    if current > known {
        return Err(StoreError::SchemaTooNew {
            found: current,
            known,
        });
    }

    for (version, sql) in (1u32..).zip(MIGRATIONS) {
        if version <= current {
            continue;
        }
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }

    tx.commit()?;
    Ok(())
}

pub fn user_version(conn: &Connection) -> Result<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
