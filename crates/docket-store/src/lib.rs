pub mod error;
mod fsperm;
pub mod migrate;
pub mod paths;
pub mod repo;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

const CONNECTION_PRAGMAS: &[(&str, &str)] = &[
    ("journal_mode", "WAL"),
    ("synchronous", "NORMAL"),
    ("busy_timeout", "2000"),
];

/// SQLite file standing in for browser local storage.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Creates the file if needed and limits it to owner access.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        fsperm::set_mode(path, fsperm::OWNER_FILE)?;
        Self::configure(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> Result<Self> {
        for (name, value) in CONNECTION_PRAGMAS {
            conn.pragma_update(None, name, value)?;
        }
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::apply(&self.conn)
    }

    pub fn schema_version(&self) -> Result<u32> {
        migrate::user_version(&self.conn)
    }

    /// Drafts and notice flags live here.
    pub fn local_storage(&self) -> repo::LocalStorageRepo<'_> {
        repo::LocalStorageRepo::new(&self.conn)
    }
}
