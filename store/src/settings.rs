//! Key/value settings store
//!
//! Upsert semantics; a missing key is a normal result, not an error.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use crate::db::{unix_now, Database};
use crate::error::StoreError;
use crate::models::Setting;

impl Database {
    /// Look up a setting value. Absent keys yield `Ok(None)`.
    pub fn setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or update a setting, bumping `updated_at`
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO settings (key, value, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, unix_now()],
        )?;
        debug!(key, "setting stored");
        Ok(())
    }

    /// All settings rows, ordered by key
    pub fn settings(&self) -> Result<Vec<Setting>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT key, value, created_at, updated_at FROM settings ORDER BY key",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Setting {
                key: row.get(0)?,
                value: row.get(1)?,
                created_at: row.get(2)?,
                updated_at: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
