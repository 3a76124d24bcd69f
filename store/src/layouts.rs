//! Saved layout store
//!
//! Guards the single-active invariant: at most one row has `is_active`
//! set at any time, and the clear-then-set switch happens inside one
//! SQLite transaction so no reader can observe zero or two active rows
//! mid-switch.

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use crate::db::{unix_now, Database};
use crate::error::StoreError;
use crate::models::Layout;

const LAYOUT_COLUMNS: &str = "id, name, layout_json, is_active, created_at, updated_at";

fn layout_from_row(row: &Row<'_>) -> rusqlite::Result<Layout> {
    Ok(Layout {
        id: row.get(0)?,
        name: row.get(1)?,
        layout_json: row.get(2)?,
        is_active: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl Database {
    /// Insert a new saved layout. The new row is never active and the
    /// active flag of existing rows is left alone. Names may repeat.
    pub fn save_layout(&self, name: &str, layout_json: &str) -> Result<Layout, StoreError> {
        let now = unix_now();
        self.conn.execute(
            "INSERT INTO layouts (name, layout_json, is_active, created_at, updated_at)
             VALUES (?1, ?2, 0, ?3, ?3)",
            params![name, layout_json, now],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name, "layout saved");
        self.layout(id)
    }

    /// Fetch one layout by id
    pub fn layout(&self, id: i64) -> Result<Layout, StoreError> {
        self.conn
            .query_row(
                &format!("SELECT {LAYOUT_COLUMNS} FROM layouts WHERE id = ?1"),
                params![id],
                layout_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    /// All saved layouts, most recently updated first; rows updated in
    /// the same second keep insertion order
    pub fn layouts(&self) -> Result<Vec<Layout>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LAYOUT_COLUMNS} FROM layouts ORDER BY updated_at DESC, id ASC"
        ))?;
        let rows = stmt.query_map([], layout_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// The layout currently flagged active, if any
    pub fn active_layout(&self) -> Result<Option<Layout>, StoreError> {
        let layout = self
            .conn
            .query_row(
                &format!("SELECT {LAYOUT_COLUMNS} FROM layouts WHERE is_active = 1 LIMIT 1"),
                [],
                layout_from_row,
            )
            .optional()?;
        Ok(layout)
    }

    /// Atomically make `id` the only active layout and bump its
    /// `updated_at`. Returns `NotFound` without modifying any row when
    /// `id` does not exist.
    pub fn set_active_layout(&mut self, id: i64) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        let exists: Option<i64> = tx
            .query_row("SELECT id FROM layouts WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        if exists.is_none() {
            // Dropping the transaction rolls it back
            return Err(StoreError::NotFound);
        }

        tx.execute("UPDATE layouts SET is_active = 0 WHERE is_active = 1", [])?;
        tx.execute(
            "UPDATE layouts SET is_active = 1, updated_at = ?2 WHERE id = ?1",
            params![id, unix_now()],
        )?;
        tx.commit()?;

        debug_assert!(matches!(self.active_layout_count(), Ok(1)));
        debug!(id, "active layout switched");
        Ok(())
    }

    /// Delete a saved layout
    pub fn delete_layout(&self, id: i64) -> Result<(), StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM layouts WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        debug!(id, "layout deleted");
        Ok(())
    }

    /// Number of rows flagged active. Must always be 0 or 1.
    pub(crate) fn active_layout_count(&self) -> Result<i64, StoreError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM layouts WHERE is_active = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
