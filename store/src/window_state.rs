//! Window geometry store
//!
//! A single well-known row (`id = 1`), upserted on every move/resize
//! event. Last write wins; callers fire and forget.

use rusqlite::{params, OptionalExtension};

use crate::db::{unix_now, Database};
use crate::error::StoreError;
use crate::models::WindowState;

impl Database {
    /// Last saved window geometry, or `None` on first run
    pub fn window_state(&self) -> Result<Option<WindowState>, StoreError> {
        let state = self
            .conn
            .query_row(
                "SELECT x, y, width, height, maximized, updated_at
                 FROM window_state WHERE id = 1",
                [],
                |row| {
                    Ok(WindowState {
                        x: row.get(0)?,
                        y: row.get(1)?,
                        width: row.get(2)?,
                        height: row.get(3)?,
                        maximized: row.get(4)?,
                        updated_at: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(state)
    }

    /// Upsert the singleton geometry row, stamping `updated_at` with the
    /// current time
    pub fn save_window_state(&self, state: &WindowState) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO window_state (id, x, y, width, height, maximized, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                 x = ?1, y = ?2, width = ?3, height = ?4,
                 maximized = ?5, updated_at = ?6",
            params![
                state.x,
                state.y,
                state.width,
                state.height,
                state.maximized,
                unix_now()
            ],
        )?;
        Ok(())
    }
}
