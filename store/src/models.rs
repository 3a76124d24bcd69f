//! Persisted record types
//!
//! Timestamps are seconds since the Unix epoch throughout.

use serde::{Deserialize, Serialize};

/// A key/value preference row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A named, persisted snapshot of the panel arrangement
///
/// `layout_json` is the docking widget's serialized form and is carried
/// as an uninterpreted string. At most one row in the store has
/// `is_active` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub id: i64,
    pub name: String,
    pub layout_json: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Geometry of the single application window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub maximized: bool,
    pub updated_at: i64,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 1024,
            height: 768,
            maximized: false,
            updated_at: 0,
        }
    }
}
