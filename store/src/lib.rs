//! SQLite-backed persistence for the panel workspace
//!
//! This crate owns the three persistent stores the workbench relies on:
//! key/value settings, named panel layouts, and the window geometry
//! singleton. Layout blobs are stored as opaque strings; their internal
//! schema belongs to the docking widget and is never interpreted here.

pub mod db;
pub mod error;
pub mod layouts;
pub mod models;
pub mod settings;
pub mod window_state;

pub use db::Database;
pub use error::StoreError;
pub use models::{Layout, Setting, WindowState};
