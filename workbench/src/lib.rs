//! Layout and settings coordination for a dockable-panel workspace
//!
//! This crate sits between the persistence layer (`store`) and the
//! external docking widget. It restores the saved workspace at startup,
//! keeps exactly one layout flagged active, and persists theme and
//! window-geometry preferences across restarts. The widget itself is
//! reached only through the [`dock::DockingHost`] trait.

pub mod coordinator;
pub mod dock;
pub mod theme;

pub use coordinator::{Coordinator, Phase, WorkbenchError};
pub use dock::{DockingHost, PanelSpec, RestoreError, SplitDirection};
pub use theme::Theme;

/// Initialize logging for host applications
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
