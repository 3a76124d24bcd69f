//! Boundary to the external docking widget
//!
//! Panel placement, drag/resize mechanics and rendering all live behind
//! this trait. The coordinator only ever exchanges opaque layout blobs
//! with the widget; their internal schema is the widget's business.

use crate::theme::Theme;

/// Direction of a split relative to an existing panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    Left,
    Right,
    Above,
    Below,
}

/// Request to add one panel to the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    /// Unique panel identifier, e.g. `panel_3`
    pub id: String,
    /// Display title
    pub title: String,
    /// Place relative to an existing panel; `None` lets the widget decide
    pub position: Option<(String, SplitDirection)>,
}

impl PanelSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            position: None,
        }
    }

    /// Place this panel next to `reference` in the given direction
    pub fn beside(mut self, reference: impl Into<String>, direction: SplitDirection) -> Self {
        self.position = Some((reference.into(), direction));
        self
    }
}

/// The widget rejected a structurally valid layout blob
#[derive(Debug, thiserror::Error)]
#[error("docking widget rejected layout: {0}")]
pub struct RestoreError(pub String);

/// Capability interface implemented by the live docking widget
pub trait DockingHost {
    /// Snapshot the current panel arrangement as an opaque blob. The
    /// result must be accepted by a later [`DockingHost::restore_layout`].
    fn serialize_layout(&self) -> String;

    /// Replace the current arrangement with a previously serialized
    /// blob. On error the widget must leave the current arrangement
    /// untouched.
    fn restore_layout(&mut self, blob: &str) -> Result<(), RestoreError>;

    /// Add a single panel
    fn add_panel(&mut self, spec: PanelSpec);

    /// Switch the widget's visual theme
    fn set_theme(&mut self, theme: Theme);
}
