//! Startup/save/load orchestration between the stores and the live widget
//!
//! The coordinator is constructed once per application session and owns
//! all mutable workspace state: the database handle, the dock host, the
//! current theme and the panel counter. UI event handlers borrow it;
//! nothing here lives in ambient globals.
//!
//! Persistence failures never block interactive use. Only the two
//! data-integrity errors (malformed blob, widget rejection) abort the
//! user action that triggered them.

use store::{Database, Layout, StoreError, WindowState};
use tracing::{debug, info, warn};

use crate::dock::{DockingHost, PanelSpec, RestoreError, SplitDirection};
use crate::theme::Theme;

/// Settings key under which the active theme is persisted
const THEME_KEY: &str = "theme";

/// Number of panels in the default arrangement. Fresh panel ids start
/// one past this so they never collide with `panel_1`/`panel_2`.
const DEFAULT_PANEL_COUNT: u32 = 2;

/// Errors from user-facing workbench actions
#[derive(Debug, thiserror::Error)]
pub enum WorkbenchError {
    /// Layout name was empty after trimming; rejected before any store call
    #[error("layout name must not be empty")]
    EmptyName,

    /// Stored blob is not well-formed JSON; the action is aborted and
    /// the on-screen arrangement left untouched
    #[error("layout blob is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Restore(#[from] RestoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Lifecycle phase of the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Ready,
}

/// Owns the reconciliation between persisted state and the live widget
pub struct Coordinator<D: DockingHost> {
    db: Database,
    dock: D,
    theme: Theme,
    next_panel: u32,
    phase: Phase,
    /// Layout restored into the widget whose activation flag could not
    /// be written. Retried on the next save action.
    pending_activation: Option<i64>,
}

impl<D: DockingHost> Coordinator<D> {
    pub fn new(db: Database, dock: D) -> Self {
        Self {
            db,
            dock,
            theme: Theme::default(),
            next_panel: DEFAULT_PANEL_COUNT + 1,
            phase: Phase::Initializing,
            pending_activation: None,
        }
    }

    /// Reconcile persisted state with the live widget at application
    /// start. Infallible by design: every problem is logged and falls
    /// back to the default theme or the default panel arrangement.
    pub fn startup(&mut self) {
        match self.db.setting(THEME_KEY) {
            Ok(Some(name)) => match Theme::from_name(&name) {
                Some(theme) => self.theme = theme,
                None => warn!(name = %name, "unknown persisted theme, using default"),
            },
            Ok(None) => {}
            Err(err) => warn!(%err, "could not read persisted theme"),
        }
        self.dock.set_theme(self.theme);

        match self.db.active_layout() {
            Ok(Some(layout)) => match self.apply_blob(&layout.layout_json) {
                Ok(()) => info!(name = %layout.name, id = layout.id, "restored active layout"),
                Err(err) => {
                    warn!(
                        name = %layout.name,
                        id = layout.id,
                        %err,
                        "active layout could not be restored, using default arrangement"
                    );
                    self.apply_default_arrangement();
                }
            },
            Ok(None) => {
                debug!("no active layout, using default arrangement");
                self.apply_default_arrangement();
            }
            Err(err) => {
                warn!(%err, "layout store unavailable, using default arrangement");
                self.apply_default_arrangement();
            }
        }

        self.phase = Phase::Ready;
    }

    /// Apply a theme to the widget immediately, then persist it.
    /// Persistence is best-effort; a store failure never rolls back the
    /// visual change.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.dock.set_theme(theme);
        if let Err(err) = self.db.set_setting(THEME_KEY, theme.name()) {
            warn!(theme = %theme, %err, "theme change not persisted");
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Add a fresh panel with the next free id. Placement is entirely
    /// the widget's concern.
    pub fn add_panel(&mut self) -> String {
        let number = self.next_panel;
        self.next_panel += 1;

        let id = format!("panel_{number}");
        self.dock
            .add_panel(PanelSpec::new(id.clone(), format!("Panel {number}")));
        id
    }

    /// Snapshot the live arrangement under `name`. The new layout is
    /// saved inactive; the currently active layout keeps its flag.
    pub fn save_layout(&mut self, name: &str) -> Result<Layout, WorkbenchError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkbenchError::EmptyName);
        }

        let blob = self.dock.serialize_layout();
        let layout = self.db.save_layout(name, &blob)?;
        info!(name, id = layout.id, "layout saved");

        self.retry_pending_activation();
        Ok(layout)
    }

    /// All saved layouts for the picker, most recently updated first,
    /// with the active one flagged
    pub fn layouts(&self) -> Result<Vec<Layout>, WorkbenchError> {
        Ok(self.db.layouts()?)
    }

    /// Restore a saved layout into the widget, then mark it active.
    ///
    /// The row is re-read from the store so a stale in-memory copy can
    /// never be applied. A malformed blob or a widget rejection aborts
    /// the load with the current arrangement and active flags untouched.
    pub fn load_layout(&mut self, id: i64) -> Result<(), WorkbenchError> {
        let layout = self.db.layout(id)?;
        self.apply_blob(&layout.layout_json)?;

        match self.db.set_active_layout(id) {
            Ok(()) => {
                self.pending_activation = None;
                info!(name = %layout.name, id, "layout loaded and activated");
            }
            Err(StoreError::NotFound) => {
                // Row vanished between the read and the switch; nothing
                // left to activate
                warn!(id, "layout disappeared before activation");
                self.pending_activation = None;
            }
            Err(err) => {
                // The live arrangement is correct but not flagged in the
                // store; remember it and retry on the next save
                warn!(id, %err, "layout restored but not flagged active");
                self.pending_activation = Some(id);
            }
        }
        Ok(())
    }

    /// Saved window geometry, or the default on first run or store
    /// failure
    pub fn window_state(&self) -> WindowState {
        match self.db.window_state() {
            Ok(Some(state)) => state,
            Ok(None) => WindowState::default(),
            Err(err) => {
                warn!(%err, "window state unavailable, using default");
                WindowState::default()
            }
        }
    }

    /// Best-effort persist of window geometry; safe to call on every
    /// move/resize event
    pub fn save_window_state(&self, state: WindowState) {
        if let Err(err) = self.db.save_window_state(&state) {
            warn!(%err, "window state not persisted");
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &Database {
        &self.db
    }

    pub fn dock(&self) -> &D {
        &self.dock
    }

    pub fn dock_mut(&mut self) -> &mut D {
        &mut self.dock
    }

    /// Confirm the blob is well-formed JSON, then hand it to the widget
    /// verbatim. The blob's internal structure is never validated here.
    fn apply_blob(&mut self, blob: &str) -> Result<(), WorkbenchError> {
        serde_json::from_str::<serde_json::Value>(blob)?;
        self.dock.restore_layout(blob)?;
        Ok(())
    }

    /// Two panels side by side, matching a fresh install
    fn apply_default_arrangement(&mut self) {
        self.dock.add_panel(PanelSpec::new("panel_1", "Panel 1"));
        self.dock.add_panel(
            PanelSpec::new("panel_2", "Panel 2").beside("panel_1", SplitDirection::Right),
        );
    }

    fn retry_pending_activation(&mut self) {
        let Some(id) = self.pending_activation.take() else {
            return;
        };
        match self.db.set_active_layout(id) {
            Ok(()) => info!(id, "pending activation applied"),
            Err(StoreError::NotFound) => warn!(id, "pending activation dropped, layout deleted"),
            Err(err) => {
                warn!(id, %err, "pending activation still failing");
                self.pending_activation = Some(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory stand-in for the external docking widget
    #[derive(Default)]
    struct FakeDock {
        panels: Vec<PanelSpec>,
        theme: Option<Theme>,
        restored: Vec<String>,
        reject_restore: bool,
    }

    impl DockingHost for FakeDock {
        fn serialize_layout(&self) -> String {
            let ids: Vec<&str> = self.panels.iter().map(|p| p.id.as_str()).collect();
            serde_json::json!({ "panels": ids }).to_string()
        }

        fn restore_layout(&mut self, blob: &str) -> Result<(), RestoreError> {
            if self.reject_restore {
                return Err(RestoreError("unsupported schema".to_string()));
            }
            self.restored.push(blob.to_string());
            Ok(())
        }

        fn add_panel(&mut self, spec: PanelSpec) {
            self.panels.push(spec);
        }

        fn set_theme(&mut self, theme: Theme) {
            self.theme = Some(theme);
        }
    }

    fn coordinator() -> Coordinator<FakeDock> {
        let db = Database::open_in_memory().expect("in-memory db");
        Coordinator::new(db, FakeDock::default())
    }

    #[test]
    fn test_empty_store_startup_uses_defaults() {
        let mut coord = coordinator();
        assert_eq!(coord.phase(), Phase::Initializing);

        coord.startup();

        assert_eq!(coord.phase(), Phase::Ready);
        assert_eq!(coord.theme(), Theme::Dark);
        assert_eq!(coord.dock.theme, Some(Theme::Dark));

        let ids: Vec<&str> = coord.dock.panels.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["panel_1", "panel_2"]);
        assert_eq!(
            coord.dock.panels[1].position,
            Some(("panel_1".to_string(), SplitDirection::Right))
        );
    }

    #[test]
    fn test_startup_restores_persisted_theme_and_layout() {
        let mut db = Database::open_in_memory().expect("db");
        db.set_setting("theme", "Dracula").expect("seed theme");
        let saved = db
            .save_layout("Coding", r#"{"panels":["panel_1"]}"#)
            .expect("seed layout");
        db.set_active_layout(saved.id).expect("activate");

        let mut coord = Coordinator::new(db, FakeDock::default());
        coord.startup();

        assert_eq!(coord.theme(), Theme::Dracula);
        assert_eq!(coord.dock.restored, [r#"{"panels":["panel_1"]}"#]);
        // Restored, not rebuilt: no default panels were added
        assert!(coord.dock.panels.is_empty());
    }

    #[test]
    fn test_startup_ignores_unknown_theme() {
        let db = Database::open_in_memory().expect("db");
        db.set_setting("theme", "Solarized").expect("seed");

        let mut coord = Coordinator::new(db, FakeDock::default());
        coord.startup();

        assert_eq!(coord.theme(), Theme::Dark);
    }

    #[test]
    fn test_startup_with_corrupt_blob_falls_back_to_defaults() {
        let mut db = Database::open_in_memory().expect("db");
        let saved = db.save_layout("Broken", "{truncated").expect("seed");
        db.set_active_layout(saved.id).expect("activate");

        let mut coord = Coordinator::new(db, FakeDock::default());
        coord.startup();

        assert_eq!(coord.phase(), Phase::Ready);
        assert!(coord.dock.restored.is_empty());
        assert_eq!(coord.dock.panels.len(), 2);
    }

    #[test]
    fn test_save_layout_rejects_blank_names() {
        let mut coord = coordinator();
        coord.startup();

        assert!(matches!(
            coord.save_layout("   "),
            Err(WorkbenchError::EmptyName)
        ));
        assert!(coord.layouts().expect("list").is_empty());
    }

    #[test]
    fn test_save_layout_trims_name_and_stays_inactive() {
        let mut coord = coordinator();
        coord.startup();

        let layout = coord.save_layout("  Coding  ").expect("save");
        assert_eq!(layout.name, "Coding");
        assert!(!layout.is_active);
        assert_eq!(layout.layout_json, coord.dock.serialize_layout());
    }

    #[test]
    fn test_duplicate_save_produces_two_rows() {
        let mut coord = coordinator();
        coord.startup();

        coord.save_layout("Coding").expect("first");
        coord.save_layout("Coding").expect("second");

        let layouts = coord.layouts().expect("list");
        assert_eq!(layouts.len(), 2);
        assert!(layouts.iter().all(|l| l.name == "Coding" && !l.is_active));
    }

    #[test]
    fn test_load_layout_restores_and_activates() {
        let mut coord = coordinator();
        coord.startup();

        let first = coord.save_layout("First").expect("save");
        coord.add_panel();
        let second = coord.save_layout("Second").expect("save");

        coord.load_layout(first.id).expect("load first");
        coord.load_layout(second.id).expect("load second");

        assert_eq!(
            coord.dock.restored,
            [first.layout_json.as_str(), second.layout_json.as_str()]
        );

        let layouts = coord.layouts().expect("list");
        let active: Vec<i64> = layouts.iter().filter(|l| l.is_active).map(|l| l.id).collect();
        assert_eq!(active, [second.id]);
    }

    #[test]
    fn test_load_missing_layout_is_not_found() {
        let mut coord = coordinator();
        coord.startup();

        let err = coord.load_layout(42).expect_err("must fail");
        assert!(matches!(err, WorkbenchError::Store(StoreError::NotFound)));
    }

    #[test]
    fn test_load_corrupt_blob_leaves_everything_untouched() {
        let mut coord = coordinator();
        coord.startup();

        let good = coord.save_layout("Good").expect("save");
        coord.load_layout(good.id).expect("load good");

        let bad = coord.store().save_layout("Bad", "{truncated").expect("seed");

        let err = coord.load_layout(bad.id).expect_err("must fail");
        assert!(matches!(err, WorkbenchError::Parse(_)));

        // Widget was not touched and the active flag did not move
        assert_eq!(coord.dock.restored.len(), 1);
        let active = coord
            .store()
            .active_layout()
            .expect("get")
            .expect("still active");
        assert_eq!(active.id, good.id);
    }

    #[test]
    fn test_widget_rejection_aborts_load() {
        let mut coord = coordinator();
        coord.startup();
        let layout = coord.save_layout("Valid").expect("save");

        coord.dock.reject_restore = true;
        let err = coord.load_layout(layout.id).expect_err("must fail");
        assert!(matches!(err, WorkbenchError::Restore(_)));

        // Nothing was flagged active
        assert_eq!(coord.store().active_layout().expect("get"), None);
    }

    #[test]
    fn test_add_panel_ids_start_after_defaults() {
        let mut coord = coordinator();
        coord.startup();

        assert_eq!(coord.add_panel(), "panel_3");
        assert_eq!(coord.add_panel(), "panel_4");
        assert_eq!(coord.dock.panels.len(), 4);
        assert_eq!(coord.dock.panels[2].title, "Panel 3");
    }

    #[test]
    fn test_set_theme_applies_and_persists() {
        let mut coord = coordinator();
        coord.startup();

        coord.set_theme(Theme::Replit);

        assert_eq!(coord.dock.theme, Some(Theme::Replit));
        assert_eq!(
            coord.store().setting("theme").expect("get"),
            Some("Replit".to_string())
        );
    }

    #[test]
    fn test_pending_activation_retried_on_next_save() {
        let mut coord = coordinator();
        coord.startup();

        let stranded = coord.save_layout("Stranded").expect("save");
        coord.pending_activation = Some(stranded.id);

        coord.save_layout("Later").expect("save retries");

        assert_eq!(coord.pending_activation, None);
        let active = coord
            .store()
            .active_layout()
            .expect("get")
            .expect("activated");
        assert_eq!(active.id, stranded.id);
    }

    #[test]
    fn test_pending_activation_dropped_when_layout_deleted() {
        let mut coord = coordinator();
        coord.startup();

        let gone = coord.save_layout("Gone").expect("save");
        coord.store().delete_layout(gone.id).expect("delete");
        coord.pending_activation = Some(gone.id);

        coord.save_layout("Later").expect("save");

        assert_eq!(coord.pending_activation, None);
        // Only the surviving row exists and nothing is active
        assert_eq!(coord.store().active_layout().expect("get"), None);
    }

    #[test]
    fn test_window_state_defaults_then_round_trips() {
        let mut coord = coordinator();
        coord.startup();

        let initial = coord.window_state();
        assert_eq!((initial.width, initial.height), (1024, 768));

        coord.save_window_state(WindowState {
            x: 10,
            y: 20,
            width: 1600,
            height: 900,
            maximized: true,
            updated_at: 0,
        });

        let restored = coord.window_state();
        assert_eq!((restored.x, restored.y), (10, 20));
        assert!(restored.maximized);
    }
}
