//! Application state and the operations the views act through.
//!
//! [`SpecsApp`] is the single owner of the configuration record, the developer log and the
//! router. Views read it and mutate only through the methods defined here.

use crate::catalog::{Catalog, CompareError, CompareSelection, ModelId};
use crate::console::{self, Command};
use crate::devlog::{LogKind, SystemLog};
use crate::diagnostics::{FpsCounter, InspectorPoller};
use crate::projector::{project, ClassList, VisualStyle};
use crate::router::{Location, MemoryLocation, Route, Router};
use crate::settings::{AppSettings, SettingsChange, SettingsStore};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Tabs of the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Theme,
    Animation,
    Layout,
    Performance,
    Accessibility,
    Data,
    Developer,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 7] = [
        Self::Theme,
        Self::Animation,
        Self::Layout,
        Self::Performance,
        Self::Accessibility,
        Self::Data,
        Self::Developer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Theme => "Theme Engine",
            Self::Animation => "Animation",
            Self::Layout => "Layout",
            Self::Performance => "Performance",
            Self::Accessibility => "Accessibility",
            Self::Data => "Data Management",
            Self::Developer => "Developer",
        }
    }
}

/// State of the control panel screen.
#[derive(Default)]
pub struct SettingsPanelState {
    pub tab: SettingsTab,
    /// Text pasted into the import box
    pub import_text: String,
}

/// State of the component detail screen.
#[derive(Default)]
pub struct DetailState {
    /// Market models picked for comparison; the comparison window shows while two are picked
    pub compare: CompareSelection,
}

/// State of the system terminal.
pub struct ConsoleState {
    pub input: String,
    /// Expanded or collapsed to its title bar
    pub open: bool,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            input: String::new(),
            open: true,
        }
    }
}

/// Developer overlays and their samplers.
///
/// A sampler exists only while its overlay is enabled; see [`SpecsApp::sync_diagnostics`].
#[derive(Default)]
pub struct OverlayState {
    pub fps: Option<FpsCounter>,
    pub inspector: Option<InspectorPoller>,
    pub source_viewer_open: bool,
    /// Index into the source file table
    pub source_index: usize,
}

/// Represents a pending export operation.
#[derive(Debug)]
pub enum PendingExportOperation {
    /// Save the configuration to a file chosen by the user
    ToFile,
}

/// Represents a pending import operation.
#[derive(Debug)]
pub enum PendingImportOperation {
    /// Read the configuration from a file chosen by the user
    FromFile,
}

/// Messages sent from async file operations back to the main app.
#[derive(Debug)]
pub enum FileOperationResult {
    /// Export completed to the given path
    ExportCompleted(String),
    /// Import read the given file's content
    ImportLoaded(String, String),
    /// Operation failed with an error message
    OperationFailed(String),
}

/// State related to settings export and import.
pub struct FileState {
    pub pending_export: Option<PendingExportOperation>,
    pub pending_import: Option<PendingImportOperation>,
    /// Channel for receiving file operation results from async contexts
    pub sender: Sender<FileOperationResult>,
    pub receiver: Receiver<FileOperationResult>,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            pending_export: None,
            pending_import: None,
            sender,
            receiver,
        }
    }
}

/// Destructive actions that wait for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirmAction {
    /// Factory reset of every setting
    ResetSettings,
    /// Wipe the persisted record and restart the session
    ClearStorage,
}

impl PendingConfirmAction {
    pub fn title(self) -> &'static str {
        match self {
            Self::ResetSettings => "Factory Reset",
            Self::ClearStorage => "Clear Local Storage",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::ResetSettings => "Factory Reset all settings?",
            Self::ClearStorage => "Erase all saved data and restart the session?",
        }
    }

    pub fn confirm_label(self) -> &'static str {
        match self {
            Self::ResetSettings => "Reset",
            Self::ClearStorage => "Erase",
        }
    }
}

/// What the next persistence step must write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistRequest {
    /// Write the current record
    Save,
    /// Overwrite the stored record with an empty blob
    Clear,
}

/// A modal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The application: configuration, developer log, route and transient view state.
pub struct SpecsApp {
    pub store: SettingsStore,
    /// Projection of the current record
    pub style: VisualStyle,
    pub classes: ClassList,
    /// Set when `style` changed and has not been pushed to egui yet
    pub style_dirty: bool,
    pub logs: SystemLog,
    pub router: Router,
    pub catalog: &'static Catalog,
    pub detail: DetailState,
    pub console: ConsoleState,
    pub overlays: OverlayState,
    pub panel: SettingsPanelState,
    pub file: FileState,
    pub pending_confirm_action: Option<PendingConfirmAction>,
    pub notice: Option<Notice>,
    pub persist_request: Option<PersistRequest>,
}

impl Default for SpecsApp {
    fn default() -> Self {
        Self::with_parts(SettingsStore::default(), Box::new(MemoryLocation::default()))
    }
}

impl SpecsApp {
    /// Creates the app from eframe's creation context, loading persisted settings.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let store = SettingsStore::load(cc.storage);

        #[cfg(target_arch = "wasm32")]
        let location: Box<dyn Location> =
            Box::new(crate::router::BrowserLocation::new(&cc.egui_ctx));
        #[cfg(not(target_arch = "wasm32"))]
        let location: Box<dyn Location> = Box::new(MemoryLocation::default());

        Self::with_parts(store, location)
    }

    /// Creates the app from an explicit store and location.
    pub fn with_parts(store: SettingsStore, location: Box<dyn Location>) -> Self {
        let style = project(store.settings());
        let mut classes = ClassList::default();
        classes.apply(&style);

        let mut app = Self {
            store,
            style,
            classes,
            style_dirty: true,
            logs: SystemLog::new(),
            router: Router::new(location),
            catalog: Catalog::builtin(),
            detail: DetailState::default(),
            console: ConsoleState::default(),
            overlays: OverlayState::default(),
            panel: SettingsPanelState::default(),
            file: FileState::default(),
            pending_confirm_action: None,
            notice: None,
            persist_request: None,
        };
        app.sync_diagnostics();
        app.logs.append(
            "SYSTEM",
            format!("Kernel ready. {} components indexed.", app.catalog.len()),
            LogKind::Info,
        );
        app
    }

    /// Current configuration record.
    pub fn settings(&self) -> &AppSettings {
        self.store.settings()
    }

    /// Whether developer mode and the given developer flag are both on.
    pub fn dev(&self, flag: impl Fn(&AppSettings) -> bool) -> bool {
        let settings = self.settings();
        settings.dev_mode && flag(settings)
    }

    /// Applies an update to the configuration record.
    ///
    /// A non-empty change re-projects the style, schedules persistence and, when developer mode
    /// is on in the resulting record, logs the changed field names.
    pub fn update_settings(&mut self, apply: impl FnOnce(&mut AppSettings)) -> SettingsChange {
        let change = self.store.update(apply);
        self.after_settings_change(&change);
        change
    }

    fn after_settings_change(&mut self, change: &SettingsChange) {
        if change.is_empty() {
            return;
        }
        self.restyle();
        self.sync_diagnostics();
        self.persist_request = Some(PersistRequest::Save);
        if self.settings().dev_mode {
            self.logs.append("CONFIG", change.describe(), LogKind::Info);
        }
    }

    fn restyle(&mut self) {
        self.style = project(self.store.settings());
        self.classes.apply(&self.style);
        self.style_dirty = true;
    }

    /// Creates or drops the FPS and inspector samplers to match their flags.
    pub fn sync_diagnostics(&mut self) {
        let fps_on = self.dev(|s| s.show_fps);
        let inspector_on = self.dev(|s| s.show_dom_inspector);
        match (fps_on, self.overlays.fps.is_some()) {
            (true, false) => self.overlays.fps = Some(FpsCounter::new()),
            (false, true) => self.overlays.fps = None,
            _ => {}
        }
        match (inspector_on, self.overlays.inspector.is_some()) {
            (true, false) => self.overlays.inspector = Some(InspectorPoller::new()),
            (false, true) => self.overlays.inspector = None,
            _ => {}
        }
    }

    /// Asks for confirmation before a destructive action.
    pub fn request_confirm(&mut self, action: PendingConfirmAction) {
        self.pending_confirm_action = Some(action);
    }

    /// Dismisses the pending confirmation without acting.
    pub fn cancel_confirm(&mut self) {
        self.pending_confirm_action = None;
    }

    /// Performs the pending confirmed action.
    pub fn confirm_pending(&mut self) {
        match self.pending_confirm_action.take() {
            Some(PendingConfirmAction::ResetSettings) => self.reset_settings(),
            Some(PendingConfirmAction::ClearStorage) => self.clear_storage(),
            None => {}
        }
    }

    /// Replaces the whole record with the defaults.
    pub fn reset_settings(&mut self) {
        let change = self.store.reset();
        self.after_settings_change(&change);
        log::info!("Settings reset to defaults");
    }

    /// Erases the persisted record and restarts the session from defaults.
    pub fn clear_storage(&mut self) {
        self.store = SettingsStore::default();
        self.restyle();
        self.sync_diagnostics();
        self.logs = SystemLog::new();
        self.logs.append("SYSTEM", "Local storage cleared", LogKind::Warn);
        self.detail = DetailState::default();
        self.overlays.source_viewer_open = false;
        self.panel.import_text.clear();
        self.persist_request = Some(PersistRequest::Clear);
        self.navigate(&Route::Dashboard);
    }

    /// Requests navigation; the route changes when the router next syncs.
    pub fn navigate(&mut self, route: &Route) {
        self.router.navigate(route);
    }

    /// Re-reads the location and reacts to a route change.
    ///
    /// # Returns
    ///
    /// `true` if the route changed.
    pub fn sync_route(&mut self) -> bool {
        let Some(route) = self.router.sync() else {
            return false;
        };
        self.detail = DetailState::default();
        if self.settings().dev_mode {
            self.logs
                .append("NAV", format!("Route changed to /{route}"), LogKind::Info);
        }
        true
    }

    /// Echoes and dispatches one terminal line.
    pub fn run_command(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.logs.append("USER", line, LogKind::Cmd);
        match console::parse(line) {
            Ok(Some(command)) => self.dispatch(command),
            Ok(None) => {}
            Err(err) => self.logs.append("SHELL", err.to_string(), LogKind::Error),
        }
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::Help => {
                for help in console::all_commands() {
                    self.logs.append(
                        "HELP",
                        format!("{} - {}", help.usage, help.summary),
                        LogKind::Info,
                    );
                }
            }
            Command::Clear => self.logs.clear(),
            Command::Goto(route) => self.navigate(&route),
            Command::Theme(mode) => {
                self.update_settings(|s| s.theme_mode = mode);
            }
            Command::Source => {
                self.overlays.source_viewer_open = true;
                self.logs.append("SYSTEM", "Source viewer opened", LogKind::Info);
            }
            Command::Dev(enabled) => {
                self.update_settings(|s| s.dev_mode = enabled);
                let state = if enabled { "enabled" } else { "disabled" };
                self.logs
                    .append("SYSTEM", format!("Developer mode {state}"), LogKind::Warn);
            }
        }
    }

    /// Logs a captured click.
    pub fn log_click(&mut self, label: &str) {
        self.logs
            .append("EVENT", format!("Click: {label}"), LogKind::Event);
    }

    /// Adds or removes a model from the comparison, raising a notice when the selection is full.
    pub fn toggle_compare(&mut self, id: ModelId) {
        match self.detail.compare.toggle(id) {
            Ok(()) => {}
            Err(err @ CompareError::LimitReached) => {
                self.notice = Some(Notice::new("Comparison", err.to_string()));
            }
        }
    }

    /// Merges a JSON configuration into the current record.
    ///
    /// On failure the record is untouched and the error becomes a notice.
    pub fn import_settings(&mut self, json: &str) -> bool {
        match self.store.merge_json(json) {
            Ok(change) => {
                let count = change.changed.len();
                self.after_settings_change(&change);
                self.notice = Some(Notice::new(
                    "Import",
                    format!("Configuration imported ({count} settings changed)."),
                ));
                true
            }
            Err(err) => {
                log::warn!("Settings import rejected: {err}");
                self.notice = Some(Notice::new("Import Failed", err));
                false
            }
        }
    }

    /// Pretty JSON of the current record for export.
    pub fn export_json(&self) -> String {
        self.settings().to_pretty_json().unwrap_or_else(|err| {
            log::error!("Failed to serialize settings: {err}");
            String::new()
        })
    }

    /// Writes or clears the persisted record if a change is pending.
    pub fn flush_persistence(&mut self, storage: &mut dyn eframe::Storage) {
        match self.persist_request.take() {
            Some(PersistRequest::Save) => self.store.persist(storage),
            Some(PersistRequest::Clear) => SettingsStore::clear_persisted(storage),
            None => {}
        }
    }
}
