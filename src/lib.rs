//! # R4K1N Specs
//!
//! A client-only reference catalog of PC hardware with a heavily configurable interface.
//! Everything is bundled: the catalog is compiled in and the only persisted state is the
//! user's configuration record.
//!
//! ## Features
//! - Hash-routed pages: dashboard, hardware directory, component detail, control panel, about
//! - Component detail with spec matrix, schematic and a two-model comparison engine
//! - Configuration record projected onto the egui style (palette, accent, density, radius,
//!   animation speed, font scale, contrast)
//! - Settings persisted as one JSON blob, with export and import through files or text
//! - Developer mode: event log with click capture, interactive terminal, FPS meter, widget
//!   inspector, source viewer, layout grid and debug outlines

#![deny(unsafe_code)]

pub mod catalog;
pub mod console;
pub mod constants;
pub mod devlog;
pub mod diagnostics;
pub mod projector;
pub mod router;
pub mod settings;
mod ui;

pub use settings::{AppSettings, SettingsStore};
pub use ui::SpecsApp;

/// Runs the application natively.
///
/// # Returns
///
/// Returns `Ok(())` when the window closes, or an `eframe::Error` if initialization fails.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), eframe::Error> {
///     r4k1n_specs::run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("R4K1N Specs")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "R4K1N Specs",
        options,
        Box::new(|cc| Ok(Box::new(SpecsApp::new(cc)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_app_starts_on_dashboard_with_boot_entry() {
        let app = SpecsApp::default();
        assert_eq!(*app.router.current(), router::Route::Dashboard);
        assert_eq!(app.logs.len(), 1);
        let boot = app.logs.last().expect("boot entry");
        assert_eq!(boot.source, "SYSTEM");
        assert!(boot.message.contains("components indexed"));
    }

    #[test]
    fn default_app_uses_default_settings() {
        let app = SpecsApp::default();
        assert_eq!(*app.settings(), AppSettings::default());
        assert!(app.overlays.fps.is_none());
        assert!(app.overlays.inspector.is_none());
    }
}
