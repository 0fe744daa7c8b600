//! User interface for the hardware catalog.
//!
//! # Module Organization
//!
//! - `state` - The [`SpecsApp`] state container and the operations views act through
//! - `theme` - Turns a projected visual style into an egui style
//! - `capture` - Per-frame widget registry for click capture
//! - `views` - Header, dashboard, directory and about screens
//! - `detail` - Component detail page and the comparison engine
//! - `settings_panel` - The control panel tabs
//! - `overlays` - Developer overlays (FPS, inspector, terminal, source viewer, grid)
//! - `file_ops` - Settings export and import for native and WASM
//! - `highlighters` - Syntax highlighting for JSON and Rust

mod capture;
mod detail;
mod file_ops;
mod highlighters;
mod overlays;
mod settings_panel;
mod state;
mod theme;
mod views;

pub use state::SpecsApp;

use crate::router::Route;
use crate::settings::ScrollBehavior;
use eframe::egui;

impl eframe::App for SpecsApp {
    /// Writes any configuration change still pending when eframe asks the app to save.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.flush_persistence(storage);
    }

    /// Main update function called by egui for each frame.
    ///
    /// Order matters: the route is synced and clicks are captured before any widget runs, the
    /// style is applied before drawing, and configuration changes made while drawing are
    /// persisted before the frame ends.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.run_frame(ctx);

        if let Some(storage) = frame.storage_mut() {
            self.flush_persistence(storage);
        }
    }
}

impl SpecsApp {
    /// Draws one frame. Separate from [`eframe::App::update`] so tests can drive it headless.
    pub fn run_frame(&mut self, ctx: &egui::Context) {
        self.sync_route();
        self.handle_pending_operations(ctx);
        self.capture_clicks(ctx);

        if self.style_dirty {
            theme::apply(ctx, &self.style);
            self.style_dirty = false;
        }

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(ctx.style().visuals.panel_fill)
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                self.draw_header(ui);
            });

        self.draw_side_nav(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_background(ui);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .animated(self.settings().scroll_behavior == ScrollBehavior::Smooth)
                .show(ui, |ui| {
                    let max_width = self.settings().content_width.max_width();
                    let width = max_width.map_or(ui.available_width(), |w| w.min(ui.available_width()));
                    let margin = ((ui.available_width() - width) / 2.0).max(0.0);
                    ui.horizontal(|ui| {
                        ui.add_space(margin);
                        ui.vertical(|ui| {
                            ui.set_width(width);
                            self.draw_route(ui);
                        });
                    });
                });
        });

        self.sync_diagnostics();
        self.draw_overlays(ctx);
        self.draw_confirm_dialog(ctx);
        self.draw_notice(ctx);

        // Navigation requested while drawing takes effect now rather than on the next input.
        if self.sync_route() {
            ctx.request_repaint();
        }
    }

    fn draw_route(&mut self, ui: &mut egui::Ui) {
        match self.router.current().clone() {
            Route::Dashboard => self.draw_dashboard(ui),
            Route::Directory => self.draw_directory(ui),
            Route::Settings => self.draw_settings(ui),
            Route::About => self.draw_about(ui),
            Route::ComponentDetail(id) => self.draw_component_detail(ui, &id),
        }
    }

    /// Logs primary clicks while developer mode and interaction logging are on.
    fn capture_clicks(&mut self, ctx: &egui::Context) {
        let previous = capture::begin_frame(ctx);
        // A discarded pass replays the same input; only the first pass samples it.
        if ctx.current_pass_index() > 0 {
            return;
        }
        if let Some(poller) = self.overlays.inspector.as_mut() {
            let now = ctx.input(|i| i.time);
            let size = ctx.input(|i| i.screen_rect().size());
            poller.poll(now, || crate::diagnostics::InspectorStats {
                widgets: previous.len(),
                width: size.x,
                height: size.y,
            });
        }
        if !self.dev(|s| s.log_interactions) {
            return;
        }
        for pos in capture::primary_presses(ctx) {
            let label = previous.resolve(pos).describe();
            self.log_click(&label);
        }
    }

    fn draw_confirm_dialog(&mut self, ctx: &egui::Context) {
        let Some(action) = self.pending_confirm_action else {
            return;
        };
        egui::Window::new(action.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(action.prompt());
                ui.horizontal(|ui| {
                    if capture::button(ui, action.confirm_label(), "confirm-action").clicked() {
                        self.confirm_pending();
                    }
                    if capture::button(ui, "Cancel", "cancel-action").clicked() {
                        self.cancel_confirm();
                    }
                });
            });
    }

    fn draw_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notice.clone() else {
            return;
        };
        egui::Window::new(notice.title.as_str())
            .id(egui::Id::new("notice"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 80.0))
            .show(ctx, |ui| {
                ui.label(notice.message.as_str());
                if capture::button(ui, "OK", "dismiss-notice").clicked() {
                    self.notice = None;
                }
            });
    }
}

#[cfg(test)]
mod tests;
