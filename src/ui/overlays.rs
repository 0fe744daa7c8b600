//! Developer overlays drawn above the page: FPS meter, widget inspector, terminal, source
//! viewer, layout grid and debug outlines.
//!
//! Every overlay checks its own gate here; none of them draws while developer mode is off.

use super::capture;
use super::highlighters::{self, Language};
use super::state::SpecsApp;
use crate::console;
use crate::constants::{FPS_METER_FULL_SCALE, GRID_OVERLAY_CELL};
use crate::devlog::LogKind;
use eframe::egui::{self, Color32, RichText};

const TERMINAL_BG: Color32 = Color32::from_rgb(12, 12, 12);
const TERMINAL_BAR: Color32 = Color32::from_rgb(26, 26, 26);
const TERMINAL_BORDER: Color32 = Color32::from_rgb(51, 51, 51);
const TERMINAL_GREEN: Color32 = Color32::from_rgb(74, 222, 128);

fn overlay_frame(border: Color32) -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_black_alpha(230))
        .stroke(egui::Stroke::new(1.0, border))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(10))
}

fn kind_color(kind: LogKind) -> Color32 {
    match kind {
        LogKind::Warn => Color32::from_rgb(234, 179, 8),
        LogKind::Error => Color32::from_rgb(248, 113, 113),
        LogKind::Event => Color32::from_rgb(96, 165, 250),
        LogKind::Cmd => Color32::from_rgb(192, 132, 252),
        LogKind::Info => TERMINAL_GREEN,
    }
}

impl SpecsApp {
    pub(super) fn draw_overlays(&mut self, ctx: &egui::Context) {
        if self.style.debug_grid {
            draw_layout_grid(ctx);
        }
        if self.style.debug_outlines || self.style.debug_boundaries {
            self.draw_outlines(ctx);
        }
        self.draw_fps_meter(ctx);
        self.draw_inspector(ctx);
        self.draw_terminal(ctx);
        self.draw_source_viewer(ctx);
    }

    fn draw_fps_meter(&mut self, ctx: &egui::Context) {
        let fps_limit = self.settings().fps_limit;
        let Some(counter) = self.overlays.fps.as_mut() else {
            return;
        };
        let fps = if ctx.current_pass_index() == 0 {
            counter.tick(ctx.input(|i| i.time))
        } else {
            counter.fps()
        };

        // Keep frames coming so the meter measures something; 999 means uncapped.
        if fps_limit >= 999 {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_secs_f64(1.0 / f64::from(fps_limit.max(1))));
        }

        egui::Area::new(egui::Id::new("fps_meter"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-24.0, 96.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                overlay_frame(Color32::from_rgb(20, 83, 45)).show(ui, |ui| {
                    ui.set_min_width(80.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("FPS MONITOR").small().strong().color(Color32::from_rgb(21, 128, 61)));
                        ui.label(RichText::new(fps.to_string()).size(24.0).strong().color(TERMINAL_GREEN));
                        let fill = (fps as f32 / FPS_METER_FULL_SCALE).min(1.0);
                        ui.add(
                            egui::ProgressBar::new(fill)
                                .desired_height(4.0)
                                .fill(Color32::from_rgb(34, 197, 94)),
                        );
                    });
                });
            });
    }

    fn draw_inspector(&self, ctx: &egui::Context) {
        let Some(poller) = self.overlays.inspector.as_ref() else {
            return;
        };
        let stats = poller.stats();
        // The poll is time based, so keep frames coming while the panel is up.
        ctx.request_repaint_after(std::time::Duration::from_secs_f64(crate::constants::INSPECTOR_POLL_SECS));

        egui::Area::new(egui::Id::new("widget_inspector"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -24.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                overlay_frame(Color32::from_rgb(30, 58, 138)).show(ui, |ui| {
                    ui.set_min_width(200.0);
                    ui.label(RichText::new("WIDGET INSPECTOR").monospace().strong().color(Color32::from_rgb(96, 165, 250)));
                    ui.separator();
                    egui::Grid::new("inspector_stats").num_columns(2).show(ui, |ui| {
                        let muted = Color32::GRAY;
                        ui.label(RichText::new("Widgets:").monospace().color(muted));
                        ui.label(RichText::new(stats.widgets.to_string()).monospace().strong().color(Color32::WHITE));
                        ui.end_row();
                        ui.label(RichText::new("Viewport:").monospace().color(muted));
                        ui.label(
                            RichText::new(format!("{:.0} x {:.0}", stats.width, stats.height))
                                .monospace()
                                .color(Color32::WHITE),
                        );
                        ui.end_row();
                        ui.label(RichText::new("Breakpoint:").monospace().color(muted));
                        ui.label(
                            RichText::new(stats.breakpoint().to_string())
                                .monospace()
                                .strong()
                                .color(Color32::from_rgb(250, 204, 21)),
                        );
                        ui.end_row();
                    });
                });
            });
    }

    fn draw_terminal(&mut self, ctx: &egui::Context) {
        if !self.dev(|s| s.show_system_terminal) {
            return;
        }
        let mut submitted = None;
        egui::Window::new("terminal")
            .title_bar(false)
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(0.0, 0.0))
            .fixed_size(egui::vec2(600.0, if self.console.open { 350.0 } else { 24.0 }))
            .frame(
                egui::Frame::new()
                    .fill(TERMINAL_BG)
                    .stroke(egui::Stroke::new(1.0, TERMINAL_BORDER)),
            )
            .show(ctx, |ui| {
                let bar = egui::Frame::new()
                    .fill(TERMINAL_BAR)
                    .inner_margin(egui::Margin::symmetric(12, 4))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("INTERACTIVE_DEV_CONSOLE").monospace().strong().color(TERMINAL_GREEN));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(
                                    RichText::new(format!("{} events", self.logs.len()))
                                        .small()
                                        .color(Color32::GRAY),
                                );
                            });
                        });
                    })
                    .response
                    .interact(egui::Sense::click());
                capture::track(ui, &bar, "INTERACTIVE_DEV_CONSOLE", "terminal-bar", "terminal");
                if bar.clicked() {
                    self.console.open = !self.console.open;
                }
                if !self.console.open {
                    return;
                }

                let font = egui::FontId::monospace(11.0);
                egui::ScrollArea::vertical()
                    .id_salt("terminal_log")
                    .max_height(270.0)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in self.logs.entries() {
                            ui.horizontal_wrapped(|ui| {
                                ui.spacing_mut().item_spacing.x = 6.0;
                                ui.label(RichText::new(format!("[{}]", entry.timestamp)).font(font.clone()).color(Color32::DARK_GRAY));
                                ui.label(
                                    RichText::new(format!("{}{}", entry.source, entry.separator()))
                                        .font(font.clone())
                                        .strong()
                                        .color(kind_color(entry.kind)),
                                );
                                ui.label(RichText::new(entry.message.as_str()).font(font.clone()).color(Color32::LIGHT_GRAY));
                            });
                        }
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(RichText::new(">").monospace().strong().color(TERMINAL_GREEN));
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.console.input)
                            .id(egui::Id::new("terminal_input"))
                            .hint_text("Type 'help' for commands...")
                            .font(font.clone())
                            .text_color(TERMINAL_GREEN)
                            .frame(false)
                            .desired_width(f32::INFINITY),
                    );
                    capture::track(ui, &response, "", "terminal-input", "input");
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submitted = Some(std::mem::take(&mut self.console.input));
                        response.request_focus();
                    }
                });
            });

        if let Some(line) = submitted {
            self.run_command(&line);
        }
    }

    fn draw_source_viewer(&mut self, ctx: &egui::Context) {
        if !self.settings().dev_mode {
            return;
        }
        let pinned = self.settings().show_source_code;
        if !(pinned || self.overlays.source_viewer_open) {
            return;
        }

        let files = console::all_source_files();
        let mut open = true;
        egui::Window::new("Source Viewer")
            .id(egui::Id::new("source_viewer"))
            .open(&mut open)
            .default_size(egui::vec2(720.0, 480.0))
            .default_pos(egui::pos2(120.0, 120.0))
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for (index, file) in files.iter().enumerate() {
                        let id = format!("source-{index}");
                        if capture::selectable(ui, self.overlays.source_index == index, file.path, &id).clicked() {
                            self.overlays.source_index = index;
                        }
                    }
                });
                ui.separator();
                let Some(file) = files.get(self.overlays.source_index) else {
                    return;
                };
                let font_id = egui::TextStyle::Monospace.resolve(ui.style());
                let job = highlighters::highlight(
                    file.contents,
                    Language::for_path(file.path),
                    font_id,
                    ui.visuals().dark_mode,
                );
                egui::ScrollArea::both()
                    .id_salt("source_viewer_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| ui.label(job));
            });

        if !open {
            self.overlays.source_viewer_open = false;
            if pinned {
                self.update_settings(|s| s.show_source_code = false);
            }
        }
    }

    /// Outlines widgets registered so far this frame.
    fn draw_outlines(&self, ctx: &egui::Context) {
        let registry = capture::current(ctx);
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("debug_outlines"),
        ));
        let outline = egui::Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 0, 0, 160));
        let boundary = egui::Stroke::new(1.5, Color32::from_rgba_unmultiplied(0, 200, 255, 200));
        for (rect, target) in registry.rects() {
            let is_boundary = matches!(target.class.as_deref(), Some("card" | "row"));
            if self.style.debug_boundaries && is_boundary {
                painter.rect_stroke(rect, 0.0, boundary, egui::StrokeKind::Outside);
            } else if self.style.debug_outlines {
                painter.rect_stroke(rect, 0.0, outline, egui::StrokeKind::Inside);
            }
        }
    }
}

/// Paints a fixed grid over the whole screen.
fn draw_layout_grid(ctx: &egui::Context) {
    let screen = ctx.input(|i| i.screen_rect());
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("layout_grid"),
    ));
    let stroke = egui::Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 0, 0, 25));
    let mut x = screen.left();
    while x <= screen.right() {
        painter.vline(x, screen.y_range(), stroke);
        x += GRID_OVERLAY_CELL;
    }
    let mut y = screen.top();
    while y <= screen.bottom() {
        painter.hline(screen.x_range(), y, stroke);
        y += GRID_OVERLAY_CELL;
    }
}
