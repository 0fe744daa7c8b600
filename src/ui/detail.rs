//! The component detail page: hero, concepts, spec matrix, schematic, deep dive, manufacturing
//! steps and the two-model comparison engine.

use super::capture;
use super::highlighters;
use super::state::SpecsApp;
use super::theme::ThemeColors;
use crate::catalog::{DiagramType, HardwareRecord};
use crate::constants::MAX_COMPARE_SELECTION;
use crate::router::Route;
use crate::settings::LayoutStyle;
use eframe::egui::{self, RichText, StrokeKind};

fn section_header(ui: &mut egui::Ui, colors: &ThemeColors, number: &str, title: &str) {
    ui.add_space(20.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new(number).monospace().color(colors.primary));
        ui.label(RichText::new(title).heading().strong());
    });
    ui.separator();
}

impl SpecsApp {
    pub(super) fn draw_component_detail(&mut self, ui: &mut egui::Ui, id: &str) {
        let record = self.catalog.lookup(id);
        let colors = self.colors();

        ui.add_space(8.0);
        if capture::button(ui, "← Back to Database", "back-to-directory").clicked() {
            self.navigate(&Route::Directory);
        }

        match self.settings().layout_style {
            LayoutStyle::TwoColumn => {
                ui.columns(2, |columns| {
                    Self::draw_hero_text(&mut columns[0], &record, &colors);
                    self.draw_hero_media(&mut columns[1], &record, &colors);
                });
            }
            LayoutStyle::Stacked => {
                Self::draw_hero_text(ui, &record, &colors);
                self.draw_hero_media(ui, &record, &colors);
            }
        }

        section_header(ui, &colors, "01", "Engineering Concepts");
        if record.concepts.is_empty() {
            ui.label(RichText::new("No advanced concepts loaded.").italics().color(colors.text_muted));
        }
        for concept in &record.concepts {
            ui.label(RichText::new(concept.title.as_str()).strong().color(colors.primary));
            ui.label(RichText::new(concept.text.as_str()).color(colors.text_muted));
            ui.add_space(6.0);
        }

        section_header(ui, &colors, "02", "Specification Matrix");
        egui::Grid::new(("spec_matrix", id))
            .num_columns(2)
            .striped(true)
            .spacing(egui::vec2(24.0, 6.0))
            .show(ui, |ui| {
                for spec in &record.tech_specs {
                    ui.label(RichText::new(spec.key.as_str()).monospace().color(colors.text_muted));
                    ui.label(RichText::new(spec.val.as_str()).strong());
                    ui.end_row();
                }
            });

        section_header(ui, &colors, "03", "Schematic");
        self.draw_schematic(ui, &record, &colors);

        if !record.architecture_deep_dive.is_empty() {
            section_header(ui, &colors, "04", "Architectural Deep Dive");
            for paragraph in &record.architecture_deep_dive {
                ui.label(paragraph.as_str());
                ui.add_space(6.0);
            }
        }

        if !record.manufacturing_process.is_empty() {
            section_header(ui, &colors, "05", "Manufacturing Process");
            for (i, step) in record.manufacturing_process.iter().enumerate() {
                ui.label(
                    RichText::new(format!("STEP {}", i + 1))
                        .small()
                        .monospace()
                        .color(colors.primary),
                );
                ui.label(RichText::new(step.step.as_str()).strong());
                ui.label(RichText::new(step.detail.as_str()).color(colors.text_muted));
                ui.add_space(8.0);
            }
        }

        section_header(ui, &colors, "06", "Comparison Engine");
        self.draw_market_models(ui, &record, &colors);

        if self.dev(|s| s.show_component_data) {
            section_header(ui, &colors, "DEV", "Raw Component Data");
            match record.to_pretty_json() {
                Ok(json) => {
                    let font_id = egui::TextStyle::Monospace.resolve(ui.style());
                    let job = highlighters::highlight_json(&json, font_id, ui.visuals().dark_mode);
                    egui::ScrollArea::vertical()
                        .id_salt("raw_component_data")
                        .max_height(320.0)
                        .show(ui, |ui| ui.label(job));
                }
                Err(err) => {
                    ui.colored_label(ui.visuals().error_fg_color, err.to_string());
                }
            }
        }

        self.draw_comparison_window(ui.ctx(), &record, &colors);
    }

    fn draw_hero_text(ui: &mut egui::Ui, record: &HardwareRecord, colors: &ThemeColors) {
        ui.label(
            RichText::new(format!("ID: {}", record.id.to_uppercase()))
                .small()
                .monospace()
                .color(colors.primary),
        );
        ui.label(
            RichText::new(record.name.as_str())
                .size(ui.style().text_styles[&egui::TextStyle::Heading].size * 1.6)
                .strong(),
        );
        ui.label(RichText::new(record.role.as_str()).color(colors.primary));
        ui.label(RichText::new(record.desc.as_str()).color(colors.text_muted));
    }

    fn draw_hero_media(&self, ui: &mut egui::Ui, record: &HardwareRecord, colors: &ThemeColors) {
        self.draw_diagram(ui, record.diagram_type, colors, 160.0);
        ui.hyperlink_to(
            RichText::new("Reference image").small().color(colors.text_muted),
            record.image.as_str(),
        );
    }

    fn draw_schematic(&self, ui: &mut egui::Ui, record: &HardwareRecord, colors: &ThemeColors) {
        self.draw_diagram(ui, record.diagram_type, colors, 200.0);
        ui.label(
            RichText::new(format!("{} · BLK_DIA_001", record.name.to_uppercase()))
                .small()
                .monospace()
                .color(colors.text_muted),
        );
    }

    /// Block diagram for a diagram type. The trace pulse only runs while diagram animations are
    /// on and the projected animation speed is non-zero.
    fn draw_diagram(&self, ui: &mut egui::Ui, kind: DiagramType, colors: &ThemeColors, height: f32) {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        let radius = egui::CornerRadius::same(self.settings().border_radius);
        painter.rect_filled(rect, radius, colors.bg_element);

        let animate = self.settings().diagram_animations
            && self.style.animation_ms > 0
            && !self.settings().disable_3d;
        let pulse = if animate {
            ui.ctx().request_repaint();
            ((ui.input(|i| i.time) * 2.0).sin() as f32 + 1.0) / 2.0
        } else {
            1.0
        };
        let trace = egui::Stroke::new(2.0, colors.primary.gamma_multiply(0.4 + 0.6 * pulse));
        let outline = egui::Stroke::new(1.5, colors.border);
        let center = rect.center();

        match kind {
            DiagramType::Processor => {
                let die = egui::Rect::from_center_size(center, egui::vec2(height * 0.5, height * 0.5));
                painter.rect_stroke(die, radius, outline, StrokeKind::Inside);
                let core = die.shrink(height * 0.12);
                painter.rect_filled(core, radius, colors.primary_dim);
                painter.rect_stroke(core, radius, trace, StrokeKind::Inside);
                let pins = 8;
                for i in 0..pins {
                    let t = (i as f32 + 0.5) / pins as f32;
                    let x = die.left() + die.width() * t;
                    let y = die.top() + die.height() * t;
                    painter.line_segment([egui::pos2(x, die.top()), egui::pos2(x, die.top() - 8.0)], outline);
                    painter.line_segment([egui::pos2(x, die.bottom()), egui::pos2(x, die.bottom() + 8.0)], outline);
                    painter.line_segment([egui::pos2(die.left(), y), egui::pos2(die.left() - 8.0, y)], outline);
                    painter.line_segment([egui::pos2(die.right(), y), egui::pos2(die.right() + 8.0, y)], outline);
                }
            }
            DiagramType::Card => {
                let board = egui::Rect::from_center_size(center, egui::vec2(rect.width() * 0.7, height * 0.5));
                painter.rect_stroke(board, radius, outline, StrokeKind::Inside);
                let fan_radius = board.height() * 0.35;
                for offset in [-0.25, 0.25] {
                    let fan = egui::pos2(board.center().x + board.width() * offset, board.center().y);
                    painter.circle_stroke(fan, fan_radius, trace);
                    painter.circle_filled(fan, fan_radius * 0.2, colors.primary_dim);
                }
                let bracket = egui::Rect::from_min_max(
                    egui::pos2(board.left() - 10.0, board.top()),
                    egui::pos2(board.left(), board.bottom()),
                );
                painter.rect_filled(bracket, 0.0, colors.border);
            }
            DiagramType::Generic => {
                let block = egui::Rect::from_center_size(center, egui::vec2(height * 0.8, height * 0.45));
                painter.rect_stroke(block, radius, outline, StrokeKind::Inside);
                let step = block.width() / 6.0;
                for i in 1..6 {
                    let x = block.left() + step * i as f32;
                    painter.line_segment([egui::pos2(x, block.top()), egui::pos2(x, block.bottom())], trace);
                }
            }
        }
    }

    fn draw_market_models(&mut self, ui: &mut egui::Ui, record: &HardwareRecord, colors: &ThemeColors) {
        if record.market_models.is_empty() {
            ui.label(
                RichText::new("Awaiting comparison data for this category.")
                    .italics()
                    .color(colors.text_muted),
            );
            return;
        }
        ui.label(format!(
            "Select exactly {MAX_COMPARE_SELECTION} models below to launch the VS Matrix. ({}/{MAX_COMPARE_SELECTION} selected)",
            self.detail.compare.len()
        ));
        ui.add_space(6.0);

        let width = self.settings().card_size.width() * 1.2;
        ui.horizontal_wrapped(|ui| {
            for model in &record.market_models {
                let selected = self.detail.compare.contains(model.id);
                let stroke_color = if selected { colors.primary } else { colors.border };
                egui::Frame::new()
                    .fill(if selected { colors.primary_dim } else { colors.bg_panel })
                    .stroke(egui::Stroke::new(2.0, stroke_color))
                    .corner_radius(egui::CornerRadius::same(self.settings().border_radius))
                    .inner_margin(egui::Margin::same(12))
                    .show(ui, |ui| {
                        ui.set_width(width);
                        ui.label(RichText::new(model.name.as_str()).strong());
                        ui.label(RichText::new(model.brand.as_str()).small().color(colors.primary));
                        ui.label(RichText::new(model.description.as_str()).small().color(colors.text_muted));
                        let label = if selected {
                            "✔ Selected for Compare"
                        } else {
                            "+ Add to Compare"
                        };
                        let response = ui.add_sized(
                            egui::vec2(ui.available_width(), 28.0),
                            egui::Button::new(label).selected(selected),
                        );
                        capture::track(ui, &response, label, &format!("compare-{}", model.id), "button");
                        if response.clicked() {
                            self.toggle_compare(model.id);
                        }
                    });
            }
        });
    }

    fn draw_comparison_window(&mut self, ctx: &egui::Context, record: &HardwareRecord, colors: &ThemeColors) {
        let Some((first, second)) = self.detail.compare.pair(record) else {
            return;
        };
        let rows = self.detail.compare.rows(record);
        let mut close = false;
        egui::Window::new("VS Engine Output")
            .collapsible(false)
            .resizable(true)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(RichText::new("Direct Specification Contrast").small().color(colors.text_muted));
                ui.separator();
                egui::Grid::new("comparison_matrix")
                    .num_columns(3)
                    .striped(true)
                    .spacing(egui::vec2(24.0, 6.0))
                    .show(ui, |ui| {
                        ui.label("");
                        ui.label(RichText::new(first.name.as_str()).strong().color(colors.primary));
                        ui.label(RichText::new(second.name.as_str()).strong().color(colors.primary));
                        ui.end_row();
                        for row in &rows {
                            ui.label(RichText::new(row.key).monospace().color(colors.text_muted));
                            ui.label(row.first);
                            ui.label(row.second.unwrap_or(""));
                            ui.end_row();
                        }
                    });
                ui.separator();
                if capture::button(ui, "Close Engine", "close-comparison").clicked() {
                    close = true;
                }
            });
        if close {
            self.detail.compare.clear();
        }
    }
}
