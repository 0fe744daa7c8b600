//! The control panel: one tab per group of settings plus data management.
//!
//! Widgets edit a draft copy of the record; a frame that changed the draft commits it through
//! [`SpecsApp::update_settings`] so every edit is diffed, projected, persisted and logged.

use super::capture;
use super::highlighters;
use super::state::{
    Notice, PendingConfirmAction, PendingExportOperation, PendingImportOperation, SettingsTab,
    SpecsApp,
};
use super::theme::{parse_css_color, ThemeColors};
use crate::constants::{FONT_SCALE_RANGE, MAX_BORDER_RADIUS};
use crate::settings::{
    AppSettings, BackgroundStyle, CardSize, ContentWidth, FontFamily, GridStyle, LayoutStyle,
    NavigationStyle, ScrollBehavior, SidebarPosition, ThemeMode, UiDensity, FPS_LIMIT_CHOICES,
};
use eframe::egui::{self, RichText};

/// Named accent presets.
const ACCENT_PRESETS: [(&str, &str); 6] = [
    ("Cyber Blue", "#3b82f6"),
    ("Emerald Tech", "#10b981"),
    ("Crimson Red", "#ef4444"),
    ("Royal Purple", "#8b5cf6"),
    ("Amber Glow", "#f59e0b"),
    ("Neon Pink", "#ec4899"),
];

fn section_title(ui: &mut egui::Ui, colors: &ThemeColors, title: &str) {
    ui.add_space(4.0);
    ui.label(RichText::new(title).heading().strong().color(colors.text_main));
    ui.separator();
}

fn group_label(ui: &mut egui::Ui, colors: &ThemeColors, label: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(label).small().strong().color(colors.text_muted));
}

/// A labelled checkbox with an optional description line.
fn switch(ui: &mut egui::Ui, colors: &ThemeColors, value: &mut bool, label: &str, desc: Option<&str>) {
    let response = ui.checkbox(value, label);
    capture::track(ui, &response, label, "", "switch");
    if let Some(desc) = desc {
        ui.label(RichText::new(desc).small().color(colors.text_muted));
    }
}

/// A combo box over a fixed set of choices.
fn choice<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut T,
    all: &[T],
    name: impl Fn(T) -> &'static str,
) {
    ui.horizontal(|ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(label)
            .selected_text(name(*value))
            .show_ui(ui, |ui| {
                for option in all {
                    ui.selectable_value(value, *option, name(*option));
                }
            });
    });
}

/// A row of selectable cards over a fixed set of choices.
fn cards<T: Copy + PartialEq>(ui: &mut egui::Ui, value: &mut T, all: &[T], name: impl Fn(T) -> &'static str) {
    ui.horizontal_wrapped(|ui| {
        for option in all {
            let label = name(*option);
            let response = ui.selectable_label(*value == *option, label);
            capture::track(ui, &response, label, "", "select-card");
            if response.clicked() {
                *value = *option;
            }
        }
    });
}

fn to_hex(color: egui::Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

impl SpecsApp {
    pub(super) fn draw_settings(&mut self, ui: &mut egui::Ui) {
        let colors = self.colors();
        ui.add_space(16.0);
        ui.label(
            RichText::new("Control Center")
                .size(ui.style().text_styles[&egui::TextStyle::Heading].size * 1.4)
                .strong(),
        );
        ui.label(RichText::new("System Configuration & Preferences").small().color(colors.text_muted));
        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            for tab in SettingsTab::ALL {
                let id = format!("tab-{tab:?}").to_lowercase();
                if capture::selectable(ui, self.panel.tab == tab, tab.label(), &id).clicked() {
                    self.panel.tab = tab;
                }
            }
        });
        ui.separator();

        // The data tab replaces the record wholesale, so it never edits a draft.
        if self.panel.tab == SettingsTab::Data {
            self.data_tab(ui, &colors);
            return;
        }

        let mut draft = self.settings().clone();
        match self.panel.tab {
            SettingsTab::Theme => Self::theme_tab(ui, &colors, &mut draft),
            SettingsTab::Animation => Self::animation_tab(ui, &colors, &mut draft),
            SettingsTab::Layout => Self::layout_tab(ui, &colors, &mut draft),
            SettingsTab::Performance => Self::performance_tab(ui, &colors, &mut draft),
            SettingsTab::Accessibility => Self::accessibility_tab(ui, &colors, &mut draft),
            SettingsTab::Developer => Self::developer_tab(ui, &colors, &mut draft),
            SettingsTab::Data => {}
        }
        if draft != *self.settings() {
            self.update_settings(|settings| *settings = draft);
        }
    }

    fn theme_tab(ui: &mut egui::Ui, colors: &ThemeColors, draft: &mut AppSettings) {
        section_title(ui, colors, "Visual Theme System");

        group_label(ui, colors, "Mode Selection");
        cards(ui, &mut draft.theme_mode, &ThemeMode::ALL, ThemeMode::label);

        group_label(ui, colors, "Color Presets");
        let locked = draft.theme_mode == ThemeMode::CyberGold;
        if locked {
            ui.label(
                RichText::new("Accent is locked to gold while the Cyber Gold theme is active.")
                    .small()
                    .color(colors.text_muted),
            );
        }
        ui.add_enabled_ui(!locked, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (name, hex) in ACCENT_PRESETS {
                    let swatch = parse_css_color(hex).unwrap_or(colors.primary);
                    let selected = draft.accent_color.eq_ignore_ascii_case(hex);
                    let response = ui.add(
                        egui::Button::new(RichText::new(name).color(swatch))
                            .selected(selected)
                            .stroke(egui::Stroke::new(1.0, swatch)),
                    );
                    capture::track(ui, &response, name, "", "preset");
                    if response.clicked() {
                        draft.accent_color = hex.to_string();
                    }
                }
            });

            group_label(ui, colors, "Custom Accent");
            ui.horizontal(|ui| {
                let mut color = parse_css_color(&draft.accent_color).unwrap_or(colors.primary);
                if ui.color_edit_button_srgba(&mut color).changed() {
                    draft.accent_color = to_hex(color);
                }
                ui.monospace(draft.accent_color.as_str());
            });
        });

        group_label(ui, colors, "Typography & Shape");
        choice(ui, "Font Family", &mut draft.font_family, &FontFamily::ALL, FontFamily::label);
        choice(ui, "UI Density", &mut draft.ui_density, &UiDensity::ALL, UiDensity::label);
        ui.add(
            egui::Slider::new(&mut draft.border_radius, 0..=MAX_BORDER_RADIUS)
                .text("Border Radius")
                .suffix("px"),
        );

        group_label(ui, colors, "Background Style");
        cards(ui, &mut draft.background_style, &BackgroundStyle::ALL, BackgroundStyle::label);
    }

    fn animation_tab(ui: &mut egui::Ui, colors: &ThemeColors, draft: &mut AppSettings) {
        section_title(ui, colors, "Motion Dynamics");
        switch(ui, colors, &mut draft.page_transitions, "Popout Page Transitions", Some("Professional slow-pop effect."));
        switch(ui, colors, &mut draft.component_fade_ins, "Component Fade-ins", None);
        switch(ui, colors, &mut draft.diagram_animations, "Diagram Animations", None);
        switch(ui, colors, &mut draft.performance_meter_animations, "Perf. Meter Motion", None);
        switch(ui, colors, &mut draft.hover_effects, "Hover Glow Effects", None);
        switch(ui, colors, &mut draft.parallax_effects, "Parallax Effects", None);

        group_label(ui, colors, "Scroll Physics");
        ui.horizontal(|ui| {
            ui.radio_value(&mut draft.scroll_behavior, ScrollBehavior::Smooth, "Smooth");
            ui.radio_value(&mut draft.scroll_behavior, ScrollBehavior::Auto, "Instant");
        });

        ui.add_space(8.0);
        switch(ui, colors, &mut draft.reduced_motion, "Reduced Motion", Some("Disables all animation."));
        switch(ui, colors, &mut draft.gpu_acceleration, "GPU Acceleration", None);
    }

    fn layout_tab(ui: &mut egui::Ui, colors: &ThemeColors, draft: &mut AppSettings) {
        section_title(ui, colors, "Interface Structure");

        group_label(ui, colors, "Component View Style");
        cards(ui, &mut draft.grid_style, &GridStyle::ALL, GridStyle::label);

        ui.add_space(8.0);
        choice(ui, "Navigation Style", &mut draft.navigation_style, &NavigationStyle::ALL, NavigationStyle::label);
        choice(ui, "Sidebar Position", &mut draft.sidebar_position, &SidebarPosition::ALL, SidebarPosition::label);
        choice(ui, "Detail Layout", &mut draft.layout_style, &LayoutStyle::ALL, LayoutStyle::label);

        group_label(ui, colors, "Page Container Width");
        cards(ui, &mut draft.content_width, &ContentWidth::ALL, ContentWidth::label);

        group_label(ui, colors, "Card Scale");
        let mut index = draft.card_size.index();
        let slider = egui::Slider::new(&mut index, 0..=2)
            .show_value(false)
            .text(format!("{:?}", draft.card_size));
        if ui.add(slider).changed() {
            draft.card_size = CardSize::from_index(index);
        }
    }

    fn performance_tab(ui: &mut egui::Ui, colors: &ThemeColors, draft: &mut AppSettings) {
        section_title(ui, colors, "System Optimization");
        ui.label(RichText::new("Optimization Advisor").strong().color(ui.visuals().warn_fg_color));
        ui.label(
            RichText::new(
                "Adjust these settings if you experience frame drops or high memory usage on your device.",
            )
            .small()
            .color(colors.text_muted),
        );
        ui.add_space(8.0);

        switch(ui, colors, &mut draft.disable_heavy_animations, "Disable Heavy Animations", None);
        switch(ui, colors, &mut draft.disable_3d, "Disable 3D Diagrams", None);
        switch(ui, colors, &mut draft.lazy_loading, "Lazy Loading", None);
        switch(ui, colors, &mut draft.image_preloading, "Image Preloading", None);
        switch(ui, colors, &mut draft.low_spec_mode, "Low Spec Mode", Some("Disables images for max speed."));

        group_label(ui, colors, "Animation FPS Target");
        ui.horizontal(|ui| {
            for fps in FPS_LIMIT_CHOICES {
                let label = if fps == 999 { "MAX".to_string() } else { fps.to_string() };
                let response = ui.selectable_label(draft.fps_limit == fps, RichText::new(&label).monospace());
                capture::track(ui, &response, &label, "", "fps-choice");
                if response.clicked() {
                    draft.fps_limit = fps;
                }
            }
        });

        ui.add_space(8.0);
        switch(
            ui,
            colors,
            &mut draft.low_power_mode,
            "Low Power Mode",
            Some("Aggressively reduces effects to conserve energy."),
        );
    }

    fn accessibility_tab(ui: &mut egui::Ui, colors: &ThemeColors, draft: &mut AppSettings) {
        section_title(ui, colors, "Accessibility & Readability");
        switch(ui, colors, &mut draft.high_contrast, "High Contrast Mode", None);
        switch(ui, colors, &mut draft.dyslexia_friendly, "Dyslexia-Friendly Font", None);
        switch(ui, colors, &mut draft.keyboard_nav, "Keyboard Navigation Hints", None);
        switch(ui, colors, &mut draft.screen_reader_hints, "Screen Reader Hints", None);
        switch(ui, colors, &mut draft.focus_highlight, "Focus Highlight", Some("Thick outlines on focus."));

        group_label(ui, colors, "Font Size Scale");
        ui.add(
            egui::Slider::new(&mut draft.font_size_scale, FONT_SCALE_RANGE)
                .step_by(0.05)
                .custom_formatter(|value, _| format!("{}%", (value * 100.0).round())),
        );
    }

    fn developer_tab(ui: &mut egui::Ui, colors: &ThemeColors, draft: &mut AppSettings) {
        section_title(ui, colors, "Developer Tools");
        switch(ui, colors, &mut draft.dev_mode, "Developer Mode", None);
        if !draft.dev_mode {
            ui.label(
                RichText::new("Enable developer mode to access debugging tools.")
                    .italics()
                    .color(colors.text_muted),
            );
            return;
        }
        ui.add_space(8.0);
        switch(ui, colors, &mut draft.show_system_terminal, "Interactive Terminal", Some("CLI with input & logging."));
        switch(ui, colors, &mut draft.show_source_code, "Source Code Terminal", Some("Inspect application source."));
        switch(ui, colors, &mut draft.wireframe_mode, "Wireframe Mode", Some("Strip styling for layout debug."));
        switch(ui, colors, &mut draft.show_component_data, "Show Component Data", Some("View raw JSON source."));
        switch(ui, colors, &mut draft.show_fps, "Show Real FPS", Some("Measures the frame rate."));
        switch(ui, colors, &mut draft.show_dom_inspector, "Widget Inspector", Some("Floating widget counter."));
        switch(ui, colors, &mut draft.show_grid_overlay, "Show Grid Overlay", None);
        switch(ui, colors, &mut draft.show_debug_outlines, "Debug Outlines", None);
        switch(ui, colors, &mut draft.show_component_boundaries, "Component Boundaries", None);
        switch(ui, colors, &mut draft.log_interactions, "Event Logger", Some("Log clicks to terminal"));
    }

    fn data_tab(&mut self, ui: &mut egui::Ui, colors: &ThemeColors) {
        section_title(ui, colors, "Data Persistence");

        let json = self.export_json();
        ui.horizontal(|ui| {
            ui.label(RichText::new("Export Configuration").strong());
            if capture::button(ui, "Copy to Clipboard", "copy-settings").clicked() {
                ui.ctx().copy_text(json.clone());
                self.notice = Some(Notice::new("Export", "Configuration copied to clipboard!"));
            }
            if capture::button(ui, "Save to File", "export-settings").clicked() {
                self.file.pending_export = Some(PendingExportOperation::ToFile);
            }
        });
        let font_id = egui::TextStyle::Monospace.resolve(ui.style());
        let job = highlighters::highlight_json(&json, font_id, ui.visuals().dark_mode);
        egui::Frame::new()
            .fill(colors.bg_element)
            .corner_radius(egui::CornerRadius::same(self.settings().border_radius))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("export_preview")
                    .max_height(160.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(job);
                    });
            });

        ui.add_space(12.0);
        ui.label(RichText::new("Import Configuration").strong());
        let mut layouter = |ui: &egui::Ui, text: &dyn egui::TextBuffer, wrap_width: f32| {
            highlighters::json_layouter(ui, text, wrap_width)
        };
        ui.add(
            egui::TextEdit::multiline(&mut self.panel.import_text)
                .hint_text("Paste JSON string here...")
                .code_editor()
                .desired_rows(4)
                .desired_width(f32::INFINITY)
                .layouter(&mut layouter),
        );
        ui.horizontal(|ui| {
            if capture::button(ui, "Import", "import-settings").clicked() {
                let text = self.panel.import_text.clone();
                if self.import_settings(&text) {
                    self.panel.import_text.clear();
                }
            }
            if capture::button(ui, "Import from File", "import-settings-file").clicked() {
                self.file.pending_import = Some(PendingImportOperation::FromFile);
            }
        });

        ui.add_space(12.0);
        ui.separator();
        ui.horizontal(|ui| {
            if capture::button(ui, "Reset Settings", "reset-settings").clicked() {
                self.request_confirm(PendingConfirmAction::ResetSettings);
            }
            if capture::button(ui, "Clear Storage", "clear-storage").clicked() {
                self.request_confirm(PendingConfirmAction::ClearStorage);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_parse_as_colors() {
        for (_, hex) in ACCENT_PRESETS {
            let color = parse_css_color(hex).expect("preset parses");
            assert_eq!(to_hex(color), hex);
        }
    }
}
