//! Header navigation and the dashboard, directory and about screens.

use super::capture;
use super::state::SpecsApp;
use super::theme::ThemeColors;
use crate::router::Route;
use crate::settings::{BackgroundStyle, GridStyle, NavigationStyle, SidebarPosition};
use eframe::egui::{self, RichText};

/// Top-level navigation targets: label, route, registry id.
const NAV_ITEMS: [(&str, Route, &str); 4] = [
    ("Dashboard", Route::Dashboard, "nav-dashboard"),
    ("Database", Route::Directory, "nav-directory"),
    ("Control Panel", Route::Settings, "nav-settings"),
    ("About Project", Route::About, "nav-about"),
];

impl SpecsApp {
    pub(super) fn colors(&self) -> ThemeColors {
        ThemeColors::resolve(&self.style)
    }

    /// Whether a nav item is highlighted; component pages count as part of the database.
    fn nav_active(&self, target: &Route) -> bool {
        match (self.router.current(), target) {
            (Route::ComponentDetail(_), Route::Directory) => true,
            (current, target) => current == target,
        }
    }

    fn uses_side_nav(&self) -> bool {
        let settings = self.settings();
        settings.navigation_style == NavigationStyle::Side
            && settings.sidebar_position != SidebarPosition::Hidden
    }

    pub(super) fn draw_header(&mut self, ui: &mut egui::Ui) {
        let colors = self.colors();
        ui.horizontal(|ui| {
            let brand = ui.add(
                egui::Label::new(
                    RichText::new("R4K1N SPECS")
                        .heading()
                        .strong()
                        .color(colors.primary),
                )
                .sense(egui::Sense::click()),
            );
            capture::track(ui, &brand, "R4K1N SPECS", "brand", "logo");
            if brand.clicked() {
                self.navigate(&Route::Dashboard);
            }
            ui.label(
                RichText::new(format!("v{} STATIC", env!("CARGO_PKG_VERSION")))
                    .small()
                    .monospace()
                    .color(colors.text_muted),
            );

            if !self.uses_side_nav() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for (label, route, id) in NAV_ITEMS.iter().rev() {
                        self.nav_button(ui, label, route, id);
                    }
                });
            }
        });
    }

    /// Side navigation panel, when the layout asks for one.
    pub(super) fn draw_side_nav(&mut self, ctx: &egui::Context) {
        if !self.uses_side_nav() {
            return;
        }
        let panel = match self.settings().sidebar_position {
            SidebarPosition::Right => egui::SidePanel::right("side_nav"),
            _ => egui::SidePanel::left("side_nav"),
        };
        panel.resizable(false).default_width(180.0).show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered_justified(|ui| {
                for (label, route, id) in NAV_ITEMS.iter() {
                    self.nav_button(ui, label, route, id);
                }
            });
        });
    }

    fn nav_button(&mut self, ui: &mut egui::Ui, label: &str, route: &Route, id: &str) {
        let active = self.nav_active(route);
        let response = capture::selectable(ui, active, label, id);
        if response.clicked() {
            self.navigate(route);
        }
    }

    /// Paints the page background behind the central panel.
    pub(super) fn draw_background(&self, ui: &egui::Ui) {
        let colors = self.colors();
        let rect = ui.max_rect();
        let painter = ui.painter();
        match self.settings().background_style {
            BackgroundStyle::Solid => {}
            BackgroundStyle::Gradient => {
                let mut mesh = egui::Mesh::default();
                let top = colors.bg_deep;
                let bottom = colors.bg_panel;
                mesh.colored_vertex(rect.left_top(), top);
                mesh.colored_vertex(rect.right_top(), top);
                mesh.colored_vertex(rect.left_bottom(), bottom);
                mesh.colored_vertex(rect.right_bottom(), bottom);
                mesh.add_triangle(0, 1, 2);
                mesh.add_triangle(1, 2, 3);
                painter.add(egui::Shape::mesh(mesh));
            }
            BackgroundStyle::Pattern => {
                let dot = colors.border;
                let step = 24.0;
                let mut y = rect.top();
                while y < rect.bottom() {
                    let mut x = rect.left();
                    while x < rect.right() {
                        painter.circle_filled(egui::pos2(x, y), 1.0, dot);
                        x += step;
                    }
                    y += step;
                }
            }
        }
    }

    pub(super) fn draw_dashboard(&mut self, ui: &mut egui::Ui) {
        let colors = self.colors();
        ui.add_space(24.0);
        ui.label(
            RichText::new("R4K1N TECH SPECS")
                .size(ui.style().text_styles[&egui::TextStyle::Heading].size * 2.0)
                .strong(),
        );
        ui.label(
            RichText::new(
                "The ultimate static reference architecture for PC engineering, hardware \
                 comparisons, and technical specifications.",
            )
            .color(colors.text_muted),
        );
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if capture::button(ui, "Access Database", "cta-directory").clicked() {
                self.navigate(&Route::Directory);
            }
            if capture::button(ui, "Configure UI", "cta-settings").clicked() {
                self.navigate(&Route::Settings);
            }
        });

        ui.add_space(24.0);
        ui.label(RichText::new("Featured Hardware Categories").strong());
        ui.add_space(8.0);
        let featured: Vec<&str> = self.catalog.featured().collect();
        ui.horizontal_wrapped(|ui| {
            for id in featured {
                self.category_card(ui, id, self.settings().card_size.width(), false);
            }
        });
    }

    pub(super) fn draw_directory(&mut self, ui: &mut egui::Ui) {
        let colors = self.colors();
        ui.add_space(16.0);
        ui.heading("Hardware Index");
        ui.label(
            RichText::new("Select a component category to view specifications.")
                .color(colors.text_muted),
        );
        ui.add_space(12.0);

        let categories = self.catalog.categories().to_vec();
        let width = self.settings().card_size.width();
        match self.settings().grid_style {
            GridStyle::List => {
                for id in &categories {
                    self.category_row(ui, id);
                }
            }
            GridStyle::Grid => {
                ui.horizontal_wrapped(|ui| {
                    for id in &categories {
                        self.category_card(ui, id, width, false);
                    }
                });
            }
            GridStyle::Compact => {
                ui.horizontal_wrapped(|ui| {
                    for id in &categories {
                        self.category_card(ui, id, width * 0.7, true);
                    }
                });
            }
        }
    }

    fn card_frame(&self, hovered: bool) -> egui::Frame {
        let colors = self.colors();
        let stroke_color = if hovered && self.settings().hover_effects {
            colors.primary
        } else {
            colors.border
        };
        egui::Frame::new()
            .fill(colors.bg_panel)
            .stroke(egui::Stroke::new(1.0, stroke_color))
            .corner_radius(egui::CornerRadius::same(self.settings().border_radius))
            .inner_margin(egui::Margin::same(12))
    }

    fn category_card(&mut self, ui: &mut egui::Ui, id: &str, width: f32, compact: bool) {
        let record = self.catalog.lookup(id);
        let colors = self.colors();
        let hover_id = ui.id().with(("card-hover", id));
        let hovered = ui.ctx().data(|d| d.get_temp::<bool>(hover_id)).unwrap_or(false);

        let inner = self.card_frame(hovered).show(ui, |ui| {
            ui.set_width(width);
            ui.label(
                RichText::new(id.to_uppercase())
                    .small()
                    .monospace()
                    .color(colors.primary),
            );
            let title = RichText::new(record.name.as_str()).strong();
            ui.label(if compact { title.small() } else { title });
            if !compact {
                ui.label(RichText::new(record.role.as_str()).color(colors.text_muted));
            }
        });
        let response = inner.response.interact(egui::Sense::click());
        ui.ctx()
            .data_mut(|d| d.insert_temp(hover_id, response.hovered()));
        capture::track(ui, &response, &record.name, &format!("card-{id}"), "card");
        if response.clicked() {
            self.navigate(&Route::ComponentDetail(id.to_string()));
        }
    }

    fn category_row(&mut self, ui: &mut egui::Ui, id: &str) {
        let record = self.catalog.lookup(id);
        let colors = self.colors();
        let inner = self.card_frame(false).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(record.name.as_str()).strong());
                ui.label(
                    RichText::new(format!("ID: {id}"))
                        .monospace()
                        .color(colors.text_muted),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new("→").color(colors.primary));
                });
            });
        });
        let response = inner.response.interact(egui::Sense::click());
        capture::track(ui, &response, &record.name, &format!("row-{id}"), "row");
        if response.clicked() {
            self.navigate(&Route::ComponentDetail(id.to_string()));
        }
        ui.add_space(4.0);
    }

    pub(super) fn draw_about(&mut self, ui: &mut egui::Ui) {
        let colors = self.colors();
        ui.add_space(16.0);
        self.card_frame(false).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Rashedusjjaman Rakin");
            ui.label(RichText::new("WEB DESIGN · DIPLOMA ENGINEERING").color(colors.primary));
            ui.label(
                RichText::new(format!("PROJECT VERSION {}", env!("CARGO_PKG_VERSION")))
                    .small()
                    .color(colors.text_muted),
            );
            ui.separator();

            ui.columns(2, |columns| {
                columns[0].label(RichText::new("Academic Profile").strong());
                info_rows(
                    &mut columns[0],
                    &[
                        ("Institute", "Dhaka Polytechnic Institute"),
                        ("Department", "Computer Science & Technology"),
                        ("Roll Number", "852511"),
                        ("Section", "B"),
                        ("Education", "Diploma in Engineering"),
                    ],
                );
                columns[1].label(RichText::new("Project Manifest").strong());
                info_rows(
                    &mut columns[1],
                    &[
                        ("Subject", "Web Design"),
                        ("Developer", "Rashedusjjaman Rakin"),
                        ("Tech Stack", "Rust, egui, eframe"),
                        ("Status", "Active / Production Ready"),
                    ],
                );
            });
            ui.separator();
            ui.label(
                RichText::new(
                    "\"Designed with precision to demonstrate advanced frontend architecture \
                     and component-based UI systems.\"",
                )
                .italics()
                .color(colors.text_muted),
            );
        });
    }
}

fn info_rows(ui: &mut egui::Ui, rows: &[(&str, &str)]) {
    egui::Grid::new(ui.id().with("info_rows"))
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for (label, value) in rows {
                ui.weak(*label);
                ui.label(*value);
                ui.end_row();
            }
        });
}
