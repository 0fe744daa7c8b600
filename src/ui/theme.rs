//! Realizes a projected [`VisualStyle`] as an egui style.
//!
//! Colours arrive as CSS strings (`#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`); anything
//! that does not parse falls back to the palette default of the current egui visuals.

use crate::projector::{parse_css_rgba, PaletteKind, StyleClass, VisualStyle};
use eframe::egui::{self, Color32};

/// Parses a CSS colour string.
pub fn parse_css_color(input: &str) -> Option<Color32> {
    parse_css_rgba(input).map(|[r, g, b, a]| Color32::from_rgba_unmultiplied(r, g, b, a))
}

/// Scales each channel's distance from mid-grey, like a CSS `contrast()` filter.
pub fn apply_contrast(color: Color32, factor: f32) -> Color32 {
    let adjust = |c: u8| (((f32::from(c) / 255.0 - 0.5) * factor + 0.5).clamp(0.0, 1.0) * 255.0).round() as u8;
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color32::from_rgba_unmultiplied(adjust(r), adjust(g), adjust(b), a)
}

/// Colours resolved from a visual style, after the contrast filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub primary: Color32,
    pub primary_dim: Color32,
    pub bg_deep: Color32,
    pub bg_surface: Color32,
    pub bg_panel: Color32,
    pub text_main: Color32,
    pub text_muted: Color32,
    pub border: Color32,
    pub bg_element: Color32,
    pub text_on_primary: Color32,
}

impl ThemeColors {
    /// Resolves every colour of the style, substituting `fallback` where a string is invalid.
    pub fn resolve(style: &VisualStyle) -> Self {
        let fallback = if style.palette.kind == PaletteKind::Light {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        let color = |css: &str, default: Color32| {
            let c = parse_css_color(css).unwrap_or(default);
            match style.contrast {
                Some(factor) => apply_contrast(c, factor),
                None => c,
            }
        };
        let accent = fallback.selection.bg_fill;
        Self {
            primary: color(&style.primary, accent),
            primary_dim: color(&style.primary_dim, accent.gamma_multiply(0.15)),
            bg_deep: color(style.palette.bg_deep, fallback.panel_fill),
            bg_surface: color(style.palette.bg_surface, fallback.window_fill),
            bg_panel: color(style.palette.bg_panel, fallback.faint_bg_color),
            text_main: color(style.palette.text_main, fallback.text_color()),
            text_muted: color(style.palette.text_muted, fallback.weak_text_color()),
            border: color(style.palette.border_base, fallback.window_stroke.color),
            bg_element: color(style.palette.bg_element, fallback.extreme_bg_color),
            text_on_primary: color(style.palette.text_on_primary, Color32::WHITE),
        }
    }
}

/// Builds the egui style for a projected visual style.
///
/// Text sizes are scaled from egui's defaults rather than from `base`, so repeated
/// application never compounds.
pub fn build_style(base: &egui::Style, style: &VisualStyle) -> egui::Style {
    let colors = ThemeColors::resolve(style);
    let mut out = base.clone();

    let mut visuals = if style.palette.kind == PaletteKind::Light {
        egui::Visuals::light()
    } else {
        egui::Visuals::dark()
    };
    visuals.override_text_color = Some(colors.text_main);
    visuals.panel_fill = colors.bg_deep;
    visuals.window_fill = colors.bg_surface;
    visuals.faint_bg_color = colors.bg_panel;
    visuals.extreme_bg_color = colors.bg_panel;
    visuals.code_bg_color = colors.bg_element;
    visuals.window_stroke.color = colors.border;
    visuals.hyperlink_color = colors.primary;
    visuals.selection.bg_fill = colors.primary;
    visuals.selection.stroke.color = colors.text_on_primary;

    let radius = egui::CornerRadius::same(style.radius_px);
    visuals.window_corner_radius = radius;
    visuals.menu_corner_radius = radius;
    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        widget.corner_radius = radius;
    }
    visuals.widgets.noninteractive.bg_stroke.color = colors.border;
    visuals.widgets.noninteractive.bg_fill = colors.bg_surface;
    visuals.widgets.inactive.weak_bg_fill = colors.bg_element;
    visuals.widgets.hovered.bg_stroke.color = colors.primary;
    visuals.widgets.active.bg_fill = colors.primary;
    visuals.widgets.active.weak_bg_fill = colors.primary;

    if style.wireframe {
        visuals.panel_fill = Color32::TRANSPARENT;
        visuals.window_fill = Color32::TRANSPARENT;
        for widget in [
            &mut visuals.widgets.noninteractive,
            &mut visuals.widgets.inactive,
            &mut visuals.widgets.hovered,
            &mut visuals.widgets.active,
        ] {
            widget.bg_fill = Color32::TRANSPARENT;
            widget.weak_bg_fill = Color32::TRANSPARENT;
            widget.bg_stroke = egui::Stroke::new(1.0, colors.text_muted);
        }
    }
    out.visuals = visuals;

    out.animation_time = style.animation_ms as f32 / 1000.0;

    let defaults = egui::Style::default();
    out.spacing = defaults.spacing.clone();
    match style.density {
        StyleClass::DensityCompact => {
            out.spacing.item_spacing = egui::vec2(4.0, 2.0);
            out.spacing.button_padding = egui::vec2(3.0, 1.0);
        }
        StyleClass::DensityComfortable => {
            out.spacing.item_spacing = egui::vec2(12.0, 8.0);
            out.spacing.button_padding = egui::vec2(8.0, 4.0);
        }
        _ => {}
    }

    let scale = style.font_size_px / crate::constants::BASE_FONT_SIZE_PX;
    out.text_styles = defaults
        .text_styles
        .iter()
        .map(|(text_style, font)| {
            let family = if style.monospace && *text_style != egui::TextStyle::Heading {
                egui::FontFamily::Monospace
            } else {
                font.family.clone()
            };
            (text_style.clone(), egui::FontId::new(font.size * scale, family))
        })
        .collect();

    out
}

/// Applies a visual style to the context.
pub fn apply(ctx: &egui::Context, style: &VisualStyle) {
    let theme = if style.palette.kind == PaletteKind::Light {
        egui::Theme::Light
    } else {
        egui::Theme::Dark
    };
    ctx.set_theme(theme);
    let built = build_style(&ctx.style(), style);
    ctx.set_style(built);
}
