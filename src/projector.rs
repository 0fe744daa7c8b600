//! Projection of the configuration record onto visual style.
//!
//! [`project`] is a pure function from [`AppSettings`] to a [`VisualStyle`]: a palette, a set
//! of named style variables and the style classes that should be active. The egui side
//! (`ui::theme`) turns a `VisualStyle` into `egui::Style`; nothing here depends on egui.

use crate::constants::{
    ACCENT_DIM_ALPHA, ACCENT_DIM_ALPHA_HEX, ANIMATION_DURATION_MS, BASE_FONT_SIZE_PX, CYBER_GOLD, CYBER_GOLD_DIM,
    DYSLEXIA_FONT_STACK, HIGH_CONTRAST_FACTOR,
};
use crate::settings::{AppSettings, ThemeMode, UiDensity};

/// Which fixed palette a theme mode selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    Light,
    Dark,
    CyberGold,
}

/// Surface and text colours of a palette, as CSS colour strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub kind: PaletteKind,
    pub bg_deep: &'static str,
    pub bg_surface: &'static str,
    pub bg_panel: &'static str,
    pub text_main: &'static str,
    pub text_muted: &'static str,
    pub border_base: &'static str,
    pub bg_element: &'static str,
    pub text_on_primary: &'static str,
}

const LIGHT_PALETTE: Palette = Palette {
    kind: PaletteKind::Light,
    bg_deep: "#f8fafc",
    bg_surface: "#ffffff",
    bg_panel: "#f1f5f9",
    text_main: "#0f172a",
    text_muted: "#64748b",
    border_base: "rgba(0, 0, 0, 0.1)",
    bg_element: "rgba(0, 0, 0, 0.05)",
    text_on_primary: "#ffffff",
};

const DARK_PALETTE: Palette = Palette {
    kind: PaletteKind::Dark,
    bg_deep: "#020617",
    bg_surface: "#0f172a",
    bg_panel: "#1e293b",
    text_main: "#f8fafc",
    text_muted: "#94a3b8",
    border_base: "rgba(255, 255, 255, 0.1)",
    bg_element: "rgba(0, 0, 0, 0.2)",
    text_on_primary: "#ffffff",
};

const CYBER_GOLD_PALETTE: Palette = Palette {
    kind: PaletteKind::CyberGold,
    bg_deep: "#050400",
    bg_surface: "#0a0900",
    bg_panel: "#141200",
    text_main: "#fff8e1",
    text_muted: "#c5b358",
    border_base: "rgba(255, 215, 0, 0.4)",
    bg_element: "rgba(255, 215, 0, 0.08)",
    text_on_primary: "#000000",
};

impl Palette {
    /// Palette selected by a theme mode. `Auto` keeps the dark palette.
    pub fn for_theme(mode: ThemeMode) -> &'static Palette {
        match mode {
            ThemeMode::Light => &LIGHT_PALETTE,
            ThemeMode::CyberGold => &CYBER_GOLD_PALETTE,
            ThemeMode::Dark | ThemeMode::Auto => &DARK_PALETTE,
        }
    }
}

/// Class names toggled by the projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleClass {
    DensityCompact,
    DensityNormal,
    DensityComfortable,
    /// Developer grid overlay
    DebugGrid,
    /// Developer widget outlines
    DebugScreens,
    /// Developer component boundaries
    DebugBoundaries,
    /// Developer wireframe rendering
    Wireframe,
}

impl StyleClass {
    /// The three mutually exclusive density classes.
    pub const DENSITY: [StyleClass; 3] = [
        Self::DensityCompact,
        Self::DensityNormal,
        Self::DensityComfortable,
    ];

    /// Classes that only apply while developer mode is on.
    pub const DEVELOPER: [StyleClass; 4] = [
        Self::DebugGrid,
        Self::DebugScreens,
        Self::DebugBoundaries,
        Self::Wireframe,
    ];

    /// Density class for a density setting.
    pub fn for_density(density: UiDensity) -> Self {
        match density {
            UiDensity::Compact => Self::DensityCompact,
            UiDensity::Normal => Self::DensityNormal,
            UiDensity::Comfortable => Self::DensityComfortable,
        }
    }

    /// CSS-style class name.
    pub fn name(self) -> &'static str {
        match self {
            Self::DensityCompact => "density-compact",
            Self::DensityNormal => "density-normal",
            Self::DensityComfortable => "density-comfortable",
            Self::DebugGrid => "debug-grid",
            Self::DebugScreens => "debug-screens",
            Self::DebugBoundaries => "debug-boundaries",
            Self::Wireframe => "wireframe",
        }
    }
}

/// Everything the configuration contributes to the look of the app.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualStyle {
    pub palette: &'static Palette,
    /// Accent colour (user choice, or gold under cyber-gold)
    pub primary: String,
    /// Accent at reduced opacity
    pub primary_dim: String,
    /// Transition duration; zero when heavy animations or power use are restricted
    pub animation_ms: u32,
    pub radius_px: u8,
    pub font_stack: String,
    /// Whether the chosen face is monospaced (ignored under the dyslexia override)
    pub monospace: bool,
    pub font_size_px: f32,
    /// Contrast multiplier, `None` when the filter is off
    pub contrast: Option<f32>,
    pub density: StyleClass,
    pub debug_grid: bool,
    pub debug_outlines: bool,
    pub debug_boundaries: bool,
    pub wireframe: bool,
}

impl VisualStyle {
    /// Named style variables, in the form the web build writes onto the document root.
    pub fn vars(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--primary", self.primary.clone()),
            ("--primary-dim", self.primary_dim.clone()),
            ("--anim-speed", format_duration(self.animation_ms)),
            ("--radius", format!("{}px", self.radius_px)),
            ("--font-stack", self.font_stack.clone()),
            ("--bg-deep", self.palette.bg_deep.to_string()),
            ("--bg-surface", self.palette.bg_surface.to_string()),
            ("--bg-panel", self.palette.bg_panel.to_string()),
            ("--text-main", self.palette.text_main.to_string()),
            ("--text-muted", self.palette.text_muted.to_string()),
            ("--border-base", self.palette.border_base.to_string()),
            ("--bg-element", self.palette.bg_element.to_string()),
            ("--text-on-primary", self.palette.text_on_primary.to_string()),
            ("font-size", format!("{}px", self.font_size_px)),
            (
                "filter",
                match self.contrast {
                    Some(factor) => format!("contrast({factor})"),
                    None => "none".to_string(),
                },
            ),
        ]
    }

    /// Looks up a single style variable by name.
    pub fn var(&self, name: &str) -> Option<String> {
        self.vars()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Classes this style turns on.
    pub fn classes(&self) -> Vec<StyleClass> {
        let mut classes = vec![self.density];
        for (enabled, class) in [
            (self.debug_grid, StyleClass::DebugGrid),
            (self.debug_outlines, StyleClass::DebugScreens),
            (self.debug_boundaries, StyleClass::DebugBoundaries),
            (self.wireframe, StyleClass::Wireframe),
        ] {
            if enabled {
                classes.push(class);
            }
        }
        classes
    }
}

fn format_duration(ms: u32) -> String {
    if ms == 0 {
        "0s".to_string()
    } else {
        format!("{ms}ms")
    }
}

/// Parses a CSS colour (`#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`) into unmultiplied
/// RGBA bytes.
pub fn parse_css_rgba(input: &str) -> Option<[u8; 4]> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let (args, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = s.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    match (parts.as_slice(), has_alpha) {
        ([r, g, b], false) => Some([r.parse().ok()?, g.parse().ok()?, b.parse().ok()?, 255]),
        ([r, g, b, a], true) => {
            let alpha: f32 = a.parse().ok()?;
            Some([
                r.parse().ok()?,
                g.parse().ok()?,
                b.parse().ok()?,
                (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ])
        }
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 4]> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    match hex.len() {
        3 => Some([nibble(0)?, nibble(1)?, nibble(2)?, 255]),
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

/// Derives the dim accent: the same colour at a fixed low opacity.
///
/// Hex accents keep hex form with an alpha suffix; functional accents become `rgba()`.
/// Strings that do not parse as a colour are passed through.
fn dim_accent(accent: &str) -> String {
    let accent = accent.trim();
    let Some([r, g, b, _]) = parse_css_rgba(accent) else {
        return accent.to_string();
    };
    if accent.starts_with('#') {
        format!("#{r:02x}{g:02x}{b:02x}{ACCENT_DIM_ALPHA_HEX}")
    } else {
        format!("rgba({r}, {g}, {b}, {ACCENT_DIM_ALPHA})")
    }
}

/// Projects the configuration record onto a visual style.
///
/// Two overrides are intentional and must stay: the cyber-gold theme replaces the user's
/// accent with gold, and the dyslexia-friendly flag replaces the chosen font family.
/// Developer-only classes require `dev_mode`; their individual flags are inert without it.
pub fn project(settings: &AppSettings) -> VisualStyle {
    let palette = Palette::for_theme(settings.theme_mode);

    let (primary, primary_dim) = if palette.kind == PaletteKind::CyberGold {
        (CYBER_GOLD.to_string(), CYBER_GOLD_DIM.to_string())
    } else {
        (
            settings.accent_color.clone(),
            dim_accent(&settings.accent_color),
        )
    };

    let animation_ms = if settings.disable_heavy_animations || settings.low_power_mode {
        0
    } else {
        ANIMATION_DURATION_MS
    };

    let (font_stack, monospace) = if settings.dyslexia_friendly {
        (DYSLEXIA_FONT_STACK.to_string(), false)
    } else {
        (
            settings.font_family.label().to_string(),
            settings.font_family.is_monospace(),
        )
    };

    let dev = settings.dev_mode;
    VisualStyle {
        palette,
        primary,
        primary_dim,
        animation_ms,
        radius_px: settings.border_radius,
        font_stack,
        monospace,
        font_size_px: settings.font_size_scale * BASE_FONT_SIZE_PX,
        contrast: settings.high_contrast.then_some(HIGH_CONTRAST_FACTOR),
        density: StyleClass::for_density(settings.ui_density),
        debug_grid: dev && settings.show_grid_overlay,
        debug_outlines: dev && settings.show_debug_outlines,
        debug_boundaries: dev && settings.show_component_boundaries,
        wireframe: dev && settings.wireframe_mode,
    }
}

/// The set of projector-owned classes currently applied to the root surface.
///
/// Mirrors a DOM class list: [`apply`](Self::apply) removes the classes a new projection no
/// longer wants before adding the ones it does, so exactly one density class is ever present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<StyleClass>,
}

impl ClassList {
    /// Returns true if the class is present.
    pub fn contains(&self, class: StyleClass) -> bool {
        self.classes.contains(&class)
    }

    /// Classes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = StyleClass> + '_ {
        self.classes.iter().copied()
    }

    fn add(&mut self, class: StyleClass) {
        if !self.contains(class) {
            self.classes.push(class);
        }
    }

    fn remove(&mut self, class: StyleClass) {
        self.classes.retain(|c| *c != class);
    }

    /// Brings the list in line with a projected style.
    pub fn apply(&mut self, style: &VisualStyle) {
        for class in StyleClass::DENSITY {
            if class != style.density {
                self.remove(class);
            }
        }
        self.add(style.density);

        let wanted = style.classes();
        for class in StyleClass::DEVELOPER {
            if wanted.contains(&class) {
                self.add(class);
            } else {
                self.remove(class);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_sets_light_palette_and_keeps_accent() {
        let settings = AppSettings {
            theme_mode: ThemeMode::Light,
            ..Default::default()
        };
        let style = project(&settings);
        assert_eq!(style.palette.kind, PaletteKind::Light);
        assert_eq!(style.var("--bg-deep").as_deref(), Some("#f8fafc"));
        assert_eq!(style.var("--text-main").as_deref(), Some("#0f172a"));
        assert_eq!(style.primary, "#3b82f6");
        assert_eq!(style.primary_dim, "#3b82f620");
    }

    #[test]
    fn cyber_gold_overrides_accent() {
        for accent in ["#ef4444", "#10b981", "rgb(1, 2, 3)"] {
            let settings = AppSettings {
                theme_mode: ThemeMode::CyberGold,
                accent_color: accent.to_string(),
                ..Default::default()
            };
            let style = project(&settings);
            assert_eq!(style.primary, CYBER_GOLD);
            assert_eq!(style.primary_dim, CYBER_GOLD_DIM);
            assert_eq!(style.palette.text_on_primary, "#000000");
        }
    }

    #[test]
    fn auto_theme_uses_dark_palette() {
        let settings = AppSettings {
            theme_mode: ThemeMode::Auto,
            ..Default::default()
        };
        assert_eq!(project(&settings).palette.kind, PaletteKind::Dark);
    }

    #[test]
    fn animation_speed_zero_when_restricted() {
        let base = AppSettings::default();
        assert_eq!(project(&base).var("--anim-speed").as_deref(), Some("300ms"));

        let heavy = AppSettings {
            disable_heavy_animations: true,
            ..Default::default()
        };
        assert_eq!(project(&heavy).animation_ms, 0);

        let low_power = AppSettings {
            low_power_mode: true,
            ..Default::default()
        };
        assert_eq!(project(&low_power).var("--anim-speed").as_deref(), Some("0s"));
    }

    #[test]
    fn dyslexia_flag_overrides_font_family() {
        let settings = AppSettings {
            font_family: crate::settings::FontFamily::JetBrainsMono,
            dyslexia_friendly: true,
            ..Default::default()
        };
        let style = project(&settings);
        assert_eq!(style.font_stack, DYSLEXIA_FONT_STACK);
        assert!(!style.monospace);
    }

    #[test]
    fn font_scale_multiplies_base_size() {
        let settings = AppSettings {
            font_size_scale: 1.5,
            ..Default::default()
        };
        assert_eq!(project(&settings).font_size_px, 24.0);
    }

    #[test]
    fn high_contrast_toggles_filter() {
        let settings = AppSettings {
            high_contrast: true,
            ..Default::default()
        };
        assert_eq!(
            project(&settings).var("filter").as_deref(),
            Some("contrast(1.25)")
        );
        assert_eq!(
            project(&AppSettings::default()).var("filter").as_deref(),
            Some("none")
        );
    }

    #[test]
    fn developer_classes_are_gated_by_dev_mode() {
        let settings = AppSettings {
            dev_mode: false,
            show_debug_outlines: true,
            show_grid_overlay: true,
            ..Default::default()
        };
        let style = project(&settings);
        assert!(!style.debug_outlines);
        assert!(!style.classes().contains(&StyleClass::DebugScreens));
        assert!(!style.classes().contains(&StyleClass::DebugGrid));

        let enabled = AppSettings {
            dev_mode: true,
            ..settings
        };
        let style = project(&enabled);
        assert!(style.classes().contains(&StyleClass::DebugScreens));
        assert!(style.classes().contains(&StyleClass::DebugGrid));
    }

    #[test]
    fn class_list_keeps_exactly_one_density() {
        let mut list = ClassList::default();
        for density in [UiDensity::Compact, UiDensity::Comfortable, UiDensity::Normal] {
            let settings = AppSettings {
                ui_density: density,
                ..Default::default()
            };
            list.apply(&project(&settings));
            let densities: Vec<_> = list
                .iter()
                .filter(|c| StyleClass::DENSITY.contains(c))
                .collect();
            assert_eq!(densities, vec![StyleClass::for_density(density)]);
        }
    }

    #[test]
    fn class_list_drops_developer_classes_when_dev_mode_turns_off() {
        let mut list = ClassList::default();
        let on = AppSettings {
            dev_mode: true,
            show_debug_outlines: true,
            ..Default::default()
        };
        list.apply(&project(&on));
        assert!(list.contains(StyleClass::DebugScreens));

        let off = AppSettings {
            dev_mode: false,
            ..on
        };
        list.apply(&project(&off));
        assert!(!list.contains(StyleClass::DebugScreens));
    }

    #[test]
    fn dim_accent_handles_short_and_long_hex() {
        assert_eq!(dim_accent("#abc"), "#aabbcc20");
        assert_eq!(dim_accent("#10b981ff"), "#10b98120");
    }

    #[test]
    fn functional_accent_gets_a_dim_rgba_variant() {
        let settings = AppSettings {
            accent_color: "rgb(16, 185, 129)".to_string(),
            ..Default::default()
        };
        let style = project(&settings);
        assert_eq!(style.primary, "rgb(16, 185, 129)");
        assert_eq!(style.primary_dim, "rgba(16, 185, 129, 0.125)");
        assert_ne!(style.primary, style.primary_dim);
        assert_eq!(parse_css_rgba(&style.primary_dim), Some([16, 185, 129, 32]));

        assert_eq!(dim_accent("rgba(1, 2, 3, 0.9)"), "rgba(1, 2, 3, 0.125)");
    }

    #[test]
    fn unparseable_accent_passes_through() {
        assert_eq!(dim_accent("rebeccapurple"), "rebeccapurple");
    }
}
