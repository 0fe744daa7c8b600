//! The configuration record and the store that loads, updates and persists it.
//!
//! The whole record is persisted as a single JSON blob under
//! [`SETTINGS_STORAGE_KEY`](crate::constants::SETTINGS_STORAGE_KEY). Serialized keys use the
//! camelCase names of the web build (`themeMode`, `accentColor`, ...) so a blob copied out of
//! the browser can be imported natively and the other way round.

use crate::constants::{FONT_SCALE_RANGE, MAX_BORDER_RADIUS, SETTINGS_STORAGE_KEY};
use serde::{Deserialize, Serialize};

/// Colour scheme selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    /// Light palette
    Light,
    /// Dark palette
    Dark,
    /// Follows the dark palette
    Auto,
    /// Black and gold palette with an enforced gold accent
    CyberGold,
}

impl ThemeMode {
    /// All theme modes in display order.
    pub const ALL: [ThemeMode; 4] = [Self::Light, Self::Dark, Self::Auto, Self::CyberGold];

    /// Human-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Auto => "Auto",
            Self::CyberGold => "Cyber Gold",
        }
    }
}

/// Page background treatment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundStyle {
    /// Flat fill
    Solid,
    /// Vertical gradient
    Gradient,
    /// Dotted pattern
    Pattern,
}

impl BackgroundStyle {
    /// All background styles in display order.
    pub const ALL: [BackgroundStyle; 3] = [Self::Solid, Self::Gradient, Self::Pattern];

    /// Human-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Gradient => "gradient",
            Self::Pattern => "pattern",
        }
    }
}

/// Spacing density of the interface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UiDensity {
    /// Generous spacing
    Comfortable,
    /// Default spacing
    Normal,
    /// Tight spacing
    Compact,
}

impl UiDensity {
    /// All densities in display order.
    pub const ALL: [UiDensity; 3] = [Self::Comfortable, Self::Normal, Self::Compact];

    /// Human-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Comfortable => "comfortable",
            Self::Normal => "normal",
            Self::Compact => "compact",
        }
    }
}

/// Interface typeface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FontFamily {
    /// Inter
    Inter,
    /// JetBrains Mono
    #[serde(rename = "JetBrains Mono")]
    JetBrainsMono,
    /// Orbitron
    Orbitron,
    /// Montserrat
    Montserrat,
    /// Lato
    Lato,
    /// Playfair Display
    #[serde(rename = "Playfair Display")]
    PlayfairDisplay,
}

impl FontFamily {
    /// All font families in display order.
    pub const ALL: [FontFamily; 6] = [
        Self::Inter,
        Self::JetBrainsMono,
        Self::Orbitron,
        Self::Montserrat,
        Self::Lato,
        Self::PlayfairDisplay,
    ];

    /// Family name as it appears in a font stack.
    pub fn label(self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::JetBrainsMono => "JetBrains Mono",
            Self::Orbitron => "Orbitron",
            Self::Montserrat => "Montserrat",
            Self::Lato => "Lato",
            Self::PlayfairDisplay => "Playfair Display",
        }
    }

    /// Whether the family is monospaced.
    pub fn is_monospace(self) -> bool {
        matches!(self, Self::JetBrainsMono)
    }
}

/// Scroll behaviour for long pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollBehavior {
    /// Animated scrolling
    Smooth,
    /// Instant scrolling
    Auto,
}

/// Arrangement of the hardware directory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GridStyle {
    /// Card grid
    Grid,
    /// One row per category
    List,
    /// Dense card grid
    Compact,
}

impl GridStyle {
    /// All grid styles in display order.
    pub const ALL: [GridStyle; 3] = [Self::Grid, Self::List, Self::Compact];

    /// Human-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::List => "List",
            Self::Compact => "Compact",
        }
    }
}

/// Where the navigation sidebar is docked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarPosition {
    /// Docked left
    Left,
    /// Docked right
    Right,
    /// Not shown
    Hidden,
}

impl SidebarPosition {
    /// All sidebar positions in display order.
    pub const ALL: [SidebarPosition; 3] = [Self::Left, Self::Right, Self::Hidden];

    /// Human-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Hidden => "hidden",
        }
    }
}

/// Placement of the primary navigation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationStyle {
    /// Header bar
    Top,
    /// Side panel
    Side,
}

impl NavigationStyle {
    /// All navigation styles in display order.
    pub const ALL: [NavigationStyle; 2] = [Self::Top, Self::Side];

    /// Human-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Side => "side",
        }
    }
}

/// Layout of the component detail hero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStyle {
    /// Text and schematic side by side
    TwoColumn,
    /// Text above schematic
    Stacked,
}

impl LayoutStyle {
    /// All layout styles in display order.
    pub const ALL: [LayoutStyle; 2] = [Self::TwoColumn, Self::Stacked];

    /// Human-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            Self::TwoColumn => "two-column",
            Self::Stacked => "stacked",
        }
    }
}

/// Size of directory cards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CardSize {
    /// Small cards
    Small,
    /// Medium cards
    Medium,
    /// Large cards
    Large,
}

impl CardSize {
    /// Card width in points.
    pub fn width(self) -> f32 {
        match self {
            Self::Small => 150.0,
            Self::Medium => 200.0,
            Self::Large => 260.0,
        }
    }

    /// Position on the card scale slider.
    pub fn index(self) -> u8 {
        match self {
            Self::Small => 0,
            Self::Medium => 1,
            Self::Large => 2,
        }
    }

    /// Inverse of [`CardSize::index`], saturating at `Large`.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Small,
            1 => Self::Medium,
            _ => Self::Large,
        }
    }
}

/// Maximum width of the page container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContentWidth {
    /// Centered column
    Standard,
    /// Wider column
    Wide,
    /// Whole window
    Full,
}

impl ContentWidth {
    /// All widths in display order.
    pub const ALL: [ContentWidth; 3] = [Self::Standard, Self::Wide, Self::Full];

    /// Human-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Wide => "wide",
            Self::Full => "full",
        }
    }

    /// Maximum container width in points, `None` for unbounded.
    pub fn max_width(self) -> Option<f32> {
        match self {
            Self::Standard => Some(1280.0),
            Self::Wide => Some(1600.0),
            Self::Full => None,
        }
    }
}

/// Frame rate caps offered in the performance tab; `999` means unlimited.
pub const FPS_LIMIT_CHOICES: [u32; 5] = [30, 60, 120, 144, 999];

/// The full set of user-adjustable display and behaviour options.
///
/// Missing keys are filled from [`AppSettings::default`] while deserializing, so a stored
/// record is always fully populated once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    // Theme
    pub theme_mode: ThemeMode,
    pub accent_color: String,
    pub background_style: BackgroundStyle,
    /// Corner radius in pixels, 0 to 20
    pub border_radius: u8,
    pub ui_density: UiDensity,
    pub font_family: FontFamily,

    // Animation
    pub page_transitions: bool,
    pub component_fade_ins: bool,
    pub diagram_animations: bool,
    pub performance_meter_animations: bool,
    pub hover_effects: bool,
    pub parallax_effects: bool,
    pub reduced_motion: bool,
    pub gpu_acceleration: bool,
    pub scroll_behavior: ScrollBehavior,

    // Layout
    pub grid_style: GridStyle,
    pub sidebar_position: SidebarPosition,
    pub navigation_style: NavigationStyle,
    pub layout_style: LayoutStyle,
    pub card_size: CardSize,
    pub content_width: ContentWidth,

    // Performance
    pub disable_heavy_animations: bool,
    #[serde(rename = "disable3D")]
    pub disable_3d: bool,
    pub lazy_loading: bool,
    pub image_preloading: bool,
    pub fps_limit: u32,
    pub low_power_mode: bool,
    pub low_spec_mode: bool,

    // Accessibility
    pub high_contrast: bool,
    pub dyslexia_friendly: bool,
    /// Multiplier on the root font size, 0.8 to 1.5
    pub font_size_scale: f32,
    pub keyboard_nav: bool,
    pub screen_reader_hints: bool,
    pub focus_highlight: bool,

    // Developer
    pub dev_mode: bool,
    pub show_component_data: bool,
    #[serde(rename = "showFPS")]
    pub show_fps: bool,
    pub show_grid_overlay: bool,
    pub show_debug_outlines: bool,
    pub show_component_boundaries: bool,
    pub show_system_terminal: bool,
    pub show_source_code: bool,
    pub wireframe_mode: bool,
    pub show_dom_inspector: bool,
    pub log_interactions: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Dark,
            accent_color: "#3b82f6".to_string(),
            background_style: BackgroundStyle::Pattern,
            border_radius: 4,
            ui_density: UiDensity::Normal,
            font_family: FontFamily::Inter,

            page_transitions: true,
            component_fade_ins: true,
            diagram_animations: true,
            performance_meter_animations: true,
            hover_effects: true,
            parallax_effects: false,
            reduced_motion: false,
            gpu_acceleration: true,
            scroll_behavior: ScrollBehavior::Smooth,

            grid_style: GridStyle::Grid,
            sidebar_position: SidebarPosition::Hidden,
            navigation_style: NavigationStyle::Top,
            layout_style: LayoutStyle::TwoColumn,
            card_size: CardSize::Medium,
            content_width: ContentWidth::Standard,

            disable_heavy_animations: false,
            disable_3d: false,
            lazy_loading: true,
            image_preloading: false,
            fps_limit: 60,
            low_power_mode: false,
            low_spec_mode: false,

            high_contrast: false,
            dyslexia_friendly: false,
            font_size_scale: 1.0,
            keyboard_nav: false,
            screen_reader_hints: true,
            focus_highlight: false,

            dev_mode: false,
            show_component_data: false,
            show_fps: false,
            show_grid_overlay: false,
            show_debug_outlines: false,
            show_component_boundaries: false,
            show_system_terminal: false,
            show_source_code: false,
            wireframe_mode: false,
            show_dom_inspector: false,
            log_interactions: false,
        }
    }
}

impl AppSettings {
    /// Deserializes a configuration record from JSON.
    ///
    /// Missing keys take their default value; a present key with the wrong type fails the
    /// whole record. Out-of-range scalars are clamped.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.clamp_ranges();
        Ok(settings)
    }

    /// Pulls the bounded scalars back into the range the settings panel offers.
    ///
    /// A non-finite font scale falls back to the default.
    pub fn clamp_ranges(&mut self) {
        self.font_size_scale = if self.font_size_scale.is_finite() {
            self.font_size_scale
                .clamp(*FONT_SCALE_RANGE.start(), *FONT_SCALE_RANGE.end())
        } else {
            Self::default().font_size_scale
        };
        self.border_radius = self.border_radius.min(MAX_BORDER_RADIUS);
    }

    /// Serializes the record to compact JSON, the persisted form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the record to indented JSON, the export form.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Names of the fields touched by an update, in serialized (camelCase) form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsChange {
    pub changed: Vec<String>,
}

impl SettingsChange {
    /// Returns true if no field changed value.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    /// Returns true if the named (camelCase) field changed.
    pub fn touches(&self, field: &str) -> bool {
        self.changed.iter().any(|f| f == field)
    }

    /// One-line description for the developer log.
    pub fn describe(&self) -> String {
        format!("Updated: {}", self.changed.join(", "))
    }
}

/// Computes the serialized names of every field whose value differs between two records.
fn changed_fields(old: &AppSettings, new: &AppSettings) -> Vec<String> {
    let (Ok(serde_json::Value::Object(old)), Ok(serde_json::Value::Object(new))) =
        (serde_json::to_value(old), serde_json::to_value(new))
    else {
        return Vec::new();
    };
    new.iter()
        .filter(|(key, value)| old.get(key.as_str()) != Some(value))
        .map(|(key, _)| key.clone())
        .collect()
}

/// Owner of the configuration record.
///
/// All mutation goes through [`update`](Self::update), [`merge_json`](Self::merge_json) and
/// [`reset`](Self::reset); callers persist with [`persist`](Self::persist) after a non-empty
/// change.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: AppSettings,
}

impl SettingsStore {
    /// Creates a store holding the given record.
    pub fn new(settings: AppSettings) -> Self {
        Self { settings }
    }

    /// Loads the persisted record, falling back to defaults when the blob is absent or
    /// does not parse. Never fails.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let Some(blob) = storage.and_then(|s| s.get_string(SETTINGS_STORAGE_KEY)) else {
            log::debug!("No persisted settings found, using defaults");
            return Self::default();
        };
        if blob.trim().is_empty() {
            return Self::default();
        }
        match AppSettings::from_json(&blob) {
            Ok(settings) => {
                log::debug!("Loaded persisted settings ({} bytes)", blob.len());
                Self::new(settings)
            }
            Err(err) => {
                log::warn!("Discarding malformed persisted settings: {err}");
                Self::default()
            }
        }
    }

    /// Current record.
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Applies whole-field overrides to a working copy and commits it.
    ///
    /// The working copy is clamped with [`AppSettings::clamp_ranges`] before the commit.
    ///
    /// # Returns
    ///
    /// The names of the fields whose value changed. Empty when the closure was a no-op.
    pub fn update(&mut self, apply: impl FnOnce(&mut AppSettings)) -> SettingsChange {
        let mut next = self.settings.clone();
        apply(&mut next);
        next.clamp_ranges();
        let changed = changed_fields(&self.settings, &next);
        self.settings = next;
        SettingsChange { changed }
    }

    /// Overlays the keys of a JSON object onto the current record.
    ///
    /// Unknown keys are ignored. Input that is not a JSON object, or that carries a known key
    /// with a value of the wrong type, is rejected and the record is left untouched.
    pub fn merge_json(&mut self, json: &str) -> Result<SettingsChange, String> {
        let patch: serde_json::Value =
            serde_json::from_str(json).map_err(|e| format!("Invalid JSON: {e}"))?;
        let serde_json::Value::Object(patch) = patch else {
            return Err("Configuration must be a JSON object".to_string());
        };
        let mut merged = match serde_json::to_value(&self.settings) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => serde_json::Map::new(),
            Err(e) => return Err(e.to_string()),
        };
        merged.extend(patch);
        let next: AppSettings = serde_json::from_value(serde_json::Value::Object(merged))
            .map_err(|e| format!("Invalid configuration: {e}"))?;
        Ok(self.update(|s| *s = next))
    }

    /// Replaces the whole record with the defaults.
    pub fn reset(&mut self) -> SettingsChange {
        self.update(|s| *s = AppSettings::default())
    }

    /// Writes the full record under the fixed storage key and flushes.
    pub fn persist(&self, storage: &mut dyn eframe::Storage) {
        match self.settings.to_json() {
            Ok(json) => {
                storage.set_string(SETTINGS_STORAGE_KEY, json);
                storage.flush();
            }
            Err(err) => log::error!("Failed to serialize settings: {err}"),
        }
    }

    /// Overwrites the persisted blob with an empty value so the next load starts from
    /// defaults.
    pub fn clear_persisted(storage: &mut dyn eframe::Storage) {
        storage.set_string(SETTINGS_STORAGE_KEY, String::new());
        storage.flush();
    }
}

/// In-memory [`eframe::Storage`] used by tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryStorage {
    pub values: std::collections::HashMap<String, String>,
    pub flushes: usize,
}

#[cfg(test)]
impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
