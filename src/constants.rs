//! Shared application-wide constants.
//! Centralizes tweakable values used across persistence, styling and the developer tools.

// Persistence
/// Storage key under which the whole configuration record is persisted as JSON.
pub const SETTINGS_STORAGE_KEY: &str = "R4K1N_SETTINGS";
/// Default file name offered when exporting the configuration.
pub const EXPORT_FILE_NAME: &str = "r4k1n_settings.json";

// Developer log
/// Maximum number of developer log entries to retain.
pub const MAX_LOG_ENTRIES: usize = 100;
/// Maximum length of a captured click label.
pub const CLICK_LABEL_MAX_CHARS: usize = 15;

// Styling
/// Root font size in pixels before the accessibility scale is applied.
pub const BASE_FONT_SIZE_PX: f32 = 16.0;
/// Transition duration used while animations are enabled.
pub const ANIMATION_DURATION_MS: u32 = 300;
/// Accent enforced by the cyber-gold theme.
pub const CYBER_GOLD: &str = "#FFD700";
/// Dim accent enforced by the cyber-gold theme.
pub const CYBER_GOLD_DIM: &str = "rgba(255, 215, 0, 0.15)";
/// Alpha suffix appended to the accent to derive its dim variant.
pub const ACCENT_DIM_ALPHA_HEX: &str = "20";
/// The same dim alpha as a CSS opacity, for `rgb()` accents.
pub const ACCENT_DIM_ALPHA: f32 = 0.125;
/// Accepted range of the accessibility font scale.
pub const FONT_SCALE_RANGE: std::ops::RangeInclusive<f32> = 0.8..=1.5;
/// Largest accepted corner radius, in pixels.
pub const MAX_BORDER_RADIUS: u8 = 20;
/// Font stack forced by the dyslexia-friendly accessibility flag.
pub const DYSLEXIA_FONT_STACK: &str = "OpenDyslexic, sans-serif";
/// Contrast multiplier applied in high contrast mode.
pub const HIGH_CONTRAST_FACTOR: f32 = 1.25;
/// Cell size of the developer grid overlay, in points.
pub const GRID_OVERLAY_CELL: f32 = 20.0;

// Diagnostics
/// Interval between widget/viewport polls of the inspector overlay.
pub const INSPECTOR_POLL_SECS: f64 = 1.0;
/// Viewport width below which the inspector reports the mobile breakpoint.
pub const BREAKPOINT_MD: f32 = 768.0;
/// Viewport width below which the inspector reports the tablet breakpoint.
pub const BREAKPOINT_LG: f32 = 1024.0;
/// Frame rate used to scale the FPS meter bar.
pub const FPS_METER_FULL_SCALE: f32 = 144.0;

// Catalog
/// Maximum number of market models in a side-by-side comparison.
pub const MAX_COMPARE_SELECTION: usize = 2;
/// Categories featured on the dashboard.
pub const FEATURED_CATEGORIES: [&str; 3] = ["cpu", "gpu", "ram"];
