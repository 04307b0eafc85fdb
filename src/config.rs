//! UI configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are overridden by whatever the application's `config.toml` specifies.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! app_name = "Foundation"
//!
//! [sidebar]
//! breakpoint = 768          # Widths at or below this are "mobile"
//! close_delay_ms = 150      # Delay before closing after a nav click (mobile)
//! toggle_id = "sidebarToggle"
//! panel_id = "sidebar"
//! overlay_id = "sidebarOverlay"
//! open_class = "open"       # Class on the panel while open
//! overlay_class = "active"  # Class on the overlay while open
//!
//! [nav]
//! link_class = "nav-link"
//! active_class = "active"
//! path_attribute = "data-path"  # Only "data-path" is supported
//!
//! [[nav.items]]
//! title = "Dashboard"
//! path = "/"
//!
//! [auth]
//! login_url = "/auth/login"
//! logout_url = "/auth/logout"
//!
//! [colors.light]
//! background = "#f5f6f8"
//! surface = "#ffffff"
//! text = "#1f2933"
//! text_muted = "#616e7c"
//! border = "#e4e7eb"
//! accent = "#2563eb"
//!
//! [colors.dark]
//! background = "#0f172a"
//! surface = "#1e293b"
//! text = "#e2e8f0"
//! text_muted = "#94a3b8"
//! border = "#334155"
//! accent = "#60a5fa"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Arrays such
//! as `nav.items` are replaced wholesale, not merged entry by entry.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::controller::NavigationOptions;
use crate::layout::PATH_ATTRIBUTE;
use crate::types::NavItem;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Shared UI configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Name shown in the page header and the browser title.
    pub app_name: String,
    pub sidebar: SidebarConfig,
    pub nav: NavConfig,
    pub auth: AuthConfig,
    pub colors: ColorConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            app_name: "Foundation".to_string(),
            sidebar: SidebarConfig::default(),
            nav: NavConfig::default(),
            auth: AuthConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl UiConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sidebar.breakpoint == 0 {
            return Err(ConfigError::Validation(
                "sidebar.breakpoint must be non-zero".into(),
            ));
        }
        for (key, id) in [
            ("sidebar.toggle_id", &self.sidebar.toggle_id),
            ("sidebar.panel_id", &self.sidebar.panel_id),
            ("sidebar.overlay_id", &self.sidebar.overlay_id),
            ("nav.link_class", &self.nav.link_class),
        ] {
            if id.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.nav.path_attribute != PATH_ATTRIBUTE {
            return Err(ConfigError::Validation(format!(
                "nav.path_attribute must be '{PATH_ATTRIBUTE}', got '{}'",
                self.nav.path_attribute
            )));
        }
        if let Some(item) = self.nav.items.iter().find(|i| !i.path.starts_with('/')) {
            return Err(ConfigError::Validation(format!(
                "nav item '{}' path must start with '/', got '{}'",
                item.title, item.path
            )));
        }
        if let Some(item) = self
            .nav
            .items
            .iter()
            .find(|i| i.path.split('/').any(|segment| segment == ".."))
        {
            return Err(ConfigError::Validation(format!(
                "nav item '{}' path must not contain '..', got '{}'",
                item.title, item.path
            )));
        }
        Ok(())
    }

    /// Controller settings derived from the `[sidebar]` and `[nav]` tables.
    pub fn navigation_options(&self) -> NavigationOptions {
        NavigationOptions {
            breakpoint: self.sidebar.breakpoint,
            close_delay: Duration::from_millis(self.sidebar.close_delay_ms),
            toggle_id: self.sidebar.toggle_id.clone(),
            panel_id: self.sidebar.panel_id.clone(),
            overlay_id: self.sidebar.overlay_id.clone(),
            open_class: self.sidebar.open_class.clone(),
            overlay_class: self.sidebar.overlay_class.clone(),
            link_class: self.nav.link_class.clone(),
            active_class: self.nav.active_class.clone(),
            path_attribute: self.nav.path_attribute.clone(),
        }
    }
}

/// Sidebar behavior and the element ids/classes it is wired through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    /// Viewport widths at or below this value use the mobile layout.
    pub breakpoint: u32,
    /// Milliseconds between a nav-link click and the sidebar closing on mobile.
    pub close_delay_ms: u64,
    pub toggle_id: String,
    pub panel_id: String,
    pub overlay_id: String,
    pub open_class: String,
    pub overlay_class: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        let options = NavigationOptions::default();
        Self {
            breakpoint: options.breakpoint,
            close_delay_ms: options.close_delay.as_millis() as u64,
            toggle_id: options.toggle_id,
            panel_id: options.panel_id,
            overlay_id: options.overlay_id,
            open_class: options.open_class,
            overlay_class: options.overlay_class,
        }
    }
}

/// Navigation entries and the classes used to mark them up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    pub link_class: String,
    pub active_class: String,
    /// Attribute carrying each link's declared path. The rendered markup
    /// always uses `data-path`, so validation rejects any other value.
    pub path_attribute: String,
    pub items: Vec<NavItem>,
}

impl Default for NavConfig {
    fn default() -> Self {
        let options = NavigationOptions::default();
        Self {
            link_class: options.link_class,
            active_class: options.active_class,
            path_attribute: options.path_attribute,
            items: vec![
                NavItem::new("Dashboard", "/"),
                NavItem::new("Pipeline", "/pipeline"),
                NavItem::new("Reports", "/reports"),
                NavItem::new("Receipts", "/receipts"),
                NavItem::new("Budgets", "/budgets"),
            ],
        }
    }
}

/// Where the sign-in gate lives. The gate itself belongs to the host app.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    pub login_url: String,
    pub logout_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: "/auth/login".to_string(),
            logout_url: "/auth/logout".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Sidebar, header and card background.
    pub surface: String,
    pub text: String,
    /// Secondary text (user name, inactive nav links).
    pub text_muted: String,
    pub border: String,
    /// Active nav link and primary buttons.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f5f6f8".to_string(),
            surface: "#ffffff".to_string(),
            text: "#1f2933".to_string(),
            text_muted: "#616e7c".to_string(),
            border: "#e4e7eb".to_string(),
            accent: "#2563eb".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0f172a".to_string(),
            surface: "#1e293b".to_string(),
            text: "#e2e8f0".to_string(),
            text_muted: "#94a3b8".to_string(),
            border: "#334155".to_string(),
            accent: "#60a5fa".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(UiConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<UiConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: UiConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<UiConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Foundation UI Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Name shown in the page header and browser title.
app_name = "Foundation"

# ---------------------------------------------------------------------------
# Sidebar
# ---------------------------------------------------------------------------
[sidebar]
# Viewport widths (logical pixels) at or below this use the mobile layout:
# the sidebar becomes a drawer that closes on outside clicks and after
# navigation. Growing past it closes the drawer.
breakpoint = 768

# Milliseconds between tapping a nav link and the drawer closing (mobile only).
close_delay_ms = 150

# Element ids the sidebar behavior is wired to. Missing elements simply
# disable the behavior.
toggle_id = "sidebarToggle"
panel_id = "sidebar"
overlay_id = "sidebarOverlay"

# Classes applied while the sidebar is open.
open_class = "open"
overlay_class = "active"

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[nav]
# Marker class identifying nav links.
link_class = "nav-link"

# Attribute carrying each link's path. Only "data-path" is supported.
path_attribute = "data-path"

# Class applied to the link matching the current page. A link is active when
# its path equals the page path, or (for any path other than "/") when the
# page path starts with it.
active_class = "active"

# Entries shown in the sidebar, in order. Replacing this list replaces all
# of the defaults.
[[nav.items]]
title = "Dashboard"
path = "/"

[[nav.items]]
title = "Pipeline"
path = "/pipeline"

[[nav.items]]
title = "Reports"
path = "/reports"

[[nav.items]]
title = "Receipts"
path = "/receipts"

[[nav.items]]
title = "Budgets"
path = "/budgets"

# ---------------------------------------------------------------------------
# Authentication links
# ---------------------------------------------------------------------------
[auth]
login_url = "/auth/login"
logout_url = "/auth/logout"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f5f6f8"
surface = "#ffffff"
text = "#1f2933"
text_muted = "#616e7c"
border = "#e4e7eb"
accent = "#2563eb"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0f172a"
surface = "#1e293b"
text = "#e2e8f0"
text_muted = "#94a3b8"
border = "#334155"
accent = "#60a5fa"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-surface: {light_surface};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-surface: {dark_surface};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_surface = colors.light.surface,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_surface = colors.dark.surface,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
    )
}

/// Generate the breakpoint media query that switches the sidebar into a
/// drawer. Kept in sync with the controller's mobile threshold.
pub fn generate_layout_css(sidebar: &SidebarConfig) -> String {
    format!(
        r#"@media (max-width: {bp}px) {{
    .sidebar {{
        transform: translateX(-100%);
    }}
    .sidebar.{open} {{
        transform: translateX(0);
    }}
    .sidebar-toggle {{
        display: inline-flex;
    }}
    .sidebar-overlay.{overlay} {{
        display: block;
    }}
    .app-main {{
        margin-left: 0;
    }}
}}"#,
        bp = sidebar.breakpoint,
        open = sidebar.open_class,
        overlay = sidebar.overlay_class,
    )
}

/// Generate the nav link rules from the configured link and active classes.
pub fn generate_nav_css(nav: &NavConfig) -> String {
    format!(
        r#".{link} {{
    display: flex;
    gap: 0.5rem;
    padding: 0.5rem 0.75rem;
    border-radius: 0.375rem;
    color: var(--color-text-muted);
}}

.{link}:hover {{
    color: var(--color-text);
}}

.{link}.{active} {{
    color: var(--color-accent);
    font-weight: 600;
}}"#,
        link = nav.link_class,
        active = nav.active_class,
    )
}
