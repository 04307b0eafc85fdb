//! Shared types used by the controller, the layout renderer, and the CLI.

use serde::{Deserialize, Serialize};

/// A navigation entry declared in `config.toml` and rendered into the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    pub title: String,
    /// Absolute URL path, e.g. `/reports`. Also emitted as the `data-path`
    /// attribute the controller matches against.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NavItem {
    pub fn new(title: &str, path: &str) -> Self {
        Self {
            title: title.to_string(),
            path: path.to_string(),
            icon: None,
        }
    }
}

/// Whether the sidebar panel (and its overlay) is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SidebarState {
    pub is_open: bool,
}

/// Layout class derived from the viewport width. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    /// Widths at or below `breakpoint` are mobile.
    pub fn classify(width: u32, breakpoint: u32) -> Self {
        if width <= breakpoint {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == ViewportClass::Mobile
    }
}

/// One scanned navigation link: its declared path (if the element carries
/// one) and whether it is highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkEntry {
    pub path: Option<String>,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_width_is_mobile() {
        assert_eq!(ViewportClass::classify(768, 768), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(769, 768), ViewportClass::Desktop);
        assert_eq!(ViewportClass::classify(0, 768), ViewportClass::Mobile);
    }

    #[test]
    fn sidebar_starts_closed() {
        assert!(!SidebarState::default().is_open);
    }

    #[test]
    fn nav_item_icon_is_optional_in_toml() {
        let item: NavItem = toml::from_str("title = \"Reports\"\npath = \"/reports\"").unwrap();
        assert_eq!(item, NavItem::new("Reports", "/reports"));
    }
}
