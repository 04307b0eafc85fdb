//! Shared page layout.
//!
//! Renders the chrome every application built on this crate shares: a header
//! with the sidebar toggle and signed-in user, the sidebar panel with the
//! configured nav links, the overlay behind it, and a login page.
//!
//! ## Markup Contract
//!
//! The controller finds everything through the markup emitted here:
//!
//! | Element | Marker |
//! |---------|--------|
//! | Toggle button | `id = sidebar.toggle_id` |
//! | Sidebar panel | `id = sidebar.panel_id` |
//! | Overlay | `id = sidebar.overlay_id` |
//! | Nav link | `class = nav.link_class`, `data-path = item.path` |
//!
//! Links matching the page path are pre-marked with `nav.active_class` on
//! the server using [`matching::is_active`], the same rule the controller
//! applies after load, so the first paint already shows the right entry.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Page for "/"
//! ├── login.html                 # Sign-in page
//! ├── nav.json                   # Configured nav items
//! ├── reports/
//! │   └── index.html             # One page per non-root nav item
//! └── static/css/foundation.css  # Colors + base styles + breakpoint rules
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated values are escaped.

use crate::config::{self, NavConfig, UiConfig};
use crate::dom::{Document, ElementId, MemoryDocument};
use crate::matching;
use crate::types::NavItem;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Attribute carrying a nav link's declared path.
pub const PATH_ATTRIBUTE: &str = "data-path";

/// Where the stylesheet is written, relative to the output root.
pub const STYLESHEET_PATH: &str = "static/css/foundation.css";

const CSS_STATIC: &str = include_str!("../static/foundation.css");

/// A page written by [`render_site`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// URL path the page was rendered for (`/login` for the login page).
    pub url_path: String,
    /// File written, relative to the output directory.
    pub file: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct RenderedSite {
    pub pages: Vec<RenderedPage>,
    pub assets: Vec<PathBuf>,
}

/// Full stylesheet: color variables, base styles, nav link rules, then the
/// breakpoint rules.
pub fn stylesheet(config: &UiConfig) -> String {
    format!(
        "{}\n\n{}\n{}\n\n{}\n",
        config::generate_color_css(&config.colors),
        CSS_STATIC,
        config::generate_nav_css(&config.nav),
        config::generate_layout_css(&config.sidebar)
    )
}

/// Render the shared layout for every configured nav item plus the login
/// page into `output_dir`.
pub fn render_site(config: &UiConfig, output_dir: &Path) -> Result<RenderedSite, RenderError> {
    let mut site = RenderedSite::default();

    let css_path = output_dir.join(STYLESHEET_PATH);
    if let Some(parent) = css_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&css_path, stylesheet(config))?;
    site.assets.push(PathBuf::from(STYLESHEET_PATH));

    let nav_json = serde_json::to_string_pretty(&config.nav.items)?;
    fs::write(output_dir.join("nav.json"), nav_json)?;
    site.assets.push(PathBuf::from("nav.json"));

    let mut url_paths: Vec<&str> = config.nav.items.iter().map(|i| i.path.as_str()).collect();
    if !url_paths.contains(&matching::ROOT_PATH) {
        url_paths.insert(0, matching::ROOT_PATH);
    }

    for url_path in url_paths {
        let file = page_file(url_path);
        let title = page_title(config, url_path);
        let content = html! {
            h1 { (title) }
        };
        let page = render_base_page(config, url_path, None, content);
        let full = output_dir.join(&file);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, page.into_string())?;
        debug!(url_path, file = %file.display(), "rendered page");
        site.pages.push(RenderedPage {
            url_path: url_path.to_string(),
            file,
        });
    }

    fs::write(
        output_dir.join("login.html"),
        render_login_page(config).into_string(),
    )?;
    site.pages.push(RenderedPage {
        url_path: "/login".to_string(),
        file: PathBuf::from("login.html"),
    });

    Ok(site)
}

/// Output file for a URL path: `/` → `index.html`, `/a/b` → `a/b/index.html`.
fn page_file(url_path: &str) -> PathBuf {
    let trimmed = url_path.trim_matches('/');
    if trimmed.is_empty() {
        PathBuf::from("index.html")
    } else {
        Path::new(trimmed).join("index.html")
    }
}

/// Title of the first nav item active for `url_path`, or the app name.
fn page_title<'a>(config: &'a UiConfig, url_path: &str) -> &'a str {
    config
        .nav
        .items
        .iter()
        .find(|i| matching::is_active(&i.path, url_path))
        .map(|i| i.title.as_str())
        .unwrap_or(config.app_name.as_str())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
pub fn base_document(title: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href={ "/" (STYLESHEET_PATH) };
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the top bar: sidebar toggle, app name, and the signed-in user.
pub fn app_header(config: &UiConfig, user_name: Option<&str>) -> Markup {
    html! {
        header.app-header {
            button.sidebar-toggle id=(config.sidebar.toggle_id) type="button"
                aria-label="Toggle navigation" aria-controls=(config.sidebar.panel_id) {
                span.sidebar-toggle-bar {}
                span.sidebar-toggle-bar {}
                span.sidebar-toggle-bar {}
            }
            a.app-title href="/" { (config.app_name) }
            @if let Some(user) = user_name {
                span.app-user { (user) }
                a.app-logout href=(config.auth.logout_url) { "Sign out" }
            }
        }
    }
}

/// Renders the sidebar panel with its nav links, followed by the overlay.
pub fn render_sidebar(config: &UiConfig, current_path: &str) -> Markup {
    html! {
        aside.sidebar id=(config.sidebar.panel_id) aria-label="Primary" {
            nav {
                ul {
                    @for item in &config.nav.items {
                        li { (render_nav_link(&config.nav, item, current_path)) }
                    }
                }
            }
        }
        div.sidebar-overlay id=(config.sidebar.overlay_id) {}
    }
}

fn render_nav_link(nav: &NavConfig, item: &NavItem, current_path: &str) -> Markup {
    let class = if matching::is_active(&item.path, current_path) {
        format!("{} {}", nav.link_class, nav.active_class)
    } else {
        nav.link_class.clone()
    };

    html! {
        a class=(class) href=(item.path) data-path=(item.path) {
            @if let Some(icon) = &item.icon {
                span.nav-icon data-icon=(icon) {}
            }
            span.nav-label { (item.title) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders an application page: header, sidebar, overlay, and `content`.
pub fn render_base_page(
    config: &UiConfig,
    current_path: &str,
    user_name: Option<&str>,
    content: Markup,
) -> Markup {
    let title = page_title(config, current_path);
    let full_title = if title == config.app_name {
        title.to_string()
    } else {
        format!("{} | {}", title, config.app_name)
    };

    let body = html! {
        (app_header(config, user_name))
        (render_sidebar(config, current_path))
        main.app-main {
            (content)
        }
    };

    base_document(&full_title, None, body)
}

/// Renders the sign-in page linking to the host application's login route.
pub fn render_login_page(config: &UiConfig) -> Markup {
    let content = html! {
        main.login-page {
            section.login-card {
                h1 { (config.app_name) }
                p { "Sign in with your organization account to continue." }
                a.login-button href=(config.auth.login_url) { "Sign in with Microsoft" }
            }
        }
    };

    base_document(&format!("Sign in | {}", config.app_name), Some("login"), content)
}

// ============================================================================
// In-memory layout
// ============================================================================

/// The rendered layout as a [`MemoryDocument`], with handles to the parts a
/// host would click on.
#[derive(Debug, Clone)]
pub struct LayoutDocument {
    pub document: MemoryDocument,
    pub toggle: ElementId,
    pub panel: ElementId,
    pub overlay: ElementId,
    pub main: ElementId,
    /// Nav links in document order, keyed by declared path.
    pub links: Vec<(String, ElementId)>,
}

impl LayoutDocument {
    pub fn link(&self, path: &str) -> Option<ElementId> {
        self.links.iter().find(|(p, _)| p == path).map(|(_, el)| *el)
    }
}

/// Build the element tree [`render_base_page`] produces for `current_path`
/// and `user_name`, viewed at `viewport_width`. Text content is not carried
/// over; only elements, ids, classes and attributes are.
pub fn document_from_config(
    config: &UiConfig,
    current_path: &str,
    user_name: Option<&str>,
    viewport_width: u32,
) -> LayoutDocument {
    let mut doc = MemoryDocument::new(viewport_width, current_path);
    let body = doc.body();

    let header = doc.append(body, "header");
    doc.add_class(header, "app-header");
    let toggle = doc.append_with_id(header, "button", &config.sidebar.toggle_id);
    doc.add_class(toggle, "sidebar-toggle");
    for _ in 0..3 {
        let bar = doc.append(toggle, "span");
        doc.add_class(bar, "sidebar-toggle-bar");
    }
    let title = doc.append(header, "a");
    doc.add_class(title, "app-title");
    doc.set_attribute(title, "href", "/");
    if user_name.is_some() {
        let user = doc.append(header, "span");
        doc.add_class(user, "app-user");
        let logout = doc.append(header, "a");
        doc.add_class(logout, "app-logout");
        doc.set_attribute(logout, "href", &config.auth.logout_url);
    }

    let panel = doc.append_with_id(body, "aside", &config.sidebar.panel_id);
    doc.add_class(panel, "sidebar");
    let nav = doc.append(panel, "nav");
    let list = doc.append(nav, "ul");
    let mut links = Vec::with_capacity(config.nav.items.len());
    for item in &config.nav.items {
        let li = doc.append(list, "li");
        let link = doc.append(li, "a");
        doc.add_class(link, &config.nav.link_class);
        if matching::is_active(&item.path, current_path) {
            doc.add_class(link, &config.nav.active_class);
        }
        doc.set_attribute(link, "href", &item.path);
        doc.set_attribute(link, &config.nav.path_attribute, &item.path);
        if let Some(icon) = &item.icon {
            let span = doc.append(link, "span");
            doc.add_class(span, "nav-icon");
            doc.set_attribute(span, "data-icon", icon);
        }
        let label = doc.append(link, "span");
        doc.add_class(label, "nav-label");
        links.push((item.path.clone(), link));
    }

    let overlay = doc.append_with_id(body, "div", &config.sidebar.overlay_id);
    doc.add_class(overlay, "sidebar-overlay");

    let main = doc.append(body, "main");
    doc.add_class(main, "app-main");

    LayoutDocument {
        document: doc,
        toggle,
        panel,
        overlay,
        main,
        links,
    }
}

// ============================================================================
// Tests
// ============================================================================
