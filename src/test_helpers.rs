//! Shared test utilities for the controller test suites.
//!
//! Builds small pages with a toggle, sidebar panel, overlay and nav links and
//! wraps them in a loaded [`NavigationController`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut p = page(500, "/reports/q1", &["/", "/reports"]);
//! p.controller.dispatch(Event::Click(p.toggle));
//! assert_sidebar_consistent(&p);
//! assert_eq!(active_paths(&p), vec!["/reports"]);
//! ```

use crate::controller::{Event, NavigationController, NavigationOptions};
use crate::dom::{Document, ElementId, MemoryDocument};
use crate::timer::ManualScheduler;

pub struct Page {
    pub controller: NavigationController<MemoryDocument, ManualScheduler>,
    pub toggle: ElementId,
    pub panel: ElementId,
    pub overlay: ElementId,
    pub links: Vec<ElementId>,
    pub main: ElementId,
}

// =========================================================================
// Page setup
// =========================================================================

/// A loaded page at `width` and `current_path` whose sidebar holds one nav
/// link per entry in `paths`.
pub fn page(width: u32, current_path: &str, paths: &[&str]) -> Page {
    let mut doc = MemoryDocument::new(width, current_path);
    let body = doc.body();
    let toggle = doc.append_with_id(body, "button", "sidebarToggle");
    let panel = doc.append_with_id(body, "aside", "sidebar");
    let overlay = doc.append_with_id(body, "div", "sidebarOverlay");
    let list = doc.append(panel, "ul");
    let links = paths
        .iter()
        .map(|path| {
            let link = doc.append(list, "a");
            doc.add_class(link, "nav-link");
            doc.set_attribute(link, "data-path", path);
            link
        })
        .collect();
    let main = doc.append(body, "main");

    let mut controller =
        NavigationController::new(doc, ManualScheduler::new(), NavigationOptions::default());
    controller.dispatch(Event::ContentLoaded);

    Page {
        controller,
        toggle,
        panel,
        overlay,
        links,
        main,
    }
}

/// Change the viewport width and deliver a resize signal.
pub fn resize(page: &mut Page, width: u32) {
    page.controller.document_mut().set_viewport_width(width);
    page.controller.dispatch(Event::Resize);
}

// =========================================================================
// Lookups
// =========================================================================

pub fn panel_open(page: &Page) -> bool {
    page.controller.document().has_class(page.panel, "open")
}

pub fn overlay_active(page: &Page) -> bool {
    page.controller.document().has_class(page.overlay, "active")
}

/// Declared paths of every highlighted link, in document order.
pub fn active_paths(page: &Page) -> Vec<String> {
    page.controller
        .nav_entries()
        .into_iter()
        .filter(|e| e.active)
        .filter_map(|e| e.path)
        .collect()
}

// =========================================================================
// Assertions
// =========================================================================

/// Panel, overlay and controller state must all agree.
pub fn assert_sidebar_consistent(page: &Page) {
    let open = page.controller.is_open();
    assert_eq!(
        panel_open(page),
        open,
        "panel visibility disagrees with state (open={open})"
    );
    assert_eq!(
        overlay_active(page),
        open,
        "overlay visibility disagrees with state (open={open})"
    );
}
