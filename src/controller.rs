//! Sidebar visibility and active-link highlighting.
//!
//! [`NavigationController`] is built once per page load around a
//! [`Document`] and a [`Scheduler`]. The host feeds it [`Event`]s from its
//! event loop; every state transition happens synchronously inside
//! [`NavigationController::dispatch`].
//!
//! ## Lifecycle
//!
//! ```text
//! new()            sidebar closed, nothing attached, width remembered
//!   │
//!   ▼ Event::ContentLoaded
//! (a) sidebar listeners   toggle / overlay / outside click / resize
//!                         attached only when toggle, panel and overlay exist
//! (b) nav links           highlight against the current path, then attach
//!                         a click listener to every link
//! ```
//!
//! ## Click Dispatch
//!
//! A click is routed the way it would bubble through the page: the toggle
//! handler runs first and stops propagation, then the overlay, then any nav
//! link containing the target, and finally the document-wide outside-click
//! check. A toggle click therefore never reaches the outside-click check.
//!
//! ## Missing Elements
//!
//! Nothing here fails. A missing panel or overlay turns the sidebar
//! operations into no-ops; a link without a path attribute is never active.

use std::time::Duration;

use tracing::{debug, trace};

use crate::dom::{Document, ElementId};
use crate::matching;
use crate::timer::{Deferred, ManualScheduler, Scheduler};
use crate::types::{NavLinkEntry, SidebarState, ViewportClass};

/// Element ids, class names, and timings the controller works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOptions {
    /// Widths at or below this are treated as mobile.
    pub breakpoint: u32,
    /// Delay between a nav-link click and the sidebar closing on mobile.
    pub close_delay: Duration,
    pub toggle_id: String,
    pub panel_id: String,
    pub overlay_id: String,
    /// Class put on the panel while the sidebar is open.
    pub open_class: String,
    /// Class put on the overlay while the sidebar is open.
    pub overlay_class: String,
    /// Marker class identifying navigation links.
    pub link_class: String,
    /// Attribute holding a link's declared path.
    pub path_attribute: String,
    /// Class put on highlighted links.
    pub active_class: String,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            breakpoint: 768,
            close_delay: Duration::from_millis(150),
            toggle_id: "sidebarToggle".to_string(),
            panel_id: "sidebar".to_string(),
            overlay_id: "sidebarOverlay".to_string(),
            open_class: "open".to_string(),
            overlay_class: "active".to_string(),
            link_class: "nav-link".to_string(),
            path_attribute: "data-path".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// Signals delivered by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The page finished loading.
    ContentLoaded,
    /// A click landed on `target`.
    Click(ElementId),
    /// The viewport was resized; the new width is read from the document.
    Resize,
    /// A previously scheduled action came due.
    Deferred(Deferred),
}

/// Elements the sidebar listeners were attached to.
#[derive(Debug, Clone, Copy)]
struct SidebarElements {
    toggle: ElementId,
    panel: ElementId,
    overlay: ElementId,
}

pub struct NavigationController<D, S> {
    document: D,
    scheduler: S,
    options: NavigationOptions,
    sidebar: SidebarState,
    last_width: u32,
    loaded: bool,
    sidebar_listeners: Option<SidebarElements>,
    link_listeners: Vec<ElementId>,
}

impl<D: Document, S: Scheduler> NavigationController<D, S> {
    pub fn new(document: D, scheduler: S, options: NavigationOptions) -> Self {
        let last_width = document.viewport_width();
        Self {
            document,
            scheduler,
            options,
            sidebar: SidebarState::default(),
            last_width,
            loaded: false,
            sidebar_listeners: None,
            link_listeners: Vec::new(),
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn sidebar_state(&self) -> SidebarState {
        self.sidebar
    }

    pub fn is_open(&self) -> bool {
        self.sidebar.is_open
    }

    pub fn viewport_class(&self) -> ViewportClass {
        ViewportClass::classify(self.document.viewport_width(), self.options.breakpoint)
    }

    /// Whether the toggle/overlay/outside-click/resize listeners are attached.
    pub fn sidebar_listeners_attached(&self) -> bool {
        self.sidebar_listeners.is_some()
    }

    /// Links that received a click listener during page load.
    pub fn link_listeners(&self) -> &[ElementId] {
        &self.link_listeners
    }

    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::ContentLoaded => self.on_content_loaded(),
            Event::Click(target) => self.on_click(target),
            Event::Resize => self.on_resize(),
            Event::Deferred(action) => self.run_deferred(action),
        }
    }

    // ------------------------------------------------------------------------
    // Exported operations
    // ------------------------------------------------------------------------

    pub fn toggle_sidebar(&mut self) {
        let open = !self.sidebar.is_open;
        self.apply_sidebar(open);
    }

    pub fn open_sidebar(&mut self) {
        self.apply_sidebar(true);
    }

    pub fn close_sidebar(&mut self) {
        self.apply_sidebar(false);
    }

    /// Clear every highlight, then highlight each link whose declared path
    /// matches `path`. Links are re-scanned on every call.
    pub fn set_active_nav_link(&mut self, path: &str) {
        let links = self
            .document
            .elements_with_class(&self.options.link_class);
        let mut active = 0usize;
        for &link in &links {
            self.document.remove_class(link, &self.options.active_class);
        }
        for &link in &links {
            let declared = self.document.attribute(link, &self.options.path_attribute);
            if matching::is_active_opt(declared.as_deref(), path) {
                self.document.add_class(link, &self.options.active_class);
                active += 1;
            }
        }
        debug!(path, links = links.len(), active, "recomputed active nav links");
    }

    /// Current highlight state of every nav link, freshly scanned.
    pub fn nav_entries(&self) -> Vec<NavLinkEntry> {
        self.document
            .elements_with_class(&self.options.link_class)
            .into_iter()
            .map(|link| NavLinkEntry {
                path: self.document.attribute(link, &self.options.path_attribute),
                active: self.document.has_class(link, &self.options.active_class),
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Event handlers
    // ------------------------------------------------------------------------

    fn on_content_loaded(&mut self) {
        if self.loaded {
            trace!("content already loaded, ignoring");
            return;
        }
        self.loaded = true;
        self.setup_sidebar();
        self.setup_nav_links();
    }

    fn setup_sidebar(&mut self) {
        let toggle = self.document.find(&self.options.toggle_id);
        let panel = self.document.find(&self.options.panel_id);
        let overlay = self.document.find(&self.options.overlay_id);
        match (toggle, panel, overlay) {
            (Some(toggle), Some(panel), Some(overlay)) => {
                self.sidebar_listeners = Some(SidebarElements {
                    toggle,
                    panel,
                    overlay,
                });
                debug!("sidebar listeners attached");
            }
            _ => trace!(
                toggle = toggle.is_some(),
                panel = panel.is_some(),
                overlay = overlay.is_some(),
                "sidebar elements missing, skipping sidebar setup"
            ),
        }
    }

    fn setup_nav_links(&mut self) {
        let path = self.document.current_path();
        self.set_active_nav_link(&path);
        self.link_listeners = self
            .document
            .elements_with_class(&self.options.link_class);
    }

    fn on_click(&mut self, target: ElementId) {
        let mut propagate = true;

        if let Some(els) = self.sidebar_listeners {
            if self.document.contains(els.toggle, target) {
                self.toggle_sidebar();
                propagate = false;
            } else if self.document.contains(els.overlay, target) {
                self.close_sidebar();
            }
        }

        let clicked_link = self
            .link_listeners
            .iter()
            .copied()
            .find(|&link| self.document.contains(link, target));
        if let Some(link) = clicked_link {
            self.on_nav_link_click(link);
        }

        if propagate {
            self.on_document_click(target);
        }
    }

    fn on_nav_link_click(&mut self, link: ElementId) {
        if self.viewport_class().is_mobile() {
            trace!(?link, "nav link clicked on mobile, scheduling close");
            self.scheduler
                .schedule_once(self.options.close_delay, Deferred::CloseSidebar);
        }
    }

    fn on_document_click(&mut self, target: ElementId) {
        let Some(els) = self.sidebar_listeners else {
            return;
        };
        if self.viewport_class().is_mobile()
            && !self.document.contains(els.panel, target)
            && !self.document.contains(els.toggle, target)
            && self.sidebar.is_open
        {
            debug!("click outside sidebar, closing");
            self.close_sidebar();
        }
    }

    fn on_resize(&mut self) {
        if self.sidebar_listeners.is_none() {
            return;
        }
        let width = self.document.viewport_width();
        let breakpoint = self.options.breakpoint;
        if self.last_width <= breakpoint && width > breakpoint {
            debug!(from = self.last_width, to = width, "left mobile layout, closing sidebar");
            self.close_sidebar();
        }
        self.last_width = width;
    }

    fn run_deferred(&mut self, action: Deferred) {
        match action {
            Deferred::CloseSidebar => self.close_sidebar(),
        }
    }

    fn apply_sidebar(&mut self, open: bool) {
        let panel = self.document.find(&self.options.panel_id);
        let overlay = self.document.find(&self.options.overlay_id);
        let (Some(panel), Some(overlay)) = (panel, overlay) else {
            trace!("sidebar panel or overlay missing, ignoring");
            return;
        };
        if self.sidebar.is_open != open {
            debug!(open, "sidebar state changed");
        }
        self.sidebar.is_open = open;
        self.document.set_class(panel, &self.options.open_class, open);
        self.document
            .set_class(overlay, &self.options.overlay_class, open);
    }
}

impl<D: Document> NavigationController<D, ManualScheduler> {
    /// Advance the virtual clock and deliver every action that came due.
    pub fn advance(&mut self, by: Duration) {
        for action in self.scheduler.advance(by) {
            self.dispatch(Event::Deferred(action));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use crate::test_helpers::*;

    #[test]
    fn starts_closed() {
        let p = page(500, "/", &[]);
        assert!(!p.controller.is_open());
        assert!(!panel_open(&p));
        assert!(!overlay_active(&p));
    }

    #[test]
    fn toggle_flips_both_elements() {
        let mut p = page(500, "/", &[]);
        p.controller.toggle_sidebar();
        assert!(p.controller.is_open());
        assert!(panel_open(&p) && overlay_active(&p));
        p.controller.toggle_sidebar();
        assert!(!p.controller.is_open());
        assert!(!panel_open(&p) && !overlay_active(&p));
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut p = page(500, "/", &[]);
        p.controller.open_sidebar();
        p.controller.open_sidebar();
        assert!(p.controller.is_open());
        p.controller.close_sidebar();
        p.controller.close_sidebar();
        assert!(!p.controller.is_open());
        assert!(!panel_open(&p));
    }

    #[test]
    fn toggle_click_opens_on_mobile_without_outside_close() {
        let mut p = page(500, "/", &[]);
        let toggle = p.toggle;
        p.controller.dispatch(Event::Click(toggle));
        assert!(p.controller.is_open());
        p.controller.dispatch(Event::Click(toggle));
        assert!(!p.controller.is_open());
    }

    #[test]
    fn click_inside_toggle_child_counts_as_toggle() {
        let mut p = page(500, "/", &[]);
        let icon = p.controller.document_mut().append(p.toggle, "span");
        p.controller.dispatch(Event::Click(icon));
        assert!(p.controller.is_open());
    }

    #[test]
    fn overlay_click_closes() {
        let mut p = page(500, "/", &[]);
        p.controller.open_sidebar();
        let overlay = p.overlay;
        p.controller.dispatch(Event::Click(overlay));
        assert!(!p.controller.is_open());
        assert_sidebar_consistent(&p);
    }

    #[test]
    fn outside_click_closes_on_mobile() {
        let mut p = page(500, "/", &[]);
        p.controller.open_sidebar();
        let main = p.main;
        p.controller.dispatch(Event::Click(main));
        assert!(!p.controller.is_open());
    }

    #[test]
    fn click_inside_panel_keeps_sidebar_open() {
        let mut p = page(500, "/", &[]);
        p.controller.open_sidebar();
        let panel = p.panel;
        p.controller.dispatch(Event::Click(panel));
        assert!(p.controller.is_open());
    }

    #[test]
    fn outside_click_ignored_on_desktop() {
        let mut p = page(1024, "/", &[]);
        p.controller.open_sidebar();
        let main = p.main;
        p.controller.dispatch(Event::Click(main));
        assert!(p.controller.is_open());
    }

    #[test]
    fn resize_mobile_to_desktop_closes() {
        let mut p = page(700, "/", &[]);
        p.controller.open_sidebar();
        resize(&mut p, 900);
        assert!(!p.controller.is_open());
        assert_sidebar_consistent(&p);
    }

    #[test]
    fn resize_desktop_to_mobile_does_not_open() {
        let mut p = page(900, "/", &[]);
        resize(&mut p, 700);
        assert!(!p.controller.is_open());
    }

    #[test]
    fn resize_within_desktop_keeps_state() {
        let mut p = page(900, "/", &[]);
        p.controller.open_sidebar();
        resize(&mut p, 1200);
        assert!(p.controller.is_open());
    }

    #[test]
    fn resize_tracks_previous_width() {
        let mut p = page(1024, "/", &[]);
        resize(&mut p, 600);
        p.controller.open_sidebar();
        resize(&mut p, 800);
        assert!(!p.controller.is_open());
    }

    #[test]
    fn breakpoint_width_counts_as_mobile_on_resize() {
        let mut p = page(768, "/", &[]);
        p.controller.open_sidebar();
        resize(&mut p, 769);
        assert!(!p.controller.is_open());
    }

    #[test]
    fn nav_click_on_mobile_closes_after_delay() {
        let mut p = page(500, "/", &["/", "/reports"]);
        let link = p.links[1];
        p.controller.open_sidebar();
        p.controller.dispatch(Event::Click(link));
        assert!(p.controller.is_open());
        p.controller.advance(Duration::from_millis(149));
        assert!(p.controller.is_open());
        p.controller.advance(Duration::from_millis(1));
        assert!(!p.controller.is_open());
    }

    #[test]
    fn nav_click_on_desktop_schedules_nothing() {
        let mut p = page(1024, "/", &["/reports"]);
        let link = p.links[0];
        p.controller.dispatch(Event::Click(link));
        assert_eq!(p.controller.scheduler().pending(), 0);
    }

    #[test]
    fn deferred_close_fires_even_after_reopen() {
        let mut p = page(500, "/", &["/reports"]);
        let link = p.links[0];
        p.controller.open_sidebar();
        p.controller.dispatch(Event::Click(link));
        p.controller.advance(Duration::from_millis(50));
        p.controller.close_sidebar();
        p.controller.open_sidebar();
        p.controller.advance(Duration::from_millis(100));
        assert!(!p.controller.is_open());
    }

    #[test]
    fn initial_highlight_uses_current_path() {
        let p = page(1024, "/reports/q1", &["/", "/reports", "/budgets"]);
        assert_eq!(active_paths(&p), vec!["/reports".to_string()]);
    }

    #[test]
    fn root_highlighted_only_on_root() {
        let p = page(1024, "/", &["/", "/reports"]);
        assert_eq!(active_paths(&p), vec!["/".to_string()]);
    }

    #[test]
    fn set_active_clears_previous_highlight() {
        let mut p = page(1024, "/reports", &["/", "/reports", "/budgets"]);
        p.controller.set_active_nav_link("/budgets");
        assert_eq!(active_paths(&p), vec!["/budgets".to_string()]);
    }

    #[test]
    fn set_active_does_not_touch_sidebar() {
        let mut p = page(500, "/", &["/", "/reports"]);
        p.controller.open_sidebar();
        p.controller.set_active_nav_link("/reports");
        assert!(p.controller.is_open());
    }

    #[test]
    fn set_active_rescans_links_added_after_load() {
        let mut p = page(1024, "/", &["/"]);
        let panel = p.panel;
        let doc = p.controller.document_mut();
        let late = doc.append(panel, "a");
        doc.add_class(late, "nav-link");
        doc.set_attribute(late, "data-path", "/receipts");
        p.controller.set_active_nav_link("/receipts/2024");
        assert_eq!(active_paths(&p), vec!["/receipts".to_string()]);
        assert!(!p.controller.link_listeners().contains(&late));
    }

    #[test]
    fn nested_prefix_entries_both_highlight() {
        let p = page(1024, "/reports/q1/detail", &["/reports", "/reports/q1"]);
        assert_eq!(active_paths(&p).len(), 2);
    }

    #[test]
    fn link_without_path_is_never_active() {
        let mut doc = MemoryDocument::new(1024, "/");
        let link = doc.append(doc.body(), "a");
        doc.add_class(link, "nav-link");
        let mut controller =
            NavigationController::new(doc, ManualScheduler::new(), NavigationOptions::default());
        controller.dispatch(Event::ContentLoaded);
        controller.set_active_nav_link("");
        assert_eq!(
            controller.nav_entries(),
            vec![NavLinkEntry {
                path: None,
                active: false
            }]
        );
    }

    #[test]
    fn missing_overlay_disables_sidebar() {
        let mut doc = MemoryDocument::new(500, "/");
        let body = doc.body();
        let toggle = doc.append_with_id(body, "button", "sidebarToggle");
        doc.append_with_id(body, "aside", "sidebar");
        let mut controller =
            NavigationController::new(doc, ManualScheduler::new(), NavigationOptions::default());
        controller.dispatch(Event::ContentLoaded);

        assert!(!controller.sidebar_listeners_attached());
        controller.dispatch(Event::Click(toggle));
        controller.toggle_sidebar();
        controller.open_sidebar();
        assert!(!controller.is_open());
    }

    #[test]
    fn missing_toggle_skips_listeners_but_operations_work() {
        let mut doc = MemoryDocument::new(500, "/");
        let body = doc.body();
        doc.append_with_id(body, "aside", "sidebar");
        doc.append_with_id(body, "div", "sidebarOverlay");
        let main = doc.append(body, "main");
        let mut controller =
            NavigationController::new(doc, ManualScheduler::new(), NavigationOptions::default());
        controller.dispatch(Event::ContentLoaded);

        assert!(!controller.sidebar_listeners_attached());
        controller.open_sidebar();
        assert!(controller.is_open());
        controller.dispatch(Event::Click(main));
        assert!(controller.is_open());
    }

    #[test]
    fn empty_document_is_inert() {
        let doc = MemoryDocument::new(500, "/anything");
        let body = doc.body();
        let mut controller =
            NavigationController::new(doc, ManualScheduler::new(), NavigationOptions::default());
        controller.dispatch(Event::ContentLoaded);
        controller.dispatch(Event::Click(body));
        controller.dispatch(Event::Resize);
        controller.set_active_nav_link("/x");
        assert!(controller.nav_entries().is_empty());
        assert!(!controller.is_open());
    }

    #[test]
    fn second_content_loaded_is_ignored() {
        let mut p = page(1024, "/reports", &["/reports"]);
        p.controller.set_active_nav_link("/budgets");
        p.controller.dispatch(Event::ContentLoaded);
        assert!(active_paths(&p).is_empty());
        assert_eq!(p.controller.link_listeners().len(), 1);
    }

    #[test]
    fn custom_ids_and_classes() {
        let options = NavigationOptions {
            toggle_id: "menu".to_string(),
            panel_id: "drawer".to_string(),
            overlay_id: "scrim".to_string(),
            open_class: "is-open".to_string(),
            overlay_class: "is-visible".to_string(),
            ..NavigationOptions::default()
        };
        let mut doc = MemoryDocument::new(500, "/");
        let body = doc.body();
        let toggle = doc.append_with_id(body, "button", "menu");
        let drawer = doc.append_with_id(body, "aside", "drawer");
        let scrim = doc.append_with_id(body, "div", "scrim");
        let mut controller = NavigationController::new(doc, ManualScheduler::new(), options);
        controller.dispatch(Event::ContentLoaded);
        controller.dispatch(Event::Click(toggle));

        assert!(controller.document().has_class(drawer, "is-open"));
        assert!(controller.document().has_class(scrim, "is-visible"));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone, Copy)]
        enum Op {
            Toggle,
            Open,
            Close,
            ClickToggle,
            ClickOutside,
            ClickOverlay,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::Toggle),
                Just(Op::Open),
                Just(Op::Close),
                Just(Op::ClickToggle),
                Just(Op::ClickOutside),
                Just(Op::ClickOverlay),
            ]
        }

        proptest! {
            #[test]
            fn toggle_click_flips_once_on_mobile(width in 0..=768u32, clicks in 1..20usize) {
                let mut p = page(width, "/", &[]);
                let toggle = p.toggle;
                for i in 0..clicks {
                    let before = p.controller.is_open();
                    p.controller.dispatch(Event::Click(toggle));
                    prop_assert_eq!(p.controller.is_open(), !before, "click {}", i);
                }
            }

            #[test]
            fn panel_and_overlay_always_agree(
                width in 300..1400u32,
                ops in proptest::collection::vec(op(), 0..40),
            ) {
                let mut p = page(width, "/", &[]);
                for op in ops {
                    match op {
                        Op::Toggle => p.controller.toggle_sidebar(),
                        Op::Open => p.controller.open_sidebar(),
                        Op::Close => p.controller.close_sidebar(),
                        Op::ClickToggle => p.controller.dispatch(Event::Click(p.toggle)),
                        Op::ClickOutside => p.controller.dispatch(Event::Click(p.main)),
                        Op::ClickOverlay => p.controller.dispatch(Event::Click(p.overlay)),
                    }
                    prop_assert_eq!(panel_open(&p), overlay_active(&p));
                    prop_assert_eq!(panel_open(&p), p.controller.is_open());
                }
            }

            #[test]
            fn declared_prefix_is_active(
                declared in "/[a-z]{1,8}",
                suffix in "(/[a-z0-9]{1,6}){0,3}",
            ) {
                let candidate = format!("{declared}{suffix}");
                let mut p = page(1024, "/", &["/", declared.as_str()]);
                p.controller.set_active_nav_link(&candidate);
                let entries = p.controller.nav_entries();
                prop_assert!(entries[1].active);
                prop_assert!(!entries[0].active);
            }
        }
    }
}
