//! # Foundation UI
//!
//! Shared page chrome and navigation behavior for a family of internal web
//! applications. Every app built on it gets the same header, collapsible
//! sidebar, overlay, and login page, and the same rules for which nav link is
//! highlighted and when the sidebar opens or closes.
//!
//! # Architecture
//!
//! ```text
//! config.toml ──► config ──► layout ──► dist/ (HTML + CSS)
//!                   │           │
//!                   │           └──► MemoryDocument (same markup, in memory)
//!                   ▼                        │
//!           NavigationOptions ──► controller ◄── Event (load, click, resize, timer)
//! ```
//!
//! The controller is the only stateful piece. It sees the page through the
//! [`dom::Document`] capability and defers work through [`timer::Scheduler`],
//! so it runs the same against a real page binding or the in-memory fakes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Sidebar open/close state and active-link highlighting |
//! | [`matching`] | The active-link rule, shared by server and controller |
//! | [`dom`] | Element lookup capability and the in-memory document |
//! | [`timer`] | One-shot deferred actions and a virtual-clock scheduler |
//! | [`layout`] | Maud templates for the shared pages and stylesheet |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`simulate`] | Replays user steps against a loaded page |
//! | [`types`] | Shared types (`NavItem`, `SidebarState`, `ViewportClass`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Rule, Two Places
//!
//! The server pre-marks the active link when rendering and the controller
//! recomputes it after load and on [`controller::NavigationController::set_active_nav_link`].
//! Both call [`matching::is_active`], so first paint and live state cannot
//! disagree.
//!
//! ## Missing Elements Are Not Errors
//!
//! A page without a sidebar, toggle or overlay still loads; the controller
//! just has nothing to drive. Controller operations return `()` and log the
//! degradation at `trace` level instead.
//!
//! ## Every Match Highlights
//!
//! When several nav paths prefix the current path (`/reports` and
//! `/reports/q1` on `/reports/q1/detail`), all of them are highlighted. The
//! root path only ever matches itself.

pub mod config;
pub mod controller;
pub mod dom;
pub mod layout;
pub mod matching;
pub mod output;
pub mod simulate;
pub mod timer;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
