//! Headless driver for the navigation controller.
//!
//! Builds the shared layout as an in-memory document, wires a
//! [`NavigationController`] to it with a virtual clock, and replays a list of
//! user steps. Backs the `simulate` CLI command and the scenario tests.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::config::UiConfig;
use crate::controller::{Event, NavigationController};
use crate::dom::{Document, MemoryDocument};
use crate::layout::{self, LayoutDocument};
use crate::timer::ManualScheduler;
use crate::types::ViewportClass;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SimulateError {
    #[error("unknown step '{0}' (expected toggle, outside, overlay, nav:<path>, resize:<width>, wait:<ms>)")]
    UnknownStep(String),
    #[error("invalid number in step '{0}'")]
    InvalidNumber(String),
    #[error("no nav link with path '{0}'")]
    UnknownLink(String),
}

/// One user or environment action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Click the sidebar toggle.
    Toggle,
    /// Click the main content area.
    Outside,
    /// Click the overlay.
    Overlay,
    /// Click the nav link declaring this path.
    Nav(String),
    /// Resize the viewport to this width.
    Resize(u32),
    /// Let this many milliseconds pass.
    Wait(u64),
}

impl FromStr for Step {
    type Err = SimulateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |_: std::num::ParseIntError| SimulateError::InvalidNumber(s.to_string());
        match s.split_once(':') {
            None => match s {
                "toggle" => Ok(Step::Toggle),
                "outside" => Ok(Step::Outside),
                "overlay" => Ok(Step::Overlay),
                _ => Err(SimulateError::UnknownStep(s.to_string())),
            },
            Some(("nav", path)) => Ok(Step::Nav(path.to_string())),
            Some(("resize", width)) => Ok(Step::Resize(width.parse().map_err(invalid)?)),
            Some(("wait", ms)) => Ok(Step::Wait(ms.parse().map_err(invalid)?)),
            Some(_) => Err(SimulateError::UnknownStep(s.to_string())),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Toggle => write!(f, "toggle"),
            Step::Outside => write!(f, "outside"),
            Step::Overlay => write!(f, "overlay"),
            Step::Nav(path) => write!(f, "nav:{path}"),
            Step::Resize(width) => write!(f, "resize:{width}"),
            Step::Wait(ms) => write!(f, "wait:{ms}"),
        }
    }
}

/// Controller state observed after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// `None` for the initial page-load snapshot.
    pub step: Option<Step>,
    pub width: u32,
    pub viewport: ViewportClass,
    pub sidebar_open: bool,
    pub active: Vec<String>,
}

/// A loaded page with its controller, ready to receive steps.
pub struct Session {
    controller: NavigationController<MemoryDocument, ManualScheduler>,
    layout: LayoutDocument,
}

impl Session {
    /// Render the layout for `path` at `width` and deliver the page-load signal.
    pub fn load(config: &UiConfig, path: &str, width: u32) -> Self {
        let layout = layout::document_from_config(config, path, None, width);
        let mut controller = NavigationController::new(
            layout.document.clone(),
            ManualScheduler::new(),
            config.navigation_options(),
        );
        controller.dispatch(Event::ContentLoaded);
        Self { controller, layout }
    }

    pub fn controller(&self) -> &NavigationController<MemoryDocument, ManualScheduler> {
        &self.controller
    }

    pub fn controller_mut(
        &mut self,
    ) -> &mut NavigationController<MemoryDocument, ManualScheduler> {
        &mut self.controller
    }

    pub fn apply(&mut self, step: &Step) -> Result<(), SimulateError> {
        match step {
            Step::Toggle => self.controller.dispatch(Event::Click(self.layout.toggle)),
            Step::Outside => self.controller.dispatch(Event::Click(self.layout.main)),
            Step::Overlay => self.controller.dispatch(Event::Click(self.layout.overlay)),
            Step::Nav(path) => {
                let link = self
                    .layout
                    .link(path)
                    .ok_or_else(|| SimulateError::UnknownLink(path.clone()))?;
                self.controller.dispatch(Event::Click(link));
            }
            Step::Resize(width) => {
                self.controller.document_mut().set_viewport_width(*width);
                self.controller.dispatch(Event::Resize);
            }
            Step::Wait(ms) => self.controller.advance(Duration::from_millis(*ms)),
        }
        Ok(())
    }

    pub fn report(&self, step: Option<Step>) -> StepReport {
        StepReport {
            step,
            width: self.controller.document().viewport_width(),
            viewport: self.controller.viewport_class(),
            sidebar_open: self.controller.sidebar_state().is_open,
            active: self
                .controller
                .nav_entries()
                .into_iter()
                .filter(|e| e.active)
                .filter_map(|e| e.path)
                .collect(),
        }
    }
}

/// Load `path` at `width`, replay `steps`, and report state after load and
/// after each step.
pub fn run(
    config: &UiConfig,
    path: &str,
    width: u32,
    steps: &[Step],
) -> Result<Vec<StepReport>, SimulateError> {
    let mut session = Session::load(config, path, width);
    let mut reports = vec![session.report(None)];
    for step in steps {
        session.apply(step)?;
        reports.push(session.report(Some(step.clone())));
    }
    Ok(reports)
}
