//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Render
//!
//! ```text
//! Pages
//! 001 / → index.html
//! 002 /reports → reports/index.html
//! 003 /login → login.html
//!
//! Assets
//!     static/css/foundation.css
//!     nav.json
//! ```
//!
//! ## Active
//!
//! ```text
//! Active links for /reports/q1
//! 001   Dashboard /
//! 002 * Reports /reports
//! ```
//!
//! ## Simulate
//!
//! ```text
//! load         mobile  500px  closed  active: /reports
//! toggle       mobile  500px  open    active: /reports
//! ```

use std::path::Path;

use crate::layout::RenderedSite;
use crate::matching;
use crate::simulate::StepReport;
use crate::types::{NavItem, ViewportClass};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// render
// ============================================================================

pub fn format_render_output(site: &RenderedSite, output_dir: &Path) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in site.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            page.url_path,
            page.file.display()
        ));
    }
    lines.push(String::new());
    lines.push("Assets".to_string());
    for asset in &site.assets {
        lines.push(format!("{}{}", indent(1), asset.display()));
    }
    lines.push(String::new());
    lines.push(format!(
        "Rendered {} pages to {}",
        site.pages.len(),
        output_dir.display()
    ));
    lines
}

pub fn print_render_output(site: &RenderedSite, output_dir: &Path) {
    for line in format_render_output(site, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// active
// ============================================================================

/// One line per nav item, `*` marking the ones active for `path`.
pub fn format_active_output(items: &[NavItem], path: &str) -> Vec<String> {
    let active = matching::active_indices(items.iter().map(|i| Some(i.path.as_str())), path);
    let mut lines = vec![format!("Active links for {}", path)];
    for (i, item) in items.iter().enumerate() {
        let marker = if active.contains(&i) {
            '*'
        } else {
            ' '
        };
        lines.push(format!(
            "{} {} {} {}",
            format_index(i + 1),
            marker,
            item.title,
            item.path
        ));
    }
    lines
}

pub fn print_active_output(items: &[NavItem], path: &str) {
    for line in format_active_output(items, path) {
        println!("{}", line);
    }
}

// ============================================================================
// simulate
// ============================================================================

fn viewport_label(viewport: ViewportClass) -> &'static str {
    match viewport {
        ViewportClass::Mobile => "mobile",
        ViewportClass::Desktop => "desktop",
    }
}

pub fn format_step_report(report: &StepReport) -> String {
    let step = report
        .step
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "load".to_string());
    let active = if report.active.is_empty() {
        "-".to_string()
    } else {
        report.active.join(", ")
    };
    format!(
        "{:<12} {:<7} {:>5}px  {:<6}  active: {}",
        step,
        viewport_label(report.viewport),
        report.width,
        if report.sidebar_open { "open" } else { "closed" },
        active
    )
}

pub fn print_simulation(reports: &[StepReport]) {
    for report in reports {
        println!("{}", format_step_report(report));
    }
}
