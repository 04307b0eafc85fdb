use clap::{Parser, Subcommand};
use foundation_ui::{config, layout, matching, output, simulate};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "foundation-ui")]
#[command(about = "Shared layout and navigation for internal web apps")]
#[command(long_about = "\
Shared layout and navigation for internal web apps

Renders the common page chrome (header, collapsible sidebar, overlay, login
page) from a config.toml and lets you check how the sidebar and active-link
highlighting behave for a given path and viewport width.

A nav link is active when its path equals the page path, or when its path is
not \"/\" and the page path starts with it. Viewports at or below the
configured breakpoint (768px by default) use the mobile drawer.

Run 'foundation-ui gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the shared pages and stylesheet
    Render {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Show which nav links are active for a path
    Active {
        /// URL path to evaluate, e.g. /reports/q1
        path: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replay clicks, resizes and waits against the sidebar controller
    Simulate {
        /// Viewport width at page load
        #[arg(long, default_value_t = 1024)]
        width: u32,
        /// URL path at page load
        #[arg(long, default_value = "/")]
        path: String,
        /// Steps: toggle, outside, overlay, nav:<path>, resize:<width>, wait:<ms>
        steps: Vec<simulate::Step>,
    },
    /// Validate config.toml without rendering
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render { output: out_dir } => {
            let ui_config = config::load_config(&cli.config)?;
            let site = layout::render_site(&ui_config, &out_dir)?;
            output::print_render_output(&site, &out_dir);
        }
        Command::Active { path, json } => {
            let ui_config = config::load_config(&cli.config)?;
            if json {
                let entries: Vec<_> = ui_config
                    .nav
                    .items
                    .iter()
                    .map(|item| {
                        serde_json::json!({
                            "title": item.title,
                            "path": item.path,
                            "active": matching::is_active(&item.path, &path),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                output::print_active_output(&ui_config.nav.items, &path);
            }
        }
        Command::Simulate { width, path, steps } => {
            let ui_config = config::load_config(&cli.config)?;
            let reports = simulate::run(&ui_config, &path, width, &steps)?;
            output::print_simulation(&reports);
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.join("config.toml").display());
            let ui_config = config::load_config(&cli.config)?;
            println!(
                "==> Config is valid ({} nav items, breakpoint {}px)",
                ui_config.nav.items.len(),
                ui_config.sidebar.breakpoint
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
