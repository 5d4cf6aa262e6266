use std::path::PathBuf;

use clap::Parser;
use gpui::{App, Application};
use tracing::{debug, error};

use subsidy_ui::{
    config::AppConfig,
    logging::{self, LogOptions},
    open_main_window, setup_app,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Energy-saving appliance subsidy application form.
///
/// Validates the applicant's details and shows the subsidised price for the
/// selected energy-efficiency tier.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML file overriding the pricing table and log settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,subsidy_core=trace`.
    /// Overrides the config file and `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not log to stdout.
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    /// CLI flags take precedence over the config file.
    fn log_options(
        &self,
        config: &AppConfig,
    ) -> LogOptions {
        LogOptions {
            filter: self.log_level.clone().or_else(|| config.log.level.clone()),
            file: self.log_file.clone().or_else(|| config.log.file.clone()),
            quiet: self.quiet || !config.log.stdout,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    logging::init_logging(&cli.log_options(&config))?;

    let pricing = config.pricing_calculator()?;
    debug!(tiers = pricing.table().tiers.len(), "pricing table loaded");

    Application::new()
        .with_assets(gpui_component_assets::Assets)
        .run(move |cx: &mut App| {
            setup_app(cx);
            if let Err(error) = open_main_window(cx, pricing) {
                error!(?error, "failed to open main window");
                cx.quit();
            }
        });

    Ok(())
}
