//! BI network dashboard - native desktop entry point
//!
//! Usage:
//!   bi-dashboard --data governorate_networks.json
//!   bi-dashboard --data https://example.org/governorate_networks.json --export-dir exports
//!
//! Log verbosity follows RUST_LOG, e.g. `RUST_LOG=bi_network_graph=debug`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use bi_network_dashboard::{DashboardApp, DashboardConfig};
use clap::Parser;
use eframe::egui;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "bi-dashboard", version, about = "BI network dashboard")]
struct Cli {
    /// Dataset document: local path or http(s) URL
    #[arg(long, env = "BI_DASHBOARD_DATA")]
    data: Option<String>,

    /// YAML file merged over the built-in configuration
    #[arg(long, env = "BI_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory that exports are written to
    #[arg(long, env = "BI_DASHBOARD_EXPORT_DIR")]
    export_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bi_network_dashboard=info,bi_network_graph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = DashboardConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(cli.data, cli.export_dir);

    info!(
        data = %config.data_source,
        export_dir = %config.export_dir.display(),
        "Starting BI network dashboard"
    );

    let runtime = Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("failed to create tokio runtime")?,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "BI Network Dashboard",
        options,
        Box::new(move |cc| {
            let app: Box<dyn eframe::App> = Box::new(DashboardApp::new(cc, config, runtime));
            Ok(app)
        }),
    )
    .map_err(|e| anyhow!("eframe error: {e}"))
}
