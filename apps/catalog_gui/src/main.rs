mod backend_bridge;
mod config;
mod controller;
mod headless;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{load_settings, Settings};
use crate::controller::{events::UiEvent, FailurePolicy};
use crate::ui::{app::WINDOW_TITLE, CatalogApp};

#[derive(Parser, Debug)]
#[command(about = "Shows the product catalog once the simulated fetch settles")]
struct Args {
    /// Print screens to stdout instead of opening a window.
    #[arg(long)]
    headless: bool,
    /// Simulated fetch latency in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
    /// JSON catalog to load instead of the built-in books.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long)]
    simulate_failure: bool,
    /// `transition` or `log-only`.
    #[arg(long)]
    on_fetch_error: Option<FailurePolicy>,
}

impl Args {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(delay_ms) = self.delay_ms {
            settings.fetch_delay_ms = delay_ms;
        }
        if let Some(path) = &self.catalog {
            settings.catalog_path = Some(path.clone());
        }
        if self.simulate_failure {
            settings.simulate_failure = true;
        }
        if let Some(policy) = self.on_fetch_error {
            settings.failure_policy = policy;
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut settings = load_settings();
    args.apply_to(&mut settings);
    tracing::debug!(?settings, "resolved settings");

    if args.headless {
        return headless::run(&settings, &mut std::io::stdout().lock());
    }
    run_window(settings)
}

fn run_window(settings: Settings) -> Result<()> {
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let worker = backend_bridge::runtime::launch(
        backend_bridge::runtime::source_from_settings(&settings),
        cmd_rx,
        ui_tx,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([480.0, 420.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    let policy = settings.failure_policy;
    let shutdown_tx = cmd_tx.clone();
    let outcome = eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(CatalogApp::new(policy, cmd_tx, ui_rx)))),
    );

    let _ = shutdown_tx.try_send(BackendCommand::Shutdown);
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    outcome.map_err(|err| anyhow::anyhow!("window event loop failed: {err}"))
}
