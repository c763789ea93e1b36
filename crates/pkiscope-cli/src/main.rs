//! pkiscope — QSAR affinity client.
//! Entry point for the command-line binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pkiscope_common::Config;
use pkiscope_ui::{
    ClickOutcome, HttpPredictionApi, NavigationController, Page, PredictionFormController,
};

/// Predict binding affinity for a molecule and drive the page model.
#[derive(Parser, Debug)]
#[command(name = "pkiscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to pkiscope.toml (defaults to PKISCOPE_CONFIG, then ./pkiscope.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a SMILES string to the prediction and rendering endpoints
    Predict {
        smiles: String,
        /// Write the rendered structure to this PNG file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replay in-page anchor clicks and show which link and section are active
    Navigate {
        /// Hrefs to click, e.g. '#predict'
        #[arg(required = true)]
        hrefs: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let (config, load_error) = match loaded {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    info!("pkiscope {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        warn!("Could not load configuration ({e}); using defaults");
    }

    let page = Page::from_config(&config.page);

    match cli.command {
        Commands::Predict { smiles, out } => predict(&config, page, smiles, out).await,
        Commands::Navigate { hrefs } => navigate(page, &hrefs),
    }
}

async fn predict(
    config: &Config,
    page: Page,
    smiles: String,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let api = Arc::new(HttpPredictionApi::new(&config.api)?);
    info!("Using prediction service at {}", config.api.base_url);

    let mut form = PredictionFormController::bind(page.form, api);
    form.set_input(smiles);
    form.submit().await.join().await;

    println!("{}", form.result_region().lock().await.text());

    let view = form.structure_view();
    let view = view.lock().await;
    if view.is_hidden() {
        println!("Structure: not available");
        return Ok(());
    }

    let png = view.png_bytes()?.unwrap_or_default();
    println!("Structure: {} byte PNG", png.len());
    if let Some(path) = out {
        tokio::fs::write(&path, &png)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Structure written to {}", path.display());
    }
    Ok(())
}

fn navigate(page: Page, hrefs: &[String]) -> anyhow::Result<()> {
    let mut nav = NavigationController::bind(page.registry)?;
    println!("Active section: {}", nav.active_section().unwrap_or("-"));

    for href in hrefs {
        match nav.click_href(href) {
            Ok(ClickOutcome::Navigated { link, section, .. }) => println!(
                "{} -> link {}, section {}",
                href,
                link.0,
                section.as_deref().unwrap_or("-")
            ),
            Ok(ClickOutcome::NotIntercepted) => println!("{} -> not an in-page link", href),
            Err(e) => println!("{} -> {}", href, e),
        }
    }
    Ok(())
}
