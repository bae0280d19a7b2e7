//! Cover Page - Assignment cover page generator
//!
//! A terminal form over the cover page record. `export` renders the cover
//! page and saves it as a one-page PDF in the configured directory.

mod commands;
mod state;
mod terminal;

use anyhow::Context;
use commands::Outcome;
use cover_render::{FontFace, FontSet, SkiaRasterizer};
use export_pipeline::{ExportConfig, ExportPipeline};
use state::AppState;
use std::sync::Arc;
use store::{AppSettings, DirectorySink, RenderSettings, SettingsManager, SystemClock};
use terminal::TerminalNotifier;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting cover page generator");

    let app_data_dir = std::env::current_dir().context("no working directory")?;
    let mut settings_manager = SettingsManager::new(app_data_dir);
    let settings_path = settings_manager.settings_path().clone();
    let settings = settings_manager
        .load()
        .await
        .with_context(|| format!("failed to read {}", settings_path.display()))?
        .clone();
    tracing::info!(output = %settings.output.directory.display(), "Settings loaded");

    let state = Arc::new(AppState::new(build_pipeline(&settings)?));

    println!("{}", commands::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };
        match commands::execute(&state, command) {
            Outcome::Print(text) => println!("{}", text),
            Outcome::Nothing => {}
            Outcome::Quit => break,
        }
    }

    tracing::info!("Exiting");
    Ok(())
}

fn build_pipeline(settings: &AppSettings) -> anyhow::Result<ExportPipeline> {
    let rasterizer = build_rasterizer(&settings.render)?;
    let sink = DirectorySink::new(&settings.output.directory);
    let config = ExportConfig {
        scale: settings.render.scale,
        compress: settings.pdf.compress,
        creator: settings.pdf.creator.clone(),
    };

    Ok(ExportPipeline::new(Arc::new(rasterizer), Arc::new(sink))
        .with_clock(Arc::new(SystemClock))
        .with_notifier(Arc::new(TerminalNotifier))
        .with_config(config))
}

/// Fonts from explicit paths if configured, otherwise from the system
fn build_rasterizer(render: &RenderSettings) -> anyhow::Result<SkiaRasterizer> {
    let rasterizer = match &render.regular_font_path {
        Some(regular_path) => {
            let regular = FontFace::from_path(regular_path)?;
            let bold = match &render.bold_font_path {
                Some(bold_path) => FontFace::from_path(bold_path)?,
                None => regular.clone(),
            };
            SkiaRasterizer::new().with_fonts(FontSet::new(regular, bold))
        }
        None => {
            tracing::info!(family = %render.font_family, "Discovering system font");
            SkiaRasterizer::from_system(&render.font_family).unwrap_or_else(|e| {
                tracing::warn!("{}; exports will fail until a font path is configured", e);
                SkiaRasterizer::new()
            })
        }
    };

    match &render.logo_path {
        Some(path) => rasterizer
            .load_logo(path)
            .with_context(|| format!("failed to load logo {}", path.display())),
        None => Ok(rasterizer),
    }
}
