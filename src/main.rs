use anyhow::Context;
use autopaint::{
    init_logging, load_scene, load_settings, CallbackSink, FillStrategyKind, PlotDriver, PlotEvent,
};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One motion command per line
    Text,
    /// Every event as a JSON object per line
    Json,
}

/// Convert vector artwork into pen-plotter motion commands
#[derive(Debug, Parser)]
#[command(
    name = "autopaint",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")")
)]
struct Cli {
    /// Scene JSON file
    scene: PathBuf,

    /// Settings file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the fill strategy (hatch, pocket, overlay)
    #[arg(short, long)]
    strategy: Option<FillStrategyKind>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the effective settings to this file and continue
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Log recovered geometry problems
    #[arg(short, long)]
    debug: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    init_logging(level, cli.log_json)?;

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(strategy) = cli.strategy {
        settings.fill_strategy = strategy;
    }
    settings.debug |= cli.debug;
    if let Some(path) = &cli.save_config {
        settings
            .save_to_file(path)
            .with_context(|| format!("Failed to save settings to {}", path.display()))?;
        info!("Settings written to {}", path.display());
    }

    let scene = load_scene(&cli.scene)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;
    let format = cli.format;
    let mut sink = CallbackSink(|event: PlotEvent| {
        if write_error.is_some() {
            return;
        }
        let line = match (&event, format) {
            (PlotEvent::Motion { command }, OutputFormat::Text) => Some(command.to_string()),
            (_, OutputFormat::Text) => {
                debug!("{}", event.description());
                None
            }
            (_, OutputFormat::Json) => serde_json::to_string(&event).ok(),
        };
        if let Some(line) = line {
            if let Err(e) = writeln!(out, "{}", line) {
                write_error = Some(e);
            }
        }
    });

    let mut driver = PlotDriver::new();
    driver
        .start(&scene, settings, &mut sink)
        .context("Invalid settings")?;
    let phase = driver.run_to_completion(&mut sink);
    drop(sink);

    if let Some(e) = write_error {
        return Err(e).context("Failed to write motion output");
    }
    info!(
        "Finished ({}): {} polylines",
        phase,
        driver.ordered_paths().len()
    );
    Ok(())
}
