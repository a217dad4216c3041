//! # Image Optimizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Costruzione della configurazione (env, file JSON, flag CLI)
//! - Ottimizzazione sequenziale dei file target con progress bar
//!
//! ## Precedenza configurazione:
//! 1. Variabili d'ambiente (`IMAGES_OPTIMIZE_TOOLS`, `IMAGES_DEBUG`, `IMAGES_LEGACY_RESULT`)
//! 2. `--config file.json` (sostituisce i valori d'ambiente)
//! 3. Flag CLI (`--tools`, `--debug`, `--report-success`)
//!
//! ## Esempio di utilizzo:
//! ```bash
//! image-optimizer static/img --tools jpegtran,optipng --report-success --verbose
//! image-optimizer --check-tools
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use image_optimizer::file_manager::FileManager;
use image_optimizer::progress::{OptimizationStats, ProgressManager};
use image_optimizer::{Config, Optimizer, ToolPathResolver, ToolSet};

#[derive(Parser)]
#[command(name = "image-optimizer")]
#[command(about = "Optimize GIF, JPEG and PNG files in place with external tools")]
struct Args {
    /// Files or directories to optimize (directories are walked recursively)
    #[arg(required_unless_present = "check_tools")]
    paths: Vec<PathBuf>,

    /// Comma-separated list of enabled tools (e.g. "jpegtran,optipng")
    #[arg(short, long)]
    tools: Option<String>,

    /// Keep a <file>.orig copy of every file before optimizing it
    #[arg(short, long)]
    debug: bool,

    /// Report real success instead of the legacy always-false result
    #[arg(long)]
    report_success: bool,

    /// JSON configuration file (replaces environment settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the commands that would run, without running them
    #[arg(long)]
    dry_run: bool,

    /// Print which tools are available and exit
    #[arg(long)]
    check_tools: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = build_config(&args).await?;

    if args.check_tools {
        println!("{}", ToolPathResolver::new().tools_report(&config.tools));
        return Ok(());
    }

    let optimizer = Optimizer::new(config);
    let targets = FileManager::collect_targets(&args.paths);
    info!("Found {} target(s), tools: {}", targets.len(), optimizer.config().tools);
    if optimizer.config().legacy_always_false {
        info!("Legacy result mode: every file reports false (use --report-success)");
    }

    if args.dry_run {
        for path in &targets {
            match optimizer.command_for(path).await {
                Ok(command) => println!("{}: {}", path.display(), command),
                Err(e) => println!("{}: skipped ({})", path.display(), e),
            }
        }
        return Ok(());
    }

    let progress = if targets.len() > 1 {
        ProgressManager::new(targets.len() as u64)
    } else {
        ProgressManager::hidden()
    };
    let mut stats = OptimizationStats::new();

    for path in &targets {
        let original_size = FileManager::file_size(path).await.unwrap_or(0);
        let succeeded = optimizer.optimize(path).await;
        let new_size = FileManager::file_size(path).await.unwrap_or(original_size);

        stats.add_result(succeeded, original_size, new_size);
        progress.update(&format!(
            "{}: {:.1}% saved",
            path.file_name().unwrap_or_default().to_string_lossy(),
            FileManager::calculate_reduction(original_size, new_size)
        ));
    }

    progress.finish("done");
    info!("{}", stats.format_summary());

    Ok(())
}

async fn build_config(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        Some(ref path) => {
            if !path.exists() {
                return Err(anyhow::anyhow!("Config file does not exist: {}", path.display()));
            }
            Config::from_file(path).await?
        }
        None => Config::from_env()?,
    };

    if let Some(ref tools) = args.tools {
        config.tools = tools.parse::<ToolSet>()?;
    }
    if args.debug {
        config.debug = true;
    }
    if args.report_success {
        config.legacy_always_false = false;
    }

    Ok(config)
}
