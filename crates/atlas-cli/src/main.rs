//! Command-line front end: generate a classified map and preview it in the terminal.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p atlas-cli -- --seed 7 --width 120 --height 40`.

use std::process::ExitCode;

use atlas_cli::{AppError, coverage_summary, run};
use atlas_config::{CliArgs, Config};
use atlas_terrain::render::render_glyphs;
use clap::Parser;

fn configure_threads(requested: usize) -> Result<(), AppError> {
    let threads = if requested == 0 {
        num_cpus::get()
    } else {
        requested
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("atlas-worker-{i}"))
        .build_global()?;
    tracing::debug!(threads, "worker pool configured");
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(Config::default_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    atlas_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = configure_threads(config.render.threads) {
        tracing::warn!("{e}; using the default worker pool");
    }

    let report = match run(&config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.render.ascii_preview {
        println!("{}", render_glyphs(&report.map.grid, &report.registry));
    }
    if config.render.coverage_summary {
        print!("{}", coverage_summary(&report.map.grid, &report.registry));
    }

    ExitCode::SUCCESS
}
