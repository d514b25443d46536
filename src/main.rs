//! Main entry point for the fireworks-field CLI

mod cli;

use clap::Parser;
use fireworks_field::{render_snapshot, FieldConfig, Result};
use std::path::Path;
use std::process::ExitCode;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Set verbosity
    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        log::set_max_level(log::LevelFilter::Error);
    }

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Run { config, seed } => {
            let config = load_config(config.as_deref(), seed)?;
            fireworks_field::run(config)
        }
        Commands::Snapshot {
            out,
            frames,
            bursts,
            config,
            seed,
        } => {
            let config = load_config(config.as_deref(), seed)?;
            let pixmap = render_snapshot(config, frames, bursts)?;
            pixmap.save_png(&out)?;
            println!("Wrote {}", out.display());
            Ok(())
        }
    }
}

/// Load the configuration file if one was given, then apply the seed override.
fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<FieldConfig> {
    let mut config = match path {
        Some(path) => FieldConfig::load(path)?,
        None => FieldConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}
