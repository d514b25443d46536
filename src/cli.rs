//! Command-line interface for fireworks-field

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fireworks-field")]
#[command(about = "Festive fireworks and falling petals", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a window and show the fireworks
    Run {
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for a reproducible show
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render frames headlessly and save the last one as a PNG
    Snapshot {
        /// Output PNG path
        #[arg(short, long)]
        out: PathBuf,

        /// Number of frames to simulate
        #[arg(long, default_value_t = 90)]
        frames: u32,

        /// Bursts launched before the first frame
        #[arg(long, default_value_t = 3)]
        bursts: u32,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for a reproducible image
        #[arg(long)]
        seed: Option<u64>,
    },
}
