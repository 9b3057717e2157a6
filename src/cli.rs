//! Command line definition.
//!
//! Lives in the library so xtask can render the man page from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("TOWR_REPLAY_BUILD_DATE"),
    ")"
);

/// Replay precomputed legged-robot trajectories
#[derive(Debug, Parser)]
#[command(name = "towr-replay", version, long_version = LONG_VERSION)]
#[command(about = "Replay precomputed legged-robot trajectories")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a trajectory and print a summary
    Info(InfoArgs),
    /// Drive playback headlessly and print the pose of every frame
    Play(PlayArgs),
    /// Show or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Trajectory file
    pub file: PathBuf,

    /// Read feet from grouped columns instead of per-effector blocks
    #[arg(long)]
    pub grouped: bool,
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Trajectory file (defaults to the configured trajectory)
    pub file: Option<PathBuf>,

    /// Content root the configured trajectory directory is relative to
    #[arg(long, default_value = ".")]
    pub content_dir: PathBuf,

    /// Frames per second of the simulated host (defaults to the config)
    #[arg(long)]
    pub fps: Option<u32>,

    /// Stop after this many frames (default: until the last sample)
    #[arg(long)]
    pub frames: Option<usize>,

    /// Sleep between frames to play in real time (Ctrl-C stops)
    #[arg(long)]
    pub realtime: bool,

    /// Emit one JSON object per frame
    #[arg(long)]
    pub json: bool,

    /// Keep sub-sample progress between frames
    #[arg(long)]
    pub accumulate: bool,

    /// Read feet from grouped columns instead of per-effector blocks
    #[arg(long)]
    pub grouped: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write a default configuration file if none exists
    Init,
}
