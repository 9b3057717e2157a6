//! towr-replay - replay precomputed legged-robot trajectories
//!
//! Loads a towr trajectory (CSV with base pose and foot positions per sample),
//! derives the sampling interval from the data, and steps through it once per
//! host tick, holding the last pose at the end.
//!
//! - [`trajectory`] - file format and sample parsing
//! - [`playback`] - the playback engine and cursor
//! - [`host`] - the actor interface a host engine drives
//! - [`config`] - TOML configuration
//! - [`cli`] - command line definition shared by the binary and xtask

pub mod cli;
pub mod config;
pub mod host;
pub mod playback;
pub mod trajectory;

pub use config::Config;
pub use host::{PlaybackActor, RecordingSink, TrajectoryActor, TransformSink};
pub use playback::{AdvanceMode, BasePose, PlaybackStatus, TrajectoryPlaybackEngine};
pub use trajectory::{EffectorLayout, LoadError, ParseError, TrajectoryFile, TrajectorySample};
