//! Trajectory playback.
//!
//! This module owns a loaded trajectory and moves a cursor through it, one
//! host tick at a time:
//!
//! - `engine`: [`TrajectoryPlaybackEngine`], load/advance/query
//! - `cursor`: cursor arithmetic and the [`AdvanceMode`] accumulation rule
//! - `state`: [`PlaybackStatus`] and [`BasePose`]
//!
//! # Usage
//!
//! ```no_run
//! use towr_replay::playback::TrajectoryPlaybackEngine;
//!
//! let mut engine = TrajectoryPlaybackEngine::default();
//! if engine.load("TowrTrajectories/anymal_wall_new3.txt").is_ok() {
//!     engine.advance(1.0 / 60.0);
//!     let pose = engine.current_pose();
//!     let front_left = engine.end_effector_position(0);
//!     println!("{:?} {:?}", pose.position, front_left);
//! }
//! ```

mod cursor;
mod engine;
mod state;

pub use cursor::{AdvanceMode, Cursor};
pub use engine::{TrajectoryPlaybackEngine, DEFAULT_TIMESTEP};
pub use state::{BasePose, PlaybackStatus};
