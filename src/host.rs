//! Host integration.
//!
//! A host engine (game engine, simulator, headless driver) owns the visible
//! actor. It talks to playback through [`PlaybackActor`] and receives the base
//! transform through a [`TransformSink`] every tick. Foot positions are pulled
//! by the host's inverse-kinematics layer through
//! [`PlaybackActor::effector`].

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use glam::{Quat, Vec3};
use tracing::{info, warn};

use crate::config::Config;
use crate::playback::{BasePose, TrajectoryPlaybackEngine};
use crate::trajectory::LoadError;

/// Receives the base transform the actor should show.
pub trait TransformSink {
    fn set_location(&mut self, location: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
}

/// What a host needs from a trajectory-driven actor.
pub trait PlaybackActor {
    /// Load the configured trajectory below `content_root`.
    ///
    /// Returns whether ticking is enabled. A host must not call
    /// [`on_tick`](Self::on_tick) expecting motion when this returns false.
    fn init(&mut self, content_root: &Path) -> bool;

    /// Advance by `delta_time` seconds and push the new base transform.
    fn on_tick(&mut self, delta_time: f32, sink: &mut dyn TransformSink);

    fn pose(&self) -> BasePose;

    /// Position of foot `index`, for the host's inverse kinematics.
    fn effector(&self, index: usize) -> Vec3;

    fn tick_enabled(&self) -> bool;
}

/// An actor that replays a towr trajectory.
#[derive(Debug, Clone)]
pub struct TrajectoryActor {
    config: Config,
    engine: TrajectoryPlaybackEngine,
    tick_enabled: bool,
    source: Option<PathBuf>,
}

impl TrajectoryActor {
    pub fn new(config: Config) -> Self {
        let engine = TrajectoryPlaybackEngine::new(
            config.playback.advance_mode,
            config.trajectory.effector_layout,
        );

        Self {
            config,
            engine,
            tick_enabled: false,
            source: None,
        }
    }

    /// Load an explicit file instead of the configured one.
    pub fn init_with_path(&mut self, path: &Path) -> bool {
        self.try_init_with_path(path).is_ok()
    }

    /// Like [`init_with_path`](Self::init_with_path), keeping the load error.
    pub fn try_init_with_path(&mut self, path: &Path) -> Result<(), LoadError> {
        self.source = Some(path.to_path_buf());
        let result = self.engine.load(path);
        self.tick_enabled = result.is_ok();

        if self.tick_enabled {
            info!(
                path = %path.display(),
                samples = self.engine.len(),
                "trajectory actor ready"
            );
        } else {
            // actor stays at its spawn transform
            warn!(path = %path.display(), "trajectory actor tick disabled");
        }

        result
    }

    pub fn engine(&self) -> &TrajectoryPlaybackEngine {
        &self.engine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path the actor last tried to load.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl PlaybackActor for TrajectoryActor {
    fn init(&mut self, content_root: &Path) -> bool {
        let path = self.config.trajectory_path(content_root);
        self.init_with_path(&path)
    }

    fn on_tick(&mut self, delta_time: f32, sink: &mut dyn TransformSink) {
        if !self.tick_enabled {
            return;
        }

        self.engine.advance(delta_time);

        // set the base directly; joint angles are the host's business
        let pose = self.engine.current_pose();
        sink.set_location(pose.position);
        sink.set_rotation(pose.orientation);
    }

    fn pose(&self) -> BasePose {
        self.engine.current_pose()
    }

    fn effector(&self, index: usize) -> Vec3 {
        self.engine.end_effector_position(index)
    }

    fn tick_enabled(&self) -> bool {
        self.tick_enabled
    }
}

/// A sink that remembers the transforms it was given.
///
/// [`new`](Self::new) keeps every transform and grows by one entry per tick,
/// which suits tests and short runs. Long-running hosts should use
/// [`bounded`](Self::bounded), which keeps only the most recent ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    pub locations: VecDeque<Vec3>,
    pub rotations: VecDeque<Quat>,
    capacity: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` transforms, dropping the oldest first.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            locations: VecDeque::with_capacity(capacity),
            rotations: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Most recent transform, if any.
    pub fn last(&self) -> Option<BasePose> {
        Some(BasePose {
            position: *self.locations.back()?,
            orientation: *self.rotations.back()?,
        })
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

fn push_bounded<T>(history: &mut VecDeque<T>, value: T, capacity: Option<usize>) {
    if let Some(capacity) = capacity {
        if capacity == 0 {
            return;
        }
        while history.len() >= capacity {
            history.pop_front();
        }
    }
    history.push_back(value);
}

impl TransformSink for RecordingSink {
    fn set_location(&mut self, location: Vec3) {
        push_bounded(&mut self.locations, location, self.capacity);
    }

    fn set_rotation(&mut self, rotation: Quat) {
        push_bounded(&mut self.rotations, rotation, self.capacity);
    }
}
