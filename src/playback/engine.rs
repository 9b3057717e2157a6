//! The trajectory playback engine.

use std::io::BufRead;
use std::path::Path;

use glam::Vec3;
use tracing::{debug, error, info, trace};

use super::cursor::{AdvanceMode, Cursor};
use super::state::{BasePose, PlaybackStatus};
use crate::trajectory::{EffectorLayout, LoadError, TrajectoryFile, TrajectorySample};

/// Timestep reported before a trajectory has been loaded, in seconds.
pub const DEFAULT_TIMESTEP: f64 = 0.0025;

/// Replays a loaded trajectory one host tick at a time.
///
/// The host calls [`load`](Self::load) once and then
/// [`advance`](Self::advance) once per frame, reading the pose back through
/// [`current_pose`](Self::current_pose) and
/// [`end_effector_position`](Self::end_effector_position). Per-frame calls
/// never fail: without a loaded trajectory they return the origin pose and
/// zero vectors.
#[derive(Debug, Clone)]
pub struct TrajectoryPlaybackEngine {
    samples: Vec<TrajectorySample>,
    timestep: f64,
    cursor: Cursor,
    status: PlaybackStatus,
    layout: EffectorLayout,
}

impl TrajectoryPlaybackEngine {
    pub fn new(mode: AdvanceMode, layout: EffectorLayout) -> Self {
        Self {
            samples: Vec::new(),
            timestep: DEFAULT_TIMESTEP,
            cursor: Cursor::new(mode),
            status: PlaybackStatus::Unloaded,
            layout,
        }
    }

    /// Load a trajectory file and start playback from its first sample.
    ///
    /// On failure the engine is left empty and [`PlaybackStatus::Disabled`].
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        let result = TrajectoryFile::parse(path, self.layout);

        if let Err(LoadError::ResourceNotFound { path, .. }) = &result {
            error!(
                "Couldn't find file {}. Please double-check the trajectory path",
                path.display()
            );
        }

        self.finish_load(result)
    }

    /// Load a trajectory from any reader. See [`load`](Self::load).
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> Result<(), LoadError> {
        let result = TrajectoryFile::parse_reader(reader, self.layout);
        self.finish_load(result)
    }

    /// Take ownership of an already parsed trajectory.
    pub fn load_file(&mut self, file: TrajectoryFile) {
        info!(
            samples = file.samples.len(),
            effectors = file.effector_count(),
            timestep = file.timestep,
            "trajectory states read"
        );

        self.samples = file.samples;
        self.timestep = file.timestep;
        self.cursor.reset();
        self.status = PlaybackStatus::Playing;
    }

    fn finish_load(&mut self, result: Result<TrajectoryFile, LoadError>) -> Result<(), LoadError> {
        match result {
            Ok(file) => {
                self.load_file(file);
                Ok(())
            }
            Err(err) => {
                if !matches!(err, LoadError::ResourceNotFound { .. }) {
                    error!(
                        error = &err as &(dyn std::error::Error + 'static),
                        "failed to load trajectory"
                    );
                }
                self.samples.clear();
                self.timestep = DEFAULT_TIMESTEP;
                self.cursor.reset();
                self.status = PlaybackStatus::Disabled;
                Err(err)
            }
        }
    }

    /// Move the cursor forward by `delta_time` seconds.
    ///
    /// Does nothing unless a trajectory is playing. Negative or non-finite
    /// deltas are ignored. Once the last sample is reached the cursor stays
    /// there.
    pub fn advance(&mut self, delta_time: f32) {
        if !self.is_playing() {
            trace!(status = ?self.status, "advance ignored");
            return;
        }

        let before = self.cursor.index();
        let steps = f64::from(delta_time) / self.timestep;
        let at_end = self.cursor.advance(steps, self.samples.len());

        if at_end && before != self.cursor.index() {
            debug!(index = self.cursor.index(), "reached end of trajectory, holding last pose");
        }
    }

    /// True if advancing by `delta_time` every frame would never move the
    /// cursor off its current sample.
    pub fn would_stall(&self, delta_time: f32) -> bool {
        self.cursor.stalls(f64::from(delta_time) / self.timestep)
    }

    /// Base pose at the cursor, or the origin when nothing is playing.
    pub fn current_pose(&self) -> BasePose {
        self.current_sample()
            .map(|sample| BasePose {
                position: sample.base_position,
                orientation: sample.base_orientation,
            })
            .unwrap_or_default()
    }

    /// Position of end effector `index` at the cursor.
    ///
    /// Returns zero when nothing is loaded. `index` must be below
    /// [`effector_count`](Self::effector_count); debug builds panic otherwise,
    /// release builds return zero.
    pub fn end_effector_position(&self, index: usize) -> Vec3 {
        if self.samples.is_empty() {
            return Vec3::ZERO;
        }

        let position = self.try_end_effector_position(index);
        debug_assert!(
            position.is_some(),
            "end effector {} out of range ({} effectors)",
            index,
            self.effector_count()
        );
        position.unwrap_or(Vec3::ZERO)
    }

    /// Position of end effector `index`, or `None` if there is no such effector.
    pub fn try_end_effector_position(&self, index: usize) -> Option<Vec3> {
        self.current_sample()?.foot_positions.get(index).copied()
    }

    pub fn current_sample(&self) -> Option<&TrajectorySample> {
        if !self.is_playing() {
            return None;
        }
        self.samples.get(self.cursor.index())
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    pub fn advance_mode(&self) -> AdvanceMode {
        self.cursor.mode()
    }

    pub fn layout(&self) -> EffectorLayout {
        self.layout
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Seconds per sample.
    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    pub fn effector_count(&self) -> usize {
        self.samples.first().map_or(0, TrajectorySample::effector_count)
    }

    /// Trajectory time at the cursor, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.cursor.index() as f64 * self.timestep
    }

    /// Trajectory time of the last sample, in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len().saturating_sub(1) as f64 * self.timestep
    }

    /// True once the cursor holds the last sample.
    pub fn is_finished(&self) -> bool {
        self.is_playing() && self.cursor.index() + 1 == self.samples.len()
    }
}

impl Default for TrajectoryPlaybackEngine {
    fn default() -> Self {
        Self::new(AdvanceMode::default(), EffectorLayout::default())
    }
}
