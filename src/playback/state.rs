//! Playback status and pose types shared by the engine and its hosts.

use glam::{Quat, Vec3};
use serde::Serialize;

/// Lifecycle of a playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// Nothing loaded yet
    #[default]
    Unloaded,
    /// A trajectory is loaded and the cursor may advance
    Playing,
    /// Loading failed; advance and queries return defaults
    Disabled,
}

impl PlaybackStatus {
    pub fn is_playing(self) -> bool {
        self == PlaybackStatus::Playing
    }
}

/// Position and orientation of the robot base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasePose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for BasePose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}
