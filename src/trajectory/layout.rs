//! Column layout of a towr trajectory row.
//!
//! Every data row starts with a fixed prefix followed by one block of
//! columns per end effector:
//!
//! ```text
//! t_abs, t_rel,                       2  times (nanoseconds)
//! base pos x, y, z,                   3  metres
//! base quat x, y, z, w,               4
//! lin vel, lin acc, ang vel, ang acc  12 ignored
//! per effector: pos, vel, acc, force, contact  13
//! ```

use serde::{Deserialize, Serialize};

/// Number of leading time columns (absolute and relative time).
pub const TIME_COLUMNS: usize = 2;

/// Column of the relative time, in nanoseconds.
pub const TIMESTEP_COLUMN: usize = 1;

/// First column of the base position.
pub const BASE_POSITION_COLUMN: usize = TIME_COLUMNS;

/// First column of the base orientation quaternion (x, y, z, w).
pub const BASE_ORIENTATION_COLUMN: usize = BASE_POSITION_COLUMN + 3;

/// Columns holding base linear/angular velocity and acceleration.
const BASE_DERIVATIVE_COLUMNS: usize = 3 + 3 + 3 + 3;

/// Columns preceding the first end-effector block.
pub const FIXED_PREFIX_LEN: usize = BASE_ORIENTATION_COLUMN + 4 + BASE_DERIVATIVE_COLUMNS;

/// Columns per end effector: position, velocity, acceleration, force, contact.
pub const EFFECTOR_STRIDE: usize = 3 + 3 + 3 + 3 + 1;

/// Kinematic columns per end effector: position, velocity, acceleration.
const EFFECTOR_KINEMATIC_COLUMNS: usize = 3 + 3 + 3;

/// towr exports metres, hosts work in centimetres.
pub const POSITION_SCALE: f32 = 100.0;

/// The timestep column is encoded in nanoseconds.
pub const NANOS_PER_SECOND: f64 = 1.0e9;

/// Where an end effector's position lives inside its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectorLayout {
    /// One contiguous 13-column block per effector.
    #[default]
    Interleaved,
    /// Kinematic blocks of all effectors first, then forces, then contacts.
    Grouped,
}

impl EffectorLayout {
    /// Column of the x position of effector `effector`.
    pub fn position_column(self, effector: usize) -> usize {
        match self {
            EffectorLayout::Interleaved => FIXED_PREFIX_LEN + effector * EFFECTOR_STRIDE,
            EffectorLayout::Grouped => FIXED_PREFIX_LEN + effector * EFFECTOR_KINEMATIC_COLUMNS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EffectorLayout::Interleaved => "interleaved",
            EffectorLayout::Grouped => "grouped",
        }
    }
}

impl std::fmt::Display for EffectorLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
