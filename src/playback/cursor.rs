//! Playback cursor arithmetic.

use serde::{Deserialize, Serialize};

/// How sub-sample progress is handled when the cursor advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvanceMode {
    /// `cursor = floor(cursor + dt / timestep)` on every call.
    ///
    /// Progress that does not reach the next sample within a single call is
    /// dropped, so frames shorter than the timestep never move the cursor.
    #[default]
    Truncate,
    /// Keep a fractional playhead across calls; the cursor is its floor.
    Accumulate,
}

impl AdvanceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AdvanceMode::Truncate => "truncate",
            AdvanceMode::Accumulate => "accumulate",
        }
    }
}

impl std::fmt::Display for AdvanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tolerance, relative to the step, within which a target lands on a whole
/// sample.
///
/// Host frame times arrive as `f32`; a frame that is an exact multiple of the
/// timestep would otherwise truncate to one sample short. The rounding error
/// lives in the step, so the cursor position does not widen the tolerance.
const SNAP_TOLERANCE: f64 = 1.0e-6;

/// Index into a sample sequence, clamped at the last sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    mode: AdvanceMode,
    index: usize,
    /// Fractional playhead, in samples. Only meaningful in accumulate mode.
    playhead: f64,
}

impl Cursor {
    pub fn new(mode: AdvanceMode) -> Self {
        Self {
            mode,
            index: 0,
            playhead: 0.0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn mode(&self) -> AdvanceMode {
        self.mode
    }

    /// Return to the first sample.
    pub fn reset(&mut self) {
        self.index = 0;
        self.playhead = 0.0;
    }

    /// Move forward by `steps` samples and clamp to `len - 1`.
    ///
    /// Negative or non-finite steps leave the cursor untouched, so the index
    /// never decreases. Returns true if the cursor hit the end of the data.
    pub fn advance(&mut self, steps: f64, len: usize) -> bool {
        if len == 0 || !steps.is_finite() || steps < 0.0 {
            return false;
        }

        let last = len - 1;
        let target = snap(
            match self.mode {
                AdvanceMode::Truncate => self.index as f64 + steps,
                AdvanceMode::Accumulate => self.playhead + steps,
            },
            steps,
        );

        if target >= last as f64 {
            self.index = last;
            self.playhead = last as f64;
            return true;
        }

        // target is finite, non-negative and below `last` here
        self.index = target as usize;
        self.playhead = match self.mode {
            AdvanceMode::Truncate => self.index as f64,
            AdvanceMode::Accumulate => target,
        };
        false
    }

    /// True if repeated advances by `steps` can never leave the current
    /// sample.
    ///
    /// In truncate mode that is any step below one sample; in accumulate mode
    /// only a step that is not positive.
    pub fn stalls(&self, steps: f64) -> bool {
        if !steps.is_finite() || steps <= 0.0 {
            return true;
        }
        self.mode == AdvanceMode::Truncate && snap(steps, steps) < 1.0
    }
}

fn snap(target: f64, steps: f64) -> f64 {
    let whole = target.round();
    if (target - whole).abs() <= SNAP_TOLERANCE * steps.max(1.0) {
        whole
    } else {
        target
    }
}
