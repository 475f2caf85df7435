//! Fixed timestep accumulator
//!
//! Converts variable wall-clock frame deltas into whole simulation ticks.
//! The simulation itself never sees wall time, only the fixed step.

use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Simulated seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many ticks to run now
    ///
    /// Long stalls (tab in background, debugger) are capped so the driver
    /// never tries to catch up on seconds of backlog in one frame.
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DELTA);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    /// Forget any leftover time (e.g. after resuming from a pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
