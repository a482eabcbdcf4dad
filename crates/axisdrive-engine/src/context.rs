//! Simulation clock shared by every component on a scheduler.

use axisdrive_errors::{Result, ValidationError};

/// Fixed step time, pause flag and tick counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationContext {
    step_time: f64,
    paused: bool,
    tick: u64,
}

impl SimulationContext {
    /// Create a running context with the given step time (s).
    pub fn new(step_time: f64) -> Result<Self> {
        ValidationError::require_positive("step_time", step_time)?;
        Ok(Self {
            step_time,
            paused: false,
            tick: 0,
        })
    }

    /// Step time (s).
    pub fn step_time(&self) -> f64 {
        self.step_time
    }

    /// Change the step time. Rejects non-positive values.
    pub fn set_step_time(&mut self, step_time: f64) -> Result<()> {
        self.step_time = ValidationError::require_positive("step_time", step_time)?;
        Ok(())
    }

    /// Whether ticks are currently halted.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Halt or resume ticking.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated time elapsed (s).
    pub fn elapsed(&self) -> f64 {
        self.tick as f64 * self.step_time
    }

    pub(crate) fn advance(&mut self) {
        self.tick = self.tick.saturating_add(1);
    }
}

impl Default for SimulationContext {
    /// 500 Hz.
    fn default() -> Self {
        Self {
            step_time: 0.002,
            paused: false,
            tick: 0,
        }
    }
}
