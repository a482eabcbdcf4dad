//! Common reset behavior for per-stage state.

use crate::{PidState, ProfileState, SignalGenerator, SoftLimitState};

/// Stage state that can be returned to its initial condition.
pub trait ControlState {
    /// Reset to the initial condition.
    fn reset(&mut self);
}

impl ControlState for ProfileState {
    fn reset(&mut self) {
        self.reset_to(0.0, 0.0);
    }
}

impl ControlState for PidState {
    fn reset(&mut self) {
        *self = Self::new();
    }
}

impl ControlState for SoftLimitState {
    fn reset(&mut self) {
        *self = Self::new();
    }
}

impl ControlState for SignalGenerator {
    fn reset(&mut self) {
        SignalGenerator::reset(self);
    }
}
