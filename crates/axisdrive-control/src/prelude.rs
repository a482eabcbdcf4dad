//! Prelude for convenient imports.
//!
//! ```
//! use axisdrive_control::prelude::*;
//! ```

pub use crate::CurrentCommand;
pub use crate::angle::{normalize_deg, unwrap_circular};
pub use crate::gain::{GainSchedule, position_to_velocity};
pub use crate::pid::{PidGains, PidState, velocity_regulator};
pub use crate::profile::{ProfileLimits, ProfileState, profile_generator};
pub use crate::signal::{SignalConfig, SignalGenerator, Waveform};
pub use crate::soft_limit::{SoftLimitConfig, SoftLimitState, soft_limit_override};
pub use crate::state::ControlState;
