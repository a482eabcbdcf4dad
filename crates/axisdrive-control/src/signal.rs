//! Open-loop test signal generator.
//!
//! When enabled on a controller, the sampled value replaces the mode's
//! setpoint for that tick. Phase is tracked as a fraction of a period in
//! `[0, 1)` so long runs do not lose precision.

use axisdrive_errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Waveform shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// +1 for the first half period, -1 for the second
    #[default]
    Square,
    /// sin(2πp)
    Sine,
    /// Peaks at a quarter period, troughs at three quarters
    Triangle,
    /// Rises linearly from -1 to +1 across the period, centered on zero
    Sawtooth,
}

impl Waveform {
    /// Unit-amplitude value at `phase` (fraction of a period in `[0, 1)`).
    #[inline]
    pub fn value_at(self, phase: f64) -> f64 {
        match self {
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
            Waveform::Sawtooth => {
                if phase < 0.5 {
                    2.0 * phase
                } else {
                    2.0 * phase - 2.0
                }
            }
        }
    }
}

/// Signal generator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Waveform shape
    pub waveform: Waveform,
    /// Peak deviation from `offset`, in setpoint units
    pub amplitude: f64,
    /// Frequency (Hz)
    pub frequency_hz: f64,
    /// Constant added to every sample
    pub offset: f64,
}

impl SignalConfig {
    /// Create a signal configuration.
    pub const fn new(waveform: Waveform, amplitude: f64, frequency_hz: f64, offset: f64) -> Self {
        Self {
            waveform,
            amplitude,
            frequency_hz,
            offset,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        ValidationError::require_finite("signal.amplitude", self.amplitude)?;
        ValidationError::require_non_negative("signal.frequency_hz", self.frequency_hz)?;
        ValidationError::require_finite("signal.offset", self.offset)?;
        Ok(())
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self::new(Waveform::Square, 10.0, 1.0, 0.0)
    }
}

/// Stateful waveform sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalGenerator {
    config: SignalConfig,
    phase: f64,
}

impl SignalGenerator {
    /// Create a generator at phase zero.
    pub fn new(config: SignalConfig) -> Self {
        Self { config, phase: 0.0 }
    }

    /// Current configuration.
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Replace the configuration, keeping the phase.
    pub fn set_config(&mut self, config: SignalConfig) {
        self.config = config;
    }

    /// Current phase as a fraction of a period.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Sample at the current phase, then advance by `dt`.
    ///
    /// # RT Safety
    ///
    /// - No heap allocations
    /// - O(1) time complexity
    #[inline]
    pub fn sample(&mut self, dt: f64) -> f64 {
        let value = self.config.offset + self.config.amplitude * self.config.waveform.value_at(self.phase);
        let step = self.config.frequency_hz * dt;
        if step.is_finite() {
            self.phase = (self.phase + step).rem_euclid(1.0);
        }
        value
    }

    /// Rewind to phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_wave_halves() {
        let mut generator = SignalGenerator::new(SignalConfig::new(Waveform::Square, 2.0, 1.0, 1.0));
        let samples: Vec<f64> = (0..4).map(|_| generator.sample(0.25)).collect();
        assert_eq!(samples, vec![3.0, 3.0, -1.0, -1.0]);
    }

    #[test]
    fn test_triangle_shape() {
        let w = Waveform::Triangle;
        assert!(w.value_at(0.0).abs() < 1e-12);
        assert!((w.value_at(0.25) - 1.0).abs() < 1e-12);
        assert!(w.value_at(0.5).abs() < 1e-12);
        assert!((w.value_at(0.75) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sawtooth_shape() {
        let w = Waveform::Sawtooth;
        assert!(w.value_at(0.0).abs() < 1e-12);
        assert!((w.value_at(0.25) - 0.5).abs() < 1e-12);
        assert!((w.value_at(0.5) + 1.0).abs() < 1e-12);
        assert!((w.value_at(0.75) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sine_quarter_period() {
        let mut generator = SignalGenerator::new(SignalConfig::new(Waveform::Sine, 5.0, 2.0, 0.0));
        generator.sample(0.125);
        let peak = generator.sample(0.125);
        assert!((peak - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_phase_wraps_and_resets() {
        let mut generator = SignalGenerator::new(SignalConfig::new(Waveform::Sine, 1.0, 10.0, 0.0));
        for _ in 0..1_000 {
            generator.sample(0.0137);
            assert!((0.0..1.0).contains(&generator.phase()));
        }
        generator.reset();
        assert!(generator.phase().abs() < f64::EPSILON);
    }

    #[test]
    fn test_waveform_serde_names() -> std::result::Result<(), serde_json::Error> {
        let json = serde_json::to_string(&Waveform::Sawtooth)?;
        assert_eq!(json, "\"sawtooth\"");
        let parsed: SignalConfig = serde_json::from_str(r#"{"waveform":"triangle","amplitude":3.0}"#)?;
        assert_eq!(parsed.waveform, Waveform::Triangle);
        assert!((parsed.frequency_hz - 1.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_config_validation() {
        assert!(SignalConfig::default().validate().is_ok());
        assert!(SignalConfig::new(Waveform::Sine, 1.0, -1.0, 0.0).validate().is_err());
        assert!(SignalConfig::new(Waveform::Sine, f64::INFINITY, 1.0, 0.0).validate().is_err());
    }
}
