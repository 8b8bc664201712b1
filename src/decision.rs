//! The irrigation decision and the light proxy index.
//!
//! Both are pure functions of a single cycle's readings. There is no
//! hysteresis: humidity hovering around the limit flips the decision from one
//! cycle to the next, and that is the expected behavior.

use crate::config::ControllerConfig;

/// Rescales a raw light sample onto the 0 - index_scale proxy index
/// This is a linear proxy, not a calibrated pH measurement
/// param raw_light: Raw ADC light sample
/// param config: Controller configuration
pub fn derived_index(raw_light: u16, config: &ControllerConfig) -> f32 {
    raw_light as f32 * config.index_scale as f32 / config.adc_max as f32
}

/// Whether this cycle irrigates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decision(pub bool);

impl Decision {
    pub fn irrigate(self) -> bool {
        self.0
    }

    /// Pump flag shown on the display: 1 or 0
    pub fn display_flag(self) -> u8 {
        if self.0 {
            1
        } else {
            0
        }
    }

    /// Pump level sent to the telemetry stream: 100 or 0, for plotting next to humidity
    pub fn telemetry_level(self) -> u8 {
        if self.0 {
            100
        } else {
            0
        }
    }
}

/// Irrigate when humidity is strictly below the limit and at least one nutrient is present
/// param humidity: Resolved humidity (never NaN)
/// param nutrient_p: P presence
/// param nutrient_k: K presence
/// param config: Controller configuration
pub fn needs_irrigation(
    humidity: f32,
    nutrient_p: bool,
    nutrient_k: bool,
    config: &ControllerConfig,
) -> Decision {
    Decision(humidity < config.humidity_limit && (nutrient_p || nutrient_k))
}
