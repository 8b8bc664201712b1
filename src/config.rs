/// Humidity (%) below which irrigation may start
pub const HUMIDITY_LIMIT: f32 = 40.0;
/// Largest value the 12-bit ADC can report
pub const ADC_MAX: u16 = 4095;
/// Upper bound of the light proxy index
pub const INDEX_SCALE: u8 = 14;
/// Humidity (%) used when the sensor reports NaN
pub const FALLBACK_HUMIDITY: f32 = 35.0;
/// Delay between two cycles
pub const POLL_INTERVAL_MS: u32 = 1000;
/// Serial telemetry baud rate
pub const TELEMETRY_BAUD: u32 = 9600;

/// Display geometry: 16 columns, 2 rows
pub const DISPLAY_COLUMNS: usize = 16;
pub const DISPLAY_ROWS: u8 = 2;

/// ControllerConfig holds the constants the decision cycle works with.
/// humidity_limit: Strict upper bound for irrigation, in %
/// adc_max: Full-scale raw light reading
/// index_scale: Full-scale proxy index
/// fallback_humidity: Substitute for an invalid humidity reading
/// poll_interval_ms: Sleep between cycles
///
/// Built once at start-up and never changed by the cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    pub humidity_limit: f32,
    pub adc_max: u16,
    pub index_scale: u8,
    pub fallback_humidity: f32,
    pub poll_interval_ms: u32,
}

impl ControllerConfig {
    pub const fn new() -> Self {
        Self {
            humidity_limit: HUMIDITY_LIMIT,
            adc_max: ADC_MAX,
            index_scale: INDEX_SCALE,
            fallback_humidity: FALLBACK_HUMIDITY,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}
