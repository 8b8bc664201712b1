//! Peripheral fault reporting.
//!
//! Humidity faults never show up here: the sensor layer swaps a NaN reading
//! for the fallback value before anything else sees it.

use core::fmt;

use embedded_hal::digital::ErrorKind;

/// Names the peripheral whose call failed during a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Reading a nutrient presence input failed
    NutrientSensor(ErrorKind),
    /// Driving the relay or the LED failed
    Actuator(ErrorKind),
    /// The character display rejected a write
    Display,
    /// The telemetry stream rejected a write, or a line did not fit its buffer
    Telemetry,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NutrientSensor(kind) => write!(f, "nutrient sensor read failed: {kind}"),
            Error::Actuator(kind) => write!(f, "actuator write failed: {kind}"),
            Error::Display => write!(f, "display write failed"),
            Error::Telemetry => write!(f, "telemetry write failed"),
        }
    }
}
