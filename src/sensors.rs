use embedded_hal::digital::{Error as _, InputPin};

use crate::config::ControllerConfig;
use crate::error::Error;

/// Analog light sensor
pub trait LightSensor {
    /// Raw ADC sample, 0 to the converter's full scale
    fn read_raw(&mut self) -> u16;
}

/// Humidity sensor driver
pub trait HumiditySensor {
    /// Relative humidity in percent
    /// returns NaN if the sensor could not produce a reading
    fn read_humidity(&mut self) -> f32;
}

/// Everything sampled at the start of a cycle
/// nutrient_p: P presence input
/// nutrient_k: K presence input
/// raw_light: Raw ADC light sample
/// humidity: Humidity as reported; may be NaN
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReadings {
    pub nutrient_p: bool,
    pub nutrient_k: bool,
    pub raw_light: u16,
    pub humidity: f32,
}

/// The inputs of the controller, owned together
pub struct Sensors<P, K, A, H> {
    pub nutrient_p: P,
    pub nutrient_k: K,
    pub light: A,
    pub humidity: H,
}

impl<P, K, A, H> Sensors<P, K, A, H>
where
    P: InputPin,
    K: InputPin,
    A: LightSensor,
    H: HumiditySensor,
{
    pub fn new(nutrient_p: P, nutrient_k: K, light: A, humidity: H) -> Self {
        Self {
            nutrient_p,
            nutrient_k,
            light,
            humidity,
        }
    }

    /// Samples every input once, in a fixed order: P, K, light, humidity
    /// No debouncing, retries or range checks
    pub fn acquire(&mut self) -> Result<SensorReadings, Error> {
        let nutrient_p = self
            .nutrient_p
            .is_high()
            .map_err(|e| Error::NutrientSensor(e.kind()))?;
        let nutrient_k = self
            .nutrient_k
            .is_high()
            .map_err(|e| Error::NutrientSensor(e.kind()))?;
        let raw_light = self.light.read_raw();
        let humidity = self.humidity.read_humidity();

        Ok(SensorReadings {
            nutrient_p,
            nutrient_k,
            raw_light,
            humidity,
        })
    }
}

/// Replaces an invalid (NaN) humidity reading with the configured fallback
/// Any other value, infinities included, passes through untouched
/// param humidity: Humidity as read from the sensor
/// param config: Controller configuration
/// returns the humidity used by the rest of the cycle
pub fn resolve_humidity(humidity: f32, config: &ControllerConfig) -> f32 {
    if humidity.is_nan() {
        debug!("humidity read invalid, using fallback {}", config.fallback_humidity);
        config.fallback_humidity
    } else {
        humidity
    }
}
