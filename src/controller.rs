//! The irrigation decision cycle.
//!
//! `Controller` owns every peripheral. It is created once by `Controller::init`
//! and then runs the same cycle forever:
//!
//! 1. read P, K, light and humidity (NaN humidity becomes the fallback)
//! 2. derive the light proxy index
//! 3. decide whether to irrigate
//! 4. drive relay and LED
//! 5. rewrite the 16x2 status display
//! 6. send one telemetry line
//! 7. sleep for the poll interval
//!
//! Nothing carries over from one cycle to the next. If the inputs cannot be
//! read, or the relay cannot be driven, relay and LED are switched off for
//! that cycle. Display and telemetry faults never stop the later steps, and
//! the loop itself never stops. A sensor driver that hangs blocks the whole
//! loop, as there is no timeout on reads.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use ufmt::uWrite;

use crate::actuation::Actuators;
use crate::config::ControllerConfig;
use crate::decision::{derived_index, needs_irrigation, Decision};
use crate::error::Error;
use crate::rendering::{render_status, StatusLines, TextDisplay};
use crate::sensors::{resolve_humidity, HumiditySensor, LightSensor, SensorReadings, Sensors};
use crate::telemetry::{self, BANNER};
use crate::timer::CyclePacer;

/// What one cycle read and decided
/// readings: Raw samples, humidity possibly NaN
/// humidity: Humidity after fallback substitution
/// index: Light proxy index
/// decision: Irrigation decision, as applied to relay and LED
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    pub readings: SensorReadings,
    pub humidity: f32,
    pub index: f32,
    pub decision: Decision,
}

/// Computes everything a cycle derives from its readings, without touching hardware
/// param readings: Samples taken this cycle
/// param config: Controller configuration
pub fn evaluate(readings: SensorReadings, config: &ControllerConfig) -> CycleReport {
    let humidity = resolve_humidity(readings.humidity, config);
    let index = derived_index(readings.raw_light, config);
    let decision = needs_irrigation(humidity, readings.nutrient_p, readings.nutrient_k, config);
    CycleReport {
        readings,
        humidity,
        index,
        decision,
    }
}

pub struct Controller<P, K, A, H, R, L, S, T, D> {
    config: ControllerConfig,
    sensors: Sensors<P, K, A, H>,
    actuators: Actuators<R, L>,
    display: S,
    telemetry: T,
    pacer: CyclePacer<D>,
}

impl<P, K, A, H, R, L, S, T, D> Controller<P, K, A, H, R, L, S, T, D>
where
    P: InputPin,
    K: InputPin,
    A: LightSensor,
    H: HumiditySensor,
    R: OutputPin,
    L: OutputPin,
    S: TextDisplay,
    T: uWrite,
    D: DelayNs,
{
    /// Takes ownership of the peripherals, switches relay and LED off and
    /// announces start-up on the telemetry stream
    /// param config: Controller configuration
    /// param sensors: P, K, light and humidity inputs
    /// param actuators: Relay and LED
    /// param display: Status display
    /// param telemetry: Telemetry stream
    /// param delay: Delay used between cycles
    pub fn init(
        config: ControllerConfig,
        sensors: Sensors<P, K, A, H>,
        mut actuators: Actuators<R, L>,
        display: S,
        mut telemetry: T,
        delay: D,
    ) -> Result<Self, Error> {
        actuators.all_off()?;
        telemetry::emit(&mut telemetry, BANNER)?;
        info!("irrigation controller ready");

        Ok(Self {
            config,
            sensors,
            actuators,
            display,
            telemetry,
            pacer: CyclePacer::new(delay, config.poll_interval_ms),
        })
    }

    /// Reads, decides, actuates, displays and reports once; does not sleep
    /// Every step after acquisition runs even if an earlier one failed.
    /// The first fault is returned.
    pub fn run_cycle(&mut self) -> Result<CycleReport, Error> {
        let readings = match self.sensors.acquire() {
            Ok(readings) => readings,
            Err(e) => {
                self.outputs_off();
                return Err(e);
            }
        };
        let report = evaluate(readings, &self.config);
        debug!(
            "humidity {} index {} P {} K {} irrigate {}",
            report.humidity,
            report.index,
            readings.nutrient_p,
            readings.nutrient_k,
            report.decision.irrigate()
        );

        let mut fault = None;

        if let Err(e) = self.actuators.apply(report.decision) {
            warn!("actuation failed: {}", e);
            self.outputs_off();
            fault = fault.or(Some(e));
        }

        let lines = StatusLines::format(
            report.humidity,
            report.index,
            readings.nutrient_p,
            readings.nutrient_k,
            report.decision,
        );
        if let Err(e) = render_status(&lines, &mut self.display) {
            warn!("display update failed: {}", e);
            fault = fault.or(Some(e));
        }

        let sent = telemetry::format_line(report.humidity, report.index, report.decision)
            .and_then(|line| telemetry::emit(&mut self.telemetry, &line));
        if let Err(e) = sent {
            fault = fault.or(Some(e));
        }

        match fault {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    /// Switches relay and LED off, logging a failure instead of returning it
    fn outputs_off(&mut self) {
        if let Err(e) = self.actuators.all_off() {
            warn!("could not switch outputs off: {}", e);
        }
    }

    /// One cycle followed by the poll interval sleep
    /// A failed cycle is logged and the sleep still happens
    pub fn step(&mut self) -> Option<CycleReport> {
        let report = match self.run_cycle() {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("cycle failed: {}", e);
                None
            }
        };
        self.pacer.wait();
        report
    }

    /// Runs cycles forever
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }
}
