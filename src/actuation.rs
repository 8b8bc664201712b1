use embedded_hal::digital::{Error as _, OutputPin, PinState};

use crate::decision::Decision;
use crate::error::Error;

/// Pump relay and indicator LED
/// Both always mirror the same decision; active level is high
pub struct Actuators<R, L> {
    relay: R,
    led: L,
}

impl<R: OutputPin, L: OutputPin> Actuators<R, L> {
    pub fn new(relay: R, led: L) -> Self {
        Self { relay, led }
    }

    /// Drives relay and LED to the same level
    /// param decision: This cycle's decision
    pub fn apply(&mut self, decision: Decision) -> Result<(), Error> {
        let state = PinState::from(decision.irrigate());
        self.relay
            .set_state(state)
            .map_err(|e| Error::Actuator(e.kind()))?;
        self.led
            .set_state(state)
            .map_err(|e| Error::Actuator(e.kind()))?;
        Ok(())
    }

    /// Both outputs inactive
    /// The LED is still driven low when the relay write fails
    pub fn all_off(&mut self) -> Result<(), Error> {
        let relay = self
            .relay
            .set_low()
            .map_err(|e| Error::Actuator(e.kind()));
        self.led
            .set_low()
            .map_err(|e| Error::Actuator(e.kind()))?;
        relay
    }
}
