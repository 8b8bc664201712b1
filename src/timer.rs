use embedded_hal::delay::DelayNs;

/// Sleeps a fixed interval between cycles
/// No catch-up: a slow cycle simply makes the period longer
pub struct CyclePacer<D> {
    delay: D,
    interval_ms: u32,
}

impl<D: DelayNs> CyclePacer<D> {
    pub fn new(delay: D, interval_ms: u32) -> CyclePacer<D> {
        Self { delay, interval_ms }
    }

    /// Blocks for one interval
    pub fn wait(&mut self) {
        self.delay.delay_ms(self.interval_ms);
    }
}
