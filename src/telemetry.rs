//! Serial telemetry for plotting tools.
//!
//! One line per cycle, space separated, fields always in this order:
//!
//! ```text
//! Humidity:38.20 pH:7.00 Pump:100
//! ```
//!
//! Pump is reported as 0 or 100 here so it plots on the same axis as
//! humidity. The display uses 0 or 1 for the same flag.

use heapless::String;
use ufmt::{uwrite, uWrite};

use crate::decision::Decision;
use crate::error::Error;
use crate::fixed::Fixed;

/// Line written once at start-up, before the first cycle
pub const BANNER: &str = "Irrigation system started";

const LINE_END: &str = "\r\n";

/// Longest telemetry line, without the line ending
pub const MAX_LINE: usize = 64;

/// Formats one telemetry line
/// param humidity: Resolved humidity
/// param index: Light proxy index
/// param decision: This cycle's decision
/// returns Error::Telemetry if the line does not fit MAX_LINE
pub fn format_line(humidity: f32, index: f32, decision: Decision) -> Result<String<MAX_LINE>, Error> {
    let mut line: String<MAX_LINE> = String::new();
    uwrite!(
        line,
        "Humidity:{} pH:{} Pump:{}",
        Fixed::<2>(humidity),
        Fixed::<2>(index),
        decision.telemetry_level()
    )
    .map_err(|_| Error::Telemetry)?;
    Ok(line)
}

/// Writes a line followed by the line ending
/// param sink: Telemetry stream
/// param line: Text without line ending
pub fn emit<W: uWrite + ?Sized>(sink: &mut W, line: &str) -> Result<(), Error> {
    sink.write_str(line).map_err(|_| Error::Telemetry)?;
    sink.write_str(LINE_END).map_err(|_| Error::Telemetry)
}

/// A telemetry line read back by host-side tooling
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryRecord {
    pub humidity: f32,
    pub index: f32,
    pub pump: bool,
}

impl TelemetryRecord {
    /// Parses a line in the exact field order written by `format_line`
    /// Trailing line endings are ignored
    /// returns None for anything else, the start-up banner included
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.trim_end_matches(['\r', '\n']).split(' ');

        let humidity = fields.next()?.strip_prefix("Humidity:")?.parse().ok()?;
        let index = fields.next()?.strip_prefix("pH:")?.parse().ok()?;
        let pump = match fields.next()?.strip_prefix("Pump:")? {
            "100" => true,
            "0" => false,
            _ => return None,
        };
        if fields.next().is_some() {
            return None;
        }

        Some(Self {
            humidity,
            index,
            pump,
        })
    }
}
