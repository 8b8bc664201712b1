use core::convert::Infallible;

use heapless::String;
use ufmt::{uwrite, uWrite};

use crate::config::{DISPLAY_COLUMNS, DISPLAY_ROWS};
use crate::decision::Decision;
use crate::error::Error;
use crate::fixed::Fixed;

/// Character display with an addressable cursor and no read-back
pub trait TextDisplay {
    type Error;

    /// param col: 0-based column
    /// param row: 0-based row
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;

    /// Writes text at the cursor, advancing it
    fn write_str(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// One display row, always exactly DISPLAY_COLUMNS characters
pub type Line = String<DISPLAY_COLUMNS>;

/// Collects text into a display row, dropping whatever does not fit
struct Clip<'a>(&'a mut Line);

impl uWrite for Clip<'_> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Pads a row with spaces so the whole row gets overwritten
fn pad(line: &mut Line) {
    while line.push(' ').is_ok() {}
}

/// The two status rows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLines {
    pub top: Line,
    pub bottom: Line,
}

impl StatusLines {
    /// Formats both rows
    /// param humidity: Resolved humidity
    /// param index: Light proxy index
    /// param nutrient_p: P presence
    /// param nutrient_k: K presence
    /// param decision: This cycle's decision
    pub fn format(
        humidity: f32,
        index: f32,
        nutrient_p: bool,
        nutrient_k: bool,
        decision: Decision,
    ) -> Self {
        let mut top = Line::new();
        let mut bottom = Line::new();

        {
            // U:38.2% pH:7.0
            let mut clip = Clip(&mut top);
            match uwrite!(
                clip,
                "U:{}% pH:{}",
                Fixed::<1>(humidity),
                Fixed::<1>(index)
            ) {
                Ok(()) => {}
                Err(never) => match never {},
            }
        }
        {
            // P:1 K:0 Pump:1
            let mut clip = Clip(&mut bottom);
            match uwrite!(
                clip,
                "P:{} K:{} Pump:{}",
                nutrient_p as u8,
                nutrient_k as u8,
                decision.display_flag()
            ) {
                Ok(()) => {}
                Err(never) => match never {},
            }
        }

        pad(&mut top);
        pad(&mut bottom);
        Self { top, bottom }
    }

    pub fn rows(&self) -> [&str; DISPLAY_ROWS as usize] {
        [self.top.as_str(), self.bottom.as_str()]
    }
}

/// Writes both rows from column 0, top row first
/// param lines: Status rows to show
/// param display: Display instance
pub fn render_status<D: TextDisplay>(lines: &StatusLines, display: &mut D) -> Result<(), Error> {
    for (row, text) in lines.rows().iter().enumerate() {
        display
            .set_cursor(0, row as u8)
            .map_err(|_| Error::Display)?;
        display.write_str(text).map_err(|_| Error::Display)?;
    }
    Ok(())
}
