//! Host-side stand-ins for the board peripherals.
//! Each mock shares its state through an `Rc`, so a test keeps a handle after
//! the mock has been moved into a `Controller`.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use crate::rendering::TextDisplay;
use crate::sensors::{HumiditySensor, LightSensor};

/// Input pin with a level and a switchable read fault
#[derive(Clone, Default)]
pub struct MockInput {
    pub level: Rc<Cell<bool>>,
    pub broken: Rc<Cell<bool>>,
}

impl MockInput {
    pub fn new(level: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(level)),
            broken: Rc::default(),
        }
    }

    pub fn set(&self, level: bool) {
        self.level.set(level);
    }

    pub fn fail(&self, broken: bool) {
        self.broken.set(broken);
    }

    fn read(&self) -> Result<bool, ErrorKind> {
        if self.broken.get() {
            return Err(ErrorKind::Other);
        }
        Ok(self.level.get())
    }
}

impl ErrorType for MockInput {
    type Error = ErrorKind;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.read()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.read().map(|level| !level)
    }
}

/// Input pin whose every read fails
pub struct BrokenInput;

impl ErrorType for BrokenInput {
    type Error = ErrorKind;
}

impl InputPin for BrokenInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// Output pin recording its level and how many times it was driven
#[derive(Clone, Default)]
pub struct MockOutput {
    pub level: Rc<Cell<bool>>,
    pub writes: Rc<Cell<u32>>,
}

impl MockOutput {
    pub fn is_on(&self) -> bool {
        self.level.get()
    }
}

impl ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(false);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.set(true);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Output pin whose every write fails
pub struct BrokenOutput;

impl ErrorType for BrokenOutput {
    type Error = ErrorKind;
}

impl OutputPin for BrokenOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

#[derive(Clone, Default)]
pub struct MockLight(pub Rc<Cell<u16>>);

impl MockLight {
    pub fn new(raw: u16) -> Self {
        Self(Rc::new(Cell::new(raw)))
    }
}

impl LightSensor for MockLight {
    fn read_raw(&mut self) -> u16 {
        self.0.get()
    }
}

#[derive(Clone, Default)]
pub struct MockHumidity {
    pub value: Rc<Cell<f32>>,
    pub reads: Rc<Cell<u32>>,
}

impl MockHumidity {
    pub fn new(value: f32) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
            reads: Rc::default(),
        }
    }
}

impl HumiditySensor for MockHumidity {
    fn read_humidity(&mut self) -> f32 {
        self.reads.set(self.reads.get() + 1);
        self.value.get()
    }
}

/// 16x2 character grid with a cursor, as an HD44780 would hold it
#[derive(Clone)]
pub struct MockDisplay {
    pub grid: Rc<RefCell<[[char; 16]; 2]>>,
    cursor: (usize, usize),
    pub fail: bool,
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self {
            grid: Rc::new(RefCell::new([[' '; 16]; 2])),
            cursor: (0, 0),
            fail: false,
        }
    }
}

impl MockDisplay {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn row(&self, row: usize) -> String {
        self.grid.borrow()[row].iter().collect()
    }
}

impl TextDisplay for MockDisplay {
    type Error = ();

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        if self.fail {
            return Err(());
        }
        self.cursor = (col as usize, row as usize);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), Self::Error> {
        if self.fail {
            return Err(());
        }
        let (mut col, row) = self.cursor;
        let mut grid = self.grid.borrow_mut();
        for c in text.chars() {
            if col < 16 && row < 2 {
                grid[row][col] = c;
            }
            col += 1;
        }
        self.cursor = (col, row);
        Ok(())
    }
}

/// Telemetry stream collecting everything written to it
#[derive(Clone, Default)]
pub struct MockSink(pub Rc<RefCell<String>>);

impl MockSink {
    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().lines().map(String::from).collect()
    }
}

impl ufmt::uWrite for MockSink {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.borrow_mut().push_str(s);
        Ok(())
    }
}

/// Delay that only counts the time it was asked to wait
#[derive(Clone, Default)]
pub struct MockDelay(pub Rc<Cell<u64>>);

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.set(self.0.get() + ns as u64);
    }
}
