#![no_std]
#![no_main]

//! Raspberry Pi Pico firmware.
//!
//! Wiring:
//! - GPIO0-5: HD44780 16x2 LCD, 4-bit bus (RS, EN, D4-D7)
//! - GPIO8/9: BME680 on I2C0 (SDA, SCL), secondary address
//! - GPIO10/11: P and K presence sensors
//! - GPIO13: pump relay
//! - GPIO16/17: UART0 telemetry (TX, RX)
//! - GPIO25: on-board LED
//! - GPIO26: light sensor (ADC0)

use bme680::{Bme680, I2CAddress, IIRFilterSize, OversamplingSetting, PowerMode, SettingsBuilder};
use bsp::entry;
use core::convert::Infallible;
use defmt::*;
use defmt_rtt as _;
use embedded_hal_0_2::adc::OneShot;
use hd44780_driver::bus::FourBitBus;
use hd44780_driver::{Cursor, CursorBlink, Display, DisplayMode, HD44780};
use panic_probe as _;

// Provide an alias for our BSP so we can switch targets quickly.
// Uncomment the BSP you included in Cargo.toml, the rest of the code does not need to change.
use rp_pico as bsp;

use bsp::hal::{
    adc::AdcPin,
    clocks::{init_clocks_and_plls, Clock},
    fugit::RateExtU32,
    gpio::bank0::{Gpio0, Gpio1, Gpio16, Gpio17, Gpio2, Gpio26, Gpio3, Gpio4, Gpio5, Gpio8, Gpio9},
    gpio::{FunctionI2C, FunctionSioInput, FunctionSioOutput, FunctionUart, Pin, PullDown, PullNone, PullUp},
    pac,
    uart::{DataBits, Enabled, StopBits, UartConfig, UartPeripheral},
    watchdog::Watchdog,
    Adc, Sio, Timer, I2C,
};
use irrigation_rs::actuation::Actuators;
use irrigation_rs::config::{ControllerConfig, TELEMETRY_BAUD};
use irrigation_rs::rendering::TextDisplay;
use irrigation_rs::sensors::{HumiditySensor, LightSensor, Sensors};
use irrigation_rs::Controller;
use ufmt::uWrite;

type Bme = Bme680<I2C<pac::I2C0, (Pin<Gpio8, FunctionI2C, PullUp>, Pin<Gpio9, FunctionI2C, PullUp>)>, Timer>;

type LcdPin<P> = Pin<P, FunctionSioOutput, PullDown>;
type Lcd = HD44780<
    FourBitBus<LcdPin<Gpio0>, LcdPin<Gpio1>, LcdPin<Gpio2>, LcdPin<Gpio3>, LcdPin<Gpio4>, LcdPin<Gpio5>>,
>;

type Uart = UartPeripheral<
    Enabled,
    pac::UART0,
    (Pin<Gpio16, FunctionUart, PullDown>, Pin<Gpio17, FunctionUart, PullDown>),
>;

type LightPin = AdcPin<Pin<Gpio26, FunctionSioInput, PullNone>>;

/// Second row of the HD44780 starts at DDRAM address 0x40
const LCD_ROW_OFFSET: u8 = 0x40;

/// BME680 in forced mode, one measurement per read
struct BmeHumidity {
    bme: Bme,
    delay: Timer,
}

impl HumiditySensor for BmeHumidity {
    fn read_humidity(&mut self) -> f32 {
        if self
            .bme
            .set_sensor_mode(&mut self.delay, PowerMode::ForcedMode)
            .is_err()
        {
            return f32::NAN;
        }
        match self.bme.get_sensor_data(&mut self.delay) {
            Ok((data, _)) => data.humidity_percent(),
            Err(_) => f32::NAN,
        }
    }
}

/// Light sensor on the 12-bit ADC
struct LightAdc {
    adc: Adc,
    pin: LightPin,
}

impl LightSensor for LightAdc {
    fn read_raw(&mut self) -> u16 {
        nb::block!(self.adc.read(&mut self.pin)).unwrap_or(0)
    }
}

struct LcdDisplay {
    lcd: Lcd,
    delay: Timer,
}

impl TextDisplay for LcdDisplay {
    type Error = ();

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        self.lcd
            .set_cursor_pos(row * LCD_ROW_OFFSET + col, &mut self.delay)
            .map_err(|_| ())
    }

    fn write_str(&mut self, text: &str) -> Result<(), Self::Error> {
        self.lcd.write_str(text, &mut self.delay).map_err(|_| ())
    }
}

/// Telemetry over UART0, blocking until every byte is queued
struct SerialTelemetry(Uart);

impl uWrite for SerialTelemetry {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.0.write_full_blocking(s.as_bytes());
        Ok(())
    }
}

#[entry]
fn main() -> ! {
    info!("Irrigation controller starting");
    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure the clocks
    //
    // The default is to generate a 125 MHz system clock
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // The single-cycle I/O block controls our GPIO pins
    let sio = Sio::new(pac.SIO);

    // Set the pins up according to their function on this particular board
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // Set up BME680
    let sda: Pin<_, FunctionI2C, PullUp> = pins.gpio8.reconfigure();
    let scl: Pin<_, FunctionI2C, PullUp> = pins.gpio9.reconfigure();
    let i2c = I2C::i2c0(
        pac.I2C0,
        sda,
        scl,
        100.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );
    let mut bme = Bme680::init(i2c, &mut timer, I2CAddress::Secondary).unwrap();
    let settings = SettingsBuilder::new()
        .with_humidity_oversampling(OversamplingSetting::OS2x)
        .with_pressure_oversampling(OversamplingSetting::OS4x)
        .with_temperature_oversampling(OversamplingSetting::OS8x)
        .with_temperature_filter(IIRFilterSize::Size3)
        .with_run_gas(false)
        .build();
    bme.set_sensor_settings(&mut timer, settings).unwrap();

    // Set up LCD1602
    let mut lcd = HD44780::new_4bit(
        pins.gpio0.into_push_pull_output(),
        pins.gpio1.into_push_pull_output(),
        pins.gpio2.into_push_pull_output(),
        pins.gpio3.into_push_pull_output(),
        pins.gpio4.into_push_pull_output(),
        pins.gpio5.into_push_pull_output(),
        &mut timer,
    )
    .unwrap();
    lcd.reset(&mut timer).unwrap();
    lcd.clear(&mut timer).unwrap();
    lcd.set_display_mode(
        DisplayMode {
            display: Display::On,
            cursor_visibility: Cursor::Invisible,
            cursor_blink: CursorBlink::Off,
        },
        &mut timer,
    )
    .unwrap();

    // Set up light sensor
    let adc = Adc::new(pac.ADC, &mut pac.RESETS);
    let light_pin = AdcPin::new(pins.gpio26.into_floating_input()).unwrap();

    // Set up telemetry UART
    let uart_pins = (
        pins.gpio16.into_function::<FunctionUart>(),
        pins.gpio17.into_function::<FunctionUart>(),
    );
    let uart = UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS)
        .enable(
            UartConfig::new(TELEMETRY_BAUD.Hz(), DataBits::Eight, None, StopBits::One),
            clocks.peripheral_clock.freq(),
        )
        .unwrap();

    let sensors = Sensors::new(
        pins.gpio10.into_pull_down_input(),
        pins.gpio11.into_pull_down_input(),
        LightAdc { adc, pin: light_pin },
        BmeHumidity { bme, delay: timer },
    );
    let actuators = Actuators::new(
        pins.gpio13.into_push_pull_output(),
        pins.led.into_push_pull_output(),
    );

    let controller = Controller::init(
        ControllerConfig::default(),
        sensors,
        actuators,
        LcdDisplay { lcd, delay: timer },
        SerialTelemetry(uart),
        timer,
    )
    .unwrap();

    info!("Irrigation controller ready");

    controller.run()
}
