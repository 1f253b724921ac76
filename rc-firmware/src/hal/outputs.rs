// LED-Ausgänge: GPIO für die Power-LED, LEDC für Helligkeit und RGB
//
// Implementiert die Ausgabe-Traits aus rc-core für echte Hardware.

use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::gpio::{DriveMode, Level, Output};
use esp_hal::ledc::channel::{self, ChannelHW, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::peripherals::LEDC;
use esp_hal::time::Rate;
use rc_core::{IndicatorOutput, IntensityOutput, OutputError, PowerState, RgbOutput};
use rgb::RGB8;
use static_cell::StaticCell;

use crate::config::LEDC_FREQUENCY_KHZ;

/// Auflösung des LEDC-Timers in Bit (passt zu 0-255)
const DUTY_BITS: u32 = 8;

/// Fehler beim Konfigurieren der LEDC-Peripherie
#[derive(Debug)]
pub enum OutputInitError {
    Timer(timer::Error),
    Channel(channel::Error),
}

impl From<timer::Error> for OutputInitError {
    fn from(e: timer::Error) -> Self {
        Self::Timer(e)
    }
}

impl From<channel::Error> for OutputInitError {
    fn from(e: channel::Error) -> Self {
        Self::Channel(e)
    }
}

/// Power-LED an einem normalen GPIO-Ausgang
pub struct GpioIndicator {
    pin: Output<'static>,
}

impl GpioIndicator {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl IndicatorOutput for GpioIndicator {
    fn set_state(&mut self, state: PowerState) -> Result<(), OutputError> {
        self.pin.set_level(if state.is_on() {
            Level::High
        } else {
            Level::Low
        });
        Ok(())
    }
}

/// Ein LEDC-Kanal mit 8-Bit Tastverhältnis
pub struct LedcIntensity {
    channel: channel::Channel<'static, LowSpeed>,
}

impl IntensityOutput for LedcIntensity {
    fn set_intensity(&mut self, level: u8) -> Result<(), OutputError> {
        self.channel.set_duty_hw(duty_from_level(level));
        Ok(())
    }
}

// 255 soll dauerhaft HIGH sein, das braucht bei 8 Bit den Wert 256
fn duty_from_level(level: u8) -> u32 {
    if level == u8::MAX {
        1 << DUTY_BITS
    } else {
        u32::from(level)
    }
}

/// RGB-LED aus drei LEDC-Kanälen
pub struct LedcRgb {
    red: LedcIntensity,
    green: LedcIntensity,
    blue: LedcIntensity,
}

impl RgbOutput for LedcRgb {
    fn write(&mut self, color: RGB8) -> Result<(), OutputError> {
        self.red.set_intensity(color.r)?;
        self.green.set_intensity(color.g)?;
        self.blue.set_intensity(color.b)
    }
}

// LEDC und Timer müssen 'static sein, weil die Kanäle sie referenzieren
static LEDC_PERIPHERAL: StaticCell<Ledc<'static>> = StaticCell::new();
static LEDC_TIMER: StaticCell<timer::Timer<'static, LowSpeed>> = StaticCell::new();

/// Konfiguriert Timer0 und vier LEDC-Kanäle (Helligkeit, R, G, B)
///
/// Darf nur einmal aufgerufen werden (StaticCell).
pub fn init_ledc_outputs(
    ledc: LEDC<'static>,
    brightness_pin: impl PeripheralOutput<'static>,
    red_pin: impl PeripheralOutput<'static>,
    green_pin: impl PeripheralOutput<'static>,
    blue_pin: impl PeripheralOutput<'static>,
) -> Result<(LedcIntensity, LedcRgb), OutputInitError> {
    let mut ledc = Ledc::new(ledc);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
    let ledc: &'static Ledc<'static> = LEDC_PERIPHERAL.init(ledc);

    let mut lstimer = ledc.timer::<LowSpeed>(timer::Number::Timer0);
    lstimer.configure(timer::config::Config {
        duty: timer::config::Duty::Duty8Bit,
        clock_source: timer::LSClockSource::APBClk,
        frequency: Rate::from_khz(LEDC_FREQUENCY_KHZ),
    })?;
    let lstimer: &'static timer::Timer<'static, LowSpeed> = LEDC_TIMER.init(lstimer);

    let brightness = configure_channel(
        ledc.channel(channel::Number::Channel0, brightness_pin),
        lstimer,
    )?;
    let red = configure_channel(ledc.channel(channel::Number::Channel1, red_pin), lstimer)?;
    let green = configure_channel(ledc.channel(channel::Number::Channel2, green_pin), lstimer)?;
    let blue = configure_channel(ledc.channel(channel::Number::Channel3, blue_pin), lstimer)?;

    Ok((brightness, LedcRgb { red, green, blue }))
}

// Startet den Kanal mit 0 % Tastverhältnis (LED aus)
fn configure_channel(
    mut channel: channel::Channel<'static, LowSpeed>,
    timer: &'static timer::Timer<'static, LowSpeed>,
) -> Result<LedcIntensity, OutputInitError> {
    channel.configure(channel::config::Config {
        timer,
        duty_pct: 0,
        drive_mode: DriveMode::PushPull,
    })?;
    Ok(LedcIntensity { channel })
}
