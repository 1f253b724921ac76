// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (esp-rtos Scheduler)
extern crate alloc;

// Embassy Async Runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, Io, Level, Output, OutputConfig};
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use rc_led_steuerung::Actuator;
use rc_led_steuerung::config::{HEAP_SIZE, rc_config};
use rc_led_steuerung::hal::{GpioIndicator, RcInputs, init_ledc_outputs, install_edge_handler};
use rc_led_steuerung::tasks::actuation_task;

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Konfiguriert Pins und Interrupt, startet Embassy Runtime und spawnt
/// den Actuation-Task. Danach schläft main() - die Arbeit läuft im
/// Interrupt (Capture) und im Task (Actuation).
///
/// Die GPIO-Peripherals unten müssen zu den Nummern in config.rs passen.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(size: HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Laufzeit-Konfiguration prüfen (Bereiche, doppelte Pins)
    let rc_config = rc_config();
    if let Err(e) = rc_config.validate() {
        defmt::panic!("Invalid RC configuration: {}", e);
    }
    info!("Starting with {}", rc_config);

    // Ausgänge: Power-LED digital, Helligkeit + RGB über LEDC
    let power_led = GpioIndicator::new(Output::new(
        peripherals.GPIO5,
        Level::Low,
        OutputConfig::default(),
    ));
    let (brightness_led, rgb_led) = init_ledc_outputs(
        peripherals.LEDC,
        peripherals.GPIO6,
        peripherals.GPIO18,
        peripherals.GPIO19,
        peripherals.GPIO20,
    )
    .expect("Failed to initialize LEDC outputs");

    let actuator = Actuator::new(power_led, brightness_led, rgb_led, rc_config);

    // Eingänge: Pull-Up, Interrupt auf beiden Flanken
    let inputs = RcInputs::new(
        Input::new(peripherals.GPIO2, RcInputs::input_config()),
        Input::new(peripherals.GPIO3, RcInputs::input_config()),
        Input::new(peripherals.GPIO4, RcInputs::input_config()),
    );
    let mut io = Io::new(peripherals.IO_MUX);
    install_edge_handler(&mut io, inputs);
    info!("RC edge interrupt installed");

    // Spawn Actuation Task (einziger Consumer der Kanal-Arena)
    spawner.spawn(actuation_task(actuator)).unwrap();

    // Main-Loop: schläft (Arbeit läuft in Interrupt und Task)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
