// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

use rc_core::{OutputRange, PinAssignment, PulseRange, RcConfig};

// ============================================================================
// RC-Eingänge (Empfänger-Kanäle)
// ============================================================================

/// GPIO für CH5 (Schalter) → Power-LED
pub const POWER_INPUT_GPIO: u8 = 2;

/// GPIO für CH3 (Gas-Stick) → Farbton
pub const COLOR_INPUT_GPIO: u8 = 3;

/// GPIO für CH2 (Höhenruder-Stick) → Helligkeit
pub const BRIGHTNESS_INPUT_GPIO: u8 = 4;

/// Nominaler Pulsbereich des Empfängers in µs
pub const PULSE_MIN_US: u32 = 1000;
pub const PULSE_MAX_US: u32 = 2000;

/// Startwert aller Kanäle (Stick-Mitte)
pub const PULSE_DEFAULT_US: u32 = 1500;

/// Ab dieser Pulsbreite ist die Power-LED an
pub const POWER_THRESHOLD_US: u32 = 1500;

// ============================================================================
// LED-Ausgänge
// ============================================================================

/// Power-LED (digital)
pub const POWER_LED_GPIO: u8 = 5;

/// Helligkeits-LED (LEDC PWM)
pub const BRIGHTNESS_LED_GPIO: u8 = 6;

/// RGB-LED (je ein LEDC-Kanal)
pub const RED_LED_GPIO: u8 = 18;
pub const GREEN_LED_GPIO: u8 = 19;
pub const BLUE_LED_GPIO: u8 = 20;

/// LEDC PWM-Frequenz in kHz
/// 1 kHz flimmert nicht sichtbar und erlaubt 8 Bit Auflösung
pub const LEDC_FREQUENCY_KHZ: u32 = 1;

/// Heap-Größe für den esp-rtos Scheduler (Bytes)
pub const HEAP_SIZE: usize = 16384; // 16 KB

/// Baut die Laufzeit-Konfiguration aus den Konstanten
pub const fn rc_config() -> RcConfig {
    RcConfig {
        input_range: PulseRange {
            min_us: PULSE_MIN_US,
            max_us: PULSE_MAX_US,
        },
        output_range: OutputRange { min: 0, max: 255 },
        power_threshold_us: POWER_THRESHOLD_US,
        default_pulse_us: PULSE_DEFAULT_US,
        pins: PinAssignment {
            power_in: POWER_INPUT_GPIO,
            color_in: COLOR_INPUT_GPIO,
            brightness_in: BRIGHTNESS_INPUT_GPIO,
            power_led: POWER_LED_GPIO,
            brightness_led: BRIGHTNESS_LED_GPIO,
            red: RED_LED_GPIO,
            green: GREEN_LED_GPIO,
            blue: BLUE_LED_GPIO,
        },
    }
}
