//! Pure Mapping Functions
//!
//! Pulsbreite → Ausgangswert. Alle Funktionen sind total über ihren
//! Eingabebereich: Werte außerhalb von 1000-2000 µs sind gültig und werden geklemmt.

use rgb::RGB8;

use crate::config::{OutputRange, PulseRange, RcConfig};
use crate::types::PowerState;

/// Segmentbreite des Farbkreises (256 / 3)
const HUE_SEGMENT: u16 = 85;

/// Lineare Abbildung von `input` nach `output`, kaufmännisch gerundet, dann geklemmt
///
/// Bei leerem Eingabebereich wird `output.min` geliefert.
pub fn map_clamped(value: u32, input: &PulseRange, output: &OutputRange) -> u8 {
    let in_span = i64::from(input.max_us) - i64::from(input.min_us);
    if in_span <= 0 {
        return output.min;
    }
    let out_span = i64::from(output.max) - i64::from(output.min);

    let numerator = (i64::from(value) - i64::from(input.min_us)) * out_span;
    let scaled = div_round(numerator, in_span) + i64::from(output.min);

    scaled.clamp(i64::from(output.min), i64::from(output.max)) as u8
}

// Rundet .5 vom Nullpunkt weg, `divisor` ist immer positiv
fn div_round(numerator: i64, divisor: i64) -> i64 {
    let half = divisor / 2;
    if numerator >= 0 {
        (numerator + half) / divisor
    } else {
        -((-numerator + half) / divisor)
    }
}

/// Schwellwert ohne Hysterese, genau auf der Schwelle ist an
pub fn power_state(pulse_width_us: u32, threshold_us: u32) -> PowerState {
    if pulse_width_us >= threshold_us {
        PowerState::On
    } else {
        PowerState::Off
    }
}

/// Helligkeit 0-255 aus der Pulsbreite
pub fn brightness_level(pulse_width_us: u32, config: &RcConfig) -> u8 {
    map_clamped(pulse_width_us, &config.input_range, &config.output_range)
}

/// Position auf dem Farbkreis 0-255 aus der Pulsbreite
pub fn hue_from_pulse(pulse_width_us: u32, config: &RcConfig) -> u8 {
    map_clamped(pulse_width_us, &config.input_range, &config.output_range)
}

/// Farbkreis → RGB bei voller Sättigung und Helligkeit
///
/// Drei lineare Segmente: Rot→Grün, Grün→Blau, Blau→Rot.
///
/// # Beispiele
///
/// ```
/// # use rgb::RGB8;
/// # use rc_core::hue_to_rgb;
/// assert_eq!(hue_to_rgb(0), RGB8 { r: 255, g: 0, b: 0 });
/// assert_eq!(hue_to_rgb(85), RGB8 { r: 0, g: 255, b: 0 });
/// assert_eq!(hue_to_rgb(170), RGB8 { r: 0, g: 0, b: 255 });
/// ```
pub fn hue_to_rgb(hue: u8) -> RGB8 {
    let h = u16::from(hue);

    let (r, g, b) = if h < HUE_SEGMENT {
        (255 - h * 3, h * 3, 0)
    } else if h < 2 * HUE_SEGMENT {
        let h2 = h - HUE_SEGMENT;
        (0, 255 - h2 * 3, h2 * 3)
    } else {
        let h2 = h - 2 * HUE_SEGMENT;
        (h2 * 3, 0, 255 - h2 * 3)
    };

    debug_assert!(r <= 255 && g <= 255 && b <= 255);

    RGB8 {
        r: r as u8,
        g: g as u8,
        b: b as u8,
    }
}
