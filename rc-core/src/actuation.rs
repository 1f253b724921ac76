//! Actuation Layer
//!
//! Ein Poll-Zyklus holt pro Kanal höchstens ein Sample ab und steuert
//! den zugehörigen Ausgang an. Blockiert nie, kennt keine fatalen Fehler.

use crate::capture::ChannelArena;
use crate::config::RcConfig;
use crate::mapping::{brightness_level, hue_from_pulse, hue_to_rgb, power_state};
use crate::traits::{IndicatorOutput, IntensityOutput, RgbOutput};
use crate::types::{Actuation, ChannelId, ChannelReport, CycleReport};

/// Besitzt die drei Ausgänge und wendet die Mappings an
///
/// # Trait-basierte Abstraktion
/// Die generischen Parameter ermöglichen:
/// - Real Hardware (LEDC/GPIO) im Production-Code
/// - Mock Implementations in Tests
pub struct Actuator<P, B, C> {
    power: P,
    brightness: B,
    color: C,
    config: RcConfig,
}

impl<P, B, C> Actuator<P, B, C>
where
    P: IndicatorOutput,
    B: IntensityOutput,
    C: RgbOutput,
{
    pub fn new(power: P, brightness: B, color: C, config: RcConfig) -> Self {
        Self {
            power,
            brightness,
            color,
            config,
        }
    }

    pub fn config(&self) -> &RcConfig {
        &self.config
    }

    /// Zugriff auf die Ausgänge (Power, Helligkeit, Farbe)
    pub fn outputs(&self) -> (&P, &B, &C) {
        (&self.power, &self.brightness, &self.color)
    }

    pub fn into_outputs(self) -> (P, B, C) {
        (self.power, self.brightness, self.color)
    }

    /// Wendet das Mapping eines Kanals auf eine Pulsbreite an
    ///
    /// Ein Schreibfehler landet im Report, die Ausgabe der anderen
    /// Kanäle ist davon nicht betroffen.
    pub fn apply(&mut self, channel: ChannelId, pulse_width_us: u32) -> ChannelReport {
        let (actuation, write) = match channel {
            ChannelId::Power => {
                let state = power_state(pulse_width_us, self.config.power_threshold_us);
                (Actuation::Power(state), self.power.set_state(state))
            }
            ChannelId::Brightness => {
                let level = brightness_level(pulse_width_us, &self.config);
                (Actuation::Brightness(level), self.brightness.set_intensity(level))
            }
            ChannelId::Color => {
                let hue = hue_from_pulse(pulse_width_us, &self.config);
                let rgb = hue_to_rgb(hue);
                (Actuation::Color { hue, rgb }, self.color.write(rgb))
            }
        };

        ChannelReport {
            channel,
            pulse_width_us,
            actuation,
            write,
        }
    }

    /// Setzt alle Ausgänge auf den Startwert (Stick-Mitte)
    pub fn apply_defaults(&mut self) -> CycleReport {
        let mut report = CycleReport::new();
        for id in ChannelId::ALL {
            report.record(self.apply(id, self.config.default_pulse_us));
        }
        report
    }

    /// Ein Poll-Zyklus über alle Kanäle
    ///
    /// Reihenfolge pro Kanal: Wert kopieren, Mapping anwenden, erst dann
    /// quittieren. Ein Sample, das währenddessen eintrifft, kommt im
    /// nächsten Zyklus an die Reihe.
    pub fn poll(&mut self, arena: &ChannelArena) -> CycleReport {
        let mut report = CycleReport::new();
        for id in ChannelId::ALL {
            let sample = arena.channel(id).sample();
            if let Some(entry) = sample.consume_with(|width| self.apply(id, width)) {
                report.record(entry);
            }
        }
        report
    }
}
