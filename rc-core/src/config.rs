//! Laufzeit-Konfiguration
//!
//! Wird einmal beim Start erstellt und an Capture- und Actuation-Layer übergeben.

/// Eingangsbereich der Pulsbreite in Mikrosekunden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseRange {
    pub min_us: u32,
    pub max_us: u32,
}

/// Ausgangsbereich der Intensität
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputRange {
    pub min: u8,
    pub max: u8,
}

/// GPIO-Zuordnung (Nummern, keine Peripherals)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinAssignment {
    pub power_in: u8,
    pub color_in: u8,
    pub brightness_in: u8,
    pub power_led: u8,
    pub brightness_led: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PinAssignment {
    fn as_array(&self) -> [u8; 8] {
        [
            self.power_in,
            self.color_in,
            self.brightness_in,
            self.power_led,
            self.brightness_led,
            self.red,
            self.green,
            self.blue,
        ]
    }
}

/// Fehler bei der Konfigurations-Prüfung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_us` muss kleiner als `max_us` sein
    EmptyInputRange,
    /// `min` darf nicht größer als `max` sein
    InvertedOutputRange,
    /// Ein GPIO ist mehrfach vergeben
    PinConflict(u8),
}

/// Komplette Konfiguration der RC-Auswertung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RcConfig {
    pub input_range: PulseRange,
    pub output_range: OutputRange,
    /// Ab dieser Pulsbreite (inklusive) ist die Power-LED an
    pub power_threshold_us: u32,
    /// Startwert jedes Kanals (Stick in Mittelstellung)
    pub default_pulse_us: u32,
    pub pins: PinAssignment,
}

impl RcConfig {
    /// Standard-RC-Timing 1000-2000 µs, Mitte 1500 µs
    pub const DEFAULT: RcConfig = RcConfig {
        input_range: PulseRange {
            min_us: 1000,
            max_us: 2000,
        },
        output_range: OutputRange { min: 0, max: 255 },
        power_threshold_us: 1500,
        default_pulse_us: 1500,
        pins: PinAssignment {
            power_in: 2,
            color_in: 3,
            brightness_in: 4,
            power_led: 5,
            brightness_led: 6,
            red: 18,
            green: 19,
            blue: 20,
        },
    };

    pub const fn with_pins(mut self, pins: PinAssignment) -> Self {
        self.pins = pins;
        self
    }

    /// Prüft Bereiche und Pin-Zuordnung
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_range.min_us >= self.input_range.max_us {
            return Err(ConfigError::EmptyInputRange);
        }
        if self.output_range.min > self.output_range.max {
            return Err(ConfigError::InvertedOutputRange);
        }

        let pins = self.pins.as_array();
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(ConfigError::PinConflict(*pin));
            }
        }
        Ok(())
    }
}

impl Default for RcConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RcConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "RcConfig {{ input: {}..={} us, output: {}..={}, power >= {} us, default: {} us }}",
            self.input_range.min_us,
            self.input_range.max_us,
            self.output_range.min,
            self.output_range.max,
            self.power_threshold_us,
            self.default_pulse_us
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConfigError::EmptyInputRange => defmt::write!(fmt, "EmptyInputRange"),
            ConfigError::InvertedOutputRange => defmt::write!(fmt, "InvertedOutputRange"),
            ConfigError::PinConflict(pin) => defmt::write!(fmt, "PinConflict(GPIO{})", pin),
        }
    }
}
