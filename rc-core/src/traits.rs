//! Hardware Abstraction Traits
//!
//! Diese Traits definieren die Ausgänge, die der Actuator ansteuert,
//! ohne konkrete Implementierung.

use rgb::RGB8;

use crate::types::PowerState;

/// Fehler-Typ für Ausgabe-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputError {
    WriteFailed,
}

/// Digitaler Ausgang für die Power-LED
///
/// # Implementierungen
/// - **Production:** GpioIndicator (esp-hal `Output`)
/// - **Testing:** MockIndicator (in-memory Mock)
pub trait IndicatorOutput {
    /// Schaltet die LED ein oder aus
    fn set_state(&mut self, state: PowerState) -> Result<(), OutputError>;
}

/// PWM-Ausgang mit 8-Bit Intensität (Helligkeits-LED)
pub trait IntensityOutput {
    /// Setzt das Tastverhältnis, 0 = aus, 255 = voll an
    fn set_intensity(&mut self, level: u8) -> Result<(), OutputError>;
}

/// RGB-LED aus drei PWM-Ausgängen
pub trait RgbOutput {
    /// Schreibt eine RGB-Farbe auf die LED
    ///
    /// # Fehlerbehandlung
    /// Gibt `OutputError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, color: RGB8) -> Result<(), OutputError>;
}

#[cfg(feature = "defmt")]
impl defmt::Format for OutputError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            OutputError::WriteFailed => defmt::write!(fmt, "WriteFailed"),
        }
    }
}
