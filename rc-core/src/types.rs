//! Core Types für die RC-Kanal-Auswertung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB8;

use crate::traits::OutputError;

/// Anzahl der RC-Kanäle (Power, Farbe, Helligkeit)
pub const CHANNEL_COUNT: usize = 3;

/// Kennung eines RC-Kanals
///
/// Dient gleichzeitig als Index in die [`ChannelArena`](crate::capture::ChannelArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelId {
    /// CH5 - Schalter, steuert die Power-LED
    Power,
    /// CH3 - Gas-Stick, steuert den Farbton der RGB-LED
    Color,
    /// CH2 - Höhenruder-Stick, steuert die Helligkeits-LED
    Brightness,
}

impl ChannelId {
    /// Alle Kanäle in Polling-Reihenfolge
    pub const ALL: [ChannelId; CHANNEL_COUNT] =
        [ChannelId::Power, ChannelId::Color, ChannelId::Brightness];

    /// Slot in der Channel-Arena
    pub const fn index(self) -> usize {
        match self {
            ChannelId::Power => 0,
            ChannelId::Color => 1,
            ChannelId::Brightness => 2,
        }
    }

    /// Tag für Diagnose-Ausgaben
    pub const fn label(self) -> &'static str {
        match self {
            ChannelId::Power => "POWER",
            ChannelId::Color => "COLOR",
            ChannelId::Brightness => "BRIGHTNESS",
        }
    }

    /// Falling-Edge-Policy des Kanals
    ///
    /// Der Power-Kanal überschreibt ungeprüft (letzter Wert gewinnt),
    /// Farbe und Helligkeit verwerfen Flanken solange ein Sample ansteht.
    pub const fn guard(self) -> EdgeGuard {
        match self {
            ChannelId::Power => EdgeGuard::Unguarded,
            ChannelId::Color | ChannelId::Brightness => EdgeGuard::Guarded,
        }
    }
}

/// Verhalten eines Kanals bei fallender Flanke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeGuard {
    /// Pulsbreite immer berechnen und veröffentlichen
    Unguarded,
    /// Nur veröffentlichen wenn eine steigende Flanke gesehen wurde
    /// und kein unverbrauchtes Sample ansteht
    Guarded,
}

/// Flankenrichtung, abgeleitet vom Pin-Pegel im Interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    /// Pegel jetzt HIGH → steigende Flanke, sonst fallende
    pub const fn from_level(is_high: bool) -> Self {
        if is_high { Edge::Rising } else { Edge::Falling }
    }
}

/// Zustand der Power-LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    pub const fn is_on(self) -> bool {
        matches!(self, PowerState::On)
    }
}

/// Ergebnis einer Mapping-Funktion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Actuation {
    Power(PowerState),
    Brightness(u8),
    Color { hue: u8, rgb: RGB8 },
}

/// Ein verarbeitetes Sample innerhalb eines Poll-Zyklus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelReport {
    pub channel: ChannelId,
    pub pulse_width_us: u32,
    pub actuation: Actuation,
    pub write: Result<(), OutputError>,
}

/// Alle Samples, die ein Poll-Zyklus konsumiert hat
///
/// Ein Slot pro Kanal, indiziert über [`ChannelId::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    entries: [Option<ChannelReport>; CHANNEL_COUNT],
}

impl CycleReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: ChannelReport) {
        self.entries[report.channel.index()] = Some(report);
    }

    pub fn get(&self, channel: ChannelId) -> Option<&ChannelReport> {
        self.entries[channel.index()].as_ref()
    }

    /// true wenn in diesem Zyklus kein Kanal ein Sample geliefert hat
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Iteriert in Polling-Reihenfolge über die gelieferten Samples
    pub fn iter(&self) -> impl Iterator<Item = &ChannelReport> {
        self.entries.iter().flatten()
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.label())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PowerState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PowerState::On => defmt::write!(fmt, "ON"),
            PowerState::Off => defmt::write!(fmt, "OFF"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Actuation {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Actuation::Power(state) => defmt::write!(fmt, "Power {{ {} }}", state),
            Actuation::Brightness(level) => defmt::write!(fmt, "Brightness {{ level: {} }}", level),
            Actuation::Color { hue, rgb } => defmt::write!(
                fmt,
                "Color {{ hue: {}, rgb: ({}, {}, {}) }}",
                hue,
                rgb.r,
                rgb.g,
                rgb.b
            ),
        }
    }
}
