//! Edge Capture Layer
//!
//! Wandelt Pegelwechsel der RC-Eingänge in Pulsbreiten um. Die Handler
//! laufen im Interrupt-Kontext, der Actuator pollt im Hauptkontext.
//! Zwischen beiden Kontexten gibt es pro Kanal genau eine Übergabe:
//!
//! - Nur der Interrupt setzt `ready` auf true (und schreibt vorher den Wert)
//! - Nur der Actuator setzt `ready` auf false (nachdem er den Wert verarbeitet hat)
//!
//! Keine Locks, nur atomare Loads/Stores - damit auch aus einem ISR nutzbar.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::types::{CHANNEL_COUNT, ChannelId, Edge, EdgeGuard};

/// Single-Producer/Single-Consumer Zelle für ein Pulsbreiten-Sample
///
/// Producer ist der Flanken-Handler, Consumer ist der Poll-Zyklus.
pub struct SampleCell {
    value: AtomicU32,
    ready: AtomicBool,
}

impl SampleCell {
    pub const fn new(initial: u32) -> Self {
        Self {
            value: AtomicU32::new(initial),
            ready: AtomicBool::new(false),
        }
    }

    /// Veröffentlicht `value`, außer ein Sample wartet noch auf Verarbeitung
    ///
    /// Gibt `false` zurück wenn das Sample verworfen wurde.
    pub fn try_publish(&self, value: u32) -> bool {
        if self.ready.load(Ordering::Acquire) {
            return false;
        }
        self.publish(value);
        true
    }

    /// Veröffentlicht `value` ohne Rücksicht auf ein anstehendes Sample
    pub fn publish(&self, value: u32) {
        self.value.store(value, Ordering::Relaxed);
        self.ready.store(true, Ordering::Release);
    }

    /// Kopiert das anstehende Sample, ruft `f` damit auf und quittiert erst danach
    ///
    /// Solange `f` läuft bleibt `ready` gesetzt, ein geschützter Kanal
    /// überschreibt den Wert in dieser Zeit also nicht.
    pub fn consume_with<R>(&self, f: impl FnOnce(u32) -> R) -> Option<R> {
        if !self.ready.load(Ordering::Acquire) {
            return None;
        }
        let value = self.value.load(Ordering::Relaxed);
        let result = f(value);
        self.ready.store(false, Ordering::Release);
        Some(result)
    }

    /// Holt das anstehende Sample ab
    pub fn try_consume(&self) -> Option<u32> {
        self.consume_with(|value| value)
    }

    /// Zuletzt geschriebener Wert, ohne zu quittieren
    pub fn peek(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Was ein Flanken-Aufruf bewirkt hat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Steigende Flanke, Startzeit gespeichert
    Started,
    /// Fallende Flanke, Pulsbreite veröffentlicht
    Published(u32),
    /// Fallende Flanke verworfen (kein Start gesehen oder Sample steht noch an)
    Dropped,
}

/// Zustand eines RC-Kanals
pub struct PwmChannel {
    id: ChannelId,
    guard: EdgeGuard,
    /// 0 = noch keine steigende Flanke gesehen
    edge_start_us: AtomicU32,
    sample: SampleCell,
}

impl PwmChannel {
    pub const fn new(id: ChannelId, default_pulse_us: u32) -> Self {
        Self {
            id,
            guard: id.guard(),
            edge_start_us: AtomicU32::new(0),
            sample: SampleCell::new(default_pulse_us),
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn sample(&self) -> &SampleCell {
        &self.sample
    }

    /// Flanken-Handler - wird bei jedem Pegelwechsel des Pins aufgerufen
    ///
    /// `now_us` ist ein umlaufender Mikrosekunden-Zähler; die Differenz
    /// wird modular gebildet und bleibt über den Überlauf hinweg korrekt.
    /// Unplausible Pulsbreiten werden nicht gefiltert, das Mapping klemmt sie.
    pub fn on_edge(&self, edge: Edge, now_us: u32) -> CaptureOutcome {
        match edge {
            Edge::Rising => {
                self.edge_start_us.store(now_us, Ordering::Relaxed);
                CaptureOutcome::Started
            }
            Edge::Falling => {
                let start = self.edge_start_us.load(Ordering::Relaxed);
                let width = now_us.wrapping_sub(start);
                match self.guard {
                    EdgeGuard::Unguarded => {
                        self.sample.publish(width);
                        CaptureOutcome::Published(width)
                    }
                    EdgeGuard::Guarded if start != 0 && self.sample.try_publish(width) => {
                        CaptureOutcome::Published(width)
                    }
                    EdgeGuard::Guarded => CaptureOutcome::Dropped,
                }
            }
        }
    }
}

/// Feste Sammlung aller Kanäle, indiziert über [`ChannelId`]
///
/// `const`-konstruierbar, damit die Firmware sie als `static` ablegen
/// und aus dem GPIO-Interrupt erreichen kann.
pub struct ChannelArena {
    channels: [PwmChannel; CHANNEL_COUNT],
}

impl ChannelArena {
    pub const fn new(default_pulse_us: u32) -> Self {
        Self {
            channels: [
                PwmChannel::new(ChannelId::Power, default_pulse_us),
                PwmChannel::new(ChannelId::Color, default_pulse_us),
                PwmChannel::new(ChannelId::Brightness, default_pulse_us),
            ],
        }
    }

    pub fn channel(&self, id: ChannelId) -> &PwmChannel {
        &self.channels[id.index()]
    }

    /// Leitet einen Pegelwechsel an den passenden Kanal weiter
    pub fn on_edge(&self, id: ChannelId, is_high: bool, now_us: u32) -> CaptureOutcome {
        self.channel(id).on_edge(Edge::from_level(is_high), now_us)
    }
}
