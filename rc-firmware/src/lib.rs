// Library-Root: Hardware-Anbindung der RC-Auswertung
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von rc-core
pub use rc_core::{Actuator, ChannelArena, ChannelId, CycleReport, RcConfig};

// ============================================================================
// Datenfluss
// ============================================================================
//
//   RC-Empfänger ──► GPIO-Interrupt (hal::edge_input)
//                        │  steigende Flanke: Startzeit merken
//                        │  fallende Flanke:  Pulsbreite + ready
//                        ▼
//                    CHANNELS (ChannelArena, nur Atomics)
//                        │
//                        ▼
//                    actuation_task (tasks::actuation)
//                        │  Sample kopieren → Mapping → quittieren
//                        ▼
//                    Power-LED (GPIO) / Helligkeit + RGB (LEDC)
//
// Die Logik selbst (Capture-Zustandsautomat, Mapping, Poll-Zyklus) liegt
// in rc-core und wird dort bzw. in rc-tests auf dem Host getestet.
