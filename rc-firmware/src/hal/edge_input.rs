// RC-Eingänge: GPIO-Interrupt auf beiden Flanken
//
// Ein gemeinsamer Handler für alle drei Pins. Er liest den Zeitstempel
// einmal, prüft welche Pins ausgelöst haben und reicht den Pegel an den
// Kanal in der Arena weiter. Sonst passiert im Interrupt nichts.

use core::cell::RefCell;

use critical_section::Mutex;
use esp_hal::gpio::{Event, Input, InputConfig, Io, Pull};
use esp_hal::handler;
use esp_hal::time::Instant;
use rc_core::{CHANNEL_COUNT, ChannelArena, ChannelId};

use crate::config::PULSE_DEFAULT_US;

/// Kanal-Zustände, geteilt zwischen Interrupt und Actuation-Task
///
/// Nur atomare Felder - der Task pollt ohne Critical Section.
pub static CHANNELS: ChannelArena = ChannelArena::new(PULSE_DEFAULT_US);

/// Input-Pins gehören nach dem Start ausschließlich dem Interrupt-Handler
static RC_INPUTS: Mutex<RefCell<Option<RcInputs>>> = Mutex::new(RefCell::new(None));

/// Die drei Empfänger-Eingänge, indiziert über [`ChannelId::index`]
pub struct RcInputs {
    pins: [Input<'static>; CHANNEL_COUNT],
}

impl RcInputs {
    /// Eingangs-Konfiguration: Pull-Up wie am Empfänger üblich
    pub fn input_config() -> InputConfig {
        InputConfig::default().with_pull(Pull::Up)
    }

    pub fn new(
        power: Input<'static>,
        color: Input<'static>,
        brightness: Input<'static>,
    ) -> Self {
        // Reihenfolge muss ChannelId::ALL entsprechen
        Self {
            pins: [power, color, brightness],
        }
    }
}

/// Mikrosekunden seit Boot, auf 32 Bit gekürzt
///
/// Läuft nach ~71 Minuten über; die Pulsbreite wird modular gebildet.
pub fn now_micros() -> u32 {
    Instant::now().duration_since_epoch().as_micros() as u32
}

/// Registriert den Handler und übergibt die Pins an den Interrupt-Kontext
pub fn install_edge_handler(io: &mut Io<'_>, mut inputs: RcInputs) {
    io.set_interrupt_handler(rc_edge_handler);

    critical_section::with(|cs| {
        for pin in inputs.pins.iter_mut() {
            pin.listen(Event::AnyEdge);
        }
        RC_INPUTS.borrow_ref_mut(cs).replace(inputs);
    });
}

#[handler]
fn rc_edge_handler() {
    let now_us = now_micros();

    critical_section::with(|cs| {
        let mut inputs = RC_INPUTS.borrow_ref_mut(cs);
        let Some(inputs) = inputs.as_mut() else {
            return;
        };

        for id in ChannelId::ALL {
            let pin = &mut inputs.pins[id.index()];
            if pin.is_interrupt_set() {
                CHANNELS.on_edge(id, pin.is_high(), now_us);
                pin.clear_interrupt();
            }
        }
    });
}
