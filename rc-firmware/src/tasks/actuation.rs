// Actuation Task - pollt die RC-Kanäle und steuert die LEDs
use defmt::{error, info};
use embassy_futures::yield_now;
use rc_core::{Actuator, ChannelArena, CycleReport, IndicatorOutput, IntensityOutput, RgbOutput};

use crate::hal::{CHANNELS, GpioIndicator, LedcIntensity, LedcRgb};

/// Poll-Schleife - Testbare Logik ohne konkrete Hardware
///
/// Pro Durchlauf:
/// - Holt jedes anstehende Sample genau einmal ab und wendet das Mapping an
/// - Gibt für jeden Kanal mit neuem Sample eine Diagnose-Zeile aus
/// - Gibt die CPU kurz an den Executor zurück (kein Timer, kein Blockieren)
///
/// # Parameter
/// - `actuator`: Besitzt die Ausgänge (Hardware oder Mock)
/// - `channels`: Kanal-Arena, die der Interrupt-Handler befüllt
pub async fn actuation_logic<P, B, C>(
    mut actuator: Actuator<P, B, C>,
    channels: &'static ChannelArena,
) -> !
where
    P: IndicatorOutput,
    B: IntensityOutput,
    C: RgbOutput,
{
    // Ausgänge auf Stick-Mitte setzen, bevor das erste Signal kommt
    let defaults = actuator.apply_defaults();
    log_cycle(&defaults);

    loop {
        let report = actuator.poll(channels);
        if !report.is_empty() {
            log_cycle(&report);
        }

        yield_now().await;
    }
}

/// Diagnose-Ausgabe, entspricht der seriellen Debug-Zeile pro Kanal
fn log_cycle(report: &CycleReport) {
    for entry in report.iter() {
        info!(
            "[{}] PWM: {} -> {}",
            entry.channel.label(),
            entry.pulse_width_us,
            entry.actuation
        );
        if let Err(e) = entry.write {
            error!("[{}] Output write failed: {}", entry.channel.label(), e);
        }
    }
}

/// Actuation Task - Embassy Task für die Poll-Schleife
///
/// # Parameter
/// - `actuator`: Actuator mit den echten LEDC/GPIO-Ausgängen
#[embassy_executor::task]
pub async fn actuation_task(actuator: Actuator<GpioIndicator, LedcIntensity, LedcRgb>) {
    actuation_logic(actuator, &CHANNELS).await
}
