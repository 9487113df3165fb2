// LED Cycle Task - Steuert die WS2812 LED über den RMT Treiber
use defmt::{error, info, warn};
use embassy_time::{Duration, Timer};
use rgb::RGB8;
use ws2812_core::{LedCommand, LedError, PaletteCycle, SmartLedWriter};

use crate::LedCommandReceiver;
use crate::config::{COLOR_INTERVAL_MS, DEMO_PALETTE};
use crate::hal::RmtLedWriter;

/// Schaltbare LED: Farbe setzen plus Versorgungsspannung
///
/// Erlaubt die Task-Logik ohne konkrete Hardware zu schreiben.
pub trait SwitchableLed: SmartLedWriter {
    fn power_on(&mut self) -> Result<(), LedError>;
    fn power_off(&mut self) -> Result<(), LedError>;
    fn is_powered(&self) -> bool;
}

impl SwitchableLed for RmtLedWriter<'_> {
    fn power_on(&mut self) -> Result<(), LedError> {
        RmtLedWriter::power_on(self)
    }

    fn power_off(&mut self) -> Result<(), LedError> {
        RmtLedWriter::power_off(self)
    }

    fn is_powered(&self) -> bool {
        RmtLedWriter::is_powered(self)
    }
}

/// LED Cycle Logic - Business Logic ohne konkrete Hardware
///
/// - Schaltet die Versorgung ein und durchläuft die Demo-Palette
/// - Empfängt Kommandos (Farbe setzen, Versorgung an/aus) vom Channel
/// - Wechselt nach `SetColor` in den manuellen Modus
///
/// # Parameter
/// - `led`: LED (Hardware oder Mock)
/// - `command_receiver`: Channel Receiver für Kommandos
pub async fn led_cycle_logic<L: SwitchableLed>(mut led: L, command_receiver: LedCommandReceiver) {
    // Versorgung beim Start ist Pflicht, wie die Treiber-Konstruktion in main()
    led.power_on().expect("Failed to power on WS2812 LED");

    let mut palette = PaletteCycle::new(&DEMO_PALETTE);
    let mut auto_cycle = true;

    loop {
        // Kommandos prüfen (non-blocking)
        if let Ok(cmd) = command_receiver.try_receive() {
            info!("LED: command {}", cmd);
            match cmd {
                LedCommand::SetColor(color) => {
                    auto_cycle = false;
                    write_color(&mut led, color);
                }
                LedCommand::PowerOn => {
                    if let Err(e) = led.power_on() {
                        error!("LED: power on failed: {}", e);
                    }
                    auto_cycle = true;
                }
                LedCommand::PowerOff => {
                    if let Err(e) = led.power_off() {
                        error!("LED: power off failed: {}", e);
                    }
                }
            }
        }

        if auto_cycle && led.is_powered() {
            match palette.next_color() {
                Some(color) => write_color(&mut led, color),
                None => warn!("LED: demo palette is empty"),
            }
        }

        Timer::after(Duration::from_millis(COLOR_INTERVAL_MS)).await;
    }
}

// Übertragungsfehler werden gemeldet, der nächste Zyklus versucht es erneut
fn write_color<L: SmartLedWriter>(led: &mut L, color: RGB8) {
    match led.write(color) {
        Ok(()) => info!("LED: color ({}, {}, {})", color.r, color.g, color.b),
        Err(e) => error!("LED: transmission failed: {}", e),
    }
}

/// LED Cycle Task - Embassy Task für parallele Ausführung
///
/// Bekommt den fertig initialisierten Treiber aus main(), damit
/// Konfigurationsfehler den Start abbrechen statt in der Task zu verschwinden.
#[embassy_executor::task]
pub async fn led_cycle_task(led: RmtLedWriter<'static>, command_receiver: LedCommandReceiver) {
    led_cycle_logic(led, command_receiver).await;
}
