//! Transmission Orchestrator
//!
//! Besitzt Versorgungs-GPIO und Pulse-Kanal exklusiv. Eine Farbänderung ist
//! genau ein kompletter Encoder-Durchlauf vom ersten Bit bis zum Reset-Symbol:
//!
//! 1. Kanal aktivieren
//! 2. Encoder ziehen, bis `done` gemeldet wird
//! 3. Warten, bis die Hardware alles gesendet hat
//! 4. Kanal deaktivieren (auch wenn 2. oder 3. fehlschlägt)

use embedded_hal::digital::OutputPin;
use rgb::RGB8;

use crate::encoder::{BitEncoder, MIN_CHUNK_SYMBOLS, SymbolEncoder};
use crate::timing::{PulseSymbol, SymbolTable};
use crate::traits::{LedError, PulseChannel, SmartLedWriter};
use crate::types::{ColorPayload, DriverConfig};

/// Treiber für eine einzelne WS2812 LED
///
/// # Trait-basierte Abstraktion
/// - `P`: Versorgungs-GPIO (esp-hal `Output` oder Mock)
/// - `C`: Pulse-Kanal (RMT oder Mock)
/// - `E`: Encoder, standardmäßig [`BitEncoder`]
pub struct Ws2812<P, C, E = BitEncoder> {
    power: P,
    channel: C,
    encoder: E,
    config: DriverConfig,
    powered: bool,
}

impl<P, C> Ws2812<P, C>
where
    P: OutputPin,
    C: PulseChannel,
{
    /// Erstellt den Treiber mit der Symbol-Tabelle aus `config.timing`
    ///
    /// Die LED startet ausgeschaltet.
    ///
    /// # Fehlerbehandlung
    /// - `LedError::Timing` wenn das Timing nicht darstellbar ist
    /// - `LedError::PowerLine` wenn das GPIO nicht geschaltet werden kann
    pub fn new(power: P, channel: C, config: DriverConfig) -> Result<Self, LedError> {
        let symbols = SymbolTable::try_new(&config.timing)?;
        Self::with_encoder(power, channel, BitEncoder::new(symbols), config)
    }
}

impl<P, C, E> Ws2812<P, C, E>
where
    P: OutputPin,
    C: PulseChannel,
    E: SymbolEncoder,
{
    /// Erstellt den Treiber mit einem eigenen Encoder
    pub fn with_encoder(
        power: P,
        channel: C,
        encoder: E,
        config: DriverConfig,
    ) -> Result<Self, LedError> {
        let mut driver = Self {
            power,
            channel,
            encoder,
            config,
            powered: false,
        };
        // Bekannter Startzustand: LED aus
        driver.power_off()?;
        Ok(driver)
    }

    pub fn power_on(&mut self) -> Result<(), LedError> {
        self.power.set_high().map_err(|_| LedError::PowerLine)?;
        self.powered = true;
        Ok(())
    }

    pub fn power_off(&mut self) -> Result<(), LedError> {
        self.power.set_low().map_err(|_| LedError::PowerLine)?;
        self.powered = false;
        Ok(())
    }

    /// Zuletzt geschalteter Zustand der Versorgungsspannung
    pub const fn is_powered(&self) -> bool {
        self.powered
    }

    /// Setzt die Farbe, Parameter in (R, G, B) Reihenfolge
    pub fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), LedError> {
        self.set_color(RGB8 { r, g, b })
    }

    /// Sendet eine Farbe und blockiert, bis die Hardware fertig ist
    pub fn set_color(&mut self, color: RGB8) -> Result<(), LedError> {
        self.transmit(&ColorPayload::from(color))?;
        #[cfg(feature = "defmt")]
        defmt::trace!("Transmitted RGB {{{}, {}, {}}}", color.r, color.g, color.b);
        Ok(())
    }

    /// Eine komplette Übertragung: enable → Encoder → drain → disable
    ///
    /// Der Kanal wird auf jedem Pfad nach erfolgreichem `enable` wieder
    /// deaktiviert. Der erste Fehler gewinnt.
    pub fn transmit(&mut self, payload: &ColorPayload) -> Result<(), LedError> {
        self.channel.enable()?;

        let sent = self
            .stream(payload)
            .and_then(|()| self.channel.wait_all_done(self.config.drain_timeout));
        let disabled = self.channel.disable();

        sent.and(disabled)
    }

    /// Pull-Schleife: fragt freie Slots ab und reicht Chunks an den Kanal weiter
    fn stream(&mut self, payload: &ColorPayload) -> Result<(), LedError> {
        let mut chunk_buffer = [PulseSymbol::default(); MIN_CHUNK_SYMBOLS];
        let mut symbols_written = 0;

        loop {
            let free = self.channel.free_symbols();
            let chunk =
                self.encoder
                    .encode(payload.as_bytes(), symbols_written, free, &mut chunk_buffer);

            if chunk.written == 0 && !chunk.done {
                self.channel.wait_for_space(MIN_CHUNK_SYMBOLS)?;
                continue;
            }

            let filled = chunk_buffer.get(..chunk.written).ok_or(LedError::Transmit)?;
            self.channel.queue(filled)?;
            symbols_written += chunk.written;

            if chunk.done {
                return Ok(());
            }
        }
    }

    /// Gibt GPIO und Kanal zurück
    pub fn release(self) -> (P, C) {
        (self.power, self.channel)
    }
}

impl<P, C, E> SmartLedWriter for Ws2812<P, C, E>
where
    P: OutputPin,
    C: PulseChannel,
    E: SymbolEncoder,
{
    fn write(&mut self, color: RGB8) -> Result<(), LedError> {
        self.set_color(color)
    }
}
