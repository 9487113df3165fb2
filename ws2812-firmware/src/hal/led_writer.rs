// WS2812 LED Writer
//
// Verbindet Power-GPIO, RMT Kanal und den Treiber aus ws2812-core
// zu einer einsatzbereiten LED.

use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::gpio::{Level, Output, OutputConfig, OutputPin};
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;
use ws2812_core::{LedError, SmartLedWriter, Ws2812};

use super::rmt_channel::RmtPulseChannel;
use crate::config::{CHANNEL_CONFIG, DRIVER_CONFIG, RMT_CLK_DIVIDER, RMT_SOURCE_MHZ};

/// Real Hardware LED Writer
///
/// Besitzt das Power-GPIO und RMT Kanal 0 exklusiv. Jeder Farbwechsel
/// blockiert, bis die Hardware den Frame inkl. Reset gesendet hat.
pub struct RmtLedWriter<'a> {
    led: Ws2812<Output<'a>, RmtPulseChannel<'a>>,
}

impl<'a> RmtLedWriter<'a> {
    /// Erstellt einen neuen RmtLedWriter
    ///
    /// # Parameter
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `power_pin`: GPIO für die Versorgungsspannung (startet Low)
    /// - `tx_pin`: GPIO für die Datenleitung
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::ChannelConfig` zurück, wenn RMT die Konfiguration ablehnt
    pub fn new(
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        power_pin: impl OutputPin + 'a,
        tx_pin: impl PeripheralOutput<'a>,
    ) -> Result<Self, LedError> {
        // RMT initialisieren
        let rmt = Rmt::new(rmt_peripheral, Rate::from_mhz(RMT_SOURCE_MHZ))
            .map_err(|_| LedError::ChannelConfig)?;
        let channel = RmtPulseChannel::new(rmt.channel0, tx_pin, RMT_CLK_DIVIDER, &CHANNEL_CONFIG)?;

        // Versorgungs-GPIO als Ausgang, bekannter Zustand: aus
        let power = Output::new(power_pin, Level::Low, OutputConfig::default());

        let led = Ws2812::new(power, channel, DRIVER_CONFIG)?;
        Ok(Self { led })
    }

    pub fn power_on(&mut self) -> Result<(), LedError> {
        self.led.power_on()
    }

    pub fn power_off(&mut self) -> Result<(), LedError> {
        self.led.power_off()
    }

    pub fn is_powered(&self) -> bool {
        self.led.is_powered()
    }

    pub fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), LedError> {
        self.led.set_rgb(r, g, b)
    }
}

impl SmartLedWriter for RmtLedWriter<'_> {
    fn write(&mut self, color: RGB8) -> Result<(), LedError> {
        self.led.set_color(color)
    }
}

/// Kompatibilität mit dem smart-leds Ökosystem
///
/// Nur ein Pixel: die erste Farbe des Iterators wird gesendet, der Rest ignoriert.
impl SmartLedsWrite for RmtLedWriter<'_> {
    type Error = LedError;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        match iterator.into_iter().next() {
            Some(color) => self.led.set_color(color.into()),
            None => Ok(()),
        }
    }
}
