//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use core::fmt;

use rgb::RGB8;

use crate::timing::{PulseSymbol, TimingError};
use crate::types::DrainTimeout;

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    /// GPIO der Versorgungsspannung konnte nicht geschaltet werden
    PowerLine,
    /// Pulse-Kanal hat die Konfiguration abgelehnt
    ChannelConfig,
    /// Ungültiges Bit-Timing
    Timing(TimingError),
    /// Kanal konnte nicht aktiviert werden
    Enable,
    /// Kanal konnte nicht deaktiviert werden
    Disable,
    /// Symbole konnten nicht in die Queue geschrieben werden
    Transmit,
    /// Hardware-Queue hat keinen Platz und wird nie wieder frei
    QueueStalled,
    /// Queue wurde nicht innerhalb des Timeouts geleert
    DrainTimeout,
    /// Hardware meldet Fehler beim Senden
    WriteFailed,
}

impl From<TimingError> for LedError {
    fn from(e: TimingError) -> Self {
        Self::Timing(e)
    }
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerLine => write!(f, "power enable line could not be driven"),
            Self::ChannelConfig => write!(f, "pulse channel configuration rejected"),
            Self::Timing(e) => write!(f, "invalid bit timing: {e}"),
            Self::Enable => write!(f, "pulse channel could not be enabled"),
            Self::Disable => write!(f, "pulse channel could not be disabled"),
            Self::Transmit => write!(f, "symbols could not be queued"),
            Self::QueueStalled => write!(f, "transmit queue has no free space"),
            Self::DrainTimeout => write!(f, "transmit queue did not drain in time"),
            Self::WriteFailed => write!(f, "hardware reported a transmission error"),
        }
    }
}

impl core::error::Error for LedError {}

/// Trait für den Pulse-Generator (ESP32 RMT Kanal)
///
/// Kapselt den Hardware-Sendekanal. Der Treiber fragt freie Slots ab,
/// lässt den Encoder Symbole erzeugen und reicht sie über `queue` weiter.
///
/// # Implementierungen
/// - **Production:** RmtPulseChannel (ESP32 RMT Peripheral)
/// - **Testing:** MockPulseChannel (in-memory Mock)
pub trait PulseChannel {
    fn enable(&mut self) -> Result<(), LedError>;

    fn disable(&mut self) -> Result<(), LedError>;

    /// Anzahl Symbole, die aktuell ohne Warten in die Queue passen
    fn free_symbols(&self) -> usize;

    /// Hängt Symbole an die laufende Übertragung an
    fn queue(&mut self, symbols: &[PulseSymbol]) -> Result<(), LedError>;

    /// Wartet, bis mindestens `needed` Slots frei sind
    ///
    /// Ein Kanal, der nie Platz schaffen kann, meldet [`LedError::QueueStalled`].
    fn wait_for_space(&mut self, needed: usize) -> Result<(), LedError>;

    /// Blockiert, bis alle Symbole physisch gesendet wurden
    fn wait_all_done(&mut self, timeout: DrainTimeout) -> Result<(), LedError>;
}

/// Trait für SmartLED Hardware-Zugriff
///
/// Abstrahiert das Setzen einer Farbe für Host-Logik (Tasks, Animationen).
///
/// # Implementierungen
/// - **Production:** Ws2812 (Treiber über PulseChannel)
/// - **Testing:** Ws2812 mit MockPowerPin + MockPulseChannel
pub trait SmartLedWriter {
    /// Schreibt eine RGB-Farbe auf die LED
    ///
    /// # Fehlerbehandlung
    /// Gibt einen `LedError` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, color: RGB8) -> Result<(), LedError>;
}
