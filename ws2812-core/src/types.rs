//! Core Types für die LED-Ansteuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB8;

use crate::timing::BitTiming;

/// Anzahl Bytes pro Pixel (G, R, B)
pub const PAYLOAD_LEN: usize = 3;

/// Farb-Payload in Übertragungsreihenfolge: **Grün, Rot, Blau**
///
/// Die WS2812 erwartet GRB, unabhängig von der öffentlichen (R, G, B) Reihenfolge.
/// Feste Größe, damit der Encoder immer genau 3 Bytes bekommt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorPayload([u8; PAYLOAD_LEN]);

impl ColorPayload {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([g, r, b])
    }

    /// Bytes in Sende-Reihenfolge
    pub const fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }
}

impl From<RGB8> for ColorPayload {
    fn from(color: RGB8) -> Self {
        Self::from_rgb(color.r, color.g, color.b)
    }
}

/// Maximale Wartezeit auf das Leeren der Hardware-Queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrainTimeout {
    /// Unbegrenzt warten
    #[default]
    Forever,
    /// Höchstens so viele Millisekunden warten
    Millis(u32),
}

/// Konfiguration des Pulse-Kanals
///
/// Wird von der Firmware in die RMT-Kanal-Konfiguration übersetzt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelConfig {
    /// Hardware-Puffer in Symbolen
    pub mem_block_symbols: usize,
    /// Anzahl Übertragungen, die gleichzeitig in der Queue stehen dürfen
    pub queue_depth: usize,
    pub interrupt_priority: u8,
    pub invert_output: bool,
    /// Pegel der Leitung im Leerlauf und nach dem Ende der Übertragung
    pub idle_level_high: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            mem_block_symbols: 64,
            queue_depth: 4,
            interrupt_priority: 0,
            invert_output: false,
            idle_level_high: false,
        }
    }
}

/// Konfiguration des WS2812-Treibers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig {
    pub timing: BitTiming,
    pub drain_timeout: DrainTimeout,
}

/// LED Command für die LED-Task
///
/// Wird von anderen Tasks über einen Channel an die LED-Task gesendet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedCommand {
    /// Setze LED auf eine Farbe
    SetColor(RGB8),
    /// Versorgungsspannung einschalten
    PowerOn,
    /// Versorgungsspannung ausschalten
    PowerOff,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for LedCommand {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LedCommand::SetColor(color) => {
                defmt::write!(fmt, "SetColor {{ rgb: ({}, {}, {}) }}", color.r, color.g, color.b)
            }
            LedCommand::PowerOn => defmt::write!(fmt, "PowerOn"),
            LedCommand::PowerOff => defmt::write!(fmt, "PowerOff"),
        }
    }
}
