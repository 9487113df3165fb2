//! Waveform Symbol Table
//!
//! Die drei Pulse-Symbole des WS2812-Protokolls (Bit 0, Bit 1, Reset),
//! berechnet aus einer einzigen Tick-Frequenz.

use core::fmt;

/// Maximale Dauer eines Pulses in Ticks (15-Bit Feld im RMT Symbol-Wort)
pub const MAX_TICKS: u16 = 0x7FFF;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Ein Pulse-Symbol: erst `high_ticks` auf `high_level`, dann `low_ticks` auf `low_level`
///
/// Entspricht einem RMT Symbol-Wort `{ duration0, level0, duration1, level1 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseSymbol {
    pub high_ticks: u16,
    pub high_level: bool,
    pub low_ticks: u16,
    pub low_level: bool,
}

impl PulseSymbol {
    /// Datenbit-Symbol: High-Phase gefolgt von Low-Phase
    pub const fn bit(high_ticks: u16, low_ticks: u16) -> Self {
        Self {
            high_ticks,
            high_level: true,
            low_ticks,
            low_level: false,
        }
    }

    /// Reset/Latch-Symbol: nur eine lange Low-Phase, zweite Dauer 0
    pub const fn latch(ticks: u16) -> Self {
        Self {
            high_ticks: ticks,
            high_level: false,
            low_ticks: 0,
            low_level: false,
        }
    }

    /// Gesamtdauer beider Phasen in Ticks
    pub const fn period_ticks(&self) -> u32 {
        self.high_ticks as u32 + self.low_ticks as u32
    }
}

/// Fehler bei ungültiger Timing-Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Tick-Frequenz ist 0
    ZeroFrequency,
    /// Eine Dauer passt nicht in das 15-Bit Dauer-Feld
    TickOverflow { nanos: u32 },
    /// Eine Datenbit-Phase rundet auf 0 Ticks (wäre ein End-Marker)
    ZeroDuration { nanos: u32 },
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFrequency => write!(f, "tick frequency must not be zero"),
            Self::TickOverflow { nanos } => {
                write!(f, "{nanos} ns exceeds {MAX_TICKS} ticks at this frequency")
            }
            Self::ZeroDuration { nanos } => write!(f, "{nanos} ns rounds to zero ticks"),
        }
    }
}

impl core::error::Error for TimingError {}

/// Bit-Timing eines LED-Protokolls in Nanosekunden plus Tick-Frequenz
///
/// Andere Protokoll-Varianten (WS2812B, SK6812) nutzen andere Werte,
/// deshalb ist nichts davon fest verdrahtet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitTiming {
    /// Tick-Frequenz des Pulse-Generators in Hz
    pub tick_hz: u32,
    pub t0h_ns: u32,
    pub t0l_ns: u32,
    pub t1h_ns: u32,
    pub t1l_ns: u32,
    pub reset_ns: u32,
}

impl BitTiming {
    /// WS2812 bei 20 MHz (1 Tick = 50 ns)
    pub const WS2812: Self = Self {
        tick_hz: 20_000_000,
        t0h_ns: 350,
        t0l_ns: 700,
        t1h_ns: 800,
        t1l_ns: 600,
        reset_ns: 50_000,
    };

    /// WS2812B Datenblatt-Werte, beide Bits 1250 ns lang
    pub const WS2812B: Self = Self {
        tick_hz: 20_000_000,
        t0h_ns: 400,
        t0l_ns: 850,
        t1h_ns: 800,
        t1l_ns: 450,
        reset_ns: 50_000,
    };

    /// SK6812, beide Bits 1200 ns lang, längerer Reset
    pub const SK6812: Self = Self {
        tick_hz: 20_000_000,
        t0h_ns: 300,
        t0l_ns: 900,
        t1h_ns: 600,
        t1l_ns: 600,
        reset_ns: 80_000,
    };

    /// Gleiches Timing mit anderer Tick-Frequenz
    pub const fn with_tick_hz(self, tick_hz: u32) -> Self {
        Self { tick_hz, ..self }
    }

    /// Rundet Nanosekunden auf Ticks: `round(nanos * tick_hz / 1e9)`
    ///
    /// Gibt `u32` zurück, damit Überläufe des 15-Bit Feldes erkennbar bleiben.
    /// Werte über `u32::MAX` sättigen.
    pub const fn ticks(&self, nanos: u32) -> u32 {
        let scaled = nanos as u64 * self.tick_hz as u64 + NANOS_PER_SEC / 2;
        let ticks = scaled / NANOS_PER_SEC;
        if ticks > u32::MAX as u64 {
            u32::MAX
        } else {
            ticks as u32
        }
    }

    /// Prüft, ob alle Dauern als Pulse-Symbole darstellbar sind
    pub const fn validate(&self) -> Result<(), TimingError> {
        if self.tick_hz == 0 {
            return Err(TimingError::ZeroFrequency);
        }
        let bit_phases = [self.t0h_ns, self.t0l_ns, self.t1h_ns, self.t1l_ns];
        let mut i = 0;
        while i < bit_phases.len() {
            let nanos = bit_phases[i];
            let ticks = self.ticks(nanos);
            if ticks == 0 {
                return Err(TimingError::ZeroDuration { nanos });
            }
            if ticks > MAX_TICKS as u32 {
                return Err(TimingError::TickOverflow { nanos });
            }
            i += 1;
        }
        if self.ticks(self.reset_ns) > MAX_TICKS as u32 {
            return Err(TimingError::TickOverflow {
                nanos: self.reset_ns,
            });
        }
        Ok(())
    }

    const fn ticks_u16(&self, nanos: u32) -> u16 {
        let ticks = self.ticks(nanos);
        if ticks > MAX_TICKS as u32 {
            MAX_TICKS
        } else {
            ticks as u16
        }
    }
}

impl Default for BitTiming {
    fn default() -> Self {
        Self::WS2812
    }
}

/// Die drei Pulse-Symbole eines Protokolls
///
/// Einmal berechnet und danach unveränderlich. Wird dem Encoder
/// übergeben statt als versteckter statischer Zustand referenziert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SymbolTable {
    pub zero: PulseSymbol,
    pub one: PulseSymbol,
    pub reset: PulseSymbol,
}

impl SymbolTable {
    /// Tabelle für das Standard-WS2812-Timing (zur Compile-Zeit berechnet)
    pub const WS2812: Self = Self::new(&BitTiming::WS2812);

    /// Berechnet die Symbole aus dem Timing
    ///
    /// Werte über [`MAX_TICKS`] werden gekappt; [`SymbolTable::try_new`]
    /// meldet sie stattdessen als Fehler.
    pub const fn new(timing: &BitTiming) -> Self {
        Self {
            zero: PulseSymbol::bit(timing.ticks_u16(timing.t0h_ns), timing.ticks_u16(timing.t0l_ns)),
            one: PulseSymbol::bit(timing.ticks_u16(timing.t1h_ns), timing.ticks_u16(timing.t1l_ns)),
            reset: PulseSymbol::latch(timing.ticks_u16(timing.reset_ns)),
        }
    }

    /// Wie [`SymbolTable::new`], aber mit Validierung
    pub const fn try_new(timing: &BitTiming) -> Result<Self, TimingError> {
        match timing.validate() {
            Ok(()) => Ok(Self::new(timing)),
            Err(e) => Err(e),
        }
    }

    /// Symbol für ein einzelnes Datenbit
    pub const fn for_bit(&self, bit: bool) -> PulseSymbol {
        if bit { self.one } else { self.zero }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::WS2812
    }
}
