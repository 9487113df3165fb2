//! Mocks für Host-Tests
//!
//! In-memory Implementierungen der Hardware-Traits aus ws2812-core.

#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use ws2812_core::{DrainTimeout, LedError, PulseChannel, PulseSymbol, SymbolTable};

// ============================================================================
// Mock Power Pin
// ============================================================================

#[derive(Debug)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
pub struct MockPowerPin {
    /// Aktueller Pegel, `None` solange nie geschrieben wurde
    pub level: Option<bool>,
    /// Alle geschriebenen Pegel in Reihenfolge
    pub history: Vec<bool>,
    /// Simuliere Fehler beim nächsten Schreiben
    pub fail_next_write: bool,
    /// Simuliere Fehler beim n-ten Schreibzugriff (0-basiert)
    pub fail_at_write: Option<usize>,
    writes: usize,
}

impl MockPowerPin {
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&mut self, level: bool) -> Result<(), MockPinError> {
        let attempt = self.writes;
        self.writes += 1;
        if self.fail_at_write == Some(attempt) {
            return Err(MockPinError);
        }
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(MockPinError);
        }
        self.level = Some(level);
        self.history.push(level);
        Ok(())
    }
}

impl ErrorType for MockPowerPin {
    type Error = MockPinError;
}

impl OutputPin for MockPowerPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

// ============================================================================
// Mock Pulse Channel
// ============================================================================

pub struct MockPulseChannel {
    pub enabled: bool,
    pub enable_count: usize,
    pub disable_count: usize,
    /// Hardware-Puffer in Symbolen
    pub capacity: usize,
    /// Symbole im Puffer, die noch nicht "gesendet" wurden
    pub in_flight: usize,
    /// Feste Folge freier Slots, ein Eintrag pro Treiber-Iteration
    pub free_schedule: VecDeque<usize>,
    /// Symbole der laufenden Übertragung
    pub current: Vec<PulseSymbol>,
    /// Abgeschlossene Übertragungen
    pub frames: Vec<Vec<PulseSymbol>>,
    pub space_waits: usize,
    pub last_timeout: Option<DrainTimeout>,
    /// Puffer wird nie frei
    pub stalled: bool,
    pub fail_enable: bool,
    pub fail_queue: bool,
    pub fail_drain: bool,
    pub fail_disable: bool,
}

impl MockPulseChannel {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            enabled: false,
            enable_count: 0,
            disable_count: 0,
            capacity,
            in_flight: 0,
            free_schedule: VecDeque::new(),
            current: Vec::new(),
            frames: Vec::new(),
            space_waits: 0,
            last_timeout: None,
            stalled: false,
            fail_enable: false,
            fail_queue: false,
            fail_drain: false,
            fail_disable: false,
        }
    }
}

impl PulseChannel for MockPulseChannel {
    fn enable(&mut self) -> Result<(), LedError> {
        if self.fail_enable {
            return Err(LedError::Enable);
        }
        self.enabled = true;
        self.enable_count += 1;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), LedError> {
        self.enabled = false;
        self.disable_count += 1;
        if self.fail_disable {
            return Err(LedError::Disable);
        }
        Ok(())
    }

    fn free_symbols(&self) -> usize {
        if self.stalled {
            return 0;
        }
        match self.free_schedule.front() {
            Some(&free) => free,
            None => self.capacity.saturating_sub(self.in_flight),
        }
    }

    fn queue(&mut self, symbols: &[PulseSymbol]) -> Result<(), LedError> {
        assert!(self.enabled, "queue() on disabled channel");
        if self.fail_queue {
            return Err(LedError::Transmit);
        }
        self.free_schedule.pop_front();
        self.current.extend_from_slice(symbols);
        self.in_flight += symbols.len();
        Ok(())
    }

    fn wait_for_space(&mut self, _needed: usize) -> Result<(), LedError> {
        if self.stalled {
            return Err(LedError::QueueStalled);
        }
        self.free_schedule.pop_front();
        self.space_waits += 1;
        // Hardware hat alles gesendet
        self.in_flight = 0;
        Ok(())
    }

    fn wait_all_done(&mut self, timeout: DrainTimeout) -> Result<(), LedError> {
        self.last_timeout = Some(timeout);
        if self.fail_drain {
            return Err(LedError::DrainTimeout);
        }
        self.in_flight = 0;
        self.frames.push(std::mem::take(&mut self.current));
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Dekodiert Datenbit-Symbole zurück in Bytes (MSB-first)
pub fn decode_bytes(symbols: &[PulseSymbol], table: &SymbolTable) -> Vec<u8> {
    symbols
        .chunks(8)
        .map(|bits| {
            bits.iter().fold(0u8, |byte, symbol| {
                let bit = if *symbol == table.one {
                    1
                } else if *symbol == table.zero {
                    0
                } else {
                    panic!("not a data bit symbol: {symbol:?}")
                };
                (byte << 1) | bit
            })
        })
        .collect()
}
