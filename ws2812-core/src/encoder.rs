//! Streaming Bit Encoder
//!
//! Pull-basierter Encoder: wird vom Treiber immer dann aufgerufen, wenn im
//! Hardware-Puffer Platz frei ist, und füllt pro Aufruf genau ein Byte
//! (8 Symbole) oder am Ende das Reset-Symbol.
//!
//! Der Encoder hat keinen eigenen Zustand. Der Fortschritt (`symbols_written`)
//! wird bei jedem Aufruf vom Treiber übergeben, deshalb ist jeder Aufruf eine
//! reine Funktion seiner Eingaben. Kein Heap, kein Blocking, kein I/O - darf
//! aus einem Interrupt-Kontext aufgerufen werden.

use crate::timing::{PulseSymbol, SymbolTable};

/// Bits pro Byte = Mindestanzahl freier Slots für einen Aufruf
pub const MIN_CHUNK_SYMBOLS: usize = 8;

/// Ergebnis eines Encoder-Aufrufs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Chunk {
    /// Anzahl geschriebener Symbole (0, 1 oder 8)
    pub written: usize,
    /// `true` genau dann, wenn das Reset-Symbol geschrieben wurde
    pub done: bool,
}

impl Chunk {
    /// Kein Platz: nichts geschrieben, nicht fertig
    pub const PENDING: Self = Self {
        written: 0,
        done: false,
    };
}

/// Trait für Pull-Encoder
///
/// Abstrahiert die Umwandlung von Payload-Bytes in Pulse-Symbole.
///
/// # Vertrag
/// - Aufrufe einer Übertragung sind streng sequentiell, `symbols_written`
///   steigt monoton
/// - Nach `done == true` wird der Encoder für diese Übertragung nicht mehr aufgerufen
pub trait SymbolEncoder {
    /// Füllt `out` mit den nächsten Symbolen
    ///
    /// # Parameter
    /// - `payload`: zu sendende Bytes
    /// - `symbols_written`: bisher in dieser Übertragung geschriebene Symbole
    /// - `symbols_free`: aktuell freie Slots im Hardware-Puffer
    /// - `out`: Ausgabe-Puffer, geschrieben wird höchstens `symbols_free`
    fn encode(
        &self,
        payload: &[u8],
        symbols_written: usize,
        symbols_free: usize,
        out: &mut [PulseSymbol],
    ) -> Chunk;
}

/// WS2812 Bit-Encoder über eine injizierte Symbol-Tabelle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitEncoder {
    symbols: SymbolTable,
}

impl BitEncoder {
    pub const fn new(symbols: SymbolTable) -> Self {
        Self { symbols }
    }

    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Schreibt die 8 Bits von `byte` MSB-first nach `out`
    ///
    /// `out` muss mindestens [`MIN_CHUNK_SYMBOLS`] lang sein.
    fn encode_byte(&self, byte: u8, out: &mut [PulseSymbol]) -> usize {
        let mut mask: u8 = 0x80;
        let mut count = 0;
        for slot in out.iter_mut().take(MIN_CHUNK_SYMBOLS) {
            *slot = self.symbols.for_bit(byte & mask != 0);
            mask >>= 1;
            count += 1;
        }
        count
    }
}

impl SymbolEncoder for BitEncoder {
    fn encode(
        &self,
        payload: &[u8],
        symbols_written: usize,
        symbols_free: usize,
        out: &mut [PulseSymbol],
    ) -> Chunk {
        // Ein Byte wird nie auf zwei Aufrufe verteilt
        if symbols_free.min(out.len()) < MIN_CHUNK_SYMBOLS {
            return Chunk::PENDING;
        }

        let byte_index = symbols_written / MIN_CHUNK_SYMBOLS;
        match payload.get(byte_index) {
            Some(&byte) => Chunk {
                written: self.encode_byte(byte, out),
                done: false,
            },
            None => {
                if let Some(slot) = out.first_mut() {
                    *slot = self.symbols.reset;
                }
                Chunk {
                    written: 1,
                    done: true,
                }
            }
        }
    }
}
