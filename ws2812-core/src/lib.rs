//! WS2812 Core - Platform-agnostic Encoder, Traits and Driver
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die Symbol-Tabelle, den Pull-Encoder, die Hardware-Traits
//! und den Treiber, der beides zusammenführt.

#![no_std]

pub mod driver;
pub mod encoder;
pub mod logic;
pub mod timing;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use driver::Ws2812;
pub use encoder::{BitEncoder, Chunk, MIN_CHUNK_SYMBOLS, SymbolEncoder};
pub use logic::PaletteCycle;
pub use timing::{BitTiming, MAX_TICKS, PulseSymbol, SymbolTable, TimingError};
pub use traits::{LedError, PulseChannel, SmartLedWriter};
pub use types::{ChannelConfig, ColorPayload, DrainTimeout, DriverConfig, LedCommand, PAYLOAD_LEN};
