// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von ws2812-core
pub use ws2812_core::{LedCommand, LedError, SmartLedWriter, Ws2812};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::COMMAND_QUEUE_DEPTH;

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Statt:  Sender<'static, NoopRawMutex, LedCommand, 4>
// Nutze:  LedCommandSender

/// Channel für LED-Kommandos (Button → LED Task)
pub type LedCommandChannel = Channel<NoopRawMutex, LedCommand, COMMAND_QUEUE_DEPTH>;

/// Sender für LED-Kommandos
pub type LedCommandSender = Sender<'static, NoopRawMutex, LedCommand, COMMAND_QUEUE_DEPTH>;

/// Receiver für LED-Kommandos (LED Task empfängt)
pub type LedCommandReceiver = Receiver<'static, NoopRawMutex, LedCommand, COMMAND_QUEUE_DEPTH>;
