// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus ws2812-core für die ESP32-C6 Hardware.

pub mod led_writer;
pub mod rmt_channel;

pub use led_writer::RmtLedWriter;
pub use rmt_channel::RmtPulseChannel;
