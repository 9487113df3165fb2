// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

use rgb::RGB8;
use ws2812_core::{BitTiming, ChannelConfig, DrainTimeout, DriverConfig};

// ============================================================================
// GPIO Zuordnung
// ============================================================================

/// GPIO-Pin für die Versorgungsspannung der LED (High = an)
pub const POWER_GPIO_PIN: u8 = 8;

/// GPIO-Pin für die WS2812 Datenleitung (RMT TX)
pub const TX_GPIO_PIN: u8 = 5;

/// GPIO-Pin des BOOT-Tasters (Low = gedrückt)
pub const BUTTON_GPIO_PIN: u8 = 9;

// ============================================================================
// RMT Konfiguration
// ============================================================================

/// Quell-Takt des RMT Peripherals in MHz
pub const RMT_SOURCE_MHZ: u32 = 80;

/// Kanal-Teiler: 80 MHz / 4 = 20 MHz → 1 Tick = 50 ns
pub const RMT_CLK_DIVIDER: u8 = 4;

/// Symbole pro RMT Speicherblock (ESP32-C6)
pub const RMT_SYMBOLS_PER_BLOCK: usize = 48;

/// WS2812 Bit-Timing (Tick-Frequenz muss zum Teiler passen)
pub const LED_TIMING: BitTiming =
    BitTiming::WS2812.with_tick_hz(RMT_SOURCE_MHZ * 1_000_000 / RMT_CLK_DIVIDER as u32);

/// Einstellungen des Sendekanals
pub const CHANNEL_CONFIG: ChannelConfig = ChannelConfig {
    mem_block_symbols: 64,
    queue_depth: 4,
    interrupt_priority: 0,
    invert_output: false,
    idle_level_high: false,
};

/// Wartezeit auf das Ende einer Übertragung
pub const DRAIN_TIMEOUT: DrainTimeout = DrainTimeout::Forever;

pub const DRIVER_CONFIG: DriverConfig = DriverConfig {
    timing: LED_TIMING,
    drain_timeout: DRAIN_TIMEOUT,
};

// Compile-Zeit Prüfungen
const _: () = assert!(LED_TIMING.tick_hz == 20_000_000);
const _: () = assert!(LED_TIMING.validate().is_ok());
const _: () = assert!(CHANNEL_CONFIG.mem_block_symbols >= ws2812_core::PAYLOAD_LEN * 8 + 1);

// ============================================================================
// Demo Konfiguration
// ============================================================================

/// Helligkeits-Level der Demo-Farben (0-255)
/// Wert ist gedimmt für Augenschonung
pub const LED_BRIGHTNESS: u8 = 10;

/// Farben, die die LED-Task im Auto-Modus durchläuft
pub const DEMO_PALETTE: [RGB8; 4] = [
    RGB8 { r: LED_BRIGHTNESS, g: 0, b: 0 },
    RGB8 { r: 0, g: LED_BRIGHTNESS, b: 0 },
    RGB8 { r: 0, g: 0, b: LED_BRIGHTNESS },
    RGB8 { r: LED_BRIGHTNESS, g: LED_BRIGHTNESS, b: LED_BRIGHTNESS },
];

/// Intervall zwischen zwei Farbwechseln in Millisekunden
pub const COLOR_INTERVAL_MS: u64 = 1000;

/// Entprellzeit des Tasters in Millisekunden
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Kapazität des Command-Channels
pub const COMMAND_QUEUE_DEPTH: usize = 4;
