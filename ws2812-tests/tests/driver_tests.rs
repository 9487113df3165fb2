//! Integration Tests für den WS2812 Treiber
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockPowerPin + MockPulseChannel

mod common;

use common::{MockPowerPin, MockPulseChannel, decode_bytes};
use rgb::RGB8;
use ws2812_core::{
    BitTiming, DrainTimeout, DriverConfig, LedError, SmartLedWriter, SymbolTable, TimingError,
    Ws2812,
};

type MockDriver = Ws2812<MockPowerPin, MockPulseChannel>;

fn driver() -> MockDriver {
    driver_with_channel(MockPulseChannel::new())
}

fn driver_with_channel(channel: MockPulseChannel) -> MockDriver {
    Ws2812::new(MockPowerPin::new(), channel, DriverConfig::default()).unwrap()
}

// ============================================================================
// Tests: Konstruktion & Power
// ============================================================================

#[test]
fn test_new_starts_powered_off() {
    let led = driver();
    assert!(!led.is_powered());

    let (pin, channel) = led.release();
    assert_eq!(pin.level, Some(false));
    assert_eq!(channel.enable_count, 0);
}

#[test]
fn test_new_fails_when_power_pin_fails() {
    let mut pin = MockPowerPin::new();
    pin.fail_next_write = true;

    let result = Ws2812::new(pin, MockPulseChannel::new(), DriverConfig::default());
    assert!(matches!(result, Err(LedError::PowerLine)));
}

#[test]
fn test_new_rejects_invalid_timing() {
    let config = DriverConfig {
        timing: BitTiming::WS2812.with_tick_hz(1_000_000_000),
        ..DriverConfig::default()
    };

    let result = Ws2812::new(MockPowerPin::new(), MockPulseChannel::new(), config);
    assert!(matches!(
        result,
        Err(LedError::Timing(TimingError::TickOverflow { nanos: 50_000 }))
    ));
}

#[test]
fn test_power_toggle_does_not_transmit() {
    let mut led = driver();

    led.power_off().unwrap();
    led.power_on().unwrap();
    assert!(led.is_powered());

    let (pin, channel) = led.release();
    assert_eq!(pin.level, Some(true));
    assert_eq!(pin.history, [false, false, true]);
    assert_eq!(channel.enable_count, 0);
    assert!(channel.frames.is_empty());
}

#[test]
fn test_power_on_failure_keeps_state() {
    let mut pin = MockPowerPin::new();
    // Schreibzugriff 0 = Konstruktion, 1 = power_on
    pin.fail_at_write = Some(1);
    let mut led = Ws2812::new(pin, MockPulseChannel::new(), DriverConfig::default()).unwrap();

    assert_eq!(led.power_on(), Err(LedError::PowerLine));
    assert!(!led.is_powered());

    led.power_on().unwrap();
    assert!(led.is_powered());
}

// ============================================================================
// Tests: set_color
// ============================================================================

#[test]
fn test_set_color_reorders_to_grb() {
    let mut led = driver();
    led.set_rgb(10, 20, 30).unwrap();

    let (_, channel) = led.release();
    assert_eq!(channel.frames.len(), 1);
    let frame = &channel.frames[0];
    assert_eq!(decode_bytes(&frame[..24], &SymbolTable::WS2812), [20, 10, 30]);
}

#[test]
fn test_set_color_end_to_end() {
    let table = SymbolTable::WS2812;
    let mut led = driver();
    led.set_color(RGB8 { r: 255, g: 0, b: 128 }).unwrap();

    let (_, channel) = led.release();
    let frame = &channel.frames[0];
    assert_eq!(frame.len(), 25);
    // Grün = 0
    assert!(frame[0..8].iter().all(|s| *s == table.zero));
    // Rot = 255
    assert!(frame[8..16].iter().all(|s| *s == table.one));
    // Blau = 128 = 0b1000_0000
    assert_eq!(frame[16], table.one);
    assert!(frame[17..24].iter().all(|s| *s == table.zero));
    assert_eq!(frame[24], table.reset);
}

#[test]
fn test_set_color_enables_and_disables_once() {
    let mut led = driver();
    led.set_rgb(1, 2, 3).unwrap();

    let (_, channel) = led.release();
    assert_eq!(channel.enable_count, 1);
    assert_eq!(channel.disable_count, 1);
    assert!(!channel.enabled);
}

#[test]
fn test_consecutive_transmissions_are_independent() {
    let table = SymbolTable::WS2812;
    let mut led = driver();
    led.set_rgb(255, 255, 255).unwrap();
    led.set_rgb(0, 0, 0).unwrap();

    let (_, channel) = led.release();
    assert_eq!(channel.frames.len(), 2);
    for frame in &channel.frames {
        assert_eq!(frame.len(), 25);
        assert_eq!(frame.last(), Some(&table.reset));
    }
    assert!(channel.frames[1][..24].iter().all(|s| *s == table.zero));
}

#[test]
fn test_small_buffer_waits_for_space() {
    let mut led = driver_with_channel(MockPulseChannel::with_capacity(12));
    led.set_rgb(0xAA, 0x55, 0x0F).unwrap();

    let (_, channel) = led.release();
    assert!(channel.space_waits > 0);
    assert_eq!(channel.frames[0].len(), 25);
    assert_eq!(
        decode_bytes(&channel.frames[0][..24], &SymbolTable::WS2812),
        [0x55, 0xAA, 0x0F]
    );
}

#[test]
fn test_free_schedule_below_minimum_is_skipped() {
    let mut channel = MockPulseChannel::new();
    channel.free_schedule.extend([0, 7, 8, 3, 64, 8]);
    let mut led = driver_with_channel(channel);
    led.set_rgb(1, 2, 3).unwrap();

    let (_, channel) = led.release();
    assert_eq!(channel.space_waits, 3);
    assert_eq!(channel.frames[0].len(), 25);
}

#[test]
fn test_drain_timeout_is_forwarded() {
    let config = DriverConfig {
        drain_timeout: DrainTimeout::Millis(5),
        ..DriverConfig::default()
    };
    let mut led = Ws2812::new(MockPowerPin::new(), MockPulseChannel::new(), config).unwrap();
    led.set_rgb(0, 0, 0).unwrap();

    let (_, channel) = led.release();
    assert_eq!(channel.last_timeout, Some(DrainTimeout::Millis(5)));
}

#[test]
fn test_default_drain_timeout_is_forever() {
    let mut led = driver();
    led.set_rgb(0, 0, 0).unwrap();

    let (_, channel) = led.release();
    assert_eq!(channel.last_timeout, Some(DrainTimeout::Forever));
}

// ============================================================================
// Tests: Fehlerbehandlung
// ============================================================================

#[test]
fn test_enable_failure_sends_nothing() {
    let mut channel = MockPulseChannel::new();
    channel.fail_enable = true;
    let mut led = driver_with_channel(channel);

    assert_eq!(led.set_rgb(1, 2, 3), Err(LedError::Enable));

    let (_, channel) = led.release();
    assert!(channel.current.is_empty());
    assert!(channel.frames.is_empty());
    assert_eq!(channel.disable_count, 0);
}

#[test]
fn test_queue_failure_disables_channel() {
    let mut channel = MockPulseChannel::new();
    channel.fail_queue = true;
    let mut led = driver_with_channel(channel);

    assert_eq!(led.set_rgb(1, 2, 3), Err(LedError::Transmit));

    let (_, channel) = led.release();
    assert!(!channel.enabled);
    assert_eq!(channel.disable_count, 1);
    assert!(channel.last_timeout.is_none());
}

#[test]
fn test_drain_failure_disables_channel() {
    let mut channel = MockPulseChannel::new();
    channel.fail_drain = true;
    let mut led = driver_with_channel(channel);

    assert_eq!(led.set_rgb(1, 2, 3), Err(LedError::DrainTimeout));

    let (_, channel) = led.release();
    assert!(!channel.enabled);
    assert_eq!(channel.disable_count, 1);
    assert!(channel.frames.is_empty());
}

#[test]
fn test_stalled_queue_reports_error() {
    let mut channel = MockPulseChannel::new();
    channel.stalled = true;
    let mut led = driver_with_channel(channel);

    assert_eq!(led.set_rgb(1, 2, 3), Err(LedError::QueueStalled));

    let (_, channel) = led.release();
    assert!(!channel.enabled);
    assert!(channel.current.is_empty());
}

#[test]
fn test_disable_failure_after_success_is_reported() {
    let mut channel = MockPulseChannel::new();
    channel.fail_disable = true;
    let mut led = driver_with_channel(channel);

    assert_eq!(led.set_rgb(1, 2, 3), Err(LedError::Disable));

    let (_, channel) = led.release();
    assert_eq!(channel.frames.len(), 1);
}

#[test]
fn test_first_error_wins() {
    let mut channel = MockPulseChannel::new();
    channel.fail_drain = true;
    channel.fail_disable = true;
    let mut led = driver_with_channel(channel);

    assert_eq!(led.set_rgb(1, 2, 3), Err(LedError::DrainTimeout));
}

#[test]
fn test_driver_recovers_after_failure() {
    let mut channel = MockPulseChannel::new();
    channel.fail_drain = true;
    let mut led = driver_with_channel(channel);
    assert!(led.set_rgb(1, 2, 3).is_err());

    let (pin, mut channel) = led.release();
    channel.fail_drain = false;
    channel.current.clear();
    let mut led = Ws2812::new(pin, channel, DriverConfig::default()).unwrap();
    led.set_rgb(4, 5, 6).unwrap();

    let (_, channel) = led.release();
    assert_eq!(channel.frames.len(), 1);
    assert_eq!(
        decode_bytes(&channel.frames[0][..24], &SymbolTable::WS2812),
        [5, 4, 6]
    );
}

// ============================================================================
// Tests: SmartLedWriter
// ============================================================================

#[test]
fn test_smart_led_writer_forwards_to_set_color() {
    fn write_via_trait<L: SmartLedWriter>(led: &mut L) -> Result<(), LedError> {
        led.write(RGB8 { r: 10, g: 20, b: 30 })
    }

    let mut led = driver();
    write_via_trait(&mut led).unwrap();

    let (_, channel) = led.release();
    assert_eq!(
        decode_bytes(&channel.frames[0][..24], &SymbolTable::WS2812),
        [20, 10, 30]
    );
}
