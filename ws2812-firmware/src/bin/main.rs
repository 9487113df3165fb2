// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit laufenden Übertragungen
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

use defmt::info;

// Projekt-Module und Konfiguration
use ws2812_firmware::LedCommandChannel;
use ws2812_firmware::config::{BUTTON_GPIO_PIN, POWER_GPIO_PIN, TX_GPIO_PIN};
use ws2812_firmware::hal::RmtLedWriter;
use ws2812_firmware::tasks::{button_task, led_cycle_task};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // WS2812 Treiber: Hardware-Fehler beim Start sind fatal
    info!(
        "WS2812: power GPIO{}, data GPIO{}",
        POWER_GPIO_PIN, TX_GPIO_PIN
    );
    let led = RmtLedWriter::new(peripherals.RMT, peripherals.GPIO8, peripherals.GPIO5)
        .expect("Failed to initialize WS2812 driver");

    // BOOT-Taster mit Pull-Up
    info!("Button: GPIO{}", BUTTON_GPIO_PIN);
    let button = Input::new(
        peripherals.GPIO9,
        InputConfig::default().with_pull(Pull::Up),
    );

    // LED Command-Channel erstellen (für Button → LED Kommunikation)
    static COMMAND_CHANNEL: static_cell::StaticCell<LedCommandChannel> =
        static_cell::StaticCell::new();
    let command_channel = COMMAND_CHANNEL.init(LedCommandChannel::new());

    // Spawn LED Task (besitzt den Treiber exklusiv)
    spawner
        .spawn(led_cycle_task(led, command_channel.receiver()))
        .expect("Failed to spawn LED task");

    // Spawn Button Task
    spawner
        .spawn(button_task(button, command_channel.sender()))
        .expect("Failed to spawn button task");

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
