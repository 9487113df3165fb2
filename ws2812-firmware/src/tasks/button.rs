// Button Task - BOOT-Taster schaltet die LED-Versorgung um
use defmt::{info, warn};
use embassy_time::{Duration, Timer};
use esp_hal::gpio::Input;
use ws2812_core::LedCommand;

use crate::LedCommandSender;
use crate::config::BUTTON_DEBOUNCE_MS;

/// Wartet auf Tastendruck und sendet abwechselnd PowerOff / PowerOn
///
/// # Parameter
/// - `button`: Eingang mit Pull-Up (Low = gedrückt)
/// - `command_sender`: Channel Sender zur LED-Task
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>, command_sender: LedCommandSender) {
    let mut powered = true;

    loop {
        button.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        if button.is_high() {
            continue;
        }

        powered = !powered;
        let cmd = if powered {
            LedCommand::PowerOn
        } else {
            LedCommand::PowerOff
        };
        info!("Button: {}", cmd);
        if command_sender.try_send(cmd).is_err() {
            warn!("Button: command queue full, dropped {}", cmd);
        }

        button.wait_for_rising_edge().await;
    }
}
