// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über einen Embassy Channel (Button → LED).

pub mod button;
pub mod led_cycle;

// Re-export Tasks für einfachen Import
pub use button::button_task;
pub use led_cycle::{SwitchableLed, led_cycle_logic, led_cycle_task};
