//! Key event logger
//!
//! Consumes the key channel and logs each change by key name.

use defmt::*;
use tm1650_core::config::PanelConfig;

use crate::channels::KEY_CHANNEL;

/// Key log task - reports key presses and releases
#[embassy_executor::task]
pub async fn key_log_task(config: &'static PanelConfig) {
    loop {
        let event = KEY_CHANNEL.receive().await;
        let name = config
            .keys
            .iter()
            .find(|k| k.key == event.code)
            .map(|k| k.name.as_str())
            .unwrap_or("?");

        if event.pressed {
            info!("Key '{}' pressed", name);
        } else {
            info!("Key '{}' released", name);
        }
    }
}
