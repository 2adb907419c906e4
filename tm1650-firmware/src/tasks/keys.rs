//! Key scan task
//!
//! Reads the key register at the configured interval and publishes every
//! press and release on the key channel.

use defmt::*;
use embassy_time::{Duration, Ticker};
use tm1650_core::config::PanelConfig;
use tm1650_core::traits::KeyListener;
use tm1650_drivers::KeyScanner;

use super::SharedPanel;
use crate::channels::{KeyEvent, KEY_CHANNEL};

/// Forwards one key's changes to the key channel
struct ChannelListener {
    code: u8,
}

impl KeyListener for ChannelListener {
    fn on_change(&mut self, pressed: bool) {
        let event = KeyEvent {
            code: self.code,
            pressed,
        };
        if KEY_CHANNEL.try_send(event).is_err() {
            warn!("Key channel full, dropped {}", event);
        }
    }
}

/// Key task - scans the key matrix
#[embassy_executor::task]
pub async fn key_task(panel: &'static SharedPanel, config: &'static PanelConfig) {
    let mut scanner = KeyScanner::new();
    for key in &config.keys {
        if let Err(e) = scanner.add_key(key.key, ChannelListener { code: key.key }) {
            warn!("Key '{}' skipped: {}", key.name.as_str(), e);
        }
    }

    if scanner.is_empty() {
        info!("No keys configured, key task exiting");
        return;
    }

    info!("Key task started ({} keys)", scanner.len());
    let mut ticker = Ticker::every(Duration::from_millis(config.key_scan_interval_ms as u64));

    loop {
        {
            let mut panel = panel.lock().await;
            scanner.scan(&mut *panel);
        }

        ticker.next().await;
    }
}
