//! TM1650 panel firmware
//!
//! Main firmware binary for RP2040 boards driving a TM1650 LED and key
//! panel. Pins, display settings and keys come from panel.toml.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tm1650_core::config::PanelConfig;
use tm1650_drivers::{Tm1650, TwoWireBus};
use tm1650_hal_rp2040::{PinBank, PinSpec};

use crate::tasks::{Panel, SharedPanel, UptimeWriter};

mod channels;
mod config;
mod tasks;

// Static cells for state shared with tasks (must live forever)
static PANEL_CONFIG: StaticCell<PanelConfig> = StaticCell::new();
static PANEL: StaticCell<SharedPanel> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("TM1650 panel firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static PanelConfig = PANEL_CONFIG.init(config::load_config());
    config::log_config(config);

    let panel = match init_panel(p, config) {
        Some(panel) => panel,
        None => {
            error!("Panel setup failed, halting");
            loop {
                embassy_time::Timer::after_secs(60).await;
            }
        }
    };
    let panel: &'static SharedPanel = PANEL.init(Mutex::new(panel));
    info!("Panel initialized");

    spawner.spawn(unwrap!(tasks::display_task(
        panel,
        config.display.update_interval_ms
    )));
    spawner.spawn(unwrap!(tasks::key_task(panel, config)));
    spawner.spawn(unwrap!(tasks::key_log_task(config)));

    info!("All tasks spawned, firmware running");
}

/// Claim the bus pins and build the driver
fn init_panel(p: embassy_rp::Peripherals, config: &PanelConfig) -> Option<Panel> {
    let mut pins = PinBank::from_peripherals(p);

    let clk = pins
        .take_line(PinSpec {
            pin: config.bus.clk_pin,
            pull_up: config.bus.clk_pull_up,
        })
        .map_err(|e| error!("Clock pin: {}", e))
        .ok()?;
    let dio = pins
        .take_line(PinSpec {
            pin: config.bus.dio_pin,
            pull_up: config.bus.dio_pull_up,
        })
        .map_err(|e| error!("Data pin: {}", e))
        .ok()?;

    let bus = TwoWireBus::new(clk, dio, Delay, config.bus.bit_delay_us);
    let display = Tm1650::new(bus, &config.display)
        .map_err(|e| error!("Display config: {}", e))
        .ok()?;

    Some(display.with_writer(UptimeWriter::new()))
}
