//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels. The display
//! and key tasks share the panel through a mutex so their bus
//! transactions never interleave.

pub mod display;
pub mod key_log;
pub mod keys;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use tm1650_drivers::{Tm1650, TwoWireBus};
use tm1650_hal_rp2040::BusLine;

pub use display::{display_task, UptimeWriter};
pub use key_log::key_log_task;
pub use keys::key_task;

/// Bit-banged bus on two RP2040 pins
pub type PanelBus = TwoWireBus<BusLine<'static>, BusLine<'static>, Delay>;

/// The panel driver as configured by the firmware
pub type Panel = Tm1650<PanelBus, UptimeWriter>;

/// Panel shared between the display and key tasks
pub type SharedPanel = Mutex<CriticalSectionRawMutex, Panel>;
