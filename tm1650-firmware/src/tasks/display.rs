//! Display refresh task
//!
//! Polls the panel at the configured interval. Each poll redraws the
//! uptime and pushes whatever changed.

use core::fmt::Write;

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use tm1650_core::traits::FrameWriter;
use tm1650_core::Framebuffer;

use super::SharedPanel;

/// Shows seconds since boot, right-aligned
///
/// Wraps when the count no longer fits the display.
pub struct UptimeWriter {
    start: Instant,
}

impl UptimeWriter {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl FrameWriter for UptimeWriter {
    fn render(&mut self, fb: &mut Framebuffer) {
        let width = fb.len();
        let seconds = self.start.elapsed().as_secs() % 10u64.pow(width as u32);
        let _ = write!(fb, "{:>width$}", seconds);
    }
}

/// Display task - pushes frames to the panel
#[embassy_executor::task]
pub async fn display_task(panel: &'static SharedPanel, interval_ms: u32) {
    info!("Display task started");

    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));
    let mut healthy = true;

    loop {
        {
            let mut panel = panel.lock().await;
            let report = panel.poll();
            trace!(
                "Display poll: {} digits, control {}",
                report.digits_written,
                report.control_written
            );

            let stats = panel.stats();
            if stats.is_healthy() != healthy {
                healthy = stats.is_healthy();
                if healthy {
                    // Chip may have been power cycled while unreachable
                    info!("Panel responding again");
                    panel.force_refresh();
                } else {
                    warn!(
                        "Panel not responding ({} of {} transactions failed)",
                        stats.failures, stats.transactions
                    );
                }
            }
        }

        ticker.next().await;
    }
}
