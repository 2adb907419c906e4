//! Two-wire bus transport
//!
//! The TM1650 speaks an I2C-like protocol without device addressing: a
//! START condition, a command byte, one data byte and a STOP condition.
//! [`ByteBus`] is the byte-level contract the register layer builds on;
//! [`TwoWireBus`] implements it by bit-banging two open-drain GPIO lines.

mod two_wire;

#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
pub(crate) mod sim;

pub use two_wire::TwoWireBus;

/// Byte-level bus primitives
///
/// None of these fail at this layer; a missing acknowledge is reported
/// through the return value of [`write_byte`](ByteBus::write_byte) and it
/// is up to the caller to decide what to do.
pub trait ByteBus {
    /// Issue a START condition
    fn start(&mut self);

    /// Issue a STOP condition, returning the bus to idle
    fn stop(&mut self);

    /// Clock out one byte, MSB first
    ///
    /// Returns `true` if the chip acknowledged.
    fn write_byte(&mut self, byte: u8) -> bool;

    /// Clock in one byte, MSB first, without acknowledging it
    fn read_byte(&mut self) -> u8;
}

impl<T: ByteBus + ?Sized> ByteBus for &mut T {
    fn start(&mut self) {
        (**self).start();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn write_byte(&mut self, byte: u8) -> bool {
        (**self).write_byte(byte)
    }

    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }
}

/// Transaction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The chip did not acknowledge a byte
    Nack {
        /// The byte that was not acknowledged
        byte: u8,
    },
}

/// Consecutive failures before the link is reported unhealthy
pub const FAILURE_THRESHOLD: u8 = 3;

/// Transaction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusStats {
    /// Transactions attempted
    pub transactions: u32,
    /// Transactions that failed
    pub failures: u32,
    /// Failures since the last success
    pub consecutive_failures: u8,
}

impl BusStats {
    /// Record the outcome of one transaction
    pub fn record<T>(&mut self, result: &Result<T, BusError>) {
        self.transactions = self.transactions.wrapping_add(1);
        match result {
            Ok(_) => self.consecutive_failures = 0,
            Err(_) => {
                self.failures = self.failures.wrapping_add(1);
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            }
        }
    }

    /// Check if the chip is responding
    ///
    /// The link is unhealthy once [`FAILURE_THRESHOLD`] transactions in a
    /// row have failed, and healthy again after the next success.
    pub fn is_healthy(&self) -> bool {
        self.consecutive_failures < FAILURE_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counting() {
        let mut stats = BusStats::default();
        stats.record(&Ok::<(), BusError>(()));
        stats.record(&Err::<(), _>(BusError::Nack { byte: 0x48 }));

        assert_eq!(stats.transactions, 2);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.consecutive_failures, 1);
        assert!(stats.is_healthy());
    }

    #[test]
    fn test_link_health() {
        let mut stats = BusStats::default();
        let nack = Err::<(), _>(BusError::Nack { byte: 0x68 });

        for _ in 0..FAILURE_THRESHOLD {
            stats.record(&nack);
        }
        assert!(!stats.is_healthy());

        // One success restores the link
        stats.record(&Ok::<(), BusError>(()));
        assert!(stats.is_healthy());
        assert_eq!(stats.failures, FAILURE_THRESHOLD as u32);
    }
}
