//! Bit-banged two-wire transport
//!
//! Both lines are driven open-drain style through [`FlexPin`]: pulled low
//! as an output, released as an input. Every line transition is followed
//! by a busy-wait settle delay.
//!
//! # Waveform
//!
//! ```text
//!        START      bit 7     ...   bit 0      ACK        STOP
//! CLK  ‾‾‾‾‾‾\_____/‾‾‾\____  ...  /‾‾‾\____/‾‾‾\____/‾‾‾‾‾‾‾‾‾
//! DIO  ‾‾‾\____<  D7  >____   ...  < D0 >---< chip >___/‾‾‾‾‾‾‾
//! ```
//!
//! Data changes only while CLK is low; DIO falling with CLK high is START,
//! DIO rising with CLK high is STOP.

use embedded_hal::delay::DelayNs;
use tm1650_core::config::hardware::DEFAULT_BIT_DELAY_US;
use tm1650_hal::FlexPin;

use super::ByteBus;

/// Two-wire bus over a clock and a data GPIO
pub struct TwoWireBus<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    /// Settle delay after each line transition
    bit_delay_us: u32,
}

impl<CLK: FlexPin, DIO: FlexPin, D: DelayNs> TwoWireBus<CLK, DIO, D> {
    /// Create a bus and release both lines
    pub fn new(clk: CLK, dio: DIO, delay: D, bit_delay_us: u32) -> Self {
        let mut bus = Self {
            clk,
            dio,
            delay,
            bit_delay_us,
        };
        bus.dio.release();
        bus.clk.release();
        bus
    }

    /// Create a bus with the default settle delay
    pub fn with_default_timing(clk: CLK, dio: DIO, delay: D) -> Self {
        Self::new(clk, dio, delay, DEFAULT_BIT_DELAY_US)
    }

    /// Settle delay in microseconds
    pub fn bit_delay_us(&self) -> u32 {
        self.bit_delay_us
    }

    /// Release the pins and delay provider
    pub fn free(self) -> (CLK, DIO, D) {
        (self.clk, self.dio, self.delay)
    }

    fn settle(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }

    /// One clock pulse: rise, settle, sample DIO, fall, settle
    fn clock_pulse(&mut self) -> bool {
        self.clk.release();
        self.settle();
        let high = self.dio.is_high();
        self.clk.pull_low();
        self.settle();
        high
    }
}

impl<CLK: FlexPin, DIO: FlexPin, D: DelayNs> ByteBus for TwoWireBus<CLK, DIO, D> {
    fn start(&mut self) {
        self.dio.release();
        self.clk.release();
        self.settle();
        self.dio.pull_low();
        self.settle();
        self.clk.pull_low();
        self.settle();
    }

    fn stop(&mut self) {
        self.dio.pull_low();
        self.settle();
        self.clk.release();
        self.settle();
        self.dio.release();
        self.settle();
    }

    fn write_byte(&mut self, byte: u8) -> bool {
        for bit in (0..8).rev() {
            if byte & (1 << bit) != 0 {
                self.dio.release();
            } else {
                self.dio.pull_low();
            }
            self.settle();
            self.clock_pulse();
        }

        // Ninth clock: chip pulls DIO low to acknowledge
        self.dio.release();
        self.settle();
        let nack = self.clock_pulse();
        !nack
    }

    fn read_byte(&mut self) -> u8 {
        self.dio.release();
        self.settle();

        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | self.clock_pulse() as u8;
        }

        // Ninth clock with DIO released: no acknowledge from the master
        self.clock_pulse();
        byte
    }
}
