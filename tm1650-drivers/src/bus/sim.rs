//! Simulated TM1650 on a shared wire
//!
//! Decodes the line waveform the way the chip does: START/STOP conditions,
//! data bits sampled on rising clock edges, an acknowledge driven during
//! the ninth clock, and the key byte shifted out after a key read command.

use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use tm1650_hal::{FlexPin, Level};

use crate::tm1650::registers::cmd;

/// Delay that returns immediately
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Clk,
    Dio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No transaction in progress
    Idle,
    /// Shifting in a byte from the master
    Receiving { byte: u8, bits: u8 },
    /// Chip holds the acknowledge for the byte just received
    Ack { byte: u8 },
    /// Shifting out the key byte
    Sending { byte: u8, bit: u8 },
    /// Master's acknowledge clock after the key byte
    MasterAck,
}

/// Line levels plus chip state
pub struct Wire {
    clk_low: bool,
    dio_master_low: bool,
    dio_chip_low: bool,
    phase: Phase,
    responding: bool,
    key_byte: u8,
    current: Vec<u8, 4>,
    transactions: Vec<Vec<u8, 4>, 32>,
    digits: [Option<u8>; 6],
    control: Option<u8>,
    master_acked_read: Option<bool>,
}

impl Wire {
    pub fn new() -> Self {
        Self {
            clk_low: false,
            dio_master_low: false,
            dio_chip_low: false,
            phase: Phase::Idle,
            responding: true,
            key_byte: 0,
            current: Vec::new(),
            transactions: Vec::new(),
            digits: [None; 6],
            control: None,
            master_acked_read: None,
        }
    }

    /// Clock and data pins sharing this wire
    pub fn pins(wire: &RefCell<Wire>) -> (SimPin<'_>, SimPin<'_>) {
        (
            SimPin {
                wire,
                line: Line::Clk,
            },
            SimPin {
                wire,
                line: Line::Dio,
            },
        )
    }

    /// Stop acknowledging (chip absent or unpowered)
    pub fn set_responding(&mut self, responding: bool) {
        self.responding = responding;
    }

    /// Byte returned by the next key reads
    pub fn set_key_byte(&mut self, byte: u8) {
        self.key_byte = byte;
    }

    /// Bytes of the last completed transaction
    pub fn last_transaction(&self) -> Option<&[u8]> {
        self.transactions.last().map(|t| t.as_slice())
    }

    /// Number of completed transactions
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Digit register contents, if ever written
    pub fn digit(&self, pos: usize) -> Option<u8> {
        self.digits.get(pos).copied().flatten()
    }

    /// Control register contents, if ever written
    pub fn control(&self) -> Option<u8> {
        self.control
    }

    /// Whether the master acknowledged the last key byte
    pub fn master_acked_read(&self) -> Option<bool> {
        self.master_acked_read
    }

    /// Both lines high and no transaction open
    pub fn is_idle(&self) -> bool {
        self.clk_high() && self.dio_high() && self.phase == Phase::Idle
    }

    fn clk_high(&self) -> bool {
        !self.clk_low
    }

    fn dio_high(&self) -> bool {
        !(self.dio_master_low || self.dio_chip_low)
    }

    fn drive(&mut self, line: Line, low: bool) {
        let (clk_was, dio_was) = (self.clk_high(), self.dio_high());
        match line {
            Line::Clk => self.clk_low = low,
            Line::Dio => self.dio_master_low = low,
        }
        let (clk, dio) = (self.clk_high(), self.dio_high());

        if clk != clk_was {
            if clk {
                self.on_rise(dio);
            } else {
                self.on_fall();
            }
        } else if clk && dio != dio_was {
            if dio {
                self.on_stop();
            } else {
                self.on_start();
            }
        }
    }

    fn on_start(&mut self) {
        self.current.clear();
        self.dio_chip_low = false;
        self.phase = Phase::Receiving { byte: 0, bits: 0 };
    }

    fn on_stop(&mut self) {
        self.dio_chip_low = false;
        self.phase = Phase::Idle;
        if self.current.is_empty() {
            return;
        }
        let bytes = core::mem::take(&mut self.current);
        if self.responding {
            self.apply(&bytes);
        }
        let _ = self.transactions.push(bytes);
    }

    fn apply(&mut self, bytes: &[u8]) {
        if let [command, data] = bytes {
            if *command == cmd::CONTROL {
                self.control = Some(*data);
            } else if let Some(pos) = cmd::digit_position(*command) {
                self.digits[pos] = Some(*data);
            }
        }
    }

    fn on_rise(&mut self, dio: bool) {
        match self.phase {
            Phase::Receiving { byte, bits } if bits < 8 => {
                self.phase = Phase::Receiving {
                    byte: (byte << 1) | dio as u8,
                    bits: bits + 1,
                };
            }
            Phase::MasterAck => {
                self.master_acked_read = Some(!dio);
            }
            _ => {}
        }
    }

    fn on_fall(&mut self) {
        match self.phase {
            Phase::Receiving { byte, bits: 8 } => {
                let _ = self.current.push(byte);
                self.dio_chip_low = self.responding;
                self.phase = Phase::Ack { byte };
            }
            Phase::Ack { byte } => {
                self.dio_chip_low = false;
                if byte == cmd::READ_KEYS && self.responding {
                    self.phase = Phase::Sending {
                        byte: self.key_byte,
                        bit: 0,
                    };
                    self.dio_chip_low = self.key_byte & 0x80 == 0;
                } else {
                    self.phase = Phase::Receiving { byte: 0, bits: 0 };
                }
            }
            Phase::Sending { byte, bit } => {
                let next = bit + 1;
                if next < 8 {
                    self.dio_chip_low = byte & (0x80 >> next) == 0;
                    self.phase = Phase::Sending { byte, bit: next };
                } else {
                    self.dio_chip_low = false;
                    self.phase = Phase::MasterAck;
                }
            }
            Phase::MasterAck => {
                self.phase = Phase::Idle;
            }
            _ => {}
        }
    }
}

/// One line of a simulated wire
pub struct SimPin<'a> {
    wire: &'a RefCell<Wire>,
    line: Line,
}

impl FlexPin for SimPin<'_> {
    fn set_output(&mut self, level: Level) {
        self.wire.borrow_mut().drive(self.line, level.is_low());
    }

    fn set_input(&mut self) {
        self.wire.borrow_mut().drive(self.line, false);
    }

    fn read(&self) -> Level {
        let wire = self.wire.borrow();
        match self.line {
            Line::Clk => Level::from(wire.clk_high()),
            Line::Dio => Level::from(wire.dio_high()),
        }
    }
}
