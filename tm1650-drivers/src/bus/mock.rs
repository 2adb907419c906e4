//! Scripted byte-level bus for register and driver tests

use heapless::{Deque, Vec};

use super::ByteBus;

/// Key byte returned when no read is queued
const NO_KEY: u8 = 0x04;

/// One recorded bus operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Start,
    Stop,
    Write(u8),
    Read(u8),
}

/// Records every operation and fails writes on request
pub struct MockBus {
    ops: Vec<Op, 256>,
    nack_count: u8,
    nack_byte: Option<u8>,
    reads: Deque<u8, 16>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            nack_count: 0,
            nack_byte: None,
            reads: Deque::new(),
        }
    }

    /// Fail the next `count` byte writes
    pub fn nack_next(&mut self, count: u8) {
        self.nack_count = count;
    }

    /// Fail every write of `byte`
    pub fn nack_byte(&mut self, byte: u8) {
        self.nack_byte = Some(byte);
    }

    /// Queue a byte for the next read
    pub fn queue_read(&mut self, byte: u8) {
        let _ = self.reads.push_back(byte);
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Command byte of every transaction, in order
    pub fn commands(&self) -> impl Iterator<Item = u8> + '_ {
        self.ops.windows(2).filter_map(|pair| match pair {
            [Op::Start, Op::Write(command)] => Some(*command),
            _ => None,
        })
    }

    /// Number of transactions with the given command byte
    pub fn count_command(&self, command: u8) -> usize {
        self.commands().filter(|&c| c == command).count()
    }

    fn record(&mut self, op: Op) {
        let _ = self.ops.push(op);
    }
}

impl ByteBus for MockBus {
    fn start(&mut self) {
        self.record(Op::Start);
    }

    fn stop(&mut self) {
        self.record(Op::Stop);
    }

    fn write_byte(&mut self, byte: u8) -> bool {
        self.record(Op::Write(byte));
        if self.nack_count > 0 {
            self.nack_count -= 1;
            return false;
        }
        self.nack_byte != Some(byte)
    }

    fn read_byte(&mut self) -> u8 {
        let byte = self.reads.pop_front().unwrap_or(NO_KEY);
        self.record(Op::Read(byte));
        byte
    }
}
