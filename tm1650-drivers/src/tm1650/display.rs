//! TM1650 display driver
//!
//! Owns the register layer and the framebuffer. Each [`poll`](Tm1650::poll)
//! runs one update cycle:
//!
//! 1. With a writer attached, clear the framebuffer and let it draw
//! 2. Push every dirty digit
//! 3. Push the control word if brightness, power or mode changed
//!
//! Bus failures never leave the driver. A failed transaction only
//! abandons its own register: the cycle carries on with the remaining
//! digits and the control word, and whatever was not pushed stays dirty
//! for the next poll.

use tm1650_core::config::{validate_intensity, ConfigError, DisplayConfig, SegmentMode};
use tm1650_core::state::{Event, State};
use tm1650_core::traits::{FrameWriter, NoWriter};
use tm1650_core::Framebuffer;

use super::registers::{ControlWord, Registers};
use crate::bus::{BusError, BusStats, ByteBus};

/// Outcome of one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollReport {
    /// Digit registers written successfully
    pub digits_written: u8,
    /// Control register written successfully
    pub control_written: bool,
    /// Transactions that failed this cycle
    pub failures: u8,
    /// First failure of the cycle
    pub failure: Option<BusError>,
}

impl PollReport {
    /// Check if the cycle pushed everything it had to
    pub fn is_complete(&self) -> bool {
        self.failures == 0
    }

    fn record_failure(&mut self, err: BusError) {
        self.failures += 1;
        self.failure.get_or_insert(err);
    }
}

/// Display driver for one TM1650
pub struct Tm1650<B, W = NoWriter> {
    regs: Registers<B>,
    framebuffer: Framebuffer,
    control: ControlWord,
    control_dirty: bool,
    reversed: bool,
    writer: W,
    state: State,
    stats: BusStats,
}

impl<B: ByteBus> Tm1650<B> {
    /// Create a driver with no per-poll writer
    ///
    /// Everything starts dirty, so the first poll pushes the whole display
    /// and the control word.
    pub fn new(bus: B, config: &DisplayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            regs: Registers::new(bus),
            framebuffer: Framebuffer::from_config(config)?,
            control: ControlWord {
                intensity: config.intensity,
                power: config.power,
                mode: config.mode,
            },
            control_dirty: true,
            reversed: config.reversed,
            writer: NoWriter,
            state: State::default(),
            stats: BusStats::default(),
        })
    }
}

impl<B: ByteBus, W: FrameWriter> Tm1650<B, W> {
    /// Attach a writer that draws each frame
    pub fn with_writer<W2: FrameWriter>(self, writer: W2) -> Tm1650<B, W2> {
        Tm1650 {
            regs: self.regs,
            framebuffer: self.framebuffer,
            control: self.control,
            control_dirty: self.control_dirty,
            reversed: self.reversed,
            writer,
            state: self.state,
            stats: self.stats,
        }
    }

    /// Framebuffer contents
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Framebuffer for direct writes between polls
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Current brightness
    pub fn intensity(&self) -> u8 {
        self.control.intensity
    }

    /// Set brightness (0-7, 0 blanks the display)
    pub fn set_intensity(&mut self, intensity: u8) -> Result<(), ConfigError> {
        validate_intensity(intensity)?;
        if self.control.intensity != intensity {
            self.control.intensity = intensity;
            self.control_dirty = true;
        }
        Ok(())
    }

    /// Check if the display is enabled
    pub fn is_powered(&self) -> bool {
        self.control.power
    }

    /// Enable or disable the display
    pub fn set_power(&mut self, power: bool) {
        if self.control.power != power {
            self.control.power = power;
            self.control_dirty = true;
        }
    }

    /// Segment drive mode
    pub fn mode(&self) -> SegmentMode {
        self.control.mode
    }

    /// Set the segment drive mode
    pub fn set_mode(&mut self, mode: SegmentMode) {
        if self.control.mode != mode {
            self.control.mode = mode;
            self.control_dirty = true;
        }
    }

    /// Control word as it will be pushed
    pub fn control_word(&self) -> ControlWord {
        self.control
    }

    /// Push every digit and the control word on the next poll
    ///
    /// Use after the chip may have lost its registers (power glitch,
    /// hot-plugged panel).
    pub fn force_refresh(&mut self) {
        self.framebuffer.invalidate();
        self.control_dirty = true;
    }

    /// Check if the next poll has anything to push
    pub fn needs_push(&self) -> bool {
        self.control_dirty || self.framebuffer.has_dirty()
    }

    /// Current driver state
    pub fn state(&self) -> State {
        self.state
    }

    /// Bus statistics
    pub fn stats(&self) -> BusStats {
        self.stats
    }

    /// Run one update cycle
    ///
    /// The cycle holds `&mut self` from trigger to completion, so a second
    /// trigger cannot start until this one has returned to idle.
    pub fn poll(&mut self) -> PollReport {
        self.state = self.state.transition(Event::PollTriggered);
        let report = self.update();
        self.state = self.state.transition(Event::PushComplete);
        report
    }

    /// Read the key register
    ///
    /// Shares the bus and statistics with the display.
    pub fn read_keys(&mut self) -> Result<u16, BusError> {
        let result = self.regs.read_keys();
        self.stats.record(&result);
        if let Err(_err) = result {
            #[cfg(feature = "defmt")]
            defmt::warn!("Key read failed: {}", _err);
        }
        result
    }

    /// Release the bus
    pub fn free(self) -> B {
        self.regs.free()
    }

    fn update(&mut self) -> PollReport {
        let mut report = PollReport::default();

        if self.writer.is_active() {
            self.framebuffer.clear();
            self.writer.render(&mut self.framebuffer);
        }

        let length = self.framebuffer.len();
        for pos in 0..length {
            if !self.framebuffer.is_dirty(pos) {
                continue;
            }
            let segments = self.framebuffer.digits()[pos];
            let register = if self.reversed { length - 1 - pos } else { pos };
            let result = self.regs.write_digit(register, segments);
            self.stats.record(&result);
            match result {
                Ok(()) => {
                    self.framebuffer.mark_pushed(pos);
                    report.digits_written += 1;
                }
                Err(err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Digit {} push failed: {}", pos, err);
                    report.record_failure(err);
                }
            }
        }

        if self.control_dirty {
            let result = self.regs.write_control(self.control);
            self.stats.record(&result);
            match result {
                Ok(()) => {
                    self.control_dirty = false;
                    report.control_written = true;
                }
                Err(err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Control push failed: {}", err);
                    report.record_failure(err);
                }
            }
        }

        report
    }
}
