//! Scripted I2C slave peripheral for host tests
//!
//! Plays back what a master does on the bus, one step at a time. The next
//! step is only presented once the firmware has consumed the current one
//! (cleared the address flag or read the data register), which is how the
//! real peripheral behaves with clock stretching enabled.

use core::cell::Cell;

use heapless::{Deque, Vec};
use preamp_hal::i2c::{Direction, SlaveConfig, SlaveStatus};
use preamp_hal::I2cSlave;

/// One master action after the initial START + address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MasterStep {
    /// Master transmits a byte
    Write(u8),
    /// Repeated START with our address and the read bit
    RestartRead,
    /// New START with our address and the write bit
    RestartWrite,
}

pub(crate) struct SimSlave {
    pub config: Option<SlaveConfig>,
    pub enabled: bool,
    pub configured_while_enabled: bool,
    /// Bytes the firmware pushed to the transmit register
    pub sent: Vec<u8, 8>,
    /// Number of address-match acknowledges
    pub address_clears: usize,
    /// Bytes written while the transmit register was still full
    pub overruns: usize,
    script: Deque<MasterStep, 8>,
    flags: Cell<SlaveStatus>,
    rx: u8,
    /// Status polls that see nothing before a new step shows up
    latency: u32,
    countdown: Cell<u32>,
    /// Status polls that see a full transmit register after a read match
    tx_delay: u32,
    tx_busy: Cell<u32>,
}

impl SimSlave {
    /// Idle peripheral with nothing scripted
    pub fn new() -> Self {
        Self {
            config: None,
            enabled: false,
            configured_while_enabled: false,
            sent: Vec::new(),
            address_clears: 0,
            overruns: 0,
            script: Deque::new(),
            flags: Cell::new(SlaveStatus::IDLE),
            rx: 0,
            latency: 0,
            countdown: Cell::new(0),
            tx_delay: 0,
            tx_busy: Cell::new(0),
        }
    }

    /// Master has sent START + address + write; `steps` follow
    pub fn start(steps: &[MasterStep]) -> Self {
        let mut sim = Self::new();
        sim.enabled = true;
        for &step in steps {
            sim.script.push_back(step).expect("script too long");
        }
        sim.flags.set(SlaveStatus {
            address_matched: true,
            ..SlaveStatus::IDLE
        });
        sim
    }

    /// Delay every step by `polls` status reads
    pub fn with_latency(mut self, polls: u32) -> Self {
        self.latency = polls;
        self
    }

    /// Keep the transmit register full for `polls` status reads once the
    /// master re-addresses us for a read
    pub fn with_tx_delay(mut self, polls: u32) -> Self {
        self.tx_delay = polls;
        self
    }

    fn advance(&mut self) {
        let mut flags = self.flags.get();
        match self.script.pop_front() {
            Some(MasterStep::Write(byte)) => {
                self.rx = byte;
                flags.rx_not_empty = true;
                flags.direction = Direction::Write;
            }
            Some(MasterStep::RestartRead) => {
                flags.address_matched = true;
                flags.direction = Direction::Read;
            }
            Some(MasterStep::RestartWrite) => {
                flags.address_matched = true;
                flags.direction = Direction::Write;
            }
            None => {}
        }
        self.flags.set(flags);
        self.countdown.set(self.latency);
    }
}

impl I2cSlave for SimSlave {
    fn configure(&mut self, config: &SlaveConfig) {
        if self.enabled {
            self.configured_while_enabled = true;
        }
        self.config = Some(*config);
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn status(&self) -> SlaveStatus {
        let mut flags = self.flags.get();
        let busy = self.tx_busy.get();
        if busy > 0 {
            self.tx_busy.set(busy - 1);
            flags.tx_empty = false;
        }
        let countdown = self.countdown.get();
        if countdown > 0 {
            self.countdown.set(countdown - 1);
            flags.address_matched = false;
            flags.rx_not_empty = false;
        }
        flags
    }

    fn clear_address_match(&mut self) {
        let mut flags = self.flags.get();
        flags.address_matched = false;
        self.flags.set(flags);
        self.address_clears += 1;
        if flags.direction == Direction::Read {
            self.tx_busy.set(self.tx_delay);
        }
        if !flags.rx_not_empty {
            self.advance();
        }
    }

    fn read_data(&mut self) -> u8 {
        let mut flags = self.flags.get();
        flags.rx_not_empty = false;
        self.flags.set(flags);
        let byte = self.rx;
        self.advance();
        byte
    }

    fn write_data(&mut self, byte: u8) {
        if self.tx_busy.get() > 0 {
            self.overruns += 1;
        }
        self.sent.push(byte).expect("transmit log full");
    }
}
