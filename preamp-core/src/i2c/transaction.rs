//! Per-transaction protocol state machine
//!
//! ```text
//! Idle ──► AddressMatched ──► RegisterAddressed ─┬─► ReadResponse ──┐
//!                                                ├─► WriteReceived ─┼─► Complete
//!                                                └──────────────────┘
//! ```
//!
//! The direct edge is a new write START after a register-only write. Its
//! address match is left pending so the next call serves it.
//!
//! Each step polls one hardware flag and performs one register access. The
//! machine runs to completion inside [`transact`]; it is not reentrant and
//! keeps nothing between transactions.

use preamp_hal::i2c::{Direction, SlaveStatus};
use preamp_hal::I2cSlave;

use super::wait::{poll_until, WaitPolicy};
use crate::registers::RegisterFile;

/// What the master did after sending the register address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusEvent {
    /// Repeated start with our address: the master wants to read
    AddressRematched,
    /// New start with our address in write direction: the previous
    /// transaction ended after the register byte
    WriteRestarted,
    /// Another byte arrived: the master is writing
    ByteReceived,
}

impl BusEvent {
    /// Classify a status snapshot, if it shows either event
    ///
    /// An address match takes priority and is split by the direction
    /// latched with it.
    pub fn classify(status: SlaveStatus) -> Option<Self> {
        if status.address_matched {
            match status.direction {
                Direction::Read => Some(BusEvent::AddressRematched),
                Direction::Write => Some(BusEvent::WriteRestarted),
            }
        } else if status.rx_not_empty {
            Some(BusEvent::ByteReceived)
        } else {
            None
        }
    }
}

/// A finished transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transaction {
    /// Master read `value` from register `reg`
    Read { reg: u8, value: u8 },
    /// Master wrote `data` to register `reg`
    Write { reg: u8, data: u8 },
    /// Master sent only the register byte before starting over
    Select { reg: u8 },
}

impl Transaction {
    /// Register address the transaction targeted
    pub fn reg(&self) -> u8 {
        match *self {
            Transaction::Read { reg, .. }
            | Transaction::Write { reg, .. }
            | Transaction::Select { reg } => reg,
        }
    }
}

/// Protocol state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Address match seen by the caller, not yet acknowledged
    Idle,
    /// Address acknowledged, waiting for the register byte
    AddressMatched,
    /// Register byte received, waiting to learn the direction
    RegisterAddressed { reg: u8 },
    /// Master re-addressed us for a read
    ReadResponse { reg: u8 },
    /// Master sent a data byte
    WriteReceived { reg: u8 },
    /// Transaction finished
    Complete(Transaction),
}

impl Phase {
    /// Check if the transaction has finished
    pub fn is_complete(&self) -> bool {
        matches!(self, Phase::Complete(_))
    }

    /// Advance one state
    ///
    /// Blocks on the bus flag the current state waits for, as long as
    /// `policy` allows. A completed phase steps to itself.
    pub fn step<S, R, P>(self, bus: &mut S, registers: &mut R, policy: &mut P) -> Result<Self, P::Error>
    where
        S: I2cSlave,
        R: RegisterFile,
        P: WaitPolicy,
    {
        let next = match self {
            Phase::Idle => {
                // Acknowledges the address and releases the clock stretch
                bus.clear_address_match();
                Phase::AddressMatched
            }
            Phase::AddressMatched => {
                poll_until(policy, || bus.status().rx_not_empty.then_some(()))?;
                // Reading the byte acknowledges it and releases the clock
                let reg = bus.read_data();
                Phase::RegisterAddressed { reg }
            }
            Phase::RegisterAddressed { reg } => {
                // One status read per poll so both flags come from the same
                // hardware state
                match poll_until(policy, || BusEvent::classify(bus.status()))? {
                    BusEvent::AddressRematched => Phase::ReadResponse { reg },
                    // Address match stays pending for the next transaction
                    BusEvent::WriteRestarted => Phase::Complete(Transaction::Select { reg }),
                    BusEvent::ByteReceived => Phase::WriteReceived { reg },
                }
            }
            Phase::ReadResponse { reg } => {
                bus.clear_address_match();
                poll_until(policy, || bus.status().tx_empty.then_some(()))?;
                let value = registers.read(reg);
                bus.write_data(value);
                // Single-byte reads: the master NACKs this byte and stops
                Phase::Complete(Transaction::Read { reg, value })
            }
            Phase::WriteReceived { reg } => {
                let data = bus.read_data();
                registers.write(reg, data);
                // Single-byte writes: the master sends STOP after this byte
                Phase::Complete(Transaction::Write { reg, data })
            }
            Phase::Complete(done) => Phase::Complete(done),
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("i2c: {:?} -> {:?}", self, next);

        Ok(next)
    }
}

/// Serve one register transaction
///
/// Call only after [`I2cSlave::address_matched`] reports a match. Returns
/// once the single data byte has moved in either direction. With
/// [`SpinForever`](super::wait::SpinForever) this never fails; it simply
/// does not return if the master abandons the transaction.
pub fn transact<S, R, P>(bus: &mut S, registers: &mut R, policy: &mut P) -> Result<Transaction, P::Error>
where
    S: I2cSlave,
    R: RegisterFile,
    P: WaitPolicy,
{
    let mut phase = Phase::Idle;
    loop {
        phase = phase.step(bus, registers, policy)?;
        if let Phase::Complete(done) = phase {
            #[cfg(feature = "defmt")]
            match done {
                Transaction::Read { reg, value } => {
                    defmt::debug!("i2c read 0x{=u8:02x} -> 0x{=u8:02x}", reg, value)
                }
                Transaction::Write { reg, data } => {
                    defmt::debug!("i2c write 0x{=u8:02x} <- 0x{=u8:02x}", reg, data)
                }
                Transaction::Select { reg } => {
                    defmt::debug!("i2c select 0x{=u8:02x}, restarted", reg)
                }
            }
            return Ok(done);
        }
    }
}

/// Direction the master will see for a completed transaction
impl From<Transaction> for Direction {
    fn from(done: Transaction) -> Self {
        match done {
            Transaction::Read { .. } => Direction::Read,
            Transaction::Write { .. } | Transaction::Select { .. } => Direction::Write,
        }
    }
}
