//! AW2013 three-channel LED controller
//!
//! The AW2013 is an I2C RGB LED driver with per-channel PWM brightness
//! and a hardware blink (breathing) engine.
//!
//! # Bring-up
//!
//! A handle only exists after [`Aw2013::probe`] has:
//! 1. Acquired and enabled the supply rail
//! 2. Reset the chip and read back its ID (0x33)
//! 3. Enabled the LED module
//! 4. Registered each channel with the front-end and set its enable bit
//!
//! Any failure undoes the steps already taken. [`Aw2013::remove`] is the
//! symmetric teardown.
//!
//! # Locking
//!
//! The bus and the channel records share one blocking mutex. Every
//! controller operation, including the read-modify-write of a config
//! register, runs under a single lock, so front-end requests from
//! different contexts cannot interleave on the bus.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use trilux_core::channel::{Channel, ChannelState, CHANNEL_COUNT};
use trilux_core::error::ChipError;
use trilux_core::registers::{RegisterMap, AW2013};
use trilux_core::state::State;
use trilux_hal::RegisterBus;

mod attr;
mod control;
mod identity;
mod probe;

#[cfg(test)]
mod fake;

pub use attr::{parse_unsigned, BLINK_ATTRIBUTE, BLINK_ATTRIBUTE_MODE};
pub use control::Led;
pub use identity::verify_identity;

/// Register table used by this driver
const REGS: &RegisterMap = &AW2013;

/// A live AW2013
///
/// Generic over the mutex flavour `M`, the register bus `B`, the supply
/// rail `R` and the front-end handle type `H`.
pub struct Aw2013<M: RawMutex, B, R, H> {
    inner: Mutex<M, RefCell<Inner<B>>>,
    rail: R,
    /// Front-end registrations, by channel index
    handles: [Option<H>; CHANNEL_COUNT],
    /// Bring-up progress; `Ready` for as long as the handle is live
    state: State,
}

/// State guarded by the handle's mutex
struct Inner<B> {
    bus: B,
    channels: [ChannelState; CHANNEL_COUNT],
    /// Brightness writes are cached but not sent while suspended
    suspended: bool,
}

impl<B: RegisterBus> Inner<B> {
    fn read(&mut self, register: u8) -> Result<u8, ChipError<B::Error>> {
        self.bus
            .read_register(register)
            .map_err(ChipError::Transport)
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), ChipError<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("AW2013 0x{:02x} <- 0x{:02x}", register, value);
        self.bus
            .write_register(register, value)
            .map_err(ChipError::Transport)
    }

    /// Read a register, apply `f`, write the result back
    fn update(
        &mut self,
        register: u8,
        f: impl FnOnce(u8) -> u8,
    ) -> Result<u8, ChipError<B::Error>> {
        let value = f(self.read(register)?);
        self.write(register, value)?;
        Ok(value)
    }

    fn state(&mut self, channel: Channel) -> &mut ChannelState {
        &mut self.channels[channel.index()]
    }
}

impl<M: RawMutex, B: RegisterBus, R, H> Aw2013<M, B, R, H> {
    /// Run `f` with exclusive access to the bus and channel records
    fn locked<T>(&self, f: impl FnOnce(&mut Inner<B>) -> T) -> T {
        self.inner.lock(|inner| f(&mut inner.borrow_mut()))
    }

    /// Snapshot of a channel's driver-side record
    pub fn channel_state(&self, channel: Channel) -> ChannelState {
        self.locked(|inner| inner.state(channel).clone())
    }

    /// Check if a channel is registered with the front-end
    pub fn is_registered(&self, channel: Channel) -> bool {
        self.handles[channel.index()].is_some()
    }

    /// Bring-up state of the chip
    pub fn state(&self) -> State {
        self.state
    }

    /// The supply rail powering the chip
    pub fn rail(&self) -> &R {
        &self.rail
    }
}

/// Map a raw channel index, logging out-of-range requests
fn channel_at<E>(index: usize) -> Result<Channel, ChipError<E>> {
    Channel::try_from(index).map_err(|err| {
        #[cfg(feature = "defmt")]
        defmt::error!("AW2013: channel {} is out of range", index);
        err.into()
    })
}
