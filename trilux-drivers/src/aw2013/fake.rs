//! Test doubles for driver scenarios
//!
//! Each fake shares its state through an `Rc`, so a test can keep a
//! clone for inspection after handing one to the driver.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use trilux_core::channel::Channel;
use trilux_core::registers::{CHIP_ID, RESET_PATTERN};
use trilux_core::traits::{LedDescriptor, LedFrontend};
use trilux_hal::{RegisterBus, VoltageRail};

use super::REGS;

/// Injected bus failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

#[derive(Debug)]
struct Registers {
    file: [u8; 256],
    chip_id: u8,
    writes: Vec<(u8, u8)>,
    reads: usize,
    fail_writes_to: Option<u8>,
    fail_reads: bool,
}

/// In-memory AW2013 register file
///
/// Writing the reset pattern clears every register and loads the chip
/// ID into the reset register.
#[derive(Debug, Clone)]
pub struct FakeBus(Rc<RefCell<Registers>>);

impl FakeBus {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Registers {
            file: [0; 256],
            chip_id: CHIP_ID,
            writes: Vec::new(),
            reads: 0,
            fail_writes_to: None,
            fail_reads: false,
        })))
    }

    /// Change the ID the chip reports after reset
    pub fn set_chip_id(&self, id: u8) {
        self.0.borrow_mut().chip_id = id;
    }

    /// Make every write to `register` fail
    pub fn fail_writes_to(&self, register: u8) {
        self.0.borrow_mut().fail_writes_to = Some(register);
    }

    /// Make every read fail
    pub fn fail_reads(&self) {
        self.0.borrow_mut().fail_reads = true;
    }

    /// Current value of a register, without counting as a bus read
    pub fn peek(&self, register: u8) -> u8 {
        self.0.borrow().file[register as usize]
    }

    /// Set a register directly, without counting as a bus write
    pub fn poke(&self, register: u8, value: u8) {
        self.0.borrow_mut().file[register as usize] = value;
    }

    /// Successful writes so far, in order
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.0.borrow().writes.clone()
    }

    /// Number of reads so far
    pub fn reads(&self) -> usize {
        self.0.borrow().reads
    }

    /// Total bus transactions so far
    pub fn transactions(&self) -> usize {
        let regs = self.0.borrow();
        regs.writes.len() + regs.reads
    }

    /// Forget recorded traffic
    pub fn clear_log(&self) {
        let mut regs = self.0.borrow_mut();
        regs.writes.clear();
        regs.reads = 0;
    }
}

impl RegisterBus for FakeBus {
    type Error = BusFault;

    fn read_register(&mut self, register: u8) -> Result<u8, BusFault> {
        let mut regs = self.0.borrow_mut();
        if regs.fail_reads {
            return Err(BusFault);
        }
        regs.reads += 1;
        Ok(regs.file[register as usize])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusFault> {
        let mut regs = self.0.borrow_mut();
        if regs.fail_writes_to == Some(register) {
            return Err(BusFault);
        }
        regs.writes.push((register, value));

        if register == REGS.reset && value == RESET_PATTERN {
            regs.file = [0; 256];
            regs.file[register as usize] = regs.chip_id;
        } else {
            regs.file[register as usize] = value;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RailState {
    enabled: Cell<bool>,
    window: Cell<Option<(u32, u32)>>,
    fail_set_voltage: Cell<bool>,
    fail_enable: Cell<bool>,
    fail_disable: Cell<bool>,
    enables: Cell<usize>,
    disables: Cell<usize>,
}

/// Supply rail that records what was asked of it
#[derive(Debug, Clone, Default)]
pub struct FakeRail(Rc<RailState>);

impl FakeRail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_set_voltage(&self) {
        self.0.fail_set_voltage.set(true);
    }

    pub fn fail_enable(&self) {
        self.0.fail_enable.set(true);
    }

    pub fn fail_disable(&self, fail: bool) {
        self.0.fail_disable.set(fail);
    }

    /// Voltage window last requested
    pub fn window(&self) -> Option<(u32, u32)> {
        self.0.window.get()
    }

    pub fn enables(&self) -> usize {
        self.0.enables.get()
    }

    pub fn disables(&self) -> usize {
        self.0.disables.get()
    }
}

impl VoltageRail for FakeRail {
    type Error = ();

    fn set_voltage(&mut self, min_uv: u32, max_uv: u32) -> Result<(), ()> {
        if self.0.fail_set_voltage.get() {
            return Err(());
        }
        self.0.window.set(Some((min_uv, max_uv)));
        Ok(())
    }

    fn enable(&mut self) -> Result<(), ()> {
        if self.0.fail_enable.get() {
            return Err(());
        }
        self.0.enables.set(self.0.enables.get() + 1);
        self.0.enabled.set(true);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), ()> {
        if self.0.fail_disable.get() {
            return Err(());
        }
        self.0.disables.set(self.0.disables.get() + 1);
        self.0.enabled.set(false);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.0.enabled.get()
    }
}

/// Registration token handed out by [`FakeFrontend`]
#[derive(Debug, PartialEq, Eq)]
pub struct FakeHandle(pub Channel);

/// Front-end that tracks which LEDs are published
#[derive(Debug, Default)]
pub struct FakeFrontend {
    /// Currently registered LEDs, with the name they were published under
    pub live: Vec<(Channel, String)>,
    /// Attributes created, with their name and mode
    pub attributes: Vec<(Channel, String, u16)>,
    /// Every LED ever unregistered, in order
    pub unregistered: Vec<Channel>,
    /// Refuse to register this channel
    pub reject_led: Option<Channel>,
    /// Refuse attributes for this channel
    pub reject_attribute: Option<Channel>,
}

impl FakeFrontend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedFrontend for FakeFrontend {
    type Handle = FakeHandle;
    type Error = ();

    fn register_led(&mut self, led: &LedDescriptor<'_>) -> Result<FakeHandle, ()> {
        if self.reject_led == Some(led.channel) {
            return Err(());
        }
        self.live.push((led.channel, led.name.into()));
        Ok(FakeHandle(led.channel))
    }

    fn create_attribute(&mut self, handle: &FakeHandle, name: &str, mode: u16) -> Result<(), ()> {
        if self.reject_attribute == Some(handle.0) {
            return Err(());
        }
        self.attributes.push((handle.0, name.into(), mode));
        Ok(())
    }

    fn unregister_led(&mut self, handle: FakeHandle) {
        self.live.retain(|(c, _)| *c != handle.0);
        self.attributes.retain(|(c, _, _)| *c != handle.0);
        self.unregistered.push(handle.0);
    }
}

/// Delay that only adds up the time requested
#[derive(Debug, Default)]
pub struct RecordingDelay {
    total_ns: u64,
}

impl RecordingDelay {
    pub fn total_us(&self) -> u32 {
        (self.total_ns / 1_000) as u32
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
