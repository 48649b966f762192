//! Register bus abstractions
//!
//! Small LED controllers expose a flat map of byte-wide registers. The
//! driver only ever needs to read or write one of them at a time, so the
//! transport is reduced to exactly that.

use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Default 7-bit address of an AW2013 with the AD pin tied low
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x45;

/// Byte-oriented register transport
///
/// Errors are returned as-is; implementations must not retry on their
/// own unless the underlying bus does.
pub trait RegisterBus {
    /// Error type for bus operations
    type Error;

    /// Read a single register
    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Write a single register
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        T::read_register(self, register)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        T::write_register(self, register, value)
    }
}

/// [`RegisterBus`] over an `embedded-hal` I2C master
///
/// Reads are a register-address write followed by a repeated-start read
/// of one byte; writes are a single `[register, value]` transfer.
pub struct I2cRegisterBus<I2C> {
    i2c: I2C,
    address: SevenBitAddress,
}

impl<I2C: I2c> I2cRegisterBus<I2C> {
    /// Create a bus for a device at the default address (0x45)
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a bus for a device at a custom 7-bit address
    pub fn with_address(i2c: I2C, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Device address in use
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Give back the underlying I2C master
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterBus for I2cRegisterBus<I2C> {
    type Error = I2C::Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }
}
