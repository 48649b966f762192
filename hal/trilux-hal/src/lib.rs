//! Trilux Hardware Abstraction Layer
//!
//! This crate defines the two hardware seams an LED controller driver
//! needs from its board: a byte-wide register bus and a switchable
//! voltage rail. Board crates implement these (or use the adapters
//! provided here) and hand them to the drivers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  LED front-end (attributes, triggers)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trilux-drivers (Aw2013)                │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  RegisterBus  │       │  VoltageRail  │
//! │ (this crate)  │       │ (this crate)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::RegisterBus`] - Single-byte register read/write
//! - [`rail::VoltageRail`], [`rail::RailSupply`] - Supply rail control

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod rail;

// Re-export key traits at crate root for convenience
pub use gpio::GpioRail;
pub use i2c::{I2cRegisterBus, RegisterBus};
pub use rail::{RailSupply, StaticSupply, SupplyError, VoltageRail};
