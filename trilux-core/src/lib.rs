//! Board-agnostic core logic for Trilux LED controllers
//!
//! This crate contains everything about the chip that does not depend
//! on a particular bus or board:
//!
//! - Register map and bitfield layout
//! - Channel model (red/green/blue outputs)
//! - Error kinds
//! - Bring-up state machine
//! - Configuration type definitions
//! - Front-end trait

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod channel;
pub mod config;
pub mod error;
pub mod registers;
pub mod state;
pub mod traits;

pub use channel::{Channel, ChannelState, InvalidChannel};
pub use error::{ChipError, ErrorKind};
pub use registers::{ConfigRegister, RegisterMap, TimerSetting, AW2013};
