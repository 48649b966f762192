//! Hardware driver implementations
//!
//! This crate provides chip drivers built on the traits in trilux-hal
//! and the register model in trilux-core:
//!
//! - AW2013 three-channel LED controller

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod aw2013;

pub use aw2013::{Aw2013, Led};
