//! Front-end abstraction traits
//!
//! These traits define the interface between the chip driver and
//! whatever surfaces its channels (LED class device, shell, RPC).

pub mod frontend;

pub use frontend::{LedDescriptor, LedFrontend};
