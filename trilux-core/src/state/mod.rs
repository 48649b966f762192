//! Chip bring-up state machine
//!
//! Bring-up is strictly linear: rail, identity, module enable, channels.
//! The sequencer reports each step as an event; any failure ends in a
//! terminal error state. The driver handle keeps its state and consults
//! it during teardown.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
