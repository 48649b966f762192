//! State machine definition
//!
//! A live driver handle sits in [`State::Ready`]; teardown, including the
//! rollback of a failed bring-up, moves it back to [`State::Unpowered`].

use super::events::Event;
use crate::error::ErrorKind;

/// Chip bring-up states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No rail held, chip not powered
    #[default]
    Unpowered,
    /// Rail on, chip identity not yet checked
    Powered,
    /// Chip ID verified
    Identified,
    /// LED module enabled, channels not yet registered
    Enabled,
    /// All channels live
    Ready,
    /// Bring-up failed
    Failed(ErrorKind),
}

impl State {
    /// Check if the rail has been switched on and not yet off
    pub fn rail_on(&self) -> bool {
        matches!(
            self,
            State::Powered | State::Identified | State::Enabled | State::Ready
        )
    }

    /// Process an event and return the next state
    ///
    /// Steps cannot be skipped. Teardown from any powered state returns
    /// to `Unpowered`.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Unpowered, RailEnabled) => Powered,
            (Powered, IdentityVerified) => Identified,
            (Identified, ModuleEnabled) => Enabled,
            (Enabled, ChannelsRegistered) => Ready,

            (Powered | Identified | Enabled | Ready, TornDown) => Unpowered,

            // Failure is terminal from any bring-up step
            (Unpowered | Powered | Identified | Enabled, ErrorDetected(kind)) => Failed(kind),

            // Default: stay in current state
            _ => self,
        }
    }
}
