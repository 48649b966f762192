//! Events that trigger state transitions

use crate::error::ErrorKind;

/// Bring-up progress reported by the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Power events
    /// Rail acquired, voltage set and switched on
    RailEnabled,

    // Chip events
    /// Reset read back the expected chip ID
    IdentityVerified,
    /// Module enable bit written to global control
    ModuleEnabled,
    /// All three channels registered and enabled
    ChannelsRegistered,

    // Lifecycle events
    /// Channels unregistered, chip switched off and rail disabled
    TornDown,

    // Failure events
    /// A bring-up step failed
    ErrorDetected(ErrorKind),
}
