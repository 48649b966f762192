//! Driver error types

use core::fmt;

use crate::channel::{Channel, InvalidChannel};

/// Errors reported by chip operations
///
/// `E` is the register bus error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipError<E> {
    /// Supply rail could not be acquired
    RailUnavailable,
    /// Supply rail rejected the voltage or failed to switch on
    RailEnableFailed,
    /// Supply rail failed to switch off
    RailDisableFailed,
    /// Chip ID read after reset did not match (value read attached)
    IdentityMismatch(u8),
    /// Register read or write failed on the bus
    Transport(E),
    /// Channel index outside 0..=2
    InvalidChannel(usize),
    /// Front-end refused to register a channel or its attributes
    ChannelRegistrationFailed(Channel),
    /// Malformed text on a control endpoint
    Parse,
}

/// Payload-free error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// See [`ChipError::RailUnavailable`]
    RailUnavailable,
    /// See [`ChipError::RailEnableFailed`]
    RailEnableFailed,
    /// See [`ChipError::RailDisableFailed`]
    RailDisableFailed,
    /// See [`ChipError::IdentityMismatch`]
    IdentityMismatch,
    /// See [`ChipError::Transport`]
    Transport,
    /// See [`ChipError::InvalidChannel`]
    InvalidChannel,
    /// See [`ChipError::ChannelRegistrationFailed`]
    ChannelRegistrationFailed,
    /// See [`ChipError::Parse`]
    Parse,
}

impl<E> ChipError<E> {
    /// Classify the error without its payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChipError::RailUnavailable => ErrorKind::RailUnavailable,
            ChipError::RailEnableFailed => ErrorKind::RailEnableFailed,
            ChipError::RailDisableFailed => ErrorKind::RailDisableFailed,
            ChipError::IdentityMismatch(_) => ErrorKind::IdentityMismatch,
            ChipError::Transport(_) => ErrorKind::Transport,
            ChipError::InvalidChannel(_) => ErrorKind::InvalidChannel,
            ChipError::ChannelRegistrationFailed(_) => ErrorKind::ChannelRegistrationFailed,
            ChipError::Parse => ErrorKind::Parse,
        }
    }
}

impl<E> From<InvalidChannel> for ChipError<E> {
    fn from(err: InvalidChannel) -> Self {
        ChipError::InvalidChannel(err.0)
    }
}

impl<E: fmt::Debug> fmt::Display for ChipError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChipError::RailUnavailable => f.write_str("supply rail unavailable"),
            ChipError::RailEnableFailed => f.write_str("failed to enable supply rail"),
            ChipError::RailDisableFailed => f.write_str("failed to disable supply rail"),
            ChipError::IdentityMismatch(id) => write!(f, "unexpected chip id 0x{:02x}", id),
            ChipError::Transport(e) => write!(f, "bus error: {:?}", e),
            ChipError::InvalidChannel(i) => write!(f, "channel {} out of range", i),
            ChipError::ChannelRegistrationFailed(c) => {
                write!(f, "failed to register {} led", c.default_label())
            }
            ChipError::Parse => f.write_str("invalid input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_drops_payload() {
        let err: ChipError<()> = ChipError::IdentityMismatch(0x00);
        assert_eq!(err.kind(), ErrorKind::IdentityMismatch);

        let err: ChipError<()> = ChipError::Transport(());
        assert_eq!(err.kind(), ErrorKind::Transport);

        let err: ChipError<()> = ChipError::ChannelRegistrationFailed(Channel::Blue);
        assert_eq!(err.kind(), ErrorKind::ChannelRegistrationFailed);
    }

    #[test]
    fn test_from_invalid_channel() {
        let err: ChipError<()> = InvalidChannel(7).into();
        assert_eq!(err, ChipError::InvalidChannel(7));
    }

    #[test]
    fn test_display() {
        let err: ChipError<()> = ChipError::IdentityMismatch(0x12);
        assert_eq!(err.to_string(), "unexpected chip id 0x12");

        let err: ChipError<()> = ChipError::InvalidChannel(5);
        assert_eq!(err.to_string(), "channel 5 out of range");
    }
}
