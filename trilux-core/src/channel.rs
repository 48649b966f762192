//! Logical LED channels
//!
//! The chip has exactly three outputs. They are identified by a tagged
//! enum rather than a bare index so that a channel value is always in
//! range; raw indices from the outside are checked once at the boundary.

use heapless::String;

use crate::config::{ChannelSettings, MAX_LABEL_LEN};

/// Number of channels on the chip
pub const CHANNEL_COUNT: usize = 3;

/// Full-scale brightness
pub const MAX_BRIGHTNESS: u8 = 255;

/// One of the three LED outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Output 0
    Red = 0,
    /// Output 1
    Green = 1,
    /// Output 2
    Blue = 2,
}

/// Raw channel index outside 0..=2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidChannel(pub usize);

impl Channel {
    /// All channels in index order
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Channel index (0-2)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Conventional name of the output
    pub const fn default_label(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

impl TryFrom<usize> for Channel {
    type Error = InvalidChannel;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Channel::Red),
            1 => Ok(Channel::Green),
            2 => Ok(Channel::Blue),
            _ => Err(InvalidChannel(index)),
        }
    }
}

/// Driver-side record of one channel
///
/// `blink` and `enabled` mirror bits on the chip and are updated together
/// with the register writes that change them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelState {
    /// Name the channel is registered under
    pub label: String<MAX_LABEL_LEN>,
    /// Last brightness written
    pub brightness: u8,
    /// Upper brightness bound advertised to the front-end
    pub max_brightness: u8,
    /// Mirror of the blink bit in the config register
    pub blink: bool,
    /// Mirror of the channel bit in the enable bitmask
    pub enabled: bool,
}

impl ChannelState {
    /// Initial state from a channel's settings: off, not blinking, not
    /// enabled
    pub fn new(settings: &ChannelSettings) -> Self {
        Self {
            label: settings.label.clone(),
            brightness: 0,
            max_brightness: settings.max_brightness,
            blink: false,
            enabled: false,
        }
    }
}
