//! Configuration type definitions

use heapless::String;

use crate::channel::{Channel, CHANNEL_COUNT, MAX_BRIGHTNESS};
use crate::registers::RESET_DELAY_US;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Default 7-bit bus address
pub const DEFAULT_BUS_ADDRESS: u8 = 0x45;

/// Default supply rail name
pub const DEFAULT_SUPPLY: &str = "vi2c";

/// Default rail voltage (2.8 V)
pub const DEFAULT_RAIL_UV: u32 = 2_800_000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Minimum rail voltage above maximum
    InvalidVoltageRange,
    /// Reset delay below the chip's settle time
    ResetDelayTooShort,
    /// A channel has an empty label
    EmptyLabel(Channel),
    /// Supply rail name is empty
    EmptySupply,
    /// TOML could not be parsed into a config
    Syntax,
}

/// Per-channel settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelSettings {
    /// Name the channel is registered under
    pub label: String<MAX_LABEL_LEN>,
    /// Upper brightness bound advertised to the front-end
    #[cfg_attr(feature = "serde", serde(default = "default_max_brightness"))]
    pub max_brightness: u8,
}

#[cfg(feature = "serde")]
fn default_max_brightness() -> u8 {
    MAX_BRIGHTNESS
}

impl ChannelSettings {
    /// Default settings for a channel, labelled after its colour
    pub fn for_channel(channel: Channel) -> Self {
        let mut label = String::new();
        // Colour names are far shorter than MAX_LABEL_LEN
        let _ = label.push_str(channel.default_label());
        Self {
            label,
            max_brightness: MAX_BRIGHTNESS,
        }
    }
}

/// Chip configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChipConfig {
    /// 7-bit bus address
    pub bus_address: u8,
    /// Name of the supply rail to acquire
    pub supply: String<MAX_LABEL_LEN>,
    /// Minimum rail voltage in microvolts
    pub rail_min_uv: u32,
    /// Maximum rail voltage in microvolts
    pub rail_max_uv: u32,
    /// Wait between reset and chip ID read, in microseconds
    pub reset_delay_us: u32,
    /// Channel settings in index order
    pub channels: [ChannelSettings; CHANNEL_COUNT],
}

impl Default for ChipConfig {
    fn default() -> Self {
        let mut supply = String::new();
        let _ = supply.push_str(DEFAULT_SUPPLY);
        Self {
            bus_address: DEFAULT_BUS_ADDRESS,
            supply,
            rail_min_uv: DEFAULT_RAIL_UV,
            rail_max_uv: DEFAULT_RAIL_UV,
            reset_delay_us: RESET_DELAY_US,
            channels: Channel::ALL.map(ChannelSettings::for_channel),
        }
    }
}

impl ChipConfig {
    /// Settings for one channel
    pub fn channel(&self, channel: Channel) -> &ChannelSettings {
        &self.channels[channel.index()]
    }

    /// Check the config for values the chip cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rail_min_uv > self.rail_max_uv {
            return Err(ConfigError::InvalidVoltageRange);
        }
        if self.reset_delay_us < RESET_DELAY_US {
            return Err(ConfigError::ResetDelayTooShort);
        }
        if self.supply.is_empty() {
            return Err(ConfigError::EmptySupply);
        }
        for channel in Channel::ALL {
            if self.channel(channel).label.is_empty() {
                return Err(ConfigError::EmptyLabel(channel));
            }
        }
        Ok(())
    }
}
