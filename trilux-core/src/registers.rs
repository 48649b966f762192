//! AW2013 register map
//!
//! Register layout:
//! - RESET (0x00): write 0x55 to reset, then reads back the chip ID (0x33)
//! - GCR (0x01): global control, bit 0 enables the LED module
//! - LCTR (0x30): output enable bitmask, bit `i` = channel `i`
//! - LCFG[i] (0x31 + i): per-channel mode (current, blink, fade)
//! - PWM[i] (0x34 + i): per-channel brightness
//! - TIMER[i] (0x37 + i): per-channel fade/stay times, one nibble each
//!
//! All per-channel addresses are `base + index`.

use crate::channel::Channel;

/// Register addresses
pub mod reg {
    /// Reset / chip ID
    pub const RESET: u8 = 0x00;
    /// Global control
    pub const GLOBAL_CONTROL: u8 = 0x01;
    /// Output enable bitmask
    pub const LED_ENABLE: u8 = 0x30;
    /// First per-channel config register
    pub const CONFIG_BASE: u8 = 0x31;
    /// First per-channel brightness register
    pub const BRIGHTNESS_BASE: u8 = 0x34;
    /// First per-channel timer register
    pub const TIMER_BASE: u8 = 0x37;
}

/// Pattern written to RESET to reset the chip
pub const RESET_PATTERN: u8 = 0x55;

/// Value RESET reads back after a reset
pub const CHIP_ID: u8 = 0x33;

/// Minimum wait between reset and the chip ID read, in microseconds
pub const RESET_DELAY_US: u32 = 8;

/// GLOBAL_CONTROL bit enabling the LED module
pub const MODULE_ENABLE: u8 = 1 << 0;

/// Config register value for an active channel with no blink or fade
pub const CONFIG_ACTIVE: u8 = 3;

/// Config register bits
pub mod config_bits {
    /// Blink (breathing) mode
    pub const BLINK: u8 = 1 << 4;
    /// Fade in when switched on
    pub const FADE_ON: u8 = 1 << 5;
    /// Fade out when switched off
    pub const FADE_OFF: u8 = 1 << 6;
}

/// Register table for one chip type
///
/// Shared by reference between every handle of that chip type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterMap {
    /// Reset / chip ID register
    pub reset: u8,
    /// Global control register
    pub global_control: u8,
    /// Output enable bitmask register
    pub led_enable: u8,
    /// First per-channel config register
    pub config_base: u8,
    /// First per-channel brightness register
    pub brightness_base: u8,
    /// First per-channel timer register
    pub timer_base: u8,
    /// Pattern that resets the chip
    pub reset_pattern: u8,
    /// Expected chip ID
    pub chip_id: u8,
    /// Module enable bit in the global control register
    pub module_enable: u8,
}

/// The AW2013 register table
pub const AW2013: RegisterMap = RegisterMap {
    reset: reg::RESET,
    global_control: reg::GLOBAL_CONTROL,
    led_enable: reg::LED_ENABLE,
    config_base: reg::CONFIG_BASE,
    brightness_base: reg::BRIGHTNESS_BASE,
    timer_base: reg::TIMER_BASE,
    reset_pattern: RESET_PATTERN,
    chip_id: CHIP_ID,
    module_enable: MODULE_ENABLE,
};

impl RegisterMap {
    /// Config register of a channel
    pub const fn config(&self, channel: Channel) -> u8 {
        self.config_base + channel.index() as u8
    }

    /// Brightness register of a channel
    pub const fn brightness(&self, channel: Channel) -> u8 {
        self.brightness_base + channel.index() as u8
    }

    /// Timer register of a channel
    pub const fn timer(&self, channel: Channel) -> u8 {
        self.timer_base + channel.index() as u8
    }

    /// Bit of a channel in the enable bitmask
    pub const fn enable_bit(&self, channel: Channel) -> u8 {
        1 << channel.index()
    }
}

/// Decoded per-channel config register
///
/// Only the blink and fade bits are interpreted; every other bit is
/// carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigRegister(pub u8);

impl ConfigRegister {
    /// Config for an active channel with no blink or fade
    pub const ACTIVE: Self = Self(CONFIG_ACTIVE);

    /// Raw register value
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Blink bit
    pub fn blink(self) -> bool {
        self.0 & config_bits::BLINK != 0
    }

    /// Fade-on bit
    pub fn fade_on(self) -> bool {
        self.0 & config_bits::FADE_ON != 0
    }

    /// Fade-off bit
    pub fn fade_off(self) -> bool {
        self.0 & config_bits::FADE_OFF != 0
    }

    /// Copy with the blink bit set or cleared
    pub fn with_blink(self, enabled: bool) -> Self {
        self.with_bit(config_bits::BLINK, enabled)
    }

    /// Copy with the fade-on bit set or cleared
    pub fn with_fade_on(self, enabled: bool) -> Self {
        self.with_bit(config_bits::FADE_ON, enabled)
    }

    /// Copy with the fade-off bit set or cleared
    pub fn with_fade_off(self, enabled: bool) -> Self {
        self.with_bit(config_bits::FADE_OFF, enabled)
    }

    fn with_bit(self, mask: u8, set: bool) -> Self {
        if set {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }
}

/// Packed per-channel timer register
///
/// High nibble = fade time, low nibble = stay time. Both are raw
/// datasheet codes (0-15); the chip maps them to durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSetting {
    /// Fade time code (0-15)
    pub fade: u8,
    /// Stay time code (0-15)
    pub stay: u8,
}

impl TimerSetting {
    /// Largest code either field can hold
    pub const MAX_CODE: u8 = 0x0F;

    /// Create a timer setting, or `None` if either code exceeds 15
    pub const fn new(fade: u8, stay: u8) -> Option<Self> {
        if fade > Self::MAX_CODE || stay > Self::MAX_CODE {
            None
        } else {
            Some(Self { fade, stay })
        }
    }

    /// Pack into the register byte
    pub const fn to_register(self) -> u8 {
        ((self.fade & Self::MAX_CODE) << 4) | (self.stay & Self::MAX_CODE)
    }

    /// Unpack from the register byte
    pub const fn from_register(value: u8) -> Self {
        Self {
            fade: value >> 4,
            stay: value & Self::MAX_CODE,
        }
    }
}
