//! Text attribute endpoints
//!
//! The front-end exposes each channel's blink flag as a small text
//! attribute and forwards brightness as an 8-bit value. These helpers
//! turn attribute reads and writes into controller calls.

use embassy_sync::blocking_mutex::raw::RawMutex;

use trilux_core::channel::Channel;
use trilux_core::error::ChipError;
use trilux_hal::RegisterBus;

use super::Aw2013;

/// Name of the per-channel blink attribute
pub const BLINK_ATTRIBUTE: &str = "blink";

/// Permissions of the blink attribute (owner/group write, world read)
pub const BLINK_ATTRIBUTE_MODE: u16 = 0o664;

/// Parse an unsigned decimal attribute value
///
/// Accepts an optional leading `+` and a single trailing newline.
/// Returns `None` for anything else, including values that overflow.
pub fn parse_unsigned(text: &str) -> Option<u64> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let digits = text.strip_prefix('+').unwrap_or(text);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.bytes().try_fold(0u64, |acc, b| {
        acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
    })
}

impl<M: RawMutex, B: RegisterBus, R, H> Aw2013<M, B, R, H> {
    /// Render the blink attribute of `channel`
    ///
    /// Yields `"0"` or `"1"`.
    pub fn show_blink(&self, channel: Channel) -> Result<&'static str, ChipError<B::Error>> {
        let on = self.led(channel).blink()?;
        Ok(if on { "1" } else { "0" })
    }

    /// Handle a write to the blink attribute of `channel`
    ///
    /// Any non-zero value enables blinking. Malformed text is rejected
    /// before the bus is touched. Returns the number of bytes consumed.
    pub fn store_blink(&self, channel: Channel, text: &str) -> Result<usize, ChipError<B::Error>> {
        let value = parse_unsigned(text).ok_or_else(|| {
            #[cfg(feature = "defmt")]
            defmt::warn!("AW2013: rejected blink value for {}", channel);
            ChipError::Parse
        })?;

        self.led(channel).set_blink(value != 0)?;
        Ok(text.len())
    }

    /// Handle a brightness request from the front-end
    pub fn store_brightness(&self, channel: Channel, value: u8) -> Result<(), ChipError<B::Error>> {
        self.led(channel).set_brightness(value)
    }
}
