//! Channel controller
//!
//! Brightness, blink, fade and timer operations. Each operation holds
//! the handle's lock for its whole register sequence.
//!
//! Operations come in two forms: raw-index methods on [`Aw2013`], which
//! reject indices outside 0..=2 before touching the bus, and typed
//! methods on the [`Led`] view returned by [`Aw2013::led`].

use embassy_sync::blocking_mutex::raw::RawMutex;

use trilux_core::channel::Channel;
use trilux_core::error::ChipError;
use trilux_core::registers::{ConfigRegister, TimerSetting};
use trilux_hal::RegisterBus;

use super::{channel_at, Aw2013, Inner, REGS};

impl<B: RegisterBus> Inner<B> {
    /// Activate the channel and write its brightness register
    fn apply_brightness(&mut self, channel: Channel, value: u8) -> Result<(), ChipError<B::Error>> {
        self.write(REGS.config(channel), ConfigRegister::ACTIVE.bits())?;
        self.write(REGS.brightness(channel), value)?;
        // Writing ACTIVE clears the blink bit
        self.state(channel).blink = false;
        Ok(())
    }

    fn update_config(
        &mut self,
        channel: Channel,
        f: impl FnOnce(ConfigRegister) -> ConfigRegister,
    ) -> Result<ConfigRegister, ChipError<B::Error>> {
        self.update(REGS.config(channel), |raw| f(ConfigRegister(raw)).bits())
            .map(ConfigRegister)
    }

    fn read_config(&mut self, channel: Channel) -> Result<ConfigRegister, ChipError<B::Error>> {
        self.read(REGS.config(channel)).map(ConfigRegister)
    }
}

/// One channel of a live chip
pub struct Led<'a, M: RawMutex, B, R, H> {
    chip: &'a Aw2013<M, B, R, H>,
    channel: Channel,
}

impl<M: RawMutex, B: RegisterBus, R, H> Led<'_, M, B, R, H> {
    /// The channel this view controls
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Set the channel's brightness
    ///
    /// Writes the "active" config value, then the brightness. While the
    /// chip is suspended only the cached value changes.
    ///
    /// The full 0-255 range is written as given. The configured
    /// `max_brightness` is only advertised at registration; clamping to it
    /// is the front-end's job, as in the Linux LED core.
    pub fn set_brightness(&self, value: u8) -> Result<(), ChipError<B::Error>> {
        let channel = self.channel;
        self.chip.locked(|inner| {
            if !inner.suspended {
                inner.apply_brightness(channel, value)?;
            }
            inner.state(channel).brightness = value;

            #[cfg(feature = "defmt")]
            defmt::info!("AW2013: {} brightness {}", channel, value);

            Ok(())
        })
    }

    /// Last brightness set on this channel
    pub fn brightness(&self) -> u8 {
        self.chip.locked(|inner| inner.state(self.channel).brightness)
    }

    /// Switch hardware blinking on or off
    ///
    /// Only the blink bit of the config register changes.
    pub fn set_blink(&self, enabled: bool) -> Result<(), ChipError<B::Error>> {
        let channel = self.channel;
        self.chip.locked(|inner| {
            inner.update_config(channel, |config| config.with_blink(enabled))?;
            inner.state(channel).blink = enabled;

            #[cfg(feature = "defmt")]
            defmt::info!("AW2013: {} blink {}", channel, enabled);

            Ok(())
        })
    }

    /// Read the blink bit from the chip
    pub fn blink(&self) -> Result<bool, ChipError<B::Error>> {
        self.chip
            .locked(|inner| inner.read_config(self.channel))
            .map(ConfigRegister::blink)
    }

    /// Check if the channel's output enable bit has been set
    pub fn is_enabled(&self) -> bool {
        self.chip.locked(|inner| inner.state(self.channel).enabled)
    }

    /// Set the fade-on and fade-off bits, leaving the rest of the config
    pub fn set_fade(&self, fade_on: bool, fade_off: bool) -> Result<(), ChipError<B::Error>> {
        let channel = self.channel;
        self.chip.locked(|inner| {
            inner
                .update_config(channel, |config| {
                    config.with_fade_on(fade_on).with_fade_off(fade_off)
                })
                .map(|_| ())
        })
    }

    /// Read the fade-on and fade-off bits
    pub fn fade(&self) -> Result<(bool, bool), ChipError<B::Error>> {
        self.chip
            .locked(|inner| inner.read_config(self.channel))
            .map(|config| (config.fade_on(), config.fade_off()))
    }

    /// Program the fade and stay time codes
    pub fn set_timer(&self, timer: TimerSetting) -> Result<(), ChipError<B::Error>> {
        let register = REGS.timer(self.channel);
        self.chip
            .locked(|inner| inner.write(register, timer.to_register()))
    }

    /// Read back the fade and stay time codes
    pub fn timer(&self) -> Result<TimerSetting, ChipError<B::Error>> {
        let register = REGS.timer(self.channel);
        self.chip
            .locked(|inner| inner.read(register))
            .map(TimerSetting::from_register)
    }
}

impl<M: RawMutex, B: RegisterBus, R, H> Aw2013<M, B, R, H> {
    /// Typed access to one channel
    pub fn led(&self, channel: Channel) -> Led<'_, M, B, R, H> {
        Led {
            chip: self,
            channel,
        }
    }

    fn led_at(&self, index: usize) -> Result<Led<'_, M, B, R, H>, ChipError<B::Error>> {
        channel_at(index).map(|channel| self.led(channel))
    }

    /// Set the brightness of channel `index`
    ///
    /// See [`Led::set_brightness`].
    pub fn set_brightness(&self, index: usize, value: u8) -> Result<(), ChipError<B::Error>> {
        self.led_at(index)?.set_brightness(value)
    }

    /// Last brightness set on channel `index`
    pub fn brightness(&self, index: usize) -> Result<u8, ChipError<B::Error>> {
        Ok(self.led_at(index)?.brightness())
    }

    /// Switch blinking on channel `index`
    pub fn set_blink(&self, index: usize, enabled: bool) -> Result<(), ChipError<B::Error>> {
        self.led_at(index)?.set_blink(enabled)
    }

    /// Read the blink bit of channel `index`
    ///
    /// `unwrap_or_default()` on the result gives `false` for a rejected
    /// index.
    pub fn get_blink(&self, index: usize) -> Result<bool, ChipError<B::Error>> {
        self.led_at(index)?.blink()
    }

    /// Check if channel `index` has its output enable bit set
    pub fn is_enabled(&self, index: usize) -> Result<bool, ChipError<B::Error>> {
        Ok(self.led_at(index)?.is_enabled())
    }

    /// Set the fade bits of channel `index`
    pub fn set_fade(
        &self,
        index: usize,
        fade_on: bool,
        fade_off: bool,
    ) -> Result<(), ChipError<B::Error>> {
        self.led_at(index)?.set_fade(fade_on, fade_off)
    }

    /// Read the fade bits of channel `index`
    pub fn fade(&self, index: usize) -> Result<(bool, bool), ChipError<B::Error>> {
        self.led_at(index)?.fade()
    }

    /// Program the timer of channel `index`
    pub fn set_timer(&self, index: usize, timer: TimerSetting) -> Result<(), ChipError<B::Error>> {
        self.led_at(index)?.set_timer(timer)
    }

    /// Read the timer of channel `index`
    pub fn timer(&self, index: usize) -> Result<TimerSetting, ChipError<B::Error>> {
        self.led_at(index)?.timer()
    }

    /// Turn every output off for a low-power period
    ///
    /// Cached brightness is kept; later brightness changes are only
    /// cached until [`resume`](Self::resume).
    pub fn suspend(&self) -> Result<(), ChipError<B::Error>> {
        self.locked(|inner| {
            if inner.suspended {
                return Ok(());
            }
            for channel in Channel::ALL {
                inner.apply_brightness(channel, 0)?;
            }
            inner.suspended = true;

            #[cfg(feature = "defmt")]
            defmt::info!("AW2013: suspended");

            Ok(())
        })
    }

    /// Restore every output to its cached brightness
    pub fn resume(&self) -> Result<(), ChipError<B::Error>> {
        self.locked(|inner| {
            if !inner.suspended {
                return Ok(());
            }
            for channel in Channel::ALL {
                let value = inner.state(channel).brightness;
                inner.apply_brightness(channel, value)?;
            }
            inner.suspended = false;

            #[cfg(feature = "defmt")]
            defmt::info!("AW2013: resumed");

            Ok(())
        })
    }

    /// Check if the chip is suspended
    pub fn is_suspended(&self) -> bool {
        self.locked(|inner| inner.suspended)
    }
}
