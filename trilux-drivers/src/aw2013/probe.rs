//! Bring-up and teardown

use core::array;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::delay::DelayNs;

use trilux_core::channel::{Channel, ChannelState};
use trilux_core::config::ChipConfig;
use trilux_core::error::ChipError;
use trilux_core::state::{Event, State};
use trilux_core::traits::{LedDescriptor, LedFrontend};
use trilux_hal::{RailSupply, RegisterBus, VoltageRail};

use super::attr::{BLINK_ATTRIBUTE, BLINK_ATTRIBUTE_MODE};
use super::identity::verify_identity;
use super::{Aw2013, Inner, REGS};

/// Move `state` along and log the step
fn advance(state: &mut State, event: Event) {
    let next = state.transition(event);

    #[cfg(feature = "defmt")]
    defmt::debug!("AW2013: {:?} -> {:?}", *state, next);

    *state = next;
}

/// Record a bring-up failure and hand the error back
fn fail<E>(state: &mut State, err: ChipError<E>) -> ChipError<E> {
    #[cfg(feature = "defmt")]
    defmt::error!("AW2013: bring-up failed in {:?}: {:?}", *state, err.kind());

    advance(state, Event::ErrorDetected(err.kind()));
    err
}

/// Log a rollback step that failed
///
/// The bring-up error is what gets reported; this one is only logged.
fn note_rollback<E>(result: Result<(), ChipError<E>>) {
    #[cfg(feature = "defmt")]
    if let Err(err) = &result {
        defmt::warn!("AW2013: rollback incomplete: {:?}", err.kind());
    }

    #[cfg(not(feature = "defmt"))]
    let _ = result;
}

impl<M, B, R, H> Aw2013<M, B, R, H>
where
    M: RawMutex,
    B: RegisterBus,
    R: VoltageRail,
{
    /// Power up, verify and publish a chip
    ///
    /// On success every channel is registered with `frontend`, has its
    /// blink attribute and its output enable bit set, and the handle is
    /// in [`State::Ready`]. On failure the steps already taken are
    /// undone: channels are unregistered, the chip is switched off and
    /// the rail is disabled and released.
    ///
    /// The bus is used as given; a board that reads the address from
    /// [`ChipConfig::bus_address`] builds it with
    /// `I2cRegisterBus::with_address`.
    pub fn probe<S, F, D>(
        mut bus: B,
        supply: &mut S,
        frontend: &mut F,
        delay: &mut D,
        config: &ChipConfig,
    ) -> Result<Self, ChipError<B::Error>>
    where
        S: RailSupply<Rail = R>,
        F: LedFrontend<Handle = H>,
        D: DelayNs,
    {
        let mut state = State::default();

        let mut rail = supply
            .acquire(&config.supply)
            .map_err(|_| fail(&mut state, ChipError::RailUnavailable))?;

        if rail
            .set_voltage(config.rail_min_uv, config.rail_max_uv)
            .and_then(|()| rail.enable())
            .is_err()
        {
            return Err(fail(&mut state, ChipError::RailEnableFailed));
        }
        advance(&mut state, Event::RailEnabled);

        if let Err(err) = verify_identity(&mut bus, delay, config.reset_delay_us) {
            note_rollback::<B::Error>(rail.disable().map_err(|_| ChipError::RailDisableFailed));
            return Err(fail(&mut state, err));
        }
        advance(&mut state, Event::IdentityVerified);

        let mut chip = Self {
            inner: Mutex::new(RefCell::new(Inner {
                bus,
                channels: array::from_fn(|i| ChannelState::new(config.channel(Channel::ALL[i]))),
                suspended: false,
            })),
            rail,
            handles: array::from_fn(|_| None),
            state,
        };

        if let Err(err) = chip.locked(|inner| inner.write(REGS.global_control, REGS.module_enable)) {
            return Err(chip.roll_back(frontend, err));
        }
        advance(&mut chip.state, Event::ModuleEnabled);

        for channel in Channel::ALL {
            if let Err(err) = chip.publish(channel, frontend) {
                return Err(chip.roll_back(frontend, err));
            }
        }
        advance(&mut chip.state, Event::ChannelsRegistered);

        #[cfg(feature = "defmt")]
        defmt::info!("AW2013: ready");

        Ok(chip)
    }

    /// Undo a partial bring-up and hand back the error that caused it
    fn roll_back<F>(mut self, frontend: &mut F, err: ChipError<B::Error>) -> ChipError<B::Error>
    where
        F: LedFrontend<Handle = H>,
    {
        note_rollback(self.shut_down(frontend));
        fail(&mut self.state, err)
    }

    /// Register one channel, attach its blink attribute, enable its output
    fn publish<F>(&mut self, channel: Channel, frontend: &mut F) -> Result<(), ChipError<B::Error>>
    where
        F: LedFrontend<Handle = H>,
    {
        let state = self.channel_state(channel);
        let led = LedDescriptor {
            channel,
            name: &state.label,
            brightness: state.brightness,
            max_brightness: state.max_brightness,
        };

        let handle = frontend.register_led(&led).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::error!("AW2013: failed to register {}", channel);
            ChipError::ChannelRegistrationFailed(channel)
        })?;

        // Stored before the attribute so a failure below still unregisters it
        let handle = self.handles[channel.index()].insert(handle);

        frontend
            .create_attribute(handle, BLINK_ATTRIBUTE, BLINK_ATTRIBUTE_MODE)
            .map_err(|_| {
                #[cfg(feature = "defmt")]
                defmt::error!("AW2013: failed to create blink attribute for {}", channel);
                ChipError::ChannelRegistrationFailed(channel)
            })?;

        let bit = REGS.enable_bit(channel);
        self.locked(|inner| {
            inner.update(REGS.led_enable, |mask| mask | bit)?;
            inner.state(channel).enabled = true;
            Ok(())
        })
    }

    /// Undo bring-up, attempting every step
    ///
    /// Reports the first failure. The rail is only switched off while the
    /// state says it is on, so a repeated call does not disable it twice;
    /// if switching it off fails, the state stays put and a later call
    /// retries.
    fn shut_down<F>(&mut self, frontend: &mut F) -> Result<(), ChipError<B::Error>>
    where
        F: LedFrontend<Handle = H>,
    {
        for handle in self.handles.iter_mut().filter_map(Option::take) {
            frontend.unregister_led(handle);
        }

        let chip_off = self.locked(|inner| {
            let outputs = inner.write(REGS.led_enable, 0);
            for state in inner.channels.iter_mut() {
                state.enabled = false;
            }
            let module = inner.write(REGS.global_control, 0);
            outputs.and(module)
        });

        let rail_off = if self.state.rail_on() {
            self.rail
                .disable()
                .map_err(|_| ChipError::RailDisableFailed)
        } else {
            Ok(())
        };

        if rail_off.is_ok() {
            advance(&mut self.state, Event::TornDown);
        }

        chip_off.and(rail_off)
    }

    /// Withdraw the chip and power it down
    ///
    /// Unregisters every channel, switches all outputs and the LED module
    /// off and disables the rail. Every step is attempted even if an
    /// earlier one fails; the first failure is reported. On success the
    /// bus and the (disabled) rail are handed back.
    pub fn remove<F>(mut self, frontend: &mut F) -> Result<(B, R), ChipError<B::Error>>
    where
        F: LedFrontend<Handle = H>,
    {
        let result = self.shut_down(frontend);

        #[cfg(feature = "defmt")]
        match &result {
            Ok(()) => defmt::info!("AW2013: removed"),
            Err(err) => defmt::warn!("AW2013: teardown incomplete: {:?}", err.kind()),
        }

        result?;
        let inner = self.inner.into_inner().into_inner();
        Ok((inner.bus, self.rail))
    }
}
