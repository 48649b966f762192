//! GPIO-switched supply rail
//!
//! Many boards feed the LED controller from a fixed regulator behind a
//! load switch. The voltage cannot be programmed, only checked against
//! the requested window, and the switch is driven by one GPIO.

use embedded_hal::digital::OutputPin;

use crate::rail::VoltageRail;

/// Errors from a GPIO-switched rail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RailError<E> {
    /// The fixed output voltage lies outside the requested window
    VoltageOutOfRange,
    /// Driving the enable pin failed
    Pin(E),
}

/// Fixed-voltage rail behind a GPIO load switch
///
/// The switch can be active-high (default) or active-low.
pub struct GpioRail<P> {
    pin: P,
    /// Fixed output voltage in microvolts
    output_uv: u32,
    /// If true, rail ON = pin LOW
    inverted: bool,
    /// Current logical state (true = rail on)
    on: bool,
}

impl<P: OutputPin> GpioRail<P> {
    /// Create a rail with an active-high enable pin
    ///
    /// The pin is not touched until the rail is enabled or disabled.
    pub fn new(pin: P, output_uv: u32) -> Self {
        Self {
            pin,
            output_uv,
            inverted: false,
            on: false,
        }
    }

    /// Create a rail with an active-low enable pin
    pub fn new_active_low(pin: P, output_uv: u32) -> Self {
        Self {
            inverted: true,
            ..Self::new(pin, output_uv)
        }
    }

    /// Fixed output voltage in microvolts
    pub fn output_uv(&self) -> u32 {
        self.output_uv
    }

    /// Give back the enable pin
    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self, on: bool) -> Result<(), RailError<P::Error>> {
        // Normal: on=true, inverted=false → high
        // Inverted: on=true, inverted=true → low
        if on != self.inverted {
            self.pin.set_high().map_err(RailError::Pin)?;
        } else {
            self.pin.set_low().map_err(RailError::Pin)?;
        }
        self.on = on;
        Ok(())
    }
}

impl<P: OutputPin> VoltageRail for GpioRail<P> {
    type Error = RailError<P::Error>;

    fn set_voltage(&mut self, min_uv: u32, max_uv: u32) -> Result<(), Self::Error> {
        if (min_uv..=max_uv).contains(&self.output_uv) {
            Ok(())
        } else {
            Err(RailError::VoltageOutOfRange)
        }
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn is_enabled(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::MockError;
    use std::io::ErrorKind;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    const RAIL_UV: u32 = 2_800_000;

    #[test]
    fn test_active_high_rail() {
        let expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let mut rail = GpioRail::new(PinMock::new(&expectations), RAIL_UV);

        assert!(!rail.is_enabled());

        rail.enable().unwrap();
        assert!(rail.is_enabled());

        rail.disable().unwrap();
        assert!(!rail.is_enabled());

        rail.release().done();
    }

    #[test]
    fn test_active_low_rail() {
        let expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut rail = GpioRail::new_active_low(PinMock::new(&expectations), RAIL_UV);

        rail.enable().unwrap();
        assert!(rail.is_enabled());

        rail.disable().unwrap();
        assert!(!rail.is_enabled());

        rail.release().done();
    }

    #[test]
    fn test_voltage_window() {
        let expectations: [PinTransaction; 0] = [];
        let mut rail = GpioRail::new(PinMock::new(&expectations), RAIL_UV);

        assert_eq!(rail.set_voltage(RAIL_UV, RAIL_UV), Ok(()));
        assert_eq!(rail.set_voltage(2_700_000, 3_300_000), Ok(()));
        assert_eq!(
            rail.set_voltage(1_800_000, 1_800_000),
            Err(RailError::VoltageOutOfRange)
        );
        assert_eq!(rail.output_uv(), RAIL_UV);

        rail.release().done();
    }

    #[test]
    fn test_pin_failure_keeps_rail_off() {
        let expectations =
            [PinTransaction::set(PinState::High).with_error(MockError::Io(ErrorKind::Other))];
        let mut rail = GpioRail::new(PinMock::new(&expectations), RAIL_UV);

        assert_eq!(rail.enable(), Err(RailError::Pin(MockError::Io(ErrorKind::Other))));
        assert!(!rail.is_enabled());

        rail.release().done();
    }
}
