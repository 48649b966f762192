//! LED front-end trait

use crate::channel::Channel;

/// What the front-end learns about a channel when it is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedDescriptor<'a> {
    /// Channel being registered
    pub channel: Channel,
    /// Name to publish the LED under
    pub name: &'a str,
    /// Initial brightness
    pub brightness: u8,
    /// Upper brightness bound
    pub max_brightness: u8,
}

/// Trait for the layer that publishes LED channels
///
/// The driver registers each channel, then asks for its text
/// attributes (currently only `blink`). Brightness and blink requests come back through the
/// driver's controller methods; the front-end only needs to route them
/// by channel.
pub trait LedFrontend {
    /// Token identifying a registered LED
    type Handle;
    /// Error type for registration
    type Error;

    /// Publish a channel as an LED
    fn register_led(&mut self, led: &LedDescriptor<'_>) -> Result<Self::Handle, Self::Error>;

    /// Attach a named text attribute with the given permission bits to a
    /// registered LED
    fn create_attribute(
        &mut self,
        handle: &Self::Handle,
        name: &str,
        mode: u16,
    ) -> Result<(), Self::Error>;

    /// Withdraw a registered LED and its attributes
    fn unregister_led(&mut self, handle: Self::Handle);
}
