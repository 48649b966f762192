//! Chip identity gate

use embedded_hal::delay::DelayNs;

use trilux_core::error::ChipError;
use trilux_core::registers::RESET_DELAY_US;
use trilux_hal::RegisterBus;

use super::REGS;

/// Reset the chip and confirm it reports the AW2013 ID
///
/// Writes the reset pattern, waits `settle_us` (never less than the
/// chip's 8 µs minimum) and reads the reset register back. A single
/// attempt is made; a wrong ID means the chip is unusable until the
/// rail is cycled.
pub fn verify_identity<B, D>(
    bus: &mut B,
    delay: &mut D,
    settle_us: u32,
) -> Result<(), ChipError<B::Error>>
where
    B: RegisterBus,
    D: DelayNs,
{
    bus.write_register(REGS.reset, REGS.reset_pattern)
        .map_err(ChipError::Transport)?;

    delay.delay_us(settle_us.max(RESET_DELAY_US));

    let id = bus.read_register(REGS.reset).map_err(ChipError::Transport)?;
    if id != REGS.chip_id {
        #[cfg(feature = "defmt")]
        defmt::error!("AW2013: chip id 0x{:02x}, expected 0x{:02x}", id, REGS.chip_id);
        return Err(ChipError::IdentityMismatch(id));
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("AW2013: chip id verified");

    Ok(())
}
