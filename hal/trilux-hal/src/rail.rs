//! Voltage rail abstractions
//!
//! The LED controller is powered from its own supply rail. A driver
//! acquires the rail by name from a [`RailSupply`], programs its voltage
//! window and switches it on before touching the bus. Dropping the rail
//! handle releases it.

/// A switchable supply rail
pub trait VoltageRail {
    /// Error type for rail operations
    type Error;

    /// Request an output voltage within `[min_uv, max_uv]` microvolts
    fn set_voltage(&mut self, min_uv: u32, max_uv: u32) -> Result<(), Self::Error>;

    /// Switch the rail on
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Switch the rail off
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Check if the rail is currently on
    fn is_enabled(&self) -> bool;
}

/// Errors from acquiring a rail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SupplyError {
    /// No rail with that name
    NotFound,
    /// The rail is already held by another consumer
    Busy,
}

/// Source of named supply rails
pub trait RailSupply {
    /// Rail handle type
    type Rail: VoltageRail;

    /// Take exclusive ownership of the rail called `name`
    fn acquire(&mut self, name: &str) -> Result<Self::Rail, SupplyError>;
}

/// Supply holding a single named rail
///
/// Suits boards where the LED controller has a dedicated regulator or
/// load switch. The rail can be handed out once.
pub struct StaticSupply<R> {
    name: &'static str,
    rail: Option<R>,
}

impl<R: VoltageRail> StaticSupply<R> {
    /// Create a supply offering `rail` under `name`
    pub fn new(name: &'static str, rail: R) -> Self {
        Self {
            name,
            rail: Some(rail),
        }
    }

    /// Create a supply that has no rail to offer
    pub fn empty(name: &'static str) -> Self {
        Self { name, rail: None }
    }

    /// Check if the rail is still available
    pub fn is_available(&self) -> bool {
        self.rail.is_some()
    }
}

impl<R: VoltageRail> RailSupply for StaticSupply<R> {
    type Rail = R;

    fn acquire(&mut self, name: &str) -> Result<R, SupplyError> {
        if name != self.name {
            return Err(SupplyError::NotFound);
        }
        self.rail.take().ok_or(SupplyError::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct DummyRail {
        on: bool,
    }

    impl VoltageRail for DummyRail {
        type Error = ();

        fn set_voltage(&mut self, _min_uv: u32, _max_uv: u32) -> Result<(), ()> {
            Ok(())
        }

        fn enable(&mut self) -> Result<(), ()> {
            self.on = true;
            Ok(())
        }

        fn disable(&mut self) -> Result<(), ()> {
            self.on = false;
            Ok(())
        }

        fn is_enabled(&self) -> bool {
            self.on
        }
    }

    #[test]
    fn test_acquire_by_name() {
        let mut supply = StaticSupply::new("vi2c", DummyRail::default());
        assert!(supply.is_available());

        assert_eq!(supply.acquire("vdd").err(), Some(SupplyError::NotFound));
        assert!(supply.is_available());

        let rail = supply.acquire("vi2c");
        assert!(rail.is_ok());
        assert!(!supply.is_available());
    }

    #[test]
    fn test_acquire_only_once() {
        let mut supply = StaticSupply::new("vi2c", DummyRail::default());
        let _rail = supply.acquire("vi2c").unwrap();

        assert_eq!(supply.acquire("vi2c").err(), Some(SupplyError::Busy));
    }

    #[test]
    fn test_empty_supply() {
        let mut supply: StaticSupply<DummyRail> = StaticSupply::empty("vi2c");
        assert!(!supply.is_available());
        assert_eq!(supply.acquire("vi2c").err(), Some(SupplyError::Busy));
    }
}
