//! Configuration types
//!
//! Board-level settings for one chip: bus address, supply rail, reset
//! timing and per-channel labels. Loadable from TOML with the `toml`
//! feature.

#[cfg(feature = "toml")]
pub mod loader;
pub mod types;

pub use types::*;
