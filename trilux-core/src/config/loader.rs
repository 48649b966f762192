//! TOML configuration loading
//!
//! Keys mirror [`ChipConfig`] fields; anything missing takes its default.
//!
//! ```toml
//! bus_address = 0x45
//! supply = "vi2c"
//! rail_min_uv = 2800000
//! rail_max_uv = 2800000
//! reset_delay_us = 8
//!
//! [[channels]]
//! label = "status:red"
//!
//! [[channels]]
//! label = "status:green"
//!
//! [[channels]]
//! label = "status:blue"
//! max_brightness = 128
//! ```
//!
//! When present, `channels` must list exactly three tables.

use super::types::{ChipConfig, ConfigError};

impl ChipConfig {
    /// Parse and validate a TOML configuration
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: ChipConfig = toml::from_str(input).map_err(|_| ConfigError::Syntax)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;

    #[test]
    fn test_empty_document_is_default() {
        let config = ChipConfig::from_toml("").unwrap();
        assert_eq!(config, ChipConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = ChipConfig::from_toml("bus_address = 0x46\nreset_delay_us = 20\n").unwrap();

        assert_eq!(config.bus_address, 0x46);
        assert_eq!(config.reset_delay_us, 20);
        assert_eq!(config.supply.as_str(), "vi2c");
        assert_eq!(config.channel(Channel::Blue).label.as_str(), "blue");
    }

    #[test]
    fn test_channel_tables() {
        let input = r#"
supply = "led_vdd"

[[channels]]
label = "status:red"

[[channels]]
label = "status:green"

[[channels]]
label = "status:blue"
max_brightness = 128
"#;
        let config = ChipConfig::from_toml(input).unwrap();

        assert_eq!(config.supply.as_str(), "led_vdd");
        assert_eq!(config.channel(Channel::Red).label.as_str(), "status:red");
        assert_eq!(config.channel(Channel::Red).max_brightness, 255);
        assert_eq!(config.channel(Channel::Blue).max_brightness, 128);
    }

    #[test]
    fn test_wrong_channel_count() {
        let input = r#"
[[channels]]
label = "only"
"#;
        assert_eq!(ChipConfig::from_toml(input), Err(ConfigError::Syntax));
    }

    #[test]
    fn test_syntax_error() {
        assert_eq!(
            ChipConfig::from_toml("bus_address = "),
            Err(ConfigError::Syntax)
        );
        assert_eq!(
            ChipConfig::from_toml("bus_address = 300"),
            Err(ConfigError::Syntax)
        );
    }

    #[test]
    fn test_validation_runs_after_parse() {
        assert_eq!(
            ChipConfig::from_toml("reset_delay_us = 2"),
            Err(ConfigError::ResetDelayTooShort)
        );
        assert_eq!(
            ChipConfig::from_toml("rail_min_uv = 3300000\nrail_max_uv = 1800000"),
            Err(ConfigError::InvalidVoltageRange)
        );
    }
}
