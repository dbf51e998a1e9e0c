use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// What happens when removing an option would take the wheel below `min_options`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RemovalPolicy {
    /// Refuse the removal with `BelowMinimum`.
    #[default]
    Block,
    /// Allow it; spinning stays unavailable until enough options are back.
    DisableSpin,
}

/// What a "clear" leaves on the wheel.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ClearPolicy {
    Empty,
    #[default]
    Defaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Fraction of a segment kept clear on both edges when picking a landing angle.
    pub margin_fraction: f64,
    pub min_rotations: u32,
    pub max_rotations: u32,
    /// Where the pointer sits in the wheel's own (unrotated) frame, in degrees.
    pub pointer_angle: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            margin_fraction: 0.1,
            min_rotations: 5,
            max_rotations: 10,
            pointer_angle: 270.0,
        }
    }
}

impl SpinConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !(self.margin_fraction > 0.0 && self.margin_fraction < 0.5) {
            return Err(InvalidConfig::MarginFraction(self.margin_fraction));
        }
        if self.min_rotations > self.max_rotations {
            return Err(InvalidConfig::RotationRange {
                min: self.min_rotations,
                max: self.max_rotations,
            });
        }
        if !self.pointer_angle.is_finite() {
            return Err(InvalidConfig::PointerAngle(self.pointer_angle));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub min_options: usize,
    pub max_options: usize,
    pub max_option_length: usize,
    pub removal: RemovalPolicy,
    pub clear: ClearPolicy,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            min_options: 2,
            max_options: 100,
            max_option_length: 50,
            removal: RemovalPolicy::default(),
            clear: ClearPolicy::default(),
        }
    }
}

impl ListConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.min_options == 0 || self.min_options > self.max_options {
            return Err(InvalidConfig::OptionBounds {
                min: self.min_options,
                max: self.max_options,
            });
        }
        if self.max_option_length == 0 {
            return Err(InvalidConfig::ZeroLength);
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfig {
    #[error("margin_fraction must be strictly between 0 and 0.5, got {0}")]
    MarginFraction(f64),
    #[error("min_rotations ({min}) exceeds max_rotations ({max})")]
    RotationRange { min: u32, max: u32 },
    #[error("pointer_angle must be finite, got {0}")]
    PointerAngle(f64),
    #[error("option bounds must satisfy 1 <= min_options <= max_options, got {min}..={max}")]
    OptionBounds { min: usize, max: usize },
    #[error("max_option_length must be at least 1")]
    ZeroLength,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SpinConfig::default().validate().is_ok());
        assert!(ListConfig::default().validate().is_ok());
    }

    #[test]
    fn test_spin_config_rejections() {
        let cases = vec![
            (
                SpinConfig {
                    margin_fraction: 0.0,
                    ..SpinConfig::default()
                },
                InvalidConfig::MarginFraction(0.0),
            ),
            (
                SpinConfig {
                    margin_fraction: 0.5,
                    ..SpinConfig::default()
                },
                InvalidConfig::MarginFraction(0.5),
            ),
            (
                SpinConfig {
                    min_rotations: 8,
                    max_rotations: 3,
                    ..SpinConfig::default()
                },
                InvalidConfig::RotationRange { min: 8, max: 3 },
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_list_config_rejections() {
        let inverted = ListConfig {
            min_options: 5,
            max_options: 4,
            ..ListConfig::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(InvalidConfig::OptionBounds { min: 5, max: 4 })
        );

        let zero = ListConfig {
            max_option_length: 0,
            ..ListConfig::default()
        };
        assert_eq!(zero.validate(), Err(InvalidConfig::ZeroLength));
    }

    #[test]
    fn test_policy_deserialization() {
        let cases = vec![
            ("\"block\"", RemovalPolicy::Block),
            ("\"Block\"", RemovalPolicy::Block),
            ("\"disable-spin\"", RemovalPolicy::DisableSpin),
            ("\"DISABLE-SPIN\"", RemovalPolicy::DisableSpin),
        ];

        for (json, expected) in cases {
            let deserialized: RemovalPolicy = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }

        let clear: ClearPolicy = serde_json::from_str("\"Empty\"").unwrap();
        assert_eq!(clear, ClearPolicy::Empty);
        assert_eq!(serde_json::to_string(&ClearPolicy::Defaults).unwrap(), "\"defaults\"");
    }
}
