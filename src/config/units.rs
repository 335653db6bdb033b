//! Unit-of-measurement preference.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Kilograms to pounds conversion factor.
pub const KG_TO_LBS: f64 = 2.204_622_621_8;

/// Preferred unit for mass readings.
///
/// The vendor always reports mass in kilograms; this preference only affects
/// how values are presented to the host platform.
///
/// # Example
///
/// ```rust
/// use renpho_api::WeightUnit;
///
/// let unit: WeightUnit = "lbs".parse().unwrap();
/// assert_eq!(unit, WeightUnit::Pounds);
/// assert_eq!(unit.to_string(), "lbs");
/// assert!((unit.convert_from_kg(1.0) - 2.2046226218).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WeightUnit {
    /// Kilograms (`kg`).
    #[default]
    Kilograms,
    /// Pounds (`lbs`).
    Pounds,
}

impl WeightUnit {
    /// Returns the unit symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Pounds => "lbs",
        }
    }

    /// Converts a kilogram reading into this unit.
    #[must_use]
    pub fn convert_from_kg(self, kilograms: f64) -> f64 {
        match self {
            Self::Kilograms => kilograms,
            Self::Pounds => kilograms * KG_TO_LBS,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WeightUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" | "kgs" | "kilograms" => Ok(Self::Kilograms),
            "lb" | "lbs" | "pounds" => Ok(Self::Pounds),
            _ => Err(ConfigError::InvalidWeightUnit {
                unit: s.to_string(),
            }),
        }
    }
}
