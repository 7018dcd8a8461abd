//! # Settings
//!
//! Default prices seeded into newly created profiles.
//!
//! Reading and writing the settings file is the application's job; this
//! module only defines the values and their defaults.

use serde::{Deserialize, Serialize};

/// Default fuel price per liter.
pub const DEFAULT_FUEL_PRICE: f64 = 1.65;

/// Default electricity price per kWh.
pub const DEFAULT_ELECTRICITY_PRICE: f64 = 0.35;

/// Price defaults applied by [`crate::VehicleProfile::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_fuel_price: f64,
    pub default_electricity_price: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_fuel_price: DEFAULT_FUEL_PRICE,
            default_electricity_price: DEFAULT_ELECTRICITY_PRICE,
        }
    }
}
