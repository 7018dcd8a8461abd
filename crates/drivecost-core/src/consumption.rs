//! # Consumption & Range
//!
//! Physical quantities derived from a profile: energy used per month and
//! year, how often the tank or battery is refilled, and the distance one
//! full tank or battery covers.
//!
//! Every figure is optional. A metric whose inputs are missing (zero) is
//! `None` rather than a misleading zero.

use serde::Serialize;

use crate::types::VehicleProfile;
use crate::MONTHS_PER_YEAR;

/// Consumption and range figures of one profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ConsumptionMetrics {
    pub monthly_fuel_liters: Option<f64>,
    pub annual_fuel_liters: Option<f64>,
    pub tank_fills_per_month: Option<f64>,
    pub monthly_energy_kwh: Option<f64>,
    pub annual_energy_kwh: Option<f64>,
    pub charges_per_month: Option<f64>,
    /// Kilometers on one full tank.
    pub fuel_range_km: Option<f64>,
    /// Kilometers on one full battery.
    pub electric_range_km: Option<f64>,
}

impl ConsumptionMetrics {
    pub fn from_profile(profile: &VehicleProfile) -> Self {
        let monthly_fuel_liters = profile
            .uses_fuel()
            .then(|| profile.fuel_consumption * profile.monthly_kilometers / 100.0);
        let monthly_energy_kwh = profile
            .uses_electricity()
            .then(|| profile.electric_consumption * profile.monthly_kilometers / 100.0);

        ConsumptionMetrics {
            monthly_fuel_liters,
            annual_fuel_liters: monthly_fuel_liters.map(|liters| liters * MONTHS_PER_YEAR),
            tank_fills_per_month: monthly_fuel_liters
                .filter(|_| profile.tank_size > 0.0)
                .map(|liters| liters / profile.tank_size),
            monthly_energy_kwh,
            annual_energy_kwh: monthly_energy_kwh.map(|kwh| kwh * MONTHS_PER_YEAR),
            charges_per_month: monthly_energy_kwh
                .filter(|_| profile.battery_size > 0.0)
                .map(|kwh| kwh / profile.battery_size),
            fuel_range_km: range_km(profile.tank_size, profile.fuel_consumption),
            electric_range_km: range_km(profile.battery_size, profile.electric_consumption),
        }
    }

    /// Whether any figure could be derived at all.
    pub fn is_empty(&self) -> bool {
        *self == ConsumptionMetrics::default()
    }
}

fn range_km(capacity: f64, consumption_per_100km: f64) -> Option<f64> {
    (capacity > 0.0 && consumption_per_100km > 0.0)
        .then(|| capacity / consumption_per_100km * 100.0)
}
