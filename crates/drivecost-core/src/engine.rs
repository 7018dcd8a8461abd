//! # Cost Engine
//!
//! Turns one [`VehicleProfile`] into a [`CostBreakdown`].
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cost Breakdown                                   │
//! │                                                                         │
//! │  consumption × km / 100 × price ──► monthly fuel / electricity          │
//! │                                          │                              │
//! │  tax / 12 + insurance / 12 + financing ──┤                              │
//! │                                          ▼                              │
//! │                                  monthly running ── × 12 ──► annual     │
//! │                                                                │        │
//! │  purchase price × (1 − residual) ──► total depreciation        │        │
//! │                          │                                     │        │
//! │                          └── / years ──► annual depreciation ──┤        │
//! │                                                                ▼        │
//! │                    (annual running + annual depreciation) / annual km   │
//! │                                                                         │
//! │  TCO = annual running × years + total depreciation                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guards
//! Every division and every consumption term has an explicit guard. A zero
//! distance, zero consumption or zero ownership period yields `0.0`, never
//! `NaN` or infinity. Negative inputs are computed as given: the engine does
//! not validate. Validation is the caller's job (see [`crate::validation`]).

use serde::Serialize;

use crate::types::VehicleProfile;
use crate::{
    LONG_OWNERSHIP_RESIDUAL_RATIO, LONG_OWNERSHIP_THRESHOLD_YEARS, MONTHS_PER_YEAR,
    SHORT_OWNERSHIP_RESIDUAL_RATIO,
};

// =============================================================================
// Cost Breakdown
// =============================================================================

/// Derived costs of one profile.
///
/// Built once by [`CostBreakdown::from_profile`] and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown<'a> {
    pub profile: &'a VehicleProfile,
    pub monthly_fuel_cost: f64,
    pub annual_fuel_cost: f64,
    pub monthly_electricity_cost: f64,
    pub annual_electricity_cost: f64,
    pub monthly_running_cost: f64,
    pub annual_running_cost: f64,
    pub total_depreciation: f64,
    pub annual_depreciation: f64,
    pub cost_per_kilometer: f64,
    pub total_cost_of_ownership: f64,
}

impl<'a> CostBreakdown<'a> {
    /// Computes every cost figure for `profile`.
    ///
    /// ## Example
    /// ```rust
    /// use drivecost_core::{CostBreakdown, VehicleProfile};
    ///
    /// let profile = VehicleProfile {
    ///     fuel_consumption: 6.5,
    ///     fuel_price: 1.65,
    ///     monthly_kilometers: 1500.0,
    ///     expected_years_of_ownership: 5,
    ///     ..VehicleProfile::default()
    /// };
    /// let costs = CostBreakdown::from_profile(&profile);
    /// assert!((costs.monthly_fuel_cost - 160.875).abs() < 1e-9);
    /// ```
    pub fn from_profile(profile: &'a VehicleProfile) -> Self {
        let monthly_fuel_cost = monthly_energy_cost(
            profile.fuel_consumption,
            profile.monthly_kilometers,
            profile.fuel_price,
        );
        let monthly_electricity_cost = monthly_energy_cost(
            profile.electric_consumption,
            profile.monthly_kilometers,
            profile.electricity_price,
        );

        let monthly_running_cost = monthly_fuel_cost
            + monthly_electricity_cost
            + profile.annual_car_tax / MONTHS_PER_YEAR
            + profile.annual_car_insurance / MONTHS_PER_YEAR
            + profile.financing_rate;
        let annual_running_cost = monthly_running_cost * MONTHS_PER_YEAR;

        let years = profile.expected_years_of_ownership;
        let total_depreciation = total_depreciation(profile.purchase_price, years);
        let annual_depreciation = annual_depreciation(total_depreciation, years);

        let cost_per_kilometer = cost_per_kilometer(
            annual_running_cost,
            annual_depreciation,
            profile.annual_kilometers(),
        );

        let total_cost_of_ownership =
            annual_running_cost * f64::from(years) + total_depreciation;

        CostBreakdown {
            profile,
            monthly_fuel_cost,
            annual_fuel_cost: monthly_fuel_cost * MONTHS_PER_YEAR,
            monthly_electricity_cost,
            annual_electricity_cost: monthly_electricity_cost * MONTHS_PER_YEAR,
            monthly_running_cost,
            annual_running_cost,
            total_depreciation,
            annual_depreciation,
            cost_per_kilometer,
            total_cost_of_ownership,
        }
    }

    /// Monthly share of the annual car tax.
    pub fn monthly_tax(&self) -> f64 {
        self.profile.annual_car_tax / MONTHS_PER_YEAR
    }

    pub fn annual_tax(&self) -> f64 {
        self.profile.annual_car_tax
    }

    /// Monthly share of the annual insurance premium.
    pub fn monthly_insurance(&self) -> f64 {
        self.profile.annual_car_insurance / MONTHS_PER_YEAR
    }

    pub fn annual_insurance(&self) -> f64 {
        self.profile.annual_car_insurance
    }

    pub fn monthly_financing(&self) -> f64 {
        self.profile.financing_rate
    }

    pub fn annual_financing(&self) -> f64 {
        self.profile.financing_rate * MONTHS_PER_YEAR
    }
}

/// Computes the cost breakdown of an optional profile.
///
/// Returns `None` only when the profile itself is absent.
pub fn compute_breakdown(profile: Option<&VehicleProfile>) -> Option<CostBreakdown<'_>> {
    profile.map(CostBreakdown::from_profile)
}

// =============================================================================
// Formula Helpers
// =============================================================================

/// Energy cost of one month of driving.
///
/// Zero when consumption or distance is not positive.
pub fn monthly_energy_cost(consumption_per_100km: f64, monthly_km: f64, unit_price: f64) -> f64 {
    if consumption_per_100km <= 0.0 || monthly_km <= 0.0 {
        return 0.0;
    }
    (consumption_per_100km * monthly_km / 100.0) * unit_price
}

/// Fraction of the purchase price retained at the end of ownership.
///
/// Single step at the threshold: up to and including 10 years keeps 20 %,
/// anything longer keeps 10 %.
pub fn residual_value_ratio(years: i32) -> f64 {
    if years > LONG_OWNERSHIP_THRESHOLD_YEARS {
        LONG_OWNERSHIP_RESIDUAL_RATIO
    } else {
        SHORT_OWNERSHIP_RESIDUAL_RATIO
    }
}

/// Value lost over the whole ownership period.
pub fn total_depreciation(purchase_price: f64, years: i32) -> f64 {
    if purchase_price <= 0.0 || years <= 0 {
        return 0.0;
    }
    purchase_price * (1.0 - residual_value_ratio(years))
}

/// Depreciation spread evenly over the ownership years (0 for no years).
pub fn annual_depreciation(total_depreciation: f64, years: i32) -> f64 {
    if years <= 0 {
        return 0.0;
    }
    total_depreciation / f64::from(years)
}

fn cost_per_kilometer(annual_running: f64, annual_depreciation: f64, annual_km: f64) -> f64 {
    if annual_km <= 0.0 {
        return 0.0;
    }
    (annual_running + annual_depreciation) / annual_km
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn golf() -> VehicleProfile {
        VehicleProfile {
            id: "golf".to_string(),
            name: "Golf".to_string(),
            fuel_consumption: 6.5,
            fuel_price: 1.65,
            monthly_kilometers: 1500.0,
            annual_car_tax: 200.0,
            annual_car_insurance: 800.0,
            financing_rate: 0.0,
            purchase_price: 25_000.0,
            expected_years_of_ownership: 5,
            ..VehicleProfile::default()
        }
    }

    #[test]
    fn test_end_to_end_combustion_profile() {
        let profile = golf();
        let costs = CostBreakdown::from_profile(&profile);

        assert_close(costs.monthly_fuel_cost, 160.875);
        assert_close(costs.annual_fuel_cost, 1930.5);
        assert_eq!(costs.monthly_electricity_cost, 0.0);
        assert_close(costs.monthly_running_cost, 160.875 + 200.0 / 12.0 + 800.0 / 12.0);
        assert!((costs.monthly_running_cost - 244.21).abs() < 0.01);
        assert_close(costs.total_depreciation, 20_000.0);
        assert_close(costs.annual_depreciation, 4_000.0);
        assert!((costs.cost_per_kilometer - 0.385).abs() < 0.001);
        assert_close(
            costs.total_cost_of_ownership,
            costs.annual_running_cost * 5.0 + 20_000.0,
        );
    }

    #[test]
    fn test_electric_profile() {
        let profile = VehicleProfile {
            electric_consumption: 16.0,
            electricity_price: 0.35,
            monthly_kilometers: 1000.0,
            ..VehicleProfile::default()
        };
        let costs = CostBreakdown::from_profile(&profile);

        assert_close(costs.monthly_electricity_cost, 56.0);
        assert_close(costs.annual_electricity_cost, 672.0);
        assert_eq!(costs.monthly_fuel_cost, 0.0);
    }

    #[test]
    fn test_residual_value_breakpoint() {
        assert_close(total_depreciation(30_000.0, 5), 24_000.0);
        assert_close(total_depreciation(30_000.0, 10), 24_000.0);
        assert_close(total_depreciation(30_000.0, 11), 27_000.0);
        assert_close(total_depreciation(30_000.0, 12), 27_000.0);
    }

    #[test]
    fn test_zero_years_yields_no_depreciation() {
        let profile = VehicleProfile {
            purchase_price: 30_000.0,
            expected_years_of_ownership: 0,
            monthly_kilometers: 1000.0,
            ..VehicleProfile::default()
        };
        let costs = CostBreakdown::from_profile(&profile);

        assert_eq!(costs.total_depreciation, 0.0);
        assert_eq!(costs.annual_depreciation, 0.0);
        assert_eq!(costs.total_cost_of_ownership, 0.0);
    }

    #[test]
    fn test_zero_distance_yields_zero_cost_per_km() {
        let profile = VehicleProfile {
            monthly_kilometers: 0.0,
            ..golf()
        };
        let costs = CostBreakdown::from_profile(&profile);

        assert_eq!(costs.monthly_fuel_cost, 0.0);
        assert_eq!(costs.cost_per_kilometer, 0.0);
        assert!(costs.cost_per_kilometer.is_finite());
    }

    #[test]
    fn test_negative_inputs_are_computed_as_given() {
        let profile = VehicleProfile {
            annual_car_tax: -120.0,
            ..VehicleProfile::default()
        };
        let costs = CostBreakdown::from_profile(&profile);
        assert_close(costs.monthly_running_cost, -10.0);
    }

    #[test]
    fn test_cost_components() {
        let profile = VehicleProfile {
            financing_rate: 300.0,
            ..golf()
        };
        let costs = CostBreakdown::from_profile(&profile);

        assert_close(costs.monthly_tax(), 200.0 / 12.0);
        assert_close(costs.monthly_insurance(), 800.0 / 12.0);
        assert_close(costs.monthly_financing(), 300.0);
        assert_close(costs.annual_financing(), 3_600.0);
        assert_close(
            costs.monthly_running_cost,
            costs.monthly_fuel_cost
                + costs.monthly_electricity_cost
                + costs.monthly_tax()
                + costs.monthly_insurance()
                + costs.monthly_financing(),
        );
    }

    #[test]
    fn test_absent_profile_yields_absent_breakdown() {
        assert!(compute_breakdown(None).is_none());
        let profile = golf();
        assert!(compute_breakdown(Some(&profile)).is_some());
    }

    fn arb_profile() -> impl Strategy<Value = VehicleProfile> {
        (
            (0.0f64..30.0, 0.0f64..40.0, 0.0f64..3.0, 0.0f64..1.0),
            (0.0f64..5_000.0, 0.0f64..1_000.0, 0.0f64..3_000.0, 0.0f64..1_500.0),
            (0.0f64..150_000.0, 0i32..30),
        )
            .prop_map(
                |((fuel, electric, fuel_price, kwh_price), (km, tax, insurance, rate), (price, years))| {
                    VehicleProfile {
                        fuel_consumption: fuel,
                        electric_consumption: electric,
                        fuel_price,
                        electricity_price: kwh_price,
                        monthly_kilometers: km,
                        annual_car_tax: tax,
                        annual_car_insurance: insurance,
                        financing_rate: rate,
                        purchase_price: price,
                        expected_years_of_ownership: years,
                        ..VehicleProfile::default()
                    }
                },
            )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_annual_figures_are_twelve_times_monthly(profile in arb_profile()) {
            let costs = CostBreakdown::from_profile(&profile);
            prop_assert_eq!(costs.annual_fuel_cost, costs.monthly_fuel_cost * 12.0);
            prop_assert_eq!(costs.annual_electricity_cost, costs.monthly_electricity_cost * 12.0);
            prop_assert_eq!(costs.annual_running_cost, costs.monthly_running_cost * 12.0);
        }

        #[test]
        fn prop_no_consumption_or_distance_means_no_energy_cost(
            profile in arb_profile(),
            zero_consumption in any::<bool>(),
        ) {
            let profile = if zero_consumption {
                VehicleProfile { fuel_consumption: 0.0, electric_consumption: 0.0, ..profile }
            } else {
                VehicleProfile { monthly_kilometers: 0.0, ..profile }
            };
            let costs = CostBreakdown::from_profile(&profile);
            prop_assert_eq!(costs.monthly_fuel_cost, 0.0);
            prop_assert_eq!(costs.monthly_electricity_cost, 0.0);
        }

        #[test]
        fn prop_no_years_or_price_means_no_depreciation(
            profile in arb_profile(),
            zero_years in any::<bool>(),
        ) {
            let profile = if zero_years {
                VehicleProfile { expected_years_of_ownership: 0, ..profile }
            } else {
                VehicleProfile { purchase_price: 0.0, ..profile }
            };
            let costs = CostBreakdown::from_profile(&profile);
            prop_assert_eq!(costs.total_depreciation, 0.0);
            prop_assert_eq!(costs.annual_depreciation, 0.0);
        }

        #[test]
        fn prop_residual_ratio_steps_at_ten_years(years in 1i32..60) {
            let expected = if years > 10 { 0.10 } else { 0.20 };
            prop_assert_eq!(residual_value_ratio(years), expected);
        }

        #[test]
        fn prop_results_are_finite(profile in arb_profile()) {
            let costs = CostBreakdown::from_profile(&profile);
            prop_assert!(costs.cost_per_kilometer.is_finite());
            prop_assert!(costs.annual_depreciation.is_finite());
            prop_assert!(costs.total_cost_of_ownership.is_finite());
        }
    }
}
