//! # Break-even Analysis
//!
//! Compares an electric profile against a combustion profile and finds the
//! month at which the electric vehicle's lower running costs have paid back
//! its higher purchase price.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Break-even Analysis                                │
//! │                                                                         │
//! │   electric profile ──► CostBreakdown ─┐                                 │
//! │                                       ├─► monthly savings               │
//! │   combustion profile ─► CostBreakdown ┘    (combustion − electric)      │
//! │                                                    │                    │
//! │   price difference (electric − combustion) ────────┤                    │
//! │                                                    ▼                    │
//! │                      savings > 0 ?  ── yes ──► After { months, km }     │
//! │                                    └─ no ───► Never                     │
//! │                                                                         │
//! │   total savings = savings × ownership months − price difference         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two breakdowns are independent; neither reads the other.

use serde::Serialize;

use crate::engine::CostBreakdown;
use crate::types::VehicleProfile;

// =============================================================================
// Break-even Point
// =============================================================================

/// When (if ever) the electric profile catches up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakEvenPoint {
    /// Reached after `months` months, i.e. `kilometers` driven with the
    /// electric profile.
    ///
    /// `months` may be zero or negative when the electric profile is already
    /// the cheaper purchase.
    After { months: i64, kilometers: f64 },

    /// Running costs never compensate: the electric profile is not cheaper
    /// to run.
    Never,
}

impl BreakEvenPoint {
    pub fn months(&self) -> Option<i64> {
        match self {
            BreakEvenPoint::After { months, .. } => Some(*months),
            BreakEvenPoint::Never => None,
        }
    }

    pub fn kilometers(&self) -> Option<f64> {
        match self {
            BreakEvenPoint::After { kilometers, .. } => Some(*kilometers),
            BreakEvenPoint::Never => None,
        }
    }
}

// =============================================================================
// Break-even Analysis
// =============================================================================

/// Result of comparing an electric profile with a combustion profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakEvenAnalysis<'a> {
    pub electric_profile: &'a VehicleProfile,
    pub combustion_profile: &'a VehicleProfile,
    pub electric_costs: CostBreakdown<'a>,
    pub combustion_costs: CostBreakdown<'a>,
    /// Electric purchase price minus combustion purchase price.
    pub price_difference: f64,
    /// Combustion monthly running cost minus electric monthly running cost.
    pub monthly_savings: f64,
    pub break_even: BreakEvenPoint,
    /// Net savings over the electric profile's ownership period.
    pub total_savings: f64,
}

impl<'a> BreakEvenAnalysis<'a> {
    /// Runs the analysis.
    ///
    /// ## Example
    /// ```rust
    /// use drivecost_core::{BreakEvenAnalysis, BreakEvenPoint, VehicleProfile};
    ///
    /// let electric = VehicleProfile {
    ///     purchase_price: 35_000.0,
    ///     financing_rate: 100.0,
    ///     monthly_kilometers: 1_000.0,
    ///     expected_years_of_ownership: 8,
    ///     ..VehicleProfile::default()
    /// };
    /// let combustion = VehicleProfile {
    ///     purchase_price: 25_000.0,
    ///     financing_rate: 250.0,
    ///     ..VehicleProfile::default()
    /// };
    ///
    /// let analysis = BreakEvenAnalysis::new(&electric, &combustion);
    /// assert_eq!(analysis.break_even.months(), Some(67));
    /// ```
    pub fn new(electric: &'a VehicleProfile, combustion: &'a VehicleProfile) -> Self {
        let electric_costs = CostBreakdown::from_profile(electric);
        let combustion_costs = CostBreakdown::from_profile(combustion);

        let price_difference = electric.purchase_price - combustion.purchase_price;
        let monthly_savings =
            combustion_costs.monthly_running_cost - electric_costs.monthly_running_cost;

        let break_even = if monthly_savings > 0.0 {
            // Saturating cast; a tiny positive saving can push the ratio past i64.
            let months = (price_difference / monthly_savings).ceil() as i64;
            BreakEvenPoint::After {
                months,
                kilometers: months as f64 * electric.monthly_kilometers,
            }
        } else {
            BreakEvenPoint::Never
        };

        let total_savings = monthly_savings * electric.ownership_months() - price_difference;

        BreakEvenAnalysis {
            electric_profile: electric,
            combustion_profile: combustion,
            electric_costs,
            combustion_costs,
            price_difference,
            monthly_savings,
            break_even,
            total_savings,
        }
    }

    /// Whether the electric profile is ahead by the end of its ownership.
    pub fn pays_off(&self) -> bool {
        self.total_savings > 0.0
    }
}

/// Runs the analysis on optional profiles.
///
/// Returns `None` if either profile is absent.
pub fn compare_break_even<'a>(
    electric: Option<&'a VehicleProfile>,
    combustion: Option<&'a VehicleProfile>,
) -> Option<BreakEvenAnalysis<'a>> {
    Some(BreakEvenAnalysis::new(electric?, combustion?))
}

// =============================================================================
// Unit Tests
// =============================================================================
