//! # Multi-profile Comparison
//!
//! Places two to four profiles side by side over a fixed set of metrics.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Metric: MonthlyRunningCost                                  │
//! │                                                              │
//! │  Golf     244.21  ████████████████████████████████  100 %    │
//! │  Model 3  133.50  █████████████████                  55 %    │
//! │  Zoe       98.00  █████████████                      40 %    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bars and number formatting belong to the presentation layer; this module
//! only supplies the values and their shares of the largest one.

use std::fmt;

use serde::Serialize;

use crate::engine::CostBreakdown;
use crate::error::{CoreError, CoreResult};
use crate::types::VehicleProfile;
use crate::{MAX_COMPARED_PROFILES, MIN_COMPARED_PROFILES};

// =============================================================================
// Metric
// =============================================================================

/// A figure of a [`CostBreakdown`] that profiles can be compared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MonthlyFuelCost,
    MonthlyElectricityCost,
    MonthlyRunningCost,
    AnnualRunningCost,
    CostPerKilometer,
    AnnualDepreciation,
    TotalCostOfOwnership,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Metric; 7] = [
        Metric::MonthlyFuelCost,
        Metric::MonthlyElectricityCost,
        Metric::MonthlyRunningCost,
        Metric::AnnualRunningCost,
        Metric::CostPerKilometer,
        Metric::AnnualDepreciation,
        Metric::TotalCostOfOwnership,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Metric::MonthlyFuelCost => "Monthly fuel cost",
            Metric::MonthlyElectricityCost => "Monthly electricity cost",
            Metric::MonthlyRunningCost => "Monthly running cost",
            Metric::AnnualRunningCost => "Annual running cost",
            Metric::CostPerKilometer => "Cost per kilometer",
            Metric::AnnualDepreciation => "Annual depreciation",
            Metric::TotalCostOfOwnership => "Total cost of ownership",
        }
    }

    /// Reads this metric from a breakdown.
    pub fn value(&self, costs: &CostBreakdown<'_>) -> f64 {
        match self {
            Metric::MonthlyFuelCost => costs.monthly_fuel_cost,
            Metric::MonthlyElectricityCost => costs.monthly_electricity_cost,
            Metric::MonthlyRunningCost => costs.monthly_running_cost,
            Metric::AnnualRunningCost => costs.annual_running_cost,
            Metric::CostPerKilometer => costs.cost_per_kilometer,
            Metric::AnnualDepreciation => costs.annual_depreciation,
            Metric::TotalCostOfOwnership => costs.total_cost_of_ownership,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Comparison
// =============================================================================

/// Breakdowns of 2 to 4 profiles, in the order given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison<'a> {
    breakdowns: Vec<CostBreakdown<'a>>,
}

impl<'a> Comparison<'a> {
    /// Computes a breakdown for every profile.
    ///
    /// ## Errors
    /// [`CoreError::TooFewProfiles`] below two profiles,
    /// [`CoreError::TooManyProfiles`] above four.
    pub fn new(profiles: &'a [VehicleProfile]) -> CoreResult<Self> {
        if profiles.len() < MIN_COMPARED_PROFILES {
            return Err(CoreError::TooFewProfiles {
                min: MIN_COMPARED_PROFILES,
                actual: profiles.len(),
            });
        }
        if profiles.len() > MAX_COMPARED_PROFILES {
            return Err(CoreError::TooManyProfiles {
                max: MAX_COMPARED_PROFILES,
                actual: profiles.len(),
            });
        }

        Ok(Comparison {
            breakdowns: profiles.iter().map(CostBreakdown::from_profile).collect(),
        })
    }

    pub fn breakdowns(&self) -> &[CostBreakdown<'a>] {
        &self.breakdowns
    }

    /// The metric's value for every profile, in input order.
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.breakdowns.iter().map(|costs| metric.value(costs)).collect()
    }

    /// The profile with the lowest value; the earlier one wins a tie.
    pub fn cheapest(&self, metric: Metric) -> Option<&CostBreakdown<'a>> {
        self.breakdowns.iter().fold(None, |best, costs| match best {
            Some(current) if metric.value(current) <= metric.value(costs) => Some(current),
            _ => Some(costs),
        })
    }

    /// Each value as a percentage of the largest value.
    ///
    /// All zeros when the largest value is not positive.
    pub fn relative_shares(&self, metric: Metric) -> Vec<f64> {
        let values = self.values(metric);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max <= 0.0 {
            return vec![0.0; values.len()];
        }
        values.iter().map(|value| value / max * 100.0).collect()
    }
}
