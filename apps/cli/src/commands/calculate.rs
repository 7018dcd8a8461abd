//! `calculate`: cost breakdown and consumption figures for one profile.
//!
//! No validation gate here: partially filled profiles are calculated as
//! given, so a what-if document can be explored before it is complete.

use std::io::Write;

use drivecost_core::{ConsumptionMetrics, CostBreakdown, VehicleProfile};
use serde::Serialize;

use super::Outcome;
use crate::config::OutputFormat;
use crate::error::AppResult;
use crate::render;

/// JSON body of `calculate`.
#[derive(Debug, Serialize)]
pub struct CalculationReport<'a> {
    pub costs: CostBreakdown<'a>,
    pub consumption: ConsumptionMetrics,
}

pub fn run(profile: &VehicleProfile, format: OutputFormat, out: &mut impl Write) -> AppResult<Outcome> {
    let report = CalculationReport {
        costs: CostBreakdown::from_profile(profile),
        consumption: ConsumptionMetrics::from_profile(profile),
    };

    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", profile.name)?;
            writeln!(out, "{}", render::breakdown_table(&report.costs))?;
            writeln!(out, "{}", render::summary_table(&report.costs))?;
            if let Some(table) = render::consumption_table(&report.consumption) {
                writeln!(out, "{table}")?;
            }
        }
        OutputFormat::Json => render::write_json(out, &report)?,
        OutputFormat::Csv => {
            render::breakdown_csv(out, &report.costs)?;
            render::consumption_csv(out, &report.consumption)?;
        }
    }

    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use drivecost_core::Settings;

    #[test]
    fn test_json_report_carries_costs_and_consumption() {
        let mut out = Vec::new();
        run(&golf(), OutputFormat::Json, &mut out).unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let monthly_fuel = report["costs"]["monthly_fuel_cost"].as_f64().unwrap();
        assert!((monthly_fuel - 160.875).abs() < 1e-9);
        let depreciation = report["costs"]["total_depreciation"].as_f64().unwrap();
        assert!((depreciation - 20000.0).abs() < 1e-6);
        assert_eq!(report["costs"]["profile"]["name"], "Golf");
        assert_eq!(report["consumption"]["monthly_fuel_liters"], 97.5);
        assert!(report["consumption"]["monthly_energy_kwh"].is_null());
    }

    #[test]
    fn test_csv_ends_with_consumption_rows() {
        let mut out = Vec::new();
        run(&golf(), OutputFormat::Csv, &mut out).unwrap();

        let output = text(out);
        assert!(output.starts_with("category,description,monthly,annual\n"));
        assert!(output.ends_with("consumption,Fuel (L),97.50,1170.00\n"));
    }

    #[test]
    fn test_table_for_partial_profile() {
        let profile = VehicleProfile::new("Draft", &Settings::default());

        let mut out = Vec::new();
        let outcome = run(&profile, OutputFormat::Table, &mut out).unwrap();

        assert_eq!(outcome, Outcome::Done);
        let output = text(out);
        assert!(output.starts_with("Draft\n"));
        assert!(output.contains("Running costs"));
        assert!(!output.contains("Consumption"));
    }
}
