//! # Rendering
//!
//! Turns core results into terminal tables, CSV and JSON. All number
//! formatting lives here: two decimals, four for cost per kilometer, units
//! only in table labels.

use std::io::{self, Write};

use comfy_table::{modifiers, presets, Attribute, Cell, CellAlignment, Color, Table};
use drivecost_core::{
    BreakEvenAnalysis, BreakEvenPoint, Comparison, ConsumptionMetrics, CostBreakdown, Metric,
    VehicleProfile,
};
use serde::Serialize;

use crate::error::AppResult;

/// Width of a full share bar in characters.
const BAR_WIDTH: usize = 30;

// =============================================================================
// Number Formatting
// =============================================================================

pub fn amount(value: f64) -> String {
    format!("{value:.2}")
}

pub fn per_km(value: f64) -> String {
    format!("{value:.4}")
}

fn metric_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::CostPerKilometer => per_km(value),
        _ => amount(value),
    }
}

fn optional(value: Option<f64>) -> String {
    value.map(amount).unwrap_or_default()
}

// =============================================================================
// Tables
// =============================================================================

/// Empty table in the shared style.
pub fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn right(text: impl Into<String>) -> Cell {
    Cell::new(text.into()).set_alignment(CellAlignment::Right)
}

pub fn profiles_table(profiles: &[VehicleProfile]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "km / month", "Purchase price", "Years"]);
    for profile in profiles {
        table.add_row(vec![
            Cell::new(&profile.id).add_attribute(Attribute::Dim),
            Cell::new(&profile.name),
            right(amount(profile.monthly_kilometers)),
            right(amount(profile.purchase_price)),
            right(profile.expected_years_of_ownership.to_string()),
        ]);
    }
    table
}

/// Every field of a profile as `(key, label with unit, value)`.
pub fn profile_rows(profile: &VehicleProfile) -> Vec<(&'static str, &'static str, String)> {
    let tag = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    vec![
        ("id", "ID", profile.id.clone()),
        ("name", "Name", profile.name.clone()),
        ("fuel_type", "Fuel type", tag(profile.fuel_type.map(|t| t.to_string()))),
        (
            "electricity_type",
            "Electricity type",
            tag(profile.electricity_type.map(|t| t.to_string())),
        ),
        ("fuel_consumption", "Fuel consumption (L/100 km)", amount(profile.fuel_consumption)),
        (
            "electric_consumption",
            "Electric consumption (kWh/100 km)",
            amount(profile.electric_consumption),
        ),
        ("fuel_price", "Fuel price (/ L)", amount(profile.fuel_price)),
        ("electricity_price", "Electricity price (/ kWh)", amount(profile.electricity_price)),
        ("tank_size", "Tank size (L)", amount(profile.tank_size)),
        ("battery_size", "Battery size (kWh)", amount(profile.battery_size)),
        ("monthly_kilometers", "Monthly distance (km)", amount(profile.monthly_kilometers)),
        ("annual_car_tax", "Annual car tax", amount(profile.annual_car_tax)),
        ("annual_car_insurance", "Annual car insurance", amount(profile.annual_car_insurance)),
        ("financing_rate", "Financing rate (/ month)", amount(profile.financing_rate)),
        (
            "financing_period",
            "Financing period (months)",
            profile.financing_period.to_string(),
        ),
        ("purchase_price", "Purchase price", amount(profile.purchase_price)),
        (
            "expected_years_of_ownership",
            "Expected ownership (years)",
            profile.expected_years_of_ownership.to_string(),
        ),
        ("created_at", "Created", profile.created_at.to_rfc3339()),
        ("updated_at", "Updated", profile.updated_at.to_rfc3339()),
    ]
}

pub fn profile_table(profile: &VehicleProfile) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    for (_, label, value) in profile_rows(profile) {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

/// Running cost items as `(category, description, monthly, annual)`.
fn breakdown_items(costs: &CostBreakdown<'_>) -> Vec<(&'static str, &'static str, f64, f64)> {
    vec![
        ("energy", "Fuel", costs.monthly_fuel_cost, costs.annual_fuel_cost),
        ("energy", "Electricity", costs.monthly_electricity_cost, costs.annual_electricity_cost),
        ("fixed", "Car tax", costs.monthly_tax(), costs.annual_tax()),
        ("fixed", "Insurance", costs.monthly_insurance(), costs.annual_insurance()),
        ("fixed", "Financing", costs.monthly_financing(), costs.annual_financing()),
    ]
}

pub fn breakdown_table(costs: &CostBreakdown<'_>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Cost", "Monthly", "Annual"]);

    for (_, description, monthly, annual) in breakdown_items(costs) {
        table.add_row(vec![
            Cell::new(description),
            right(amount(monthly)),
            right(amount(annual)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Running costs").add_attribute(Attribute::Bold),
        right(amount(costs.monthly_running_cost)).add_attribute(Attribute::Bold),
        right(amount(costs.annual_running_cost)).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Depreciation").add_attribute(Attribute::Dim),
        right(amount(costs.annual_depreciation / drivecost_core::MONTHS_PER_YEAR))
            .add_attribute(Attribute::Dim),
        right(amount(costs.annual_depreciation)).add_attribute(Attribute::Dim),
    ]);
    table
}

pub fn summary_table(costs: &CostBreakdown<'_>) -> Table {
    let years = costs.profile.expected_years_of_ownership;
    let mut table = new_table();
    table.set_header(vec!["Summary", "Value"]);
    table.add_row(vec![
        Cell::new("Total depreciation"),
        right(amount(costs.total_depreciation)),
    ]);
    table.add_row(vec![Cell::new("Cost per km"), right(per_km(costs.cost_per_kilometer))]);
    table.add_row(vec![
        Cell::new(format!("Total cost of ownership ({years} years)")).add_attribute(Attribute::Bold),
        right(amount(costs.total_cost_of_ownership)).add_attribute(Attribute::Bold),
    ]);
    table
}

/// `None` when the profile has nothing to derive consumption from.
pub fn consumption_table(metrics: &ConsumptionMetrics) -> Option<Table> {
    if metrics.is_empty() {
        return None;
    }

    let rows = [
        ("Fuel per month (L)", metrics.monthly_fuel_liters),
        ("Fuel per year (L)", metrics.annual_fuel_liters),
        ("Tank fills per month", metrics.tank_fills_per_month),
        ("Energy per month (kWh)", metrics.monthly_energy_kwh),
        ("Energy per year (kWh)", metrics.annual_energy_kwh),
        ("Charges per month", metrics.charges_per_month),
        ("Range per tank (km)", metrics.fuel_range_km),
        ("Range per charge (km)", metrics.electric_range_km),
    ];

    let mut table = new_table();
    table.set_header(vec!["Consumption", "Value"]);
    for (label, value) in rows {
        if let Some(value) = value {
            table.add_row(vec![Cell::new(label), right(amount(value))]);
        }
    }
    Some(table)
}

pub fn comparison_table(comparison: &Comparison<'_>) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("Metric")];
    header.extend(
        comparison
            .breakdowns()
            .iter()
            .map(|costs| Cell::new(&costs.profile.name).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    for metric in Metric::ALL {
        let cheapest = comparison.cheapest(metric);
        let mut row = vec![Cell::new(metric.label())];
        for costs in comparison.breakdowns() {
            let cell = right(metric_value(metric, metric.value(costs)));
            row.push(if cheapest.is_some_and(|c| std::ptr::eq(c, costs)) {
                cell.fg(Color::Green)
            } else {
                cell
            });
        }
        table.add_row(row);
    }
    table
}

/// A bar of `█` proportional to `percent` of [`BAR_WIDTH`].
pub fn share_bar(percent: f64) -> String {
    let filled = (percent.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

pub fn shares_table(comparison: &Comparison<'_>, metric: Metric) -> Table {
    let mut table = new_table();
    table.set_header(vec![metric.label(), "%", ""]);
    for (costs, share) in comparison
        .breakdowns()
        .iter()
        .zip(comparison.relative_shares(metric))
    {
        table.add_row(vec![
            Cell::new(&costs.profile.name),
            right(format!("{share:.0}")),
            Cell::new(share_bar(share)).fg(Color::Cyan),
        ]);
    }
    table
}

/// Human description of a break-even point.
pub fn break_even_text(point: &BreakEvenPoint) -> String {
    match point {
        BreakEvenPoint::After { months, kilometers } => {
            format!("after {months} months ({} km)", amount(*kilometers))
        }
        BreakEvenPoint::Never => "never".to_string(),
    }
}

pub fn break_even_table(analysis: &BreakEvenAnalysis<'_>) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(""),
        Cell::new(&analysis.electric_profile.name).add_attribute(Attribute::Bold),
        Cell::new(&analysis.combustion_profile.name).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Purchase price"),
        right(amount(analysis.electric_profile.purchase_price)),
        right(amount(analysis.combustion_profile.purchase_price)),
    ]);
    table.add_row(vec![
        Cell::new("Running costs / month"),
        right(amount(analysis.electric_costs.monthly_running_cost)),
        right(amount(analysis.combustion_costs.monthly_running_cost)),
    ]);
    table.add_row(vec![
        Cell::new("Cost per km"),
        right(per_km(analysis.electric_costs.cost_per_kilometer)),
        right(per_km(analysis.combustion_costs.cost_per_kilometer)),
    ]);
    table
}

pub fn break_even_summary_table(analysis: &BreakEvenAnalysis<'_>) -> Table {
    let color = if analysis.pays_off() { Color::Green } else { Color::Red };

    let mut table = new_table();
    table.set_header(vec!["Break-even", "Value"]);
    table.add_row(vec![
        Cell::new("Price difference"),
        right(amount(analysis.price_difference)),
    ]);
    table.add_row(vec![
        Cell::new("Savings / month"),
        right(amount(analysis.monthly_savings)),
    ]);
    table.add_row(vec![
        Cell::new("Break-even"),
        right(break_even_text(&analysis.break_even)).fg(color),
    ]);
    table.add_row(vec![
        Cell::new(format!(
            "Total savings ({} years)",
            analysis.electric_profile.expected_years_of_ownership
        )),
        right(amount(analysis.total_savings)).fg(color),
    ]);
    table
}

// =============================================================================
// CSV
// =============================================================================

/// Quotes a field when it contains a separator, quote or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row<S: AsRef<str>>(out: &mut impl Write, fields: &[S]) -> io::Result<()> {
    let line: Vec<String> = fields.iter().map(|f| csv_field(f.as_ref())).collect();
    writeln!(out, "{}", line.join(","))
}

pub fn profiles_csv(out: &mut impl Write, profiles: &[VehicleProfile]) -> io::Result<()> {
    csv_row(
        out,
        &["id", "name", "monthly_kilometers", "purchase_price", "expected_years_of_ownership"],
    )?;
    for profile in profiles {
        csv_row(
            out,
            &[
                profile.id.clone(),
                profile.name.clone(),
                amount(profile.monthly_kilometers),
                amount(profile.purchase_price),
                profile.expected_years_of_ownership.to_string(),
            ],
        )?;
    }
    Ok(())
}

pub fn profile_csv(out: &mut impl Write, profile: &VehicleProfile) -> io::Result<()> {
    csv_row(out, &["field", "value"])?;
    for (key, _, value) in profile_rows(profile) {
        csv_row(out, &[key.to_string(), value])?;
    }
    Ok(())
}

pub fn breakdown_csv(out: &mut impl Write, costs: &CostBreakdown<'_>) -> io::Result<()> {
    csv_row(out, &["category", "description", "monthly", "annual"])?;
    for (category, description, monthly, annual) in breakdown_items(costs) {
        csv_row(
            out,
            &[category.to_string(), description.to_string(), amount(monthly), amount(annual)],
        )?;
    }
    csv_row(
        out,
        &[
            "total".to_string(),
            "Running costs".to_string(),
            amount(costs.monthly_running_cost),
            amount(costs.annual_running_cost),
        ],
    )?;
    csv_row(
        out,
        &[
            "depreciation".to_string(),
            "Depreciation".to_string(),
            amount(costs.annual_depreciation / drivecost_core::MONTHS_PER_YEAR),
            amount(costs.annual_depreciation),
        ],
    )?;
    csv_row(
        out,
        &[
            "metrics".to_string(),
            "Cost per km".to_string(),
            per_km(costs.cost_per_kilometer),
            String::new(),
        ],
    )?;
    csv_row(
        out,
        &[
            "metrics".to_string(),
            "Total cost of ownership".to_string(),
            String::new(),
            amount(costs.total_cost_of_ownership),
        ],
    )
}

pub fn consumption_csv(out: &mut impl Write, metrics: &ConsumptionMetrics) -> io::Result<()> {
    let rows = [
        ("Fuel (L)", metrics.monthly_fuel_liters, metrics.annual_fuel_liters),
        ("Energy (kWh)", metrics.monthly_energy_kwh, metrics.annual_energy_kwh),
    ];
    for (description, monthly, annual) in rows {
        if monthly.is_some() {
            csv_row(
                out,
                &[
                    "consumption".to_string(),
                    description.to_string(),
                    optional(monthly),
                    optional(annual),
                ],
            )?;
        }
    }
    Ok(())
}

pub fn comparison_csv(out: &mut impl Write, comparison: &Comparison<'_>) -> io::Result<()> {
    let mut header = vec!["metric".to_string()];
    header.extend(comparison.breakdowns().iter().map(|c| c.profile.name.clone()));
    csv_row(out, &header)?;

    for metric in Metric::ALL {
        let mut row = vec![metric.label().to_string()];
        row.extend(
            comparison
                .values(metric)
                .into_iter()
                .map(|value| metric_value(metric, value)),
        );
        csv_row(out, &row)?;
    }
    Ok(())
}

pub fn break_even_csv(out: &mut impl Write, analysis: &BreakEvenAnalysis<'_>) -> io::Result<()> {
    let point = &analysis.break_even;
    csv_row(out, &["field", "value"])?;
    let rows = [
        ("electric_profile", analysis.electric_profile.id.clone()),
        ("combustion_profile", analysis.combustion_profile.id.clone()),
        ("price_difference", amount(analysis.price_difference)),
        ("monthly_savings", amount(analysis.monthly_savings)),
        (
            "break_even_months",
            point.months().map(|m| m.to_string()).unwrap_or_else(|| "never".to_string()),
        ),
        (
            "break_even_kilometers",
            point.kilometers().map(amount).unwrap_or_else(|| "never".to_string()),
        ),
        ("total_savings", amount(analysis.total_savings)),
    ];
    for (key, value) in rows {
        csv_row(out, &[key.to_string(), value])?;
    }
    Ok(())
}

pub fn violations_csv(out: &mut impl Write, violations: &[String]) -> io::Result<()> {
    csv_row(out, &["violation"])?;
    for violation in violations {
        csv_row(out, &[violation])?;
    }
    Ok(())
}

// =============================================================================
// JSON
// =============================================================================

pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivecost_core::Settings;

    fn golf() -> VehicleProfile {
        let mut profile = VehicleProfile::new("Golf, TDI", &Settings::default());
        profile.fuel_consumption = 6.5;
        profile.monthly_kilometers = 1500.0;
        profile.annual_car_tax = 200.0;
        profile.annual_car_insurance = 800.0;
        profile.purchase_price = 25000.0;
        profile.expected_years_of_ownership = 5;
        profile
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(amount(244.208333), "244.21");
        assert_eq!(amount(0.0), "0.00");
        assert_eq!(per_km(0.38528), "0.3853");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("Golf, TDI"), "\"Golf, TDI\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_breakdown_csv_layout() {
        let profile = golf();
        let costs = CostBreakdown::from_profile(&profile);
        let mut out = Vec::new();
        breakdown_csv(&mut out, &costs).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "category,description,monthly,annual");
        assert!(lines[1].starts_with("energy,Fuel,"));
        assert!(lines[1].ends_with(",1930.50"));
        assert_eq!(lines[6], "total,Running costs,244.21,2930.50");
        assert_eq!(lines[7], "depreciation,Depreciation,333.33,4000.00");
        assert_eq!(lines[8], "metrics,Cost per km,0.3850,");
        assert!(lines[9].starts_with("metrics,Total cost of ownership,,"));
    }

    #[test]
    fn test_share_bar_bounds() {
        assert_eq!(share_bar(0.0), "");
        assert_eq!(share_bar(100.0).chars().count(), BAR_WIDTH);
        assert_eq!(share_bar(250.0).chars().count(), BAR_WIDTH);
        assert_eq!(share_bar(50.0).chars().count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_break_even_text() {
        assert_eq!(
            break_even_text(&BreakEvenPoint::After { months: 67, kilometers: 100500.0 }),
            "after 67 months (100500.00 km)"
        );
        assert_eq!(break_even_text(&BreakEvenPoint::Never), "never");
    }

    #[test]
    fn test_consumption_table_absent_without_inputs() {
        assert!(consumption_table(&ConsumptionMetrics::default()).is_none());
        let profile = golf();
        assert!(consumption_table(&ConsumptionMetrics::from_profile(&profile)).is_some());
    }

    #[test]
    fn test_profile_csv_quotes_name() {
        let mut out = Vec::new();
        profile_csv(&mut out, &golf()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("name,\"Golf, TDI\""));
        assert!(text.contains("expected_years_of_ownership,5"));
    }
}
