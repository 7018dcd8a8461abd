//! `compare`: 2 to 4 stored profiles over every metric.

use std::io::Write;

use drivecost_core::{Comparison, Metric};
use drivecost_db::Database;
use serde::Serialize;

use super::{load_profile, Outcome};
use crate::config::OutputFormat;
use crate::error::AppResult;
use crate::render;

/// Metrics shown as relative bars under the table.
const BAR_METRICS: [Metric; 2] = [Metric::MonthlyRunningCost, Metric::TotalCostOfOwnership];

#[derive(Debug, Serialize)]
struct MetricRow<'a> {
    metric: Metric,
    values: Vec<f64>,
    shares: Vec<f64>,
    cheapest: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ComparisonReport<'a> {
    profiles: Vec<&'a str>,
    metrics: Vec<MetricRow<'a>>,
}

pub async fn run(
    db: &Database,
    ids: &[String],
    format: OutputFormat,
    out: &mut impl Write,
) -> AppResult<Outcome> {
    let mut profiles = Vec::with_capacity(ids.len());
    for id in ids {
        profiles.push(load_profile(db, id).await?);
    }

    let comparison = Comparison::new(&profiles)?;

    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", render::comparison_table(&comparison))?;
            for metric in BAR_METRICS {
                writeln!(out, "{}", render::shares_table(&comparison, metric))?;
            }
        }
        OutputFormat::Json => render::write_json(out, &report(&comparison))?,
        OutputFormat::Csv => render::comparison_csv(out, &comparison)?,
    }

    Ok(Outcome::Done)
}

fn report<'a>(comparison: &'a Comparison<'_>) -> ComparisonReport<'a> {
    ComparisonReport {
        profiles: comparison
            .breakdowns()
            .iter()
            .map(|costs| costs.profile.id.as_str())
            .collect(),
        metrics: Metric::ALL
            .into_iter()
            .map(|metric| MetricRow {
                metric,
                values: comparison.values(metric),
                shares: comparison.relative_shares(metric),
                cheapest: comparison
                    .cheapest(metric)
                    .map(|costs| costs.profile.id.as_str()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use crate::error::ErrorCode;

    async fn seeded() -> Database {
        let db = memory_db().await;
        db.profiles().insert(&golf()).await.unwrap();
        db.profiles().insert(&model3()).await.unwrap();
        db
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_json_names_cheapest_per_metric() {
        let db = seeded().await;

        let mut out = Vec::new();
        run(&db, &ids(&["golf", "model3"]), OutputFormat::Json, &mut out)
            .await
            .unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["profiles"], serde_json::json!(["golf", "model3"]));

        let running = report["metrics"]
            .as_array()
            .unwrap()
            .iter()
            .find(|row| row["metric"] == "monthly_running_cost")
            .unwrap();
        assert_eq!(running["cheapest"], "model3");
        assert_eq!(running["shares"][0], 100.0);
    }

    #[tokio::test]
    async fn test_single_profile_is_rejected() {
        let db = seeded().await;
        let err = run(&db, &ids(&["golf"]), OutputFormat::Table, &mut Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let db = seeded().await;
        let err = run(&db, &ids(&["golf", "ghost"]), OutputFormat::Table, &mut Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_csv_has_row_per_metric() {
        let db = seeded().await;

        let mut out = Vec::new();
        run(&db, &ids(&["golf", "model3"]), OutputFormat::Csv, &mut out)
            .await
            .unwrap();

        let output = text(out);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "metric,Golf,Model 3");
        assert_eq!(lines.len(), 1 + Metric::ALL.len());
    }
}
