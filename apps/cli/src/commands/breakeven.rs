//! `break-even`: when an electric vehicle's higher price is paid back by
//! its lower running costs.

use std::io::Write;

use drivecost_core::BreakEvenAnalysis;
use drivecost_db::Database;

use super::{load_profile, Outcome};
use crate::config::OutputFormat;
use crate::error::AppResult;
use crate::render;

pub async fn run(
    db: &Database,
    electric_id: &str,
    combustion_id: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> AppResult<Outcome> {
    let electric = load_profile(db, electric_id).await?;
    let combustion = load_profile(db, combustion_id).await?;

    let analysis = BreakEvenAnalysis::new(&electric, &combustion);

    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", render::break_even_table(&analysis))?;
            writeln!(out, "{}", render::break_even_summary_table(&analysis))?;
        }
        OutputFormat::Json => render::write_json(out, &analysis)?,
        OutputFormat::Csv => render::break_even_csv(out, &analysis)?,
    }

    Ok(Outcome::Done)
}
