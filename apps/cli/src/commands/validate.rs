//! `validate`: lists every rule a profile breaks.

use std::io::Write;

use drivecost_core::{validate, VehicleProfile};
use serde_json::json;

use super::Outcome;
use crate::config::OutputFormat;
use crate::error::AppResult;
use crate::render;

/// Reports violations; [`Outcome::Invalid`] when there are any.
pub fn run(profile: &VehicleProfile, format: OutputFormat, out: &mut impl Write) -> AppResult<Outcome> {
    let violations = validate(profile);

    match format {
        OutputFormat::Table if violations.is_empty() => {
            writeln!(out, "Profile '{}' is valid", profile.name)?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "Profile '{}' has {} problem(s):",
                profile.name,
                violations.len()
            )?;
            for violation in &violations {
                writeln!(out, "  - {violation}")?;
            }
        }
        OutputFormat::Json => render::write_json(
            out,
            &json!({
                "id": profile.id,
                "valid": violations.is_empty(),
                "violations": &violations,
            }),
        )?,
        OutputFormat::Csv => render::violations_csv(out, &violations)?,
    }

    Ok(if violations.is_empty() {
        Outcome::Done
    } else {
        Outcome::Invalid
    })
}
