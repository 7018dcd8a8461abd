//! # Profile Commands
//!
//! CRUD over stored profiles plus JSON import/export.
//!
//! ```text
//!   create ──► VehicleProfile::new (default prices) ──► flags ──► insert
//!   update ──► load ──► flags ──► update (bumps updated_at)
//!   import ──► import_profile (imported_ id) ──► insert
//!   export ──► load ──► export_profile
//! ```
//!
//! Writes go through the store's validation gate, so an invalid profile is
//! reported with every violation and nothing is stored.

use std::io::Write;

use drivecost_core::VehicleProfile;
use drivecost_db::{export_profile, import_profile, Database};
use serde_json::json;
use tracing::info;

use super::{load_profile, Outcome};
use crate::cli::ProfileCommands;
use crate::config::{AppConfig, OutputFormat};
use crate::error::AppResult;
use crate::render;

pub async fn run(
    action: ProfileCommands,
    db: &Database,
    config: &AppConfig,
    out: &mut impl Write,
) -> AppResult<Outcome> {
    let format = config.output.format;
    let profiles = db.profiles();

    match action {
        ProfileCommands::Create { name, fields } => {
            let mut profile = VehicleProfile::new(name.trim(), &config.settings());
            fields.apply(&mut profile);

            let stored = profiles.insert(&profile).await?;
            info!(id = %stored.id, name = %stored.name, "Profile created");

            match format {
                OutputFormat::Table => writeln!(out, "{}", stored.id)?,
                _ => write_profile(&stored, format, out)?,
            }
        }

        ProfileCommands::List => {
            let all = profiles.list().await?;
            match format {
                OutputFormat::Table if all.is_empty() => writeln!(out, "No profiles stored.")?,
                OutputFormat::Table => writeln!(out, "{}", render::profiles_table(&all))?,
                OutputFormat::Json => render::write_json(out, &all)?,
                OutputFormat::Csv => render::profiles_csv(out, &all)?,
            }
        }

        ProfileCommands::Show { id } => {
            let profile = load_profile(db, &id).await?;
            write_profile(&profile, format, out)?;
        }

        ProfileCommands::Update { id, name, fields } => {
            let mut profile = load_profile(db, &id).await?;
            if let Some(name) = name {
                profile.name = name.trim().to_string();
            }
            fields.apply(&mut profile);

            let stored = profiles.update(&profile).await?;
            info!(id = %stored.id, "Profile updated");
            write_profile(&stored, format, out)?;
        }

        ProfileCommands::Delete { id } => {
            let deleted = profiles.delete(&id).await?;
            match format {
                OutputFormat::Table if deleted => writeln!(out, "Deleted profile {id}")?,
                OutputFormat::Table => writeln!(out, "No profile with ID {id}")?,
                OutputFormat::Json => {
                    render::write_json(out, &json!({ "id": id, "deleted": deleted }))?
                }
                OutputFormat::Csv => writeln!(out, "id,deleted\n{},{deleted}", render::csv_field(&id))?,
            }
        }

        ProfileCommands::Import { file } => {
            let profile = import_profile(&file)?;
            let stored = profiles.insert(&profile).await?;

            match format {
                OutputFormat::Table => {
                    writeln!(out, "Imported profile {} ({})", stored.id, stored.name)?
                }
                _ => write_profile(&stored, format, out)?,
            }
        }

        ProfileCommands::Export { id, file } => {
            let profile = load_profile(db, &id).await?;
            export_profile(&profile, &file)?;

            match format {
                OutputFormat::Json => render::write_json(
                    out,
                    &json!({ "id": id, "file": file.display().to_string() }),
                )?,
                _ => writeln!(out, "Exported profile {id} to {}", file.display())?,
            }
        }
    }

    Ok(Outcome::Done)
}

fn write_profile(profile: &VehicleProfile, format: OutputFormat, out: &mut impl Write) -> AppResult<()> {
    match format {
        OutputFormat::Table => writeln!(out, "{}", render::profile_table(profile))?,
        OutputFormat::Json => render::write_json(out, profile)?,
        OutputFormat::Csv => render::profile_csv(out, profile)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ProfileFields;
    use crate::commands::test_support::*;
    use crate::error::ErrorCode;

    fn config(format: OutputFormat) -> AppConfig {
        let mut config = AppConfig::default();
        config.output.format = format;
        config
    }

    fn golf_fields() -> ProfileFields {
        ProfileFields {
            fuel_consumption: Some(6.5),
            monthly_kilometers: Some(1500.0),
            expected_years_of_ownership: Some(5),
            ..ProfileFields::default()
        }
    }

    #[tokio::test]
    async fn test_create_prints_id_and_uses_default_prices() {
        let db = memory_db().await;
        let mut config = config(OutputFormat::Table);
        config.defaults.fuel_price = 1.80;

        let mut out = Vec::new();
        let action = ProfileCommands::Create {
            name: "Golf".to_string(),
            fields: golf_fields(),
        };
        run(action, &db, &config, &mut out).await.unwrap();

        let id = text(out).trim().to_string();
        let stored = db.profiles().get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Golf");
        assert_eq!(stored.fuel_price, 1.80);
        assert_eq!(stored.electricity_price, 0.35);
        assert_eq!(stored.expected_years_of_ownership, 5);
    }

    #[tokio::test]
    async fn test_create_invalid_profile_is_rejected() {
        let db = memory_db().await;
        let action = ProfileCommands::Create {
            name: "No years".to_string(),
            fields: ProfileFields {
                fuel_consumption: Some(-1.0),
                ..ProfileFields::default()
            },
        };

        let err = run(action, &db, &config(OutputFormat::Table), &mut Vec::new())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("Fuel consumption must be >= 0"));
        assert!(err.message.contains("Expected years of ownership must be > 0"));
        assert_eq!(db.profiles().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_json_and_empty_table() {
        let db = memory_db().await;

        let mut out = Vec::new();
        run(ProfileCommands::List, &db, &config(OutputFormat::Table), &mut out)
            .await
            .unwrap();
        assert_eq!(text(out).trim(), "No profiles stored.");

        db.profiles().insert(&golf()).await.unwrap();
        db.profiles().insert(&model3()).await.unwrap();

        let mut out = Vec::new();
        run(ProfileCommands::List, &db, &config(OutputFormat::Json), &mut out)
            .await
            .unwrap();
        let listed: Vec<VehicleProfile> = serde_json::from_slice(&out).unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Golf", "Model 3"]);
    }

    #[tokio::test]
    async fn test_update_applies_flags() {
        let db = memory_db().await;
        db.profiles().insert(&golf()).await.unwrap();

        let action = ProfileCommands::Update {
            id: "golf".to_string(),
            name: Some("Golf VIII".to_string()),
            fields: ProfileFields {
                fuel_price: Some(1.90),
                ..ProfileFields::default()
            },
        };
        run(action, &db, &config(OutputFormat::Json), &mut Vec::new())
            .await
            .unwrap();

        let stored = db.profiles().get_by_id("golf").await.unwrap().unwrap();
        assert_eq!(stored.name, "Golf VIII");
        assert_eq!(stored.fuel_price, 1.90);
        assert_eq!(stored.fuel_consumption, 6.5);
        assert!(stored.updated_at > stored.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_profile() {
        let db = memory_db().await;
        let action = ProfileCommands::Update {
            id: "ghost".to_string(),
            name: None,
            fields: ProfileFields::default(),
        };
        let err = run(action, &db, &config(OutputFormat::Table), &mut Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let db = memory_db().await;
        db.profiles().insert(&golf()).await.unwrap();

        let mut out = Vec::new();
        let action = ProfileCommands::Delete { id: "golf".to_string() };
        run(action, &db, &config(OutputFormat::Table), &mut out).await.unwrap();
        assert_eq!(text(out).trim(), "Deleted profile golf");

        let mut out = Vec::new();
        let action = ProfileCommands::Delete { id: "golf".to_string() };
        run(action, &db, &config(OutputFormat::Table), &mut out).await.unwrap();
        assert_eq!(text(out).trim(), "No profile with ID golf");
    }

    #[tokio::test]
    async fn test_export_then_import_stores_copy() {
        let db = memory_db().await;
        db.profiles().insert(&golf()).await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("golf.json");

        let action = ProfileCommands::Export {
            id: "golf".to_string(),
            file: file.clone(),
        };
        run(action, &db, &config(OutputFormat::Table), &mut Vec::new())
            .await
            .unwrap();

        let mut out = Vec::new();
        run(
            ProfileCommands::Import { file },
            &db,
            &config(OutputFormat::Table),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(text(out).trim(), "Imported profile imported_golf (Golf)");
        let copy = db.profiles().get_by_id("imported_golf").await.unwrap().unwrap();
        assert_eq!(copy.fuel_consumption, 6.5);
        assert_eq!(db.profiles().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_show_csv() {
        let db = memory_db().await;
        db.profiles().insert(&golf()).await.unwrap();

        let mut out = Vec::new();
        let action = ProfileCommands::Show { id: "golf".to_string() };
        run(action, &db, &config(OutputFormat::Csv), &mut out).await.unwrap();

        let output = text(out);
        assert!(output.starts_with("field,value\n"));
        assert!(output.contains("fuel_type,Super\n"));
        assert!(output.contains("monthly_kilometers,1500.00\n"));
    }
}
