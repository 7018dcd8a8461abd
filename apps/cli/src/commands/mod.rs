//! # CLI Commands
//!
//! One module per top-level command.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (dispatch, profile loading)
//! ├── profile.rs    ◄─── Stored profile CRUD, import/export
//! ├── validate.rs   ◄─── Violation report
//! ├── calculate.rs  ◄─── Cost breakdown + consumption
//! ├── compare.rs    ◄─── 2-4 profiles side by side
//! ├── breakeven.rs  ◄─── Electric vs combustion
//! └── settings.rs   ◄─── Effective config, config file
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  dispatch(command, ctx, out)                                            │
//! │       │                                                                 │
//! │       ├── opens the store only for commands that need it                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <module>::run(..., format, out) ── writes table / JSON / CSV to out    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Outcome::Done | Outcome::Invalid   (exit 0 | exit 2)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `run` writes to a caller-supplied `Write`, so tests capture output
//! in a `Vec<u8>` and use an in-memory store.

use std::io::Write;
use std::path::PathBuf;

use drivecost_core::VehicleProfile;
use drivecost_db::{read_profile, Database, DbConfig};
use tracing::debug;

use crate::cli::{Commands, SourceArgs};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

pub mod breakeven;
pub mod calculate;
pub mod compare;
pub mod profile;
pub mod settings;
pub mod validate;

/// How a command finished when it didn't fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Completed normally.
    Done,

    /// Completed, but the checked profile has violations.
    Invalid,
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Done => 0,
            Outcome::Invalid => 2,
        }
    }
}

/// Effective configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: AppConfig,

    /// `--config` as given on the command line.
    pub config_path: Option<PathBuf>,
}

/// Runs one parsed command.
pub async fn dispatch(command: Commands, ctx: &Context, out: &mut impl Write) -> AppResult<Outcome> {
    let format = ctx.config.output.format;

    match command {
        Commands::Settings { action } => settings::run(action, ctx, out),

        Commands::Validate(source) => {
            let profile = resolve_source(&source, &ctx.config).await?;
            validate::run(&profile, format, out)
        }

        Commands::Calculate(source) => {
            let profile = resolve_source(&source, &ctx.config).await?;
            calculate::run(&profile, format, out)
        }

        Commands::Profile { action } => {
            let db = open_database(&ctx.config).await?;
            let result = profile::run(action, &db, &ctx.config, out).await;
            db.close().await;
            result
        }

        Commands::Compare { ids } => {
            let db = open_database(&ctx.config).await?;
            let result = compare::run(&db, &ids, format, out).await;
            db.close().await;
            result
        }

        Commands::BreakEven {
            electric,
            combustion,
        } => {
            let db = open_database(&ctx.config).await?;
            let result = breakeven::run(&db, &electric, &combustion, format, out).await;
            db.close().await;
            result
        }
    }
}

/// Opens the profile store named by the configuration.
pub async fn open_database(config: &AppConfig) -> AppResult<Database> {
    let path = config.database_path()?;
    debug!(path = %path.display(), "Opening profile store");
    Ok(Database::new(DbConfig::new(path)).await?)
}

/// Loads a stored profile, failing when it doesn't exist.
pub async fn load_profile(db: &Database, id: &str) -> AppResult<VehicleProfile> {
    db.profiles()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile", id))
}

/// Loads the profile named by `--file` or by a stored ID.
pub async fn resolve_source(source: &SourceArgs, config: &AppConfig) -> AppResult<VehicleProfile> {
    match (&source.file, &source.id) {
        (Some(file), _) => Ok(read_profile(file)?),
        (None, Some(id)) => {
            let db = open_database(config).await?;
            let result = load_profile(&db, id).await;
            db.close().await;
            result
        }
        (None, None) => Err(AppError::invalid_input(
            "Give a profile ID or --file <json>",
        )),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use drivecost_core::{ElectricityType, FuelType, Settings, VehicleProfile};
    use drivecost_db::{Database, DbConfig};

    pub async fn memory_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Combustion car: 244.21 / month running, 25000 purchase.
    pub fn golf() -> VehicleProfile {
        let mut profile = VehicleProfile::new("Golf", &Settings::default());
        profile.id = "golf".to_string();
        profile.fuel_consumption = 6.5;
        profile.fuel_type = Some(FuelType::Super);
        profile.tank_size = 50.0;
        profile.monthly_kilometers = 1500.0;
        profile.annual_car_tax = 200.0;
        profile.annual_car_insurance = 800.0;
        profile.purchase_price = 25000.0;
        profile.expected_years_of_ownership = 5;
        profile.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        profile.updated_at = profile.created_at;
        profile
    }

    /// Electric car, cheaper to run than [`golf`].
    pub fn model3() -> VehicleProfile {
        let mut profile = VehicleProfile::new("Model 3", &Settings::default());
        profile.id = "model3".to_string();
        profile.electric_consumption = 15.0;
        profile.electricity_type = Some(ElectricityType::HomeSocket);
        profile.battery_size = 60.0;
        profile.monthly_kilometers = 1500.0;
        profile.annual_car_insurance = 900.0;
        profile.purchase_price = 35000.0;
        profile.expected_years_of_ownership = 8;
        profile
    }

    pub fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(Outcome::Done.exit_code(), 0);
        assert_eq!(Outcome::Invalid.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_load_profile_not_found() {
        let db = memory_db().await;
        let err = load_profile(&db, "missing").await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_source_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("golf.json");
        drivecost_db::export_profile(&golf(), &path).unwrap();

        let source = SourceArgs {
            id: None,
            file: Some(path),
        };
        let profile = resolve_source(&source, &AppConfig::default()).await.unwrap();
        assert_eq!(profile, golf());
    }

    #[tokio::test]
    async fn test_resolve_source_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.database.path = Some(dir.path().join("profiles.db"));

        let db = open_database(&config).await.unwrap();
        db.profiles().insert(&golf()).await.unwrap();
        db.close().await;

        let source = SourceArgs {
            id: Some("golf".to_string()),
            file: None,
        };
        let profile = resolve_source(&source, &config).await.unwrap();
        assert_eq!(profile.name, "Golf");
    }
}
