//! # Profile Interchange
//!
//! Single profiles as standalone JSON documents, for sharing between
//! installations.
//!
//! ```text
//!   export_profile ──► pretty JSON file (same layout as stored profiles)
//!
//!   import_profile ◄── JSON file
//!        │
//!        ├── id := "imported_" + id   (fresh UUID when the document has none)
//!        └── created_at = updated_at := now
//! ```
//!
//! Imported profiles are not validated here. They go through the same
//! validation gate as any other write when stored.

use std::fs;
use std::path::Path;

use chrono::Utc;
use drivecost_core::{generate_profile_id, VehicleProfile};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Prefix given to the ID of every imported profile.
pub const IMPORTED_ID_PREFIX: &str = "imported_";

/// Writes `profile` to `path` as pretty-printed JSON.
pub fn export_profile(profile: &VehicleProfile, path: impl AsRef<Path>) -> DbResult<()> {
    let path = path.as_ref();
    let document = serde_json::to_string_pretty(profile)?;

    fs::write(path, document).map_err(|err| DbError::io(path, err))?;

    info!(id = %profile.id, path = %path.display(), "Profile exported");
    Ok(())
}

/// Reads a profile document as-is, without touching its ID or timestamps.
pub fn read_profile(path: impl AsRef<Path>) -> DbResult<VehicleProfile> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading profile document");

    let document = fs::read_to_string(path).map_err(|err| DbError::io(path, err))?;
    Ok(serde_json::from_str(&document)?)
}

/// Reads a profile document and gives it a new identity.
///
/// The ID gets the `imported_` prefix so it can't collide with the profile
/// it was exported from. Timestamps are reset to now.
pub fn import_profile(path: impl AsRef<Path>) -> DbResult<VehicleProfile> {
    let mut profile = read_profile(path.as_ref())?;

    let original_id = profile.id.trim();
    let base = if original_id.is_empty() {
        generate_profile_id()
    } else {
        original_id.to_string()
    };
    profile.id = format!("{IMPORTED_ID_PREFIX}{base}");

    let now = Utc::now();
    profile.created_at = now;
    profile.updated_at = now;

    info!(id = %profile.id, name = %profile.name, "Profile imported");
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use drivecost_core::{FuelType, Settings};

    fn sample() -> VehicleProfile {
        let mut profile = VehicleProfile::new("Golf", &Settings::default());
        profile.id = "golf-1".to_string();
        profile.fuel_consumption = 6.5;
        profile.fuel_type = Some(FuelType::Super);
        profile.monthly_kilometers = 1500.0;
        profile.expected_years_of_ownership = 5;
        profile.created_at = Utc.with_ymd_and_hms(2023, 5, 1, 8, 0, 0).unwrap();
        profile.updated_at = profile.created_at;
        profile
    }

    #[test]
    fn test_export_then_read_preserves_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("golf.json");
        let profile = sample();

        export_profile(&profile, &path).unwrap();
        let read = read_profile(&path).unwrap();

        assert_eq!(read, profile);
    }

    #[test]
    fn test_import_prefixes_id_and_refreshes_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("golf.json");
        let profile = sample();
        export_profile(&profile, &path).unwrap();

        let imported = import_profile(&path).unwrap();

        assert_eq!(imported.id, "imported_golf-1");
        assert_eq!(imported.name, "Golf");
        assert_eq!(imported.fuel_type, Some(FuelType::Super));
        assert!(imported.created_at > profile.created_at);
        assert_eq!(imported.created_at, imported.updated_at);
    }

    #[test]
    fn test_import_without_id_gets_fresh_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.json");
        fs::write(
            &path,
            r#"{"name": "Bare", "fuel_type": "", "expected_years_of_ownership": 3}"#,
        )
        .unwrap();

        let imported = import_profile(&path).unwrap();

        let suffix = imported.id.strip_prefix(IMPORTED_ID_PREFIX).unwrap();
        assert!(uuid::Uuid::parse_str(suffix).is_ok());
        assert_eq!(imported.fuel_type, None);
        assert_eq!(imported.expected_years_of_ownership, 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_profile(dir.path().join("nope.json"));
        assert!(matches!(result, Err(DbError::Io { .. })));
    }

    #[test]
    fn test_malformed_document_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(read_profile(&path), Err(DbError::Json(_))));
    }
}
