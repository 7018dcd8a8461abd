//! # Profile Repository
//!
//! Database operations for vehicle profiles.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    insert / update                                      │
//! │                                                                         │
//! │  VehicleProfile                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  drivecost_core::ensure_valid ── violations ──► DbError::InvalidProfile │
//! │       │ ok                                                              │
//! │       ▼                                                                 │
//! │  INSERT / UPDATE vehicle_profiles                                       │
//! │       │                                                                 │
//! │       ├── duplicate id ──► DbError::UniqueViolation                     │
//! │       └── no such id   ──► DbError::NotFound (update only)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads never validate: a stored profile is returned exactly as stored.

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use drivecost_core::{ensure_valid, VehicleProfile};

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Expands to a SELECT over every profile column followed by `$tail`.
macro_rules! select_profiles {
    ($tail:literal) => {
        concat!(
            r#"
            SELECT
                id,
                name,
                fuel_consumption,
                electric_consumption,
                fuel_price,
                electricity_price,
                fuel_type,
                electricity_type,
                tank_size,
                battery_size,
                monthly_kilometers,
                annual_car_tax,
                annual_car_insurance,
                financing_rate,
                financing_period,
                purchase_price,
                expected_years_of_ownership,
                created_at,
                updated_at
            FROM vehicle_profiles
            "#,
            $tail
        )
    };
}

/// Repository for profile database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProfileRepository::new(pool);
///
/// repo.insert(&profile).await?;
/// let stored = repo.get_by_id(&profile.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProfileRepository { pool }
    }

    /// Gets a profile by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(VehicleProfile))` - Profile found
    /// * `Ok(None)` - Profile not found
    /// * `Err(DbError::InvalidId)` - `id` is blank
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<VehicleProfile>> {
        let id = require_id(id)?;

        let profile = sqlx::query_as::<_, VehicleProfile>(select_profiles!("WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    /// Lists every profile, ordered by name then ID.
    pub async fn list(&self) -> DbResult<Vec<VehicleProfile>> {
        debug!("Listing profiles");

        let profiles = sqlx::query_as::<_, VehicleProfile>(select_profiles!("ORDER BY name, id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(profiles)
    }

    /// Inserts a new profile.
    ///
    /// ## Returns
    /// * `Ok(VehicleProfile)` - The stored profile
    /// * `Err(DbError::InvalidProfile)` - Validation gate rejected it
    /// * `Err(DbError::UniqueViolation)` - ID already exists
    pub async fn insert(&self, profile: &VehicleProfile) -> DbResult<VehicleProfile> {
        debug!(id = %profile.id, name = %profile.name, "Inserting profile");

        let id = require_id(&profile.id)?;
        ensure_valid(profile)?;

        let query = sqlx::query(
            r#"
            INSERT INTO vehicle_profiles (
                id,
                name, fuel_consumption, electric_consumption,
                fuel_price, electricity_price, fuel_type, electricity_type,
                tank_size, battery_size, monthly_kilometers,
                annual_car_tax, annual_car_insurance,
                financing_rate, financing_period,
                purchase_price, expected_years_of_ownership,
                created_at, updated_at
            ) VALUES (
                ?,
                ?, ?, ?,
                ?, ?, ?, ?,
                ?, ?, ?,
                ?, ?,
                ?, ?,
                ?, ?,
                ?, ?
            )
            "#,
        )
        .bind(id);

        bind_fields(query, profile)
            .bind(profile.created_at)
            .bind(profile.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|err| match DbError::from(err) {
                DbError::UniqueViolation { field, .. } => DbError::duplicate(field, id),
                other => other,
            })?;

        let mut stored = profile.clone();
        stored.id = id.to_string();
        Ok(stored)
    }

    /// Updates an existing profile and bumps its `updated_at`.
    ///
    /// ## Returns
    /// * `Ok(VehicleProfile)` - The profile as now stored
    /// * `Err(DbError::InvalidProfile)` - Validation gate rejected it
    /// * `Err(DbError::NotFound)` - Profile doesn't exist
    pub async fn update(&self, profile: &VehicleProfile) -> DbResult<VehicleProfile> {
        debug!(id = %profile.id, "Updating profile");

        let id = require_id(&profile.id)?;
        ensure_valid(profile)?;

        let mut updated = profile.clone();
        updated.id = id.to_string();
        updated.touch();

        let query = sqlx::query(
            r#"
            UPDATE vehicle_profiles SET
                name = ?,
                fuel_consumption = ?,
                electric_consumption = ?,
                fuel_price = ?,
                electricity_price = ?,
                fuel_type = ?,
                electricity_type = ?,
                tank_size = ?,
                battery_size = ?,
                monthly_kilometers = ?,
                annual_car_tax = ?,
                annual_car_insurance = ?,
                financing_rate = ?,
                financing_period = ?,
                purchase_price = ?,
                expected_years_of_ownership = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        );

        let result = bind_fields(query, &updated)
            .bind(updated.updated_at)
            .bind(updated.id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Profile", id));
        }

        Ok(updated)
    }

    /// Deletes a profile.
    ///
    /// Deleting a profile that doesn't exist is not an error.
    ///
    /// ## Returns
    /// * `Ok(true)` - A row was removed
    /// * `Ok(false)` - Nothing matched
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let id = require_id(id)?;
        debug!(id = %id, "Deleting profile");

        let result = sqlx::query("DELETE FROM vehicle_profiles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts stored profiles.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicle_profiles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Binds the mutable columns, `name` through `expected_years_of_ownership`,
/// in table order.
fn bind_fields<'q>(query: SqliteQuery<'q>, profile: &'q VehicleProfile) -> SqliteQuery<'q> {
    query
        .bind(profile.name.as_str())
        .bind(profile.fuel_consumption)
        .bind(profile.electric_consumption)
        .bind(profile.fuel_price)
        .bind(profile.electricity_price)
        .bind(profile.fuel_type)
        .bind(profile.electricity_type)
        .bind(profile.tank_size)
        .bind(profile.battery_size)
        .bind(profile.monthly_kilometers)
        .bind(profile.annual_car_tax)
        .bind(profile.annual_car_insurance)
        .bind(profile.financing_rate)
        .bind(profile.financing_period)
        .bind(profile.purchase_price)
        .bind(profile.expected_years_of_ownership)
}

fn require_id(id: &str) -> DbResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DbError::InvalidId("profile ID must not be empty".to_string()));
    }
    Ok(id)
}

// =============================================================================
// Unit Tests
// =============================================================================
