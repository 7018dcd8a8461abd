//! # Domain Types
//!
//! Core domain types used throughout drivecost.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐   ┌─────────────────┐                     │
//! │  │     VehicleProfile       │   │    FuelType     │                     │
//! │  │  ──────────────────────  │   │  ─────────────  │                     │
//! │  │  id / name               │   │  Diesel         │                     │
//! │  │  consumption (L, kWh)    │   │  Super, ...     │                     │
//! │  │  prices (per L, per kWh) │   └─────────────────┘                     │
//! │  │  tank / battery size     │                                           │
//! │  │  monthly kilometers      │   ┌─────────────────┐                     │
//! │  │  tax / insurance         │   │ ElectricityType │                     │
//! │  │  financing rate / period │   │  ─────────────  │                     │
//! │  │  purchase price / years  │   │  HomeSocket     │                     │
//! │  └──────────────────────────┘   │  PublicCharging │                     │
//! │                                 └─────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names follow the flat JSON document layout used for stored and
//! exported profiles (`fuel_consumption`, `annual_car_tax`, ...).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::settings::Settings;
use crate::MONTHS_PER_YEAR;

// =============================================================================
// Fuel Type
// =============================================================================

/// Fuel grade a combustion vehicle runs on.
///
/// Carried through for display and filtering only; never used in arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum FuelType {
    #[serde(rename = "Diesel")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Diesel"))]
    Diesel,
    #[serde(rename = "Ultimate")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Ultimate"))]
    Ultimate,
    #[serde(rename = "Super")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Super"))]
    Super,
    #[serde(rename = "SuperPlus")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "SuperPlus"))]
    SuperPlus,
    #[serde(rename = "Ultimate Diesel")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Ultimate Diesel"))]
    UltimateDiesel,
}

impl FuelType {
    /// Every fuel grade, in display order.
    pub const ALL: [FuelType; 5] = [
        FuelType::Diesel,
        FuelType::Ultimate,
        FuelType::Super,
        FuelType::SuperPlus,
        FuelType::UltimateDiesel,
    ];

    /// Returns the display label (also the stored representation).
    pub const fn label(&self) -> &'static str {
        match self {
            FuelType::Diesel => "Diesel",
            FuelType::Ultimate => "Ultimate",
            FuelType::Super => "Super",
            FuelType::SuperPlus => "SuperPlus",
            FuelType::UltimateDiesel => "Ultimate Diesel",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FuelType {
    type Err = CoreError;

    /// Accepts the display label in any case, with or without separators
    /// (`"Ultimate Diesel"`, `"ultimate-diesel"`, `"ULTIMATE_DIESEL"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_tag(s);
        FuelType::ALL
            .into_iter()
            .find(|fuel| normalize_tag(fuel.label()) == wanted)
            .ok_or_else(|| CoreError::unknown_tag("fuel type", s, FuelType::ALL.map(|f| f.label())))
    }
}

// =============================================================================
// Electricity Type
// =============================================================================

/// Where an electric vehicle is usually charged.
///
/// Carried through for display only; the price itself is a separate field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum ElectricityType {
    #[serde(rename = "Home socket")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Home socket"))]
    HomeSocket,
    #[serde(rename = "Public charging station")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Public charging station"))]
    PublicChargingStation,
}

impl ElectricityType {
    /// Every charging source, in display order.
    pub const ALL: [ElectricityType; 2] = [
        ElectricityType::HomeSocket,
        ElectricityType::PublicChargingStation,
    ];

    /// Returns the display label (also the stored representation).
    pub const fn label(&self) -> &'static str {
        match self {
            ElectricityType::HomeSocket => "Home socket",
            ElectricityType::PublicChargingStation => "Public charging station",
        }
    }
}

impl fmt::Display for ElectricityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ElectricityType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_tag(s);
        ElectricityType::ALL
            .into_iter()
            .find(|source| normalize_tag(source.label()) == wanted)
            .ok_or_else(|| {
                CoreError::unknown_tag(
                    "electricity type",
                    s,
                    ElectricityType::ALL.map(|e| e.label()),
                )
            })
    }
}

/// Lowercases and strips spaces, hyphens and underscores.
fn normalize_tag(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Reads an optional tag, treating a missing value or an empty string as
/// "no tag". Stored documents written by older tools use `""` for unset tags.
fn deserialize_optional_tag<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

// =============================================================================
// Vehicle Profile
// =============================================================================

/// The user-supplied parameters of one vehicle.
///
/// A profile is plain data: nothing here is checked on construction. Use
/// [`crate::validation::validate_profile`] before persisting it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VehicleProfile {
    /// Opaque identifier (UUID v4 for profiles created here).
    #[serde(default)]
    pub id: String,

    /// Display name. Required for persistence, not for calculation.
    #[serde(default)]
    pub name: String,

    /// Fuel consumption in liters per 100 km.
    #[serde(default)]
    pub fuel_consumption: f64,

    /// Electric consumption in kWh per 100 km.
    #[serde(default)]
    pub electric_consumption: f64,

    /// Fuel price per liter.
    #[serde(default)]
    pub fuel_price: f64,

    /// Electricity price per kWh.
    #[serde(default)]
    pub electricity_price: f64,

    #[serde(default, deserialize_with = "deserialize_optional_tag")]
    pub fuel_type: Option<FuelType>,

    #[serde(default, deserialize_with = "deserialize_optional_tag")]
    pub electricity_type: Option<ElectricityType>,

    /// Tank size in liters.
    #[serde(default)]
    pub tank_size: f64,

    /// Usable battery capacity in kWh.
    #[serde(default)]
    pub battery_size: f64,

    /// Distance driven per month in km.
    #[serde(default)]
    pub monthly_kilometers: f64,

    #[serde(default)]
    pub annual_car_tax: f64,

    #[serde(default)]
    pub annual_car_insurance: f64,

    /// Monthly financing or lease payment.
    #[serde(default)]
    pub financing_rate: f64,

    /// Financing term in months. Informational only.
    #[serde(default)]
    pub financing_period: i32,

    #[serde(default)]
    pub purchase_price: f64,

    /// Expected ownership duration in whole years.
    #[serde(default)]
    pub expected_years_of_ownership: i32,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl VehicleProfile {
    /// Creates an empty profile with a fresh ID and prices taken from
    /// `settings`.
    ///
    /// Ownership years start at zero, so the profile is not valid until the
    /// caller fills it in.
    ///
    /// ## Example
    /// ```rust
    /// use drivecost_core::{Settings, VehicleProfile};
    ///
    /// let profile = VehicleProfile::new("Family car", &Settings::default());
    /// assert_eq!(profile.fuel_price, 1.65);
    /// assert!(!profile.id.is_empty());
    /// ```
    pub fn new(name: impl Into<String>, settings: &Settings) -> Self {
        let now = Utc::now();
        VehicleProfile {
            id: generate_profile_id(),
            name: name.into(),
            fuel_price: settings.default_fuel_price,
            electricity_price: settings.default_electricity_price,
            created_at: now,
            updated_at: now,
            ..VehicleProfile::default()
        }
    }

    /// Distance driven per year in km.
    #[inline]
    pub fn annual_kilometers(&self) -> f64 {
        self.monthly_kilometers * MONTHS_PER_YEAR
    }

    /// Expected ownership duration in months.
    #[inline]
    pub fn ownership_months(&self) -> f64 {
        f64::from(self.expected_years_of_ownership) * MONTHS_PER_YEAR
    }

    /// Whether the profile burns fuel at all.
    #[inline]
    pub fn uses_fuel(&self) -> bool {
        self.fuel_consumption > 0.0
    }

    /// Whether the profile draws electricity at all.
    #[inline]
    pub fn uses_electricity(&self) -> bool {
        self.electric_consumption > 0.0
    }

    /// Marks the profile as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Generates a new profile ID.
pub fn generate_profile_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
