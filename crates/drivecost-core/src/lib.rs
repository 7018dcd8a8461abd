//! # drivecost-core: Pure Cost Logic for drivecost
//!
//! This crate is the **heart** of drivecost. It contains the cost engine,
//! the break-even analysis and the profile rules as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        drivecost Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    drivecost CLI (apps/cli)                     │    │
//! │  │     profile ──► validate ──► calculate ──► compare / break-even │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │             ★ drivecost-core (THIS CRATE) ★                     │    │
//! │  │                                                                 │    │
//! │  │   ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌──────────────────┐  │    │
//! │  │   │  types   │ │  engine  │ │ breakeven │ │    validation    │  │    │
//! │  │   │ Profile  │ │ Breakdown│ │  Analysis │ │      rules       │  │    │
//! │  │   └──────────┘ └──────────┘ └───────────┘ └──────────────────┘  │    │
//! │  │   ┌────────────┐ ┌─────────────┐ ┌──────────┐                   │    │
//! │  │   │ comparison │ │ consumption │ │ settings │                   │    │
//! │  │   └────────────┘ └─────────────┘ └──────────┘                   │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS            │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                 drivecost-db (Profile Store)                    │    │
//! │  │          SQLite queries, migrations, JSON import/export         │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (VehicleProfile, FuelType, ElectricityType)
//! - [`engine`] - Cost breakdown of one profile
//! - [`breakeven`] - Electric vs. combustion break-even analysis
//! - [`comparison`] - Side-by-side comparison of 2 to 4 profiles
//! - [`consumption`] - Energy use, refills and range
//! - [`validation`] - Profile field rules
//! - [`settings`] - Default prices
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same profile in, same numbers out
//! 2. **No I/O**: database, file system and logging are FORBIDDEN here
//! 3. **Guarded Arithmetic**: zero distance or zero years yields 0, never NaN
//! 4. **No Hidden Validation**: the engine computes whatever it is given
//!
//! ## Example Usage
//!
//! ```rust
//! use drivecost_core::{validate, CostBreakdown, Settings, VehicleProfile};
//!
//! let mut profile = VehicleProfile::new("Golf", &Settings::default());
//! profile.fuel_consumption = 6.5;
//! profile.monthly_kilometers = 1500.0;
//! profile.expected_years_of_ownership = 5;
//!
//! assert!(validate(&profile).is_empty());
//!
//! let costs = CostBreakdown::from_profile(&profile);
//! assert!((costs.monthly_fuel_cost - 160.875).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod breakeven;
pub mod comparison;
pub mod consumption;
pub mod engine;
pub mod error;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use breakeven::{compare_break_even, BreakEvenAnalysis, BreakEvenPoint};
pub use comparison::{Comparison, Metric};
pub use consumption::ConsumptionMetrics;
pub use engine::{compute_breakdown, CostBreakdown};
pub use error::{CoreError, CoreResult, ProfileField, ValidationError};
pub use settings::Settings;
pub use types::*;
pub use validation::{ensure_valid, validate, validate_profile};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Months per year, as used by every monthly/annual conversion.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Ownership longer than this many years uses the long-ownership residual.
pub const LONG_OWNERSHIP_THRESHOLD_YEARS: i32 = 10;

/// Residual value kept after up to 10 years of ownership.
pub const SHORT_OWNERSHIP_RESIDUAL_RATIO: f64 = 0.20;

/// Residual value kept after more than 10 years of ownership.
pub const LONG_OWNERSHIP_RESIDUAL_RATIO: f64 = 0.10;

/// Fewest profiles a [`Comparison`] accepts.
pub const MIN_COMPARED_PROFILES: usize = 2;

/// Most profiles a [`Comparison`] accepts.
pub const MAX_COMPARED_PROFILES: usize = 4;
