//! # Error Types
//!
//! Domain-specific error types for drivecost-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  drivecost-core errors (this file)                                      │
//! │  ├── CoreError        - Domain errors (bad profile, bad comparison)     │
//! │  └── ValidationError  - One field rule violation                        │
//! │                                                                         │
//! │  drivecost-db errors (separate crate)                                   │
//! │  └── DbError          - Store and file operation failures               │
//! │                                                                         │
//! │  CLI errors (in app)                                                    │
//! │  └── AppError         - What the user sees, plus an exit code           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → AppError → Terminal      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calculation itself never fails: absent inputs produce absent results and
//! degenerate inputs produce zeros. Errors only arise where a caller asks for
//! something the domain forbids.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A profile failed one or more field rules.
    ///
    /// Carries every violation, not just the first.
    #[error("Invalid profile: {}", join_violations(.0))]
    InvalidProfile(Vec<ValidationError>),

    /// A comparison was requested with too few profiles.
    #[error("Comparison needs at least {min} profiles, got {actual}")]
    TooFewProfiles { min: usize, actual: usize },

    /// A comparison was requested with too many profiles.
    #[error("Comparison accepts at most {max} profiles, got {actual}")]
    TooManyProfiles { max: usize, actual: usize },

    /// A fuel or electricity tag could not be parsed.
    #[error("Unknown {kind} '{value}', expected one of: {expected}")]
    UnknownTag {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

impl CoreError {
    pub(crate) fn unknown_tag<const N: usize>(
        kind: &'static str,
        value: &str,
        expected: [&'static str; N],
    ) -> Self {
        CoreError::UnknownTag {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }

    /// Returns the field violations if this is an invalid-profile error.
    pub fn violations(&self) -> &[ValidationError] {
        match self {
            CoreError::InvalidProfile(violations) => violations,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Profile Fields
// =============================================================================

/// The profile fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    FuelConsumption,
    ElectricConsumption,
    FuelPrice,
    ElectricityPrice,
    TankSize,
    BatterySize,
    MonthlyKilometers,
    AnnualCarTax,
    AnnualCarInsurance,
    FinancingRate,
    FinancingPeriod,
    PurchasePrice,
    ExpectedYearsOfOwnership,
}

impl ProfileField {
    /// Human-readable field name used in messages.
    pub const fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::FuelConsumption => "Fuel consumption",
            ProfileField::ElectricConsumption => "Electric consumption",
            ProfileField::FuelPrice => "Fuel price",
            ProfileField::ElectricityPrice => "Electricity price",
            ProfileField::TankSize => "Tank size",
            ProfileField::BatterySize => "Battery size",
            ProfileField::MonthlyKilometers => "Monthly kilometers",
            ProfileField::AnnualCarTax => "Annual car tax",
            ProfileField::AnnualCarInsurance => "Annual car insurance",
            ProfileField::FinancingRate => "Financing rate",
            ProfileField::FinancingPeriod => "Financing period",
            ProfileField::PurchasePrice => "Purchase price",
            ProfileField::ExpectedYearsOfOwnership => "Expected years of ownership",
        }
    }

}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: ProfileField },

    /// Value must be zero or greater.
    #[error("{field} must be >= 0")]
    Negative { field: ProfileField },

    /// Value must be strictly greater than zero.
    #[error("{field} must be > 0")]
    NotPositive { field: ProfileField },
}

impl ValidationError {
    /// The field this violation is about.
    pub fn field(&self) -> ProfileField {
        match self {
            ValidationError::Required { field }
            | ValidationError::Negative { field }
            | ValidationError::NotPositive { field } => *field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: ProfileField::Name,
        };
        assert_eq!(err.to_string(), "Name is required");

        let err = ValidationError::Negative {
            field: ProfileField::MonthlyKilometers,
        };
        assert_eq!(err.to_string(), "Monthly kilometers must be >= 0");

        let err = ValidationError::NotPositive {
            field: ProfileField::ExpectedYearsOfOwnership,
        };
        assert_eq!(err.to_string(), "Expected years of ownership must be > 0");
    }

    #[test]
    fn test_invalid_profile_lists_all_violations() {
        let err = CoreError::InvalidProfile(vec![
            ValidationError::Required {
                field: ProfileField::Name,
            },
            ValidationError::Negative {
                field: ProfileField::FuelPrice,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid profile: Name is required; Fuel price must be >= 0"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_comparison_size_messages() {
        let err = CoreError::TooFewProfiles { min: 2, actual: 1 };
        assert_eq!(err.to_string(), "Comparison needs at least 2 profiles, got 1");

        let err = CoreError::TooManyProfiles { max: 4, actual: 5 };
        assert_eq!(err.to_string(), "Comparison accepts at most 4 profiles, got 5");
    }
}
