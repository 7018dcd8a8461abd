//! # Validation Module
//!
//! Field rules for vehicle profiles.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                    │
//! │  └── Type validation (numbers parse, tags are known)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Name present                                                       │
//! │  ├── Amounts, consumption and sizes >= 0                                │
//! │  └── Ownership years > 0                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Profile store                                                 │
//! │  └── Calls validate_profile before every write                          │
//! │                                                                         │
//! │  The cost engine never calls this module: what-if calculations on       │
//! │  half-filled profiles are allowed.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule is evaluated; nothing short-circuits. The caller gets the
//! complete list of problems in a stable order.
//!
//! ## Usage
//! ```rust
//! use drivecost_core::validation::validate;
//! use drivecost_core::VehicleProfile;
//!
//! let messages = validate(&VehicleProfile::default());
//! assert_eq!(messages, vec![
//!     "Name is required".to_string(),
//!     "Expected years of ownership must be > 0".to_string(),
//! ]);
//! ```

use crate::error::{CoreError, CoreResult, ProfileField, ValidationError};
use crate::types::VehicleProfile;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a profile name: must not be empty.
///
/// Whitespace counts as content; trimming is left to input layers.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: ProfileField::Name,
        });
    }
    Ok(())
}

/// Validates that an amount is zero or greater.
///
/// `NaN` fails: it is not `>= 0`.
pub fn validate_non_negative(field: ProfileField, value: f64) -> ValidationResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::Negative { field })
    }
}

/// Validates the financing term in months.
pub fn validate_financing_period(months: i32) -> ValidationResult<()> {
    if months < 0 {
        return Err(ValidationError::Negative {
            field: ProfileField::FinancingPeriod,
        });
    }
    Ok(())
}

/// Validates the ownership period: at least one year.
pub fn validate_ownership_years(years: i32) -> ValidationResult<()> {
    if years <= 0 {
        return Err(ValidationError::NotPositive {
            field: ProfileField::ExpectedYearsOfOwnership,
        });
    }
    Ok(())
}

// =============================================================================
// Profile Validation
// =============================================================================

/// Checks every rule and returns all violations, in rule order.
pub fn validate_profile(profile: &VehicleProfile) -> Vec<ValidationError> {
    let amounts = [
        (ProfileField::MonthlyKilometers, profile.monthly_kilometers),
        (ProfileField::FuelConsumption, profile.fuel_consumption),
        (ProfileField::ElectricConsumption, profile.electric_consumption),
        (ProfileField::FuelPrice, profile.fuel_price),
        (ProfileField::ElectricityPrice, profile.electricity_price),
        (ProfileField::TankSize, profile.tank_size),
        (ProfileField::BatterySize, profile.battery_size),
        (ProfileField::AnnualCarTax, profile.annual_car_tax),
        (ProfileField::AnnualCarInsurance, profile.annual_car_insurance),
        (ProfileField::FinancingRate, profile.financing_rate),
    ];

    std::iter::once(validate_name(&profile.name))
        .chain(
            amounts
                .into_iter()
                .map(|(field, value)| validate_non_negative(field, value)),
        )
        .chain([
            validate_financing_period(profile.financing_period),
            validate_non_negative(ProfileField::PurchasePrice, profile.purchase_price),
            validate_ownership_years(profile.expected_years_of_ownership),
        ])
        .filter_map(Result::err)
        .collect()
}

/// Checks every rule and returns the violations as end-user messages.
pub fn validate(profile: &VehicleProfile) -> Vec<String> {
    validate_profile(profile)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Gate for write paths: `Ok` when the profile is valid, otherwise
/// [`CoreError::InvalidProfile`] with every violation.
pub fn ensure_valid(profile: &VehicleProfile) -> CoreResult<()> {
    let violations = validate_profile(profile);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidProfile(violations))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_profile() -> VehicleProfile {
        VehicleProfile {
            name: "Golf".to_string(),
            fuel_consumption: 6.5,
            fuel_price: 1.65,
            monthly_kilometers: 1500.0,
            annual_car_tax: 200.0,
            annual_car_insurance: 800.0,
            purchase_price: 25_000.0,
            expected_years_of_ownership: 5,
            ..VehicleProfile::default()
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(validate_profile(&valid_profile()).is_empty());
        assert!(ensure_valid(&valid_profile()).is_ok());
    }

    #[test]
    fn test_empty_name_is_required() {
        let profile = VehicleProfile {
            name: String::new(),
            ..valid_profile()
        };
        assert_eq!(validate(&profile), vec!["Name is required".to_string()]);
    }

    #[test]
    fn test_whitespace_name_is_accepted() {
        let profile = VehicleProfile {
            name: " ".to_string(),
            monthly_kilometers: 1000.0,
            expected_years_of_ownership: 5,
            ..VehicleProfile::default()
        };
        assert!(validate(&profile).is_empty());
    }

    #[test]
    fn test_collects_all_violations_in_rule_order() {
        let profile = VehicleProfile {
            name: String::new(),
            monthly_kilometers: -1.0,
            battery_size: -5.0,
            financing_period: -12,
            purchase_price: -1.0,
            expected_years_of_ownership: 0,
            ..valid_profile()
        };

        let fields: Vec<_> = validate_profile(&profile)
            .iter()
            .map(ValidationError::field)
            .collect();
        assert_eq!(
            fields,
            vec![
                ProfileField::Name,
                ProfileField::MonthlyKilometers,
                ProfileField::BatterySize,
                ProfileField::FinancingPeriod,
                ProfileField::PurchasePrice,
                ProfileField::ExpectedYearsOfOwnership,
            ]
        );
    }

    #[test]
    fn test_zero_amounts_are_allowed() {
        let profile = VehicleProfile {
            fuel_consumption: 0.0,
            fuel_price: 0.0,
            annual_car_tax: 0.0,
            purchase_price: 0.0,
            ..valid_profile()
        };
        assert!(validate_profile(&profile).is_empty());
    }

    #[test]
    fn test_nan_is_rejected() {
        let profile = VehicleProfile {
            fuel_price: f64::NAN,
            ..valid_profile()
        };
        assert_eq!(validate(&profile), vec!["Fuel price must be >= 0".to_string()]);
    }

    #[test]
    fn test_ensure_valid_carries_every_violation() {
        let err = ensure_valid(&VehicleProfile::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidProfile(ref v) if v.len() == 2));
    }

    proptest! {
        #[test]
        fn prop_non_positive_years_always_flagged(years in i32::MIN..=0) {
            let profile = VehicleProfile {
                expected_years_of_ownership: years,
                ..valid_profile()
            };
            let expected = ValidationError::NotPositive {
                field: ProfileField::ExpectedYearsOfOwnership,
            };
            let violations = validate_profile(&profile);
            prop_assert!(violations.contains(&expected));
        }

        #[test]
        fn prop_negative_amount_always_flagged(amount in -1e9f64..-1e-9) {
            let profile = VehicleProfile {
                tank_size: amount,
                ..valid_profile()
            };
            let expected = vec![ValidationError::Negative {
                field: ProfileField::TankSize,
            }];
            prop_assert_eq!(validate_profile(&profile), expected);
        }
    }
}
