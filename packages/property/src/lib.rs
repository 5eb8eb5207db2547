#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property validation and model feature encoding.
//!
//! [`validate::validate`] turns a raw [`PropertyInput`] into a
//! [`PropertyRecord`], checking every rule and reporting all failures at
//! once. [`encode::encode`] then turns the record into the
//! [`FeatureVector`] the price model consumes.
//!
//! Both take the current date as a parameter so results are reproducible.
//!
//! [`PropertyInput`]: house_price_property_models::PropertyInput
//! [`PropertyRecord`]: house_price_property_models::PropertyRecord
//! [`FeatureVector`]: house_price_property_models::FeatureVector

pub mod encode;
pub mod validate;

use chrono::NaiveDate;
use house_price_property_models::PropertyField;
use thiserror::Error;

/// Why the sold flag and previous sale date disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SoldDateIssue {
    /// `sold` is true but no date was given.
    #[error("property is marked as sold but has no previous sale date")]
    SoldWithoutDate,
    /// `sold` is true but the date is after today.
    #[error("previous sale date {0} is in the future")]
    FutureDate(NaiveDate),
    /// `sold` is false but a date was given.
    #[error("property is not marked as sold but has a previous sale date")]
    DateWithoutSale,
}

/// A single rule violation, attributed to one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A required field is absent.
    #[error("{0} is required")]
    Missing(PropertyField),

    /// A text field is empty after trimming.
    #[error("{0} must not be empty")]
    Empty(PropertyField),

    /// The state is not one of the recognized U.S. state names.
    #[error("'{0}' is not a recognized U.S. state")]
    InvalidState(String),

    /// A count field has a fractional part or is out of range.
    #[error("{0} must be a whole number")]
    NotInteger(PropertyField),

    /// A numeric field is zero, negative or not finite.
    #[error("{0} must be greater than 0")]
    NotPositive(PropertyField),

    /// The sold flag and previous sale date are inconsistent.
    #[error("{0}")]
    InconsistentSoldDate(SoldDateIssue),
}

impl FieldError {
    /// The field this error is attributed to.
    #[must_use]
    pub const fn field(&self) -> PropertyField {
        match self {
            Self::Missing(field)
            | Self::Empty(field)
            | Self::NotInteger(field)
            | Self::NotPositive(field) => *field,
            Self::InvalidState(_) => PropertyField::State,
            Self::InconsistentSoldDate(SoldDateIssue::SoldWithoutDate) => PropertyField::Sold,
            Self::InconsistentSoldDate(
                SoldDateIssue::FutureDate(_) | SoldDateIssue::DateWithoutSale,
            ) => PropertyField::PrevSoldDate,
        }
    }
}

/// All rule violations found in one property input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid property input: {}", summarize(.errors))]
pub struct ValidationError {
    /// Every violation, in field order.
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_attribution() {
        assert_eq!(
            FieldError::InvalidState("Texass".to_string()).field(),
            PropertyField::State
        );
        assert_eq!(
            FieldError::InconsistentSoldDate(SoldDateIssue::SoldWithoutDate).field(),
            PropertyField::Sold
        );
        assert_eq!(
            FieldError::InconsistentSoldDate(SoldDateIssue::DateWithoutSale).field(),
            PropertyField::PrevSoldDate
        );
        assert_eq!(
            FieldError::NotPositive(PropertyField::LandArea).field(),
            PropertyField::LandArea
        );
    }

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            FieldError::NotPositive(PropertyField::LivingArea).to_string(),
            "living_area must be greater than 0"
        );
        assert_eq!(
            FieldError::Missing(PropertyField::City).to_string(),
            "city is required"
        );
    }

    #[test]
    fn validation_error_summarizes_all_fields() {
        let err = ValidationError {
            errors: vec![
                FieldError::Empty(PropertyField::City),
                FieldError::NotInteger(PropertyField::Baths),
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid property input: city must not be empty; baths must be a whole number"
        );
        assert_eq!(err.errors[1].field(), PropertyField::Baths);
    }
}
