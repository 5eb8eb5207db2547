//! Validation of raw property input.
//!
//! Every rule is checked independently and all violations are returned
//! together, so a client can correct a request in one round trip.

use chrono::NaiveDate;
use house_price_geography_models::states::canonical_state_name;
use house_price_geography_models::title_case;
use house_price_property_models::{PropertyField, PropertyInput, PropertyRecord};

use crate::{FieldError, SoldDateIssue, ValidationError};

/// Validates `input` and normalizes it into a [`PropertyRecord`].
///
/// The state is replaced by its canonical spelling and the city is
/// title-cased for display. When `sold` is omitted it is inferred from the
/// presence of `prev_sold_date`.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every rule the input violates.
pub fn validate(input: &PropertyInput, today: NaiveDate) -> Result<PropertyRecord, ValidationError> {
    let mut errors = Vec::new();

    let state = required_text(input.state.as_deref(), PropertyField::State, &mut errors)
        .and_then(|state| {
            let canonical = canonical_state_name(state);
            if canonical.is_none() {
                errors.push(FieldError::InvalidState(state.to_string()));
            }
            canonical
        });
    let city = required_text(input.city.as_deref(), PropertyField::City, &mut errors);
    let beds = positive_count(input.beds, PropertyField::Beds, &mut errors);
    let baths = positive_count(input.baths, PropertyField::Baths, &mut errors);
    let living_area = positive_area(input.living_area, PropertyField::LivingArea, &mut errors);
    let land_area = positive_area(input.land_area, PropertyField::LandArea, &mut errors);

    let sold = input.sold.unwrap_or(input.prev_sold_date.is_some());
    if let Err(issue) = check_sold_date(sold, input.prev_sold_date, today) {
        errors.push(FieldError::InconsistentSoldDate(issue));
    }

    match (state, city, beds, baths, living_area, land_area) {
        (Some(state), Some(city), Some(beds), Some(baths), Some(living_area), Some(land_area))
            if errors.is_empty() =>
        {
            Ok(PropertyRecord {
                state: state.to_string(),
                city: title_case(city),
                beds,
                baths,
                living_area,
                land_area,
                prev_sold_date: input.prev_sold_date,
            })
        }
        _ => {
            log::debug!("Rejected property input: {} violation(s)", errors.len());
            Err(ValidationError { errors })
        }
    }
}

/// Checks the cross-field rule: sold ⟺ a sale date is present and not
/// after `today`.
///
/// # Errors
///
/// Returns the [`SoldDateIssue`] describing which side of the rule failed.
pub fn check_sold_date(
    sold: bool,
    prev_sold_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), SoldDateIssue> {
    match (sold, prev_sold_date) {
        (true, None) => Err(SoldDateIssue::SoldWithoutDate),
        (true, Some(date)) if date > today => Err(SoldDateIssue::FutureDate(date)),
        (false, Some(_)) => Err(SoldDateIssue::DateWithoutSale),
        (true, Some(_)) | (false, None) => Ok(()),
    }
}

fn required_text<'a>(
    value: Option<&'a str>,
    field: PropertyField,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match value.map(str::trim) {
        None => {
            errors.push(FieldError::Missing(field));
            None
        }
        Some("") => {
            errors.push(FieldError::Empty(field));
            None
        }
        Some(text) => Some(text),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn positive_count(
    value: Option<f64>,
    field: PropertyField,
    errors: &mut Vec<FieldError>,
) -> Option<u32> {
    let Some(value) = value else {
        errors.push(FieldError::Missing(field));
        return None;
    };

    if !value.is_finite() || value <= 0.0 {
        errors.push(FieldError::NotPositive(field));
        None
    } else if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        errors.push(FieldError::NotInteger(field));
        None
    } else {
        Some(value as u32)
    }
}

fn positive_area(
    value: Option<f64>,
    field: PropertyField,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    match value {
        None => {
            errors.push(FieldError::Missing(field));
            None
        }
        Some(area) if area.is_finite() && area > 0.0 => Some(area),
        Some(_) => {
            errors.push(FieldError::NotPositive(field));
            None
        }
    }
}
