//! Conversion of a validated property into model features.

use chrono::NaiveDate;
use house_price_encoding::{EncodingError, EncodingTable};
use house_price_property_models::{FeatureVector, PropertyRecord};

/// Number of days counted as one year when computing the time since the
/// last sale.
pub const DAYS_PER_YEAR: i64 = 365;

/// Whole years since `prev_sold_date`, counted as elapsed days divided by
/// 365 and rounded down.
///
/// Returns 0 for properties that have never been sold, and for sale dates
/// after `today`.
#[must_use]
pub fn years_since_last_sold(prev_sold_date: Option<NaiveDate>, today: NaiveDate) -> u32 {
    prev_sold_date.map_or(0, |date| {
        let days = (today - date).num_days().max(0);
        u32::try_from(days / DAYS_PER_YEAR).unwrap_or(u32::MAX)
    })
}

/// Builds the model feature vector for `record`.
///
/// The city encoding falls back to the state encoding when the city is not
/// listed under the state in `table`.
///
/// # Errors
///
/// Returns [`EncodingError::UnknownState`] if the record's state has no
/// entry in `table`.
pub fn encode(
    record: &PropertyRecord,
    table: &EncodingTable,
    today: NaiveDate,
) -> Result<FeatureVector, EncodingError> {
    let state_encoded = table.state_encoding(&record.state)?;
    let city_encoded = table.city_encoding_or_state(&record.state, &record.city)?;

    Ok(FeatureVector {
        beds: f64::from(record.beds),
        baths: f64::from(record.baths),
        living_area: record.living_area,
        land_area: record.land_area,
        years_since_last_sold: f64::from(years_since_last_sold(record.prev_sold_date, today)),
        state_encoded,
        city_encoded,
    })
}
