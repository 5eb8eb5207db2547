#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property listing lookup by street address.
//!
//! Fetches the public listing for an address from a real-estate data
//! provider and maps it into a [`PropertyInput`] so it can go through the
//! same validation as a directly submitted property.
//!
//! The provider is configured by a TOML file embedded from `services/`
//! (see [`service`]). Requests are bounded by the configured timeout and
//! are **not** retried: any transport failure or non-success status is
//! returned to the caller immediately.

pub mod service;
pub mod zillow;

use chrono::NaiveDate;
use house_price_property_models::PropertyInput;
use serde::Deserialize;
use thiserror::Error;

/// Square meters per square foot.
pub const SQFT_TO_SQM: f64 = 0.092_903_04;

/// Date format of the provider's `dateSoldString`.
const DATE_SOLD_FORMAT: &str = "%Y-%m-%d";

/// Errors from listing lookups.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The request could not be sent or timed out.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider returned HTTP {0}")]
    Status(u16),

    /// No API key is configured for the provider.
    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    /// The response body is not a listing object.
    #[error("Failed to parse listing: {0}")]
    Parse(#[from] serde_json::Error),

    /// The listing lacks a field needed for prediction.
    #[error("Listing is missing '{0}'")]
    MissingField(&'static str),

    /// A listing field has an unusable value.
    #[error("Listing field '{field}' has invalid value '{value}'")]
    InvalidField {
        /// Provider field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}

/// A source of property listings.
#[async_trait::async_trait]
pub trait ListingProvider: Send + Sync {
    /// Fetches the listing for a free-form U.S. address.
    async fn fetch_by_address(&self, address: &str) -> Result<ListingRecord, ListingError>;
}

/// The subset of a provider listing used for prediction.
///
/// Areas are in square feet, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    /// Interior living area in square feet.
    pub living_area: Option<f64>,
    /// Lot size in square feet.
    pub lot_size: Option<f64>,
    /// Number of bedrooms.
    pub bedrooms: Option<f64>,
    /// Number of bathrooms.
    pub bathrooms: Option<f64>,
    /// Date of the last sale, empty when the property has never sold.
    pub date_sold_string: Option<String>,
}

impl ListingRecord {
    /// Parses a listing from a provider response body.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Parse`] if the body is not a listing object.
    pub fn from_value(body: serde_json::Value) -> Result<Self, ListingError> {
        Ok(serde_json::from_value(body)?)
    }

    /// Returns the last sale date, or `None` if the property has never
    /// been sold.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::InvalidField`] if the date is not in
    /// `YYYY-MM-DD` form.
    pub fn sold_date(&self) -> Result<Option<NaiveDate>, ListingError> {
        match self.date_sold_string.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(date) => NaiveDate::parse_from_str(date, DATE_SOLD_FORMAT)
                .map(Some)
                .map_err(|_| ListingError::InvalidField {
                    field: "dateSoldString",
                    value: date.to_string(),
                }),
        }
    }

    /// Maps the listing into raw property input for `city` and `state`.
    ///
    /// Areas are converted from square feet to square meters. Counts and
    /// areas are passed through unchecked; range checks are left to
    /// property validation.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::MissingField`] if an area or room count is
    /// absent, or [`ListingError::InvalidField`] if the sale date cannot be
    /// parsed.
    pub fn to_property_input(&self, city: &str, state: &str) -> Result<PropertyInput, ListingError> {
        let living_area = self.living_area.ok_or(ListingError::MissingField("livingArea"))?;
        let lot_size = self.lot_size.ok_or(ListingError::MissingField("lotSize"))?;
        let bedrooms = self.bedrooms.ok_or(ListingError::MissingField("bedrooms"))?;
        let bathrooms = self.bathrooms.ok_or(ListingError::MissingField("bathrooms"))?;
        let prev_sold_date = self.sold_date()?;

        Ok(PropertyInput {
            state: Some(state.to_string()),
            city: Some(city.to_string()),
            beds: Some(bedrooms),
            baths: Some(bathrooms),
            living_area: Some(living_area * SQFT_TO_SQM),
            land_area: Some(lot_size * SQFT_TO_SQM),
            sold: Some(prev_sold_date.is_some()),
            prev_sold_date,
        })
    }
}

/// Joins address parts into the single-line form the provider expects.
#[must_use]
pub fn format_address(street: &str, city: &str, state: &str) -> String {
    format!("{} {} {}", street.trim(), city.trim(), state.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(date_sold: Option<&str>) -> ListingRecord {
        ListingRecord::from_value(serde_json::json!({
            "zpid": 12345,
            "livingArea": 2000,
            "lotSize": 5000.0,
            "bedrooms": 3,
            "bathrooms": 2,
            "dateSoldString": date_sold,
            "price": 550000
        }))
        .unwrap()
    }

    #[test]
    fn parses_provider_fields() {
        let record = listing(Some("2021-09-24"));
        assert_eq!(record.living_area, Some(2000.0));
        assert_eq!(record.lot_size, Some(5000.0));
        assert_eq!(record.bedrooms, Some(3.0));
        assert_eq!(record.bathrooms, Some(2.0));
    }

    #[test]
    fn converts_square_feet_to_square_meters() {
        let input = listing(None).to_property_input("Austin", "Texas").unwrap();
        assert!((input.living_area.unwrap() - 185.806_08).abs() < 1e-9);
        assert!((input.land_area.unwrap() - 464.515_2).abs() < 1e-9);
        assert_eq!(input.city.as_deref(), Some("Austin"));
        assert_eq!(input.state.as_deref(), Some("Texas"));
    }

    #[test]
    fn empty_sold_date_means_not_sold() {
        let input = listing(Some("")).to_property_input("Austin", "Texas").unwrap();
        assert_eq!(input.sold, Some(false));
        assert_eq!(input.prev_sold_date, None);

        let input = listing(None).to_property_input("Austin", "Texas").unwrap();
        assert_eq!(input.sold, Some(false));
    }

    #[test]
    fn sold_date_is_parsed() {
        let input = listing(Some("2021-09-24"))
            .to_property_input("Austin", "Texas")
            .unwrap();
        assert_eq!(input.sold, Some(true));
        assert_eq!(input.prev_sold_date, NaiveDate::from_ymd_opt(2021, 9, 24));
    }

    #[test]
    fn malformed_sold_date_is_rejected() {
        let err = listing(Some("09/24/2021"))
            .to_property_input("Austin", "Texas")
            .unwrap_err();
        assert!(matches!(
            err,
            ListingError::InvalidField {
                field: "dateSoldString",
                ..
            }
        ));
    }

    #[test]
    fn missing_lot_size_is_reported() {
        let record = ListingRecord::from_value(serde_json::json!({
            "livingArea": 1200,
            "bedrooms": 2,
            "bathrooms": 1,
            "dateSoldString": ""
        }))
        .unwrap();
        assert!(matches!(
            record.to_property_input("Austin", "Texas"),
            Err(ListingError::MissingField("lotSize"))
        ));
    }

    #[test]
    fn non_object_body_is_a_parse_error() {
        assert!(matches!(
            ListingRecord::from_value(serde_json::json!(["not", "a", "listing"])),
            Err(ListingError::Parse(_))
        ));
    }

    #[test]
    fn formats_address() {
        assert_eq!(
            format_address(" 1600 Main St ", "Austin", "Texas"),
            "1600 Main St Austin Texas"
        );
    }
}
