#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property input, validated record and model feature vector types.
//!
//! A request moves through three shapes:
//!
//! 1. [`PropertyInput`]: the raw, possibly incomplete payload as received
//!    from a client or mapped from a provider listing.
//! 2. [`PropertyRecord`]: a validated record with display-normalized names.
//! 3. [`FeatureVector`]: the numeric model input, built by the encoder.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A property field that a validation error can be attributed to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PropertyField {
    State,
    City,
    Beds,
    Baths,
    LivingArea,
    LandArea,
    Sold,
    PrevSoldDate,
}

/// Raw property details before validation.
///
/// Every field is optional so that missing values surface as field-level
/// validation errors instead of opaque deserialization failures. Counts are
/// kept as `f64` so fractional values (e.g. `2.5` baths from a listing) can
/// be rejected with a precise message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    /// State name, e.g. `"Texas"`.
    pub state: Option<String>,
    /// City name, e.g. `"Austin"`.
    pub city: Option<String>,
    /// Number of bedrooms.
    pub beds: Option<f64>,
    /// Number of bathrooms.
    pub baths: Option<f64>,
    /// Living area in square meters.
    #[serde(alias = "livingArea")]
    pub living_area: Option<f64>,
    /// Total land area in square meters.
    #[serde(alias = "landArea")]
    pub land_area: Option<f64>,
    /// Whether the property has been sold before. Inferred from
    /// `prev_sold_date` when omitted.
    pub sold: Option<bool>,
    /// Date of the previous sale.
    #[serde(alias = "prevSoldDate")]
    pub prev_sold_date: Option<NaiveDate>,
}

/// A validated property.
///
/// The sold flag is not stored separately: a property is sold exactly when
/// it carries a previous sale date, which validation guarantees is not in
/// the future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Canonical state name (e.g. `"Texas"`).
    pub state: String,
    /// Title-cased city name (e.g. `"Austin"`).
    pub city: String,
    /// Number of bedrooms (> 0).
    pub beds: u32,
    /// Number of bathrooms (> 0).
    pub baths: u32,
    /// Living area in square meters (> 0).
    pub living_area: f64,
    /// Land area in square meters (> 0).
    pub land_area: f64,
    /// Date of the previous sale, present iff the property was sold.
    pub prev_sold_date: Option<NaiveDate>,
}

impl PropertyRecord {
    /// Whether the property has a recorded previous sale.
    #[must_use]
    pub const fn sold(&self) -> bool {
        self.prev_sold_date.is_some()
    }
}

/// The numeric input consumed by the price model.
///
/// Fields are named so that nothing outside [`FeatureVector::to_array`]
/// depends on the positional order the model was trained with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub beds: f64,
    pub baths: f64,
    /// Square meters.
    pub living_area: f64,
    /// Square meters.
    pub land_area: f64,
    pub years_since_last_sold: f64,
    pub state_encoded: f64,
    pub city_encoded: f64,
}

impl FeatureVector {
    /// Number of model features.
    pub const LEN: usize = 7;

    /// Feature names in model order.
    pub const NAMES: [&'static str; Self::LEN] = [
        "beds",
        "baths",
        "living_area",
        "land_area",
        "years_since_last_sold",
        "state_encoded",
        "city_encoded",
    ];

    /// Returns the features in model order: beds, baths, living area, land
    /// area, years since last sold, state encoding, city encoding.
    #[must_use]
    pub const fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.beds,
            self.baths,
            self.living_area,
            self.land_area,
            self.years_since_last_sold,
            self.state_encoded,
            self.city_encoded,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_array_order() {
        let features = FeatureVector {
            beds: 1.0,
            baths: 2.0,
            living_area: 3.0,
            land_area: 4.0,
            years_since_last_sold: 5.0,
            state_encoded: 6.0,
            city_encoded: 7.0,
        };
        assert_eq!(features.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn sold_follows_sale_date() {
        let mut record = PropertyRecord {
            state: "Texas".to_string(),
            city: "Austin".to_string(),
            beds: 3,
            baths: 2,
            living_area: 150.0,
            land_area: 400.0,
            prev_sold_date: None,
        };
        assert!(!record.sold());
        record.prev_sold_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert!(record.sold());
    }

    #[test]
    fn field_names_are_snake_case() {
        assert_eq!(PropertyField::LivingArea.to_string(), "living_area");
        assert_eq!(PropertyField::PrevSoldDate.as_ref(), "prev_sold_date");
        assert_eq!(
            "land_area".parse::<PropertyField>().ok(),
            Some(PropertyField::LandArea)
        );
    }

    #[test]
    fn input_accepts_camel_case_aliases() {
        let input: PropertyInput = serde_json::from_value(serde_json::json!({
            "state": "Texas",
            "city": "Austin",
            "beds": 3,
            "baths": 2,
            "livingArea": 150.0,
            "landArea": 400.0,
            "prevSoldDate": "2020-05-01"
        }))
        .unwrap();
        assert_eq!(input.living_area, Some(150.0));
        assert_eq!(input.land_area, Some(400.0));
        assert_eq!(input.prev_sold_date, NaiveDate::from_ymd_opt(2020, 5, 1));
        assert_eq!(input.sold, None);
    }
}
