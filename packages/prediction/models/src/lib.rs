#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Prediction result and chart series types.
//!
//! Chart points serialize to the shapes the dashboard's D3 charts read:
//! `{state, price}`, `{city, price}`, `{living_area, price}` and
//! `{land_area, price}`.

use house_price_property_models::PropertyRecord;
use serde::{Deserialize, Serialize};

/// Predicted price of the property if it were in another state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePrice {
    /// Canonical state name.
    pub state: String,
    /// Whole-dollar price.
    pub price: u64,
}

/// Predicted price of the property if it were in another city of the same
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityPrice {
    /// Title-cased city name.
    pub city: String,
    /// Whole-dollar price.
    pub price: u64,
}

/// Predicted price at a scaled living area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivingAreaPrice {
    /// Living area in whole square meters.
    pub living_area: u64,
    /// Whole-dollar price.
    pub price: u64,
}

/// Predicted price at a scaled land area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandAreaPrice {
    /// Land area in whole square meters.
    pub land_area: u64,
    /// Whole-dollar price.
    pub price: u64,
}

/// The two independent area sweeps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LineChartData {
    /// Living area scaled from 50% to 150%, all else fixed.
    pub living_area_prices: Vec<LivingAreaPrice>,
    /// Land area scaled from 50% to 150%, all else fixed.
    pub land_area_prices: Vec<LandAreaPrice>,
}

/// Everything computed for one property.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Predicted price for the property as given.
    pub prediction: u64,
    /// The validated property.
    pub record: PropertyRecord,
    /// Whole years since the last sale (0 if never sold).
    pub years_since_last_sold: u32,
    /// One entry per reference state, in reference order.
    pub choropleth: Vec<StatePrice>,
    /// One entry per city in the property's state, plus the property's own
    /// city if the table does not list it.
    pub bar: Vec<CityPrice>,
    /// Area sweeps.
    pub line: LineChartData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_chart_serializes_with_chart_keys() {
        let data = LineChartData {
            living_area_prices: vec![LivingAreaPrice {
                living_area: 75,
                price: 100,
            }],
            land_area_prices: vec![LandAreaPrice {
                land_area: 200,
                price: 90,
            }],
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({
                "living-area-prices": [{"living_area": 75, "price": 100}],
                "land-area-prices": [{"land_area": 200, "price": 90}],
            })
        );
    }
}
