#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the house price server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the prediction result types to allow independent evolution of the
//! API contract. Response keys are kebab-case.

use chrono::NaiveDate;
use house_price_prediction_models::{CityPrice, LineChartData, PredictionResult, StatePrice};
use house_price_property_models::PropertyField;
use serde::{Deserialize, Serialize};

/// Body of a successful response from both prediction endpoints:
/// `{"result": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPredictionResponse {
    /// The prediction and its chart data.
    pub result: ApiPrediction,
}

impl From<PredictionResult> for ApiPredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            result: result.into(),
        }
    }
}

/// A price prediction with the data for its charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiPrediction {
    /// Predicted price in whole dollars.
    pub prediction: u64,
    /// Normalized echo of the property that was priced.
    pub property_details: ApiPropertyDetails,
    /// Price of the same property in every state.
    pub choropleth_chart_data: Vec<StatePrice>,
    /// Price of the same property in every known city of its state.
    pub bar_chart_data: Vec<CityPrice>,
    /// Price as living and land area vary.
    pub line_chart_data: LineChartData,
}

/// Normalized property details echoed back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiPropertyDetails {
    /// Canonical state name.
    pub state: String,
    /// Title-cased city name.
    pub city: String,
    /// Number of bedrooms.
    pub beds: u32,
    /// Number of bathrooms.
    pub baths: u32,
    /// Living area in square meters.
    pub living_area: f64,
    /// Land area in square meters.
    pub land_area: f64,
    /// Whether the property has been sold before.
    pub sold: bool,
    /// Date of the previous sale.
    pub prev_sold_date: Option<NaiveDate>,
    /// Whole years since the previous sale.
    pub years_since_last_sold: u32,
}

impl From<PredictionResult> for ApiPrediction {
    fn from(result: PredictionResult) -> Self {
        let record = result.record;
        Self {
            prediction: result.prediction,
            property_details: ApiPropertyDetails {
                sold: record.sold(),
                state: record.state,
                city: record.city,
                beds: record.beds,
                baths: record.baths,
                living_area: record.living_area,
                land_area: record.land_area,
                prev_sold_date: record.prev_sold_date,
                years_since_last_sold: result.years_since_last_sold,
            },
            choropleth_chart_data: result.choropleth,
            bar_chart_data: result.bar,
            line_chart_data: result.line,
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFieldError {
    /// Offending field (`snake_case`), or `"body"` for unparsable payloads.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ApiFieldError {
    /// Creates an error attributed to a property field.
    #[must_use]
    pub fn for_field(field: PropertyField, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

/// Body of a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiValidationError {
    /// Every validation failure found in the request.
    pub detail: Vec<ApiFieldError>,
}

/// Body of a generic error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Generic description; never contains internal details.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
