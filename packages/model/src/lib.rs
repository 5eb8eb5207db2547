#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Price model interface and linear regression implementation.
//!
//! The model is trained offline. Everything downstream only depends on the
//! [`PricePredictor`] trait, so the chart generators and request handlers
//! can be exercised with a hand-written predictor in tests.

pub mod linear;

use house_price_property_models::FeatureVector;
use thiserror::Error;

pub use linear::LinearRegression;

/// Errors from loading a price model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model file could not be read.
    #[error("Failed to read model {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The model file is not valid JSON of the expected shape.
    #[error("Failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    /// The model does not have one coefficient per feature.
    #[error("Expected {expected} coefficients, found {found}")]
    CoefficientCount {
        /// Number of features the service produces.
        expected: usize,
        /// Number of coefficients in the file.
        found: usize,
    },

    /// The model was trained on features in a different order.
    #[error("Feature order mismatch: expected {expected:?}, found {found:?}")]
    FeatureOrder {
        /// Feature names in the order the service produces them.
        expected: Vec<String>,
        /// Feature names listed in the model file.
        found: Vec<String>,
    },

    /// A coefficient or the intercept is NaN or infinite.
    #[error("Model parameter '{0}' is not a finite number")]
    NonFinite(String),
}

/// A model that estimates a sale price from property features.
///
/// Implementations must be free of interior mutation: a single instance is
/// shared by every request handler.
pub trait PricePredictor: Send + Sync {
    /// Returns the raw model estimate for `features`.
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Returns the estimate as a whole-dollar price.
    fn predict_price(&self, features: &FeatureVector) -> u64 {
        to_price(self.predict(features))
    }
}

/// Converts a raw model estimate to a whole-dollar price.
///
/// The estimate is truncated toward zero. Negative and NaN estimates
/// become 0; estimates beyond `u64::MAX` saturate.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_price(prediction: f64) -> u64 {
    prediction.max(0.0).trunc() as u64
}
