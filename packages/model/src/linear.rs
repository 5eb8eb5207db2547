//! Ordinary least squares linear regression.
//!
//! The model is exported from the training pipeline as JSON:
//!
//! ```json
//! {
//!   "feature_names": ["beds", "baths", "living_area", "land_area",
//!                     "years_since_last_sold", "state_encoded", "city_encoded"],
//!   "coefficients": [1500.0, 9000.0, 1200.0, 2.5, -800.0, 0.7, 0.3],
//!   "intercept": -25000.0
//! }
//! ```
//!
//! `feature_names` is optional. When present it must match the service's
//! feature order exactly.

use std::path::Path;

use house_price_property_models::FeatureVector;
use serde::Deserialize;

use crate::{ModelError, PricePredictor};

#[derive(Debug, Deserialize)]
struct LinearRegressionFile {
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// A fitted linear regression over the seven property features.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    coefficients: [f64; FeatureVector::LEN],
    intercept: f64,
}

impl LinearRegression {
    /// Creates a model from coefficients in feature order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NonFinite`] if any parameter is NaN or infinite.
    pub fn new(coefficients: [f64; FeatureVector::LEN], intercept: f64) -> Result<Self, ModelError> {
        for (name, value) in FeatureVector::NAMES.iter().zip(coefficients) {
            if !value.is_finite() {
                return Err(ModelError::NonFinite((*name).to_string()));
            }
        }
        if !intercept.is_finite() {
            return Err(ModelError::NonFinite("intercept".to_string()));
        }

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    /// Reads and validates a model file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the file cannot be read or parsed, or if
    /// its parameters do not fit the service's feature vector.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded linear regression model from {} (intercept {})",
            path.display(),
            model.intercept
        );
        Ok(model)
    }

    /// Parses and validates a model document.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the document is malformed or its
    /// parameters do not fit the service's feature vector.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let file: LinearRegressionFile = serde_json::from_str(json)?;

        if let Some(found) = file.feature_names {
            if found.iter().map(String::as_str).ne(FeatureVector::NAMES) {
                return Err(ModelError::FeatureOrder {
                    expected: FeatureVector::NAMES.iter().map(ToString::to_string).collect(),
                    found,
                });
            }
        }

        let found = file.coefficients.len();
        let coefficients: [f64; FeatureVector::LEN] = file
            .coefficients
            .try_into()
            .map_err(|_| ModelError::CoefficientCount {
                expected: FeatureVector::LEN,
                found,
            })?;

        Self::new(coefficients, file.intercept)
    }

    /// Coefficients in feature order.
    #[must_use]
    pub const fn coefficients(&self) -> &[f64; FeatureVector::LEN] {
        &self.coefficients
    }

    /// Intercept term.
    #[must_use]
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl PricePredictor for LinearRegression {
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.to_array())
            .fold(self.intercept, |acc, (coef, x)| coef.mul_add(x, acc))
    }
}
