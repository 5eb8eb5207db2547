#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Price prediction orchestration and chart data generators.
//!
//! [`predict`] is the single entry point used by both API routes: it
//! validates raw input, encodes it, predicts the base price and builds the
//! three chart series. The encoding table and the model are borrowed
//! read-only, so any number of requests can run it concurrently.

pub mod charts;

use chrono::NaiveDate;
use house_price_encoding::{EncodingError, EncodingTable};
use house_price_geography_models::states::US_STATES;
use house_price_model::PricePredictor;
use house_price_prediction_models::PredictionResult;
use house_price_property::encode::{encode, years_since_last_sold};
use house_price_property::validate::validate;
use house_price_property::ValidationError;
use house_price_property_models::{PropertyInput, PropertyRecord};
use thiserror::Error;

/// A failure after validation, tagged with the step that failed.
#[derive(Debug, Error)]
pub enum ComputeError {
    /// The property could not be turned into model features.
    #[error("Failed to encode property: {0}")]
    Encode(#[source] EncodingError),

    /// The per-state series could not be built.
    #[error("Failed to build choropleth chart data: {0}")]
    Choropleth(#[source] EncodingError),

    /// The per-city series could not be built.
    #[error("Failed to build bar chart data: {0}")]
    BarChart(#[source] EncodingError),
}

/// Errors from [`predict`].
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The input is invalid; the caller can correct it.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The input is valid but the prediction could not be computed.
    #[error(transparent)]
    Compute(#[from] ComputeError),
}

/// Validates `input` and computes the full prediction result.
///
/// The result is all or nothing: if any reference state is missing from
/// `table`, the whole prediction fails, including the base price and the
/// bar and line charts. The table load warns about missing states up
/// front, so an incomplete table is visible before the first request.
///
/// # Errors
///
/// Returns [`PredictionError::Invalid`] if the input fails validation, or
/// [`PredictionError::Compute`] if the encoding table lacks an entry the
/// computation needs.
pub fn predict(
    input: &PropertyInput,
    table: &EncodingTable,
    predictor: &dyn PricePredictor,
    today: NaiveDate,
) -> Result<PredictionResult, PredictionError> {
    let record = validate(input, today)?;
    Ok(compute_result(record, table, predictor, today)?)
}

/// Computes the base prediction and all chart series for a validated
/// record. Any failing step fails the whole result.
///
/// # Errors
///
/// Returns [`ComputeError`] naming the step whose encoding lookup failed.
pub fn compute_result(
    record: PropertyRecord,
    table: &EncodingTable,
    predictor: &dyn PricePredictor,
    today: NaiveDate,
) -> Result<PredictionResult, ComputeError> {
    let features = encode(&record, table, today).map_err(ComputeError::Encode)?;
    let prediction = predictor.predict_price(&features);

    let choropleth = charts::choropleth_series(&features, US_STATES, table, predictor)
        .map_err(ComputeError::Choropleth)?;
    let bar = charts::bar_series(&features, &record.state, &record.city, table, predictor)
        .map_err(ComputeError::BarChart)?;
    let line = charts::line_series(&features, predictor);

    log::debug!(
        "Predicted {prediction} for {}, {} ({} states, {} cities)",
        record.city,
        record.state,
        choropleth.len(),
        bar.len()
    );

    Ok(PredictionResult {
        prediction,
        years_since_last_sold: years_since_last_sold(record.prev_sold_date, today),
        record,
        choropleth,
        bar,
        line,
    })
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use chrono::Days;
    use house_price_model::LinearRegression;
    use house_price_property_models::FeatureVector;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// A table with every reference state, where only Texas lists cities.
    fn full_table() -> EncodingTable {
        let mut json = String::from("{");
        for (i, state) in US_STATES.iter().enumerate() {
            if i > 0 {
                json.push(',');
            }
            let value = 100_000 + i * 10_000;
            if *state == "Texas" {
                write!(
                    json,
                    r#""texas": {{"encoded_value": {value}, "cities": {{
                        "houston": {{"encoded_value": 280000}},
                        "austin": {{"encoded_value": 480000}}
                    }}}}"#
                )
                .unwrap();
            } else {
                write!(
                    json,
                    r#""{}": {{"encoded_value": {value}, "cities": {{}}}}"#,
                    state.to_lowercase()
                )
                .unwrap();
            }
        }
        json.push('}');
        EncodingTable::from_json_str(&json).unwrap()
    }

    fn model() -> LinearRegression {
        LinearRegression::new([5000.0, 8000.0, 900.0, 20.0, -500.0, 0.4, 0.6], 10_000.0).unwrap()
    }

    fn austin_input() -> PropertyInput {
        PropertyInput {
            state: Some("Texas".to_string()),
            city: Some("Austin".to_string()),
            beds: Some(3.0),
            baths: Some(2.0),
            living_area: Some(150.0),
            land_area: Some(400.0),
            sold: Some(true),
            prev_sold_date: today().checked_sub_days(Days::new(2 * 365)),
        }
    }

    #[test]
    fn austin_end_to_end() {
        let result = predict(&austin_input(), &full_table(), &model(), today()).unwrap();

        assert!(result.prediction > 0);
        assert_eq!(result.years_since_last_sold, 2);
        assert_eq!(result.record.city, "Austin");

        assert_eq!(result.choropleth.len(), US_STATES.len());
        for (entry, state) in result.choropleth.iter().zip(US_STATES) {
            assert_eq!(entry.state, *state);
        }

        assert!(result.bar.iter().any(|c| c.city == "Austin"));
        assert_eq!(result.bar.len(), 2);

        assert_eq!(result.line.living_area_prices.len(), 11);
        assert_eq!(result.line.land_area_prices.len(), 11);
        assert_eq!(result.line.living_area_prices[5].living_area, 150);
        assert_eq!(result.line.living_area_prices[5].price, result.prediction);
        assert_eq!(result.line.land_area_prices[5].land_area, 400);
    }

    #[test]
    fn base_prediction_uses_own_encodings() {
        let table = full_table();
        let result = predict(&austin_input(), &table, &model(), today()).unwrap();
        let texas = result
            .choropleth
            .iter()
            .find(|s| s.state == "Texas")
            .unwrap();
        assert_eq!(texas.price, result.prediction);

        let features = FeatureVector {
            beds: 3.0,
            baths: 2.0,
            living_area: 150.0,
            land_area: 400.0,
            years_since_last_sold: 2.0,
            state_encoded: table.state_encoding("Texas").unwrap(),
            city_encoded: 480_000.0,
        };
        assert_eq!(result.prediction, model().predict_price(&features));
    }

    #[test]
    fn unlisted_city_is_appended_to_bar_chart() {
        let input = PropertyInput {
            city: Some("round rock".to_string()),
            ..austin_input()
        };
        let result = predict(&input, &full_table(), &model(), today()).unwrap();
        assert_eq!(result.record.city, "Round Rock");
        assert_eq!(result.bar.len(), 3);
        assert_eq!(result.bar[2].city, "Round Rock");
        assert_eq!(result.bar[2].price, result.prediction);
    }

    #[test]
    fn invalid_input_is_reported_as_invalid() {
        let input = PropertyInput {
            state: Some("Atlantis".to_string()),
            ..austin_input()
        };
        assert!(matches!(
            predict(&input, &full_table(), &model(), today()),
            Err(PredictionError::Invalid(_))
        ));
    }

    #[test]
    fn incomplete_table_fails_choropleth() {
        let table = EncodingTable::from_json_str(
            r#"{"texas": {"encoded_value": 300000, "cities": {}}}"#,
        )
        .unwrap();
        let err = predict(&austin_input(), &table, &model(), today()).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Compute(ComputeError::Choropleth(EncodingError::UnknownState(_)))
        ));
    }

    #[test]
    fn one_missing_reference_state_fails_whole_result() {
        let table = full_table();
        let mut json = String::from("{");
        for (i, state) in US_STATES.iter().filter(|s| **s != "Wyoming").enumerate() {
            if i > 0 {
                json.push(',');
            }
            let entry = table.state(state).unwrap();
            write!(
                json,
                r#""{}": {{"encoded_value": {}, "cities": {{"#,
                state.to_lowercase(),
                entry.encoded_value
            )
            .unwrap();
            for (j, city) in entry.cities().iter().enumerate() {
                if j > 0 {
                    json.push(',');
                }
                write!(
                    json,
                    r#""{}": {{"encoded_value": {}}}"#,
                    city.name, city.encoded_value
                )
                .unwrap();
            }
            json.push_str("}}");
        }
        json.push('}');
        let partial = EncodingTable::from_json_str(&json).unwrap();
        assert_eq!(partial.missing_states(US_STATES), ["Wyoming"]);

        let err = predict(&austin_input(), &partial, &model(), today()).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Compute(ComputeError::Choropleth(EncodingError::UnknownState(s)))
                if s == "Wyoming"
        ));
    }

    #[test]
    fn state_missing_from_table_fails_encoding() {
        let table = EncodingTable::from_json_str(r#"{"ohio": {"encoded_value": 1}}"#).unwrap();
        let err = predict(&austin_input(), &table, &model(), today()).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Compute(ComputeError::Encode(EncodingError::UnknownState(_)))
        ));
    }
}
