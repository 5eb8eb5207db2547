//! Chart data generators.
//!
//! Each generator starts from the request's feature vector, replaces the
//! dimension under test, and asks the model for a price once per value.
//! The base vector is taken by reference and copied per point, so the
//! generators share nothing mutable and can run in any order.

use house_price_encoding::{EncodingError, EncodingTable};
use house_price_geography_models::{lookup_key, title_case};
use house_price_model::PricePredictor;
use house_price_prediction_models::{
    CityPrice, LandAreaPrice, LineChartData, LivingAreaPrice, StatePrice,
};
use house_price_property_models::FeatureVector;

/// Percentages of the base area sampled by the line chart sweeps.
pub const AREA_SWEEP_PERCENTAGES: [u32; 11] = [50, 60, 70, 80, 90, 100, 110, 120, 130, 140, 150];

/// Predicts the price of the property in each of `states`.
///
/// Only the state encoding changes; the city encoding stays at the
/// request's value.
///
/// # Errors
///
/// Returns [`EncodingError::UnknownState`] if any state in `states` has no
/// entry in `table`.
pub fn choropleth_series(
    base: &FeatureVector,
    states: &[&str],
    table: &EncodingTable,
    predictor: &dyn PricePredictor,
) -> Result<Vec<StatePrice>, EncodingError> {
    states
        .iter()
        .map(|&state| {
            let features = FeatureVector {
                state_encoded: table.state_encoding(state)?,
                ..*base
            };
            Ok(StatePrice {
                state: state.to_string(),
                price: predictor.predict_price(&features),
            })
        })
        .collect()
}

/// Predicts the price of the property in each city the table lists under
/// `state`, in table order.
///
/// If `city` is not among them, one more entry for `city` is appended,
/// priced with the unchanged base vector (whose city encoding is the
/// state-level fallback).
///
/// # Errors
///
/// Returns [`EncodingError::UnknownState`] if `state` has no entry in
/// `table`.
pub fn bar_series(
    base: &FeatureVector,
    state: &str,
    city: &str,
    table: &EncodingTable,
    predictor: &dyn PricePredictor,
) -> Result<Vec<CityPrice>, EncodingError> {
    let cities = table.state(state)?.cities();
    let requested = lookup_key(city);

    let mut series = Vec::with_capacity(cities.len() + 1);
    let mut has_requested = false;

    for entry in cities {
        has_requested |= entry.name == requested;
        let features = FeatureVector {
            city_encoded: entry.encoded_value,
            ..*base
        };
        series.push(CityPrice {
            city: title_case(&entry.name),
            price: predictor.predict_price(&features),
        });
    }

    if !has_requested {
        log::debug!("City '{city}' is not in the encoding table for {state}; appending it");
        series.push(CityPrice {
            city: title_case(city.trim()),
            price: predictor.predict_price(base),
        });
    }

    Ok(series)
}

/// Sweeps living area and land area independently over
/// [`AREA_SWEEP_PERCENTAGES`] of their base values.
#[must_use]
pub fn line_series(base: &FeatureVector, predictor: &dyn PricePredictor) -> LineChartData {
    let living_area_prices = AREA_SWEEP_PERCENTAGES
        .iter()
        .map(|&pct| {
            let living_area = scale(base.living_area, pct);
            LivingAreaPrice {
                living_area: truncate_area(living_area),
                price: predictor.predict_price(&FeatureVector {
                    living_area,
                    ..*base
                }),
            }
        })
        .collect();

    let land_area_prices = AREA_SWEEP_PERCENTAGES
        .iter()
        .map(|&pct| {
            let land_area = scale(base.land_area, pct);
            LandAreaPrice {
                land_area: truncate_area(land_area),
                price: predictor.predict_price(&FeatureVector {
                    land_area,
                    ..*base
                }),
            }
        })
        .collect();

    LineChartData {
        living_area_prices,
        land_area_prices,
    }
}

fn scale(value: f64, pct: u32) -> f64 {
    value * f64::from(pct) / 100.0
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_area(area: f64) -> u64 {
    area.max(0.0).trunc() as u64
}
