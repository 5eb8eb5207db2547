//! HTTP handler functions for the house price API.

use std::sync::Arc;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use house_price_listing::format_address;
use house_price_prediction::PredictionError;
use house_price_property_models::PropertyInput;
use house_price_server_models::{
    ApiError, ApiFieldError, ApiHealth, ApiPredictionResponse, ApiValidationError,
};

use crate::AppState;

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /predict`
///
/// Predicts the price of a directly submitted property.
pub async fn predict(state: web::Data<AppState>, body: web::Json<PropertyInput>) -> HttpResponse {
    prediction_response(&state, body.into_inner()).await
}

/// `GET /predict/{street}/{city}/{state}`
///
/// Looks up the listing for the address and predicts its price.
pub async fn predict_address(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> HttpResponse {
    let (street, city, state_name) = path.into_inner();
    let address = format_address(&street, &city, &state_name);

    let listing = match state.listings.fetch_by_address(&address).await {
        Ok(listing) => listing,
        Err(e) => {
            log::error!("Failed to fetch listing for '{address}': {e}");
            return internal_error();
        }
    };

    let input = match listing.to_property_input(&city, &state_name) {
        Ok(input) => input,
        Err(e) => {
            log::error!("Failed to read listing for '{address}': {e}");
            return internal_error();
        }
    };

    prediction_response(&state, input).await
}

/// Answers unparsable JSON bodies with 422 instead of actix's default 400.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {err}");
    let body = ApiValidationError {
        detail: vec![ApiFieldError {
            field: "body".to_string(),
            message: err.to_string(),
        }],
    };
    let response = HttpResponse::UnprocessableEntity().json(body);
    InternalError::from_response(err, response).into()
}

/// Runs the prediction on the blocking pool and maps the outcome to a
/// response.
async fn prediction_response(state: &AppState, input: PropertyInput) -> HttpResponse {
    let table = Arc::clone(&state.table);
    let predictor = Arc::clone(&state.predictor);
    let today = chrono::Local::now().date_naive();

    let outcome = web::block(move || {
        house_price_prediction::predict(&input, &table, predictor.as_ref(), today)
    })
    .await;

    match outcome {
        Ok(Ok(result)) => HttpResponse::Ok().json(ApiPredictionResponse::from(result)),
        Ok(Err(PredictionError::Invalid(e))) => {
            log::debug!("Rejected property: {e}");
            HttpResponse::UnprocessableEntity().json(ApiValidationError {
                detail: e
                    .errors
                    .iter()
                    .map(|err| ApiFieldError::for_field(err.field(), err.to_string()))
                    .collect(),
            })
        }
        Ok(Err(PredictionError::Compute(e))) => {
            log::error!("Failed to compute prediction: {e}");
            internal_error()
        }
        Err(e) => {
            log::error!("Failed to compute prediction: {e}");
            internal_error()
        }
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiError {
        error: "Internal server error".to_string(),
    })
}
