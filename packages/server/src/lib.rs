#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for house price predictions.
//!
//! Serves `POST /predict` for a directly submitted property and
//! `GET /predict/{street}/{city}/{state}` for a property looked up by
//! address. Both answer with the predicted price plus choropleth, bar and
//! line chart data for the frontend.
//!
//! The encoding table and the price model are loaded once at startup and
//! shared read-only by every worker.

mod handlers;
pub mod interactive;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use house_price_encoding::{EncodingError, EncodingTable};
use house_price_listing::zillow::ZillowClient;
use house_price_listing::{ListingError, ListingProvider};
use house_price_model::{LinearRegression, ModelError, PricePredictor};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_ENCODING_TABLE_PATH: &str = "model/state_city_encoded_values.json";
const DEFAULT_MODEL_PATH: &str = "model/linear_regression_model.json";

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The encoding table could not be loaded.
    #[error("Failed to load encoding table: {0}")]
    Encoding(#[from] EncodingError),

    /// The price model could not be loaded.
    #[error("Failed to load price model: {0}")]
    Model(#[from] ModelError),

    /// The listing client could not be built.
    #[error("Failed to create listing client: {0}")]
    Listing(#[from] ListingError),

    /// The HTTP server failed to bind or crashed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Browser origin allowed by CORS (`ALLOWED_ORIGIN`).
    pub allowed_origin: String,
    /// Path of the state/city encoding table (`ENCODING_TABLE_PATH`).
    pub encoding_table_path: String,
    /// Path of the linear regression model (`MODEL_PATH`).
    pub model_path: String,
}

impl ServerConfig {
    /// Reads the configuration from environment variables, falling back to
    /// defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("PORT") {
            Some(p) => p.parse().unwrap_or_else(|_| {
                log::warn!("Invalid PORT '{p}', using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            bind_addr: var("BIND_ADDR", DEFAULT_BIND_ADDR),
            port,
            allowed_origin: var("ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN),
            encoding_table_path: var("ENCODING_TABLE_PATH", DEFAULT_ENCODING_TABLE_PATH),
            model_path: var("MODEL_PATH", DEFAULT_MODEL_PATH),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// State and city encodings the model was trained with.
    pub table: Arc<EncodingTable>,
    /// Price model.
    pub predictor: Arc<dyn PricePredictor>,
    /// Listing lookup for the address route.
    pub listings: Arc<dyn ListingProvider>,
}

/// Registers the API routes and the JSON body configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error))
        .route("/health", web::get().to(handlers::health))
        .route("/predict", web::post().to(handlers::predict))
        .route(
            "/predict/{street}/{city}/{state}",
            web::get().to(handlers::predict_address),
        );
}

/// Starts the house price API server.
///
/// Loads the encoding table and the price model, builds the listing
/// client and starts the Actix-Web HTTP server. The caller is responsible
/// for providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`StartupError`] if the encoding table or model cannot be
/// loaded, or if the HTTP server fails to bind or encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), StartupError> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env();

    log::info!("Loading encoding table from {}...", config.encoding_table_path);
    let table = EncodingTable::load(Path::new(&config.encoding_table_path))?;

    log::info!("Loading price model from {}...", config.model_path);
    let model = LinearRegression::load(Path::new(&config.model_path))?;

    let listings = ZillowClient::from_env()?;

    let state = web::Data::new(AppState {
        table: Arc::new(table),
        predictor: Arc::new(model),
        listings: Arc::new(listings),
    });

    let ServerConfig {
        bind_addr,
        port,
        allowed_origin,
        ..
    } = config;

    log::info!("Starting server on {bind_addr}:{port} (allowed origin: {allowed_origin})");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}
