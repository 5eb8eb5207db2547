#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Entry point for the house price API server.

use clap::Parser;
use house_price_server::StartupError;

#[derive(Parser)]
#[command(name = "house_price_server", about = "House price prediction API server")]
struct Cli {
    /// Prompt for bind address, port and allowed origin before starting
    #[arg(long)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    let cli = Cli::parse();

    if cli.interactive {
        house_price_server::interactive::run().await
    } else {
        house_price_server::run_server().await
    }
}
