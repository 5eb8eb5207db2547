//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port and allowed browser origin
//! before starting the server.

use dialoguer::{Confirm, Input};

use crate::{ServerConfig, StartupError};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Defaults come from the current environment. The answers are written
/// back to `BIND_ADDR`, `PORT` and `ALLOWED_ORIGIN` before delegating to
/// [`super::run_server`].
///
/// # Errors
///
/// Returns [`StartupError`] if the underlying server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run() -> Result<(), StartupError> {
    println!("House Price Server");
    println!();

    let defaults = ServerConfig::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or(defaults.bind_addr);

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let allowed_origin: String = Input::new()
        .with_prompt("Allowed origin")
        .default(defaults.allowed_origin.clone())
        .interact_text()
        .unwrap_or(defaults.allowed_origin);

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", port.to_string());
        std::env::set_var("ALLOWED_ORIGIN", &allowed_origin);
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
