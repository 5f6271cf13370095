//! scrollterm - Main Entry Point
//!
//! Loads configuration, sets up file logging and runs the full-screen
//! console until the user exits.

use std::process;

use scrollterm::cli::{ConsoleApp, ConsoleConfig};
use scrollterm::logging::init_logging;

#[tokio::main]
async fn main() {
    let config = match ConsoleConfig::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            eprintln!("Fix or remove the configuration file and try again.");
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("WARNING: {}", e);
        eprintln!("Continuing without logging...");
    }

    let result = match ConsoleApp::new(config) {
        Ok(mut app) => app.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("\nERROR: scrollterm encountered an error: {}", e);
        eprintln!("Please check your terminal compatibility and try again.");
        process::exit(1);
    }
}
