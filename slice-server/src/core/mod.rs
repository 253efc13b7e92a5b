//! Core module - configuration, state and server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;

use crate::utils::init_logger_with_file;

/// Load the environment and initialize logging.
///
/// Called once at process start, before anything reads configuration.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; absence is not an error
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
