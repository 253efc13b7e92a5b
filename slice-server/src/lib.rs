//! Slice Server - pizza ordering backend
//!
//! # Module structure
//!
//! ```text
//! slice-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT authentication, admin gate
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # embedded SurrealDB models and repositories
//! ├── payment/       # gateway client and signature verification
//! ├── inventory/     # consumption and low-stock alerts
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod inventory;
pub mod payment;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use crate::core::{setup_environment, Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub fn print_banner() {
    println!(
        r#"
   _____ __ _
  / ___// /(_)_____ ___
  \__ \/ // // ___// _ \
 ___/ / // // /__ /  __/
/____/_//_/ \___/ \___/
    "#
    );
}
