//! Authentication module
//!
//! JWT bearer authentication and the admin gate. Identity provisioning
//! (signup, email verification) lives outside this service; we only
//! verify credentials and claims.

mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};

use serde::{Deserialize, Serialize};

/// Authenticated caller, injected into request extensions by
/// [`require_auth`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User record key
    pub id: String,
    pub email: String,
    /// "user" or "admin"
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}
