//! User Model
//!
//! Identity is provisioned externally; this record only carries what
//! login and the admin order listing need.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: RecordId,
    pub email: String,
    /// Argon2 PHC string, never serialized into responses
    pub password_hash: String,
    /// "user" or "admin"
    pub role: String,
    #[serde(default)]
    pub verified: bool,
}

impl UserRecord {
    /// Verify a password against the stored argon2 hash
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Hash a password with argon2 and a fresh salt
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreate {
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub verified: bool,
}
