//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{UserCreate, UserRecord};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($table) WHERE email = $email LIMIT 1")
            .bind(("table", TABLE))
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<UserRecord> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a user record (provisioning is normally external; this is
    /// used for the admin bootstrap and tests)
    pub async fn create(&self, data: UserCreate) -> RepoResult<UserRecord> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Validation(format!(
                "User '{}' already exists",
                data.email
            )));
        }
        let created: Option<UserRecord> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}
