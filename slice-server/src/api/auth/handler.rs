//! Auth API Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub email: String,
}

/// POST /auth/login - exchange credentials for a bearer token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_email(&payload.email)
        .await
        .map_err(AppError::from)?
        .ok_or_else(AppError::invalid_credentials)?;

    let password_ok = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Corrupt password hash: {e}")))?;
    if !password_ok {
        tracing::warn!(target: "security", email = %payload.email, "Failed login attempt");
        return Err(AppError::invalid_credentials());
    }

    if !user.verified {
        return Err(AppError::forbidden("Account not verified"));
    }

    let token = state
        .jwt_service
        .generate_token(&user.id.key().to_string(), &user.email, &user.role)
        .map_err(|e| AppError::internal(e.to_string()))?;

    Ok(Json(LoginResponse {
        token,
        role: user.role,
        email: user.email,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use crate::core::state::testing::{test_state, NoopGateway};
    use crate::db::models::{UserCreate, UserRecord};
    use crate::inventory::LogNotifier;
    use axum::body::Body;
    use axum::Router;
    use http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn app_and_state() -> (Router, crate::core::ServerState) {
        let state = test_state(Arc::new(NoopGateway), Arc::new(LogNotifier)).await;
        let app = api::build_app(&state).with_state(state.clone());
        (app, state)
    }

    async fn seed_user(state: &crate::core::ServerState, email: &str, password: &str, verified: bool) {
        UserRepository::new(state.db.clone())
            .create(UserCreate {
                email: email.to_string(),
                password_hash: UserRecord::hash_password(password).unwrap(),
                role: "user".to_string(),
                verified,
            })
            .await
            .unwrap();
    }

    async fn post_login(app: &Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn login_round_trips_to_a_valid_token() {
        let (app, state) = app_and_state().await;
        seed_user(&state, "amy@test.com", "pa55word!", true).await;

        let (status, body) = post_login(
            &app,
            json!({"email": "amy@test.com", "password": "pa55word!"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "user");
        assert_eq!(body["email"], "amy@test.com");

        let claims = state
            .jwt_service
            .validate_token(body["token"].as_str().unwrap())
            .unwrap();
        assert_eq!(claims.email, "amy@test.com");
        assert_eq!(claims.role, "user");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_share_one_message() {
        let (app, state) = app_and_state().await;
        seed_user(&state, "amy@test.com", "pa55word!", true).await;

        let (status, body) = post_login(
            &app,
            json!({"email": "amy@test.com", "password": "nope"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email or password");

        let (status, body) = post_login(
            &app,
            json!({"email": "ghost@test.com", "password": "nope"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn unverified_accounts_cannot_login() {
        let (app, state) = app_and_state().await;
        seed_user(&state, "new@test.com", "pa55word!", false).await;

        let (status, _) = post_login(
            &app,
            json!({"email": "new@test.com", "password": "pa55word!"}),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
