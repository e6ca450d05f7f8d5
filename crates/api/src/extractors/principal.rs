//! JWT authentication extractors.
//!
//! Validates the Bearer token in the Authorization header and normalizes
//! the claims into a `domain::models::Principal`. Token issuance lives in
//! the identity service; this layer only verifies.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::Principal;
use shared::jwt::{extract_user_id, JwtValidator};

/// Authenticated principal. Rejects the request with a 401 envelope when
/// the token is missing, malformed, expired, or not an access token.
#[derive(Debug, Clone, Copy)]
pub struct AuthPrincipal(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let principal = validate_principal(&state.jwt, token)?;
        Ok(AuthPrincipal(principal))
    }
}

/// Optional authentication for endpoints that serve anonymous callers too
/// (health). An invalid token is treated as absent, not rejected.
#[derive(Debug, Clone, Copy)]
pub struct OptionalPrincipal(pub Option<Principal>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = bearer_token(parts)
            .ok()
            .and_then(|token| validate_principal(&state.jwt, token).ok());
        Ok(OptionalPrincipal(principal))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized("Invalid Authorization header format".to_string())
    })
}

fn validate_principal(validator: &JwtValidator, token: &str) -> Result<Principal, ApiError> {
    let claims = validator
        .validate_access_token(token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    let user_id = extract_user_id(&claims)
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;

    Ok(Principal {
        user_id,
        role_level: claims.role_level,
    })
}
