use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::AppState;
use crate::auth::jwt::Claims;
use crate::error::AppError;

/// Extractor for endpoints restricted to the admin role.
///
/// Verifies the bearer token (signature, issuer, expiry) and requires the
/// configured admin role among the token's `roles`. A missing or invalid
/// token rejects with 401; a valid token without the role rejects with
/// 403.
///
/// Usage:
/// ```ignore
/// async fn protected_handler(
///     AdminClaims(claims): AdminClaims,
/// ) -> Result<StatusCode, AppError> {
///     // only admins get here
/// }
/// ```
pub struct AdminClaims(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AdminClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("missing or invalid Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("missing or invalid Authorization header"))?;

        let claims = state
            .auth
            .verifier
            .verify(token)
            .map_err(|err| AppError::unauthorized(format!("invalid token: {err}")))?;

        if !claims.roles.iter().any(|role| role == &state.auth.admin_role) {
            return Err(AppError::forbidden("forbidden: insufficient permissions"));
        }

        Ok(AdminClaims(claims))
    }
}
