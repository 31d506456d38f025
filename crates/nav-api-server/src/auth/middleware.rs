use crate::auth::jwt::JwtManager;
use crate::utils::error::ApiError;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Auth middleware - every mutating route goes through here. Expects
/// `Authorization: Bearer <jwt>`; validated claims are stored in the request
/// extensions for handlers that need the caller identity.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let jwt_manager = request
        .extensions()
        .get::<Arc<JwtManager>>()
        .ok_or_else(|| ApiError::InternalError("JWT manager not configured".to_string()))?
        .clone();

    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = jwt_manager
        .validate_token(token)
        .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

    debug!("Authenticated request from user {}", claims.username);
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
