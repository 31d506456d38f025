use crate::auth::{Claims, JwtManager};
use crate::database::Repository;
use crate::security::PasswordService;
use crate::utils::error::ApiError;
use axum::{
    extract::{ConnectInfo, Extension},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

pub async fn login(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Extension(repository): Extension<Arc<Repository>>,
    Extension(jwt_manager): Extension<Arc<JwtManager>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = repository
        .find_user_by_username(&request.username)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| {
            warn!("Login attempt for unknown user '{}'", request.username);
            ApiError::Unauthorized("invalid credentials".to_string())
        })?;

    let valid = PasswordService::verify(&request.password, &user.password)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    if !valid {
        warn!("Failed login for user '{}'", user.username);
        return Err(ApiError::Unauthorized("invalid credentials".to_string()));
    }

    repository
        .record_login(user.id, &Utc::now().to_rfc3339(), &addr.ip().to_string())
        .await
        .map_err(ApiError::database)?;

    let token = jwt_manager
        .generate_token(user.id, &user.username)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    info!("User '{}' logged in from {}", user.username, addr.ip());
    Ok(Json(LoginResponse {
        token,
        username: user.username,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordResponse {
    pub changed: u64,
}

pub async fn change_password(
    Extension(repository): Extension<Arc<Repository>>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<ChangePasswordResponse>, ApiError> {
    if request.new_password.len() < 6 {
        return Err(ApiError::BadRequest(
            "new password must be at least 6 characters".to_string(),
        ));
    }

    let user = repository
        .find_user_by_username(&claims.username)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::NotFound(format!("user '{}'", claims.username)))?;

    let valid = PasswordService::verify(&request.old_password, &user.password)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    if !valid {
        return Err(ApiError::Unauthorized("old password does not match".to_string()));
    }

    let hash = PasswordService::hash(&request.new_password)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    let changed = repository
        .update_password(user.id, &hash)
        .await
        .map_err(ApiError::database)?;

    info!("Password changed for user '{}'", user.username);
    Ok(Json(ChangePasswordResponse { changed }))
}
