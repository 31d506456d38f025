use super::menus::{ChangedResponse, CreatedResponse, DeletedResponse};
use crate::database::{Friend, Repository};
use crate::utils::error::ApiError;
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct FriendRequest {
    pub title: String,
    pub url: String,
    pub logo: Option<String>,
}

pub async fn list_friends(
    Extension(repository): Extension<Arc<Repository>>,
) -> Result<Json<Vec<Friend>>, ApiError> {
    let friends = repository.list_friends().await.map_err(ApiError::database)?;
    Ok(Json(friends))
}

pub async fn create_friend(
    Extension(repository): Extension<Arc<Repository>>,
    Json(request): Json<FriendRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    if request.title.trim().is_empty() || request.url.trim().is_empty() {
        return Err(ApiError::BadRequest("title and url are required".to_string()));
    }

    let id = repository
        .create_friend(&request.title, &request.url, request.logo.as_deref())
        .await
        .map_err(ApiError::database)?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn update_friend(
    Extension(repository): Extension<Arc<Repository>>,
    Path(id): Path<i64>,
    Json(request): Json<FriendRequest>,
) -> Result<Json<ChangedResponse>, ApiError> {
    if request.title.trim().is_empty() || request.url.trim().is_empty() {
        return Err(ApiError::BadRequest("title and url are required".to_string()));
    }

    let changed = repository
        .update_friend(id, &request.title, &request.url, request.logo.as_deref())
        .await
        .map_err(ApiError::database)?;
    if changed == 0 {
        return Err(ApiError::NotFound(format!("friend {}", id)));
    }

    Ok(Json(ChangedResponse { changed }))
}

pub async fn delete_friend(
    Extension(repository): Extension<Arc<Repository>>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = repository.delete_friend(id).await.map_err(ApiError::database)?;
    Ok(Json(DeletedResponse { deleted }))
}
