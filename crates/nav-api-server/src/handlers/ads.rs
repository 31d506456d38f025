use super::menus::{ChangedResponse, CreatedResponse, DeletedResponse};
use crate::database::{Ad, Repository};
use crate::utils::error::ApiError;
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AdRequest {
    pub position: String,
    pub img: String,
    pub url: Option<String>,
}

pub async fn list_ads(
    Extension(repository): Extension<Arc<Repository>>,
) -> Result<Json<Vec<Ad>>, ApiError> {
    let ads = repository.list_ads().await.map_err(ApiError::database)?;
    Ok(Json(ads))
}

pub async fn create_ad(
    Extension(repository): Extension<Arc<Repository>>,
    Json(request): Json<AdRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    if request.position.trim().is_empty() || request.img.trim().is_empty() {
        return Err(ApiError::BadRequest("position and img are required".to_string()));
    }

    let id = repository
        .create_ad(&request.position, &request.img, request.url.as_deref())
        .await
        .map_err(ApiError::database)?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn update_ad(
    Extension(repository): Extension<Arc<Repository>>,
    Path(id): Path<i64>,
    Json(request): Json<AdRequest>,
) -> Result<Json<ChangedResponse>, ApiError> {
    if request.position.trim().is_empty() || request.img.trim().is_empty() {
        return Err(ApiError::BadRequest("position and img are required".to_string()));
    }

    let changed = repository
        .update_ad(id, &request.position, &request.img, request.url.as_deref())
        .await
        .map_err(ApiError::database)?;
    if changed == 0 {
        return Err(ApiError::NotFound(format!("ad {}", id)));
    }

    Ok(Json(ChangedResponse { changed }))
}

pub async fn delete_ad(
    Extension(repository): Extension<Arc<Repository>>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = repository.delete_ad(id).await.map_err(ApiError::database)?;
    Ok(Json(DeletedResponse { deleted }))
}
