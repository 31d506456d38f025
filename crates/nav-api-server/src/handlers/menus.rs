use crate::database::{MenuTree, Repository};
use crate::utils::error::ApiError;
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct MenuRequest {
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct ChangedResponse {
    pub changed: u64,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

pub async fn list_menus(
    Extension(repository): Extension<Arc<Repository>>,
) -> Result<Json<Vec<MenuTree>>, ApiError> {
    let tree = repository.list_menu_tree().await.map_err(ApiError::database)?;
    Ok(Json(tree))
}

pub async fn create_menu(
    Extension(repository): Extension<Arc<Repository>>,
    Json(request): Json<MenuRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }

    let id = repository
        .create_menu(&request.name, request.order)
        .await
        .map_err(ApiError::database)?;
    info!("Created menu '{}' (id {})", request.name, id);

    Ok(Json(CreatedResponse { id }))
}

pub async fn update_menu(
    Extension(repository): Extension<Arc<Repository>>,
    Path(id): Path<i64>,
    Json(request): Json<MenuRequest>,
) -> Result<Json<ChangedResponse>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }

    let changed = repository
        .update_menu(id, &request.name, request.order)
        .await
        .map_err(ApiError::database)?;
    if changed == 0 {
        return Err(ApiError::NotFound(format!("menu {}", id)));
    }

    Ok(Json(ChangedResponse { changed }))
}

pub async fn delete_menu(
    Extension(repository): Extension<Arc<Repository>>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = repository.delete_menu(id).await.map_err(ApiError::database)?;
    Ok(Json(DeletedResponse { deleted }))
}

pub async fn create_sub_menu(
    Extension(repository): Extension<Arc<Repository>>,
    Path(parent_id): Path<i64>,
    Json(request): Json<MenuRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    if !repository.menu_exists(parent_id).await.map_err(ApiError::database)? {
        return Err(ApiError::BadRequest(format!(
            "parent menu {} does not exist",
            parent_id
        )));
    }

    let id = repository
        .create_sub_menu(parent_id, &request.name, request.order)
        .await
        .map_err(ApiError::database)?;

    Ok(Json(CreatedResponse { id }))
}

pub async fn update_sub_menu(
    Extension(repository): Extension<Arc<Repository>>,
    Path(id): Path<i64>,
    Json(request): Json<MenuRequest>,
) -> Result<Json<ChangedResponse>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }

    let changed = repository
        .update_sub_menu(id, &request.name, request.order)
        .await
        .map_err(ApiError::database)?;
    if changed == 0 {
        return Err(ApiError::NotFound(format!("sub-menu {}", id)));
    }

    Ok(Json(ChangedResponse { changed }))
}

pub async fn delete_sub_menu(
    Extension(repository): Extension<Arc<Repository>>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = repository
        .delete_sub_menu(id)
        .await
        .map_err(ApiError::database)?;
    Ok(Json(DeletedResponse { deleted }))
}
