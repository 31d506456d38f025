use super::menus::{ChangedResponse, CreatedResponse, DeletedResponse};
use crate::database::{CardView, NewCard, Repository};
use crate::utils::error::ApiError;
use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CardQuery {
    pub sub_menu_id: Option<i64>,
}

/// Cards of a menu, or of one of its sub-menus when `sub_menu_id` is given.
pub async fn get_cards(
    Extension(repository): Extension<Arc<Repository>>,
    Path(menu_id): Path<i64>,
    Query(query): Query<CardQuery>,
) -> Result<Json<Vec<CardView>>, ApiError> {
    let cards = match query.sub_menu_id {
        Some(sub_menu_id) => repository
            .cards_for_sub_menu(sub_menu_id)
            .await
            .map_err(ApiError::database)?,
        None => repository
            .cards_for_menu(menu_id)
            .await
            .map_err(ApiError::database)?,
    };

    Ok(Json(cards.into_iter().map(CardView::from_card).collect()))
}

/// A card attaches to exactly one of {menu, sub-menu}. The stored row keeps
/// only the id it attaches by; a sub-menu card reaches its menu through the
/// sub-menu's parent_id.
async fn validate_target(repository: &Repository, card: &mut NewCard) -> Result<(), ApiError> {
    if card.title.trim().is_empty() || card.url.trim().is_empty() {
        return Err(ApiError::BadRequest("title and url are required".to_string()));
    }

    match (card.menu_id, card.sub_menu_id) {
        (_, Some(sub_menu_id)) => {
            if !repository
                .sub_menu_exists(sub_menu_id)
                .await
                .map_err(ApiError::database)?
            {
                return Err(ApiError::BadRequest(format!(
                    "sub-menu {} does not exist",
                    sub_menu_id
                )));
            }
            card.menu_id = None;
        }
        (Some(menu_id), None) => {
            if !repository.menu_exists(menu_id).await.map_err(ApiError::database)? {
                return Err(ApiError::BadRequest(format!("menu {} does not exist", menu_id)));
            }
        }
        (None, None) => {
            return Err(ApiError::BadRequest(
                "either menu_id or sub_menu_id is required".to_string(),
            ));
        }
    }
    Ok(())
}

pub async fn create_card(
    Extension(repository): Extension<Arc<Repository>>,
    Json(mut request): Json<NewCard>,
) -> Result<Json<CreatedResponse>, ApiError> {
    validate_target(&repository, &mut request).await?;

    let id = repository.create_card(&request).await.map_err(ApiError::database)?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn update_card(
    Extension(repository): Extension<Arc<Repository>>,
    Path(id): Path<i64>,
    Json(mut request): Json<NewCard>,
) -> Result<Json<ChangedResponse>, ApiError> {
    validate_target(&repository, &mut request).await?;

    let changed = repository
        .update_card(id, &request)
        .await
        .map_err(ApiError::database)?;
    if changed == 0 {
        return Err(ApiError::NotFound(format!("card {}", id)));
    }

    Ok(Json(ChangedResponse { changed }))
}

pub async fn delete_card(
    Extension(repository): Extension<Arc<Repository>>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = repository.delete_card(id).await.map_err(ApiError::database)?;
    Ok(Json(DeletedResponse { deleted }))
}
