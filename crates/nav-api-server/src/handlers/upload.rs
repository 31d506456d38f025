use crate::config::Settings;
use crate::utils::error::ApiError;
use axum::{
    extract::{Extension, Multipart},
    Json,
};
use serde::Serialize;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
}

/// Custom logo upload. The stored file gets a generated name; the returned
/// relative path goes into a card's `custom_logo_path` and is served back
/// under `/uploads`.
pub async fn upload_logo(
    Extension(settings): Extension<Settings>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let file_data = file_data.ok_or_else(|| ApiError::BadRequest("file required".to_string()))?;
    let filename = filename.ok_or_else(|| ApiError::BadRequest("filename required".to_string()))?;

    let max_bytes = settings.uploads.max_file_size_mb * 1024 * 1024;
    if file_data.len() > max_bytes {
        return Err(ApiError::BadRequest(format!(
            "file exceeds {} MB limit",
            settings.uploads.max_file_size_mb
        )));
    }

    let extension = Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| ApiError::BadRequest("file has no extension".to_string()))?;

    let mime = mime_guess::from_ext(&extension).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ApiError::BadRequest(format!(
            "only image uploads are accepted, got {}",
            mime
        )));
    }

    let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
    let dir = Path::new(&settings.uploads.dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::InternalError(format!("creating uploads dir: {}", e)))?;
    tokio::fs::write(dir.join(&stored_name), &file_data)
        .await
        .map_err(|e| ApiError::InternalError(format!("writing upload: {}", e)))?;

    info!("Stored logo upload '{}' as {}", filename, stored_name);
    Ok(Json(UploadResponse { path: stored_name }))
}
