use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tempfile::NamedTempFile;

use arca_catalog::{CatalogError, DocumentMeta};
use arca_types::ContentHash;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// One upload staged to disk, waiting for catalog ingestion.
struct StagedUpload {
    path: PathBuf,
    filename: String,
    mime_type: String,
    size: u64,
}

fn discard(staged: &[StagedUpload]) {
    for upload in staged {
        let _ = std::fs::remove_file(&upload.path);
    }
}

/// Multipart upload: text fields `archive` and `archivist`, one or more
/// `files` parts. Every part is staged to the upload directory first; the
/// staged files are deleted on any validation failure raised before the
/// catalog takes over. Files whose content already exists in the archive
/// are skipped; the response lists the hashes of all uploaded contents.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Vec<ContentHash>>)> {
    let mut archive: Option<String> = None;
    let mut archivist: Option<String> = None;
    let mut staged: Vec<StagedUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("archive") => {
                archive = Some(field.text().await.map_err(|e| {
                    discard(&staged);
                    ApiError::BadRequest(e.to_string())
                })?);
            }
            Some("archivist") => {
                archivist = Some(field.text().await.map_err(|e| {
                    discard(&staged);
                    ApiError::BadRequest(e.to_string())
                })?);
            }
            Some("files") => {
                let filename = field
                    .file_name()
                    .unwrap_or("unnamed")
                    .to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    discard(&staged);
                    ApiError::BadRequest(e.to_string())
                })?;

                let staging = stage_bytes(&state, &bytes).map_err(|e| {
                    discard(&staged);
                    e
                })?;
                staged.push(StagedUpload {
                    path: staging,
                    filename,
                    mime_type,
                    size: bytes.len() as u64,
                });
            }
            _ => {}
        }
    }

    if staged.is_empty() {
        return Err(ApiError::BadRequest("No file uploaded.".into()));
    }
    let Some(archive) = archive else {
        discard(&staged);
        return Err(ApiError::BadRequest("Invalid archive.".into()));
    };
    let Some(archivist) = archivist else {
        discard(&staged);
        return Err(ApiError::BadRequest("Invalid archivist.".into()));
    };

    // Hashing reads the staged files back; keep it off the async runtime.
    let catalog = Arc::clone(&state.catalog);
    let hashes = tokio::task::spawn_blocking(move || -> ApiResult<Vec<ContentHash>> {
        let mut hashes = Vec::new();
        for (position, upload) in staged.iter().enumerate() {
            match catalog.create(
                &archive,
                &archivist,
                &upload.filename,
                &upload.mime_type,
                upload.size,
                &upload.path,
            ) {
                Ok(meta) => hashes.push(meta.hash),
                // Duplicate content: the catalog already discarded the
                // staging file; the file is skipped.
                Err(CatalogError::DocumentAlreadyExists { .. }) => continue,
                Err(e) => {
                    discard(&staged[position + 1..]);
                    return Err(e.into());
                }
            }
        }
        Ok(hashes)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok((StatusCode::CREATED, Json(hashes)))
}

fn stage_bytes(state: &AppState, bytes: &[u8]) -> ApiResult<PathBuf> {
    let mut tmp = NamedTempFile::new_in(&state.upload_dir)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    tmp.write_all(bytes)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let (_, path) = tmp
        .keep()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(path)
}

pub async fn get_meta(
    State(state): State<AppState>,
    Path((archive, hash)): Path<(String, String)>,
) -> ApiResult<Json<DocumentMeta>> {
    let hash = ContentHash::from_hex(&hash)?;
    Ok(Json(state.catalog.get_meta(&archive, &hash)?))
}

pub async fn get_object(
    State(state): State<AppState>,
    Path((archive, hash)): Path<(String, String)>,
) -> ApiResult<Response> {
    let hash = ContentHash::from_hex(&hash)?;
    let meta = state.catalog.get_meta(&archive, &hash)?;
    let bytes = state.catalog.get_object_bytes(&hash)?;
    Ok(([(header::CONTENT_TYPE, meta.file_type)], bytes).into_response())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameBody {
    pub new_name: String,
    pub archivist: String,
}

pub async fn rename(
    State(state): State<AppState>,
    Path((archive, hash)): Path<(String, String)>,
    Json(body): Json<RenameBody>,
) -> ApiResult<&'static str> {
    if body.new_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Invalid new name.".into()));
    }
    let hash = ContentHash::from_hex(&hash)?;
    state
        .catalog
        .rename(&archive, &hash, &body.new_name, &body.archivist)?;
    Ok("Document renamed.")
}

#[derive(Deserialize)]
pub struct DeleteBody {
    pub archivist: String,
}

pub async fn delete(
    State(state): State<AppState>,
    Path((archive, hash)): Path<(String, String)>,
    Json(body): Json<DeleteBody>,
) -> ApiResult<&'static str> {
    let hash = ContentHash::from_hex(&hash)?;
    state.catalog.delete(&archive, &hash, &body.archivist)?;
    Ok("Document deleted.")
}

pub async fn get_unsorted(
    State(state): State<AppState>,
    Path(archive): Path<String>,
) -> ApiResult<Json<Vec<ContentHash>>> {
    Ok(Json(state.catalog.get_unsorted(&archive)?))
}

pub async fn sweep_orphans(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ContentHash>>> {
    Ok(Json(state.catalog.sweep_orphans()?))
}
