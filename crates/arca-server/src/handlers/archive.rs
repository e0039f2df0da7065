use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use arca_directory::Archive;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.directory.list()?))
}

#[derive(Deserialize)]
pub struct CreateBody {
    pub name: String,
    pub description: String,
    pub archivist: String,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> ApiResult<(StatusCode, &'static str)> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Invalid name.".into()));
    }
    state
        .directory
        .create(&body.name, &body.description, &body.archivist)?;
    Ok((StatusCode::CREATED, "Archive created."))
}

pub async fn get(
    State(state): State<AppState>,
    Path(archive): Path<String>,
) -> ApiResult<Json<Archive>> {
    Ok(Json(state.directory.get(&archive)?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameBody {
    pub new_name: String,
    pub archivist: String,
}

pub async fn rename(
    State(state): State<AppState>,
    Path(archive): Path<String>,
    Json(body): Json<RenameBody>,
) -> ApiResult<&'static str> {
    if body.new_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Invalid new name.".into()));
    }
    if archive == body.new_name {
        return Err(ApiError::BadRequest(
            "New name cannot be the same as the old name.".into(),
        ));
    }
    state.directory.rename(&archive, &body.new_name, &body.archivist)?;
    Ok("Archive renamed.")
}

#[derive(Deserialize)]
pub struct DescriptionBody {
    pub description: String,
    pub archivist: String,
}

pub async fn change_description(
    State(state): State<AppState>,
    Path(archive): Path<String>,
    Json(body): Json<DescriptionBody>,
) -> ApiResult<&'static str> {
    state
        .directory
        .change_description(&archive, &body.description, &body.archivist)?;
    Ok("Description changed.")
}

#[derive(Deserialize)]
pub struct DeleteBody {
    pub archivist: String,
}

pub async fn delete(
    State(state): State<AppState>,
    Path(archive): Path<String>,
    Json(body): Json<DeleteBody>,
) -> ApiResult<&'static str> {
    state.directory.delete(&archive, &body.archivist)?;
    Ok("Archive deleted.")
}
