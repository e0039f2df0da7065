use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateBody {
    pub username: String,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> ApiResult<(StatusCode, &'static str)> {
    if body.username.trim().is_empty() {
        return Err(ApiError::BadRequest("Invalid username.".into()));
    }
    state.registry.create(&body.username)?;
    Ok((StatusCode::CREATED, "Archivist created."))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameBody {
    pub username: String,
    pub new_username: String,
}

pub async fn rename(
    State(state): State<AppState>,
    Json(body): Json<RenameBody>,
) -> ApiResult<&'static str> {
    if body.new_username.trim().is_empty() {
        return Err(ApiError::BadRequest("Invalid new username.".into()));
    }
    state.registry.rename(&body.username, &body.new_username)?;
    Ok("Archivist renamed.")
}

#[derive(Deserialize)]
pub struct BioBody {
    pub username: String,
    pub bio: String,
}

pub async fn update_bio(
    State(state): State<AppState>,
    Json(body): Json<BioBody>,
) -> ApiResult<&'static str> {
    state.registry.update_bio(&body.username, &body.bio)?;
    Ok("Bio updated.")
}

#[derive(Deserialize)]
pub struct DeleteBody {
    pub username: String,
}

pub async fn delete(
    State(state): State<AppState>,
    Json(body): Json<DeleteBody>,
) -> ApiResult<&'static str> {
    state.registry.delete(&body.username)?;
    Ok("Archivist deleted.")
}
