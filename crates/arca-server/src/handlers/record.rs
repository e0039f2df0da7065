use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use arca_ledger::Record;
use arca_query::RecordQuery;
use arca_types::{ContentHash, RecordId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateBody {
    pub name: String,
    pub creator: String,
}

pub async fn create(
    State(state): State<AppState>,
    Path(archive): Path<String>,
    Json(body): Json<CreateBody>,
) -> ApiResult<(StatusCode, Json<Record>)> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Invalid name.".into()));
    }
    let record = state.ledger.create(&archive, &body.name, &body.creator)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get(
    State(state): State<AppState>,
    Path((archive, id)): Path<(String, String)>,
) -> ApiResult<Json<Record>> {
    let id = RecordId::parse(&id)?;
    Ok(Json(state.ledger.get(&archive, &id)?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((archive, id)): Path<(String, String)>,
) -> ApiResult<&'static str> {
    let id = RecordId::parse(&id)?;
    state.ledger.delete(&archive, &id)?;
    Ok("Record deleted.")
}

#[derive(Deserialize)]
pub struct AddDocumentBody {
    pub document: String,
    pub archivist: String,
}

pub async fn add_document(
    State(state): State<AppState>,
    Path((archive, id)): Path<(String, String)>,
    Json(body): Json<AddDocumentBody>,
) -> ApiResult<&'static str> {
    let id = RecordId::parse(&id)?;
    let hash = ContentHash::from_hex(&body.document)?;
    state.ledger.add_document(&archive, &id, hash, &body.archivist)?;
    Ok("Document added to record.")
}

#[derive(Deserialize)]
pub struct RemoveDocumentBody {
    pub archivist: String,
}

pub async fn remove_document(
    State(state): State<AppState>,
    Path((archive, id, index)): Path<(String, String, String)>,
    Json(body): Json<RemoveDocumentBody>,
) -> ApiResult<&'static str> {
    let id = RecordId::parse(&id)?;
    // Unsigned parse: negative or non-numeric indexes are malformed.
    let index: usize = index
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid index.".into()))?;
    state
        .ledger
        .remove_document_at(&archive, &id, index, &body.archivist)?;
    Ok("Document removed from record.")
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderBody {
    pub index: usize,
    pub new_index: usize,
    pub archivist: String,
}

pub async fn reorder(
    State(state): State<AppState>,
    Path((archive, id)): Path<(String, String)>,
    Json(body): Json<ReorderBody>,
) -> ApiResult<&'static str> {
    let id = RecordId::parse(&id)?;
    state
        .ledger
        .reorder(&archive, &id, body.index, body.new_index, &body.archivist)?;
    Ok("Documents reordered.")
}

#[derive(Deserialize)]
pub struct AddTagBody {
    pub tag: String,
    pub archivist: String,
}

pub async fn add_tag(
    State(state): State<AppState>,
    Path((archive, id)): Path<(String, String)>,
    Json(body): Json<AddTagBody>,
) -> ApiResult<&'static str> {
    if body.tag.trim().is_empty() {
        return Err(ApiError::BadRequest("Invalid tag.".into()));
    }
    let id = RecordId::parse(&id)?;
    state.ledger.add_tag(&archive, &id, &body.archivist, &body.tag)?;
    Ok("Tag added to record.")
}

#[derive(Deserialize)]
pub struct RemoveTagBody {
    pub archivist: String,
}

pub async fn remove_tag(
    State(state): State<AppState>,
    Path((archive, id, tag)): Path<(String, String, String)>,
    Json(body): Json<RemoveTagBody>,
) -> ApiResult<&'static str> {
    let id = RecordId::parse(&id)?;
    state.ledger.remove_tag(&archive, &id, &body.archivist, &tag)?;
    Ok("Tag removed from record.")
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindParams {
    pub name: Option<String>,
    pub include_tags: Option<String>,
    pub exclude_tags: Option<String>,
    pub filter_tags: Option<String>,
}

fn split_tags(raw: &Option<String>) -> Option<Vec<String>> {
    raw.as_ref()
        .map(|s| s.split(',').map(|tag| tag.to_string()).collect())
}

pub async fn find(
    State(state): State<AppState>,
    Path(archive): Path<String>,
    Query(params): Query<FindParams>,
) -> ApiResult<Json<Vec<Record>>> {
    let query = RecordQuery {
        name: params.name.clone(),
        include_tags: split_tags(&params.include_tags),
        exclude_tags: split_tags(&params.exclude_tags),
        filter_tags: split_tags(&params.filter_tags),
    };
    // The engine matches archive-wide state; scope the result here.
    let records = state
        .query
        .find(&archive, &query)?
        .into_iter()
        .filter(|record| record.archive == archive)
        .collect();
    Ok(Json(records))
}

pub async fn reconcile(
    State(state): State<AppState>,
    Path(archive): Path<String>,
) -> ApiResult<Json<u64>> {
    Ok(Json(state.ledger.reconcile_unsorted(&archive)?))
}
