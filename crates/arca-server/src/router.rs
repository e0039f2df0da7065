use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{archive, archivist, document, record};
use crate::state::AppState;

/// Build the axum router with all ARCA endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Archives
        .route("/archives", get(archive::list))
        .route("/archive", post(archive::create))
        .route("/archive/:archive", get(archive::get).delete(archive::delete))
        .route("/archive/:archive/rename", post(archive::rename))
        .route("/archive/:archive/description", post(archive::change_description))
        // Archivists
        .route("/archivist", post(archivist::create).delete(archivist::delete))
        .route("/archivist/rename", post(archivist::rename))
        .route("/archivist/bio", post(archivist::update_bio))
        // Documents
        .route("/document", post(document::upload))
        .route("/document/:archive/:hash/meta", get(document::get_meta))
        .route("/document/:archive/:hash/object", get(document::get_object))
        .route("/document/:archive/:hash/rename", post(document::rename))
        .route("/document/:archive/:hash", delete(document::delete))
        .route("/unsorted/:archive", get(document::get_unsorted))
        // Records
        .route("/record/:archive", post(record::create))
        .route("/record/:archive/:id", get(record::get).delete(record::delete))
        .route("/record/:archive/:id/document", post(record::add_document))
        .route(
            "/record/:archive/:id/document/:index",
            delete(record::remove_document),
        )
        .route("/record/:archive/:id/reorder", post(record::reorder))
        .route("/record/:archive/:id/tag", post(record::add_tag))
        .route("/record/:archive/:id/tag/:tag", delete(record::remove_tag))
        .route("/records/:archive", get(record::find))
        // Maintenance
        .route("/maintenance/reconcile/:archive", post(record::reconcile))
        .route("/maintenance/sweep", post(document::sweep_orphans))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
