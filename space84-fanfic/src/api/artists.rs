//! Artist catalog, record and fanfic endpoints
//!
//! Store calls read files synchronously, so they run on the blocking pool.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use space84_common::ArtistCatalog;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::fanfic::{self, FanficResult};
use crate::store::ArtistDocument;
use crate::AppState;

/// GET /api/artists
///
/// Lists every readable artist. 404 when the backing directory is missing.
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<ArtistCatalog>> {
    let store = state.store.clone();
    let summaries = tokio::task::spawn_blocking(move || store.list()).await??;

    debug!("Listing {} artists", summaries.len());
    Ok(Json(ArtistCatalog::from(summaries)))
}

/// GET /api/artists/:slug
///
/// Returns the artist document as the backend shapes it.
pub async fn get_artist(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let document = load_document(&state, slug).await?;
    Ok(Json(document.raw))
}

/// GET /api/artists/:slug/fanfic
pub async fn get_artist_fanfic(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<FanficResult>> {
    let document = load_document(&state, slug).await?;
    let result = fanfic::synthesize(&document.record);

    info!(
        "Generated fanfic '{}' for {}",
        result.title, document.record.slug
    );
    Ok(Json(result))
}

async fn load_document(state: &AppState, slug: String) -> ApiResult<ArtistDocument> {
    let store = state.store.clone();
    let document = tokio::task::spawn_blocking(move || store.load(&slug)).await??;
    Ok(document)
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/api/artists", get(list_artists))
        .route("/api/artists/:slug", get(get_artist))
        .route("/api/artists/:slug/fanfic", get(get_artist_fanfic))
}
