//! space84-fanfic library - artist metadata and fanfic service
//!
//! Serves per-artist metadata from a directory of JSON or Markdown files
//! and generates short template-based stories about each artist.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod fanfic;
pub mod markdown;
pub mod store;

pub use crate::error::{ApiError, ApiResult};
use crate::store::ArtistStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Backing store (read-only, no per-request state)
    pub store: Arc<dyn ArtistStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn ArtistStore>) -> Self {
        Self { store }
    }
}

/// Build application router
///
/// Public read-only data, so CORS mirrors any origin and allows credentials.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::artist_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
