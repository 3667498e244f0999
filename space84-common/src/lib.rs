//! # Space84 Common Library
//!
//! Shared code for the Space84 artist services:
//! - Error taxonomy shared by every backing store
//! - Configuration loading (CLI → ENV → TOML → defaults)
//! - The normalized artist data model

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{ArtistCatalog, ArtistRecord, ArtistSummary, VideoLink, YoutubeVideo};
