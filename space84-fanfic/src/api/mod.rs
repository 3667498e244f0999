//! HTTP API handlers for space84-fanfic

pub mod artists;
pub mod health;

pub use artists::{artist_routes, get_artist, get_artist_fanfic, list_artists};
pub use health::{health_check, health_routes, service_info, welcome};
