//! Favorite-movies service: registration and login issuing stateless
//! session tokens, a bearer-protected per-user movie list, and a client
//! that keeps the token in local storage.

pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod movies;
pub mod state;

pub use app::build_app;
pub use config::{AppConfig, AppMode};
pub use error::AppError;
pub use state::AppState;
