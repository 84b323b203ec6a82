use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{dto::AddMovieRequest, repo_types::Movie};
use crate::{auth::extractors::AuthUser, error::AppError, state::AppState};

pub fn movie_routes() -> Router<AppState> {
    Router::new().route("/movies", get(list_movies).post(add_movie))
}

#[instrument(skip(state))]
pub async fn list_movies(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = state
        .movies
        .list_by_user(user_id)
        .await
        .map_err(|e| AppError::store("Failed to retrieve movies", e))?;
    Ok(Json(movies))
}

/// Append one entry and return the caller's full updated list.
#[instrument(skip(state, payload))]
pub async fn add_movie(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<AddMovieRequest>, JsonRejection>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let Json(payload) = payload?;
    let movie_name = payload.movie_name.as_deref().map(str::trim).unwrap_or_default();
    if movie_name.is_empty() {
        return Err(AppError::Validation("Movie name cannot be empty".into()));
    }

    let movie = state
        .movies
        .add(user_id, movie_name)
        .await
        .map_err(|e| AppError::store("Failed to add movie", e))?;
    info!(movie_id = %movie.id, "movie added");

    let movies = state
        .movies
        .list_by_user(user_id)
        .await
        .map_err(|e| AppError::store("Failed to retrieve movies", e))?;
    Ok(Json(movies))
}
