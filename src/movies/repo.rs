use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::StoreError;
use crate::movies::repo_types::Movie;

/// Per-user movie list storage. Lists come back newest first.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Movie>, StoreError>;
    async fn add(&self, user_id: Uuid, movie_name: &str) -> Result<Movie, StoreError>;
}

#[derive(Clone)]
pub struct PgMovieStore {
    db: PgPool,
}

impl PgMovieStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Movie>, StoreError> {
        let rows = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, user_id, movie_name, created_at
            FROM movies
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn add(&self, user_id: Uuid, movie_name: &str) -> Result<Movie, StoreError> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (user_id, movie_name)
            VALUES ($1, $2)
            RETURNING id, user_id, movie_name, created_at
            "#,
        )
        .bind(user_id)
        .bind(movie_name)
        .fetch_one(&self.db)
        .await?;
        Ok(movie)
    }
}

pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use time::OffsetDateTime;

    #[derive(Default)]
    pub struct MemoryMovieStore {
        movies: Mutex<Vec<Movie>>, // insertion order
    }

    #[async_trait]
    impl MovieStore for MemoryMovieStore {
        async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Movie>, StoreError> {
            let movies = self
                .movies
                .lock()
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            Ok(movies
                .iter()
                .rev()
                .filter(|m| m.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn add(&self, user_id: Uuid, movie_name: &str) -> Result<Movie, StoreError> {
            let movie = Movie {
                id: Uuid::new_v4(),
                user_id,
                movie_name: movie_name.to_string(),
                created_at: OffsetDateTime::now_utc(),
            };
            self.movies
                .lock()
                .map_err(|e| StoreError::Unavailable(e.to_string()))?
                .push(movie.clone());
            Ok(movie)
        }
    }

}
