use std::sync::Arc;

use crate::auth::{
    jwt::JwtKeys,
    password::{Argon2Hasher, PasswordHasher},
    repo::{mock::MemoryUserStore, PgUserStore, UserStore},
    services::AuthService,
};
use crate::config::AppConfig;
use crate::movies::repo::{mock::MemoryMovieStore, MovieStore, PgMovieStore};

/// Process-scoped dependencies, built once at startup and shared by handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
    pub movies: Arc<dyn MovieStore>,
    pub keys: JwtKeys,
}

impl AppState {
    /// Postgres-backed state. Connects and applies migrations; either failing
    /// aborts startup.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = crate::db::connect(&config).await?;
        crate::db::migrate(&db).await?;
        let hasher = Arc::new(Argon2Hasher::new(config.password_hash_cost)?);
        Self::from_parts(
            Arc::new(config),
            Arc::new(PgUserStore::new(db.clone())),
            Arc::new(PgMovieStore::new(db)),
            hasher,
        )
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        movies: Arc<dyn MovieStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> anyhow::Result<Self> {
        let keys = JwtKeys::from_config(&config.jwt);
        let auth = Arc::new(AuthService::new(users, hasher, keys.clone())?);
        Ok(Self {
            config,
            auth,
            movies,
            keys,
        })
    }

    /// State over in-memory stores; nothing survives the process.
    pub fn in_memory(config: AppConfig) -> anyhow::Result<Self> {
        let hasher = Arc::new(Argon2Hasher::new(config.password_hash_cost)?);
        Self::from_parts(
            Arc::new(config),
            Arc::new(MemoryUserStore::default()),
            Arc::new(MemoryMovieStore::default()),
            hasher,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_fails_instead_of_serving_without_a_database() {
        let mut config = AppConfig::for_tests("s");
        config.database_url = "not a postgres url".into();
        assert!(AppState::init(config).await.is_err());
    }

    /// Needs a reachable Postgres in `DATABASE_URL`.
    #[tokio::test]
    #[ignore]
    async fn init_applies_migrations() {
        let mut config = AppConfig::for_tests("s");
        config.database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
        let state = AppState::init(config).await.expect("init");
        let movies = state.movies.list_by_user(uuid::Uuid::new_v4()).await.unwrap();
        assert!(movies.is_empty());
    }
}
