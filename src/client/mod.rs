//! HTTP client for the auth and movie services.
//!
//! The client is either unauthenticated or authenticated, decided solely by
//! whether a token sits in its [`TokenStore`]. Logging out, or any 401 from
//! the movie service, removes the token; resource calls are never sent
//! without one.

mod error;
mod notice;
mod store;

pub use error::ClientError;
pub use notice::{Notice, NoticeKind, NOTICE_TTL};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::dto::{LoginResponse, RegisterResponse};
use crate::error::ErrorBody;

/// Per-request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

const AUTH_UNREACHABLE: &str = "Network error or server unreachable";
const LOAD_FAILED: &str = "Failed to load movies.";
const ADD_FAILED: &str = "Failed to add movie.";

/// Shown in place of an empty list.
pub const EMPTY_LIST_PLACEHOLDER: &str = "No favorite movies yet. Add some!";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub auth_url: String,
    pub movies_url: String,
}

impl ClientConfig {
    pub fn new(auth_url: impl Into<String>, movies_url: impl Into<String>) -> Self {
        Self {
            auth_url: trim_base(auth_url.into()),
            movies_url: trim_base(movies_url.into()),
        }
    }

    /// `AUTH_URL` and `MOVIES_URL`; the movie service defaults to the auth URL.
    pub fn from_env() -> Self {
        let auth_url =
            std::env::var("AUTH_URL").unwrap_or_else(|_| "http://localhost:8080".into());
        let movies_url = std::env::var("MOVIES_URL").unwrap_or_else(|_| auth_url.clone());
        Self::new(auth_url, movies_url)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Unauthenticated,
    Authenticated,
}

/// A movie entry as returned by the movie service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieEntry {
    pub movie_name: String,
    #[serde(default)]
    pub id: Option<Uuid>,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct AddMovieBody<'a> {
    movie_name: &'a str,
}

/// Lines to display for a movie list.
pub fn render_movie_list(movies: &[MovieEntry]) -> Vec<String> {
    if movies.is_empty() {
        return vec![EMPTY_LIST_PLACEHOLDER.to_string()];
    }
    movies.iter().map(|m| m.movie_name.clone()).collect()
}

/// Clone is cheap; `reqwest::Client` and the store are shared.
#[derive(Clone)]
pub struct MovieClient {
    http: Client,
    config: ClientConfig,
    store: Arc<dyn TokenStore>,
}

impl MovieClient {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|source| ClientError::Network {
                context: AUTH_UNREACHABLE,
                source,
            })?;
        Ok(Self {
            http,
            config,
            store,
        })
    }

    pub fn state(&self) -> Result<ClientState, ClientError> {
        Ok(match self.token()? {
            Some(_) => ClientState::Authenticated,
            None => ClientState::Unauthenticated,
        })
    }

    fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Notice, ClientError> {
        let response = self
            .http
            .post(format!("{}/register", self.config.auth_url))
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|source| ClientError::Network {
                context: AUTH_UNREACHABLE,
                source,
            })?;

        if !response.status().is_success() {
            return Err(rejected(response, "Registration failed").await);
        }
        let body: RegisterResponse = response.json().await.map_err(|source| {
            ClientError::Network {
                context: AUTH_UNREACHABLE,
                source,
            }
        })?;
        debug!(user_id = %body.user.id, "registered");
        Ok(Notice::success(body.message))
    }

    /// On success the token is persisted and the client becomes authenticated.
    pub async fn login(&self, email: &str, password: &str) -> Result<Notice, ClientError> {
        let response = self
            .http
            .post(format!("{}/login", self.config.auth_url))
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|source| ClientError::Network {
                context: AUTH_UNREACHABLE,
                source,
            })?;

        if !response.status().is_success() {
            return Err(rejected(response, "Login failed").await);
        }
        let body: LoginResponse = response.json().await.map_err(|source| {
            ClientError::Network {
                context: AUTH_UNREACHABLE,
                source,
            }
        })?;
        self.store.set(TOKEN_KEY, &body.token)?;
        Ok(Notice::success(body.message))
    }

    /// Client-side discard only; the token stays valid server-side until it expires.
    pub fn logout(&self) -> Result<Notice, ClientError> {
        self.store.remove(TOKEN_KEY)?;
        Ok(Notice::success("Logged out successfully."))
    }

    pub async fn fetch_movies(&self) -> Result<Vec<MovieEntry>, ClientError> {
        let token = self.token()?.ok_or(ClientError::NotLoggedIn)?;

        let response = self
            .http
            .get(format!("{}/movies", self.config.movies_url))
            .bearer_auth(&token)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| ClientError::Network {
                context: LOAD_FAILED,
                source,
            })?;

        self.read_movie_list(response, LOAD_FAILED).await
    }

    pub async fn add_movie(&self, movie_name: &str) -> Result<Vec<MovieEntry>, ClientError> {
        let movie_name = movie_name.trim();
        if movie_name.is_empty() {
            return Err(ClientError::Validation("Movie name cannot be empty."));
        }
        let token = self.token()?.ok_or(ClientError::NotLoggedIn)?;

        let response = self
            .http
            .post(format!("{}/movies", self.config.movies_url))
            .bearer_auth(&token)
            .json(&AddMovieBody { movie_name })
            .send()
            .await
            .map_err(|source| ClientError::Network {
                context: ADD_FAILED,
                source,
            })?;

        self.read_movie_list(response, ADD_FAILED).await
    }

    async fn read_movie_list(
        &self,
        response: Response,
        failure: &'static str,
    ) -> Result<Vec<MovieEntry>, ClientError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("movie service rejected token; logging out");
            self.store.remove(TOKEN_KEY)?;
            return Err(ClientError::SessionExpired);
        }
        if !status.is_success() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: failure.to_string(),
            });
        }
        response
            .json()
            .await
            .map_err(|source| ClientError::Network {
                context: failure,
                source,
            })
    }
}

/// Server `{message}` when present, otherwise `fallback`.
async fn rejected(response: Response, fallback: &str) -> ClientError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    ClientError::Rejected { status, message }
}
