use thiserror::Error;

/// Client-side failures. `Display` is the text shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Not logged in.")]
    NotLoggedIn,

    /// The resource service answered 401; the stored token has been discarded.
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{context}")]
    Network {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ClientError {
    /// True when the user has to log in again before retrying.
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::NotLoggedIn | ClientError::SessionExpired)
    }
}
