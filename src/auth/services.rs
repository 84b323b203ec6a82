use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::auth::{
    dto::PublicUser, errors::AuthError, jwt::JwtKeys, password::PasswordHasher, repo::UserStore,
};

pub(crate) const MISSING_CREDENTIALS: &str = "Email and password are required";

/// Plaintext behind the hash that unknown-email logins verify against.
const DUMMY_PASSWORD: &str = "movielist-dummy-password";

/// Register/login over an injected credential store, hasher and signing keys.
/// Holds no per-request state.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    keys: JwtKeys,
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        keys: JwtKeys,
    ) -> anyhow::Result<Self> {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD)?;
        Ok(Self {
            users,
            hasher,
            keys,
            dummy_hash,
        })
    }

    /// Argon2 is CPU-bound; run it on the blocking pool.
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .map_err(|e| AuthError::Hash(e.to_string()))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .map_err(|e| AuthError::Hash(e.to_string()))
    }

    /// Create a user. Only presence of both fields is checked; a taken email
    /// surfaces as [`AuthError::DuplicateEmail`] from the store's uniqueness rule.
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<PublicUser, AuthError> {
        require_credentials(email, password)?;

        let hash = self.hash_password(password).await?;

        let user = match self.users.create(email, &hash).await {
            Ok(u) => u,
            Err(e) => {
                let err = AuthError::from(e);
                if matches!(err, AuthError::DuplicateEmail) {
                    warn!("email already registered");
                }
                return Err(err);
            }
        };

        info!(user_id = %user.id, "user registered");
        Ok(PublicUser {
            id: user.id,
            email: user.email,
        })
    }

    /// Check credentials and issue a session token. Unknown email and wrong
    /// password both yield [`AuthError::InvalidCredentials`].
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        require_credentials(email, password)?;

        let Some(user) = self.users.find_by_email(email).await? else {
            // Pay the same verify cost as a wrong password.
            let _ = self.verify_password(password, &self.dummy_hash).await;
            warn!("login unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let ok = self.verify_password(password, &user.password_hash).await?;
        if !ok {
            warn!(user_id = %user.id, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .keys
            .sign(user.id, &user.email)
            .map_err(|e| AuthError::Token(e.to_string()))?;

        info!(user_id = %user.id, "user logged in");
        Ok(token)
    }
}

fn require_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::Validation(MISSING_CREDENTIALS));
    }
    Ok(())
}
