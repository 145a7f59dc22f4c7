use std::sync::Arc;

use argon2::{Argon2, PasswordHash, password_hash::PasswordVerifier};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::pet::repository::PetRepository;
use crate::session::{refresh_token_key, SessionStore};

use super::domain::{LoginInput, PetSession};
use super::errors::AuthError;
use super::token::TokenProvider;

/// Auth business service independent of web framework
pub struct AuthService<R: PetRepository> {
    repo: Arc<R>,
    tokens: TokenProvider,
    sessions: Arc<dyn SessionStore>,
}

impl<R: PetRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenProvider, sessions: Arc<dyn SessionStore>) -> Self {
        Self { repo, tokens, sessions }
    }

    /// Authenticate a pet and issue an access/refresh token pair.
    ///
    /// The refresh token is opaque and cached under `RT:{login_id}` so it can
    /// be invalidated by login id alone.
    #[instrument(skip(self, input), fields(login_id = %input.login_id))]
    pub async fn login(&self, input: LoginInput) -> Result<PetSession, AuthError> {
        let pet = self
            .repo
            .find_by_login_id(&input.login_id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&pet.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let access_token = self.tokens.issue_access_token(pet.id, &pet.login_id)?;
        let refresh_token = Uuid::new_v4().to_string();
        self.sessions
            .set(refresh_token_key(&pet.login_id), refresh_token.clone())
            .await
            .map_err(|e| AuthError::Session(e.to_string()))?;

        info!(pet_id = %pet.id, login_id = %pet.login_id, "pet_logged_in");
        Ok(PetSession { pet_id: pet.id, login_id: pet.login_id, access_token, refresh_token })
    }

    /// Drop the cached refresh token; returns whether one existed.
    #[instrument(skip(self))]
    pub async fn logout(&self, login_id: &str) -> Result<bool, AuthError> {
        let existed = self
            .sessions
            .delete(&refresh_token_key(login_id))
            .await
            .map_err(|e| AuthError::Session(e.to_string()))?;
        info!(login_id, existed, "pet_logged_out");
        Ok(existed)
    }
}
