use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::AuthError;

/// JWT claims: `sub` carries the login id, `pid` the pet id.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    pid: String,
    exp: usize,
}

/// Verified identity carried by an access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub pet_id: Uuid,
    pub login_id: String,
}

/// Issues and verifies access tokens.
#[derive(Clone)]
pub struct TokenProvider {
    secret: String,
    access_token_mins: i64,
}

impl TokenProvider {
    pub fn new(secret: String, access_token_mins: i64) -> Self {
        Self { secret, access_token_mins }
    }

    /// Issue an access token for the given pet.
    ///
    /// # Examples
    /// ```
    /// use service::auth::token::TokenProvider;
    /// use uuid::Uuid;
    /// let tokens = TokenProvider::new("secret".into(), 60);
    /// let id = Uuid::new_v4();
    /// let token = tokens.issue_access_token(id, "monty").unwrap();
    /// assert_eq!(tokens.pet_id(&token).unwrap(), id);
    /// ```
    pub fn issue_access_token(&self, pet_id: Uuid, login_id: &str) -> Result<String, AuthError> {
        let exp = (Utc::now() + Duration::minutes(self.access_token_mins)).timestamp() as usize;
        let claims = Claims { sub: login_id.to_string(), pid: pet_id.to_string(), exp };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Verify a bearer token, rejecting expired or tampered tokens.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(token, &key, &validation)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        let pet_id = Uuid::parse_str(&data.claims.pid).map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok(TokenClaims { pet_id, login_id: data.claims.sub })
    }

    /// Re-derive the pet id from a bearer token.
    pub fn pet_id(&self, token: &str) -> Result<Uuid, AuthError> {
        Ok(self.verify(token)?.pet_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_pet_id() {
        let tokens = TokenProvider::new("test-secret".into(), 60);
        let id = Uuid::new_v4();
        let token = tokens.issue_access_token(id, "monty").unwrap();
        assert_eq!(tokens.pet_id(&token).unwrap(), id);
    }

    #[test]
    fn rejects_garbage_token() {
        let tokens = TokenProvider::new("test-secret".into(), 60);
        assert!(matches!(tokens.pet_id("not-a-jwt"), Err(AuthError::TokenError(_))));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let tokens = TokenProvider::new("test-secret".into(), 60);
        let other = TokenProvider::new("other-secret".into(), 60);
        let token = other.issue_access_token(Uuid::new_v4(), "monty").unwrap();
        assert!(tokens.pet_id(&token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let tokens = TokenProvider::new("test-secret".into(), -5);
        let token = tokens.issue_access_token(Uuid::new_v4(), "monty").unwrap();
        assert!(tokens.pet_id(&token).is_err());
    }
}
