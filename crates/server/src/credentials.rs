//! Argon2id password hashing and HS256 bearer tokens.
//!
//! Implements the engine's credential seam. Hashes are PHC strings with a
//! fresh salt per password; verification re-derives from the stored
//! parameters, so the comparison effort depends on the hash parameters, not
//! on the secret.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use engine::{CredentialService, EngineError, ResultEngine, TokenIdentity};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

pub struct Credentials {
    encoding: EncodingKey,
    decoding: DecodingKey,
    token_ttl: Duration,
}

impl Credentials {
    #[must_use]
    pub fn new(secret: &str, token_ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }
}

impl CredentialService for Credentials {
    fn hash_password(&self, plain: &str) -> ResultEngine<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| EngineError::Credential(err.to_string()))
    }

    fn verify_password(&self, plain: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    fn issue_token(&self, user_id: Uuid, email: &str) -> ResultEngine<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| EngineError::Credential(err.to_string()))
    }

    fn token_identity(&self, token: &str) -> ResultEngine<TokenIdentity> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
                .map_err(|_| EngineError::Unauthenticated("invalid or expired token".to_string()))?;
        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| EngineError::Unauthenticated("invalid or expired token".to_string()))?;
        Ok(TokenIdentity {
            user_id,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let credentials = Credentials::new("test-secret", 1);
        let hash = credentials.hash_password("Passw0rd").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(credentials.verify_password("Passw0rd", &hash));
        assert!(!credentials.verify_password("wrong", &hash));
        assert!(!credentials.verify_password("Passw0rd", "not-a-phc-string"));
    }

    #[test]
    fn token_round_trips_identity() {
        let credentials = Credentials::new("test-secret", 1);
        let user_id = Uuid::new_v4();

        let token = credentials.issue_token(user_id, "alice@example.com").unwrap();
        let identity = credentials.token_identity(&token).unwrap();

        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.email, "alice@example.com");
    }

    #[test]
    fn foreign_and_garbled_tokens_are_rejected() {
        let credentials = Credentials::new("test-secret", 1);
        let other = Credentials::new("other-secret", 1);

        let token = other.issue_token(Uuid::new_v4(), "x@example.com").unwrap();
        assert!(matches!(
            credentials.token_identity(&token),
            Err(EngineError::Unauthenticated(_))
        ));
        assert!(matches!(
            credentials.token_identity("garbage"),
            Err(EngineError::Unauthenticated(_))
        ));
    }
}
