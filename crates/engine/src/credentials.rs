//! Seam to the external credential service.
//!
//! The engine only needs "given credentials, get an identity" and "given a
//! token, recover an identity". Hashing and token mechanics live behind this
//! trait; the production implementation sits in the server crate.

use uuid::Uuid;

use crate::ResultEngine;

/// Identity recovered from a bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: Uuid,
    pub email: String,
}

pub trait CredentialService: Send + Sync {
    /// Hash a plain password for storage. The engine treats the result as
    /// opaque.
    fn hash_password(&self, plain: &str) -> ResultEngine<String>;

    /// Verify a plain password against a stored hash.
    fn verify_password(&self, plain: &str, hash: &str) -> bool;

    /// Mint an opaque bearer token carrying enough claims to recover the
    /// user identity later.
    fn issue_token(&self, user_id: Uuid, email: &str) -> ResultEngine<String>;

    /// Recover the identity embedded in a token; failures are
    /// [`EngineError::Unauthenticated`].
    ///
    /// [`EngineError::Unauthenticated`]: crate::EngineError::Unauthenticated
    fn token_identity(&self, token: &str) -> ResultEngine<TokenIdentity>;
}
