use std::sync::Arc;

use sea_orm::Database;
use uuid::Uuid;

use engine::{
    CredentialService, Engine, EngineError, RegisterUserCmd, ResultEngine, TokenIdentity,
};
use migration::MigratorTrait;

/// Deterministic in-process stand-in for the credential service.
pub struct PlainCredentials;

impl CredentialService for PlainCredentials {
    fn hash_password(&self, plain: &str) -> ResultEngine<String> {
        Ok(format!("hashed:{plain}"))
    }

    fn verify_password(&self, plain: &str, hash: &str) -> bool {
        hash == format!("hashed:{plain}")
    }

    fn issue_token(&self, user_id: Uuid, email: &str) -> ResultEngine<String> {
        Ok(format!("{user_id}|{email}"))
    }

    fn token_identity(&self, token: &str) -> ResultEngine<TokenIdentity> {
        let (user_id, email) = token
            .split_once('|')
            .ok_or_else(|| EngineError::Unauthenticated("malformed token".to_string()))?;
        let user_id = Uuid::parse_str(user_id)
            .map_err(|_| EngineError::Unauthenticated("malformed token".to_string()))?;
        Ok(TokenIdentity {
            user_id,
            email: email.to_string(),
        })
    }
}

pub async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder()
        .database(db)
        .credentials(Arc::new(PlainCredentials))
        .build()
        .await
        .unwrap()
}

pub async fn register(engine: &Engine, email: &str) -> Uuid {
    engine
        .register_user(RegisterUserCmd::new(email, "Passw0rd").first_name("Test"))
        .await
        .unwrap()
        .user_id
}
