//! The request pipeline.
//!
//! Every public engine operation goes through [`Engine::dispatch`]: one
//! database transaction per request, tier-1 shape rules and tier-2 state
//! rules aggregated into a single [`FieldErrors`] map, and the handler only
//! runs when the aggregate is empty. State rules see the same transaction
//! the handler later uses, so there is no snapshot to race against.

use std::fmt;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{CredentialService, EngineError, FieldErrors, ResultEngine};

mod access;
mod auth;
mod categories;
mod rules;
mod transactions;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub struct Engine {
    database: DatabaseConnection,
    pub(crate) credentials: Arc<dyn CredentialService>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

/// A single engine operation: its shape rules, its state rules, and the
/// handler bound to it.
///
/// This is the registry the dispatcher resolves against: each request type
/// has exactly one impl, binding exactly one handler and zero or more rules
/// per tier. Resolution is by type, at compile time; there is nothing to
/// register at runtime.
pub(crate) trait Operation: Send {
    type Output: Send;

    /// Tier 1: pure request-shape rules. Rules append to `errors` and never
    /// bail early, so every violated field is reported at once.
    fn validate_shape(&self, _errors: &mut FieldErrors) {}

    /// Tier 2: rules that query persisted state. Runs on the same
    /// transaction the handler executes in. Infrastructure failures
    /// propagate as errors; rule outcomes append to `errors`.
    async fn validate_state(
        &self,
        _engine: &Engine,
        _db_tx: &DatabaseTransaction,
        _errors: &mut FieldErrors,
    ) -> ResultEngine<()> {
        Ok(())
    }

    async fn execute(
        self,
        engine: &Engine,
        db_tx: &DatabaseTransaction,
    ) -> ResultEngine<Self::Output>;
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub(crate) async fn dispatch<O: Operation>(&self, op: O) -> ResultEngine<O::Output> {
        with_tx!(self, |db_tx| {
            let mut errors = FieldErrors::default();
            op.validate_shape(&mut errors);
            op.validate_state(self, &db_tx, &mut errors).await?;
            if errors.is_empty() {
                op.execute(self, &db_tx).await
            } else {
                Err(EngineError::Validation(errors))
            }
        })
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    credentials: Option<Arc<dyn CredentialService>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Pass the required credential service
    pub fn credentials(mut self, credentials: Arc<dyn CredentialService>) -> EngineBuilder {
        self.credentials = Some(credentials);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let credentials = self.credentials.ok_or_else(|| {
            EngineError::Credential("credential service not configured".to_string())
        })?;
        Ok(Engine {
            database: self.database,
            credentials,
        })
    }
}
