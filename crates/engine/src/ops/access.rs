//! Ownership checks shared by the mutate/read handlers.
//!
//! Absence and ownership are distinct failures: a missing row is
//! `NotFound`, a row owned by someone else is `Forbidden`, whether or not
//! the requester could know the id exists.

use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, categories, transactions};

use super::Engine;

/// Generates a `require_*_owned` method for a target entity.
macro_rules! impl_require_owned {
    ($require_fn:ident, $module:ident, $entity_name:literal) => {
        pub(super) async fn $require_fn(
            &self,
            db_tx: &DatabaseTransaction,
            id: Uuid,
            user_id: Uuid,
        ) -> ResultEngine<$module::Model> {
            let model = $module::Entity::find_by_id(id)
                .one(db_tx)
                .await?
                .ok_or(EngineError::NotFound {
                    entity: $entity_name,
                    id,
                })?;
            if model.user_id != user_id {
                return Err(EngineError::Forbidden(format!(
                    "{} does not belong to the requesting user",
                    $entity_name
                )));
            }
            Ok(model)
        }
    };
}

impl Engine {
    impl_require_owned!(require_category_owned, categories, "category");

    impl_require_owned!(require_transaction_owned, transactions, "transaction");

    /// Best-effort pre-check used by the tier-2 validators; the foreign key
    /// remains the store-level backstop.
    pub(super) async fn category_owned_exists(
        &self,
        db_tx: &DatabaseTransaction,
        id: Uuid,
        user_id: Uuid,
    ) -> ResultEngine<bool> {
        categories::Entity::find_by_id(id)
            .filter(categories::Column::UserId.eq(user_id))
            .one(db_tx)
            .await
            .map(|model| model.is_some())
            .map_err(Into::into)
    }
}
