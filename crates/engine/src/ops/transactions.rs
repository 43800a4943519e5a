//! Transaction operations.

use chrono::{Datelike, NaiveDate};
use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Category, CreateTransactionCmd, DeleteTransactionCmd, FieldErrors, GetTransactionQuery,
    ListTransactionsQuery, ResultEngine, Transaction, TransactionRecord, UpdateTransactionCmd,
    categories, transactions,
};

use super::{Engine, Operation, rules};

impl Engine {
    pub async fn create_transaction(
        &self,
        cmd: CreateTransactionCmd,
    ) -> ResultEngine<TransactionRecord> {
        self.dispatch(cmd).await
    }

    /// Replace every mutable field of an owned transaction; the kind and the
    /// attached category are re-checked as a pair.
    pub async fn update_transaction(
        &self,
        cmd: UpdateTransactionCmd,
    ) -> ResultEngine<TransactionRecord> {
        self.dispatch(cmd).await
    }

    pub async fn delete_transaction(&self, cmd: DeleteTransactionCmd) -> ResultEngine<()> {
        self.dispatch(cmd).await
    }

    pub async fn transaction(&self, query: GetTransactionQuery) -> ResultEngine<TransactionRecord> {
        self.dispatch(query).await
    }

    /// Transactions owned by the requester, newest business date first.
    /// Month/year/category filters apply conjunctively.
    pub async fn list_transactions(
        &self,
        query: ListTransactionsQuery,
    ) -> ResultEngine<Vec<TransactionRecord>> {
        self.dispatch(query).await
    }
}

fn record(tx: Transaction, category_name: Option<String>) -> TransactionRecord {
    TransactionRecord {
        id: tx.id,
        amount_minor: tx.amount_minor,
        kind: tx.kind,
        category_id: tx.category_id,
        category_name,
        description: tx.description,
        occurred_on: tx.occurred_on,
        created_at: tx.created_at,
        updated_at: tx.updated_at,
    }
}

/// Tier-2 rule shared by create and update: a referenced category must exist
/// and belong to the requester before the handler runs.
async fn check_category_reference(
    engine: &Engine,
    db_tx: &DatabaseTransaction,
    category_id: Option<Uuid>,
    user_id: Uuid,
    errors: &mut FieldErrors,
) -> ResultEngine<()> {
    if let Some(category_id) = category_id
        && !engine.category_owned_exists(db_tx, category_id, user_id).await?
    {
        errors.push(
            "category_id",
            "Category not found or does not belong to you.",
        );
    }
    Ok(())
}

async fn load_category(
    engine: &Engine,
    db_tx: &DatabaseTransaction,
    category_id: Option<Uuid>,
    user_id: Uuid,
) -> ResultEngine<Option<Category>> {
    match category_id {
        Some(id) => {
            let model = engine.require_category_owned(db_tx, id, user_id).await?;
            Ok(Some(Category::try_from(model)?))
        }
        None => Ok(None),
    }
}

/// Half-open `[from, to)` bounds for a year, narrowed to one month when
/// given. Month 1-12 and year > 1900 are guaranteed by tier 1.
fn date_bounds(year: i32, month: Option<u32>) -> Option<(NaiveDate, NaiveDate)> {
    let (from, to) = match month {
        Some(12) => (
            NaiveDate::from_ymd_opt(year, 12, 1)?,
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
        ),
        Some(month) => (
            NaiveDate::from_ymd_opt(year, month, 1)?,
            NaiveDate::from_ymd_opt(year, month + 1, 1)?,
        ),
        None => (
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
        ),
    };
    Some((from, to))
}

impl Operation for CreateTransactionCmd {
    type Output = TransactionRecord;

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::require_id(self.user_id, "user_id", "User ID", errors);
        rules::check_amount(self.amount_minor, errors);
        rules::check_description(self.description.as_deref(), errors);
    }

    async fn validate_state(
        &self,
        engine: &Engine,
        db_tx: &DatabaseTransaction,
        errors: &mut FieldErrors,
    ) -> ResultEngine<()> {
        check_category_reference(engine, db_tx, self.category_id, self.user_id, errors).await
    }

    async fn execute(
        self,
        engine: &Engine,
        db_tx: &DatabaseTransaction,
    ) -> ResultEngine<TransactionRecord> {
        let category = load_category(engine, db_tx, self.category_id, self.user_id).await?;
        let tx = Transaction::new(
            self.user_id,
            self.amount_minor,
            self.kind,
            self.occurred_on,
            self.description,
            category.as_ref(),
        )?;

        transactions::ActiveModel::from(&tx).insert(db_tx).await?;
        Ok(record(tx, category.map(|c| c.name)))
    }
}

impl Operation for UpdateTransactionCmd {
    type Output = TransactionRecord;

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::require_id(self.id, "id", "Transaction ID", errors);
        rules::require_id(self.user_id, "user_id", "User ID", errors);
        rules::check_amount(self.amount_minor, errors);
        rules::check_description(self.description.as_deref(), errors);
    }

    async fn validate_state(
        &self,
        engine: &Engine,
        db_tx: &DatabaseTransaction,
        errors: &mut FieldErrors,
    ) -> ResultEngine<()> {
        check_category_reference(engine, db_tx, self.category_id, self.user_id, errors).await
    }

    async fn execute(
        self,
        engine: &Engine,
        db_tx: &DatabaseTransaction,
    ) -> ResultEngine<TransactionRecord> {
        let model = engine
            .require_transaction_owned(db_tx, self.id, self.user_id)
            .await?;
        let mut tx = Transaction::try_from(model)?;
        let category = load_category(engine, db_tx, self.category_id, self.user_id).await?;

        tx.update_amount(self.amount_minor)?;
        tx.update_kind(self.kind, category.as_ref())?;
        tx.update_category(category.as_ref())?;
        tx.update_description(self.description)?;
        tx.update_date(self.occurred_on);

        transactions::ActiveModel::from(&tx).update(db_tx).await?;
        Ok(record(tx, category.map(|c| c.name)))
    }
}

impl Operation for DeleteTransactionCmd {
    type Output = ();

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::require_id(self.id, "id", "Transaction ID", errors);
        rules::require_id(self.user_id, "user_id", "User ID", errors);
    }

    async fn execute(self, engine: &Engine, db_tx: &DatabaseTransaction) -> ResultEngine<()> {
        engine
            .require_transaction_owned(db_tx, self.id, self.user_id)
            .await?;
        transactions::Entity::delete_by_id(self.id).exec(db_tx).await?;
        Ok(())
    }
}

impl Operation for GetTransactionQuery {
    type Output = TransactionRecord;

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::require_id(self.id, "id", "Transaction ID", errors);
        rules::require_id(self.user_id, "user_id", "User ID", errors);
    }

    async fn execute(
        self,
        engine: &Engine,
        db_tx: &DatabaseTransaction,
    ) -> ResultEngine<TransactionRecord> {
        let model = engine
            .require_transaction_owned(db_tx, self.id, self.user_id)
            .await?;
        let tx = Transaction::try_from(model)?;

        let category_name = match tx.category_id {
            Some(id) => categories::Entity::find_by_id(id)
                .one(db_tx)
                .await?
                .map(|model| model.name),
            None => None,
        };
        Ok(record(tx, category_name))
    }
}

impl Operation for ListTransactionsQuery {
    type Output = Vec<TransactionRecord>;

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::require_id(self.user_id, "user_id", "User ID", errors);
        rules::check_month(self.filter.month, errors);
        rules::check_year(self.filter.year, errors);
    }

    async fn execute(
        self,
        _engine: &Engine,
        db_tx: &DatabaseTransaction,
    ) -> ResultEngine<Vec<TransactionRecord>> {
        let filter = self.filter;

        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(self.user_id))
            .find_also_related(categories::Entity)
            .order_by_desc(transactions::Column::OccurredOn)
            .order_by_desc(transactions::Column::CreatedAt);

        if let Some(category_id) = filter.category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id));
        }
        if let Some(year) = filter.year
            && let Some((from, to)) = date_bounds(year, filter.month)
        {
            query = query
                .filter(transactions::Column::OccurredOn.gte(from))
                .filter(transactions::Column::OccurredOn.lt(to));
        }

        let rows = query.all(db_tx).await?;
        let mut out = Vec::with_capacity(rows.len());
        for (model, category_model) in rows {
            let tx = Transaction::try_from(model)?;
            // A month with no year cannot be expressed as one date range;
            // filter it on the mapped rows instead.
            if filter.year.is_none()
                && let Some(month) = filter.month
                && tx.occurred_on.month() != month
            {
                continue;
            }
            out.push(record(tx, category_model.map(|c| c.name)));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_bounds_cover_month_and_year() {
        let (from, to) = date_bounds(2024, Some(3)).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());

        let (from, to) = date_bounds(2024, Some(12)).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        let (from, to) = date_bounds(2024, None).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
