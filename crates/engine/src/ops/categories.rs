//! Category operations.

use sea_orm::{DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Category, CategoryRecord, CreateCategoryCmd, DeleteCategoryCmd, EngineError, FieldErrors,
    GetCategoryQuery, ListCategoriesQuery, ResultEngine, UpdateCategoryCmd, categories,
    transactions,
};

use super::{Engine, Operation, rules};

impl Engine {
    pub async fn create_category(&self, cmd: CreateCategoryCmd) -> ResultEngine<CategoryRecord> {
        self.dispatch(cmd).await
    }

    pub async fn update_category(&self, cmd: UpdateCategoryCmd) -> ResultEngine<CategoryRecord> {
        self.dispatch(cmd).await
    }

    /// Delete an owned category.
    ///
    /// Deletion is restricted, not nulling: a category still referenced by
    /// transactions is refused with a conflict, and the RESTRICT foreign key
    /// backs the check at the store level.
    pub async fn delete_category(&self, cmd: DeleteCategoryCmd) -> ResultEngine<()> {
        self.dispatch(cmd).await
    }

    pub async fn category(&self, query: GetCategoryQuery) -> ResultEngine<CategoryRecord> {
        self.dispatch(query).await
    }

    /// All categories owned by the requester, ordered by name ascending.
    pub async fn list_categories(
        &self,
        query: ListCategoriesQuery,
    ) -> ResultEngine<Vec<CategoryRecord>> {
        self.dispatch(query).await
    }
}

fn record(category: Category) -> CategoryRecord {
    CategoryRecord {
        id: category.id,
        name: category.name,
        kind: category.kind,
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

impl Operation for CreateCategoryCmd {
    type Output = CategoryRecord;

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::require_id(self.user_id, "user_id", "User ID", errors);
        rules::check_category_name(&self.name, errors);
    }

    async fn execute(
        self,
        _engine: &Engine,
        db_tx: &DatabaseTransaction,
    ) -> ResultEngine<CategoryRecord> {
        let category = Category::new(self.user_id, self.name, self.kind)?;
        categories::ActiveModel::from(&category).insert(db_tx).await?;
        Ok(record(category))
    }
}

impl Operation for UpdateCategoryCmd {
    type Output = CategoryRecord;

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::require_id(self.id, "id", "Category ID", errors);
        rules::require_id(self.user_id, "user_id", "User ID", errors);
        rules::check_category_name(&self.name, errors);
    }

    async fn execute(
        self,
        engine: &Engine,
        db_tx: &DatabaseTransaction,
    ) -> ResultEngine<CategoryRecord> {
        let model = engine
            .require_category_owned(db_tx, self.id, self.user_id)
            .await?;
        let mut category = Category::try_from(model)?;
        category.rename(self.name)?;
        category.set_kind(self.kind);

        categories::ActiveModel::from(&category).update(db_tx).await?;
        Ok(record(category))
    }
}

impl Operation for DeleteCategoryCmd {
    type Output = ();

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::require_id(self.id, "id", "Category ID", errors);
        rules::require_id(self.user_id, "user_id", "User ID", errors);
    }

    async fn execute(self, engine: &Engine, db_tx: &DatabaseTransaction) -> ResultEngine<()> {
        engine
            .require_category_owned(db_tx, self.id, self.user_id)
            .await?;

        let referencing = transactions::Entity::find()
            .filter(transactions::Column::CategoryId.eq(self.id))
            .count(db_tx)
            .await?;
        if referencing > 0 {
            return Err(EngineError::Conflict(format!(
                "category is still referenced by {referencing} transactions"
            )));
        }

        categories::Entity::delete_by_id(self.id).exec(db_tx).await?;
        Ok(())
    }
}

impl Operation for GetCategoryQuery {
    type Output = CategoryRecord;

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::require_id(self.id, "id", "Category ID", errors);
        rules::require_id(self.user_id, "user_id", "User ID", errors);
    }

    async fn execute(
        self,
        engine: &Engine,
        db_tx: &DatabaseTransaction,
    ) -> ResultEngine<CategoryRecord> {
        let model = engine
            .require_category_owned(db_tx, self.id, self.user_id)
            .await?;
        Ok(record(Category::try_from(model)?))
    }
}

impl Operation for ListCategoriesQuery {
    type Output = Vec<CategoryRecord>;

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::require_id(self.user_id, "user_id", "User ID", errors);
    }

    async fn execute(
        self,
        _engine: &Engine,
        db_tx: &DatabaseTransaction,
    ) -> ResultEngine<Vec<CategoryRecord>> {
        let models = categories::Entity::find()
            .filter(categories::Column::UserId.eq(self.user_id))
            .order_by_asc(categories::Column::Name)
            .all(db_tx)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(record(Category::try_from(model)?));
        }
        Ok(out)
    }
}
