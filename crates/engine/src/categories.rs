//! User-owned transaction categories.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{DomainError, EntryKind};

pub(crate) const MAX_CATEGORY_NAME: usize = 100;

fn checked_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidCategoryName(
            "name must not be blank".to_string(),
        ));
    }
    if name.chars().count() > MAX_CATEGORY_NAME {
        return Err(DomainError::InvalidCategoryName(format!(
            "name must not exceed {MAX_CATEGORY_NAME} characters"
        )));
    }
    Ok(name.to_string())
}

/// A category belongs to exactly one user and carries the kind every
/// attached transaction must agree with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub kind: EntryKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(user_id: Uuid, name: String, kind: EntryKind) -> Result<Self, DomainError> {
        if user_id.is_nil() {
            return Err(DomainError::InvalidUserId);
        }
        let name = checked_name(&name)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            kind,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn rename(&mut self, name: String) -> Result<(), DomainError> {
        self.name = checked_name(&name)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Changing the kind is allowed only through this explicit operation;
    /// attached transactions are re-checked by their own update path.
    pub fn set_kind(&mut self, kind: EntryKind) {
        self.kind = kind;
        self.updated_at = Utc::now();
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub kind: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: ActiveValue::Set(category.id),
            user_id: ActiveValue::Set(category.user_id),
            name: ActiveValue::Set(category.name.clone()),
            kind: ActiveValue::Set(category.kind.as_str().to_string()),
            created_at: ActiveValue::Set(category.created_at),
            updated_at: ActiveValue::Set(category.updated_at),
        }
    }
}

impl TryFrom<Model> for Category {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            kind: EntryKind::try_from(model.kind.as_str())?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nil_user_id() {
        let err = Category::new(Uuid::nil(), "Food".to_string(), EntryKind::Expense).unwrap_err();
        assert_eq!(err, DomainError::InvalidUserId);
    }

    #[test]
    fn rejects_blank_and_overlong_names() {
        let user_id = Uuid::new_v4();
        assert!(Category::new(user_id, "   ".to_string(), EntryKind::Income).is_err());
        assert!(Category::new(user_id, "x".repeat(101), EntryKind::Income).is_err());
        assert!(Category::new(user_id, "x".repeat(100), EntryKind::Income).is_ok());
    }

    #[test]
    fn rename_trims_and_restamps() {
        let mut category =
            Category::new(Uuid::new_v4(), "Food".to_string(), EntryKind::Expense).unwrap();
        category.rename("  Groceries ".to_string()).unwrap();
        assert_eq!(category.name, "Groceries");
        assert!(category.rename(String::new()).is_err());
    }
}
