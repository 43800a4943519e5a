//! Income/expense transactions.
//!
//! Amounts are strictly positive currency minor units; the kind defines the
//! direction. When a category is attached its kind must equal the
//! transaction kind, and that pairing is re-checked on every mutation of
//! either side.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{Category, DomainError, EntryKind};

pub(crate) const MAX_DESCRIPTION: usize = 500;

fn checked_description(description: Option<String>) -> Result<Option<String>, DomainError> {
    match description {
        Some(text) if text.chars().count() > MAX_DESCRIPTION => Err(
            DomainError::InvalidDescription(format!(
                "description must not exceed {MAX_DESCRIPTION} characters"
            )),
        ),
        other => Ok(other),
    }
}

fn check_kind_match(kind: EntryKind, category: Option<&Category>) -> Result<(), DomainError> {
    match category {
        Some(category) if category.kind != kind => Err(DomainError::CategoryTypeMismatch {
            transaction: kind,
            category: category.kind,
        }),
        _ => Ok(()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub amount_minor: i64,
    pub kind: EntryKind,
    pub description: Option<String>,
    pub occurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: Uuid,
        amount_minor: i64,
        kind: EntryKind,
        occurred_on: NaiveDate,
        description: Option<String>,
        category: Option<&Category>,
    ) -> Result<Self, DomainError> {
        if user_id.is_nil() {
            return Err(DomainError::InvalidUserId);
        }
        if amount_minor <= 0 {
            return Err(DomainError::InvalidAmount(amount_minor));
        }
        let description = checked_description(description)?;
        check_kind_match(kind, category)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            category_id: category.map(|c| c.id),
            amount_minor,
            kind,
            description,
            occurred_on,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_amount(&mut self, amount_minor: i64) -> Result<(), DomainError> {
        if amount_minor <= 0 {
            return Err(DomainError::InvalidAmount(amount_minor));
        }
        self.amount_minor = amount_minor;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// `category` must be the category currently attached to the
    /// transaction, so the pairing is checked against the other live field.
    pub fn update_kind(
        &mut self,
        kind: EntryKind,
        category: Option<&Category>,
    ) -> Result<(), DomainError> {
        check_kind_match(kind, category)?;
        self.kind = kind;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn update_category(&mut self, category: Option<&Category>) -> Result<(), DomainError> {
        check_kind_match(self.kind, category)?;
        self.category_id = category.map(|c| c.id);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn update_description(&mut self, description: Option<String>) -> Result<(), DomainError> {
        self.description = checked_description(description)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn update_date(&mut self, occurred_on: NaiveDate) {
        self.occurred_on = occurred_on;
        self.updated_at = Utc::now();
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub amount_minor: i64,
    pub kind: String,
    pub description: Option<String>,
    pub occurred_on: Date,
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
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Category,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id),
            user_id: ActiveValue::Set(tx.user_id),
            category_id: ActiveValue::Set(tx.category_id),
            amount_minor: ActiveValue::Set(tx.amount_minor),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            description: ActiveValue::Set(tx.description.clone()),
            occurred_on: ActiveValue::Set(tx.occurred_on),
            created_at: ActiveValue::Set(tx.created_at),
            updated_at: ActiveValue::Set(tx.updated_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            category_id: model.category_id,
            amount_minor: model.amount_minor,
            kind: EntryKind::try_from(model.kind.as_str())?,
            description: model.description,
            occurred_on: model.occurred_on,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(kind: EntryKind) -> Category {
        Category::new(Uuid::new_v4(), "Salary".to_string(), kind).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for amount in [0, -1, -100] {
            let err = Transaction::new(
                Uuid::new_v4(),
                amount,
                EntryKind::Expense,
                date(),
                None,
                None,
            )
            .unwrap_err();
            assert_eq!(err, DomainError::InvalidAmount(amount));
        }
    }

    #[test]
    fn accepts_positive_amounts() {
        let tx = Transaction::new(Uuid::new_v4(), 1, EntryKind::Income, date(), None, None);
        assert!(tx.is_ok());
    }

    #[test]
    fn rejects_kind_mismatch_on_construction() {
        let salary = category(EntryKind::Income);
        let err = Transaction::new(
            Uuid::new_v4(),
            100_000,
            EntryKind::Expense,
            date(),
            None,
            Some(&salary),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::CategoryTypeMismatch {
                transaction: EntryKind::Expense,
                category: EntryKind::Income,
            }
        );
    }

    #[test]
    fn matching_kind_and_no_category_are_valid() {
        let salary = category(EntryKind::Income);
        assert!(
            Transaction::new(
                Uuid::new_v4(),
                100_000,
                EntryKind::Income,
                date(),
                None,
                Some(&salary),
            )
            .is_ok()
        );
        assert!(
            Transaction::new(Uuid::new_v4(), 100_000, EntryKind::Expense, date(), None, None)
                .is_ok()
        );
    }

    #[test]
    fn update_kind_rechecks_attached_category() {
        let salary = category(EntryKind::Income);
        let mut tx = Transaction::new(
            Uuid::new_v4(),
            100_000,
            EntryKind::Income,
            date(),
            None,
            Some(&salary),
        )
        .unwrap();

        let err = tx.update_kind(EntryKind::Expense, Some(&salary)).unwrap_err();
        assert_eq!(
            err,
            DomainError::CategoryTypeMismatch {
                transaction: EntryKind::Expense,
                category: EntryKind::Income,
            }
        );
        assert_eq!(tx.kind, EntryKind::Income);
    }

    #[test]
    fn update_category_rechecks_current_kind() {
        let mut tx =
            Transaction::new(Uuid::new_v4(), 500, EntryKind::Expense, date(), None, None).unwrap();
        let salary = category(EntryKind::Income);

        assert!(tx.update_category(Some(&salary)).is_err());
        assert_eq!(tx.category_id, None);

        let food = category(EntryKind::Expense);
        tx.update_category(Some(&food)).unwrap();
        assert_eq!(tx.category_id, Some(food.id));

        tx.update_category(None).unwrap();
        assert_eq!(tx.category_id, None);
    }

    #[test]
    fn rejects_overlong_description() {
        let err = Transaction::new(
            Uuid::new_v4(),
            500,
            EntryKind::Expense,
            date(),
            Some("x".repeat(501)),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDescription(_)));
    }
}
