//! Command/query structs for engine operations, and the records they return.
//!
//! These types group parameters for each operation, keeping call sites
//! readable. `user_id` is always the requester's authenticated identity,
//! stamped by the trusted caller context (the server builds these from the
//! token identity plus the untrusted body, never the reverse).

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::EntryKind;

/// Register a new user account.
#[derive(Clone, Debug)]
pub struct RegisterUserCmd {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl RegisterUserCmd {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
        }
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }
}

/// Authenticate an existing user.
#[derive(Clone, Debug)]
pub struct LoginUserCmd {
    pub email: String,
    pub password: String,
}

impl LoginUserCmd {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Create a category owned by `user_id`.
#[derive(Clone, Debug)]
pub struct CreateCategoryCmd {
    pub user_id: Uuid,
    pub name: String,
    pub kind: EntryKind,
}

impl CreateCategoryCmd {
    #[must_use]
    pub fn new(user_id: Uuid, name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            user_id,
            name: name.into(),
            kind,
        }
    }
}

/// Replace name and kind of an owned category.
#[derive(Clone, Debug)]
pub struct UpdateCategoryCmd {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub kind: EntryKind,
}

impl UpdateCategoryCmd {
    #[must_use]
    pub fn new(id: Uuid, user_id: Uuid, name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id,
            user_id,
            name: name.into(),
            kind,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DeleteCategoryCmd {
    pub id: Uuid,
    pub user_id: Uuid,
}

impl DeleteCategoryCmd {
    #[must_use]
    pub fn new(id: Uuid, user_id: Uuid) -> Self {
        Self { id, user_id }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GetCategoryQuery {
    pub id: Uuid,
    pub user_id: Uuid,
}

impl GetCategoryQuery {
    #[must_use]
    pub fn new(id: Uuid, user_id: Uuid) -> Self {
        Self { id, user_id }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ListCategoriesQuery {
    pub user_id: Uuid,
}

impl ListCategoriesQuery {
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Create a transaction owned by `user_id`.
#[derive(Clone, Debug)]
pub struct CreateTransactionCmd {
    pub user_id: Uuid,
    pub amount_minor: i64,
    pub kind: EntryKind,
    pub category_id: Option<Uuid>,
    pub description: Option<String>,
    pub occurred_on: NaiveDate,
}

impl CreateTransactionCmd {
    #[must_use]
    pub fn new(user_id: Uuid, amount_minor: i64, kind: EntryKind, occurred_on: NaiveDate) -> Self {
        Self {
            user_id,
            amount_minor,
            kind,
            category_id: None,
            description: None,
            occurred_on,
        }
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Replace every mutable field of an owned transaction.
///
/// Updates are whole-payload: repeating the same command yields the same
/// stored state.
#[derive(Clone, Debug)]
pub struct UpdateTransactionCmd {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount_minor: i64,
    pub kind: EntryKind,
    pub category_id: Option<Uuid>,
    pub description: Option<String>,
    pub occurred_on: NaiveDate,
}

impl UpdateTransactionCmd {
    #[must_use]
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        amount_minor: i64,
        kind: EntryKind,
        occurred_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            user_id,
            amount_minor,
            kind,
            category_id: None,
            description: None,
            occurred_on,
        }
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DeleteTransactionCmd {
    pub id: Uuid,
    pub user_id: Uuid,
}

impl DeleteTransactionCmd {
    #[must_use]
    pub fn new(id: Uuid, user_id: Uuid) -> Self {
        Self { id, user_id }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GetTransactionQuery {
    pub id: Uuid,
    pub user_id: Uuid,
}

impl GetTransactionQuery {
    #[must_use]
    pub fn new(id: Uuid, user_id: Uuid) -> Self {
        Self { id, user_id }
    }
}

/// Filters for listing transactions; all present filters apply together.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransactionListFilter {
    /// Calendar month of the business date, 1-12.
    pub month: Option<u32>,
    /// Calendar year of the business date, > 1900.
    pub year: Option<i32>,
    pub category_id: Option<Uuid>,
}

impl TransactionListFilter {
    #[must_use]
    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    #[must_use]
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ListTransactionsQuery {
    pub user_id: Uuid,
    pub filter: TransactionListFilter,
}

impl ListTransactionsQuery {
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            filter: TransactionListFilter::default(),
        }
    }

    #[must_use]
    pub fn filter(mut self, filter: TransactionListFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Result of a successful registration or login.
#[derive(Clone, Debug)]
pub struct AuthOutcome {
    pub user_id: Uuid,
    pub token: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub kind: EntryKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub amount_minor: i64,
    pub kind: EntryKind,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub description: Option<String>,
    pub occurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
