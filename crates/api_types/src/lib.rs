use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Income/expense axis as it appears on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterUser {
        pub email: String,
        pub password: String,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginUser {
        pub email: String,
        pub password: String,
    }

    /// Returned by both register and login.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthResponse {
        pub user_id: Uuid,
        /// Bearer token for subsequent requests.
        pub token: String,
        pub email: String,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        pub kind: EntryKind,
    }

    /// Full replacement of name and kind.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: String,
        pub kind: EntryKind,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        pub kind: EntryKind,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoriesResponse {
        /// Ordered by name, ascending.
        pub categories: Vec<CategoryView>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        /// Currency minor units, must be > 0.
        pub amount_minor: i64,
        pub kind: EntryKind,
        pub category_id: Option<Uuid>,
        pub description: Option<String>,
        /// Business date (`YYYY-MM-DD`), independent of server time.
        pub occurred_on: NaiveDate,
    }

    /// Full replacement of every mutable field.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub amount_minor: i64,
        pub kind: EntryKind,
        pub category_id: Option<Uuid>,
        pub description: Option<String>,
        pub occurred_on: NaiveDate,
    }

    /// Query-string filters for the transaction list; present filters apply
    /// together.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionListParams {
        pub month: Option<u32>,
        pub year: Option<i32>,
        pub category_id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
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

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        /// Ordered by business date, newest first.
        pub transactions: Vec<TransactionView>,
    }
}
