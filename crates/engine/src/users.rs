//! User accounts.
//!
//! Uniqueness is enforced on `email_norm` (trimmed, lowercased); the email is
//! otherwise stored as the user typed it. The domain layer never inspects or
//! compares password hashes, it only requires one to be present.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::DomainError;

/// Normalized form of an email, used as the uniqueness key.
#[must_use]
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        password_hash: String,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Self, DomainError> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(DomainError::InvalidEmail);
        }
        if password_hash.trim().is_empty() {
            return Err(DomainError::InvalidPassword);
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_email(&mut self, email: String) -> Result<(), DomainError> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(DomainError::InvalidEmail);
        }
        self.email = email;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn update_password(&mut self, password_hash: String) -> Result<(), DomainError> {
        if password_hash.trim().is_empty() {
            return Err(DomainError::InvalidPassword);
        }
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn update_profile(&mut self, first_name: Option<String>, last_name: Option<String>) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.updated_at = Utc::now();
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub email_norm: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::categories::Entity")]
    Categories,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: ActiveValue::Set(user.id),
            email: ActiveValue::Set(user.email.clone()),
            email_norm: ActiveValue::Set(normalize_email(&user.email)),
            password_hash: ActiveValue::Set(user.password_hash.clone()),
            first_name: ActiveValue::Set(user.first_name.clone()),
            last_name: ActiveValue::Set(user.last_name.clone()),
            created_at: ActiveValue::Set(user.created_at),
            updated_at: ActiveValue::Set(user.updated_at),
        }
    }
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
