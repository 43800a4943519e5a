//! Typed errors raised by the engine.
//!
//! Entity invariants raise [`DomainError`]; the pipeline wraps aggregated
//! rule failures in [`EngineError::Validation`]. The dispatcher never
//! recovers an error, it only propagates it to the transport boundary.

use std::collections::BTreeMap;
use std::fmt;

use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::EntryKind;

/// Invariant violations raised by entity construction and mutation.
///
/// These are pure, in-memory checks; no variant carries I/O state.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("email must not be blank")]
    InvalidEmail,
    #[error("password hash must not be blank")]
    InvalidPassword,
    #[error("user id must not be nil")]
    InvalidUserId,
    #[error("invalid category name: {0}")]
    InvalidCategoryName(String),
    #[error("invalid amount: {0}, must be > 0")]
    InvalidAmount(i64),
    #[error("invalid description: {0}")]
    InvalidDescription(String),
    #[error("transaction kind '{transaction}' does not match category kind '{category}'")]
    CategoryTypeMismatch {
        transaction: EntryKind,
        category: EntryKind,
    },
    #[error("invalid entry kind: {0}")]
    InvalidKind(String),
}

/// Aggregated validation failures, keyed by request field.
///
/// Every rule for a request runs to completion; each failure appends a
/// message under its field name. Serialized as a plain `field -> [messages]`
/// map in error responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for a field, empty when the field passed.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "{}", fields.join(", "))
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("validation failed for: {0}")]
    Validation(FieldErrors),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("credential service failure: {0}")]
    Credential(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (
                Self::NotFound { entity: a, id: ai },
                Self::NotFound { entity: b, id: bi },
            ) => a == b && ai == bi,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Unauthenticated(a), Self::Unauthenticated(b)) => a == b,
            (Self::Credential(a), Self::Credential(b)) => a == b,
            (Self::Domain(a), Self::Domain(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
