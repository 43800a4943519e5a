//! The income/expense axis shared by categories and transactions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Canonical string stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(DomainError::InvalidKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_canonical_strings() {
        assert_eq!(EntryKind::try_from("income"), Ok(EntryKind::Income));
        assert_eq!(EntryKind::try_from("expense"), Ok(EntryKind::Expense));
        assert_eq!(EntryKind::Income.as_str(), "income");
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_eq!(
            EntryKind::try_from("transfer"),
            Err(DomainError::InvalidKind("transfer".to_string()))
        );
    }
}
