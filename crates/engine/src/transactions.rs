//! Transaction primitives.
//!
//! A `Transaction` is a single credit or debit movement. It is created once
//! and never updated or deleted; the store assigns its id and creation time.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::{EngineError, Money, ValidationErrors};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    /// Canonical value stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "CREDIT",
            Self::Debit => "DEBIT",
        }
    }

    /// Human/API spelling.
    pub fn label(self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict conversion from the stored column value.
impl TryFrom<&str> for TransactionType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "CREDIT" => Ok(Self::Credit),
            "DEBIT" => Ok(Self::Debit),
            other => Err(EngineError::InvalidData(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

/// Lenient conversion from user input: trimmed, case-insensitive.
impl FromStr for TransactionType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add(
                    "type",
                    format!("Invalid transaction type: {s}. Must be 'Credit' or 'Debit'"),
                );
                Err(EngineError::Validation(errors))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub amount: Money,
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub amount_minor: i64,
    pub kind: String,
    pub created_at: DateTimeUtc,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let amount = Money::new(model.amount_minor);
        if !amount.is_positive() {
            return Err(EngineError::InvalidData(format!(
                "transaction {} has non-positive amount",
                model.id
            )));
        }
        Ok(Self {
            id: model.id,
            amount,
            kind: TransactionType::try_from(model.kind.as_str())?,
            created_at: model.created_at,
            note: model.note,
        })
    }
}
