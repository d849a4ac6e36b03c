use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Envelope wrapping every response body.
///
/// On success `body` is set and `errors` is `None`; on failure `body` is
/// `None` and `errors` may carry a field-level message map.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub body: Option<T>,
    pub errors: Option<BTreeMap<String, String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(body: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            body: Some(body),
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>, errors: Option<BTreeMap<String, String>>) -> Self {
        Self {
            success: false,
            message: message.into(),
            body: None,
            errors,
        }
    }
}

pub mod transaction {
    use super::*;

    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;

    /// Wire spelling of the transaction type.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum TransactionType {
        Credit,
        Debit,
    }

    /// Request body for creating a transaction.
    ///
    /// Fields are optional on the wire so a missing value is reported as a
    /// field-level validation error instead of a body rejection.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionNew {
        /// Positive, at most 2 fractional digits. Accepts a JSON string or number.
        pub amount: Option<Decimal>,
        /// `Credit` or `Debit` (case-insensitive).
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub note: Option<String>,
    }

    /// Query parameters for listing transactions.
    ///
    /// Everything is kept as raw text and validated by the engine, which
    /// reports problems per field.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionSearch {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        /// RFC3339, naive ISO date-time (UTC) or plain date.
        pub from_date: Option<String>,
        pub to_date: Option<String>,
        pub min_amount: Option<String>,
        pub max_amount: Option<String>,
        /// One of `id`, `amount`, `createdAt`, `type`, `note`.
        pub sort_by: Option<String>,
        /// `ASC` or `DESC`.
        pub sort_direction: Option<String>,
        pub page: Option<i64>,
        pub size: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: i64,
        /// Serialized with two fractional digits, e.g. `"500.00"`.
        pub amount: Decimal,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub created_at: DateTime<Utc>,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionPage {
        pub transactions: Vec<TransactionView>,
        pub current_page: u64,
        pub total_pages: u64,
        pub total_elements: u64,
        pub size: u64,
        pub first: bool,
        pub last: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionTotals {
        pub total_credit_amount: Decimal,
        pub total_debit_amount: Decimal,
        pub total_credit_count: u64,
        pub total_debit_count: u64,
        /// `total_credit_amount - total_debit_amount`
        pub net_amount: Decimal,
        pub total_transaction_count: u64,
    }
}

#[cfg(test)]
mod tests {
    use super::transaction::*;
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_transaction_accepts_string_or_number_amount() {
        let from_number: TransactionNew =
            serde_json::from_str(r#"{"amount": 12.5, "type": "Credit"}"#).unwrap();
        assert_eq!(from_number.amount, Some(dec!(12.5)));
        assert_eq!(from_number.kind.as_deref(), Some("Credit"));

        let from_string: TransactionNew =
            serde_json::from_str(r#"{"amount": "12.50", "type": "debit", "note": "rent"}"#)
                .unwrap();
        assert_eq!(from_string.amount, Some(dec!(12.50)));
        assert_eq!(from_string.note.as_deref(), Some("rent"));
    }

    #[test]
    fn views_use_camel_case_and_type_key() {
        let totals = TransactionTotals {
            total_credit_amount: dec!(500.00),
            total_debit_amount: dec!(300.00),
            total_credit_count: 1,
            total_debit_count: 1,
            net_amount: dec!(200.00),
            total_transaction_count: 2,
        };
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["netAmount"], "200.00");
        assert_eq!(json["totalTransactionCount"], 2);

        let page = TransactionPage {
            transactions: vec![],
            current_page: 0,
            total_pages: 0,
            total_elements: 0,
            size: 10,
            first: true,
            last: true,
        };
        let json = serde_json::to_value(ApiResponse::success(page, "ok")).unwrap();
        assert_eq!(json["body"]["currentPage"], 0);
        assert_eq!(json["errors"], serde_json::Value::Null);
    }

    #[test]
    fn transaction_type_uses_canonical_spelling() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Credit).unwrap(),
            "\"Credit\""
        );
        assert_eq!(
            serde_json::from_str::<TransactionType>("\"Debit\"").unwrap(),
            TransactionType::Debit
        );
    }
}
