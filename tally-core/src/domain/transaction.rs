//! Transaction domain model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a money flow, shared by transactions and categories.
///
/// Serialized as "INCOME"/"EXPENSE", the snapshot wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlowKind {
    Income,
    Expense,
}

impl std::str::FromStr for FlowKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown flow kind: {}", s)),
        }
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A single transaction against exactly one account and one category.
///
/// Transactions are immutable once created; the only lifecycle
/// operations are creation and deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub category_id: String,
    /// Always positive; the direction lives in `kind`.
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: FlowKind,
}

impl Transaction {
    /// Create a new transaction with required fields
    pub fn new(
        id: impl Into<String>,
        account_id: impl Into<String>,
        category_id: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        description: impl Into<String>,
        kind: FlowKind,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            category_id: category_id.into(),
            amount,
            date,
            description: description.into(),
            kind,
        }
    }

    /// The signed effect this transaction has on its account's balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            FlowKind::Income => self.amount,
            FlowKind::Expense => -self.amount,
        }
    }

    /// Validate transaction data
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.account_id.trim().is_empty() {
            return Err("transaction must reference an account");
        }
        if self.category_id.trim().is_empty() {
            return Err("transaction must reference a category");
        }
        if self.amount <= Decimal::ZERO {
            return Err("transaction amount must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: FlowKind) -> Transaction {
        Transaction::new(
            "t1",
            "a1",
            "c1",
            Decimal::new(500, 0),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "Lunch",
            kind,
        )
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(sample(FlowKind::Income).signed_amount(), Decimal::new(500, 0));
        assert_eq!(
            sample(FlowKind::Expense).signed_amount(),
            Decimal::new(-500, 0)
        );
    }

    #[test]
    fn test_validation() {
        assert!(sample(FlowKind::Expense).validate().is_ok());

        let mut tx = sample(FlowKind::Expense);
        tx.amount = Decimal::ZERO;
        assert!(tx.validate().is_err());

        let mut tx = sample(FlowKind::Expense);
        tx.account_id = String::new();
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_flow_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&FlowKind::Income).unwrap(),
            "\"INCOME\""
        );
        let kind: FlowKind = serde_json::from_str("\"EXPENSE\"").unwrap();
        assert_eq!(kind, FlowKind::Expense);
    }
}
