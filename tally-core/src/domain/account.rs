//! Account domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of bank account, a fixed enumeration.
///
/// Serialized with the display names the snapshot format uses
/// ("Checking", "Savings", "Credit Card", "Investment").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    Checking,
    Savings,
    #[serde(rename = "Credit Card")]
    CreditCard,
    Investment,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "Checking",
            Self::Savings => "Savings",
            Self::CreditCard => "Credit Card",
            Self::Investment => "Investment",
        }
    }
}

impl std::str::FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "creditcard" | "credit" => Ok(Self::CreditCard),
            "investment" => Ok(Self::Investment),
            _ => Err(format!("Unknown account kind: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bank account owned by the user.
///
/// The balance is adjusted only by transaction application and
/// reversal; update flows never touch it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub balance: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl Account {
    /// Create a new account with an opening balance
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: AccountKind,
        balance: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            balance,
            last_updated: Utc::now(),
        }
    }

    /// Validate account data
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("account name cannot be empty");
        }
        Ok(())
    }
}

/// Partial update applied by the store's account update operation.
/// Absent fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub kind: Option<AccountKind>,
}
