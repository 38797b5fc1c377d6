use crate::model::{Amount, AmountError};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Whether money came in or went out.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// The unique identifier of a transaction. New ids are random UUIDs so that two transactions
/// created in quick succession can never collide.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TransactionId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single recorded income or expense. Transactions are never modified after they are created.
///
/// The serialized form uses camelCase field names:
/// ```json
/// {
///   "id": "0b8d2c5e4f3a4c1e9b7d6a5f4e3d2c1b",
///   "type": "income",
///   "amount": "1000.00",
///   "category": "Salary",
///   "description": "",
///   "date": "2024-01-01",
///   "createdAt": "2024-01-01T09:30:00Z"
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: TransactionId,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: Amount,
    category: String,
    #[serde(default)]
    description: String,
    date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a transaction from a draft that has already passed validation.
    pub(crate) fn new(id: TransactionId, draft: ValidDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            transaction_type: draft.transaction_type,
            amount: draft.amount,
            category: draft.category,
            description: draft.description,
            date: draft.date,
            created_at,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// The amount as shown in a list of transactions: `+$1,000.00` or `-$200.00`.
    pub fn signed_amount(&self) -> String {
        match self.transaction_type {
            TransactionType::Income => format!("+{}", self.amount),
            TransactionType::Expense => format!("-{}", self.amount),
        }
    }
}

/// The user-entered fields of a transaction that has not been submitted yet. Nothing is validated
/// until the draft is added to the ledger.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Draft {
    transaction_type: TransactionType,
    amount: String,
    category: String,
    description: String,
    date: NaiveDate,
}

impl Default for Draft {
    /// A blank expense dated today.
    fn default() -> Self {
        Self {
            transaction_type: TransactionType::Expense,
            amount: String::new(),
            category: String::new(),
            description: String::new(),
            date: today(),
        }
    }
}

impl Draft {
    pub fn new(transaction_type: TransactionType) -> Self {
        Self {
            transaction_type,
            ..Self::default()
        }
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Switches between income and expense. The category is cleared because the categories on
    /// offer differ by type.
    pub fn set_transaction_type(&mut self, transaction_type: TransactionType) {
        self.transaction_type = transaction_type;
        self.category.clear();
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Returns the draft to blank defaults with today's date.
    pub fn reset(&mut self) {
        *self = Draft::default();
    }

    /// Checks that the amount is a positive number no larger than `Amount::MAX_TRANSACTION` and
    /// that a category was chosen.
    pub fn validate(&self) -> Result<ValidDraft, DraftError> {
        let amount = match Amount::from_str(&self.amount) {
            Ok(amount) => amount.round_cents(),
            Err(AmountError::Empty) => return Err(DraftError::MissingAmount),
            Err(AmountError::Invalid(_)) => {
                return Err(DraftError::InvalidAmount(self.amount.clone()))
            }
        };
        if !amount.is_positive() {
            return Err(DraftError::NonPositiveAmount(amount));
        }
        if amount > Amount::MAX_TRANSACTION {
            return Err(DraftError::AmountTooLarge(amount));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(DraftError::MissingCategory);
        }
        Ok(ValidDraft {
            transaction_type: self.transaction_type,
            amount,
            category: category.to_string(),
            description: self.description.trim().to_string(),
            date: self.date,
        })
    }
}

/// The parsed fields of a `Draft` that passed validation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValidDraft {
    transaction_type: TransactionType,
    amount: Amount,
    category: String,
    description: String,
    date: NaiveDate,
}

/// The reason a `Draft` cannot become a transaction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DraftError {
    MissingAmount,
    InvalidAmount(String),
    NonPositiveAmount(Amount),
    AmountTooLarge(Amount),
    MissingCategory,
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::MissingAmount => f.write_str("an amount is required"),
            DraftError::InvalidAmount(s) => write!(f, "'{s}' is not a valid amount"),
            DraftError::NonPositiveAmount(a) => {
                write!(f, "the amount must be greater than zero, got {a}")
            }
            DraftError::AmountTooLarge(a) => {
                write!(
                    f,
                    "the amount must be at most {}, got {a}",
                    Amount::MAX_TRANSACTION
                )
            }
            DraftError::MissingCategory => f.write_str("a category is required"),
        }
    }
}

impl std::error::Error for DraftError {}

/// Today's date in the local timezone.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
