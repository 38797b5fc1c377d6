//! Types that represent the core data model, such as `Transaction` and `SavingsGoal`.
mod amount;
mod category;
mod goal;
mod transaction;

pub use amount::{Amount, AmountError};
pub use category::{is_known_category, known_categories, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use goal::SavingsGoal;
pub use transaction::{Draft, DraftError, Transaction, TransactionId, TransactionType, ValidDraft};

pub(crate) use transaction::today;
