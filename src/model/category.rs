//! The categories offered for each kind of transaction.
//!
//! The ledger accepts any non-empty category, these lists only describe the usual choices.

use crate::model::TransactionType;

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Healthcare",
    "Other",
];

pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investment", "Gift", "Other"];

/// Returns the categories offered for `transaction_type`.
pub fn known_categories(transaction_type: TransactionType) -> &'static [&'static str] {
    match transaction_type {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

/// Case-insensitive check of `category` against the offered categories for `transaction_type`.
pub fn is_known_category(transaction_type: TransactionType, category: &str) -> bool {
    let category = category.trim();
    known_categories(transaction_type)
        .iter()
        .any(|known| known.eq_ignore_ascii_case(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_by_type() {
        assert!(known_categories(TransactionType::Income).contains(&"Salary"));
        assert!(!known_categories(TransactionType::Income).contains(&"Food"));
        assert!(known_categories(TransactionType::Expense).contains(&"Food"));
    }

    #[test]
    fn test_is_known_category() {
        assert!(is_known_category(TransactionType::Expense, "food"));
        assert!(is_known_category(TransactionType::Income, " Gift "));
        assert!(is_known_category(TransactionType::Income, "Other"));
        assert!(!is_known_category(TransactionType::Income, "Food"));
        assert!(!is_known_category(TransactionType::Expense, "Groceries"));
    }
}
