//! The ledger store: the single owner of the transaction list and the savings goal.
//!
//! Every mutation is persisted before it becomes visible, and publishes a fresh `Summary` to
//! anyone holding a receiver from `Ledger::subscribe`.

use crate::metrics::Summary;
use crate::model::{Draft, DraftError, SavingsGoal, Transaction, TransactionId, TransactionType};
use crate::storage::{Persistence, Storage, SAVINGS_GOAL_KEY, TRANSACTIONS_KEY};
use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

/// Selects which transactions `Ledger::filter` returns.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TypeFilter);
serde_plain::derive_fromstr_from_deserialize!(TypeFilter);

impl TypeFilter {
    pub fn matches(&self, transaction_type: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => transaction_type == TransactionType::Income,
            TypeFilter::Expense => transaction_type == TransactionType::Expense,
        }
    }
}

impl From<TransactionType> for TypeFilter {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Income => TypeFilter::Income,
            TransactionType::Expense => TypeFilter::Expense,
        }
    }
}

/// What happened to a draft handed to `Ledger::add`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AddOutcome {
    /// The draft became this transaction, now first in the ledger.
    Added(Transaction),
    /// The draft was not valid. Neither the ledger nor the draft changed.
    Rejected(DraftError),
}

impl AddOutcome {
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            AddOutcome::Added(t) => Some(t),
            AddOutcome::Rejected(_) => None,
        }
    }
}

/// Holds the transactions, newest first, and the savings goal.
pub struct Ledger<S> {
    persistence: Persistence<S>,
    transactions: Vec<Transaction>,
    savings_goal: SavingsGoal,
    summary: watch::Sender<Summary>,
}

impl<S> Ledger<S>
where
    S: Storage,
{
    /// Loads the ledger from `storage`. Missing or malformed values fall back to an empty list
    /// and the default savings goal.
    pub async fn load(storage: S) -> Self {
        Self::load_with_default_goal(storage, SavingsGoal::default()).await
    }

    /// Like `load`, with `default_goal` used when no savings goal has been stored.
    pub async fn load_with_default_goal(storage: S, default_goal: SavingsGoal) -> Self {
        let persistence = Persistence::new(storage);
        let transactions: Vec<Transaction> = persistence
            .load(TRANSACTIONS_KEY)
            .await
            .unwrap_or_default();
        let savings_goal = persistence
            .load(SAVINGS_GOAL_KEY)
            .await
            .unwrap_or(default_goal);
        debug!(
            "Loaded {} transactions with a savings goal of {savings_goal}",
            transactions.len()
        );
        let (summary, _) = watch::channel(Summary::new(&transactions, savings_goal));
        Self {
            persistence,
            transactions,
            savings_goal,
            summary,
        }
    }

    /// All transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    pub fn savings_goal(&self) -> SavingsGoal {
        self.savings_goal
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    /// Validates `draft` and, if it is valid, records it as the newest transaction and resets
    /// the draft to a blank one dated today. An invalid draft is left as it was.
    ///
    /// # Errors
    /// - Returns an error if the updated list cannot be persisted, in which case the ledger and
    ///   the draft are unchanged.
    pub async fn add(&mut self, draft: &mut Draft) -> Result<AddOutcome> {
        let valid = match draft.validate() {
            Ok(valid) => valid,
            Err(e) => {
                debug!("Draft rejected: {e}");
                return Ok(AddOutcome::Rejected(e));
            }
        };

        let mut id = TransactionId::generate();
        while self.get(&id).is_some() {
            id = TransactionId::generate();
        }
        let transaction = Transaction::new(id, valid, Utc::now());

        let mut updated = Vec::with_capacity(self.transactions.len() + 1);
        updated.push(transaction.clone());
        updated.extend(self.transactions.iter().cloned());
        self.persistence.save(TRANSACTIONS_KEY, &updated).await?;

        self.transactions = updated;
        draft.reset();
        debug!(
            "Added {} of {} in '{}' with id {}",
            transaction.transaction_type(),
            transaction.amount(),
            transaction.category(),
            transaction.id()
        );
        self.publish();
        Ok(AddOutcome::Added(transaction))
    }

    /// Removes the transaction with `id` and returns it. Does nothing if there is no such
    /// transaction.
    pub async fn delete(&mut self, id: &TransactionId) -> Result<Option<Transaction>> {
        let Some(ix) = self.transactions.iter().position(|t| t.id() == id) else {
            debug!("No transaction with id {id}, nothing to delete");
            return Ok(None);
        };

        let mut updated = self.transactions.clone();
        let removed = updated.remove(ix);
        self.persistence.save(TRANSACTIONS_KEY, &updated).await?;

        self.transactions = updated;
        debug!("Deleted transaction {id}");
        self.publish();
        Ok(Some(removed))
    }

    /// Replaces the savings goal and persists it.
    pub async fn set_savings_goal(&mut self, goal: SavingsGoal) -> Result<()> {
        self.persistence.save(SAVINGS_GOAL_KEY, &goal).await?;
        self.savings_goal = goal;
        debug!("Savings goal set to {goal}");
        self.publish();
        Ok(())
    }

    /// Sets the savings goal from free-form input. Input that is not a number sets it to zero.
    pub async fn set_savings_goal_from_input(&mut self, input: &str) -> Result<SavingsGoal> {
        let goal = SavingsGoal::parse_lossy(input);
        self.set_savings_goal(goal).await?;
        Ok(goal)
    }

    /// The transactions matching `filter`, newest first. The view borrows the ledger, so it
    /// always reflects the current list.
    pub fn filter(&self, filter: TypeFilter) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions
            .iter()
            .filter(move |t| filter.matches(t.transaction_type()))
    }

    /// Computes the current summary.
    pub fn summary(&self) -> Summary {
        Summary::new(&self.transactions, self.savings_goal)
    }

    /// Returns a receiver that always holds the latest summary.
    pub fn subscribe(&self) -> watch::Receiver<Summary> {
        self.summary.subscribe()
    }

    fn publish(&self) {
        self.summary.send_replace(self.summary());
    }
}
