use crate::args::AddArgs;
use crate::commands::Out;
use crate::ledger::AddOutcome;
use crate::model::{is_known_category, known_categories, Draft, Transaction};
use crate::{Config, Result};
use anyhow::bail;
use tracing::warn;

/// Records a new transaction from the command line arguments.
///
/// A category outside the usual list is accepted, but a warning names the usual choices.
///
/// # Errors
/// - Returns an error if the amount is missing, not a number, not greater than zero, or above
///   the per-transaction limit.
/// - Returns an error if the category is blank.
/// - Returns an error if the updated ledger cannot be saved.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Transaction>> {
    let transaction_type = args.transaction_type();
    let mut draft = Draft::new(transaction_type)
        .with_amount(args.amount())
        .with_category(args.category());
    if let Some(description) = args.description() {
        draft.set_description(description);
    }
    if let Some(date) = args.date() {
        draft.set_date(date);
    }

    if !args.category().trim().is_empty() && !is_known_category(transaction_type, args.category())
    {
        warn!(
            "'{}' is not one of the usual {transaction_type} categories: {}",
            args.category().trim(),
            known_categories(transaction_type).join(", ")
        );
    }

    let mut ledger = config.ledger().await?;
    let transaction = match ledger.add(&mut draft).await? {
        AddOutcome::Added(transaction) => transaction,
        AddOutcome::Rejected(e) => bail!("Transaction not added: {e}"),
    };

    let message = format!(
        "Added {} {} in '{}' on {}",
        transaction.transaction_type(),
        transaction.signed_amount(),
        transaction.category(),
        transaction.date()
    );
    let report = transaction.id().to_string();
    Ok(Out::new(message, transaction).with_report(report))
}
