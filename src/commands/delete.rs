use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::model::TransactionId;
use crate::{Config, Result};
use tracing::warn;

/// Deletes transactions by ID. IDs that match nothing are reported with a warning and skipped.
///
/// Returns the IDs that were actually deleted.
///
/// # Errors
/// - Returns an error if the updated ledger cannot be saved. Deletions made before the failure
///   remain saved.
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<Vec<TransactionId>>> {
    let mut ledger = config.ledger().await?;
    let mut deleted = Vec::new();
    for id in args.ids() {
        let id = TransactionId::from(id.trim());
        match ledger.delete(&id).await? {
            Some(transaction) => deleted.push(transaction.id().clone()),
            None => warn!("No transaction found with ID '{id}'"),
        }
    }

    let message = format!("Deleted {} transaction(s)", deleted.len());
    Ok(Out::new(message, deleted))
}
