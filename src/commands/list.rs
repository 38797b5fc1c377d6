use crate::args::{CategoriesArgs, ListArgs, OutputFormat};
use crate::commands::{render, Out};
use crate::model::{known_categories, Transaction, TransactionType};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};

const HEADERS: [&str; 6] = ["id", "date", "type", "category", "amount", "description"];

/// Lists the transactions matching the filter, newest first.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Vec<Transaction>>> {
    let ledger = config.ledger().await?;
    let transactions: Vec<Transaction> = ledger.filter(args.filter()).cloned().collect();
    let message = format!("Found {} transaction(s)", transactions.len());

    let report = match args.format() {
        OutputFormat::Json => render::json(&transactions)?,
        OutputFormat::Csv => render::csv(&HEADERS, &csv_rows(&transactions))?,
        OutputFormat::Table if transactions.is_empty() => "No transactions yet".to_string(),
        OutputFormat::Table => render::table(&HEADERS, &table_rows(&transactions)),
    };

    Ok(Out::new(message, transactions).with_report(report))
}

fn table_rows(transactions: &[Transaction]) -> Vec<Vec<String>> {
    transactions
        .iter()
        .map(|t| {
            vec![
                t.id().to_string(),
                t.date().to_string(),
                t.transaction_type().to_string(),
                t.category().to_string(),
                t.signed_amount(),
                t.description().to_string(),
            ]
        })
        .collect()
}

/// CSV keeps amounts as plain decimals so the file can be loaded into a spreadsheet.
fn csv_rows(transactions: &[Transaction]) -> Vec<Vec<String>> {
    transactions
        .iter()
        .map(|t| {
            vec![
                t.id().to_string(),
                t.date().to_string(),
                t.transaction_type().to_string(),
                t.category().to_string(),
                t.amount().value().to_string(),
                t.description().to_string(),
            ]
        })
        .collect()
}

/// The category choices offered for each transaction type.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub income: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expense: Vec<String>,
}

/// Lists the usual categories, optionally for one transaction type only.
pub fn categories(args: CategoriesArgs) -> Out<CategoryList> {
    let names = |t: TransactionType| -> Vec<String> {
        known_categories(t).iter().map(|s| s.to_string()).collect()
    };
    let list = match args.transaction_type() {
        Some(TransactionType::Income) => CategoryList {
            income: names(TransactionType::Income),
            ..Default::default()
        },
        Some(TransactionType::Expense) => CategoryList {
            expense: names(TransactionType::Expense),
            ..Default::default()
        },
        None => CategoryList {
            income: names(TransactionType::Income),
            expense: names(TransactionType::Expense),
        },
    };

    let mut sections = Vec::new();
    if !list.income.is_empty() {
        sections.push(format!("Income: {}", list.income.join(", ")));
    }
    if !list.expense.is_empty() {
        sections.push(format!("Expense: {}", list.expense.join(", ")));
    }
    let report = sections.join("\n");
    Out::new("Categories", list).with_report(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TypeFilter;
    use crate::model::Draft;
    use crate::test::TestEnv;

    async fn seed(env: &TestEnv) {
        let mut ledger = env.config().ledger().await.unwrap();
        let drafts = [
            (TransactionType::Income, "1000", "Salary", "pay"),
            (TransactionType::Expense, "200", "Food", "lunch, with tip"),
            (TransactionType::Expense, "35.50", "Transport", ""),
        ];
        for (transaction_type, amount, category, description) in drafts {
            let mut draft = Draft::new(transaction_type)
                .with_amount(amount)
                .with_category(category)
                .with_description(description);
            ledger.add(&mut draft).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_list_empty() {
        let env = TestEnv::new().await;
        let args = ListArgs::new(TypeFilter::All, OutputFormat::Table);
        let out = list(env.config(), args).await.unwrap();
        assert_eq!(out.report(), Some("No transactions yet"));
        assert!(out.structure().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filter_newest_first() {
        let env = TestEnv::new().await;
        seed(&env).await;

        let args = ListArgs::new(TypeFilter::Expense, OutputFormat::Table);
        let out = list(env.config(), args).await.unwrap();
        let listed = out.structure().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].category(), "Transport");
        assert_eq!(listed[1].category(), "Food");
        let report = out.report().unwrap();
        assert!(report.starts_with("| id "));
        assert!(report.contains("-$35.50"));
        assert!(!report.contains("Salary"));
    }

    #[tokio::test]
    async fn test_list_csv() {
        let env = TestEnv::new().await;
        seed(&env).await;

        let args = ListArgs::new(TypeFilter::All, OutputFormat::Csv);
        let out = list(env.config(), args).await.unwrap();
        let report = out.report().unwrap();
        let mut lines = report.lines();
        assert_eq!(
            lines.next(),
            Some("id,date,type,category,amount,description")
        );
        assert_eq!(lines.count(), 3);
        assert!(report.contains(",expense,Food,200,\"lunch, with tip\""));
    }

    #[tokio::test]
    async fn test_list_json() {
        let env = TestEnv::new().await;
        seed(&env).await;

        let args = ListArgs::new(TypeFilter::Income, OutputFormat::Json);
        let out = list(env.config(), args).await.unwrap();
        let parsed: Vec<Transaction> = serde_json::from_str(out.report().unwrap()).unwrap();
        assert_eq!(&parsed, out.structure().unwrap());
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_categories() {
        let out = categories(CategoriesArgs::new(None));
        let list = out.structure().unwrap();
        assert_eq!(list.income.len(), 5);
        assert_eq!(list.expense.len(), 7);

        let out = categories(CategoriesArgs::new(Some(TransactionType::Income)));
        assert!(out.structure().unwrap().expense.is_empty());
        assert_eq!(
            out.report(),
            Some("Income: Salary, Freelance, Investment, Gift, Other")
        );
    }
}
