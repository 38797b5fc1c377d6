use crate::args::{OutputFormat, SummaryArgs};
use crate::commands::{render, Out};
use crate::metrics::Summary;
use crate::{Config, Result};

const BAR_WIDTH: usize = 20;
const MONTHLY_HEADERS: [&str; 3] = ["month", "income", "expense"];

/// Shows the totals, the balance, progress toward the savings goal and the monthly breakdown.
///
/// The CSV format contains the monthly breakdown only.
pub async fn summary(config: Config, args: SummaryArgs) -> Result<Out<Summary>> {
    let ledger = config.ledger().await?;
    let summary = ledger.summary();
    let message = format!(
        "Balance {} across {} transaction(s)",
        summary.totals.balance, summary.transaction_count
    );

    let report = match args.format() {
        OutputFormat::Json => render::json(&summary)?,
        OutputFormat::Csv => render::csv(&MONTHLY_HEADERS, &monthly_rows(&summary, false))?,
        OutputFormat::Table => table(&summary),
    };

    Ok(Out::new(message, summary).with_report(report))
}

fn table(summary: &Summary) -> String {
    let overview = vec![
        vec!["Income".to_string(), summary.totals.income.to_string()],
        vec!["Expenses".to_string(), summary.totals.expenses.to_string()],
        vec!["Balance".to_string(), summary.totals.balance.to_string()],
        vec!["Savings goal".to_string(), summary.savings_goal.to_string()],
        vec![
            "Progress".to_string(),
            format!(
                "{} {}",
                summary.progress.bar(BAR_WIDTH),
                summary.progress
            ),
        ],
    ];
    let mut out = render::table(&["", "Amount"], &overview);
    if !summary.monthly.is_empty() {
        out.push_str("\n\n");
        out.push_str(&render::table(
            &MONTHLY_HEADERS,
            &monthly_rows(summary, true),
        ));
    }
    out
}

/// Months in chronological order. `pretty` selects display amounts over plain decimals.
fn monthly_rows(summary: &Summary, pretty: bool) -> Vec<Vec<String>> {
    summary
        .monthly
        .iter()
        .map(|(month, totals)| {
            let (income, expense) = if pretty {
                (totals.income.to_string(), totals.expense.to_string())
            } else {
                (
                    totals.income.value().to_string(),
                    totals.expense.value().to_string(),
                )
            };
            vec![month.to_string(), income, expense]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Draft, SavingsGoal, TransactionType};
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    async fn seed(env: &TestEnv) {
        let mut ledger = env.config().ledger().await.unwrap();
        ledger
            .set_savings_goal(SavingsGoal::parse_lossy("5000"))
            .await
            .unwrap();
        let drafts = [
            (TransactionType::Income, "1000", "Salary", "2024-01-01"),
            (TransactionType::Expense, "200", "Food", "2024-01-15"),
            (TransactionType::Expense, "50", "Bills", "2024-02-03"),
        ];
        for (transaction_type, amount, category, date) in drafts {
            let mut draft = Draft::new(transaction_type)
                .with_amount(amount)
                .with_category(category)
                .with_date(date.parse::<NaiveDate>().unwrap());
            ledger.add(&mut draft).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_summary_table() {
        let env = TestEnv::new().await;
        seed(&env).await;

        let out = summary(env.config(), SummaryArgs::new(OutputFormat::Table))
            .await
            .unwrap();
        assert_eq!(out.message(), "Balance $750.00 across 3 transaction(s)");
        let report = out.report().unwrap();
        assert!(report.contains("| Expenses     | $250.00 "));
        assert!(report.contains("[###-----------------] 15.0%"));
        assert!(report.contains("| 2024-01 | $1,000.00 | $200.00 |"));
        assert!(report.find("2024-01").unwrap() < report.find("2024-02").unwrap());
    }

    #[tokio::test]
    async fn test_summary_empty() {
        let env = TestEnv::new().await;
        let out = summary(env.config(), SummaryArgs::new(OutputFormat::Table))
            .await
            .unwrap();
        let summary = out.structure().unwrap();
        assert_eq!(summary.transaction_count, 0);
        assert!(summary.totals.balance.is_zero());
        assert!(!out.report().unwrap().contains("month"));
    }

    #[tokio::test]
    async fn test_summary_csv() {
        let env = TestEnv::new().await;
        seed(&env).await;

        let out = summary(env.config(), SummaryArgs::new(OutputFormat::Csv))
            .await
            .unwrap();
        assert_eq!(
            out.report().unwrap(),
            "month,income,expense\n2024-01,1000,200\n2024-02,0,50\n"
        );
    }

    #[tokio::test]
    async fn test_summary_json() {
        let env = TestEnv::new().await;
        seed(&env).await;

        let out = summary(env.config(), SummaryArgs::new(OutputFormat::Json))
            .await
            .unwrap();
        let parsed: Summary = serde_json::from_str(out.report().unwrap()).unwrap();
        assert_eq!(&parsed, out.structure().unwrap());
    }
}
