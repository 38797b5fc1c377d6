//! Text rendering for command reports.

use crate::Result;
use anyhow::Context;

/// Renders rows as a Markdown table with columns padded to a common width.
pub(super) fn table<S>(headers: &[&str], rows: &[Vec<S>]) -> String
where
    S: AsRef<str>,
{
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ix, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(ix) {
                *width = (*width).max(escape(cell.as_ref()).chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&line(headers.iter().copied(), &widths));
    out.push('\n');
    out.push_str(&line(widths.iter().map(|w| "-".repeat(*w)), &widths));
    for row in rows {
        out.push('\n');
        out.push_str(&line(row.iter().map(|c| escape(c.as_ref())), &widths));
    }
    out
}

fn line<I, S>(cells: I, widths: &[usize]) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cells: Vec<String> = cells
        .into_iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

/// Renders rows as CSV with a header row.
pub(super) fn csv<S>(headers: &[&str], rows: &[Vec<S>]) -> Result<String>
where
    S: AsRef<str>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers)
        .context("Unable to write the CSV header")?;
    for row in rows {
        writer
            .write_record(row.iter().map(|c| c.as_ref()))
            .context("Unable to write a CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to finish writing CSV: {e}"))?;
    String::from_utf8(bytes).context("The CSV output is not valid UTF-8")
}

/// Renders `value` as pretty-printed JSON.
pub(super) fn json<T>(value: &T) -> Result<String>
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_string_pretty(value).context("Unable to serialize the output as JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        let rows = vec![vec!["Food", "$5.00"], vec!["Entertainment", "$12.50"]];
        let actual = table(&["Category", "Amount"], &rows);
        let expected = "\
| Category      | Amount |
| ------------- | ------ |
| Food          | $5.00  |
| Entertainment | $12.50 |";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_table_escapes_pipes() {
        let rows = vec![vec!["a|b"]];
        let actual = table(&["X"], &rows);
        assert!(actual.ends_with("| a\\|b |"));
    }

    #[test]
    fn test_csv_quotes_commas() {
        let rows = vec![vec!["Food", "lunch, with tip"]];
        let actual = csv(&["category", "description"], &rows).unwrap();
        assert_eq!(actual, "category,description\nFood,\"lunch, with tip\"\n");
    }
}
