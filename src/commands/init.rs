use crate::commands::Out;
use crate::model::SavingsGoal;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory, its data directory and an initial `config.json`.
///
/// # Arguments
/// - `fintrack_home` - The directory that will be the root of the home directory, e.g.
///   `$HOME/fintrack`
/// - `savings_goal` - The savings goal to start from. Input that is not a number becomes zero.
///   When `None`, the goal starts at $5,000.
///
/// # Errors
/// - Returns an error if the home directory has already been initialized.
/// - Returns an error if any file operations fail.
pub async fn init(fintrack_home: &Path, savings_goal: Option<&str>) -> Result<Out<()>> {
    let savings_goal = savings_goal.map(SavingsGoal::parse_lossy);
    let config = Config::create(fintrack_home, savings_goal)
        .await
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Successfully created the fintrack directory at '{}'",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("fintrack");
        let out = init(&home, Some("750")).await.unwrap();
        assert!(out.message().contains("Successfully created"));

        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.default_savings_goal().to_string(), "$750.00");
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), None).await.unwrap();
        assert!(init(dir.path(), None).await.is_err());
    }
}
