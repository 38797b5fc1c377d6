//! Configuration file handling for fintrack.
//!
//! The configuration file is stored at `$FINTRACK_HOME/config.json` and tells fintrack where its
//! data lives and which savings goal to start from.

use crate::ledger::Ledger;
use crate::model::SavingsGoal;
use crate::storage::FileStorage;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "fintrack";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA: &str = "data";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FINTRACK_HOME` and from there it loads `$FINTRACK_HOME/config.json`. It provides
/// the paths of the items that are kept within the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    data_dir: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, its data directory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the home directory, e.g. `$HOME/fintrack`
    /// - `savings_goal` - The savings goal to start from. Uses $5,000 if `None`.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists.
    /// - Returns an error if any file operations fail.
    pub async fn create(
        dir: impl Into<PathBuf>,
        savings_goal: Option<SavingsGoal>,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the fintrack home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_dir: None,
            default_savings_goal: savings_goal,
        };
        config_file.save(&config_path).await?;

        let data_dir = resolve(&root, config_file.data_dir());
        utils::make_dir(&data_dir).await?;

        Ok(Self {
            root,
            config_path,
            data_dir,
            config_file,
        })
    }

    /// This will
    /// - validate that the `fintrack_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub async fn load(fintrack_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = fintrack_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The fintrack home directory is missing, run 'fintrack init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'fintrack init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let data_dir = resolve(&root, config_file.data_dir());
        if !data_dir.is_dir() {
            bail!("The data directory is missing '{}'", data_dir.display())
        }

        Ok(Self {
            root,
            config_path,
            data_dir,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The savings goal used until one has been set.
    pub fn default_savings_goal(&self) -> SavingsGoal {
        self.config_file.default_savings_goal.unwrap_or_default()
    }

    /// Opens the ledger kept in the data directory.
    pub async fn ledger(&self) -> Result<Ledger<FileStorage>> {
        let storage = FileStorage::new(&self.data_dir).await?;
        Ok(Ledger::load_with_default_goal(storage, self.default_savings_goal()).await)
    }
}

/// Returns `p` unchanged if it is absolute, otherwise resolves it against `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "fintrack",
///   "config_version": 1,
///   "data_dir": "data",
///   "default_savings_goal": 5000.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "fintrack"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Directory holding the stored transactions and savings goal (optional, relative to
    /// config.json or absolute). Defaults to $FINTRACK_HOME/data if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,

    /// Savings goal used until the user sets one. Defaults to 5000 if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_savings_goal: Option<SavingsGoal>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_dir: None,
            default_savings_goal: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// Gets the data directory. If the path is relative, it is relative to the config.json file.
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from(DATA))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("fintrack_home");

        let created = Config::create(&home_dir, None).await.unwrap();
        assert!(created.config_path().is_file());
        assert!(created.data_dir().is_dir());
        assert_eq!(created.data_dir(), created.root().join(DATA));
        assert_eq!(created.default_savings_goal(), SavingsGoal::default());

        let loaded = Config::load(&home_dir).await.unwrap();
        assert_eq!(loaded.root(), created.root());
        assert_eq!(loaded.data_dir(), created.data_dir());
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), None).await.unwrap();
        let result = Config::create(dir.path(), None).await;
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load_missing() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nope")).await.is_err());
        assert!(Config::load(dir.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_config_default_savings_goal() {
        let dir = TempDir::new().unwrap();
        let goal = SavingsGoal::new(Amount::from_str("1200").unwrap());
        Config::create(dir.path(), Some(goal)).await.unwrap();
        let config = Config::load(dir.path()).await.unwrap();
        assert_eq!(config.default_savings_goal(), goal);

        let ledger = config.ledger().await.unwrap();
        assert_eq!(ledger.savings_goal(), goal);
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "fintrack",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.data_dir(), PathBuf::from(DATA));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("data_dir"));
        assert!(!json.contains("default_savings_goal"));
    }

    #[test]
    fn test_resolve() {
        let root = Path::new("/home/me/fintrack");
        assert_eq!(
            resolve(root, PathBuf::from("data")),
            PathBuf::from("/home/me/fintrack/data")
        );
        assert_eq!(
            resolve(root, PathBuf::from("/var/fintrack")),
            PathBuf::from("/var/fintrack")
        );
    }
}
