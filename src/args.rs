//! These structs provide the CLI interface for the fintrack CLI.

use crate::ledger::TypeFilter;
use crate::model::TransactionType;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fintrack: A command-line tool for tracking income, expenses and a savings goal.
///
/// Record each income or expense with `fintrack add`, then use `fintrack summary` to see your
/// totals, your balance, and how close that balance is to your savings goal. Everything is kept
/// in a data directory on this computer.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. By default, data is kept in $HOME/fintrack. If
    /// you want it somewhere else then pass --fintrack-home or set FINTRACK_HOME.
    Init(InitArgs),
    /// Record a new income or expense.
    Add(AddArgs),
    /// Delete transactions by ID.
    Delete(DeleteArgs),
    /// List transactions, newest first.
    List(ListArgs),
    /// Show total income, total expenses, balance, savings goal progress and a monthly breakdown.
    Summary(SummaryArgs),
    /// Show or set the savings goal.
    Goal(GoalArgs),
    /// List the categories offered for income and expenses.
    Categories(CategoriesArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fintrack data and configuration is held. Defaults to ~/fintrack
    #[arg(long, env = "FINTRACK_HOME", default_value_t = default_fintrack_home())]
    fintrack_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, fintrack_home: PathBuf) -> Self {
        Self {
            log_level,
            fintrack_home: fintrack_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn fintrack_home(&self) -> &DisplayPath {
        &self.fintrack_home
    }
}

/// How list-like output is rendered.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A Markdown table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// (Not shown): Args for the `fintrack init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The savings goal to start with. Defaults to 5000.
    #[arg(long)]
    savings_goal: Option<String>,
}

impl InitArgs {
    pub fn new(savings_goal: Option<String>) -> Self {
        Self { savings_goal }
    }

    pub fn savings_goal(&self) -> Option<&str> {
        self.savings_goal.as_deref()
    }
}

/// (Not shown): Args for the `fintrack add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// Whether this is income or an expense.
    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    transaction_type: TransactionType,

    /// The amount, greater than zero, e.g. 42.50 or $1,200
    #[arg(long)]
    amount: String,

    /// The category, e.g. Food or Salary. See `fintrack categories` for the usual choices.
    #[arg(long)]
    category: String,

    /// An optional note about the transaction.
    #[arg(long)]
    description: Option<String>,

    /// The date of the transaction as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl AddArgs {
    pub fn new(
        transaction_type: TransactionType,
        amount: impl Into<String>,
        category: impl Into<String>,
        description: Option<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            transaction_type,
            amount: amount.into(),
            category: category.into(),
            description,
            date,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// (Not shown): Args for the `fintrack delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The IDs of the transactions to delete, as shown by `fintrack list`.
    #[arg(required = true, num_args = 1..)]
    ids: Vec<String>,
}

impl DeleteArgs {
    pub fn new<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// (Not shown): Args for the `fintrack list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Which transactions to show: all, income or expense.
    #[arg(long = "type", value_enum, default_value_t = TypeFilter::All)]
    filter: TypeFilter,

    /// The output format: table, json or csv.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ListArgs {
    pub fn new(filter: TypeFilter, format: OutputFormat) -> Self {
        Self { filter, format }
    }

    pub fn filter(&self) -> TypeFilter {
        self.filter
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// (Not shown): Args for the `fintrack summary` command.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// The output format: table, json or csv. CSV contains the monthly breakdown only.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl SummaryArgs {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// (Not shown): Args for the `fintrack goal` command.
#[derive(Debug, Parser, Clone)]
pub struct GoalArgs {
    /// The new savings goal. Anything that is not a number sets the goal to zero. When omitted,
    /// the current goal is shown.
    value: Option<String>,
}

impl GoalArgs {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// (Not shown): Args for the `fintrack categories` command.
#[derive(Debug, Parser, Clone)]
pub struct CategoriesArgs {
    /// Only show the categories for income or for expenses.
    #[arg(long = "type", value_enum)]
    transaction_type: Option<TransactionType>,
}

impl CategoriesArgs {
    pub fn new(transaction_type: Option<TransactionType>) -> Self {
        Self { transaction_type }
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }
}

fn default_fintrack_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fintrack"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --fintrack-home or FINTRACK_HOME instead of relying on the \
                default fintrack home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("fintrack")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
