//! Command handlers for the fintrack CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod delete;
mod goal;
mod init;
mod list;
mod render;
mod summary;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use add::add;
pub use delete::delete;
pub use goal::goal;
pub use init::init;
pub use list::{categories, list, CategoryList};
pub use summary::summary;

/// The output type for a command. This allows the command to return a consistent message, a
/// rendered report for the terminal and, optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Output meant for standard out, such as a table of transactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<String>,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            report: None,
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            report: None,
            structure: None,
        }
    }

    /// Attach a report that will be written to standard out.
    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = Some(report.into());
        self
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the rendered `report`, if any.
    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!`, the report (if it exists) to standard out, and the
    /// structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(report) = self.report() {
            println!("{report}");
        }
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_from_str() {
        let out: Out<()> = "hello".into();
        assert_eq!(out.message(), "hello");
        assert!(out.report().is_none());
        assert!(out.structure().is_none());
    }

    #[test]
    fn test_out_with_report() {
        let out = Out::new("done", 3).with_report("| a |");
        assert_eq!(out.report(), Some("| a |"));
        assert_eq!(out.structure(), Some(&3));
    }
}
