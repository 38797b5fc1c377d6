//! fintrack keeps a ledger of income and expense transactions together with a savings goal, and
//! derives totals, the balance, goal progress and a per-month breakdown from it.
//!
//! The [`Ledger`] owns the data and persists every change through a [`storage::Storage`]
//! backend before making it visible. [`metrics`] holds the pure functions that compute the
//! derived figures.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod ledger;
pub mod metrics;
pub mod model;
pub mod storage;
mod utils;


pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use ledger::{AddOutcome, Ledger, TypeFilter};
