use crate::model::Amount;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The target balance that savings progress is measured against. Stored as a bare JSON number,
/// read back from either a number or a string.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize)]
#[serde(transparent)]
pub struct SavingsGoal(Amount);

impl SavingsGoal {
    /// The goal used until the user sets one.
    pub const DEFAULT: SavingsGoal =
        SavingsGoal(Amount::new(Decimal::from_parts(5000, 0, 0, false, 0)));

    pub const fn new(amount: Amount) -> Self {
        Self(amount)
    }

    /// Interprets free-form user input as a goal. Anything that is not a number becomes zero.
    pub fn parse_lossy(input: &str) -> Self {
        Self(Amount::from_str(input).unwrap_or(Amount::ZERO))
    }

    pub fn amount(&self) -> Amount {
        self.0
    }

    pub fn value(&self) -> Decimal {
        self.0.value()
    }
}

impl Default for SavingsGoal {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for SavingsGoal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Serialize for SavingsGoal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.value().to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => self.0.serialize(serializer),
        }
    }
}

impl From<Amount> for SavingsGoal {
    fn from(value: Amount) -> Self {
        Self(value)
    }
}
