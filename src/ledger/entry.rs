use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

use super::percentage::Percentage;

/// Identifier of an entry within its own collection.
pub type EntryId = u64;

/// Selects one of the two entry collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Short tag used in item references and on the command line.
    pub fn tag(self) -> &'static str {
        match self {
            EntryKind::Income => "inc",
            EntryKind::Expense => "exp",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EntryKind {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inc" | "income" => Ok(EntryKind::Income),
            "exp" | "expense" => Ok(EntryKind::Expense),
            other => Err(TrackerError::InvalidInput(format!(
                "unknown entry type `{other}` (expected `inc` or `exp`)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Income {
    pub id: EntryId,
    pub description: String,
    pub value: f64,
}

impl Income {
    pub fn new(id: EntryId, description: impl Into<String>, value: f64) -> Self {
        Self {
            id,
            description: description.into(),
            value,
        }
    }
}

/// An expense and the share of total income it consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: EntryId,
    pub description: String,
    pub value: f64,
    #[serde(default)]
    percentage: Percentage,
}

impl Expense {
    pub fn new(id: EntryId, description: impl Into<String>, value: f64) -> Self {
        Self {
            id,
            description: description.into(),
            value,
            percentage: Percentage::Undefined,
        }
    }

    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    pub(crate) fn calc_percentage(&mut self, total_income: f64) {
        self.percentage = Percentage::of(self.value, total_income);
    }
}

/// One recorded income or expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Income(Income),
    Expense(Expense),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Income(_) => EntryKind::Income,
            Entry::Expense(_) => EntryKind::Expense,
        }
    }

    pub fn id(&self) -> EntryId {
        match self {
            Entry::Income(income) => income.id,
            Entry::Expense(expense) => expense.id,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Entry::Income(income) => &income.description,
            Entry::Expense(expense) => &expense.description,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Entry::Income(income) => income.value,
            Entry::Expense(expense) => expense.value,
        }
    }

    /// Percentage of income for expenses, `None` for income entries.
    pub fn percentage(&self) -> Option<Percentage> {
        match self {
            Entry::Income(_) => None,
            Entry::Expense(expense) => Some(expense.percentage),
        }
    }
}

impl From<Income> for Entry {
    fn from(income: Income) -> Self {
        Entry::Income(income)
    }
}

impl From<Expense> for Entry {
    fn from(expense: Expense) -> Self {
        Entry::Expense(expense)
    }
}
