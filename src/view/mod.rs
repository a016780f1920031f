//! Presentation seam between the controller and whatever draws the budget.

pub mod format;
pub mod recording;
pub mod terminal;

use std::{fmt, str::FromStr};

use crate::{
    errors::TrackerError,
    ledger::{BudgetSnapshot, Entry, EntryId, EntryKind, Percentage},
};

pub use format::NumberFormat;
pub use recording::{RecordingView, ViewEvent};
pub use terminal::TerminalView;

/// Rendering surface driven by [`crate::controller::Controller`].
///
/// Each method is one render step; the controller calls them in a fixed
/// order after every accepted action.
pub trait BudgetView {
    fn add_list_item(&mut self, entry: &Entry);
    fn delete_list_item(&mut self, item: ItemRef);
    fn clear_fields(&mut self);
    fn display_budget(&mut self, snapshot: &BudgetSnapshot);
    fn display_percentages(&mut self, percentages: &[Percentage]);
    fn display_month(&mut self, label: &str);
    fn changed_type(&mut self, kind: EntryKind);
}

/// Handle for a rendered entry, written as `inc-3` or `exp-0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub kind: EntryKind,
    pub id: EntryId,
}

impl ItemRef {
    pub fn new(kind: EntryKind, id: EntryId) -> Self {
        Self { kind, id }
    }
}

impl From<&Entry> for ItemRef {
    fn from(entry: &Entry) -> Self {
        Self::new(entry.kind(), entry.id())
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.tag(), self.id)
    }
}

impl FromStr for ItemRef {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (kind, id) = raw.trim().split_once('-').ok_or_else(|| {
            TrackerError::InvalidInput(format!("`{raw}` is not an item reference like `exp-0`"))
        })?;
        let kind = kind.parse::<EntryKind>()?;
        let id = id
            .parse::<EntryId>()
            .map_err(|err| TrackerError::InvalidInput(format!("invalid item id `{id}`: {err}")))?;
        Ok(Self { kind, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_refs_parse_and_display() {
        let item: ItemRef = "exp-12".parse().unwrap();
        assert_eq!(item, ItemRef::new(EntryKind::Expense, 12));
        assert_eq!(item.to_string(), "exp-12");
        assert_eq!(
            "income-0".parse::<ItemRef>().unwrap().to_string(),
            "inc-0"
        );
    }

    #[test]
    fn malformed_item_refs_are_rejected() {
        assert!("exp".parse::<ItemRef>().is_err());
        assert!("exp-abc".parse::<ItemRef>().is_err());
        assert!("exp--1".parse::<ItemRef>().is_err());
        assert!("gift-1".parse::<ItemRef>().is_err());
    }
}
