//! Wires user actions to ledger operations and view updates.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    ledger::{BudgetSnapshot, Entry, EntryKind, Ledger, Percentage},
    view::{format::month_label, BudgetView, ItemRef},
};

/// Raw form values for a new entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInput {
    pub kind: EntryKind,
    pub description: String,
    pub value: f64,
}

impl EntryInput {
    pub fn new(kind: EntryKind, description: impl Into<String>, value: f64) -> Self {
        Self {
            kind,
            description: description.into(),
            value,
        }
    }

    /// Builds an input from the numeric field as typed; unparseable values become NaN.
    pub fn parse(kind: EntryKind, description: impl Into<String>, raw_value: &str) -> Self {
        let value = raw_value.trim().parse::<f64>().unwrap_or(f64::NAN);
        Self::new(kind, description, value)
    }

    /// Non-empty description and a finite, positive value.
    pub fn is_valid(&self) -> bool {
        !self.description.trim().is_empty() && self.value.is_finite() && self.value > 0.0
    }
}

pub struct Controller<V: BudgetView> {
    ledger: Ledger,
    view: V,
}

impl<V: BudgetView> Controller<V> {
    pub fn new(view: V) -> Self {
        Self::with_ledger(Ledger::new(), view)
    }

    pub fn with_ledger(ledger: Ledger, view: V) -> Self {
        Self { ledger, view }
    }

    /// Shows the month header and a zeroed budget.
    pub fn init(&mut self, today: NaiveDate) {
        info!("budget tracker started");
        self.view.display_month(&month_label(today));
        self.view.display_budget(&BudgetSnapshot {
            budget: 0.0,
            income_total: 0.0,
            expense_total: 0.0,
            overall_percentage: Percentage::Undefined,
        });
    }

    /// Records a valid entry and refreshes the view; invalid input is ignored.
    pub fn add_item(&mut self, input: EntryInput) -> Option<Entry> {
        if !input.is_valid() {
            debug!(kind = %input.kind, value = input.value, "ignoring invalid entry input");
            return None;
        }

        let entry = self
            .ledger
            .add_entry(input.kind, input.description.trim(), input.value);
        debug!(item = %ItemRef::from(&entry), value = entry.value(), "entry added");

        self.view.add_list_item(&entry);
        self.view.clear_fields();
        self.update_budget();
        self.update_percentages();
        Some(entry)
    }

    /// Removes the referenced entry; unknown references change nothing.
    pub fn delete_item(&mut self, item: ItemRef) -> Option<Entry> {
        let Some(removed) = self.ledger.delete_entry(item.kind, item.id) else {
            debug!(item = %item, "delete ignored, no such entry");
            return None;
        };
        debug!(item = %item, "entry deleted");

        self.view.delete_list_item(item);
        self.update_budget();
        self.update_percentages();
        Some(removed)
    }

    pub fn change_type(&mut self, kind: EntryKind) {
        self.view.changed_type(kind);
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn update_budget(&mut self) {
        self.ledger.recompute();
        let snapshot = self.ledger.snapshot_totals();
        self.view.display_budget(&snapshot);
    }

    fn update_percentages(&mut self) {
        self.ledger.recompute_expense_percentages();
        let percentages = self.ledger.expense_percentages();
        self.view.display_percentages(&percentages);
    }
}
