use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

use super::{
    entry::{Entry, EntryId, EntryKind, Expense, Income},
    percentage::Percentage,
};

/// Sum of every entry in each collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

/// Read-only view of the derived figures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct BudgetSnapshot {
    pub budget: f64,
    pub income_total: f64,
    pub expense_total: f64,
    pub overall_percentage: Percentage,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
struct NextIds {
    income: EntryId,
    expense: EntryId,
}

impl NextIds {
    /// Smallest counters that cannot collide with the stored ids.
    fn after(incomes: &[Income], expenses: &[Expense]) -> Self {
        Self {
            income: incomes.iter().map(|income| income.id + 1).max().unwrap_or(0),
            expense: expenses.iter().map(|expense| expense.id + 1).max().unwrap_or(0),
        }
    }

    fn take(&mut self, kind: EntryKind) -> EntryId {
        let slot = match kind {
            EntryKind::Income => &mut self.income,
            EntryKind::Expense => &mut self.expense,
        };
        let id = *slot;
        *slot += 1;
        id
    }
}

/// In-memory store of income and expense entries plus their aggregates.
///
/// Derived figures are only refreshed by [`Ledger::recompute`] and
/// [`Ledger::recompute_expense_percentages`]; callers run them after every
/// mutation.
///
/// Deserializing only trusts the entry collections: ids must be unique per
/// kind, counters never fall behind the stored ids, and aggregates are
/// recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(try_from = "LedgerRecord")]
pub struct Ledger {
    incomes: Vec<Income>,
    expenses: Vec<Expense>,
    totals: Totals,
    budget: f64,
    overall_percentage: Percentage,
    next_ids: NextIds,
    #[serde(skip)]
    stale: bool,
}

#[derive(Deserialize)]
struct LedgerRecord {
    #[serde(default)]
    incomes: Vec<Income>,
    #[serde(default)]
    expenses: Vec<Expense>,
    #[serde(default)]
    next_ids: NextIds,
}

fn ensure_unique_ids(
    kind: EntryKind,
    ids: impl Iterator<Item = EntryId>,
) -> Result<(), TrackerError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(TrackerError::InvalidInput(format!(
                "duplicate {} id {id}",
                kind.tag()
            )));
        }
    }
    Ok(())
}

impl TryFrom<LedgerRecord> for Ledger {
    type Error = TrackerError;

    fn try_from(record: LedgerRecord) -> Result<Self, Self::Error> {
        ensure_unique_ids(
            EntryKind::Income,
            record.incomes.iter().map(|income| income.id),
        )?;
        ensure_unique_ids(
            EntryKind::Expense,
            record.expenses.iter().map(|expense| expense.id),
        )?;

        let floor = NextIds::after(&record.incomes, &record.expenses);
        let next_ids = NextIds {
            income: record.next_ids.income.max(floor.income),
            expense: record.next_ids.expense.max(floor.expense),
        };
        let mut ledger = Ledger {
            incomes: record.incomes,
            expenses: record.expenses,
            next_ids,
            ..Ledger::default()
        };
        ledger.recompute();
        ledger.recompute_expense_percentages();
        Ok(ledger)
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new entry with the next id for `kind` and returns a copy of it.
    ///
    /// No validation happens here; the controller filters user input first.
    pub fn add_entry(
        &mut self,
        kind: EntryKind,
        description: impl Into<String>,
        value: f64,
    ) -> Entry {
        let id = self.next_ids.take(kind);
        self.stale = true;
        match kind {
            EntryKind::Income => {
                let income = Income::new(id, description, value);
                self.incomes.push(income.clone());
                Entry::Income(income)
            }
            EntryKind::Expense => {
                let expense = Expense::new(id, description, value);
                self.expenses.push(expense.clone());
                Entry::Expense(expense)
            }
        }
    }

    /// Removes the entry with `id` from the `kind` collection, if present.
    pub fn delete_entry(&mut self, kind: EntryKind, id: EntryId) -> Option<Entry> {
        let removed = match kind {
            EntryKind::Income => {
                let index = self.incomes.iter().position(|income| income.id == id)?;
                Entry::Income(self.incomes.remove(index))
            }
            EntryKind::Expense => {
                let index = self.expenses.iter().position(|expense| expense.id == id)?;
                Entry::Expense(self.expenses.remove(index))
            }
        };
        self.stale = true;
        Some(removed)
    }

    /// Recalculates totals, budget, and overall percentage from the entries.
    pub fn recompute(&mut self) {
        self.totals = Totals {
            income: self.incomes.iter().map(|income| income.value).sum(),
            expenses: self.expenses.iter().map(|expense| expense.value).sum(),
        };
        self.budget = self.totals.income - self.totals.expenses;
        self.overall_percentage = Percentage::of(self.totals.expenses, self.totals.income);
        self.stale = false;
    }

    /// Refreshes each expense's share of the income total from the last `recompute`.
    pub fn recompute_expense_percentages(&mut self) {
        let total_income = self.totals.income;
        for expense in &mut self.expenses {
            expense.calc_percentage(total_income);
        }
    }

    pub fn snapshot_totals(&self) -> BudgetSnapshot {
        if self.stale {
            tracing::warn!("budget snapshot read before recompute; figures are out of date");
        }
        BudgetSnapshot {
            budget: self.budget,
            income_total: self.totals.income,
            expense_total: self.totals.expenses,
            overall_percentage: self.overall_percentage,
        }
    }

    /// One percentage per expense, in collection order.
    pub fn expense_percentages(&self) -> Vec<Percentage> {
        self.expenses.iter().map(Expense::percentage).collect()
    }

    pub fn incomes(&self) -> &[Income] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn entry(&self, kind: EntryKind, id: EntryId) -> Option<Entry> {
        match kind {
            EntryKind::Income => self
                .incomes
                .iter()
                .find(|income| income.id == id)
                .cloned()
                .map(Entry::Income),
            EntryKind::Expense => self
                .expenses
                .iter()
                .find(|expense| expense.id == id)
                .cloned()
                .map(Entry::Expense),
        }
    }

    pub fn len(&self, kind: EntryKind) -> usize {
        match kind {
            EntryKind::Income => self.incomes.len(),
            EntryKind::Expense => self.expenses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }

    /// True when entries changed since the last `recompute`.
    pub fn is_stale(&self) -> bool {
        self.stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_ledger() -> (Ledger, EntryId) {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "Salary", 1000.0);
        let rent = ledger.add_entry(EntryKind::Expense, "Rent", 300.0);
        ledger.add_entry(EntryKind::Expense, "Food", 200.0);
        (ledger, rent.id())
    }

    #[test]
    fn starts_empty_with_undefined_percentage() {
        let ledger = Ledger::new();
        let snapshot = ledger.snapshot_totals();
        assert!(ledger.is_empty());
        assert_eq!(snapshot.budget, 0.0);
        assert_eq!(snapshot.overall_percentage, Percentage::Undefined);
    }

    #[test]
    fn ids_increase_per_kind_and_are_never_reused() {
        let mut ledger = Ledger::new();
        let first = ledger.add_entry(EntryKind::Expense, "a", 1.0).id();
        let second = ledger.add_entry(EntryKind::Expense, "b", 1.0).id();
        ledger.delete_entry(EntryKind::Expense, second);
        let third = ledger.add_entry(EntryKind::Expense, "c", 1.0).id();
        let income = ledger.add_entry(EntryKind::Income, "d", 1.0).id();

        assert_eq!((first, second, third), (0, 1, 2));
        assert_eq!(income, 0);
    }

    #[test]
    fn recompute_sums_income() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "a", 100.0);
        ledger.add_entry(EntryKind::Income, "b", 200.0);
        ledger.recompute();
        assert_eq!(ledger.snapshot_totals().income_total, 300.0);
    }

    #[test]
    fn budget_and_overall_percentage() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "Salary", 200.0);
        ledger.add_entry(EntryKind::Expense, "Food", 50.0);
        ledger.recompute();
        let snapshot = ledger.snapshot_totals();
        assert_eq!(snapshot.budget, 150.0);
        assert_eq!(snapshot.overall_percentage, Percentage::Percent(25));
    }

    #[test]
    fn no_income_leaves_every_percentage_undefined() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Expense, "Rent", 300.0);
        ledger.add_entry(EntryKind::Expense, "Food", 20.0);
        ledger.recompute();
        ledger.recompute_expense_percentages();

        assert_eq!(ledger.snapshot_totals().overall_percentage.to_sentinel(), -1);
        assert!(ledger
            .expense_percentages()
            .iter()
            .all(|percentage| *percentage == Percentage::Undefined));
        assert_eq!(ledger.snapshot_totals().budget, -320.0);
    }

    #[test]
    fn deleting_missing_id_changes_nothing() {
        let (mut ledger, _) = scenario_ledger();
        ledger.recompute();
        let before = ledger.snapshot_totals();

        assert!(ledger.delete_entry(EntryKind::Income, 42).is_none());
        assert!(!ledger.is_stale());
        ledger.recompute();

        assert_eq!(ledger.snapshot_totals(), before);
        assert_eq!(ledger.len(EntryKind::Income), 1);
        assert_eq!(ledger.len(EntryKind::Expense), 2);
    }

    #[test]
    fn recompute_is_idempotent() {
        let (mut ledger, _) = scenario_ledger();
        ledger.recompute();
        let first = ledger.snapshot_totals();
        ledger.recompute();
        assert_eq!(ledger.snapshot_totals(), first);
    }

    #[test]
    fn salary_rent_food_scenario() {
        let (mut ledger, rent) = scenario_ledger();
        ledger.recompute();
        ledger.recompute_expense_percentages();

        let snapshot = ledger.snapshot_totals();
        assert_eq!(snapshot.budget, 500.0);
        assert_eq!(snapshot.income_total, 1000.0);
        assert_eq!(snapshot.expense_total, 500.0);
        assert_eq!(snapshot.overall_percentage, Percentage::Percent(50));
        assert_eq!(
            ledger.expense_percentages(),
            vec![Percentage::Percent(30), Percentage::Percent(20)]
        );

        let removed = ledger.delete_entry(EntryKind::Expense, rent).unwrap();
        assert_eq!(removed.description(), "Rent");
        ledger.recompute();
        let snapshot = ledger.snapshot_totals();
        assert_eq!(snapshot.expense_total, 200.0);
        assert_eq!(snapshot.budget, 800.0);
    }

    #[test]
    fn mutation_marks_ledger_stale_until_recompute() {
        let mut ledger = Ledger::new();
        ledger.add_entry(EntryKind::Income, "Salary", 10.0);
        assert!(ledger.is_stale());
        ledger.recompute();
        assert!(!ledger.is_stale());
    }

    #[test]
    fn entry_lookup_respects_kind() {
        let (ledger, rent) = scenario_ledger();
        assert_eq!(
            ledger.entry(EntryKind::Expense, rent).map(|e| e.value()),
            Some(300.0)
        );
        assert_eq!(
            ledger.entry(EntryKind::Income, 0).map(|e| e.description().to_string()),
            Some("Salary".to_string())
        );
        assert!(ledger.entry(EntryKind::Income, 5).is_none());
    }

    #[test]
    fn deserialized_counters_never_reuse_stored_ids() {
        let json = r#"{
            "incomes": [{"id": 0, "description": "Salary", "value": 1000.0}],
            "expenses": [],
            "next_ids": {"income": 0, "expense": 0}
        }"#;
        let mut ledger: Ledger = serde_json::from_str(json).unwrap();
        let added = ledger.add_entry(EntryKind::Income, "Bonus", 50.0);

        assert_eq!(added.id(), 1);
        let ids: Vec<_> = ledger.incomes().iter().map(|income| income.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn deserialized_ledger_recomputes_aggregates() {
        let json = r#"{
            "incomes": [{"id": 3, "description": "Salary", "value": 1000.0}],
            "expenses": [{"id": 0, "description": "Rent", "value": 300.0, "percentage": -1}],
            "budget": 12345.0
        }"#;
        let mut ledger: Ledger = serde_json::from_str(json).unwrap();

        assert!(!ledger.is_stale());
        assert_eq!(ledger.snapshot_totals().budget, 700.0);
        assert_eq!(ledger.expense_percentages(), vec![Percentage::Percent(30)]);
        assert_eq!(ledger.add_entry(EntryKind::Income, "Bonus", 1.0).id(), 4);
        assert_eq!(ledger.add_entry(EntryKind::Expense, "Food", 1.0).id(), 1);
    }

    #[test]
    fn deserializing_duplicate_ids_fails() {
        let json = r#"{
            "incomes": [
                {"id": 0, "description": "Salary", "value": 1000.0},
                {"id": 0, "description": "Bonus", "value": 10.0}
            ]
        }"#;
        assert!(serde_json::from_str::<Ledger>(json).is_err());
    }
}
