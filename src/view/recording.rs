use crate::ledger::{BudgetSnapshot, Entry, EntryKind, Percentage};

use super::{BudgetView, ItemRef};

/// A render call captured by [`RecordingView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    AddListItem(Entry),
    DeleteListItem(ItemRef),
    ClearFields,
    DisplayBudget(BudgetSnapshot),
    DisplayPercentages(Vec<Percentage>),
    DisplayMonth(String),
    ChangedType(EntryKind),
}

/// Headless view that records every call, for tests and embedding.
#[derive(Debug, Default)]
pub struct RecordingView {
    events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn last_budget(&self) -> Option<&BudgetSnapshot> {
        self.events.iter().rev().find_map(|event| match event {
            ViewEvent::DisplayBudget(snapshot) => Some(snapshot),
            _ => None,
        })
    }
}

impl BudgetView for RecordingView {
    fn add_list_item(&mut self, entry: &Entry) {
        self.events.push(ViewEvent::AddListItem(entry.clone()));
    }

    fn delete_list_item(&mut self, item: ItemRef) {
        self.events.push(ViewEvent::DeleteListItem(item));
    }

    fn clear_fields(&mut self) {
        self.events.push(ViewEvent::ClearFields);
    }

    fn display_budget(&mut self, snapshot: &BudgetSnapshot) {
        self.events.push(ViewEvent::DisplayBudget(*snapshot));
    }

    fn display_percentages(&mut self, percentages: &[Percentage]) {
        self.events
            .push(ViewEvent::DisplayPercentages(percentages.to_vec()));
    }

    fn display_month(&mut self, label: &str) {
        self.events.push(ViewEvent::DisplayMonth(label.to_string()));
    }

    fn changed_type(&mut self, kind: EntryKind) {
        self.events.push(ViewEvent::ChangedType(kind));
    }
}
